use crate::commands::common::{Common, CommonArgs, read_input};
use camino::Utf8PathBuf;
use clap::Parser;
use membership_criteria::{Level1, Result, render};
use ohno::IntoAppError;

#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Criteria tree JSON file [default: read from stdin]
    #[arg(value_name = "PATH")]
    pub input: Option<Utf8PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn render_criteria(args: &RenderArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let json = read_input(args.input.as_deref())?;
    let tree: Level1 = serde_json::from_str(&json).into_app_err("parsing criteria tree JSON")?;

    let text = render(&tree, &common.id_to_name())
        .await
        .into_app_err("rendering criteria tree")?;

    println!("{text}");
    Ok(())
}
