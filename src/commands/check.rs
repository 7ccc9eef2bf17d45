use crate::commands::common::{Common, CommonArgs, read_expression};
use clap::Parser;
use membership_criteria::expr::source_names;
use membership_criteria::{Result, parse};
use ohno::{IntoAppError, bail};

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Criteria expression [default: read from stdin]
    #[arg(value_name = "EXPRESSION")]
    pub expression: Option<String>,

    /// Fail when the expression names a source missing from the configuration
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn check_criteria(args: &CheckArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let text = read_expression(args.expression.as_deref())?;
    let expression = parse(&text).into_app_err("parsing criteria expression")?;

    println!("{expression}");

    let unknown: Vec<String> = source_names(&expression)
        .into_iter()
        .filter(|name| !common.config.sources.contains_key(name))
        .collect();

    for name in &unknown {
        eprintln!("Source '{name}' is not in the configuration");
    }

    if args.strict && !unknown.is_empty() {
        bail!("{} unknown source(s)", unknown.len());
    }

    Ok(())
}
