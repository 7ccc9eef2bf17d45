use crate::commands::common::{Common, CommonArgs, read_expression};
use clap::Parser;
use membership_criteria::expr::source_names;
use membership_criteria::{CriteriaCompiler, Result, Variant, parse};
use ohno::IntoAppError;

#[derive(Parser, Debug)]
pub struct CompileArgs {
    /// Criteria expression [default: read from stdin]
    #[arg(value_name = "EXPRESSION")]
    pub expression: Option<String>,

    /// Compile dimension criteria, which accept single values only
    #[arg(long)]
    pub dimension: bool,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn compile_criteria(args: &CompileArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let text = read_expression(args.expression.as_deref())?;
    let expression = parse(&text).into_app_err("parsing criteria expression")?;

    let resolver = common.name_to_id();
    resolver
        .warm(source_names(&expression))
        .await
        .into_app_err("resolving source names")?;

    let variant = if args.dimension { Variant::Dimension } else { Variant::Role };
    let tree = CriteriaCompiler::new(&resolver, variant)
        .compile(&expression)
        .await
        .into_app_err_with(|| format!("compiling {variant} criteria"))?;

    let json = if args.compact {
        serde_json::to_string(&tree)
    } else {
        serde_json::to_string_pretty(&tree)
    }
    .into_app_err("serializing criteria tree")?;

    println!("{json}");
    Ok(())
}
