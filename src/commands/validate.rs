use crate::commands::common::{Common, CommonArgs, print_warnings};
use clap::Parser;
use membership_criteria::Result;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn validate_config(args: &ValidateArgs) -> Result<()> {
    let common = Common::new(&args.common)?;

    println!("Configuration validation successful");
    if let Some(path) = &args.common.config {
        println!("Config file: {path}");
    }
    println!("Sources: {}", common.config.sources.len());

    print_warnings(&common.warnings);
    Ok(())
}
