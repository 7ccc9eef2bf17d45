use camino::Utf8PathBuf;
use clap::Parser;
use membership_criteria::Result;
use membership_criteria::config::Config;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path
    #[arg(value_name = "PATH", default_value = "criteria.yml")]
    pub output: Utf8PathBuf,
}

pub fn init_config(args: &InitArgs) -> Result<()> {
    Config::save_default(&args.output)?;
    println!("Generated default configuration file: {}", args.output);
    Ok(())
}
