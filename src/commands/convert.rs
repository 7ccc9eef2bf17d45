use crate::commands::common::print_warnings;
use camino::Utf8PathBuf;
use clap::Parser;
use membership_criteria::Result;
use membership_criteria::config::Config;

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Input configuration file path
    #[arg(value_name = "INPUT")]
    pub input: Utf8PathBuf,

    /// Output configuration file path
    #[arg(value_name = "OUTPUT")]
    pub output: Utf8PathBuf,
}

pub fn convert_config(args: &ConvertArgs) -> Result<()> {
    let base_dir = args.input.parent().unwrap_or(&args.input);
    let (config, warnings) = Config::load(base_dir, Some(&args.input))?;
    print_warnings(&warnings);

    config.save(&args.output)?;
    println!("Converted {} to {}", args.input, args.output);
    Ok(())
}
