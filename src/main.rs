//! A tool to convert membership criteria expressions into criteria trees and back.
//!
//! # Overview
//!
//! Role and dimension membership on the governance platform is stored as a three-tier criteria
//! tree. `criteria` lets operators write and review that membership as text instead:
//!
//! ```text
//! identity.department eq 'Accounting' and 'Active Directory'.entitlement.memberOf eq 'CN=Accounting,OU=Groups'
//! ```
//!
//! # Usage
//!
//! **Compile an expression into the platform's JSON:**
//! ```bash
//! criteria compile "identity.department eq 'Accounting'"
//! echo "identity.location in ('Berlin', 'Paris')" | criteria compile --compact
//! criteria compile --dimension "identity.type eq 'Employee'"
//! ```
//!
//! **Render a stored tree back into text:**
//! ```bash
//! criteria render tree.json
//! ```
//!
//! **Check an expression without compiling it:**
//! ```bash
//! criteria check "(identity.a eq '1' and identity.b eq '2') or identity.c eq '3'"
//! ```
//!
//! # Sources
//!
//! Expressions name sources the way operators know them, while trees carry source ids. The
//! `sources` table of the configuration file maps one to the other in both directions:
//!
//! ```yaml
//! sources:
//!   Active Directory: 2c9180835d2e5168015d32f890ca1581
//! ```
//!
//! The file is looked up as `criteria.toml`, `criteria.yml`, `criteria.yaml`, or `criteria.json` in
//! the current directory, or given with `--config`. `criteria init` writes a starting point,
//! `criteria validate` reports problems, and `criteria convert` switches formats.

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use membership_criteria::Result;

mod commands;

use crate::commands::{
    CheckArgs, CompileArgs, ConvertArgs, InitArgs, RenderArgs, ValidateArgs, check_criteria, compile_criteria, convert_config,
    init_config, render_criteria, validate_config,
};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "criteria", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: CriteriaSubcommand,
}

#[derive(Subcommand, Debug)]
enum CriteriaSubcommand {
    /// Compile an expression into a criteria tree
    Compile(CompileArgs),
    /// Render a criteria tree as an expression
    Render(RenderArgs),
    /// Parse an expression and print its canonical form
    Check(CheckArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
    /// Convert a configuration file between formats
    Convert(ConvertArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    match &Cli::parse().command {
        CriteriaSubcommand::Compile(args) => compile_criteria(args).await,
        CriteriaSubcommand::Render(args) => render_criteria(args).await,
        CriteriaSubcommand::Check(args) => check_criteria(args),
        CriteriaSubcommand::Init(args) => init_config(args),
        CriteriaSubcommand::Validate(args) => validate_config(args),
        CriteriaSubcommand::Convert(args) => convert_config(args),
    }
}
