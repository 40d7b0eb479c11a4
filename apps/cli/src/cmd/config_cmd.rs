//! Config management commands: show, init.

use crate::{
    Cli,
    cmd::ConfigCommand,
    config::{generate_default_config, global_config_path, resolve_config_path},
};
use anyhow::Result;
use std::io::Write;

/// Dispatch config management subcommands.
pub fn run(cli: &Cli, action: &ConfigCommand, out: &mut impl Write) -> Result<()> {
    match action {
        ConfigCommand::Show => show(cli, out),
        ConfigCommand::Init { force } => init(cli, *force, out),
    }
}

fn show(cli: &Cli, out: &mut impl Write) -> Result<()> {
    match resolve_config_path(cli.config.as_deref()) {
        Some(path) => writeln!(out, "# {}", path.display())?,
        None => writeln!(out, "# no config file, using defaults")?,
    }
    let config = cli.resolve_config()?;
    write!(out, "{}", toml::to_string_pretty(&config)?)?;
    Ok(())
}

fn init(cli: &Cli, force: bool, out: &mut impl Write) -> Result<()> {
    let path = cli.config.clone().unwrap_or_else(global_config_path);
    generate_default_config(&path, force)?;
    tracing::info!("generated default config at {}", path.display());
    writeln!(out, "Wrote {}", path.display())?;
    Ok(())
}
