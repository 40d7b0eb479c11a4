//! CLI argument parsing and subcommand dispatch.

use crate::config::{self, Config};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use registry::{DeviceProfile, Registry};
use std::{borrow::Cow, io::Write, path::PathBuf};
use tracing_subscriber::{EnvFilter, fmt};

pub mod catalog;
pub mod config_cmd;
pub mod select;

/// Pick the model build a device can run.
#[derive(Parser, Debug)]
#[command(name = "vramfit", version, about)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Config file override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog file replacing the built-in catalog.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Verbosity level (use -v, -vv, -vvv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List catalog entries.
    List {
        /// Only entries of this family.
        #[arg(long)]
        family: Option<String>,
        /// Only low-resource builds.
        #[arg(long)]
        low: bool,
        /// Print JSON.
        #[arg(long)]
        json: bool,
    },
    /// List family headings in catalog order.
    Families,
    /// Show one entry.
    Get {
        /// Model id.
        id: String,
        /// Print JSON.
        #[arg(long)]
        json: bool,
    },
    /// List eligible builds for a device and the default pick.
    Select {
        /// Device profile overrides.
        #[command(flatten)]
        device: DeviceArgs,
        /// Break ties by smallest vram instead of catalog order.
        #[arg(long)]
        minimize_vram: bool,
        /// Print JSON.
        #[arg(long)]
        json: bool,
    },
    /// Explain whether one build fits a device.
    Explain {
        /// Model id.
        id: String,
        /// Device profile overrides.
        #[command(flatten)]
        device: DeviceArgs,
    },
    /// Print the active catalog.
    Export {
        /// Print JSON instead of TOML.
        #[arg(long)]
        json: bool,
    },
    /// Manage CLI configuration.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

/// Config management subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the resolved configuration.
    Show,
    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Device flags layered over the configured profile.
#[derive(Args, Debug, Default, Clone)]
pub struct DeviceArgs {
    /// Available vram in MB.
    #[arg(long)]
    pub vram: Option<f64>,

    /// Supported backend feature, repeatable.
    #[arg(long = "feature")]
    pub features: Vec<String>,

    /// Largest single buffer allocation in bytes.
    #[arg(long)]
    pub max_buffer: Option<u64>,

    /// Prefer low-resource builds; `--prefer-low=false` clears a configured preference.
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub prefer_low: Option<bool>,
}

impl DeviceArgs {
    /// Apply the flags on top of `base`.
    pub fn apply(&self, base: &DeviceProfile) -> DeviceProfile {
        let mut profile = base.clone().with_features(self.features.iter().map(String::as_str));
        if let Some(vram) = self.vram {
            profile.available_vram_mb = vram;
        }
        if let Some(bytes) = self.max_buffer {
            profile.max_buffer_size_bytes = Some(bytes);
        }
        if let Some(prefer_low) = self.prefer_low {
            profile.prefer_low_resource = prefer_low;
        }
        profile
    }
}

impl Cli {
    /// Initialize tracing subscriber based on verbosity.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let directive = match self.verbose {
                0 => "warn",
                1 => "registry=debug,vramfit=debug",
                2 => "registry=trace,vramfit=trace",
                _ => "trace",
            };
            EnvFilter::new(directive)
        });

        fmt()
            .without_time()
            .with_env_filter(filter)
            .with_target(self.verbose != 0)
            .with_writer(std::io::stderr)
            .init();
    }

    /// Run the subcommand, printing to stdout.
    pub fn run(&self) -> Result<()> {
        self.run_to(&mut std::io::stdout().lock())
    }

    /// Run the subcommand, writing its output to `out`.
    pub fn run_to(&self, out: &mut impl Write) -> Result<()> {
        match &self.command {
            Command::Config { action } => config_cmd::run(self, action, out),
            Command::List { family, low, json } => {
                let (_, registry) = self.load()?;
                catalog::list(&registry, family.as_deref(), *low, *json, out)
            }
            Command::Families => {
                let (_, registry) = self.load()?;
                catalog::families(&registry, out)
            }
            Command::Get { id, json } => {
                let (_, registry) = self.load()?;
                catalog::get(&registry, id, *json, out)
            }
            Command::Select {
                device,
                minimize_vram,
                json,
            } => {
                let (config, registry) = self.load()?;
                select::select(&registry, &config, device, *minimize_vram, *json, out)
            }
            Command::Explain { id, device } => {
                let (config, registry) = self.load()?;
                select::explain(&registry, &config, id, device, out)
            }
            Command::Export { json } => {
                let (_, registry) = self.load()?;
                catalog::export(&registry, *json, out)
            }
        }
    }

    /// Resolved config with `--catalog` applied.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = config::resolve_config(self.config.as_deref())?;
        if let Some(catalog) = &self.catalog {
            config.catalog = Some(catalog.clone());
        }
        Ok(config)
    }

    fn load(&self) -> Result<(Config, Cow<'static, Registry>)> {
        let config = self.resolve_config()?;
        let registry = config.registry()?;
        Ok((config, registry))
    }
}
