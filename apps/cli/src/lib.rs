//! vramfit CLI: browse the model catalog and pick a build for a device.

pub use {
    cmd::{Cli, Command},
    config::Config,
};

pub mod cmd;
pub mod config;
