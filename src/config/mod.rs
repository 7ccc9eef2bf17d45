//! Configuration for the `criteria` tool.

#[expect(clippy::module_inception, reason = "mirrors the file layout the build script includes")]
mod config;

pub use config::{CONFIG_FILE_CANDIDATES, Config, DEFAULT_CONFIG_YAML};
