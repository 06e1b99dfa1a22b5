//! Error types surfaced by zone generation and configuration loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("zone id '{0}' is not of the form Overworld.<x>.<y>[.<z>]")]
    MalformedZoneId(String),
    #[error("zone id '{zone}' lies outside the {width}x{height} world map")]
    OutOfWorld { zone: String, width: usize, height: usize },
    #[error("zone id '{zone}' is at depth {depth}, below the deepest level {max_depth}")]
    TooDeep { zone: String, depth: u32, max_depth: u32 },
    #[error("builder '{builder}' failed while generating zone '{zone}'")]
    BuilderFailed { builder: &'static str, zone: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse generation config")]
    Parse(#[from] toml::de::Error),
    #[error("invalid generation config: {0}")]
    Invalid(String),
}
