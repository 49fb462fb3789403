//! Error types for the typedtext library.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to write into a surface.
///
/// Playback treats every variant as a silent stop; the type exists so hosts
/// and tests can tell a vanished surface from a broken one.
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// The surface was removed from its environment after playback started.
    #[error("surface is no longer attached")]
    Detached,

    #[error("surface I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to load a script or configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
