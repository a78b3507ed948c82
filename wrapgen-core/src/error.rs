//! Error types for wrapgen-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or querying the type registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The requested type name is not part of the supported set.
    #[error("unknown type '{name}'")]
    UnknownType { name: String },

    /// An integral declaration names a storage type with no bounds entry.
    #[error("type '{api}' declares unsupported native type '{native_type}'")]
    UnsupportedNativeType { api: String, native_type: String },
}

/// Errors raised while loading generator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure while reading the config file.
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load; includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// An explicitly requested config file does not exist.
    #[error("config not found at {path}")]
    NotFound { path: PathBuf },
}
