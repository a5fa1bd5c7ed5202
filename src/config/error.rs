//! Errors raised while loading a [`HeatConfig`](super::HeatConfig).

use std::path::PathBuf;

use thiserror::Error;

/// Config load error
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    /// The config file could not be read.
    #[error("cannot read config [{}]: {source}", path.display())]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The YAML did not match the config schema. `path` is `None` for
    /// in-memory YAML.
    #[error("cannot parse config [{}]: {source}", path.as_deref().map_or(String::from("<yaml>"), |p| p.display().to_string()))]
    Parse {
        /// File that failed, if any.
        path: Option<PathBuf>,
        /// Underlying error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A value parsed but is outside its valid range.
    #[error("invalid config value {key} = {value}: {reason}")]
    Invalid {
        /// Dotted key, e.g. `grid.resolution`.
        key: &'static str,
        /// Offending value.
        value: f64,
        /// Constraint that failed.
        reason: &'static str,
    },
}

impl ConfigLoadError {
    /// Attach the file a parse error came from.
    pub(super) fn in_file(self, file: PathBuf) -> Self {
        match self {
            Self::Parse { source, .. } => Self::Parse {
                path: Some(file),
                source,
            },
            other => other,
        }
    }
}
