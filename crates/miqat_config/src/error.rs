//! Errors raised while loading or saving settings.

use std::io;
use std::path::PathBuf;

use miqat_prayer::UnknownVariant;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The settings file could not be read or written.
    #[error("settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file is not valid TOML or does not match the settings layout.
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
    /// Settings could not be rendered as TOML.
    #[error("cannot serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A legacy integer code outside the known range.
    #[error("unknown {kind} code {code}")]
    UnknownCode { kind: &'static str, code: i64 },
    /// A name that matches no known variant.
    #[error(transparent)]
    UnknownName(#[from] UnknownVariant),
}
