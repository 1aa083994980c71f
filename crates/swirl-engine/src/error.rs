//! Engine error types.

use std::fmt;

use swirl_art::ArtError;
use swirl_core::ConfigError;

/// Reasons an engine cannot be built.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The source art could not be loaded.
    Art(ArtError),
    /// The configuration was rejected.
    Config(ConfigError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Art(e) => write!(f, "invalid source art: {e}"),
            EngineError::Config(e) => write!(f, "invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Art(e) => Some(e),
            EngineError::Config(e) => Some(e),
        }
    }
}

impl From<ArtError> for EngineError {
    fn from(err: ArtError) -> Self {
        EngineError::Art(err)
    }
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::Config(err)
    }
}
