use std::fmt;
use std::io;

/// Error types that can occur while configuring or exporting cloth motion.
///
/// The per-frame simulation itself never fails; it degrades locally instead.
#[derive(Debug)]
pub enum ClothError {
    /// Error when a configuration file cannot be read
    ConfigRead(io::Error),
    /// Error when a configuration file is not valid JSON for a config
    ConfigParse(serde_json::Error),
    /// Error when configuration values are out of their usable range
    InvalidConfig(String),
    /// Error when writing a motion trace
    Trace(io::Error),
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::ConfigRead(error) => write!(f, "Cannot read config: {error}"),
            ClothError::ConfigParse(error) => write!(f, "Cannot parse config: {error}"),
            ClothError::InvalidConfig(reason) => write!(f, "Invalid config: {reason}"),
            ClothError::Trace(error) => write!(f, "Cannot write trace: {error}"),
        }
    }
}

impl std::error::Error for ClothError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClothError::ConfigRead(error) | ClothError::Trace(error) => Some(error),
            ClothError::ConfigParse(error) => Some(error),
            ClothError::InvalidConfig(_) => None,
        }
    }
}

impl From<serde_json::Error> for ClothError {
    fn from(error: serde_json::Error) -> Self {
        ClothError::ConfigParse(error)
    }
}
