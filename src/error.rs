use thiserror::Error;

/// Errors raised while building a simulation configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for this schema
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value is outside the range the simulation accepts
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    /// An `ANTS_*` environment override could not be parsed
    #[error("Invalid environment override {key}={value}")]
    InvalidOverride { key: String, value: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, ConfigError>;
