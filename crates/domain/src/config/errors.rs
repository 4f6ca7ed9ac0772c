use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read showip config {path}: {reason}")]
    FileRead { path: String, reason: String },

    #[error("cannot write showip config {path}: {reason}")]
    FileWrite { path: String, reason: String },

    #[error("invalid showip config: {0}")]
    Parse(String),

    #[error("cannot serialize showip config: {0}")]
    Serialize(String),

    #[error("invalid value for `{key}`: {reason}")]
    Validation { key: &'static str, reason: String },
}
