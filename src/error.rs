use thiserror::Error;

#[derive(Error, Debug)]
pub enum BumpError {
    #[error("Invalid requirements document: {0}")]
    Parse(String),

    #[error("Environment provisioning failed: {0}")]
    Provisioning(String),

    #[error("Install failed: {0}")]
    Install(String),

    #[error("Installed version not found: {0}")]
    LookupMiss(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Path validation failed: {0}")]
    PathValidation(String),

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BumpError>;
