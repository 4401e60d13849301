use thiserror::Error;

/// Failures loading or validating configuration files.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Failures at the persistence boundary of a vehicle. Nothing inside a tick produces these.
#[derive(Error, Debug)]
pub enum VehicleError {
    #[error("Record (de)serialization failed: {0}")]
    Record(#[from] serde_json::Error),
    #[error("Invalid vehicle record: {0}")]
    InvalidRecord(String),
}
