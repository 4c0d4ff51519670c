use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileError(#[from] io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid aircraft configuration: {0}")]
    ValidationError(String),
}
