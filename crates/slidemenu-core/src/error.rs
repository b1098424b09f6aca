use thiserror::Error;

use crate::actions::ActionKind;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No listener registered for {0} action")]
    NoListener(ActionKind),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Gesture script error: {0}")]
    Script(String),
}

pub type Result<T> = std::result::Result<T, Error>;
