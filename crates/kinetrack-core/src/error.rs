//! Error types for the Kinetrack system.
//!
//! Only conditions that are fatal to engine operation surface here.
//! An unprojectable joint, an untracked joint, or a frame with no
//! tracked bodies are all recovered locally and never become errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Sensor unavailable: {0}")]
    SensorUnavailable(String),

    #[error("Frame channel closed")]
    ChannelClosed,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
