//! Error types for coretemp-graph

use std::io;
use thiserror::Error;

/// Result type alias for coretemp-graph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// The platform lacks the expected thermal interface, or it reported no cores
    #[error("Sensor unavailable: {0}")]
    SensorUnavailable(String),

    /// A core enumerated at startup stopped reporting
    #[error("Core vanished: {0}")]
    CoreVanished(String),

    /// Any other failure during a sampling/render cycle
    #[error("Tick failed: {0}")]
    TickFailure(String),

    /// The monitor already reached its terminal state
    #[error("Monitor is stopped")]
    Stopped,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
