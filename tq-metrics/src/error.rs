//! Error types for post-run analysis and export

use thiserror::Error;
use turboq_core::SimError;

/// Errors raised by the analysis and export consumers
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Simulation failed: {0}")]
    Simulation(#[from] SimError),

    #[error("Export error: {0}")]
    ExportError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
