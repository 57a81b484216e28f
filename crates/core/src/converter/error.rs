//! Error types for the converter module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during conversion.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Input file not found.
    #[error("Input file not found: {path}")]
    NotFound { path: PathBuf },

    /// Output file already exists and overwriting is disabled.
    #[error("Output file already exists: {path}")]
    OutputExists { path: PathBuf },

    /// Encoder exited with a non-zero code (-1 when killed by a signal).
    #[error("Encoder failed with exit code {0}")]
    EncoderFailed(i32),

    /// Encoder binary could not be spawned.
    #[error("Encoder not found at path: {path}")]
    EncoderMissing { path: PathBuf },

    /// Output directory does not exist and could not be created.
    #[error("Failed to create output directory: {path}")]
    OutputDirectoryFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error while spawning or waiting on the encoder.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConversionError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::OutputExists { .. } => "output_exists",
            Self::EncoderFailed(_) => "encoder_failed",
            Self::EncoderMissing { .. } => "encoder_missing",
            Self::OutputDirectoryFailed { .. } => "output_directory_failed",
            Self::Io(_) => "io",
        }
    }
}
