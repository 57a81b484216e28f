//! Error types for the resolver module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while making the encoder available.
#[derive(Debug, Error)]
pub enum InstallError {
    /// No installer is known for this operating system.
    #[error("Unsupported operating system: {os}")]
    UnsupportedOs { os: String },

    /// The package manager itself is not installed.
    #[error("Installer not found: {program}")]
    InstallerMissing { program: String },

    /// The package manager ran but reported failure.
    #[error("Installer failed ({command}) with exit code {code:?}")]
    InstallerFailed { command: String, code: Option<i32> },

    /// Encoder missing and automatic installation is disabled.
    #[error("Encoder not found: {encoder} (automatic installation disabled)")]
    EncoderMissing { encoder: PathBuf },

    /// I/O error while spawning the installer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl InstallError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedOs { .. } => "unsupported_os",
            Self::InstallerMissing { .. } => "installer_missing",
            Self::InstallerFailed { .. } => "installer_failed",
            Self::EncoderMissing { .. } => "encoder_missing",
            Self::Io(_) => "io",
        }
    }
}
