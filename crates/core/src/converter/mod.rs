//! Converter module for turning MOV files into MP4.
//!
//! The actual transcoding is delegated to ffmpeg. This module builds the
//! command line from a [`QualityPreset`], runs it through a
//! [`ProcessRunner`](crate::process::ProcessRunner) and maps the exit status
//! to a [`ConversionError`].
//!
//! # Example
//!
//! ```ignore
//! use mov2mp4_core::converter::{ConversionRequest, FfmpegConverter, QualityPreset};
//! use mov2mp4_core::process::TokioRunner;
//!
//! let converter = FfmpegConverter::new(&config, TokioRunner::new());
//!
//! let output = converter
//!     .convert(ConversionRequest::new("/videos/clip.mov", QualityPreset::High))
//!     .await?;
//! assert_eq!(output, PathBuf::from("/videos/clip.mp4"));
//! ```

mod batch;
mod config;
mod error;
mod ffmpeg;
mod presets;
mod types;

pub use config::{ConversionConfig, EncoderConfig, FFMPEG_LOG_LEVELS};
pub use error::ConversionError;
pub use ffmpeg::FfmpegConverter;
pub use presets::{EncoderPresets, PresetParams};
pub use types::{
    output_path_for, BatchReport, ConversionRequest, QualityPreset, UnknownPreset,
    OUTPUT_EXTENSION,
};
