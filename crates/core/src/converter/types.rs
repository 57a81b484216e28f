//! Types for the converter module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Extension given to every converted file.
pub const OUTPUT_EXTENSION: &str = "mp4";

/// Named quality level, each mapping to a fixed set of encoder parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// All presets, lowest quality first.
    pub const ALL: [QualityPreset; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known preset name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown quality preset '{0}' (expected low, medium or high)")]
pub struct UnknownPreset(pub String);

impl FromStr for QualityPreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}

/// A single file to convert. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    input: PathBuf,
    preset: QualityPreset,
}

impl ConversionRequest {
    /// Creates a request. Existence of `input` is checked at conversion time.
    pub fn new(input: impl Into<PathBuf>, preset: QualityPreset) -> Self {
        Self {
            input: input.into(),
            preset,
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn preset(&self) -> QualityPreset {
        self.preset
    }

    /// Where this request's output will be written.
    pub fn output_path(&self, output_dir: Option<&Path>) -> PathBuf {
        output_path_for(&self.input, output_dir)
    }
}

/// Derives the `.mp4` output path for `input`.
///
/// Without `output_dir` the result sits next to the input; with it, only the
/// file stem is kept.
pub fn output_path_for(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    match output_dir {
        Some(dir) => {
            let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
            name.push(".");
            name.push(OUTPUT_EXTENSION);
            dir.join(name)
        }
        None => input.with_extension(OUTPUT_EXTENSION),
    }
}

/// Outcome of converting several files in sequence.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Output paths of successful conversions.
    pub succeeded: Vec<PathBuf>,
    /// Inputs that failed, with the reason.
    pub failed: Vec<(PathBuf, super::ConversionError)>,
}

impl BatchReport {
    /// Total number of inputs processed.
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Whether every input converted.
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}
