//! Configuration for the converter module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::types::QualityPreset;

/// ffmpeg log levels accepted by `-loglevel`.
pub const FFMPEG_LOG_LEVELS: &[&str] = &[
    "quiet", "panic", "fatal", "error", "warning", "info", "verbose", "debug", "trace",
];

/// How the encoder binary is invoked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Path to ffmpeg binary. A bare name is looked up on the search path.
    #[serde(default = "default_ffmpeg_path")]
    pub path: PathBuf,

    /// FFmpeg log level (quiet, panic, fatal, error, warning, info, verbose, debug, trace).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Additional ffmpeg arguments, inserted before the output path.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            path: default_ffmpeg_path(),
            log_level: default_log_level(),
            extra_args: Vec::new(),
        }
    }
}

impl EncoderConfig {
    /// Creates a config pointing at a specific ffmpeg binary.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            ..Default::default()
        }
    }

    /// Sets the ffmpeg log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

/// Where and how converted files are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Replace an existing output file instead of refusing.
    #[serde(default)]
    pub overwrite: bool,

    /// Directory for outputs. Defaults to each input's own directory.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Preset used when none is given on the command line.
    #[serde(default)]
    pub default_quality: QualityPreset,
}

impl ConversionConfig {
    /// Sets the overwrite policy.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets the output directory.
    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = Some(output_dir);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let encoder = EncoderConfig::default();
        assert_eq!(encoder.path, PathBuf::from("ffmpeg"));
        assert_eq!(encoder.log_level, "info");
        assert!(encoder.extra_args.is_empty());

        let conversion = ConversionConfig::default();
        assert!(!conversion.overwrite);
        assert!(conversion.output_dir.is_none());
        assert_eq!(conversion.default_quality, QualityPreset::Medium);
    }

    #[test]
    fn test_config_builder() {
        let encoder = EncoderConfig::with_path(PathBuf::from("/opt/ffmpeg/bin/ffmpeg"))
            .with_log_level("warning");
        assert_eq!(encoder.path, PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
        assert_eq!(encoder.log_level, "warning");

        let conversion = ConversionConfig::default()
            .with_overwrite(true)
            .with_output_dir(PathBuf::from("/tmp/out"));
        assert!(conversion.overwrite);
        assert_eq!(conversion.output_dir, Some(PathBuf::from("/tmp/out")));
    }

    #[test]
    fn test_config_deserialization() {
        let conversion: ConversionConfig = toml::from_str(
            r#"
overwrite = true
default_quality = "high"
"#,
        )
        .unwrap();
        assert!(conversion.overwrite);
        assert_eq!(conversion.default_quality, QualityPreset::High);
    }
}
