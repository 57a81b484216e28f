//! FFmpeg-based converter implementation.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::config::{ConversionConfig, EncoderConfig};
use super::error::ConversionError;
use super::presets::EncoderPresets;
use super::types::{ConversionRequest, QualityPreset};
use crate::config::Config;
use crate::process::{CommandSpec, ProcessRunner};

/// Exit code reported when the encoder was killed by a signal.
const SIGNAL_EXIT_CODE: i32 = -1;

/// Runs ffmpeg to turn one input into an `.mp4` next to it.
pub struct FfmpegConverter<R> {
    encoder_path: PathBuf,
    encoder: EncoderConfig,
    conversion: ConversionConfig,
    presets: EncoderPresets,
    runner: R,
}

impl<R: ProcessRunner> FfmpegConverter<R> {
    /// Creates a converter from the application config.
    pub fn new(config: &Config, runner: R) -> Self {
        Self {
            encoder_path: config.encoder.path.clone(),
            encoder: config.encoder.clone(),
            conversion: config.conversion.clone(),
            presets: config.presets.clone(),
            runner,
        }
    }

    /// Uses a specific encoder binary, typically the one the resolver found.
    pub fn with_encoder_path(mut self, path: PathBuf) -> Self {
        self.encoder_path = path;
        self
    }

    pub fn encoder_path(&self) -> &Path {
        &self.encoder_path
    }

    /// Output location for `request` under the current config.
    pub fn output_path(&self, request: &ConversionRequest) -> PathBuf {
        request.output_path(self.conversion.output_dir.as_deref())
    }

    /// Builds the full ffmpeg invocation.
    fn build_command(&self, input: &Path, output: &Path, preset: QualityPreset) -> CommandSpec {
        CommandSpec::new(&self.encoder_path)
            .args(["-hide_banner", "-loglevel"])
            .arg(self.encoder.log_level.as_str())
            .arg("-i")
            .arg(input.to_string_lossy())
            .args(self.presets.get(preset).to_ffmpeg_args())
            // -n makes ffmpeg refuse to clobber if the file appears after our check
            .arg(if self.conversion.overwrite { "-y" } else { "-n" })
            .args(self.encoder.extra_args.iter().cloned())
            .arg(output.to_string_lossy())
    }

    /// Converts one file, blocking until the encoder exits.
    ///
    /// Returns the path of the written `.mp4`.
    pub async fn convert(&self, request: ConversionRequest) -> Result<PathBuf, ConversionError> {
        let input = request.input();

        let is_file = tokio::fs::metadata(input)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(ConversionError::NotFound {
                path: input.to_path_buf(),
            });
        }

        let output = self.output_path(&request);

        if let Some(dir) = &self.conversion.output_dir {
            tokio::fs::create_dir_all(dir).await.map_err(|source| {
                ConversionError::OutputDirectoryFailed {
                    path: dir.clone(),
                    source,
                }
            })?;
        }

        // Never let the encoder read and write the same file
        if same_file(input, &output).await {
            return Err(ConversionError::OutputExists { path: output });
        }

        if !self.conversion.overwrite && tokio::fs::try_exists(&output).await? {
            return Err(ConversionError::OutputExists { path: output });
        }

        let command = self.build_command(input, &output, request.preset());
        info!(
            "Converting {} -> {} (quality: {})",
            input.display(),
            output.display(),
            request.preset()
        );
        debug!("Encoder command: {}", command);

        let exit = self.runner.run(&command).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConversionError::EncoderMissing {
                    path: self.encoder_path.clone(),
                }
            } else {
                ConversionError::Io(e)
            }
        })?;

        if !exit.success() {
            return Err(ConversionError::EncoderFailed(
                exit.code.unwrap_or(SIGNAL_EXIT_CODE),
            ));
        }

        info!("Converted {}", output.display());
        Ok(output)
    }
}

/// Whether `output` names the same file as the existing `input`, after
/// resolving `.`, `..` and symlinks. `output` itself may not exist yet.
async fn same_file(input: &Path, output: &Path) -> bool {
    if input == output {
        return true;
    }

    let Ok(input) = tokio::fs::canonicalize(input).await else {
        return false;
    };
    if let Ok(output) = tokio::fs::canonicalize(output).await {
        return input == output;
    }

    let (Some(parent), Some(name)) = (output.parent(), output.file_name()) else {
        return false;
    };
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    match tokio::fs::canonicalize(parent).await {
        Ok(parent) => input == parent.join(name),
        Err(_) => false,
    }
}
