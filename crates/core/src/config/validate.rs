use super::{types::Config, ConfigError};
use crate::converter::{PresetParams, QualityPreset, FFMPEG_LOG_LEVELS};

/// Highest CRF accepted by libx264/libx265.
const MAX_CRF: u8 = 51;

/// Validate configuration
/// Currently validates:
/// - Encoder path is not empty
/// - Encoder log level is one ffmpeg understands
/// - Every preset names its codecs, has a sane CRF and a non-zero audio bitrate
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.encoder.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "encoder.path cannot be empty".to_string(),
        ));
    }

    if !FFMPEG_LOG_LEVELS.contains(&config.encoder.log_level.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "encoder.log_level '{}' is not one of: {}",
            config.encoder.log_level,
            FFMPEG_LOG_LEVELS.join(", ")
        )));
    }

    for preset in QualityPreset::ALL {
        validate_preset(preset, config.presets.get(preset))?;
    }

    Ok(())
}

fn validate_preset(preset: QualityPreset, params: &PresetParams) -> Result<(), ConfigError> {
    if params.video_codec.trim().is_empty() || params.audio_codec.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "presets.{}: codec names cannot be empty",
            preset
        )));
    }

    if params.crf > MAX_CRF {
        return Err(ConfigError::ValidationError(format!(
            "presets.{}.crf must be at most {}",
            preset, MAX_CRF
        )));
    }

    if params.audio_bitrate_kbps == 0 {
        return Err(ConfigError::ValidationError(format!(
            "presets.{}.audio_bitrate_kbps cannot be 0",
            preset
        )));
    }

    Ok(())
}
