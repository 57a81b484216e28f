//! Fixed encoder parameters for each quality preset.

use serde::{Deserialize, Serialize};

use super::types::QualityPreset;

/// Encoder parameters behind one quality preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetParams {
    /// ffmpeg video codec name.
    pub video_codec: String,
    /// Constant rate factor (lower is better quality).
    pub crf: u8,
    /// ffmpeg audio codec name.
    pub audio_codec: String,
    /// Audio bitrate in kbps.
    pub audio_bitrate_kbps: u32,
}

impl PresetParams {
    fn x264_aac(crf: u8, audio_bitrate_kbps: u32) -> Self {
        Self {
            video_codec: "libx264".to_string(),
            crf,
            audio_codec: "aac".to_string(),
            audio_bitrate_kbps,
        }
    }

    /// The codec flags passed to ffmpeg for this preset.
    pub fn to_ffmpeg_args(&self) -> Vec<String> {
        vec![
            "-c:v".to_string(),
            self.video_codec.clone(),
            "-crf".to_string(),
            self.crf.to_string(),
            "-c:a".to_string(),
            self.audio_codec.clone(),
            "-b:a".to_string(),
            format!("{}k", self.audio_bitrate_kbps),
        ]
    }
}

/// One parameter set per preset.
///
/// Built once from configuration and handed to the converter; never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderPresets {
    #[serde(default = "default_low")]
    pub low: PresetParams,
    #[serde(default = "default_medium")]
    pub medium: PresetParams,
    #[serde(default = "default_high")]
    pub high: PresetParams,
}

fn default_low() -> PresetParams {
    PresetParams::x264_aac(28, 96)
}

fn default_medium() -> PresetParams {
    PresetParams::x264_aac(23, 128)
}

fn default_high() -> PresetParams {
    PresetParams::x264_aac(18, 192)
}

impl Default for EncoderPresets {
    fn default() -> Self {
        Self {
            low: default_low(),
            medium: default_medium(),
            high: default_high(),
        }
    }
}

impl EncoderPresets {
    /// Parameters for `preset`.
    pub fn get(&self, preset: QualityPreset) -> &PresetParams {
        match preset {
            QualityPreset::Low => &self.low,
            QualityPreset::Medium => &self.medium,
            QualityPreset::High => &self.high,
        }
    }
}
