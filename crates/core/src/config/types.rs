use serde::{Deserialize, Serialize};

use crate::converter::{ConversionConfig, EncoderConfig, EncoderPresets};
use crate::resolver::ResolverConfig;

/// Root configuration
///
/// Built once at startup, then handed by reference to the resolver and the
/// converter. Every section has defaults, so an empty file is valid.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub encoder: EncoderConfig,
    #[serde(default)]
    pub conversion: ConversionConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub presets: EncoderPresets,
}
