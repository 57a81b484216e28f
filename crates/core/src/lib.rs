pub mod config;
pub mod converter;
pub mod process;
pub mod resolver;
pub mod testing;

pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError};
pub use converter::{
    BatchReport, ConversionConfig, ConversionError, ConversionRequest, EncoderConfig,
    EncoderPresets, FfmpegConverter, QualityPreset,
};
pub use process::{CommandSpec, ProcessExit, ProcessRunner, TokioRunner};
pub use resolver::{DependencyResolver, HostOs, InstallError, ResolverConfig};
