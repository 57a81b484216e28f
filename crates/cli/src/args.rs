//! Command-line arguments.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use mov2mp4_core::{Config, QualityPreset};

/// Convert MOV files to MP4 with ffmpeg, installing ffmpeg if needed.
#[derive(Parser, Debug)]
#[command(name = "mov2mp4", version)]
pub struct Cli {
    /// Configuration file (default: $MOV2MP4_CONFIG, then ./mov2mp4.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert one or more files to MP4
    Convert(ConvertArgs),
    /// Check that ffmpeg is available and print its path
    Check(CheckArgs),
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Quality preset: low, medium or high (default from config, else medium)
    #[arg(short, long, value_parser = str::parse::<QualityPreset>)]
    pub quality: Option<QualityPreset>,

    /// Write outputs here instead of next to each input
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Replace existing output files
    #[arg(long)]
    pub overwrite: bool,

    /// Fail instead of running the package manager when ffmpeg is missing
    #[arg(long)]
    pub no_install: bool,
}

impl ConvertArgs {
    /// Folds command-line overrides into the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if self.overwrite {
            config.conversion.overwrite = true;
        }
        if let Some(dir) = &self.output_dir {
            config.conversion.output_dir = Some(dir.clone());
        }
        if self.no_install {
            config.resolver.auto_install = false;
        }
    }

    /// Preset to use, falling back to the configured default.
    pub fn preset(&self, config: &Config) -> QualityPreset {
        self.quality.unwrap_or(config.conversion.default_quality)
    }
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Only look for ffmpeg; never run the package manager
    #[arg(long)]
    pub no_install: bool,
}

impl CheckArgs {
    pub fn apply(&self, config: &mut Config) {
        if self.no_install {
            config.resolver.auto_install = false;
        }
    }
}
