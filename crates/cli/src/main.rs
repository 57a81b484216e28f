mod args;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mov2mp4_core::{
    load_config, validate_config, Config, ConversionRequest, DependencyResolver, FfmpegConverter,
    TokioRunner,
};

use args::{Cli, Command, ConvertArgs};

/// Config file picked up from the working directory when present
const DEFAULT_CONFIG_FILE: &str = "mov2mp4.toml";

/// Environment variable naming the config file
const CONFIG_ENV: &str = "MOV2MP4_CONFIG";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Dropping `run` on a signal drops any running child, which kills it
    let result = tokio::select! {
        result = run(cli) => result,
        _ = shutdown_signal() => Err(anyhow!("Interrupted, encoder stopped")),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    // Logs go to stderr so `check` can print the path alone on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = config_path(cli.config);
    if let Some(path) = &config_path {
        info!("Loading configuration from {:?}", path);
    }

    let mut config = load_config(config_path.as_deref()).with_context(|| match &config_path {
        Some(path) => format!("Failed to load config from {:?}", path),
        None => "Failed to load config from environment".to_string(),
    })?;

    match cli.command {
        Command::Convert(args) => {
            args.apply(&mut config);
            validate_config(&config).context("Configuration validation failed")?;
            convert(&config, &args).await
        }
        Command::Check(args) => {
            args.apply(&mut config);
            validate_config(&config).context("Configuration validation failed")?;
            check(&config).await
        }
    }
}

/// `--config`, then `$MOV2MP4_CONFIG`, then `./mov2mp4.toml` if it exists.
fn config_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
        .or_else(|| {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            default.exists().then_some(default)
        })
}

async fn check(config: &Config) -> Result<()> {
    let encoder = DependencyResolver::new(config, TokioRunner::new())
        .resolve()
        .await
        .context("ffmpeg is not available")?;

    println!("{}", encoder.display());
    Ok(())
}

async fn convert(config: &Config, args: &ConvertArgs) -> Result<()> {
    let runner = TokioRunner::new();

    let encoder = DependencyResolver::new(config, runner)
        .resolve()
        .await
        .context("ffmpeg is not available")?;
    info!("Using encoder: {}", encoder.display());

    let converter = FfmpegConverter::new(config, runner).with_encoder_path(encoder);
    let preset = args.preset(config);

    for input in &args.inputs {
        if !looks_like_mov(input) {
            warn!("{} does not have a .mov extension", input.display());
        }
    }

    if let [input] = args.inputs.as_slice() {
        let output = converter
            .convert(ConversionRequest::new(input.clone(), preset))
            .await
            .with_context(|| format!("Failed to convert {}", input.display()))?;
        info!("Successfully converted: {}", output.display());
        return Ok(());
    }

    let report = converter.convert_all(&args.inputs, preset).await;
    if !report.all_succeeded() {
        bail!(
            "{} of {} conversions failed",
            report.failed.len(),
            report.total()
        );
    }

    Ok(())
}

fn looks_like_mov(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mov"))
}
