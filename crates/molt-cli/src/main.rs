//! molt — live-reload host, entry point.
//!
//! Loads the configured application module (and optionally a platform
//! module), runs the fixed-step frame loop, and hot-swaps either module when
//! its backing artifact changes on disk.
//!
//! # Environment variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MOLT_APP_MODULE` | `build/libapp.so` | Application module artifact. |
//! | `MOLT_PLATFORM_MODULE` | *(none)* | Platform module artifact; headless when unset. |
//! | `MOLT_CONFIG` | *(none)* | TOML config file. |
//! | `RUST_LOG` | `molt=info` | Log filter. |
//!
//! Exit codes: 0 after a clean quit event; 1 on any fatal error, with a
//! diagnostic (missing symbol and artifact path included) on stderr.

use clap::Parser;
use molt_host::{Host, HostConfig};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "molt", version, about = "Live-reload host for interactive applications")]
struct Cli {
    /// Path to the application module artifact.
    #[arg(long, env = "MOLT_APP_MODULE")]
    app: Option<PathBuf>,

    /// Path to the platform-services module artifact. Headless when unset.
    #[arg(long, env = "MOLT_PLATFORM_MODULE")]
    platform: Option<PathBuf>,

    /// Host configuration file (TOML). Flags override file values.
    #[arg(long, env = "MOLT_CONFIG")]
    config: Option<PathBuf>,

    /// Viewport width override.
    #[arg(long)]
    width: Option<u32>,

    /// Viewport height override.
    #[arg(long)]
    height: Option<u32>,
}

fn main() {
    // Structured logging on stderr, so fatal diagnostics land where the
    // entry-point contract promises them.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("molt=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run() {
        error!("fatal: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => HostConfig::from_path(path)?,
        None => HostConfig::default(),
    };
    if let Some(app) = cli.app {
        config.app_module = app;
    }
    if let Some(platform) = cli.platform {
        config.platform_module = Some(platform);
    }
    if let Some(width) = cli.width {
        config.viewport_width = width;
    }
    if let Some(height) = cli.height {
        config.viewport_height = height;
    }

    let mut host = Host::bootstrap(config)?;
    host.run()?;
    Ok(())
}
