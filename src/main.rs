//! airtype - pinch-to-type virtual keyboard driven by hand landmarks.
//!
//! A tracker delivers 21-point hand frames; pinching the thumb and
//! index fingertip over an on-screen key types it.

mod backend;
mod engine;
mod feedback;
mod render;
mod tracker;

use clap::Parser;
use tracing::info;

use crate::engine::{EngineConfig, Viewport};

#[derive(Parser, Debug)]
#[command(name = "airtype", about = "Pinch-to-type virtual keyboard")]
struct Cli {
    /// Backend to use: window, headless, or auto
    #[arg(long, default_value = "auto")]
    backend: String,

    /// Landmark source: sim (mouse-driven) or stdin (JSON frames)
    #[arg(long, default_value = "sim")]
    tracker: String,

    /// Text the script tracker types in headless mode
    #[arg(long, default_value = "HI THERE")]
    script: String,

    /// Display size as WxH (default 960x540)
    #[arg(long)]
    resolution: Option<String>,

    /// Exit after N seconds (headless mode testing)
    #[arg(long)]
    exit_after: Option<u64>,

    /// Disable keystroke sounds
    #[arg(long)]
    mute: bool,

    /// Show version and exit
    #[arg(long)]
    version: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("airtype {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "airtype=info".into()),
        )
        .init();

    info!("airtype v{} starting", env!("CARGO_PKG_VERSION"));
    info!("backend: {}", cli.backend);

    let backend_type = match cli.backend.as_str() {
        "window" => backend::BackendType::Window,
        "headless" => backend::BackendType::Headless,
        "auto" => {
            if std::env::var("DISPLAY").is_ok() || std::env::var("WAYLAND_DISPLAY").is_ok() {
                info!("auto-detected: display found, using window backend");
                backend::BackendType::Window
            } else {
                info!("auto-detected: no display, using headless backend");
                backend::BackendType::Headless
            }
        }
        other => {
            eprintln!("Unknown backend: {other}. Use: window, headless, or auto");
            std::process::exit(1);
        }
    };

    let tracker = match cli.tracker.as_str() {
        "sim" => backend::TrackerKind::Sim,
        "stdin" => backend::TrackerKind::Stdin,
        other => {
            eprintln!("Unknown tracker: {other}. Use: sim or stdin");
            std::process::exit(1);
        }
    };

    let mut config = EngineConfig::default();
    if let Some(res) = cli.resolution.as_deref() {
        match backend::parse_resolution(res) {
            Some((width, height)) => config.viewport = Viewport::new(width, height),
            None => {
                eprintln!("Bad resolution: {res}. Use WxH, e.g. 960x540");
                std::process::exit(1);
            }
        }
    }

    let options = backend::RunOptions {
        tracker,
        script: cli.script,
        exit_after: cli.exit_after,
        mute: cli.mute,
    };

    backend::run(backend_type, options, config)
}
