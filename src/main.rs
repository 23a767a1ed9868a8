//! Application entry point — terminal speed reader.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] (defaults on first run), apply CLI overrides, and
//!    persist them with `--save`.
//! 3. Read the text from `--file` or stdin.
//! 4. Build the [`ReaderEngine`] with a [`TokioScheduler`] and a
//!    [`TerminalRenderer`].
//! 5. Probe the enrichment service, prepare the text, start playback.
//! 6. Feed timer events to the engine until the session finishes or
//!    Ctrl-C is pressed.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use speed_reader::{
    config::{is_permitted_speed, AppConfig, SPEED_OPTIONS},
    engine::ReaderEngine,
    playback::{PlaybackState, TokioScheduler},
    terminal::TerminalRenderer,
};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Read text one word at a time, with the focus letter held in place.
#[derive(Debug, Parser)]
#[command(name = "speed-reader", version, about)]
struct Args {
    /// Text file to read.  Reads stdin when omitted.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Reading speed in words per minute.
    #[arg(short, long, value_parser = parse_wpm)]
    wpm: Option<u32>,

    /// Settings file to use instead of the platform default.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the enrichment service and segment locally.
    #[arg(long)]
    local: bool,

    /// Write the effective settings (including --wpm and --local) back to
    /// the settings file before reading.
    #[arg(long)]
    save: bool,
}

fn parse_wpm(raw: &str) -> Result<u32, String> {
    let wpm: u32 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a whole number"))?;
    if !is_permitted_speed(wpm) {
        return Err(format!("speed must be one of {SPEED_OPTIONS:?}"));
    }
    Ok(wpm)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_config(args: &Args) -> AppConfig {
    let loaded = match &args.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    };
    let mut config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    if let Some(wpm) = args.wpm {
        config.playback.speed_wpm = wpm;
    }
    if args.local {
        config.backend.enabled = false;
    }
    config
}

fn save_config(config: &AppConfig, path: Option<&PathBuf>) -> Result<()> {
    match path {
        Some(path) => config.save_to(path),
        None => config.save(),
    }
    .context("saving settings")?;
    log::info!("settings saved");
    Ok(())
}

fn read_text(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("reading stdin")?;
            Ok(text)
        }
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // 2. Configuration
    let args = Args::parse();
    let config = load_config(&args);
    if args.save {
        save_config(&config, args.config.as_ref())?;
    }
    log::info!(
        "speed-reader starting ({} wpm, backend {})",
        config.playback.speed_wpm,
        if config.backend.enabled { "enabled" } else { "disabled" }
    );

    // 3. Input
    let text = read_text(args.file.as_ref())?;

    // 4. Engine
    let (scheduler, mut timers) = TokioScheduler::new();
    let renderer = TerminalRenderer::new(&config.display);
    let mut engine = ReaderEngine::from_config(&config, scheduler, renderer);

    // 5. Prepare and start
    if config.backend.enabled {
        engine.check_health().await;
    }
    let mode = engine.load_text(&text).await?;
    log::info!("text prepared ({mode} processing)");
    engine.play()?;

    // 6. Event loop
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    while engine.state() == PlaybackState::Playing {
        tokio::select! {
            event = timers.recv() => {
                let Some(event) = event else {
                    bail!("timer channel closed");
                };
                engine.on_timer(event);
            }
            _ = &mut ctrl_c => {
                engine.pause();
                break;
            }
        }
    }

    engine.controller_mut().renderer_mut().finish_line();
    log::info!("playback {}", engine.state().label().to_lowercase());
    Ok(())
}
