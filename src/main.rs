//! chipscore CLI: live playback with a simulated countdown, or WAV export.
//!
//! Usage:
//!   cs-cli play --theme crisis --seconds 20
//!   cs-cli render --theme focus --tension 0.5 --out focus.wav

use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cs_master::{Controller, EngineConfig, PuzzleCategory, TensionTracker, ThemeId};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Control-thread cadence of the simulated game loop.
const TICK: Duration = Duration::from_millis(16);

/// Longest countdown or render accepted on the command line.
const MAX_SECONDS: f32 = 3600.0;

fn parse_seconds(arg: &str) -> Result<f32, String> {
    let seconds: f32 = arg.parse().map_err(|e| format!("{e}"))?;
    if !seconds.is_finite() || seconds <= 0.0 || seconds > MAX_SECONDS {
        return Err(format!("expected a duration in (0, {MAX_SECONDS}] seconds"));
    }
    Ok(seconds)
}

#[derive(Parser)]
#[command(name = "cs-cli", about = "Procedural chiptune score engine")]
struct Cli {
    /// JSON engine config
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play live while a countdown raises the tension
    Play {
        #[arg(long, default_value = "ambient")]
        theme: ThemeId,
        /// Pick the theme from a puzzle category instead
        #[arg(long)]
        puzzle: Option<PuzzleCategory>,
        /// Length of the simulated countdown
        #[arg(long, default_value_t = 20.0, value_parser = parse_seconds)]
        seconds: f32,
        #[arg(long)]
        volume: Option<f32>,
    },
    /// Render a theme to a WAV file without opening a device
    Render {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value = "ambient")]
        theme: ThemeId,
        /// Tension factor, 0 (calm) to 1 (out of time)
        #[arg(long, default_value_t = 0.0)]
        tension: f32,
        #[arg(long, default_value_t = 5.0, value_parser = parse_seconds)]
        seconds: f32,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Command::Play {
            theme,
            puzzle,
            seconds,
            volume,
        } => play(config, theme, puzzle, seconds, volume),
        Command::Render {
            out,
            theme,
            tension,
            seconds,
        } => render(config, &out, theme, tension, seconds),
    }
}

fn play(
    config: EngineConfig,
    theme: ThemeId,
    puzzle: Option<PuzzleCategory>,
    seconds: f32,
    volume: Option<f32>,
) -> Result<()> {
    let mut ctrl = Controller::new(config);
    if !ctrl.initialize() {
        warn!("no audio device; running the countdown silently");
    }
    if let Some(volume) = volume {
        ctrl.set_master_volume(volume);
    }
    match puzzle {
        Some(category) => ctrl.update_for_puzzle_type(category),
        None => ctrl.play_theme(theme),
    }
    info!(theme = %ctrl.theme(), seconds, "countdown started");

    let total = Duration::try_from_secs_f32(seconds).context("countdown length")?;
    let start = Instant::now();
    let mut tracker = TensionTracker::new();
    loop {
        let elapsed = start.elapsed();
        if elapsed >= total {
            break;
        }
        let remaining = 1.0 - elapsed.as_secs_f32() / total.as_secs_f32();
        if let Some(level) = tracker.observe(remaining, &mut ctrl) {
            ctrl.play_sound_effect("pressure");
            info!(?level, tension = ctrl.tension(), "pressure changed");
        }
        thread::sleep(TICK);
    }

    ctrl.play_theme(ThemeId::Victory);
    info!("time up");
    thread::sleep(Duration::from_secs(2));
    ctrl.stop_music();
    thread::sleep(Duration::from_millis(100));
    ctrl.cleanup();
    Ok(())
}

fn render(
    config: EngineConfig,
    out: &Path,
    theme: ThemeId,
    tension: f32,
    seconds: f32,
) -> Result<()> {
    let mut ctrl = Controller::new(config);
    ctrl.play_theme(theme);
    ctrl.update_tension_level(1.0 - tension);
    info!(%theme, tension = ctrl.tension(), "rendering {}", out.display());

    let wav = ctrl.render_to_wav(seconds);
    std::fs::write(out, &wav).with_context(|| format!("writing {}", out.display()))?;
    info!(bytes = wav.len(), "done");
    Ok(())
}
