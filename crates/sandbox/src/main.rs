//! Headless simulation of one stalker in the demo scene.
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use stalker_content::{ContentFactory, loaders::TUNING_FILE};
use stalker_core::{AgentConfig, AgentEvent, DifficultyLevel, TargetOracle};
use stalker_sandbox::config::parse_difficulty;
use stalker_sandbox::{Scene, SceneLayout, SimConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Run the stalker controller in a headless scene
#[derive(Parser, Debug)]
#[command(name = "stalker-sim")]
#[command(about = "Headless stalker simulation", long_about = None)]
#[command(version)]
struct Args {
    /// Directory with stalker.ron and difficulty.toml
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Difficulty level: easy, medium, hard or a stored index
    #[arg(short, long)]
    difficulty: Option<String>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks per second
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Simulated seconds
    #[arg(long)]
    duration: Option<f32>,

    /// Directory for the log file
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

impl Args {
    fn apply(self, config: &mut SimConfig) {
        if let Some(dir) = self.data_dir {
            config.data_dir = dir;
        }
        if let Some(raw) = self.difficulty {
            config.difficulty = parse_difficulty(&raw);
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(rate) = self.tick_rate {
            config.tick_rate = rate.max(1);
        }
        if let Some(duration) = self.duration {
            config.duration = duration.max(0.0);
        }
        if self.log_dir.is_some() {
            config.log_dir = self.log_dir;
        }
    }
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let mut config = SimConfig::from_env();
    Args::parse().apply(&mut config);

    setup_logging(config.log_dir.clone())?;
    run(&config)
}

fn run(config: &SimConfig) -> Result<()> {
    let factory = ContentFactory::new(&config.data_dir);
    let tuning = if factory.data_dir().join(TUNING_FILE).exists() {
        factory.load_tuning()?
    } else {
        warn!(dir = %config.data_dir.display(), "tuning file missing, using reference tuning");
        AgentConfig::default()
    };
    let preset = factory.load_preset(config.difficulty)?;

    let layout = SceneLayout::demo();
    let mut scene = Scene::seeded(&layout, tuning, config.seed).context("invalid agent tuning")?;
    scene
        .agent_mut()
        .set_difficulty_parameters(preset.parameters)
        .context("failed to apply difficulty")?;
    info!(
        difficulty = %config.difficulty,
        required_keys = preset.required_keys,
        seed = config.seed,
        "simulation starting"
    );

    let dt = config.dt();
    for _ in 0..config.tick_count() {
        let time = scene.time();
        let report = scene.step(dt);
        for event in &report.events {
            log_event(time, event);
        }
        if scene.stage.avatar.health().is_depleted() {
            info!(time, "avatar down, ending run");
            break;
        }
    }

    summarize(&scene, config.difficulty);
    Ok(())
}

fn log_event(time: f32, event: &AgentEvent) {
    match event {
        AgentEvent::StateChanged(transition) => info!(
            time,
            from = %transition.from,
            to = %transition.to,
            cause = ?transition.cause,
            "state changed"
        ),
        AgentEvent::Attacked(outcome) => info!(time, ?outcome, "attack"),
        AgentEvent::DoorsProbed(probe) => {
            info!(time, matched = probe.matched, opened = probe.opened, "doors probed")
        }
        AgentEvent::PatrolSamplingFailed => warn!(time, "no reachable patrol point"),
        other => tracing::debug!(time, event = ?other, "agent event"),
    }
}

fn summarize(scene: &Scene, difficulty: DifficultyLevel) {
    let stage = &scene.stage;
    let forced: u32 = stage.arena.doors().iter().map(|door| door.forced_count()).sum();
    println!("stalker-sim ({difficulty})");
    println!("  simulated:     {:.1}s", scene.time());
    println!("  final state:   {}", scene.agent().state());
    println!("  agent at:      {:?}", scene.agent().position());
    println!("  avatar at:     {:?}", stage.avatar.position());
    println!(
        "  avatar health: {}/{} ({} hits)",
        stage.avatar.health().current(),
        stage.avatar.health().max(),
        stage.avatar.damage_events()
    );
    println!("  doors forced:  {forced}");
    println!("  jump-scares:   {}", stage.presentation.overlay_shown_count);
    println!("  vocals:        {}", stage.audio.vocal_count());
}

/// Setup logging to both stderr and file
fn setup_logging(log_dir: Option<PathBuf>) -> Result<()> {
    let log_dir = log_dir.unwrap_or_else(default_log_dir);
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "stalker-sim.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = log_filter(std::env::var("RUST_LOG").ok().as_deref());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    // Leak the guard to keep file writer alive
    std::mem::forget(guard);

    info!("Log file: {}/stalker-sim.log", log_dir.display());
    Ok(())
}

/// `RUST_LOG` directives when set and valid, otherwise `info`.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Platform cache directory, e.g. `~/.cache/stalker/logs` on Linux.
fn default_log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "stalker")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/stalker"))
        .join("logs")
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::filter::LevelFilter;

    use super::*;

    #[test]
    fn rust_log_level_wins_over_default() {
        assert_eq!(log_filter(Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(Some("trace")).max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn unset_rust_log_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(Some("  ")).max_level_hint(), Some(LevelFilter::INFO));
    }
}
