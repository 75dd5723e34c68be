#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Wave Arena session.
//!
//! The host loads a run configuration, lets the autopilot play every
//! participant at a fixed frame rate, logs lifecycle events and prints a JSON
//! summary once the run ends or the time budget is spent.

mod session_file;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info, warn};
use wave_arena_core::{Command, Event, Progress, RunState, WaveNumber};
use wave_arena_system_autopilot::Autopilot;
use wave_arena_world::{self as world, query, Config, ParticipantConfig, World};

use session_file::SessionRecord;

#[derive(Debug, Parser)]
#[command(
    name = "wave-arena",
    author,
    version,
    about = "Runs a headless Wave Arena session driven by the autopilot"
)]
struct CliArgs {
    /// TOML file with the run configuration.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Number of participants; overrides the configuration file.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=2))]
    players: Option<u8>,
    /// Seed for the world's random number generator.
    #[arg(long)]
    seed: Option<u64>,
    /// Simulated seconds to run before stopping.
    #[arg(long, default_value_t = 120.0)]
    seconds: f64,
    /// Fixed simulation frames per second.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,
    /// Wait in the lobby for simulated participants instead of starting immediately.
    #[arg(long)]
    legacy_lobby: bool,
    /// Session record to resume progress and wave from.
    #[arg(long, value_name = "PATH")]
    resume: Option<PathBuf>,
    /// Where to write the session record when the run stops.
    #[arg(long, value_name = "PATH")]
    save: Option<PathBuf>,
}

/// Totals reported once the session stops.
#[derive(Debug, Default, Serialize)]
struct SessionSummary {
    frames: u64,
    simulated_seconds: f64,
    run_state: Option<RunState>,
    wave: Option<WaveNumber>,
    progress: Progress,
    waves_advanced: u32,
    boss_phase_changes: u32,
    bosses_slain: u32,
    ultimates: u32,
    player_died: bool,
}

impl SessionSummary {
    fn record(&mut self, event: &Event) {
        match event {
            Event::WaveAdvanced { .. } => self.waves_advanced += 1,
            Event::BossPhaseChanged { .. } => self.boss_phase_changes += 1,
            Event::BossSlain { .. } => self.bosses_slain += 1,
            Event::UltimateActivated { .. } => self.ultimates += 1,
            Event::PlayerDied => self.player_died = true,
            Event::TimeAdvanced { .. }
            | Event::ParticipantJoined { .. }
            | Event::RunStarted { .. }
            | Event::ReturnToMenu { .. } => {}
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parse config: {}", path.display()))
}

fn load_session(path: &Path) -> Result<SessionRecord> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read session record: {}", path.display()))?;
    SessionRecord::decode(&text)
        .with_context(|| format!("decode session record: {}", path.display()))
}

fn save_session(path: &Path, record: &SessionRecord) -> Result<()> {
    let encoded = record.encode().context("encode session record")?;
    fs::write(path, encoded + "\n")
        .with_context(|| format!("write session record: {}", path.display()))
}

/// Folds command-line overrides into the configuration read from disk.
fn resolve_config(args: &CliArgs) -> Result<Config> {
    let mut config = load_config(args.config.as_deref())?;

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.legacy_lobby {
        config.auto_start = false;
    }
    if let Some(players) = args.players {
        let players = usize::from(players);
        config.participants.truncate(players);
        while config.participants.len() < players {
            let name = format!("Player{}", config.participants.len() + 1);
            config.participants.push(ParticipantConfig::named(name));
        }
    }
    if let Some(path) = args.resume.as_deref() {
        let record = load_session(path)?;
        info!(
            progress = record.progress.get(),
            wave = record.wave.get(),
            "resuming session"
        );
        config.progress = record.progress;
        config.starting_wave = record.wave;
    }

    Ok(config)
}

fn log_event(event: &Event) {
    match event {
        Event::TimeAdvanced { .. } => {}
        Event::ParticipantJoined { participants } => debug!(participants, "participant joined"),
        Event::RunStarted { wave } => info!(wave = wave.get(), "run started"),
        Event::WaveAdvanced { wave } => info!(wave = wave.get(), "wave advanced"),
        Event::BossPhaseChanged { boss } => info!(boss = boss.get(), "boss phase changed"),
        Event::BossSlain { boss, position } => {
            info!(boss = boss.get(), x = position.x, y = position.y, "boss slain")
        }
        Event::UltimateActivated { player } => debug!(player = player.get(), "ultimate"),
        Event::PlayerDied => warn!("player died"),
        Event::ReturnToMenu { reason } => info!(?reason, "returning to menu"),
    }
}

fn run(args: &CliArgs) -> Result<SessionSummary> {
    ensure!(
        args.seconds.is_finite() && args.seconds > 0.0,
        "--seconds must be a positive number, got {}",
        args.seconds
    );

    let config = resolve_config(args)?;
    let mut world = World::try_new(config).context("invalid run configuration")?;
    let mut autopilot = Autopilot::default();

    let dt = Duration::from_secs_f64(1.0 / f64::from(args.fps));
    let frames = (args.seconds * f64::from(args.fps)).ceil() as u64;
    info!(frames, fps = args.fps, "session started");

    let mut summary = SessionSummary::default();
    let mut commands = Vec::new();
    let mut events = Vec::new();

    for _ in 0..frames {
        commands.clear();
        autopilot.handle(&query::snapshot(&world), &mut commands);
        commands.push(Command::Tick { dt });

        events.clear();
        for command in commands.drain(..) {
            world::apply(&mut world, command, &mut events);
        }
        for event in &events {
            log_event(event);
            summary.record(event);
        }

        summary.frames += 1;
        if query::run_state(&world) == RunState::Finished {
            break;
        }
    }

    summary.simulated_seconds = summary.frames as f64 * dt.as_secs_f64();
    summary.run_state = Some(query::run_state(&world));
    summary.wave = Some(query::wave(&world));
    summary.progress = query::progress(&world);

    if let Some(path) = args.save.as_deref() {
        let record = SessionRecord {
            progress: query::progress(&world),
            wave: query::wave(&world),
        };
        save_session(path, &record)?;
        info!(path = %path.display(), "session record saved");
    }

    Ok(summary)
}

/// Entry point for the Wave Arena command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();
    let summary = run(&args)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("serialize session summary")?
    );
    Ok(())
}
