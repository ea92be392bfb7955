//! Headless driver: plays a session with a simple autopilot and logs what happens.
//!
//! Flags: `--ticks N`, `--seed N`, `--level N`, `--no-power-ups`, `--realtime`.
//! Set `RUST_LOG` to control verbosity.

use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use glam::IVec2;
use pathfinding::prelude::bfs;
use pellet_chase::config::GameConfig;
use pellet_chase::events::GameEvent;
use pellet_chase::game::Game;
use pellet_chase::map::direction::Direction;
use pellet_chase::systems::state::GameStage;
use thousands::Separable;
use tracing::{debug, info, trace, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug)]
struct Options {
    ticks: u64,
    seed: Option<u64>,
    level: u32,
    power_ups: bool,
    realtime: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            ticks: 20_000,
            seed: None,
            level: 1,
            power_ups: true,
            realtime: false,
        }
    }
}

fn value<T>(flag: &str, args: &mut impl Iterator<Item = String>) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = args.next().with_context(|| format!("{flag} needs a value"))?;
    raw.parse().with_context(|| format!("invalid value for {flag}: {raw:?}"))
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let mut options = Options::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--ticks" => options.ticks = value(&arg, &mut args)?,
                "--seed" => options.seed = Some(value(&arg, &mut args)?),
                "--level" => options.level = value(&arg, &mut args)?,
                "--no-power-ups" => options.power_ups = false,
                "--realtime" => options.realtime = true,
                other => bail!("unknown argument: {other}"),
            }
        }
        Ok(options)
    }
}

fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pellet_chase=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(ErrorLayer::default())
        .init();
}

/// Heads for the nearest pellet by breadth-first search.
fn autopilot(game: &Game) -> Option<Direction> {
    let map = game.map();
    let start = game.player().body.cell();
    let path = bfs(
        &start,
        |cell: &IVec2| map.walkable_neighbors(*cell),
        |cell: &IVec2| map.tile(*cell).is_edible(),
    )?;
    let next = *path.get(1)?;
    Direction::DIRECTIONS
        .into_iter()
        .find(|&dir| map.neighbor(start, dir) == next)
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::Score(score) => debug!(
            points = score.score_delta,
            lives = score.lives_delta,
            reason = score.reason.as_ref(),
            "Score"
        ),
        GameEvent::Sound(cue) => trace!(cue = cue.as_ref(), "Sound"),
        GameEvent::StageChanged { from, to } => info!(%from, %to, "Stage changed"),
        GameEvent::LevelStarted { level } => info!(level, "Level started"),
        GameEvent::PowerModeChanged(active) => debug!(active, "Power mode"),
        GameEvent::PowerUpSpawned { kind, cell } => debug!(kind = kind.as_ref(), ?cell, "Power-up appeared"),
        GameEvent::PowerUpCollected(kind) => info!(kind = kind.as_ref(), "Power-up collected"),
        GameEvent::GameOver(snapshot) => info!(score = snapshot.score, level = snapshot.level, "Final result"),
    }
}

fn main() -> anyhow::Result<()> {
    setup_tracing();

    let options = Options::parse(std::env::args().skip(1))?;
    let config = GameConfig {
        seed: options.seed,
        start_level: options.level,
        power_ups: options.power_ups,
        ..Default::default()
    };

    let mut game = Game::new(config).context("failed to create game")?;
    game.start()?;

    let started = Instant::now();
    let mut behind = Duration::ZERO;
    for _ in 0..options.ticks {
        let tick_start = Instant::now();

        if let Some(direction) = autopilot(&game) {
            game.set_pending_direction(direction);
        }
        game.tick();
        for event in game.drain_events() {
            report(&event);
        }

        if game.stage() == GameStage::GameOver {
            break;
        }

        if options.realtime {
            let interval = game.tick_interval();
            let spent = tick_start.elapsed();
            if spent < interval {
                spin_sleep::sleep(interval - spent);
            } else {
                behind += spent - interval;
            }
        }
    }

    if !behind.is_zero() {
        warn!(?behind, "Simulation fell behind schedule");
    }

    let session = game.session();
    info!(
        score = %session.score().separate_with_commas(),
        level = session.level(),
        lives = session.lives(),
        ticks = session.ticks(),
        simulated = ?session.elapsed(),
        wall = ?started.elapsed(),
        "Session finished"
    );
    Ok(())
}
