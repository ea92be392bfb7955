//! Score, lives and the timers that belong to a single play session.

use std::time::Duration;

use tracing::debug;

use crate::config::GameConfig;

/// Everything about a session that is not on the board.
///
/// Time here is simulated: it advances by the current tick interval on every running
/// tick and never reads the wall clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    score: u32,
    lives: u32,
    level: u32,
    pellets_eaten: u32,
    total_pellets: u32,
    streak: u32,
    last_pickup: Option<Duration>,
    power_remaining: Duration,
    elapsed: Duration,
    tick_interval: Duration,
    ticks: u64,
    multiplier: u32,
}

impl Session {
    pub fn new(config: &GameConfig, total_pellets: u32) -> Self {
        Self {
            score: 0,
            lives: config.lives,
            level: config.start_level,
            pellets_eaten: 0,
            total_pellets,
            streak: 0,
            last_pickup: None,
            power_remaining: Duration::ZERO,
            elapsed: Duration::ZERO,
            tick_interval: config.tick_interval,
            ticks: 0,
            multiplier: 1,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn pellets_eaten(&self) -> u32 {
        self.pellets_eaten
    }

    pub fn total_pellets(&self) -> u32 {
        self.total_pellets
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Simulated time since the session started.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn set_tick_interval(&mut self, interval: Duration) {
        self.tick_interval = interval;
    }

    /// Advances the simulated clock by one tick, returning the time step.
    pub fn advance_clock(&mut self) -> Duration {
        self.ticks += 1;
        self.elapsed += self.tick_interval;
        self.tick_interval
    }

    pub fn is_powered(&self) -> bool {
        !self.power_remaining.is_zero()
    }

    pub fn power_remaining(&self) -> Duration {
        self.power_remaining
    }

    /// Starts power-mode, or extends it if less than `duration` remains.
    pub fn start_power(&mut self, duration: Duration) {
        self.power_remaining = self.power_remaining.max(duration);
    }

    /// Counts power-mode down, returning true on the tick it runs out.
    pub fn tick_power(&mut self, dt: Duration) -> bool {
        if self.power_remaining.is_zero() {
            return false;
        }
        self.power_remaining = self.power_remaining.saturating_sub(dt);
        self.power_remaining.is_zero()
    }

    pub fn end_power(&mut self) {
        self.power_remaining = Duration::ZERO;
    }

    /// Registers a pellet pickup at the current time and returns the streak length.
    ///
    /// Pickups closer together than `window` extend the streak; anything slower
    /// starts a new one.
    pub fn record_pickup(&mut self, window: Duration) -> u32 {
        let now = self.elapsed;
        self.pellets_eaten += 1;
        self.streak = match self.last_pickup {
            Some(last) if now.saturating_sub(last) < window => self.streak + 1,
            _ => 1,
        };
        self.last_pickup = Some(now);
        self.streak
    }

    pub fn is_level_complete(&self) -> bool {
        self.pellets_eaten >= self.total_pellets
    }

    /// Sets the multiplier applied by [`Session::award`].
    pub fn set_multiplier(&mut self, multiplier: u32) {
        self.multiplier = multiplier.max(1);
    }

    /// Adds points, scaled by the active multiplier, and returns what was added.
    pub fn award(&mut self, points: u32) -> u32 {
        let awarded = points.saturating_mul(self.multiplier);
        self.score = self.score.saturating_add(awarded);
        awarded
    }

    /// Takes one life, returning how many remain.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        debug!(lives = self.lives, "Life lost");
        self.lives
    }

    pub fn gain_life(&mut self) {
        self.lives += 1;
    }

    /// Moves to the given level with a fresh pellet count.
    pub fn begin_level(&mut self, level: u32, total_pellets: u32) {
        self.level = level;
        self.pellets_eaten = 0;
        self.total_pellets = total_pellets;
        self.streak = 0;
        self.last_pickup = None;
        self.power_remaining = Duration::ZERO;
    }
}
