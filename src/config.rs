//! Tunables for a simulation session.

use std::time::Duration;

use crate::constants::{self, ai, effects, mechanics, scoring};
use crate::error::{GameError, GameResult};

/// Session configuration. The defaults reproduce the standard rules.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Seed for every random draw; `None` seeds from the operating system.
    pub seed: Option<u64>,
    /// The 1-based level play starts on.
    pub start_level: u32,
    pub lives: u32,
    pub tick_interval: Duration,
    pub min_tick_interval: Duration,
    pub tick_interval_step: Duration,
    pub player_stride: f32,
    pub ghost_stride: f32,
    pub ghost_speed_step: f32,
    pub max_ghost_speed: f32,
    pub power_duration: Duration,
    pub mode_period: Duration,
    pub combo_window: Duration,
    pub combo_threshold: u32,
    pub particle_capacity: usize,
    /// Whether bonus pickups appear on the board.
    pub power_ups: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            start_level: 1,
            lives: mechanics::STARTING_LIVES,
            tick_interval: constants::TICK_INTERVAL,
            min_tick_interval: constants::MIN_TICK_INTERVAL,
            tick_interval_step: constants::TICK_INTERVAL_STEP,
            player_stride: mechanics::PLAYER_STRIDE,
            ghost_stride: mechanics::GHOST_STRIDE,
            ghost_speed_step: mechanics::GHOST_SPEED_STEP,
            max_ghost_speed: mechanics::MAX_GHOST_SPEED,
            power_duration: scoring::POWER_DURATION,
            mode_period: ai::MODE_PERIOD,
            combo_window: scoring::COMBO_WINDOW,
            combo_threshold: scoring::COMBO_THRESHOLD,
            particle_capacity: effects::POOL_CAPACITY,
            power_ups: true,
        }
    }
}

impl GameConfig {
    /// The default rules with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Checks that the configuration describes a playable session.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> GameResult<()> {
        let fail = |reason: &str| Err(GameError::InvalidConfig(reason.to_string()));

        if self.start_level == 0 {
            return fail("start_level is 1-based");
        }
        if self.lives == 0 {
            return fail("lives must be at least 1");
        }
        if self.min_tick_interval.is_zero() || self.tick_interval < self.min_tick_interval {
            return fail("tick_interval must be at least min_tick_interval, which must be non-zero");
        }
        if !(self.player_stride > 0.0 && self.player_stride <= constants::CELL_SIZE) {
            return fail("player_stride must be within (0, CELL_SIZE]");
        }
        if !(self.ghost_stride > 0.0 && self.ghost_stride <= constants::CELL_SIZE) {
            return fail("ghost_stride must be within (0, CELL_SIZE]");
        }
        if !(0.0..=1.0).contains(&self.max_ghost_speed) {
            return fail("max_ghost_speed must be within [0, 1]");
        }
        if self.mode_period.is_zero() {
            return fail("mode_period must be non-zero");
        }
        Ok(())
    }
}
