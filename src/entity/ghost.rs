//! Adversary entities and their behaviour-mode state machine.
//!
//! Target selection lives in [`crate::systems::targeting`]; this module only tracks
//! which mode an adversary is in and how fast it moves.

use std::time::Duration;

use glam::IVec2;
use strum_macros::{AsRefStr, Display, EnumIter};
use tracing::debug;

use crate::constants::collider::GHOST_RADIUS;
use crate::constants::mechanics::FLEE_SPEED_FACTOR;
use crate::entity::modulation::SpeedModulator;
use crate::entity::Body;
use crate::map::direction::Direction;
use crate::systems::particles::Color;

/// The four adversary personalities.
///
/// Each one picks its pursuit target differently; the order here matches the spawn
/// markers `1` through `4` in a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, Display)]
pub enum Archetype {
    /// Chases the player's cell directly.
    Aggressor,
    /// Aims a few cells ahead of the player.
    Ambusher,
    /// Mirrors the Aggressor across the player.
    Flanker,
    /// Chases from afar and backs off up close.
    Opportunist,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [
        Archetype::Aggressor,
        Archetype::Ambusher,
        Archetype::Flanker,
        Archetype::Opportunist,
    ];

    pub const fn index(self) -> usize {
        match self {
            Archetype::Aggressor => 0,
            Archetype::Ambusher => 1,
            Archetype::Flanker => 2,
            Archetype::Opportunist => 3,
        }
    }

    /// The layout character marking this archetype's spawn cell.
    pub const fn marker(self) -> char {
        match self {
            Archetype::Aggressor => '1',
            Archetype::Ambusher => '2',
            Archetype::Flanker => '3',
            Archetype::Opportunist => '4',
        }
    }

    /// Returns the base movement speed for this archetype on the first level.
    pub fn base_speed(self) -> f32 {
        match self {
            Archetype::Aggressor => 0.85,
            Archetype::Ambusher => 0.8,
            Archetype::Flanker => 0.75,
            Archetype::Opportunist => 0.7,
        }
    }

    pub fn color(self) -> Color {
        match self {
            Archetype::Aggressor => Color::RED,
            Archetype::Ambusher => Color::PINK,
            Archetype::Flanker => Color::CYAN,
            Archetype::Opportunist => Color::ORANGE,
        }
    }

    /// The corner this archetype heads for while retreating.
    pub fn home_corner(self, width: usize, height: usize) -> IVec2 {
        let right = width as i32 - 1;
        let bottom = height as i32 - 1;
        match self {
            Archetype::Aggressor => IVec2::new(right, 0),
            Archetype::Ambusher => IVec2::new(0, 0),
            Archetype::Flanker => IVec2::new(right, bottom),
            Archetype::Opportunist => IVec2::new(0, bottom),
        }
    }
}

/// The behaviour an adversary is currently following.
///
/// Exactly one mode is active at a time. `Flee` is held for precisely as long as
/// power-mode lasts; the other two alternate on a fixed period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display)]
pub enum GhostMode {
    Pursue,
    Retreat,
    Flee,
}

#[derive(Debug, Clone)]
pub struct Ghost {
    pub body: Body,
    archetype: Archetype,
    mode: GhostMode,
    /// Time spent in the current Pursue or Retreat phase.
    mode_timer: Duration,
    base_speed: f32,
    spawn: IVec2,
    home_corner: IVec2,
    /// The cell this adversary steered toward on its last tick.
    target: IVec2,
    modulator: SpeedModulator,
}

impl Ghost {
    pub fn new(archetype: Archetype, spawn: IVec2, home_corner: IVec2, stride: f32, seed: u64) -> Self {
        Self {
            body: Body::new(spawn, Direction::Left, stride, GHOST_RADIUS),
            archetype,
            mode: GhostMode::Pursue,
            mode_timer: Duration::ZERO,
            base_speed: archetype.base_speed(),
            spawn,
            home_corner,
            target: spawn,
            modulator: SpeedModulator::new(seed),
        }
    }

    pub fn archetype(&self) -> Archetype {
        self.archetype
    }

    pub fn mode(&self) -> GhostMode {
        self.mode
    }

    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    pub fn set_base_speed(&mut self, speed: f32) {
        self.base_speed = speed;
    }

    pub fn spawn(&self) -> IVec2 {
        self.spawn
    }

    pub fn home_corner(&self) -> IVec2 {
        self.home_corner
    }

    pub fn target(&self) -> IVec2 {
        self.target
    }

    pub fn set_target(&mut self, target: IVec2) {
        self.target = target;
    }

    /// The chance of moving on a given tick.
    pub fn effective_speed(&self) -> f32 {
        match self.mode {
            GhostMode::Flee => self.base_speed * FLEE_SPEED_FACTOR,
            _ => self.base_speed,
        }
    }

    /// Rolls whether the adversary moves this tick. Frozen adversaries never move.
    pub fn should_move(&mut self, frozen: bool) -> bool {
        let speed = if frozen { 0.0 } else { self.effective_speed() };
        self.modulator.next(speed)
    }

    /// Advances the mode state machine by one tick of `dt` simulated time.
    ///
    /// Returns the new mode when it changed.
    pub fn update_mode(&mut self, power_active: bool, dt: Duration, period: Duration) -> Option<GhostMode> {
        if power_active {
            return (self.mode != GhostMode::Flee).then(|| self.set_mode(GhostMode::Flee));
        }

        if self.mode == GhostMode::Flee {
            return Some(self.set_mode(GhostMode::Pursue));
        }

        self.mode_timer += dt;
        if self.mode_timer < period {
            return None;
        }

        let next = match self.mode {
            GhostMode::Pursue => GhostMode::Retreat,
            _ => GhostMode::Pursue,
        };
        Some(self.set_mode(next))
    }

    /// Switches to Flee immediately, as happens the moment power-mode begins.
    pub fn frighten(&mut self) {
        if self.mode != GhostMode::Flee {
            self.set_mode(GhostMode::Flee);
        }
    }

    fn set_mode(&mut self, mode: GhostMode) -> GhostMode {
        debug!(ghost = self.archetype.as_ref(), from = self.mode.as_ref(), to = mode.as_ref(), "Mode change");
        self.mode = mode;
        self.mode_timer = Duration::ZERO;
        mode
    }

    /// Sends the adversary back to its spawn cell.
    ///
    /// While power-mode lasts it keeps fleeing; otherwise it starts a fresh Pursue phase.
    pub fn respawn(&mut self, power_active: bool) {
        self.body.place(self.spawn, Direction::Left);
        self.mode = if power_active { GhostMode::Flee } else { GhostMode::Pursue };
        self.mode_timer = Duration::ZERO;
        self.target = self.spawn;
    }

    /// Moves the spawn and home corner onto a newly loaded map and respawns there.
    pub fn relocate(&mut self, spawn: IVec2, home_corner: IVec2) {
        self.spawn = spawn;
        self.home_corner = home_corner;
        self.respawn(false);
    }
}
