//! Bonus pickups that occasionally appear on empty path cells.
//!
//! At most one pickup is on the board at a time. Collected pickups either act
//! instantly or stay active for a fixed span of simulated time; every timed effect
//! is read back through the query methods, so expiry needs no cleanup.

use std::time::Duration;

use glam::IVec2;
use rand::Rng;
use smallvec::SmallVec;
use strum_macros::{AsRefStr, Display, EnumIter};
use tracing::debug;

use crate::constants::powerup::{LIFETIME, SPAWN_ATTEMPTS, SPAWN_CHANCE, SPEED_BOOST_FACTOR};
use crate::constants::MapTile;
use crate::map::builder::Map;
use crate::systems::particles::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, Display)]
pub enum PowerUpKind {
    /// Multiplies the player's stride.
    SpeedBoost,
    /// Grants a short burst of power-mode.
    Invincibility,
    /// Stops every adversary in place.
    FreezeGhosts,
    ExtraLife,
    /// Doubles every score award.
    PointsMultiplier,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::Invincibility,
        PowerUpKind::FreezeGhosts,
        PowerUpKind::ExtraLife,
        PowerUpKind::PointsMultiplier,
    ];

    /// How long the effect lasts; zero for instant effects.
    pub fn duration(self) -> Duration {
        match self {
            PowerUpKind::SpeedBoost => Duration::from_secs(5),
            PowerUpKind::Invincibility => Duration::from_secs(3),
            PowerUpKind::FreezeGhosts => Duration::from_secs(4),
            PowerUpKind::ExtraLife => Duration::ZERO,
            PowerUpKind::PointsMultiplier => Duration::from_secs(10),
        }
    }

    /// Points awarded on collection.
    pub fn points(self) -> u32 {
        match self {
            PowerUpKind::SpeedBoost => 500,
            PowerUpKind::Invincibility => 1000,
            PowerUpKind::FreezeGhosts => 750,
            PowerUpKind::ExtraLife => 0,
            PowerUpKind::PointsMultiplier => 300,
        }
    }

    pub fn color(self) -> Color {
        match self {
            PowerUpKind::SpeedBoost => Color::GREEN,
            PowerUpKind::Invincibility => Color::MAGENTA,
            PowerUpKind::FreezeGhosts => Color::CYAN,
            PowerUpKind::ExtraLife => Color::RED,
            PowerUpKind::PointsMultiplier => Color::YELLOW,
        }
    }
}

/// A pickup waiting on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUpPickup {
    pub kind: PowerUpKind,
    pub cell: IVec2,
    pub spawned_at: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveEffect {
    kind: PowerUpKind,
    expires_at: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct PowerUps {
    enabled: bool,
    pickup: Option<PowerUpPickup>,
    active: SmallVec<[ActiveEffect; 4]>,
}

impl PowerUps {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Default::default()
        }
    }

    pub fn pickup(&self) -> Option<&PowerUpPickup> {
        self.pickup.as_ref()
    }

    /// Expires timed effects and stale pickups, then rolls for a new pickup.
    ///
    /// Returns the pickup if one appeared on this tick.
    pub fn update(&mut self, now: Duration, map: &Map, rng: &mut impl Rng) -> Option<PowerUpPickup> {
        self.active.retain(|effect| {
            let alive = now < effect.expires_at;
            if !alive {
                debug!(kind = effect.kind.as_ref(), "Power-up expired");
            }
            alive
        });

        if let Some(pickup) = self.pickup {
            if now.saturating_sub(pickup.spawned_at) > LIFETIME {
                debug!(kind = pickup.kind.as_ref(), cell = ?pickup.cell, "Power-up vanished");
                self.pickup = None;
            }
            return None;
        }

        if !self.enabled || !rng.random_bool(SPAWN_CHANCE) {
            return None;
        }

        let width = map.width() as i32;
        let height = map.height() as i32;
        if width < 3 || height < 3 {
            return None;
        }

        for _ in 0..SPAWN_ATTEMPTS {
            let cell = IVec2::new(rng.random_range(1..width - 1), rng.random_range(1..height - 1));
            if map.tile(cell) != MapTile::Path {
                continue;
            }

            let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
            let pickup = PowerUpPickup {
                kind,
                cell,
                spawned_at: now,
            };
            debug!(kind = kind.as_ref(), cell = ?cell, "Power-up spawned");
            self.pickup = Some(pickup);
            return Some(pickup);
        }

        None
    }

    /// Collects the pickup if it sits on `cell`, starting its timed effect.
    pub fn collect(&mut self, cell: IVec2, now: Duration) -> Option<PowerUpKind> {
        let pickup = self.pickup.filter(|pickup| pickup.cell == cell)?;
        self.pickup = None;

        let kind = pickup.kind;
        let duration = kind.duration();
        if !duration.is_zero() {
            let expires_at = now + duration;
            match self.active.iter_mut().find(|effect| effect.kind == kind) {
                Some(effect) => effect.expires_at = effect.expires_at.max(expires_at),
                None => self.active.push(ActiveEffect { kind, expires_at }),
            }
        }

        debug!(kind = kind.as_ref(), cell = ?cell, "Power-up collected");
        Some(kind)
    }

    /// Places a pickup directly, replacing any current one.
    pub fn place(&mut self, kind: PowerUpKind, cell: IVec2, now: Duration) {
        self.pickup = Some(PowerUpPickup {
            kind,
            cell,
            spawned_at: now,
        });
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.active.iter().any(|effect| effect.kind == kind)
    }

    pub fn speed_factor(&self) -> f32 {
        if self.is_active(PowerUpKind::SpeedBoost) {
            SPEED_BOOST_FACTOR
        } else {
            1.0
        }
    }

    pub fn ghosts_frozen(&self) -> bool {
        self.is_active(PowerUpKind::FreezeGhosts)
    }

    pub fn score_multiplier(&self) -> u32 {
        if self.is_active(PowerUpKind::PointsMultiplier) {
            2
        } else {
            1
        }
    }

    /// Removes the pickup and every active effect.
    pub fn clear(&mut self) {
        self.pickup = None;
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_only_on_matching_cell() {
        let mut powerups = PowerUps::new(true);
        powerups.place(PowerUpKind::SpeedBoost, IVec2::new(3, 3), Duration::ZERO);
        assert_eq!(powerups.collect(IVec2::new(2, 3), Duration::ZERO), None);
        assert_eq!(powerups.collect(IVec2::new(3, 3), Duration::ZERO), Some(PowerUpKind::SpeedBoost));
        assert!(powerups.pickup().is_none());
        assert_eq!(powerups.speed_factor(), SPEED_BOOST_FACTOR);
    }

    #[test]
    fn test_instant_effects_leave_nothing_active() {
        let mut powerups = PowerUps::new(true);
        powerups.place(PowerUpKind::ExtraLife, IVec2::ONE, Duration::ZERO);
        powerups.collect(IVec2::ONE, Duration::ZERO);
        assert!(!powerups.is_active(PowerUpKind::ExtraLife));
    }

    #[test]
    fn test_multiplier_lasts_its_duration() {
        let mut powerups = PowerUps::new(true);
        powerups.place(PowerUpKind::PointsMultiplier, IVec2::ONE, Duration::ZERO);
        powerups.collect(IVec2::ONE, Duration::ZERO);
        assert_eq!(powerups.score_multiplier(), 2);
    }
}
