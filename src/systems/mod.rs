//! The per-tick systems the orchestrator runs, in order.

pub mod collision;
pub mod particles;
pub mod powerup;
pub mod state;
pub mod targeting;

use glam::Vec2;

use crate::events::GameEvent;
use crate::systems::particles::{Color, EffectKind, ParticlePool};

/// Where systems send their side effects: host-facing events and visual effects.
pub struct Feedback<'a> {
    pub events: &'a mut Vec<GameEvent>,
    pub particles: &'a mut ParticlePool,
}

impl Feedback<'_> {
    pub fn emit(&mut self, event: impl Into<GameEvent>) {
        self.events.push(event.into());
    }

    pub fn effect(&mut self, position: Vec2, kind: EffectKind, color: Color, count: usize) -> usize {
        self.particles.request_effect(position, kind, color, count)
    }
}
