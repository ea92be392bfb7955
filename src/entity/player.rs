//! The player-controlled entity.

use glam::IVec2;
use tracing::trace;

use crate::constants::collider::PLAYER_RADIUS;
use crate::entity::{Body, Movement, Steer};
use crate::map::builder::Map;
use crate::map::direction::Direction;

/// Applies the most recent input as soon as the map allows it.
///
/// The queued direction survives until it is taken, so a turn pressed a few ticks
/// early still happens at the next junction.
struct QueuedInput<'a> {
    pending: &'a mut Option<Direction>,
}

impl Steer for QueuedInput<'_> {
    fn steer(&mut self, _body: &Body, _map: &Map) -> Option<Direction> {
        *self.pending
    }

    fn on_turn(&mut self, direction: Direction) {
        if *self.pending == Some(direction) {
            *self.pending = None;
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
    pending: Option<Direction>,
    spawn: IVec2,
}

impl Player {
    pub fn new(spawn: IVec2, stride: f32) -> Self {
        Self {
            body: Body::new(spawn, Direction::Left, stride, PLAYER_RADIUS),
            pending: None,
            spawn,
        }
    }

    /// Queues a heading change; the latest request replaces any earlier one.
    pub fn set_pending_direction(&mut self, direction: Direction) {
        trace!(direction = direction.as_ref(), "Queued player direction");
        self.pending = Some(direction);
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    pub fn spawn(&self) -> IVec2 {
        self.spawn
    }

    pub fn advance(&mut self, map: &Map) -> Movement {
        let mut input = QueuedInput {
            pending: &mut self.pending,
        };
        self.body.advance(map, &mut input)
    }

    /// Returns the player to its spawn cell and forgets any queued input.
    pub fn respawn(&mut self) {
        self.body.place(self.spawn, Direction::Left);
        self.pending = None;
    }

    /// Moves the spawn point, as happens when a new map is loaded, and respawns there.
    pub fn relocate(&mut self, spawn: IVec2) {
        self.spawn = spawn;
        self.respawn();
    }
}
