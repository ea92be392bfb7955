//! Mobile entities and the movement model they share.
//!
//! Every entity has a continuous subpixel position and a discrete cell. The cell is
//! derived from the position and is what AI, pellet pickup and level logic read.
//! Heading changes other than reversals only take effect at a cell centre, and a
//! step never carries an entity past the next centre, so entities stop exactly on
//! the grid whenever they are blocked.

pub mod ghost;
pub mod modulation;
pub mod player;

use glam::{IVec2, Vec2};
use tracing::trace;

use crate::constants::CELL_SIZE;
use crate::map::builder::Map;
use crate::map::direction::Direction;

/// Positions closer than this to a cell centre count as grid-aligned.
const ALIGNMENT_EPSILON: f32 = 1e-3;

/// Supplies the heading an entity wants to take.
///
/// The player's queued input and the adversaries' target selection both plug in here,
/// which keeps the integration step identical for every entity.
pub trait Steer {
    /// Proposes a heading for this tick, or `None` to keep the current one.
    fn steer(&mut self, body: &Body, map: &Map) -> Option<Direction>;

    /// Called when the body accepts a proposed heading.
    fn on_turn(&mut self, _direction: Direction) {}
}

/// Keeps the current heading.
pub struct Straight;

impl Steer for Straight {
    fn steer(&mut self, _body: &Body, _map: &Map) -> Option<Direction> {
        None
    }
}

/// What happened to a body during one call to [`Body::advance`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Movement {
    /// The body covered a non-zero distance.
    pub moved: bool,
    /// The body accepted a new heading.
    pub turned: bool,
    /// The body entered a different cell.
    pub entered_cell: bool,
}

/// Position, heading and collider shared by the player and the adversaries.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    position: Vec2,
    cell: IVec2,
    direction: Direction,
    /// Subpixels covered on a tick where the body moves.
    pub stride: f32,
    /// Collision radius, in subpixels.
    pub radius: f32,
}

impl Body {
    /// Creates a body resting on the centre of `cell`.
    pub fn new(cell: IVec2, direction: Direction, stride: f32, radius: f32) -> Self {
        Self {
            position: Map::cell_center(cell),
            cell,
            direction,
            stride,
            radius,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn cell(&self) -> IVec2 {
        self.cell
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Moves the body onto the centre of `cell` with the given heading.
    pub fn place(&mut self, cell: IVec2, direction: Direction) {
        self.position = Map::cell_center(cell);
        self.cell = cell;
        self.direction = direction;
    }

    /// Signed distance from the current cell's centre along the heading.
    ///
    /// Negative while the centre is still ahead, positive once it has been passed.
    fn offset_along_heading(&self) -> f32 {
        (self.position - Map::cell_center(self.cell)).dot(self.direction.as_vec2())
    }

    /// Returns true if the body sits on its cell's centre.
    pub fn is_grid_aligned(&self) -> bool {
        (self.position - Map::cell_center(self.cell))
            .abs()
            .cmple(Vec2::splat(ALIGNMENT_EPSILON))
            .all()
    }

    /// Returns true if the body may take `direction` right now.
    ///
    /// Reversals are always allowed. Any other heading requires the body to be at a
    /// cell centre with a walkable neighbour that way.
    pub fn can_turn(&self, map: &Map, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            return true;
        }
        self.is_grid_aligned() && map.is_walkable(map.neighbor(self.cell, direction))
    }

    /// The cell whose centre the body is heading toward, and the distance to it.
    fn next_stop(&self, map: &Map) -> (IVec2, f32) {
        let offset = self.offset_along_heading();
        if offset < -ALIGNMENT_EPSILON {
            (self.cell, -offset)
        } else {
            (map.neighbor(self.cell, self.direction), CELL_SIZE - offset)
        }
    }

    /// Steers and then integrates the body for one tick.
    ///
    /// The body holds its position if the cell ahead is a wall. Wraparound is applied
    /// on both axes, and the cell is resynchronised only when it actually changes.
    pub fn advance(&mut self, map: &Map, steer: &mut impl Steer) -> Movement {
        let mut movement = Movement::default();

        if let Some(wanted) = steer.steer(self, map) {
            if wanted == self.direction {
                steer.on_turn(wanted);
            } else if self.can_turn(map, wanted) {
                self.turn(wanted);
                steer.on_turn(wanted);
                movement.turned = true;
            }
        }

        let (stop, distance) = self.next_stop(map);
        if stop != self.cell && !map.is_walkable(stop) {
            return movement;
        }

        let step = self.stride.min(distance);
        if step <= 0.0 {
            return movement;
        }

        if distance - step <= ALIGNMENT_EPSILON {
            self.position = Map::cell_center(stop);
        } else {
            self.position = map.wrap_position(self.position + self.direction.as_vec2() * step);
        }
        movement.moved = true;

        let cell = Map::cell_at(self.position);
        if cell != self.cell {
            trace!(from = ?self.cell, to = ?cell, direction = self.direction.as_ref(), "Entered cell");
            self.cell = cell;
            movement.entered_cell = true;
        }

        debug_assert_eq!(self.cell, Map::cell_at(self.position));
        movement
    }

    fn turn(&mut self, direction: Direction) {
        // Perpendicular turns only happen on a centre; pin the position there exactly.
        if direction.is_horizontal() != self.direction.is_horizontal() {
            self.position = Map::cell_center(self.cell);
        }
        self.direction = direction;
    }

    /// Returns true if the two bodies' colliders overlap.
    ///
    /// Distances are measured the short way around the map, so bodies meeting at the
    /// tunnel seam still touch.
    pub fn overlaps(&self, other: &Body, map: &Map) -> bool {
        let reach = self.radius + other.radius;
        map.wrapped_delta(self.position, other.position).length_squared() < reach * reach
    }
}
