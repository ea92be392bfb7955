//! Adversary target selection and move scoring.
//!
//! Every tick each adversary picks a target cell according to its mode and archetype.
//! At a cell centre it then scores each walkable neighbour by straight-line distance
//! to that target, plus a little random jitter, and commits to the lowest score.

use glam::IVec2;
use rand::Rng;
use smallvec::SmallVec;
use tracing::warn;

use crate::constants::ai::{
    AMBUSH_CLOSE_RANGE, AMBUSH_LOOKAHEAD, FLANK_WANDER_CHANCE, FLANK_WANDER_RADIUS, FLANK_WANDER_RANGE, FLEE_SCATTER,
    MOVE_JITTER, OPPORTUNIST_RANGE,
};
use crate::entity::ghost::{Archetype, Ghost, GhostMode};
use crate::entity::{Body, Steer};
use crate::map::builder::Map;
use crate::map::direction::Direction;

/// What the adversaries know about the rest of the board this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pursuit {
    pub player_cell: IVec2,
    pub player_direction: Direction,
    /// The Aggressor's cell, which the Flanker mirrors.
    pub aggressor_cell: IVec2,
}

fn distance(a: IVec2, b: IVec2) -> f32 {
    a.as_vec2().distance(b.as_vec2())
}

/// Chooses the cell an adversary steers toward this tick.
pub fn choose_target(ghost: &Ghost, pursuit: &Pursuit, rng: &mut impl Rng) -> IVec2 {
    match ghost.mode() {
        GhostMode::Pursue => pursue_target(ghost.archetype(), ghost.body.cell(), pursuit, rng),
        GhostMode::Retreat => ghost.home_corner(),
        GhostMode::Flee => flee_target(ghost.body.cell(), pursuit.player_cell, rng),
    }
}

fn pursue_target(archetype: Archetype, own: IVec2, pursuit: &Pursuit, rng: &mut impl Rng) -> IVec2 {
    let player = pursuit.player_cell;
    let gap = distance(own, player);

    match archetype {
        Archetype::Aggressor => player,
        Archetype::Ambusher => {
            if gap < AMBUSH_CLOSE_RANGE {
                player
            } else {
                player + pursuit.player_direction.as_ivec2() * AMBUSH_LOOKAHEAD
            }
        }
        Archetype::Flanker => {
            if gap > FLANK_WANDER_RANGE && rng.random_bool(FLANK_WANDER_CHANCE) {
                own + IVec2::new(
                    rng.random_range(-FLANK_WANDER_RADIUS..=FLANK_WANDER_RADIUS),
                    rng.random_range(-FLANK_WANDER_RADIUS..=FLANK_WANDER_RADIUS),
                )
            } else {
                player + (player - pursuit.aggressor_cell) * 2
            }
        }
        Archetype::Opportunist => {
            if gap < OPPORTUNIST_RANGE {
                own + (own - player)
            } else {
                player
            }
        }
    }
}

/// A point on the far side of the adversary from the player, with some scatter.
fn flee_target(own: IVec2, player: IVec2, rng: &mut impl Rng) -> IVec2 {
    own + (own - player)
        + IVec2::new(
            rng.random_range(-FLEE_SCATTER..=FLEE_SCATTER),
            rng.random_range(-FLEE_SCATTER..=FLEE_SCATTER),
        )
}

/// Scores every walkable move out of `cell`, best (lowest) first.
///
/// Reversal is one of the candidates. Targets may lie outside the map; distances are
/// measured in plain cell space without wraparound.
pub fn rank_moves(
    map: &Map,
    cell: IVec2,
    target: IVec2,
    jitter: f32,
    rng: &mut impl Rng,
) -> SmallVec<[(Direction, f32); 4]> {
    let mut moves: SmallVec<[(Direction, f32); 4]> = Direction::DIRECTIONS
        .into_iter()
        .filter(|&dir| map.is_walkable(map.neighbor(cell, dir)))
        .map(|dir| {
            let noise = if jitter > 0.0 { rng.random_range(0.0..jitter) } else { 0.0 };
            (dir, distance(cell + dir.as_ivec2(), target) + noise)
        })
        .collect();

    moves.sort_by(|a, b| a.1.total_cmp(&b.1));
    moves
}

/// Steers an adversary toward a target cell.
pub struct TargetSteer<'a, R> {
    target: IVec2,
    jitter: f32,
    rng: &'a mut R,
}

impl<'a, R: Rng> TargetSteer<'a, R> {
    pub fn new(target: IVec2, mode: GhostMode, rng: &'a mut R) -> Self {
        let jitter = if mode == GhostMode::Flee { 0.0 } else { MOVE_JITTER };
        Self { target, jitter, rng }
    }
}

impl<R: Rng> Steer for TargetSteer<'_, R> {
    fn steer(&mut self, body: &Body, map: &Map) -> Option<Direction> {
        if !body.is_grid_aligned() {
            return None;
        }

        let best = rank_moves(map, body.cell(), self.target, self.jitter, &mut *self.rng)
            .first()
            .map(|(dir, _)| *dir);
        if best.is_none() {
            warn!(cell = ?body.cell(), "Adversary has no walkable move");
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const OPEN: &[&str] = &[
        "###########",
        "#.........#",
        "#.........#",
        "#....X....#",
        "#.........#",
        "#..1234...#",
        "###########",
    ];

    fn pursuit(player: IVec2) -> Pursuit {
        Pursuit {
            player_cell: player,
            player_direction: Direction::Right,
            aggressor_cell: IVec2::new(1, 1),
        }
    }

    #[test]
    fn test_ambusher_leads_distant_player() {
        let mut rng = SmallRng::seed_from_u64(0);
        let target = pursue_target(Archetype::Ambusher, IVec2::new(0, 0), &pursuit(IVec2::new(10, 10)), &mut rng);
        assert_eq!(target, IVec2::new(14, 10));
    }

    #[test]
    fn test_ambusher_chases_close_player() {
        let mut rng = SmallRng::seed_from_u64(0);
        let target = pursue_target(Archetype::Ambusher, IVec2::new(8, 10), &pursuit(IVec2::new(10, 10)), &mut rng);
        assert_eq!(target, IVec2::new(10, 10));
    }

    #[test]
    fn test_flanker_mirrors_aggressor() {
        let mut rng = SmallRng::seed_from_u64(0);
        let target = pursue_target(Archetype::Flanker, IVec2::new(4, 4), &pursuit(IVec2::new(3, 3)), &mut rng);
        assert_eq!(target, IVec2::new(7, 7));
    }

    #[test]
    fn test_distant_flanker_wanders_near_itself() {
        let mut rng = SmallRng::seed_from_u64(5);
        let own = IVec2::new(0, 0);
        let pursuit = pursuit(IVec2::new(20, 20));
        let mirrored = IVec2::new(58, 58);

        let mut wandered = 0;
        for _ in 0..100 {
            let target = pursue_target(Archetype::Flanker, own, &pursuit, &mut rng);
            if target == mirrored {
                continue;
            }
            wandered += 1;
            let offset = (target - own).abs();
            assert!(offset.max_element() <= FLANK_WANDER_RADIUS, "target {target}");
        }
        assert!(wandered > 0);
        assert!(wandered < 100);
    }

    #[test]
    fn test_opportunist_backs_off() {
        let mut rng = SmallRng::seed_from_u64(0);
        let near = pursue_target(Archetype::Opportunist, IVec2::new(5, 5), &pursuit(IVec2::new(3, 5)), &mut rng);
        assert_eq!(near, IVec2::new(7, 5));
        let far = pursue_target(Archetype::Opportunist, IVec2::new(15, 5), &pursuit(IVec2::new(3, 5)), &mut rng);
        assert_eq!(far, IVec2::new(3, 5));
    }

    #[test]
    fn test_rank_moves_prefers_target() {
        let map = Map::new(OPEN).unwrap();
        let mut rng = SmallRng::seed_from_u64(0);
        let moves = rank_moves(&map, IVec2::new(5, 3), IVec2::new(9, 3), 0.0, &mut rng);
        assert_eq!(moves.len(), 4);
        assert_eq!(moves[0].0, Direction::Right);
        assert_eq!(moves[3].0, Direction::Left);
    }

    #[test]
    fn test_rank_moves_skips_walls() {
        let map = Map::new(OPEN).unwrap();
        let mut rng = SmallRng::seed_from_u64(0);
        let moves = rank_moves(&map, IVec2::new(1, 1), IVec2::new(0, 0), MOVE_JITTER, &mut rng);
        let dirs: Vec<Direction> = moves.iter().map(|(dir, _)| *dir).collect();
        assert_eq!(dirs.len(), 2);
        assert!(dirs.contains(&Direction::Down));
        assert!(dirs.contains(&Direction::Right));
    }

    #[test]
    fn test_flee_target_moves_away() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..20 {
            let target = flee_target(IVec2::new(10, 10), IVec2::new(4, 10), &mut rng);
            assert!(target.x >= 16 - FLEE_SCATTER);
        }
    }
}
