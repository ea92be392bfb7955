use pellet_chase::entity::ghost::{Archetype, GhostMode};
use pellet_chase::events::TickOutcome;
use pellet_chase::game::Game;
use speculoos::prelude::*;

mod common;

/// Freezes every adversary except `active`.
fn only(game: &mut Game, active: Archetype) {
    for archetype in Archetype::ALL.into_iter().filter(|&archetype| archetype != active) {
        game.set_ghost_speed(archetype, 0.0);
    }
}

#[test]
fn test_aggressor_catches_stationary_player() {
    let mut game = common::running(common::ONE_PELLET);
    only(&mut game, Archetype::Aggressor);

    let mut caught = false;
    for _ in 0..99 {
        if game.tick().contains(TickOutcome::LIFE_LOST) {
            caught = true;
            break;
        }
    }
    assert_that(&caught).is_true();
    assert_that(&game.session().lives()).is_equal_to(2);
}

#[test]
fn test_adversaries_retreat_after_mode_period() {
    let mut game = common::running(common::ONE_PELLET);
    common::freeze_ghosts(&mut game);

    common::tick_n(&mut game, 99);
    for ghost in game.ghosts() {
        assert_that(&ghost.mode()).is_equal_to(GhostMode::Pursue);
    }

    game.tick();
    for ghost in game.ghosts() {
        assert_that(&ghost.mode()).is_equal_to(GhostMode::Retreat);
        assert_that(&ghost.target()).is_equal_to(ghost.home_corner());
    }

    common::tick_n(&mut game, 100);
    for ghost in game.ghosts() {
        assert_that(&ghost.mode()).is_equal_to(GhostMode::Pursue);
    }
}

#[test]
fn test_aggressor_targets_player_cell() {
    let mut game = common::running(common::ONE_PELLET);
    common::freeze_ghosts(&mut game);
    game.tick();

    let aggressor = game.ghost(Archetype::Aggressor);
    assert_that(&aggressor.target()).is_equal_to(game.player().body.cell());
}

#[test]
fn test_fleeing_adversaries_move_at_half_speed() {
    let mut game = common::running(common::POWER);
    common::tick_n(&mut game, 3);
    assert_that(&game.session().is_powered()).is_true();

    for ghost in game.ghosts() {
        assert_that(&ghost.mode()).is_equal_to(GhostMode::Flee);
        assert_that(&ghost.effective_speed()).is_equal_to(ghost.base_speed() * 0.5);
    }
}

#[test]
fn test_home_corners_match_map_size() {
    let game = common::game_on(common::TUNNEL);
    let corners: Vec<_> = game.ghosts().iter().map(|ghost| ghost.home_corner()).collect();
    assert_that(&corners).is_equal_to(vec![
        glam::IVec2::new(19, 0),
        glam::IVec2::new(0, 0),
        glam::IVec2::new(19, 6),
        glam::IVec2::new(0, 6),
    ]);
}
