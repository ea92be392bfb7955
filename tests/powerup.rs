use glam::IVec2;
use pellet_chase::config::GameConfig;
use pellet_chase::constants::MapTile;
use pellet_chase::entity::ghost::GhostMode;
use pellet_chase::events::{GameEvent, ScoreEvent, ScoreReason, TickOutcome};
use pellet_chase::game::Game;
use pellet_chase::map::direction::Direction;
use pellet_chase::map::levels::LayoutLevels;
use pellet_chase::systems::powerup::PowerUpKind;
use speculoos::prelude::*;
use std::time::Duration;

mod common;

/// Drops a pickup on the player's own cell so the next tick collects it.
fn drop_under_player(game: &mut Game, kind: PowerUpKind) {
    let cell = game.player().body.cell();
    game.place_power_up(kind, cell);
}

#[test]
fn test_extra_life() {
    let mut game = common::running(common::ONE_PELLET);
    common::freeze_ghosts(&mut game);
    drop_under_player(&mut game, PowerUpKind::ExtraLife);

    let outcome = game.tick();
    assert_that(&outcome.contains(TickOutcome::POWER_UP)).is_true();
    assert_that(&game.session().lives()).is_equal_to(4);
    assert_that(&game.powerups().pickup()).is_none();

    let events = common::drain(&mut game);
    assert_that(&events).contains(GameEvent::Score(ScoreEvent {
        score_delta: 0,
        lives_delta: 1,
        reason: ScoreReason::PowerUp,
    }));
}

#[test]
fn test_freeze_holds_adversaries() {
    let mut game = common::running(common::ONE_PELLET);
    drop_under_player(&mut game, PowerUpKind::FreezeGhosts);
    game.tick();
    assert_that(&game.session().score()).is_equal_to(750);

    let positions: Vec<_> = game.ghosts().iter().map(|ghost| ghost.body.position()).collect();
    common::tick_n(&mut game, 70);
    let frozen: Vec<_> = game.ghosts().iter().map(|ghost| ghost.body.position()).collect();
    assert_that(&frozen).is_equal_to(positions);
    assert_that(&game.powerups().ghosts_frozen()).is_true();

    common::tick_n(&mut game, 20);
    assert_that(&game.powerups().ghosts_frozen()).is_false();
}

#[test]
fn test_invincibility_starts_power_mode() {
    let mut game = common::running(common::ONE_PELLET);
    common::freeze_ghosts(&mut game);
    drop_under_player(&mut game, PowerUpKind::Invincibility);
    game.tick();

    assert_that(&game.session().is_powered()).is_true();
    assert_that(&game.session().power_remaining()).is_equal_to(Duration::from_secs(3));
    for ghost in game.ghosts() {
        assert_that(&ghost.mode()).is_equal_to(GhostMode::Flee);
    }
}

#[test]
fn test_speed_boost_widens_stride() {
    let mut game = common::running(common::TUNNEL);
    common::freeze_ghosts(&mut game);
    drop_under_player(&mut game, PowerUpKind::SpeedBoost);
    game.tick();
    game.tick();
    assert_that(&game.player().body.stride).is_equal_to(6.0);
}

#[test]
fn test_multiplier_doubles_pellets() {
    let mut game = common::running(common::TUNNEL);
    common::freeze_ghosts(&mut game);
    drop_under_player(&mut game, PowerUpKind::PointsMultiplier);
    game.tick();
    assert_that(&game.session().score()).is_equal_to(300);

    game.set_pending_direction(Direction::Right);
    common::tick_n(&mut game, 3);
    let events = common::drain(&mut game);
    assert_that(&events).contains(GameEvent::Score(ScoreEvent::points(20, ScoreReason::Pellet)));
}

#[test]
fn test_pickups_spawn_on_empty_paths() {
    let config = GameConfig {
        power_ups: true,
        ..GameConfig::seeded(3)
    };
    let mut game = Game::with_levels(config, LayoutLevels::single(common::ONE_PELLET)).unwrap();
    game.start().unwrap();
    common::freeze_ghosts(&mut game);

    let mut spawned = Vec::new();
    for _ in 0..6000 {
        game.tick();
        for event in game.drain_events() {
            if let GameEvent::PowerUpSpawned { cell, .. } = event {
                spawned.push(cell);
            }
        }
    }

    assert_that(&spawned).is_not_empty();
    for cell in spawned {
        assert_that(&game.map().tile(cell)).is_equal_to(MapTile::Path);
        assert_that(&(cell.cmpgt(IVec2::ZERO).all())).is_true();
    }
}
