use glam::IVec2;
use pellet_chase::map::builder::Map;
use pellet_chase::map::direction::Direction;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use speculoos::prelude::*;

mod common;

#[test]
fn test_tunnel_wraps_to_far_column() {
    let mut game = common::running(common::TUNNEL);
    common::freeze_ghosts(&mut game);

    assert_that(&game.player().body.cell()).is_equal_to(IVec2::new(0, 3));
    assert_that(&game.player().body.direction()).is_equal_to(Direction::Left);

    let mut cells = vec![game.player().body.cell()];
    for _ in 0..5 {
        game.tick();
        let cell = game.player().body.cell();
        if cells.last() != Some(&cell) {
            cells.push(cell);
        }
    }

    assert_that(&cells).is_equal_to(vec![IVec2::new(0, 3), IVec2::new(19, 3)]);
    let x = game.player().body.position().x;
    assert_that(&(x > 19.0 * 16.0 && x < 20.0 * 16.0)).is_true();
}

#[test]
fn test_tunnel_wraps_both_ways() {
    let mut game = common::running(common::TUNNEL);
    common::freeze_ghosts(&mut game);

    // Through the left edge and back out again.
    common::tick_n(&mut game, 4);
    assert_that(&game.player().body.cell()).is_equal_to(IVec2::new(19, 3));
    game.set_pending_direction(Direction::Right);
    common::tick_n(&mut game, 8);
    assert_that(&game.player().body.cell()).is_equal_to(IVec2::new(1, 3));
}

#[test]
fn test_player_holds_against_wall() {
    let mut game = common::running(common::ONE_PELLET);
    common::freeze_ghosts(&mut game);

    let before = game.player().body.position();
    common::tick_n(&mut game, 5);
    assert_that(&game.player().body.position()).is_equal_to(before);
}

#[test]
fn test_queued_turn_survives_until_junction() {
    let mut game = common::running(common::TUNNEL);
    common::freeze_ghosts(&mut game);

    game.set_pending_direction(Direction::Right);
    game.tick();
    game.set_pending_direction(Direction::Up);

    // Column 1 is the first opening upward; its centre is three strides away.
    common::tick_n(&mut game, 3);
    assert_that(&game.player().pending_direction()).is_equal_to(Some(Direction::Up));
    game.tick();
    assert_that(&game.player().pending_direction()).is_none();
    assert_that(&game.player().body.direction()).is_equal_to(Direction::Up);
}

#[test]
fn test_cells_track_positions_under_random_input() {
    let mut rng = SmallRng::seed_from_u64(99);
    let mut game = common::running(common::TUNNEL);
    let map_size = game.map().pixel_size();

    for tick in 0..3000 {
        if tick % 7 == 0 {
            let direction = Direction::DIRECTIONS[rng.random_range(0..4)];
            game.set_pending_direction(direction);
        }
        game.tick();

        let bodies = std::iter::once(&game.player().body).chain(game.ghosts().iter().map(|ghost| &ghost.body));
        for body in bodies {
            let position = body.position();
            assert_that(&Map::cell_at(position)).is_equal_to(body.cell());
            assert_that(&(position.x >= 0.0 && position.x < map_size.x)).is_true();
            assert_that(&(position.y >= 0.0 && position.y < map_size.y)).is_true();
            assert_that(&game.map().is_walkable(body.cell())).is_true();
        }
    }
}
