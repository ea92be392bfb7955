#![allow(dead_code)]

use pellet_chase::config::GameConfig;
use pellet_chase::entity::ghost::Archetype;
use pellet_chase::events::{GameEvent, TickOutcome};
use pellet_chase::game::Game;
use pellet_chase::map::levels::LayoutLevels;

/// Twenty cells wide, with an open tunnel on row 3 and the player spawning in column 0.
pub const TUNNEL: &[&str] = &[
    "####################",
    "#1................2#",
    "#.################.#",
    "X.................. ",
    "#.################.#",
    "#3................4#",
    "####################",
];

/// A power pellet just left of the player spawn, with the adversaries behind a wall.
pub const POWER: &[&str] = &[
    "###########",
    "#.........#",
    "#.#######.#",
    "#...oX....#",
    "#.#######.#",
    "#..1234...#",
    "###########",
];

/// A single pellet, one cell right of the spawn.
pub const ONE_PELLET: &[&str] = &[
    "#########",
    "#X.    1#",
    "#  234  #",
    "#########",
];

/// A seeded configuration without random pickups, so tests see only what they set up.
pub fn config() -> GameConfig {
    GameConfig {
        power_ups: false,
        ..GameConfig::seeded(7)
    }
}

pub fn game_on(layout: &[&str]) -> Game {
    Game::with_levels(config(), LayoutLevels::single(layout)).unwrap()
}

pub fn running(layout: &[&str]) -> Game {
    let mut game = game_on(layout);
    game.start().unwrap();
    game.drain_events().for_each(drop);
    game
}

/// Stops every adversary in place until the next level starts.
pub fn freeze_ghosts(game: &mut Game) {
    for archetype in Archetype::ALL {
        game.set_ghost_speed(archetype, 0.0);
    }
}

/// Ticks `n` times and merges the outcomes.
pub fn tick_n(game: &mut Game, n: usize) -> TickOutcome {
    (0..n).fold(TickOutcome::empty(), |acc, _| acc | game.tick())
}

pub fn drain(game: &mut Game) -> Vec<GameEvent> {
    game.drain_events().collect()
}
