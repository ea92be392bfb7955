//! This module contains all the constants used in the simulation.

use std::time::Duration;

/// The size of each cell, in subpixels.
pub const CELL_SIZE: f32 = 16.0;

/// The interval between ticks at the start of a session.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);
/// The shortest interval difficulty escalation is allowed to reach.
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(20);
/// How much the tick interval shrinks each time a level is cleared.
pub const TICK_INTERVAL_STEP: Duration = Duration::from_millis(2);

/// An enum representing the different types of tiles on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapTile {
    /// An impassable wall.
    Wall,
    /// A walkable, empty tile.
    Path,
    /// A regular pellet.
    Pellet,
    /// A power pellet.
    PowerPellet,
}

impl MapTile {
    /// Returns true if entities may stand on this tile.
    pub const fn is_walkable(self) -> bool {
        !matches!(self, MapTile::Wall)
    }

    /// Returns true if the player can consume this tile.
    pub const fn is_edible(self) -> bool {
        matches!(self, MapTile::Pellet | MapTile::PowerPellet)
    }
}

/// Movement tuning.
pub mod mechanics {
    /// Subpixels the player covers per tick at normal speed.
    pub const PLAYER_STRIDE: f32 = 4.0;
    /// Subpixels an adversary covers on a tick where it moves.
    pub const GHOST_STRIDE: f32 = 4.0;
    /// Lives granted at the start of a session.
    pub const STARTING_LIVES: u32 = 3;
    /// Per-level increase of adversary base speed.
    pub const GHOST_SPEED_STEP: f32 = 0.05;
    /// Upper bound of adversary base speed.
    pub const MAX_GHOST_SPEED: f32 = 1.0;
    /// Speed multiplier applied to adversaries while fleeing.
    pub const FLEE_SPEED_FACTOR: f32 = 0.5;
}

/// Point values and timing windows of the scoring rules.
pub mod scoring {
    use std::time::Duration;

    pub const PELLET: u32 = 10;
    pub const POWER_PELLET: u32 = 50;
    pub const GHOST_CONSUMED: u32 = 200;
    /// Multiplied by the streak length once the combo threshold is reached.
    pub const COMBO_UNIT: u32 = 10;
    /// Multiplied by the level number when a level is cleared.
    pub const LEVEL_CLEAR_UNIT: u32 = 1000;

    pub const COMBO_WINDOW: Duration = Duration::from_millis(2000);
    pub const COMBO_THRESHOLD: u32 = 3;
    pub const POWER_DURATION: Duration = Duration::from_secs(10);
}

/// Adversary behavior tuning.
pub mod ai {
    use std::time::Duration;

    /// Pursue and Retreat swap after this much time without power-mode.
    pub const MODE_PERIOD: Duration = Duration::from_secs(5);
    /// Cells ahead of the player the Ambusher aims for.
    pub const AMBUSH_LOOKAHEAD: i32 = 4;
    /// Below this distance (in cells) the Ambusher chases directly.
    pub const AMBUSH_CLOSE_RANGE: f32 = 6.0;
    /// Above this distance (in cells) the Flanker may wander.
    pub const FLANK_WANDER_RANGE: f32 = 10.0;
    /// Per-tick chance that a distant Flanker picks a random nearby target.
    pub const FLANK_WANDER_CHANCE: f64 = 0.2;
    /// Largest offset (in cells) of a wandering Flanker's target.
    pub const FLANK_WANDER_RADIUS: i32 = 3;
    /// Below this distance (in cells) the Opportunist backs away.
    pub const OPPORTUNIST_RANGE: f32 = 5.0;
    /// Upper bound of the random jitter added to candidate move scores.
    pub const MOVE_JITTER: f32 = 0.5;
    /// Largest random offset (in cells) added to a fleeing adversary's target.
    pub const FLEE_SCATTER: i32 = 2;
}

/// Collision radii, in subpixels.
pub mod collider {
    pub const PLAYER_RADIUS: f32 = 6.0;
    pub const GHOST_RADIUS: f32 = 6.0;
}

/// Particle system tuning.
pub mod effects {
    /// Default capacity of the particle pool.
    pub const POOL_CAPACITY: usize = 200;
    /// Life lost by every particle each tick, before its own decay rate.
    pub const BASE_DECAY: f32 = 0.01;
    /// How much larger a smoke particle is at the end of its life.
    pub const SMOKE_GROWTH: f32 = 1.5;
}

/// Power-up tuning.
pub mod powerup {
    use std::time::Duration;

    /// Per-tick chance of a power-up appearing while none is on the board.
    pub const SPAWN_CHANCE: f64 = 0.002;
    /// Attempts at finding an empty cell before giving up for this tick.
    pub const SPAWN_ATTEMPTS: u32 = 50;
    /// How long an uncollected power-up stays on the board.
    pub const LIFETIME: Duration = Duration::from_secs(15);
    /// Stride multiplier while a speed boost is active.
    pub const SPEED_BOOST_FACTOR: f32 = 1.5;
}

/// The built-in level layouts.
///
/// `#` wall, `.` pellet, `o` power pellet, ` ` path, `X` player spawn, `1`-`4` adversary spawns.
pub mod levels {
    pub const LEVEL_ONE: &[&str] = &[
        "#####################",
        "#o........#........o#",
        "#.###.###.#.###.###.#",
        "#...................#",
        "#.###.#.#####.#.###.#",
        "#.....#...#...#.....#",
        "#####.### # ###.#####",
        "#####.#       #.#####",
        "#####.# ## ## #.#####",
        "     .  #1234#  .    ",
        "#####.# ##### #.#####",
        "#####.#       #.#####",
        "#####.# ##### #.#####",
        "#.........#.........#",
        "#.###.###.#.###.###.#",
        "#o..#.....X.....#..o#",
        "###.#.#.#####.#.#.###",
        "#.....#...#...#.....#",
        "#.#######.#.#######.#",
        "#...................#",
        "#####################",
    ];

    pub const LEVEL_TWO: &[&str] = &[
        "###################",
        "#o.......#.......o#",
        "#.##.###.#.###.##.#",
        "#.................#",
        "#.##.#.#####.#.##.#",
        "#....#...#...#....#",
        "####.### # ###.####",
        "    .#  1 2  #.    ",
        "####.# ##### #.####",
        "####.#  3 4  #.####",
        "####.# ##### #.####",
        "#........X........#",
        "#.##.###.#.###.##.#",
        "#o.#.....#.....#.o#",
        "##.#.#.#####.#.#.##",
        "#....#...#...#....#",
        "#.######.#.######.#",
        "#.................#",
        "###################",
    ];

    pub const LEVEL_THREE: &[&str] = &[
        "####################",
        "#o.......##.......o#",
        "#.##.###.##.###.##.#",
        "#..................#",
        "###.#.########.#.###",
        "   .#....12....#.   ",
        "###.####.##.####.###",
        "#........34........#",
        "#.##.###.##.###.##.#",
        "#o.#......X.....#.o#",
        "##.#.#.######.#.#.##",
        "#....#...##...#....#",
        "#.######.##.######.#",
        "#..................#",
        "####################",
    ];

    pub const ALL: &[&[&str]] = &[LEVEL_ONE, LEVEL_TWO, LEVEL_THREE];
}
