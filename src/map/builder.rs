//! Map construction and tile bookkeeping.

use glam::{IVec2, Vec2};
use pathfinding::prelude::bfs_reach;
use smallvec::SmallVec;
use tracing::debug;

use crate::constants::{MapTile, CELL_SIZE};
use crate::entity::ghost::Archetype;
use crate::error::{GameResult, MapError};
use crate::map::direction::Direction;
use crate::map::parser::{MapTileParser, ParsedMap};

/// The tile grid the simulation runs on.
///
/// Both axes wrap around, so the map behaves like a cylinder: stepping off the left
/// edge lands on the right edge of the same row. Walls along the top and bottom rows
/// keep vertical wraparound from ever being taken in the built-in layouts.
#[derive(Debug, Clone)]
pub struct Map {
    width: usize,
    height: usize,
    /// Row-major tile data; only pellet cells are ever mutated.
    tiles: Vec<MapTile>,
    player_spawn: IVec2,
    ghost_spawns: [IVec2; 4],
    total_pellets: u32,
    remaining_pellets: u32,
}

impl Map {
    /// Creates a new `Map` from a raw board layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout cannot be parsed, has no pellets, or its walkable
    /// cells do not form a single connected region.
    pub fn new(raw_board: &[&str]) -> GameResult<Map> {
        let parsed = MapTileParser::parse_board(raw_board)?;
        Ok(Self::from_parsed(parsed)?)
    }

    /// Builds and validates a map from already-parsed layout data.
    pub fn from_parsed(parsed: ParsedMap) -> Result<Map, MapError> {
        let total_pellets = parsed.tiles.iter().filter(|tile| tile.is_edible()).count() as u32;
        if total_pellets == 0 {
            return Err(MapError::NoPellets);
        }

        let map = Map {
            width: parsed.width,
            height: parsed.height,
            tiles: parsed.tiles,
            player_spawn: parsed.player_spawn,
            ghost_spawns: parsed.ghost_spawns,
            total_pellets,
            remaining_pellets: total_pellets,
        };

        let walkable = map.tiles.iter().filter(|tile| tile.is_walkable()).count();
        let reachable = bfs_reach(map.player_spawn, |cell: &IVec2| map.walkable_neighbors(*cell)).count();

        if reachable != walkable {
            return Err(MapError::Disconnected { reachable, walkable });
        }

        debug!(
            width = map.width,
            height = map.height,
            pellets = total_pellets,
            walkable,
            "Map built"
        );
        Ok(map)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The size of the map, in subpixels.
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * CELL_SIZE
    }

    /// Wraps a cell coordinate onto the map.
    pub fn wrap(&self, cell: IVec2) -> IVec2 {
        IVec2::new(
            cell.x.rem_euclid(self.width as i32),
            cell.y.rem_euclid(self.height as i32),
        )
    }

    /// Wraps a subpixel position onto the map.
    pub fn wrap_position(&self, position: Vec2) -> Vec2 {
        let size = self.pixel_size();
        Vec2::new(position.x.rem_euclid(size.x), position.y.rem_euclid(size.y))
    }

    /// The shortest vector from `from` to `to`, taking wraparound into account.
    pub fn wrapped_delta(&self, from: Vec2, to: Vec2) -> Vec2 {
        let size = self.pixel_size();
        let delta = to - from;
        delta - size * (delta / size).round()
    }

    /// Returns the cell one step away in the given direction, with wraparound applied.
    pub fn neighbor(&self, cell: IVec2, direction: Direction) -> IVec2 {
        self.wrap(cell + direction.as_ivec2())
    }

    /// Returns the walkable cells one step away from the given cell.
    pub fn walkable_neighbors(&self, cell: IVec2) -> SmallVec<[IVec2; 4]> {
        Direction::DIRECTIONS
            .into_iter()
            .map(|dir| self.neighbor(cell, dir))
            .filter(|&next| self.is_walkable(next))
            .collect()
    }

    fn index(&self, cell: IVec2) -> usize {
        let cell = self.wrap(cell);
        cell.y as usize * self.width + cell.x as usize
    }

    /// Returns the tile at the given cell, with wraparound applied.
    pub fn tile(&self, cell: IVec2) -> MapTile {
        self.tiles[self.index(cell)]
    }

    pub fn is_walkable(&self, cell: IVec2) -> bool {
        self.tile(cell).is_walkable()
    }

    /// Clears a pellet or power pellet, returning what was there.
    ///
    /// Returns `None` if the cell held nothing edible.
    pub fn consume(&mut self, cell: IVec2) -> Option<MapTile> {
        let index = self.index(cell);
        let tile = self.tiles[index];
        if !tile.is_edible() {
            return None;
        }

        self.tiles[index] = MapTile::Path;
        self.remaining_pellets -= 1;
        Some(tile)
    }

    /// The number of pellets (including power pellets) the layout started with.
    pub fn total_pellets(&self) -> u32 {
        self.total_pellets
    }

    /// The number of pellets (including power pellets) still on the board.
    pub fn remaining_pellets(&self) -> u32 {
        self.remaining_pellets
    }

    pub fn player_spawn(&self) -> IVec2 {
        self.player_spawn
    }

    pub fn ghost_spawn(&self, archetype: Archetype) -> IVec2 {
        self.ghost_spawns[archetype.index()]
    }

    /// Returns the subpixel centre of a cell.
    pub fn cell_center(cell: IVec2) -> Vec2 {
        (cell.as_vec2() + Vec2::splat(0.5)) * CELL_SIZE
    }

    /// Returns the cell containing a subpixel position.
    pub fn cell_at(position: Vec2) -> IVec2 {
        (position / CELL_SIZE).floor().as_ivec2()
    }

    /// Iterates over every cell with its tile, row by row.
    pub fn iter_tiles(&self) -> impl Iterator<Item = (IVec2, MapTile)> + '_ {
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            let cell = IVec2::new((index % self.width) as i32, (index / self.width) as i32);
            (cell, *tile)
        })
    }

    /// Iterates over the cells that are currently plain paths.
    pub fn path_cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.iter_tiles()
            .filter(|(_, tile)| *tile == MapTile::Path)
            .map(|(cell, _)| cell)
    }
}
