//! Map parsing functionality for converting raw board layouts into structured data.

use crate::constants::MapTile;
use crate::entity::ghost::Archetype;
use crate::error::ParseError;
use glam::IVec2;
use strum::IntoEnumIterator;

/// Structured representation of a parsed ASCII board layout with extracted spawn positions.
#[derive(Debug, Clone)]
pub struct ParsedMap {
    /// Width of the board, in cells.
    pub width: usize,
    /// Height of the board, in cells.
    pub height: usize,
    /// Row-major tiles converted from ASCII characters.
    pub tiles: Vec<MapTile>,
    /// Starting cell of the player (marked by `X`).
    pub player_spawn: IVec2,
    /// Starting cells of the adversaries, indexed by archetype order (marked by `1`-`4`).
    pub ghost_spawns: [IVec2; 4],
}

/// Parser for converting raw board layouts into structured map data.
pub struct MapTileParser;

impl MapTileParser {
    /// Converts an ASCII character from the board layout into its tile type.
    ///
    /// Spawn markers (`X`, `1`-`4`) are walkable paths; their positions are tracked separately.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnknownCharacter` for any character outside the layout vocabulary.
    pub fn parse_character(c: char) -> Result<MapTile, ParseError> {
        match c {
            '#' => Ok(MapTile::Wall),
            '.' => Ok(MapTile::Pellet),
            'o' => Ok(MapTile::PowerPellet),
            ' ' => Ok(MapTile::Path),
            'X' | '1'..='4' => Ok(MapTile::Path),
            _ => Err(ParseError::UnknownCharacter(c)),
        }
    }

    /// Parses a raw board layout into structured map data.
    ///
    /// # Errors
    ///
    /// Returns an error if the board is empty, its rows differ in length, it contains
    /// unknown characters, or any spawn marker is missing or repeated.
    pub fn parse_board(raw_board: &[&str]) -> Result<ParsedMap, ParseError> {
        let width = raw_board.first().ok_or(ParseError::EmptyBoard)?.chars().count();
        if width == 0 {
            return Err(ParseError::EmptyBoard);
        }

        let height = raw_board.len();
        let mut tiles = Vec::with_capacity(width * height);
        let mut player_spawn = None;
        let mut ghost_spawns: [Option<IVec2>; 4] = [None; 4];

        for (y, line) in raw_board.iter().enumerate() {
            let actual = line.chars().count();
            if actual != width {
                return Err(ParseError::RaggedRow {
                    line: y,
                    expected: width,
                    actual,
                });
            }

            for (x, character) in line.chars().enumerate() {
                tiles.push(Self::parse_character(character)?);

                let cell = IVec2::new(x as i32, y as i32);
                let slot = match character {
                    'X' => &mut player_spawn,
                    '1'..='4' => &mut ghost_spawns[(character as u8 - b'1') as usize],
                    _ => continue,
                };
                if slot.replace(cell).is_some() {
                    return Err(ParseError::DuplicateSpawn(character));
                }
            }
        }

        let player_spawn = player_spawn.ok_or(ParseError::MissingSpawn('X'))?;
        let mut spawns = [IVec2::ZERO; 4];
        for archetype in Archetype::iter() {
            let index = archetype.index();
            spawns[index] = ghost_spawns[index].ok_or(ParseError::MissingSpawn(archetype.marker()))?;
        }

        Ok(ParsedMap {
            width,
            height,
            tiles,
            player_spawn,
            ghost_spawns: spawns,
        })
    }
}
