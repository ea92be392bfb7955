//! Level data supplied to the simulation.

use crate::constants::levels;
use crate::error::{GameError, GameResult};
use crate::map::builder::Map;

/// Supplies the map for a given level.
///
/// The simulation treats the returned map as authoritative and only ever mutates its
/// pellet cells.
pub trait LevelSource {
    /// Returns a fresh map for the 1-based level number.
    fn load(&self, level: u32) -> GameResult<Map>;
}

/// A set of ASCII layouts played in order, cycling once the last one is cleared.
#[derive(Debug, Clone)]
pub struct LayoutLevels {
    layouts: Vec<Vec<String>>,
}

impl LayoutLevels {
    /// Creates a level source from owned layouts.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidConfig` when no layouts are given.
    pub fn new(layouts: Vec<Vec<String>>) -> GameResult<Self> {
        if layouts.is_empty() {
            return Err(GameError::InvalidConfig("at least one level layout is required".to_string()));
        }
        Ok(Self { layouts })
    }

    /// Creates a level source from a single layout that repeats on every level.
    pub fn single(layout: &[&str]) -> Self {
        Self {
            layouts: vec![layout.iter().map(|row| row.to_string()).collect()],
        }
    }

    /// The layouts shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            layouts: levels::ALL
                .iter()
                .map(|layout| layout.iter().map(|row| row.to_string()).collect())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

impl Default for LayoutLevels {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LevelSource for LayoutLevels {
    fn load(&self, level: u32) -> GameResult<Map> {
        let index = (level.max(1) as usize - 1) % self.layouts.len();
        let rows: Vec<&str> = self.layouts[index].iter().map(String::as_str).collect();
        Map::new(&rows).map_err(|e| GameError::Level {
            index: level,
            reason: e.to_string(),
        })
    }
}
