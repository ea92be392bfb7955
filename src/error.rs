//! Centralized error types for the simulation core.
//!
//! Errors only surface from construction and lifecycle commands. A tick never
//! returns an error; faults inside a tick are logged and the tick becomes a no-op.

use crate::systems::state::GameStage;

/// Main error type for the simulation core.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("Level {index} could not be loaded: {reason}")]
    Level { index: u32, reason: String },

    #[error("Cannot move from {from} to {to}")]
    InvalidTransition { from: GameStage, to: GameStage },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Error type for map parsing operations.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character in board: {0:?}")]
    UnknownCharacter(char),
    #[error("Board has no rows")]
    EmptyBoard,
    #[error("Invalid board width at line {line}: expected {expected}, got {actual}")]
    RaggedRow { line: usize, expected: usize, actual: usize },
    #[error("Spawn marker {0:?} is missing")]
    MissingSpawn(char),
    #[error("Spawn marker {0:?} appears more than once")]
    DuplicateSpawn(char),
}

/// Errors related to map validation.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MapError {
    #[error("Walkable region is split: {reachable} of {walkable} cells reachable from the player spawn")]
    Disconnected { reachable: usize, walkable: usize },

    #[error("Map has no pellets to collect")]
    NoPellets,
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
