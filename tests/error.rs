use pellet_chase::error::{GameError, MapError, ParseError};
use pellet_chase::systems::state::GameStage;

#[test]
fn test_game_error_from_parse_error() {
    let parse_error = ParseError::UnknownCharacter('Z');
    let game_error: GameError = parse_error.into();
    assert!(matches!(game_error, GameError::MapParse(_)));
}

#[test]
fn test_game_error_from_map_error() {
    let map_error = MapError::NoPellets;
    let game_error: GameError = map_error.into();
    assert!(matches!(game_error, GameError::Map(_)));
}

#[test]
fn test_parse_error_display() {
    let error = ParseError::UnknownCharacter('!');
    assert_eq!(error.to_string(), "Unknown character in board: '!'");

    let error = ParseError::RaggedRow {
        line: 3,
        expected: 10,
        actual: 9,
    };
    assert_eq!(error.to_string(), "Invalid board width at line 3: expected 10, got 9");
}

#[test]
fn test_map_error_display() {
    let error = MapError::Disconnected {
        reachable: 4,
        walkable: 9,
    };
    assert_eq!(
        error.to_string(),
        "Walkable region is split: 4 of 9 cells reachable from the player spawn"
    );
}

#[test]
fn test_invalid_transition_display() {
    let error = GameError::InvalidTransition {
        from: GameStage::Idle,
        to: GameStage::Paused,
    };
    assert_eq!(error.to_string(), "Cannot move from Idle to Paused");
}
