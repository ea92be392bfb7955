use glam::IVec2;
use pellet_chase::constants::MapTile;
use pellet_chase::error::ParseError;
use pellet_chase::map::parser::MapTileParser;
use speculoos::prelude::*;

#[test]
fn test_parse_character() {
    let test_cases = [
        ('#', MapTile::Wall),
        ('.', MapTile::Pellet),
        ('o', MapTile::PowerPellet),
        (' ', MapTile::Path),
        ('X', MapTile::Path),
        ('3', MapTile::Path),
    ];

    for (c, expected) in test_cases {
        assert_that(&MapTileParser::parse_character(c)).is_ok_containing(expected);
    }

    assert_that(&MapTileParser::parse_character('Z')).is_err_containing(ParseError::UnknownCharacter('Z'));
}

#[test]
fn test_parse_board_extracts_spawns() {
    let board = ["#######", "#X.1.2#", "#o.3.4#", "#######"];
    let parsed = MapTileParser::parse_board(&board).unwrap();

    assert_that(&parsed.width).is_equal_to(7);
    assert_that(&parsed.height).is_equal_to(4);
    assert_that(&parsed.player_spawn).is_equal_to(IVec2::new(1, 1));
    assert_that(&parsed.ghost_spawns).is_equal_to([
        IVec2::new(3, 1),
        IVec2::new(5, 1),
        IVec2::new(3, 2),
        IVec2::new(5, 2),
    ]);
    assert_that(&parsed.tiles[2 * 7 + 1]).is_equal_to(MapTile::PowerPellet);
}

#[test]
fn test_parse_board_rejects_ragged_rows() {
    let board = ["#####", "#X1234#", "#####"];
    assert_that(&MapTileParser::parse_board(&board).map(|_| ())).is_err_containing(ParseError::RaggedRow {
        line: 1,
        expected: 5,
        actual: 7,
    });
}

#[test]
fn test_parse_board_rejects_missing_and_duplicate_spawns() {
    let missing = ["#######", "#X.1.2#", "#..3..#", "#######"];
    assert_that(&MapTileParser::parse_board(&missing).map(|_| ())).is_err_containing(ParseError::MissingSpawn('4'));

    let duplicate = ["#######", "#X.1.2#", "#X.3.4#", "#######"];
    assert_that(&MapTileParser::parse_board(&duplicate).map(|_| ())).is_err_containing(ParseError::DuplicateSpawn('X'));
}

#[test]
fn test_parse_board_rejects_empty() {
    assert_that(&MapTileParser::parse_board(&[]).map(|_| ())).is_err_containing(ParseError::EmptyBoard);
    assert_that(&MapTileParser::parse_board(&[""]).map(|_| ())).is_err_containing(ParseError::EmptyBoard);
}
