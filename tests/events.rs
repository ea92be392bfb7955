use pellet_chase::events::{GameEvent, ScoreEvent, ScoreReason, SoundCue, TickOutcome};
use speculoos::prelude::*;

#[test]
fn test_score_event_into_game_event() {
    let event: GameEvent = ScoreEvent::points(50, ScoreReason::PowerPellet).into();
    assert_eq!(
        event,
        GameEvent::Score(ScoreEvent {
            score_delta: 50,
            lives_delta: 0,
            reason: ScoreReason::PowerPellet,
        })
    );
}

#[test]
fn test_sound_cue_names() {
    assert_that(&SoundCue::GhostEaten.as_ref()).is_equal_to("ghost_eaten");
    assert_that(&SoundCue::LevelClear.to_string()).is_equal_to("level_clear".to_string());
}

#[test]
fn test_tick_outcome_combines() {
    let outcome = TickOutcome::PELLET | TickOutcome::COMBO;
    assert_that(&outcome.contains(TickOutcome::COMBO)).is_true();
    assert_that(&outcome.intersects(TickOutcome::LIFE_LOST | TickOutcome::GAME_OVER)).is_false();
}
