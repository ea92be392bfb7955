//! Commands the host sends in and events the simulation sends out.

use bitflags::bitflags;
use glam::IVec2;
use strum_macros::{AsRefStr, Display};

use crate::map::direction::Direction;
use crate::systems::powerup::PowerUpKind;
use crate::systems::state::GameStage;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    MovePlayer(Direction),
    Start,
    Pause,
    Resume,
    TogglePause,
    /// Back to Idle with a fresh session.
    Reset,
    /// Reset and start in one step.
    Restart,
}

/// Why a score event was raised.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr, Display)]
pub enum ScoreReason {
    Pellet,
    PowerPellet,
    Combo,
    GhostConsumed,
    LevelClear,
    PowerUp,
    LifeLost,
}

/// A change to the score and lives, reported to the host for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreEvent {
    pub score_delta: u32,
    pub lives_delta: i32,
    pub reason: ScoreReason,
}

impl ScoreEvent {
    pub fn points(score_delta: u32, reason: ScoreReason) -> Self {
        Self {
            score_delta,
            lives_delta: 0,
            reason,
        }
    }
}

/// Sound cues for the host's audio layer. The simulation never plays sound itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SoundCue {
    Eat,
    Power,
    Combo,
    GhostEaten,
    Death,
    LevelClear,
    PowerUp,
    GameOver,
}

/// The final result of a session, handed to the host when the game ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FinalSnapshot {
    pub score: u32,
    pub level: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Score(ScoreEvent),
    Sound(SoundCue),
    StageChanged { from: GameStage, to: GameStage },
    LevelStarted { level: u32 },
    PowerModeChanged(bool),
    PowerUpSpawned { kind: PowerUpKind, cell: IVec2 },
    PowerUpCollected(PowerUpKind),
    GameOver(FinalSnapshot),
}

impl From<ScoreEvent> for GameEvent {
    fn from(event: ScoreEvent) -> Self {
        GameEvent::Score(event)
    }
}

impl From<SoundCue> for GameEvent {
    fn from(cue: SoundCue) -> Self {
        GameEvent::Sound(cue)
    }
}

bitflags! {
    /// A summary of what happened during a single tick.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct TickOutcome: u16 {
        const PELLET = 1 << 0;
        const POWER_PELLET = 1 << 1;
        const COMBO = 1 << 2;
        const GHOST_CONSUMED = 1 << 3;
        const LIFE_LOST = 1 << 4;
        const LEVEL_CLEARED = 1 << 5;
        const GAME_OVER = 1 << 6;
        const POWER_ENDED = 1 << 7;
        const POWER_UP = 1 << 8;
    }
}
