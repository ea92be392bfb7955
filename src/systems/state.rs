use strum_macros::{AsRefStr, Display};

use crate::error::{GameError, GameResult};

/// The lifecycle stage of a session.
///
/// Ticks only mutate the simulation while `Running`. `GameOver` is terminal until the
/// host resets.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash, AsRefStr, Display)]
pub enum GameStage {
    /// Waiting for the host to start play.
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

impl GameStage {
    pub fn is_running(self) -> bool {
        self == GameStage::Running
    }

    /// Validates a transition to `to`, returning the new stage.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidTransition` for any edge outside the lifecycle; the
    /// caller should leave the stage unchanged in that case.
    pub fn transition(self, to: GameStage) -> GameResult<GameStage> {
        use GameStage::*;

        let allowed = matches!(
            (self, to),
            (Idle, Running) | (Running, Paused) | (Paused, Running) | (Running, GameOver) | (_, Idle)
        );

        if allowed {
            Ok(to)
        } else {
            Err(GameError::InvalidTransition { from: self, to })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_edges() {
        assert_eq!(GameStage::Idle.transition(GameStage::Running).unwrap(), GameStage::Running);
        assert_eq!(GameStage::Running.transition(GameStage::Paused).unwrap(), GameStage::Paused);
        assert_eq!(GameStage::Paused.transition(GameStage::Running).unwrap(), GameStage::Running);
        assert_eq!(GameStage::Running.transition(GameStage::GameOver).unwrap(), GameStage::GameOver);
        assert_eq!(GameStage::GameOver.transition(GameStage::Idle).unwrap(), GameStage::Idle);
    }

    #[test]
    fn test_game_over_is_terminal() {
        assert!(GameStage::GameOver.transition(GameStage::Running).is_err());
        assert!(GameStage::GameOver.transition(GameStage::Paused).is_err());
        assert!(GameStage::Idle.transition(GameStage::Paused).is_err());
    }
}
