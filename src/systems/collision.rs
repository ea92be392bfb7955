//! Pickup, contact and level-completion rules, applied after movement each tick.
//!
//! The order matters: pellets are eaten before contacts are checked, so a power pellet
//! picked up on the same tick as a contact already protects the player.

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::constants::scoring::{COMBO_UNIT, GHOST_CONSUMED, PELLET, POWER_PELLET};
use crate::constants::MapTile;
use crate::entity::ghost::Ghost;
use crate::entity::player::Player;
use crate::events::{GameEvent, ScoreEvent, ScoreReason, SoundCue, TickOutcome};
use crate::map::builder::Map;
use crate::session::Session;
use crate::systems::particles::{Color, EffectKind};
use crate::systems::powerup::{PowerUpKind, PowerUps};
use crate::systems::Feedback;

/// Eats whatever pellet sits under the player, then scores any combo it completes.
pub fn consume_pellet(
    map: &mut Map,
    player: &Player,
    ghosts: &mut [Ghost],
    session: &mut Session,
    config: &GameConfig,
    out: &mut Feedback,
) -> TickOutcome {
    let Some(tile) = map.consume(player.body.cell()) else {
        return TickOutcome::empty();
    };

    let position = player.body.position();
    let mut outcome = match tile {
        MapTile::PowerPellet => {
            let points = session.award(POWER_PELLET);
            session.start_power(config.power_duration);
            for ghost in ghosts.iter_mut() {
                ghost.frighten();
            }
            debug!(cell = ?player.body.cell(), "Power pellet eaten");

            out.emit(ScoreEvent::points(points, ScoreReason::PowerPellet));
            out.emit(SoundCue::Power);
            out.emit(GameEvent::PowerModeChanged(true));
            out.effect(position, EffectKind::Glow, Color::PINK, 12);
            out.effect(position, EffectKind::Burst, Color::PINK, 20);
            TickOutcome::POWER_PELLET
        }
        _ => {
            let points = session.award(PELLET);
            out.emit(ScoreEvent::points(points, ScoreReason::Pellet));
            out.emit(SoundCue::Eat);
            out.effect(position, EffectKind::Spark, Color::YELLOW, 6);
            TickOutcome::PELLET
        }
    };

    let streak = session.record_pickup(config.combo_window);
    if streak >= config.combo_threshold {
        let points = session.award(streak * COMBO_UNIT);
        debug!(streak, points, "Combo");
        out.emit(ScoreEvent::points(points, ScoreReason::Combo));
        out.emit(SoundCue::Combo);
        out.effect(position, EffectKind::Burst, Color::MAGENTA, 10);
        outcome |= TickOutcome::COMBO;
    }

    outcome
}

/// Collects the power-up under the player, if any, and applies its instant part.
pub fn collect_power_up(
    powerups: &mut PowerUps,
    player: &Player,
    ghosts: &mut [Ghost],
    session: &mut Session,
    out: &mut Feedback,
) -> TickOutcome {
    let Some(kind) = powerups.collect(player.body.cell(), session.elapsed()) else {
        return TickOutcome::empty();
    };

    let mut lives_delta = 0;
    match kind {
        PowerUpKind::ExtraLife => {
            session.gain_life();
            lives_delta = 1;
        }
        PowerUpKind::Invincibility => {
            session.start_power(kind.duration());
            for ghost in ghosts.iter_mut() {
                ghost.frighten();
            }
            out.emit(GameEvent::PowerModeChanged(true));
        }
        _ => {}
    }

    let points = session.award(kind.points());
    out.emit(GameEvent::PowerUpCollected(kind));
    out.emit(ScoreEvent {
        score_delta: points,
        lives_delta,
        reason: ScoreReason::PowerUp,
    });
    out.emit(SoundCue::PowerUp);
    out.effect(player.body.position(), EffectKind::Spark, kind.color(), 16);
    TickOutcome::POWER_UP
}

/// Resolves contacts between the player and the adversaries.
///
/// In power-mode every touching adversary is consumed and sent home. Otherwise the
/// first contact costs a life; the remaining adversaries are not checked that tick.
/// Returns `GAME_OVER` alongside `LIFE_LOST` when the last life is gone, in which case
/// positions are left as they are.
pub fn resolve_contacts(
    map: &Map,
    player: &mut Player,
    ghosts: &mut [Ghost],
    session: &mut Session,
    out: &mut Feedback,
) -> TickOutcome {
    let mut outcome = TickOutcome::empty();

    for index in 0..ghosts.len() {
        if !player.body.overlaps(&ghosts[index].body, map) {
            continue;
        }

        if session.is_powered() {
            let ghost = &mut ghosts[index];
            let points = session.award(GHOST_CONSUMED);
            let position = ghost.body.position();
            let color = ghost.archetype().color();
            debug!(ghost = ghost.archetype().as_ref(), points, "Adversary consumed");
            ghost.respawn(true);

            out.emit(ScoreEvent::points(points, ScoreReason::GhostConsumed));
            out.emit(SoundCue::GhostEaten);
            out.effect(position, EffectKind::Burst, color, 24);
            out.effect(position, EffectKind::Smoke, Color::WHITE, 8);
            outcome |= TickOutcome::GHOST_CONSUMED;
            continue;
        }

        let remaining = session.lose_life();
        info!(ghost = ghosts[index].archetype().as_ref(), lives = remaining, "Player caught");
        out.emit(ScoreEvent {
            score_delta: 0,
            lives_delta: -1,
            reason: ScoreReason::LifeLost,
        });
        out.emit(SoundCue::Death);
        out.effect(player.body.position(), EffectKind::Burst, Color::YELLOW, 30);
        outcome |= TickOutcome::LIFE_LOST;

        if remaining == 0 {
            outcome |= TickOutcome::GAME_OVER;
        } else {
            player.respawn();
            for ghost in ghosts.iter_mut() {
                ghost.respawn(false);
            }
        }
        break;
    }

    outcome
}
