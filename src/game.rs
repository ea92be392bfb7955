//! This module contains the main game logic and state.

use std::time::Duration;

use glam::{IVec2, Vec2};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info, trace, warn};

use crate::config::GameConfig;
use crate::constants::scoring::LEVEL_CLEAR_UNIT;
use crate::entity::ghost::{Archetype, Ghost};
use crate::entity::player::Player;
use crate::error::{GameError, GameResult};
use crate::events::{FinalSnapshot, GameCommand, GameEvent, ScoreEvent, ScoreReason, SoundCue, TickOutcome};
use crate::map::builder::Map;
use crate::map::direction::Direction;
use crate::map::levels::{LayoutLevels, LevelSource};
use crate::session::Session;
use crate::systems::collision;
use crate::systems::particles::{Color, EffectKind, ParticlePool};
use crate::systems::powerup::{PowerUpKind, PowerUps};
use crate::systems::state::GameStage;
use crate::systems::targeting::{self, Pursuit, TargetSteer};
use crate::systems::Feedback;

/// The `Game` struct is the main entry point for the simulation.
///
/// It owns the board, the entities and the session, and advances all of them one
/// tick at a time. The host drives it: it calls [`Game::tick`] on its own timer at
/// [`Game::tick_interval`], forwards input, and drains [`GameEvent`]s for sound and
/// display. Nothing here reads the wall clock, so a seeded game replays exactly.
pub struct Game {
    config: GameConfig,
    levels: Box<dyn LevelSource>,
    map: Map,
    /// Untouched copy of the current level, restored if the next one fails to load.
    pristine: Map,
    player: Player,
    ghosts: [Ghost; 4],
    session: Session,
    particles: ParticlePool,
    powerups: PowerUps,
    stage: GameStage,
    events: Vec<GameEvent>,
    rng: SmallRng,
}

impl Game {
    /// Creates a game on the built-in levels.
    pub fn new(config: GameConfig) -> GameResult<Game> {
        Self::with_levels(config, LayoutLevels::builtin())
    }

    /// Creates a game that loads its maps from `levels`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the starting level cannot
    /// be loaded.
    pub fn with_levels(config: GameConfig, levels: impl LevelSource + 'static) -> GameResult<Game> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let map = levels.load(config.start_level)?;
        let player = Player::new(map.player_spawn(), config.player_stride);
        let ghosts = Archetype::ALL.map(|archetype| {
            Ghost::new(
                archetype,
                map.ghost_spawn(archetype),
                archetype.home_corner(map.width(), map.height()),
                config.ghost_stride,
                rng.random(),
            )
        });
        let particles = ParticlePool::new(config.particle_capacity, rng.random());
        let session = Session::new(&config, map.total_pellets());

        info!(
            level = config.start_level,
            pellets = map.total_pellets(),
            seed = ?config.seed,
            "Game created"
        );

        let mut game = Game {
            powerups: PowerUps::new(config.power_ups),
            levels: Box::new(levels),
            pristine: map.clone(),
            map,
            player,
            ghosts,
            session,
            particles,
            stage: GameStage::Idle,
            events: Vec::new(),
            rng,
            config,
        };
        game.apply_difficulty();
        Ok(game)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ghosts(&self) -> &[Ghost; 4] {
        &self.ghosts
    }

    pub fn ghost(&self, archetype: Archetype) -> &Ghost {
        &self.ghosts[archetype.index()]
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn particles(&self) -> &ParticlePool {
        &self.particles
    }

    pub fn powerups(&self) -> &PowerUps {
        &self.powerups
    }

    pub fn stage(&self) -> GameStage {
        self.stage
    }

    /// How long the host should wait between ticks.
    pub fn tick_interval(&self) -> Duration {
        self.session.tick_interval()
    }

    /// Puts a pickup on `cell`, replacing any pickup already on the board.
    pub fn place_power_up(&mut self, kind: PowerUpKind, cell: IVec2) {
        debug!(kind = kind.as_ref(), ?cell, "Power-up placed");
        self.powerups.place(kind, cell, self.session.elapsed());
    }

    /// Overrides an adversary's base speed until the next level applies difficulty again.
    pub fn set_ghost_speed(&mut self, archetype: Archetype, speed: f32) {
        self.ghosts[archetype.index()].set_base_speed(speed.clamp(0.0, 1.0));
    }

    /// Moves an adversary onto the centre of `cell` with the given heading.
    pub fn place_ghost(&mut self, archetype: Archetype, cell: IVec2, direction: Direction) {
        let cell = self.map.wrap(cell);
        self.ghosts[archetype.index()].body.place(cell, direction);
    }

    /// Takes every event raised since the last call, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn set_pending_direction(&mut self, direction: Direction) {
        self.player.set_pending_direction(direction);
    }

    /// Spawns a visual effect, returning how many particles the pool could supply.
    pub fn request_effect(&mut self, position: Vec2, kind: EffectKind, color: Color, count: usize) -> usize {
        self.particles.request_effect(position, kind, color, count)
    }

    /// Applies a host command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command asks for a lifecycle transition the current
    /// stage does not allow, or if resetting fails to load the starting level.
    pub fn handle_command(&mut self, command: GameCommand) -> GameResult<()> {
        debug!(?command, stage = self.stage.as_ref(), "Handling command");
        match command {
            GameCommand::MovePlayer(direction) => {
                self.set_pending_direction(direction);
                Ok(())
            }
            GameCommand::Start => self.start(),
            GameCommand::Pause => self.pause(),
            GameCommand::Resume => self.resume(),
            GameCommand::TogglePause => self.toggle_pause(),
            GameCommand::Reset => self.reset(),
            GameCommand::Restart => self.restart(),
        }
    }

    fn transition(&mut self, to: GameStage) -> GameResult<()> {
        let from = self.stage;
        self.stage = from.transition(to)?;
        if from == to {
            return Ok(());
        }
        debug!(from = from.as_ref(), to = to.as_ref(), "Stage transition");
        self.events.push(GameEvent::StageChanged { from, to });
        Ok(())
    }

    fn expect_stage(&self, from: GameStage, to: GameStage) -> GameResult<()> {
        if self.stage == from {
            Ok(())
        } else {
            Err(GameError::InvalidTransition { from: self.stage, to })
        }
    }

    /// Begins play from Idle.
    pub fn start(&mut self) -> GameResult<()> {
        self.expect_stage(GameStage::Idle, GameStage::Running)?;
        self.transition(GameStage::Running)?;
        if self.session.ticks() == 0 {
            self.events.push(GameEvent::LevelStarted {
                level: self.session.level(),
            });
        }
        Ok(())
    }

    pub fn pause(&mut self) -> GameResult<()> {
        self.transition(GameStage::Paused)
    }

    pub fn resume(&mut self) -> GameResult<()> {
        self.expect_stage(GameStage::Paused, GameStage::Running)?;
        self.transition(GameStage::Running)
    }

    pub fn toggle_pause(&mut self) -> GameResult<()> {
        match self.stage {
            GameStage::Paused => self.resume(),
            _ => self.pause(),
        }
    }

    /// Returns to Idle with a fresh session on the starting level.
    ///
    /// Nothing changes if the starting level fails to load.
    pub fn reset(&mut self) -> GameResult<()> {
        let map = self.levels.load(self.config.start_level)?;
        self.install_map(map);
        self.drop_power();
        self.session = Session::new(&self.config, self.map.total_pellets());
        self.particles.clear();
        self.powerups.clear();
        self.apply_difficulty();
        self.transition(GameStage::Idle)?;
        info!("Game reset");
        Ok(())
    }

    pub fn restart(&mut self) -> GameResult<()> {
        self.reset()?;
        self.start()
    }

    /// Advances the simulation by one tick.
    ///
    /// Does nothing unless the game is running. The phases run in a fixed order:
    /// clock and timers, player movement, adversary AI and movement, rule resolution,
    /// then effects.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.stage.is_running() {
            trace!(stage = self.stage.as_ref(), "Tick skipped");
            return TickOutcome::empty();
        }

        let mut outcome = TickOutcome::empty();
        let dt = self.session.advance_clock();

        if self.session.tick_power(dt) {
            debug!("Power mode ended");
            self.events.push(GameEvent::PowerModeChanged(false));
            outcome |= TickOutcome::POWER_ENDED;
        }
        self.update_powerups();

        self.player.body.stride = self.config.player_stride * self.powerups.speed_factor();
        self.player.advance(&self.map);
        self.move_ghosts(dt);

        outcome |= self.resolve();

        self.particles.update();
        outcome
    }

    fn update_powerups(&mut self) {
        let now = self.session.elapsed();
        if let Some(pickup) = self.powerups.update(now, &self.map, &mut self.rng) {
            self.events.push(GameEvent::PowerUpSpawned {
                kind: pickup.kind,
                cell: pickup.cell,
            });
        }
        self.session.set_multiplier(self.powerups.score_multiplier());
    }

    fn move_ghosts(&mut self, dt: Duration) {
        let power = self.session.is_powered();
        let frozen = self.powerups.ghosts_frozen();
        let pursuit = Pursuit {
            player_cell: self.player.body.cell(),
            player_direction: self.player.body.direction(),
            aggressor_cell: self.ghosts[Archetype::Aggressor.index()].body.cell(),
        };

        for ghost in self.ghosts.iter_mut() {
            ghost.update_mode(power, dt, self.config.mode_period);

            let target = targeting::choose_target(ghost, &pursuit, &mut self.rng);
            ghost.set_target(target);

            if !ghost.should_move(frozen) {
                continue;
            }

            let mut steer = TargetSteer::new(target, ghost.mode(), &mut self.rng);
            ghost.body.advance(&self.map, &mut steer);
        }
    }

    /// Applies pickups, contacts and level completion, in that order.
    fn resolve(&mut self) -> TickOutcome {
        let mut out = Feedback {
            events: &mut self.events,
            particles: &mut self.particles,
        };

        let mut outcome = collision::consume_pellet(
            &mut self.map,
            &self.player,
            &mut self.ghosts,
            &mut self.session,
            &self.config,
            &mut out,
        );
        outcome |= collision::collect_power_up(
            &mut self.powerups,
            &self.player,
            &mut self.ghosts,
            &mut self.session,
            &mut out,
        );
        outcome |= collision::resolve_contacts(
            &self.map,
            &mut self.player,
            &mut self.ghosts,
            &mut self.session,
            &mut out,
        );

        if outcome.contains(TickOutcome::GAME_OVER) {
            self.finish();
        } else if self.session.is_level_complete() {
            outcome |= self.advance_level();
        }

        outcome
    }

    fn finish(&mut self) {
        let snapshot = FinalSnapshot {
            score: self.session.score(),
            level: self.session.level(),
        };
        info!(score = snapshot.score, level = snapshot.level, "Game over");

        if let Err(e) = self.transition(GameStage::GameOver) {
            error!("Failed to end game: {}", e);
            return;
        }
        self.events.push(GameEvent::Sound(SoundCue::GameOver));
        self.events.push(GameEvent::GameOver(snapshot));
    }

    fn advance_level(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::LEVEL_CLEARED;
        let cleared = self.session.level();
        let points = self.session.award(LEVEL_CLEAR_UNIT.saturating_mul(cleared));
        self.events.push(ScoreEvent::points(points, ScoreReason::LevelClear).into());
        self.events.push(GameEvent::Sound(SoundCue::LevelClear));
        self.particles
            .request_effect(self.player.body.position(), EffectKind::Glow, Color::WHITE, 40);

        let next = cleared + 1;
        match self.levels.load(next) {
            Ok(map) => self.install_map(map),
            Err(e) => {
                warn!(level = next, "Failed to load next level, replaying current layout: {}", e);
                let map = self.pristine.clone();
                self.install_map(map);
            }
        }

        if self.drop_power() {
            outcome |= TickOutcome::POWER_ENDED;
        }
        self.session.begin_level(next, self.map.total_pellets());
        self.powerups.clear();
        self.apply_difficulty();
        self.events.push(GameEvent::LevelStarted { level: next });

        info!(
            level = next,
            bonus = points,
            tick_interval = ?self.session.tick_interval(),
            "Level cleared"
        );
        outcome
    }

    /// Ends power-mode early, telling the host if it was active.
    fn drop_power(&mut self) -> bool {
        if !self.session.is_powered() {
            return false;
        }
        debug!(remaining = ?self.session.power_remaining(), "Power mode cut short");
        self.session.end_power();
        self.events.push(GameEvent::PowerModeChanged(false));
        true
    }

    /// Swaps in a new map and moves every entity onto its spawn.
    fn install_map(&mut self, map: Map) {
        self.pristine = map.clone();
        self.map = map;
        self.player.relocate(self.map.player_spawn());
        for ghost in self.ghosts.iter_mut() {
            let archetype = ghost.archetype();
            ghost.relocate(
                self.map.ghost_spawn(archetype),
                archetype.home_corner(self.map.width(), self.map.height()),
            );
        }
    }

    /// Sets adversary speeds and the tick interval for the current level.
    ///
    /// Both follow from the number of levels cleared since the starting level.
    fn apply_difficulty(&mut self) {
        let cleared = self.session.level().saturating_sub(self.config.start_level);

        for ghost in self.ghosts.iter_mut() {
            let speed = ghost.archetype().base_speed() + self.config.ghost_speed_step * cleared as f32;
            ghost.set_base_speed(speed.min(self.config.max_ghost_speed));
        }

        let shrink = self.config.tick_interval_step.saturating_mul(cleared);
        let interval = self
            .config
            .tick_interval
            .saturating_sub(shrink)
            .max(self.config.min_tick_interval);
        if interval == self.config.min_tick_interval && cleared > 0 {
            debug!(level = self.session.level(), "Tick interval at minimum");
        }
        self.session.set_tick_interval(interval);
    }
}
