//! Deterministic simulation core for a tile-based arcade chase game.
//!
//! The host owns the clock, the input devices and the screen. It forwards input to a
//! [`game::Game`], calls [`game::Game::tick`] at the interval the game asks for, and
//! drains the resulting [`events::GameEvent`]s.

pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod events;
pub mod game;
pub mod map;
pub mod session;
pub mod systems;
