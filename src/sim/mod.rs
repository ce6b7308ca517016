//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Obstacles kept in spawn order
//! - No rendering, audio or platform dependencies; those get intents instead

pub mod character;
pub mod collision;
pub mod obstacles;
pub mod state;
pub mod terrain;
pub mod tick;

pub use character::{Character, CharacterState};
pub use collision::{Contact, Rect, classify};
pub use obstacles::{Obstacle, ObstacleField};
pub use state::{GameEvent, GamePhase, GameState, Level};
pub use terrain::{Hill, TerrainProfile, effort_height};
pub use tick::{FrameResult, TickInput, tick};
