//! Core game logic for the chase environment
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! It can be driven programmatically by a policy, by the keyboard, or by tests.

pub mod action;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod state;

// Re-export commonly used types
pub use action::{Action, NUM_ACTIONS};
pub use config::{BoundaryMode, CaptureMode, EnvConfig};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use geometry::{Blob, COLLISION_DISTANCE, Color, Position, Size, collides, distance};
pub use state::{Agent, GameState, Target};
