//! Blob Chase - a minimal reinforcement learning environment
//!
//! An agent square chases a food square on a 500x500 board. This library provides:
//! - Core game logic (game module)
//! - The reset/step/render environment contract and policies (rl module)
//! - Terminal rendering (render module) and keyboard input (input module)
//! - Headless and interactive drivers (modes module)

pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod rl;

pub use error::EnvError;
