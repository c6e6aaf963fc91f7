//! Turn-based snake engine.
//!
//! The core (`grid`, `snake`, `apple`, `game`, `world`) is pure: a step takes
//! a `GameState` by value and returns the next one. `session` drives the core
//! from a command source and pushes full frames into a `sink::RenderSink`.

pub mod apple;
pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod input;
pub mod pixel;
pub mod session;
pub mod sink;
pub mod snake;
pub mod terminal_runtime;
pub mod world;
