//! Simulation core for a tile-based side-scrolling platformer.
//!
//! `entities` holds the pure data; `compute` drives a session one frame at a
//! time on top of the level generator, the collision resolver, the player and
//! enemy rules and the camera. Nothing here does terminal or file I/O apart
//! from loading configuration.

pub mod camera;
pub mod compute;
pub mod config;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod level;
pub mod pacing;
pub mod physics;
pub mod player;
