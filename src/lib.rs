//! Paperboy - a single-screen newspaper delivery arcade game
//!
//! Core modules:
//! - `sim`: Session simulation (actor motion, collisions, scoring, clock)
//! - `engine`: Session lifecycle, frame loop and clock wiring
//! - `schedule`: Frame/clock scheduling abstraction
//! - `renderer`: Draw surface abstraction and WebGPU backend
//! - `results`: Append-only log of finished sessions
//! - `tuning`: Difficulty profiles

pub mod engine;
pub mod error;
pub mod renderer;
pub mod results;
pub mod schedule;
pub mod sim;
pub mod tuning;

pub use engine::Engine;
pub use error::{ConfigError, SessionError};
pub use results::{ResultLog, ResultsStore};
pub use tuning::{Difficulty, DifficultyProfile, DifficultyTable};

/// Game configuration constants
pub mod consts {
    /// Projectile travel per frame step (pixels), independent of actor speed
    pub const PROJECTILE_STEP: f32 = 10.0;
    pub const PROJECTILE_WIDTH: f32 = 8.0;
    pub const PROJECTILE_HEIGHT: f32 = 10.0;
    /// Projectile spawn point, forward of the actor
    pub const THROW_OFFSET_X: f32 = 40.0;

    /// Points for each delivered paper
    pub const SCORE_PER_HIT: u32 = 10;

    /// Actor start column (vertically centred)
    pub const ACTOR_START_X: f32 = 50.0;
    /// Vertical move per input event
    pub const ACTOR_MOVE_STEP: f32 = 20.0;
    /// Actor stays this far from the top and bottom edges
    pub const ACTOR_Y_MARGIN: f32 = 50.0;

    /// Target geometry
    pub const TARGET_WIDTH: f32 = 20.0;
    pub const TARGET_HEIGHT: f32 = 40.0;
    /// Targets never spawn left of this column (keeps them ahead of the start)
    pub const TARGET_MARGIN_LEFT: f32 = 100.0;
    /// Reserved band on the remaining edges
    pub const TARGET_MARGIN_EDGE: f32 = 50.0;

    /// Game clock period in milliseconds
    pub const CLOCK_PERIOD_MS: u32 = 1000;
}
