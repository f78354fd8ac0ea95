//! Session simulation module
//!
//! All gameplay logic lives here. Nothing in this module schedules, draws or
//! touches the platform:
//! - One step per animation frame, one clock tick per second
//! - Randomness only at session start, from an injected RNG
//! - Stable iteration order over targets

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod state;
pub mod tick;

pub use autopilot::{AutopilotInput, plan};
pub use clock::{ClockId, ClockTick, GameClock};
pub use collision::{StepOutcome, aabb_overlap, resolve_projectiles};
pub use state::{
    Actor, FinalResult, MoveDirection, Playfield, Projectile, SessionEvent, SessionState, Target,
};
pub use tick::{advance, move_actor, resize, throw};
