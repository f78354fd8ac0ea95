//! Once-per-second session countdown
//!
//! The clock runs on its own schedule, separate from frame steps. Each clock
//! is tagged with an id; ticks carrying any other id are stale leftovers from
//! an earlier session and never touch the current one.

use serde::{Deserialize, Serialize};

use super::state::{SessionEvent, SessionState};

/// Identifies one scheduled clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClockId(pub u64);

/// What a single clock tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// Tick from a clock that is not the current one, or already stopped
    Stale,
    /// Session inactive; the tick is ignored but the clock keeps running
    Inert,
    /// One second elapsed, seconds remaining
    Ticked(u32),
    /// Time ran out; the clock has stopped itself
    Expired,
}

#[derive(Debug, Clone)]
pub struct GameClock {
    id: ClockId,
    running: bool,
}

impl GameClock {
    pub fn new(id: ClockId) -> Self {
        Self { id, running: true }
    }

    pub fn id(&self) -> ClockId {
        self.id
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the clock. Returns true if it was still running.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }

    pub fn tick(&mut self, id: ClockId, state: &mut SessionState) -> ClockTick {
        if id != self.id || !self.running {
            return ClockTick::Stale;
        }
        if !state.active {
            return ClockTick::Inert;
        }

        state.time_remaining = state.time_remaining.saturating_sub(1);
        state.events.push(SessionEvent::TimeChanged(state.time_remaining));

        if state.time_remaining == 0 {
            self.running = false;
            ClockTick::Expired
        } else {
            ClockTick::Ticked(state.time_remaining)
        }
    }
}
