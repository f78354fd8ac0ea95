//! Frame and clock scheduling
//!
//! The engine never owns a timer. It asks a `Scheduler` for the next
//! animation frame and for a periodic clock, and the host calls back into
//! `Engine::on_frame` / `Engine::on_clock_tick` when those fire, passing
//! back the id they were requested with.

use serde::{Deserialize, Serialize};

use crate::sim::ClockId;

/// Identifies one frame loop; each session start begins a new one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameId(pub u64);

pub trait Scheduler {
    /// Ask for one `on_frame(id)` call at the next animation frame
    fn request_frame(&mut self, id: FrameId);
    /// Start a periodic `on_clock_tick(id)` every `period_ms`
    fn start_clock(&mut self, id: ClockId, period_ms: u32);
    /// Cancel a periodic clock. Cancelling an unknown or cancelled id is a no-op.
    fn cancel_clock(&mut self, id: ClockId);
}

/// Timer change for the host to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockCommand {
    Start { id: ClockId, period_ms: u32 },
    Cancel(ClockId),
}

/// Scheduler that only records requests
///
/// The browser host drains it after every callback and turns the requests
/// into `requestAnimationFrame` / `setInterval` calls; tests and the native
/// runner drain it to single-step the engine.
#[derive(Debug, Default)]
pub struct TaskQueue {
    frame_request: Option<FrameId>,
    commands: Vec<ClockCommand>,
    running: Vec<ClockId>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame_requested(&self) -> bool {
        self.frame_request.is_some()
    }

    /// Consume the pending frame request, if any
    ///
    /// Only the latest request is kept, so a restart before the host drains
    /// the queue leaves a single pending frame.
    pub fn take_frame_request(&mut self) -> Option<FrameId> {
        self.frame_request.take()
    }

    pub fn drain_clock_commands(&mut self) -> Vec<ClockCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Clocks started and not yet cancelled
    pub fn running_clocks(&self) -> &[ClockId] {
        &self.running
    }
}

impl Scheduler for TaskQueue {
    fn request_frame(&mut self, id: FrameId) {
        self.frame_request = Some(id);
    }

    fn start_clock(&mut self, id: ClockId, period_ms: u32) {
        self.running.push(id);
        self.commands.push(ClockCommand::Start { id, period_ms });
    }

    fn cancel_clock(&mut self, id: ClockId) {
        if let Some(index) = self.running.iter().position(|running| *running == id) {
            self.running.remove(index);
            self.commands.push(ClockCommand::Cancel(id));
        }
    }
}
