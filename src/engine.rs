//! Session lifecycle, frame loop and clock wiring
//!
//! `Engine` owns the single session slot. The host forwards input and the
//! scheduler's callbacks; the engine keeps the frame loop and the clock in
//! step with the session's active flag.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::CLOCK_PERIOD_MS;
use crate::error::SessionError;
use crate::renderer::{DrawSurface, draw_scene};
use crate::results::ResultsStore;
use crate::schedule::{FrameId, Scheduler};
use crate::sim::{
    self, ClockId, ClockTick, FinalResult, GameClock, MoveDirection, Playfield, SessionEvent,
    SessionState,
};
use crate::tuning::DifficultyTable;

const NO_SESSION: SessionError = SessionError::InvalidState("no session has been started");

pub struct Engine<S: Scheduler, R: ResultsStore> {
    table: DifficultyTable,
    scheduler: S,
    results: R,
    rng: Pcg32,
    session: Option<SessionState>,
    clock: Option<GameClock>,
    clocks_started: u64,
    /// Continuation flag of the live frame loop
    frame_loop: Option<FrameId>,
    loops_started: u64,
}

impl<S: Scheduler, R: ResultsStore> Engine<S, R> {
    pub fn new(seed: u64, scheduler: S, results: R) -> Self {
        Self {
            table: DifficultyTable::default(),
            scheduler,
            results,
            rng: Pcg32::seed_from_u64(seed),
            session: None,
            clock: None,
            clocks_started: 0,
            frame_loop: None,
            loops_started: 0,
        }
    }

    /// Replace the built-in difficulty table
    pub fn with_table(mut self, table: DifficultyTable) -> Self {
        self.table = table;
        self
    }

    pub fn table(&self) -> &DifficultyTable {
        &self.table
    }

    pub fn session(&self) -> Option<&SessionState> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.active)
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn results(&self) -> &R {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut R {
        &mut self.results
    }

    /// Begin a new session, stopping any session still running
    ///
    /// An unknown difficulty fails before the current session is touched.
    pub fn start_session(
        &mut self,
        difficulty_id: &str,
        width: u32,
        height: u32,
    ) -> Result<&SessionState, SessionError> {
        let (difficulty, profile) = self.table.lookup(difficulty_id)?;
        let playfield = Playfield::new(width, height)?;

        if self.stop() {
            log::info!("Previous session abandoned for restart");
        }

        let state = SessionState::new(difficulty, profile, playfield, &mut self.rng);

        self.clocks_started += 1;
        let clock_id = ClockId(self.clocks_started);
        self.scheduler.start_clock(clock_id, CLOCK_PERIOD_MS);
        self.clock = Some(GameClock::new(clock_id));

        self.loops_started += 1;
        let frame_id = FrameId(self.loops_started);
        self.frame_loop = Some(frame_id);
        self.scheduler.request_frame(frame_id);

        log::info!(
            "Session started: {} on {}x{}, {} customers, {} papers, {}s",
            difficulty,
            width,
            height,
            state.targets.len(),
            state.ammunition,
            state.time_remaining
        );

        Ok(self.session.insert(state))
    }

    /// End the current session and report its result
    ///
    /// Only the first call per session succeeds; later calls are
    /// `InvalidState` and record nothing.
    pub fn end_session(&mut self) -> Result<FinalResult, SessionError> {
        let session = self.session.as_mut().ok_or(NO_SESSION)?;
        let result = session.finish()?;
        let (hits, customers) = (session.hits(), session.targets.len());

        self.cancel_clock();
        self.frame_loop = None;
        self.results.record(result);
        log::info!(
            "Session ended: {} points ({} of {} customers) on {}",
            result.score,
            hits,
            customers,
            result.difficulty
        );
        Ok(result)
    }

    /// Halt the clock and the frame loop without reporting a result
    ///
    /// Safe to call any number of times. Returns true if anything was running.
    pub fn stop(&mut self) -> bool {
        let clock_stopped = self.cancel_clock();
        let loop_stopped = self.frame_loop.take().is_some();
        let session_stopped = match self.session.as_mut() {
            Some(session) if session.active => {
                session.active = false;
                true
            }
            _ => false,
        };
        clock_stopped || loop_stopped || session_stopped
    }

    fn cancel_clock(&mut self) -> bool {
        let Some(clock) = self.clock.as_mut() else {
            return false;
        };
        if !clock.stop() {
            return false;
        }
        self.scheduler.cancel_clock(clock.id());
        true
    }

    /// Throw a paper. Ignored (Ok(false)) when out of papers or ended.
    pub fn throw(&mut self) -> Result<bool, SessionError> {
        let session = self.session.as_mut().ok_or(NO_SESSION)?;
        Ok(sim::throw(session))
    }

    /// Move the bike one step. Ignored (Ok(false)) once the session ended.
    pub fn move_actor(&mut self, direction: MoveDirection) -> Result<bool, SessionError> {
        let session = self.session.as_mut().ok_or(NO_SESSION)?;
        Ok(sim::move_actor(session, direction))
    }

    /// Host viewport changed; updates bounds only
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SessionError> {
        let playfield = Playfield::new(width, height)?;
        let session = self.session.as_mut().ok_or(NO_SESSION)?;
        sim::resize(session, playfield);
        log::debug!("Playfield resized to {}x{}", width, height);
        Ok(())
    }

    /// Animation frame callback
    ///
    /// Advances and redraws an active session, then asks for the next frame
    /// of the same loop. Returns false, without drawing or rescheduling, once
    /// the session is inactive or when `id` belongs to a loop that a stop or
    /// restart has cut off.
    pub fn on_frame(&mut self, id: FrameId, surface: &mut dyn DrawSurface) -> bool {
        if self.frame_loop != Some(id) {
            log::debug!("Dropping frame from stopped loop {:?}", id);
            return false;
        }
        let Some(session) = self.session.as_mut().filter(|s| s.active) else {
            self.frame_loop = None;
            return false;
        };

        sim::advance(session);
        draw_scene(surface, session);
        self.scheduler.request_frame(id);
        true
    }

    /// Clock callback, once per second
    ///
    /// Returns the final result when this tick ran the time out.
    pub fn on_clock_tick(&mut self, id: ClockId) -> Option<FinalResult> {
        let tick = match (self.clock.as_mut(), self.session.as_mut()) {
            (Some(clock), Some(session)) => clock.tick(id, session),
            _ => ClockTick::Stale,
        };

        match tick {
            ClockTick::Stale => {
                log::warn!("Ignoring tick from stale clock {:?}", id);
                self.scheduler.cancel_clock(id);
                None
            }
            ClockTick::Inert | ClockTick::Ticked(_) => None,
            ClockTick::Expired => {
                self.scheduler.cancel_clock(id);
                match self.end_session() {
                    Ok(result) => Some(result),
                    Err(e) => {
                        log::error!("Clock expired on a finished session: {}", e);
                        None
                    }
                }
            }
        }
    }

    /// HUD notifications since the last drain
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.session
            .as_mut()
            .map(SessionState::take_events)
            .unwrap_or_default()
    }
}
