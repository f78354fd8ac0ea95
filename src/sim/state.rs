//! Session state and core simulation types
//!
//! Everything one play session mutates lives in `SessionState`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SessionError;
use crate::tuning::{Difficulty, DifficultyProfile};

/// Playfield size in pixels, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: u32,
    pub height: u32,
}

impl Playfield {
    pub fn new(width: u32, height: u32) -> Result<Self, SessionError> {
        if width == 0 || height == 0 {
            return Err(SessionError::InvalidPlayfield { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Vertical range the actor may occupy
    pub fn actor_y_bounds(&self) -> (f32, f32) {
        let min = ACTOR_Y_MARGIN;
        let max = (self.height as f32 - ACTOR_Y_MARGIN).max(min);
        (min, max)
    }

    /// Inclusive ranges for a target's top-left corner
    fn target_spawn_bounds(&self) -> (Vec2, Vec2) {
        let min = Vec2::new(TARGET_MARGIN_LEFT, TARGET_MARGIN_EDGE);
        let max = self.size() - Vec2::splat(TARGET_MARGIN_EDGE) - Vec2::new(TARGET_WIDTH, TARGET_HEIGHT);
        (min, max.max(min))
    }
}

/// The delivery bike
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec2,
}

/// A thrown newspaper
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
}

impl Projectile {
    pub const SIZE: Vec2 = Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT);
}

/// A waiting customer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub pos: Vec2,
    pub size: Vec2,
    /// Delivered to; never reverts
    pub hit: bool,
}

impl Target {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::new(TARGET_WIDTH, TARGET_HEIGHT),
            hit: false,
        }
    }
}

/// Vertical move input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Outcome of a finished session, handed to the results store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalResult {
    pub score: u32,
    pub difficulty: Difficulty,
}

/// HUD notifications, drained by the host after each callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    TimeChanged(u32),
    ScoreChanged(u32),
    AmmunitionChanged(u32),
    Ended(FinalResult),
}

/// State of one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub difficulty: Difficulty,
    pub profile: DifficultyProfile,
    pub playfield: Playfield,
    pub actor: Actor,
    /// Live projectiles (order irrelevant)
    pub projectiles: Vec<Projectile>,
    /// Fixed for the whole session; only `hit` changes
    pub targets: Vec<Target>,
    pub score: u32,
    pub ammunition: u32,
    pub time_remaining: u32,
    pub lives: u32,
    pub active: bool,
    #[serde(skip)]
    pub events: Vec<SessionEvent>,
}

impl SessionState {
    /// Seed a fresh, active session from a profile
    pub fn new<R: Rng>(
        difficulty: Difficulty,
        profile: DifficultyProfile,
        playfield: Playfield,
        rng: &mut R,
    ) -> Self {
        let (min, max) = playfield.target_spawn_bounds();
        let targets = (0..profile.target_count)
            .map(|_| {
                Target::new(Vec2::new(
                    rng.random_range(min.x..=max.x),
                    rng.random_range(min.y..=max.y),
                ))
            })
            .collect();

        Self {
            difficulty,
            profile,
            playfield,
            actor: Actor {
                pos: Vec2::new(ACTOR_START_X, playfield.height as f32 / 2.0),
            },
            projectiles: Vec::new(),
            targets,
            score: 0,
            ammunition: profile.ammunition,
            time_remaining: profile.time_limit_secs,
            lives: profile.lives,
            active: true,
            events: Vec::new(),
        }
    }

    pub fn final_result(&self) -> FinalResult {
        FinalResult {
            score: self.score,
            difficulty: self.difficulty,
        }
    }

    /// Deactivate and produce the result; only the first call succeeds
    pub fn finish(&mut self) -> Result<FinalResult, SessionError> {
        if !self.active {
            return Err(SessionError::InvalidState("session already ended"));
        }
        self.active = false;
        let result = self.final_result();
        self.events.push(SessionEvent::Ended(result));
        Ok(result)
    }

    pub fn hits(&self) -> usize {
        self.targets.iter().filter(|t| t.hit).count()
    }

    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::DifficultyTable;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn easy_session(width: u32, height: u32, seed: u64) -> SessionState {
        let profile = DifficultyTable::default().profile(Difficulty::Easy);
        let mut rng = Pcg32::seed_from_u64(seed);
        SessionState::new(
            Difficulty::Easy,
            profile,
            Playfield::new(width, height).unwrap(),
            &mut rng,
        )
    }

    #[test]
    fn test_new_session_from_easy_profile() {
        let state = easy_session(800, 600, 7);
        assert!(state.active);
        assert_eq!(state.targets.len(), 5);
        assert!(state.targets.iter().all(|t| !t.hit));
        assert_eq!(state.ammunition, 15);
        assert_eq!(state.time_remaining, 60);
        assert_eq!(state.lives, 5);
        assert_eq!(state.score, 0);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.actor.pos, Vec2::new(50.0, 300.0));
    }

    #[test]
    fn test_targets_stay_inside_margins() {
        for seed in 0..50 {
            let state = easy_session(800, 600, seed);
            for target in &state.targets {
                assert!(target.pos.x >= TARGET_MARGIN_LEFT);
                assert!(target.pos.y >= TARGET_MARGIN_EDGE);
                assert!(target.pos.x + target.size.x <= 800.0 - TARGET_MARGIN_EDGE);
                assert!(target.pos.y + target.size.y <= 600.0 - TARGET_MARGIN_EDGE);
            }
        }
    }

    #[test]
    fn test_tiny_playfield_still_places_targets() {
        let state = easy_session(40, 30, 1);
        assert_eq!(state.targets.len(), 5);
        for target in &state.targets {
            assert_eq!(target.pos, Vec2::new(TARGET_MARGIN_LEFT, TARGET_MARGIN_EDGE));
        }
    }

    #[test]
    fn test_empty_playfield_rejected() {
        assert!(matches!(
            Playfield::new(0, 600),
            Err(SessionError::InvalidPlayfield { width: 0, height: 600 })
        ));
        assert!(matches!(
            Playfield::new(800, 0),
            Err(SessionError::InvalidPlayfield { .. })
        ));
    }

    #[test]
    fn test_finish_only_once() {
        let mut state = easy_session(800, 600, 3);
        state.score = 30;
        let result = state.finish().unwrap();
        assert_eq!(
            result,
            FinalResult {
                score: 30,
                difficulty: Difficulty::Easy
            }
        );
        assert!(!state.active);
        assert!(state.finish().unwrap_err().is_invalid_state());
        assert_eq!(state.take_events(), vec![SessionEvent::Ended(result)]);
    }
}
