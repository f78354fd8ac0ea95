//! Per-frame update and player input
//!
//! Order within a step: actor moves, then projectiles are resolved. Drawing
//! happens afterwards in the renderer.

use glam::Vec2;

use super::collision::{StepOutcome, resolve_projectiles};
use super::state::{MoveDirection, Playfield, Projectile, SessionEvent, SessionState};
use crate::consts::*;

/// Advance the session by one frame step
pub fn advance(state: &mut SessionState) -> StepOutcome {
    if !state.active {
        return StepOutcome::default();
    }

    // Auto-scroll, lapping back to the left edge
    let width = state.playfield.width as f32;
    state.actor.pos.x += state.profile.speed;
    if state.actor.pos.x > width {
        state.actor.pos.x = 0.0;
    }

    let outcome = resolve_projectiles(
        &mut state.projectiles,
        &mut state.targets,
        PROJECTILE_STEP,
        width,
    );

    let delta = outcome.score_delta();
    if delta > 0 {
        state.score += delta;
        state.events.push(SessionEvent::ScoreChanged(state.score));
        log::debug!(
            "Delivered to {:?}, score {} ({} of {} customers)",
            outcome.hits,
            state.score,
            state.hits(),
            state.targets.len()
        );
    }

    outcome
}

/// Throw a paper from just ahead of the bike
///
/// Returns false (and changes nothing) when the session is over or out of papers.
pub fn throw(state: &mut SessionState) -> bool {
    if !state.active || state.ammunition == 0 {
        return false;
    }

    state.projectiles.push(Projectile {
        pos: state.actor.pos + Vec2::new(THROW_OFFSET_X, 0.0),
    });
    state.ammunition -= 1;
    state.events.push(SessionEvent::AmmunitionChanged(state.ammunition));
    true
}

/// Move the bike one step up or down, clamped to the road bounds
pub fn move_actor(state: &mut SessionState, direction: MoveDirection) -> bool {
    if !state.active {
        return false;
    }

    let (min_y, max_y) = state.playfield.actor_y_bounds();
    let y = match direction {
        MoveDirection::Up => (state.actor.pos.y - ACTOR_MOVE_STEP).max(min_y),
        MoveDirection::Down => (state.actor.pos.y + ACTOR_MOVE_STEP).min(max_y),
    };
    state.actor.pos.y = y;
    true
}

/// Track a new host viewport size; gameplay state is left alone
pub fn resize(state: &mut SessionState, playfield: Playfield) {
    state.playfield = playfield;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Target;
    use crate::tuning::{Difficulty, DifficultyTable};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn session(difficulty: Difficulty) -> SessionState {
        let profile = DifficultyTable::default().profile(difficulty);
        let mut rng = Pcg32::seed_from_u64(12345);
        SessionState::new(difficulty, profile, Playfield::new(800, 600).unwrap(), &mut rng)
    }

    #[test]
    fn test_actor_scrolls_by_profile_speed() {
        let mut state = session(Difficulty::Hard);
        advance(&mut state);
        assert_eq!(state.actor.pos.x, ACTOR_START_X + 4.0);
    }

    #[test]
    fn test_actor_wraps_past_right_edge() {
        let mut state = session(Difficulty::Easy);
        state.actor.pos.x = 799.0;
        advance(&mut state);
        // 801 > 800 wraps to the left edge
        assert_eq!(state.actor.pos.x, 0.0);

        state.actor.pos.x = 798.0;
        advance(&mut state);
        // Exactly at the edge is not past it
        assert_eq!(state.actor.pos.x, 800.0);
    }

    #[test]
    fn test_scoring_step() {
        let mut state = session(Difficulty::Easy);
        state.targets = vec![Target::new(Vec2::new(95.0, 290.0))];
        state.projectiles.push(Projectile {
            pos: Vec2::new(90.0, 300.0),
        });

        let outcome = advance(&mut state);

        assert_eq!(outcome.hits, vec![0]);
        assert!(state.targets[0].hit);
        assert_eq!(state.score, SCORE_PER_HIT);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.take_events(), vec![SessionEvent::ScoreChanged(10)]);
    }

    #[test]
    fn test_inactive_session_does_not_advance() {
        let mut state = session(Difficulty::Easy);
        state.active = false;
        state.projectiles.push(Projectile {
            pos: Vec2::new(100.0, 100.0),
        });
        let before = state.actor.pos;

        advance(&mut state);

        assert_eq!(state.actor.pos, before);
        assert_eq!(state.projectiles[0].pos.x, 100.0);
    }

    #[test]
    fn test_throw_spawns_ahead_of_actor() {
        let mut state = session(Difficulty::Easy);
        assert!(throw(&mut state));
        assert_eq!(state.ammunition, 14);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos, state.actor.pos + Vec2::new(40.0, 0.0));
        assert_eq!(state.take_events(), vec![SessionEvent::AmmunitionChanged(14)]);
    }

    #[test]
    fn test_throw_without_ammunition_is_noop() {
        let mut state = session(Difficulty::Easy);
        state.ammunition = 0;
        assert!(!throw(&mut state));
        assert_eq!(state.ammunition, 0);
        assert!(state.projectiles.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_throw_after_end_is_noop() {
        let mut state = session(Difficulty::Easy);
        state.active = false;
        assert!(!throw(&mut state));
        assert_eq!(state.ammunition, 15);
    }

    #[test]
    fn test_move_clamps_to_bounds() {
        let mut state = session(Difficulty::Easy);
        for _ in 0..100 {
            move_actor(&mut state, MoveDirection::Up);
        }
        assert_eq!(state.actor.pos.y, 50.0);
        for _ in 0..100 {
            move_actor(&mut state, MoveDirection::Down);
        }
        assert_eq!(state.actor.pos.y, 550.0);

        move_actor(&mut state, MoveDirection::Up);
        assert_eq!(state.actor.pos.y, 530.0);
    }

    #[test]
    fn test_move_ignored_when_inactive() {
        let mut state = session(Difficulty::Easy);
        state.active = false;
        assert!(!move_actor(&mut state, MoveDirection::Up));
        assert_eq!(state.actor.pos.y, 300.0);
    }

    #[test]
    fn test_resize_keeps_session() {
        let mut state = session(Difficulty::Easy);
        throw(&mut state);
        let targets = state.targets.clone();

        resize(&mut state, Playfield::new(1024, 300).unwrap());

        assert_eq!(state.playfield.width, 1024);
        assert_eq!(state.targets, targets);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.ammunition, 14);

        // New bounds apply to the next move
        move_actor(&mut state, MoveDirection::Down);
        assert_eq!(state.actor.pos.y, 250.0);
    }

    #[derive(Debug, Clone)]
    enum Input {
        Throw,
        Move(MoveDirection),
        Step,
    }

    fn arb_input() -> impl Strategy<Value = Input> {
        prop_oneof![
            Just(Input::Throw),
            Just(Input::Move(MoveDirection::Up)),
            Just(Input::Move(MoveDirection::Down)),
            Just(Input::Step),
        ]
    }

    proptest! {
        #[test]
        fn prop_ammunition_never_increases(inputs in prop::collection::vec(arb_input(), 0..200)) {
            let mut state = session(Difficulty::Hard);
            let mut last_ammunition = state.ammunition;
            let mut last_score = state.score;
            let mut last_hits = state.hits();

            for input in inputs {
                match input {
                    Input::Throw => { throw(&mut state); }
                    Input::Move(direction) => { move_actor(&mut state, direction); }
                    Input::Step => { advance(&mut state); }
                }
                prop_assert!(state.ammunition <= last_ammunition);
                // Score moves only in lockstep with newly hit targets
                let hits = state.hits();
                prop_assert!(hits >= last_hits);
                prop_assert_eq!(state.score - last_score, (hits - last_hits) as u32 * SCORE_PER_HIT);
                let (min_y, max_y) = state.playfield.actor_y_bounds();
                prop_assert!(state.actor.pos.y >= min_y && state.actor.pos.y <= max_y);
                prop_assert!(state.actor.pos.x >= 0.0 && state.actor.pos.x <= 800.0);

                last_ammunition = state.ammunition;
                last_score = state.score;
                last_hits = hits;
            }
        }
    }
}
