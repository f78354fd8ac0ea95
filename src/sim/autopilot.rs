//! Demo mode player
//!
//! Steers the bike toward the nearest waiting customer ahead and throws once
//! a paper would line up with them. Used by the headless native runner.

use super::collision::aabb_overlap;
use super::state::{MoveDirection, Projectile, SessionState};
use crate::consts::*;

/// Inputs chosen for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutopilotInput {
    pub move_dir: Option<MoveDirection>,
    pub throw: bool,
}

pub fn plan(state: &SessionState) -> AutopilotInput {
    if !state.active {
        return AutopilotInput::default();
    }

    let spawn = state.actor.pos.x + THROW_OFFSET_X;
    let Some(target) = state
        .targets
        .iter()
        .filter(|t| !t.hit && t.pos.x + t.size.x > spawn)
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
    else {
        return AutopilotInput::default();
    };

    // Paper travels horizontally, so only the vertical band matters
    let lined_up = |y: f32| {
        aabb_overlap(
            glam::Vec2::new(target.pos.x, y),
            Projectile::SIZE,
            target.pos,
            target.size,
        )
    };

    if lined_up(state.actor.pos.y) {
        // One paper in flight per customer
        let in_flight = state
            .projectiles
            .iter()
            .any(|p| p.pos.x < target.pos.x && lined_up(p.pos.y));
        return AutopilotInput {
            move_dir: None,
            throw: !in_flight && state.ammunition > 0,
        };
    }

    let aim_y = target.pos.y + (target.size.y - PROJECTILE_HEIGHT) / 2.0;
    let move_dir = if state.actor.pos.y > aim_y {
        MoveDirection::Up
    } else {
        MoveDirection::Down
    };
    AutopilotInput {
        move_dir: Some(move_dir),
        throw: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Playfield, Target};
    use crate::sim::tick::{advance, move_actor, throw};
    use crate::tuning::{Difficulty, DifficultyTable};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn session_with(targets: Vec<Target>) -> SessionState {
        let profile = DifficultyTable::default().profile(Difficulty::Easy);
        let mut rng = Pcg32::seed_from_u64(5);
        let mut state =
            SessionState::new(Difficulty::Easy, profile, Playfield::new(800, 600).unwrap(), &mut rng);
        state.targets = targets;
        state
    }

    #[test]
    fn test_steers_toward_target() {
        let state = session_with(vec![Target::new(Vec2::new(400.0, 100.0))]);
        let input = plan(&state);
        assert_eq!(input.move_dir, Some(MoveDirection::Up));
        assert!(!input.throw);
    }

    #[test]
    fn test_throws_when_lined_up() {
        let state = session_with(vec![Target::new(Vec2::new(400.0, 290.0))]);
        let input = plan(&state);
        assert_eq!(input.move_dir, None);
        assert!(input.throw);
    }

    #[test]
    fn test_holds_fire_while_paper_in_flight() {
        let mut state = session_with(vec![Target::new(Vec2::new(400.0, 290.0))]);
        throw(&mut state);
        assert!(!plan(&state).throw);
    }

    #[test]
    fn test_delivers_every_customer() {
        let mut state = session_with(vec![
            Target::new(Vec2::new(300.0, 100.0)),
            Target::new(Vec2::new(500.0, 450.0)),
            Target::new(Vec2::new(700.0, 250.0)),
        ]);

        for _ in 0..2000 {
            let input = plan(&state);
            if let Some(direction) = input.move_dir {
                move_actor(&mut state, direction);
            }
            if input.throw {
                throw(&mut state);
            }
            advance(&mut state);
        }

        assert_eq!(state.hits(), 3);
        assert_eq!(state.score, 30);
    }
}
