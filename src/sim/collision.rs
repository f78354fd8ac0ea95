//! Projectile movement, hit detection and scoring
//!
//! Everything is axis-aligned rectangles; overlap uses strict bounds so
//! touching edges do not count.

use glam::Vec2;

use super::state::{Projectile, Target};
use crate::consts::SCORE_PER_HIT;

/// Strict AABB overlap test
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}

impl Projectile {
    pub fn overlaps(&self, target: &Target) -> bool {
        aabb_overlap(self.pos, Projectile::SIZE, target.pos, target.size)
    }
}

/// What one collision pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Indices of targets hit this step, in the order they were hit
    pub hits: Vec<usize>,
    /// Projectiles removed for leaving the right edge
    pub despawned: usize,
}

impl StepOutcome {
    pub fn score_delta(&self) -> u32 {
        self.hits.len() as u32 * SCORE_PER_HIT
    }
}

/// Advance every projectile and resolve hits
///
/// Each projectile moves right by `displacement`, then is checked against
/// unhit targets in index order. The first overlap marks that target hit and
/// consumes the projectile. A projectile that hit nothing and is now past
/// `playfield_width` is dropped. Survivors keep their relative order.
pub fn resolve_projectiles(
    projectiles: &mut Vec<Projectile>,
    targets: &mut [Target],
    displacement: f32,
    playfield_width: f32,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    projectiles.retain_mut(|projectile| {
        projectile.pos.x += displacement;

        if let Some(index) = targets
            .iter()
            .position(|target| !target.hit && projectile.overlaps(target))
        {
            targets[index].hit = true;
            outcome.hits.push(index);
            return false;
        }

        if projectile.pos.x > playfield_width {
            outcome.despawned += 1;
            return false;
        }

        true
    });

    outcome
}
