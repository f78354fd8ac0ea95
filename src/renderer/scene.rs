//! Scene drawing: road, bike, papers and customers

use glam::Vec2;

use super::DrawSurface;
use super::vertex::colors;
use crate::sim::{SessionState, Target};

const ROAD_HEIGHT: f32 = 50.0;
const ROAD_LINE_SPACING: f32 = 30.0;
const ROAD_LINE_SIZE: Vec2 = Vec2::new(15.0, 4.0);

/// Redraw the whole playfield for one frame
pub fn draw_scene(surface: &mut dyn DrawSurface, state: &SessionState) {
    let size = state.playfield.size();
    let mid_y = size.y / 2.0;

    surface.fill_rect(Vec2::ZERO, size, colors::BACKGROUND);
    surface.fill_rect(
        Vec2::new(0.0, mid_y - ROAD_HEIGHT / 2.0),
        Vec2::new(size.x, ROAD_HEIGHT),
        colors::ROAD,
    );
    let mut x = 0.0;
    while x < size.x {
        surface.fill_rect(
            Vec2::new(x, mid_y - ROAD_LINE_SIZE.y / 2.0),
            ROAD_LINE_SIZE,
            colors::ROAD_LINE,
        );
        x += ROAD_LINE_SPACING;
    }

    draw_bike(surface, state.actor.pos);

    for projectile in &state.projectiles {
        surface.fill_rect(projectile.pos, crate::sim::Projectile::SIZE, colors::PAPER);
    }

    for target in &state.targets {
        draw_customer(surface, target);
    }
}

fn draw_bike(surface: &mut dyn DrawSurface, pos: Vec2) {
    let at = |dx: f32, dy: f32| pos + Vec2::new(dx, dy);

    surface.fill_rect(pos, Vec2::new(40.0, 20.0), colors::BIKE);
    // Seat post and handlebar
    surface.fill_rect(at(30.0, -10.0), Vec2::new(5.0, 10.0), colors::BIKE_FRAME);
    surface.fill_rect(at(10.0, -15.0), Vec2::new(20.0, 15.0), colors::BIKE_FRAME);
    // Rider
    surface.fill_rect(at(15.0, -30.0), Vec2::new(10.0, 15.0), colors::RIDER);
    surface.fill_circle(at(20.0, -35.0), 5.0, colors::RIDER_HEAD);
}

fn draw_customer(surface: &mut dyn DrawSurface, target: &Target) {
    let at = |dx: f32, dy: f32| target.pos + Vec2::new(dx, dy);

    if target.hit {
        surface.fill_rect(target.pos, target.size, colors::CUSTOMER_HAPPY);
        surface.fill_rect(at(5.0, 25.0), Vec2::new(10.0, 2.0), colors::SMILE);
    } else {
        surface.fill_rect(target.pos, target.size, colors::CUSTOMER_WAITING);
        // Raised hand
        surface.fill_rect(at(15.0, -10.0), Vec2::new(5.0, 10.0), colors::CUSTOMER_WAITING);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, DrawList};
    use crate::sim::{Playfield, Projectile};
    use crate::tuning::{Difficulty, DifficultyTable};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn session() -> SessionState {
        let profile = DifficultyTable::default().profile(Difficulty::Easy);
        let mut rng = Pcg32::seed_from_u64(9);
        SessionState::new(Difficulty::Easy, profile, Playfield::new(600, 400).unwrap(), &mut rng)
    }

    fn rects_with(list: &DrawList, color: [f32; 4]) -> Vec<(Vec2, Vec2)> {
        list.commands()
            .iter()
            .filter_map(|c| match *c {
                DrawCommand::Rect { pos, size, color: fill } if fill == color => Some((pos, size)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_background_drawn_first() {
        let state = session();
        let mut list = DrawList::new();
        draw_scene(&mut list, &state);

        assert_eq!(
            list.commands()[0],
            DrawCommand::Rect {
                pos: Vec2::ZERO,
                size: Vec2::new(600.0, 400.0),
                color: colors::BACKGROUND
            }
        );
        // 600 / 30 road dashes
        assert_eq!(rects_with(&list, colors::ROAD_LINE).len(), 20);
    }

    #[test]
    fn test_papers_and_bike_follow_state() {
        let mut state = session();
        state.projectiles.push(Projectile {
            pos: Vec2::new(120.0, 80.0),
        });
        let mut list = DrawList::new();
        draw_scene(&mut list, &state);

        assert_eq!(
            rects_with(&list, colors::PAPER),
            vec![(Vec2::new(120.0, 80.0), Vec2::new(8.0, 10.0))]
        );
        assert_eq!(
            rects_with(&list, colors::BIKE),
            vec![(state.actor.pos, Vec2::new(40.0, 20.0))]
        );
    }

    #[test]
    fn test_hit_customers_change_color() {
        let mut state = session();
        state.targets[0].hit = true;
        let mut list = DrawList::new();
        draw_scene(&mut list, &state);

        let happy = rects_with(&list, colors::CUSTOMER_HAPPY);
        assert_eq!(happy, vec![(state.targets[0].pos, state.targets[0].size)]);
        // Each waiting customer is a body plus a raised hand
        assert_eq!(rects_with(&list, colors::CUSTOMER_WAITING).len(), 2 * 4);
        assert_eq!(rects_with(&list, colors::SMILE).len(), 1);
    }
}
