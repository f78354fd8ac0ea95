//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use super::{DrawCommand, DrawList};

/// Segments used for small circles (rider's head)
pub const CIRCLE_SEGMENTS: u32 = 16;

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);
    [
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Triangle list for a whole frame, painter's order preserved
pub fn tessellate(list: &DrawList) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(list.len() * 6);
    for command in list.commands() {
        match *command {
            DrawCommand::Rect { pos, size, color } => {
                vertices.extend_from_slice(&rect(pos, size, color));
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => {
                vertices.extend(circle(center, radius, color, CIRCLE_SEGMENTS));
            }
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawSurface;

    #[test]
    fn test_rect_corners() {
        let vertices = rect(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), [1.0; 4]);
        let xs: Vec<f32> = vertices.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let center = Vec2::new(5.0, 5.0);
        for v in circle(center, 3.0, [1.0; 4], 12) {
            let d = Vec2::from(v.position).distance(center);
            assert!(d <= 3.0 + 1e-4);
        }
    }

    #[test]
    fn test_tessellate_preserves_order() {
        let mut list = DrawList::new();
        list.fill_rect(Vec2::ZERO, Vec2::ONE, [1.0, 0.0, 0.0, 1.0]);
        list.fill_circle(Vec2::ONE, 1.0, [0.0, 1.0, 0.0, 1.0]);
        list.fill_rect(Vec2::ZERO, Vec2::ONE, [0.0, 0.0, 1.0, 1.0]);

        let vertices = tessellate(&list);
        let circle_len = (CIRCLE_SEGMENTS * 3) as usize;
        assert_eq!(vertices.len(), 6 + circle_len + 6);
        assert_eq!(vertices[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(vertices[6].color, [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(vertices[6 + circle_len].color, [0.0, 0.0, 1.0, 1.0]);
    }
}
