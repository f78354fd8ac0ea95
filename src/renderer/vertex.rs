//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub const BACKGROUND: [f32; 4] = rgb(0x0d, 0x11, 0x17);
    pub const ROAD: [f32; 4] = rgb(0x33, 0x33, 0x33);
    pub const ROAD_LINE: [f32; 4] = rgb(0xff, 0xcc, 0x00);
    pub const BIKE: [f32; 4] = rgb(0xcc, 0x00, 0x00);
    pub const BIKE_FRAME: [f32; 4] = rgb(0x33, 0x33, 0x33);
    pub const RIDER: [f32; 4] = rgb(0x00, 0x00, 0xff);
    pub const RIDER_HEAD: [f32; 4] = rgb(0xff, 0xff, 0x00);
    pub const PAPER: [f32; 4] = rgb(0xff, 0xff, 0xff);
    pub const CUSTOMER_WAITING: [f32; 4] = rgb(0xff, 0x00, 0xff);
    pub const CUSTOMER_HAPPY: [f32; 4] = rgb(0x00, 0xff, 0x00);
    pub const SMILE: [f32; 4] = rgb(0x00, 0x00, 0x00);
}
