//! Vertex types and the triangle batch surface

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::color::Color;
use super::shapes;
use super::surface::Surface;

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

/// A frame's worth of colored triangles in pixel space.
///
/// Painter's order is the push order: later triangles cover earlier ones.
#[derive(Debug, Default, Clone)]
pub struct VertexBatch {
    vertices: Vec<Vertex>,
}

impl VertexBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl Surface for VertexBatch {
    fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if color.a == 0 {
            return;
        }
        self.vertices
            .extend(shapes::convex_fan(points, color.to_f32_array()));
    }

    fn stroke_polygon(&mut self, points: &[Vec2], color: Color, line_width: f32) {
        if color.a == 0 || line_width <= 0.0 {
            return;
        }
        self.vertices
            .extend(shapes::closed_outline(points, line_width, color.to_f32_array()));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if color.a == 0 || radius <= 0.0 {
            return;
        }
        let segments = shapes::circle_segments(radius);
        self.vertices
            .extend(shapes::circle(center, radius, color.to_f32_array(), segments));
    }

    fn fill_vertical_gradient(&mut self, origin: Vec2, size: Vec2, top: Color, bottom: Color) {
        self.vertices.extend(shapes::gradient_rect(
            origin,
            size,
            top.to_f32_array(),
            bottom.to_f32_array(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_paint_order() {
        let mut batch = VertexBatch::new();
        let quad = [
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(0.0, 4.0),
        ];
        batch.fill_polygon(&quad, Color::rgb(255, 0, 0));
        batch.fill_polygon(&quad, Color::rgb(0, 0, 255));

        assert_eq!(batch.len(), 12);
        assert_eq!(batch.vertices()[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(batch.vertices()[11].color, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_transparent_fill_is_skipped() {
        let mut batch = VertexBatch::new();
        let tri = [Vec2::ZERO, Vec2::X, Vec2::Y];
        batch.fill_polygon(&tri, Color::rgba(10, 10, 10, 0));
        batch.fill_circle(Vec2::ZERO, 5.0, Color::rgba(10, 10, 10, 0));
        assert!(batch.is_empty());
    }

    #[test]
    fn test_vertex_is_pod() {
        let verts = [Vertex::new(1.0, 2.0, [0.5; 4])];
        let bytes: &[u8] = bytemuck::cast_slice(&verts);
        assert_eq!(bytes.len(), std::mem::size_of::<Vertex>());
    }
}
