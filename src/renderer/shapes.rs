//! Triangle generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Triangulate a convex polygon as a fan around its first point
pub fn convex_fan(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    let pivot = points[0];
    for pair in points[1..].windows(2) {
        vertices.push(Vertex::new(pivot.x, pivot.y, color));
        vertices.push(Vertex::new(pair[0].x, pair[0].y, color));
        vertices.push(Vertex::new(pair[1].x, pair[1].y, color));
    }

    vertices
}

/// Generate quads along every edge of a closed polygon
pub fn closed_outline(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let half = width * 0.5;
    let mut vertices = Vec::with_capacity(points.len() * 6);

    for i in 0..points.len() {
        let p1 = points[i];
        let p2 = points[(i + 1) % points.len()];

        // Perpendicular for width
        let dir = (p2 - p1).normalize_or_zero();
        if dir == Vec2::ZERO {
            continue;
        }
        let perp = Vec2::new(-dir.y, dir.x) * half;

        // Extend along the edge so corners overlap instead of notching
        let a = p1 - dir * half;
        let b = p2 + dir * half;

        let v1a = a + perp;
        let v1b = a - perp;
        let v2a = b + perp;
        let v2b = b - perp;

        // Two triangles
        vertices.push(Vertex::new(v1a.x, v1a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2a.x, v2a.y, color));

        vertices.push(Vertex::new(v2a.x, v2a.y, color));
        vertices.push(Vertex::new(v1b.x, v1b.y, color));
        vertices.push(Vertex::new(v2b.x, v2b.y, color));
    }

    vertices
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

/// Axis-aligned rectangle whose color blends from top to bottom
pub fn gradient_rect(origin: Vec2, size: Vec2, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (origin.x, origin.y);
    let (x1, y1) = (origin.x + size.x, origin.y + size.y);
    vec![
        Vertex::new(x0, y0, top),
        Vertex::new(x1, y0, top),
        Vertex::new(x0, y1, bottom),
        Vertex::new(x0, y1, bottom),
        Vertex::new(x1, y0, top),
        Vertex::new(x1, y1, bottom),
    ]
}

/// Segment count for a circle of the given pixel radius
pub fn circle_segments(radius: f32) -> u32 {
    ((radius * 0.5) as u32).clamp(8, 48)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_fan_triangle_count() {
        let quad = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        assert_eq!(convex_fan(&quad, RED).len(), 6);
        assert!(convex_fan(&quad[..2], RED).is_empty());
    }

    #[test]
    fn test_outline_skips_degenerate_edges() {
        let points = [Vec2::ZERO, Vec2::ZERO, Vec2::new(4.0, 0.0)];
        // zero-length edge dropped, two real edges remain
        assert_eq!(closed_outline(&points, 1.0, RED).len(), 12);
    }

    #[test]
    fn test_circle_vertices() {
        let verts = circle(Vec2::new(5.0, 5.0), 2.0, RED, 12);
        assert_eq!(verts.len(), 36);
        for v in verts {
            let d = Vec2::from(v.position) - Vec2::new(5.0, 5.0);
            assert!(d.length() <= 2.0 + 1e-4);
        }
    }

    #[test]
    fn test_gradient_colors() {
        let top = [0.0, 0.0, 1.0, 1.0];
        let verts = gradient_rect(Vec2::ZERO, Vec2::new(10.0, 10.0), top, RED);
        for v in verts {
            if v.position[1] == 0.0 {
                assert_eq!(v.color, top);
            } else {
                assert_eq!(v.color, RED);
            }
        }
    }
}
