//! Drawing surface abstraction
//!
//! The rasterizer and compositor only ever talk to a `Surface`. Polygons are
//! always convex (box faces, flat tiles, shadows, landscape strips), so an
//! implementation may triangulate them as a fan.

use glam::Vec2;

use super::color::Color;

/// A 2D raster target in pixel coordinates (origin top-left, y down)
pub trait Surface {
    /// Fill a convex polygon
    fn fill_polygon(&mut self, points: &[Vec2], color: Color);

    /// Outline a closed polygon
    fn stroke_polygon(&mut self, points: &[Vec2], color: Color, line_width: f32);

    /// Fill a disc
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Fill an axis-aligned rectangle with a top-to-bottom gradient
    fn fill_vertical_gradient(&mut self, origin: Vec2, size: Vec2, top: Color, bottom: Color);

    /// Fill an axis-aligned rectangle
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        let corners = [
            origin,
            Vec2::new(origin.x + size.x, origin.y),
            origin + size,
            Vec2::new(origin.x, origin.y + size.y),
        ];
        self.fill_polygon(&corners, color);
    }
}

/// Recording surface for renderer tests
#[cfg(test)]
pub(crate) mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Fill { points: Vec<Vec2>, color: Color },
        Stroke { points: Vec<Vec2>, color: Color },
        Circle { center: Vec2, radius: f32, color: Color },
        Gradient { top: Color, bottom: Color },
    }

    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<DrawCall>,
    }

    impl RecordingSurface {
        /// Fill colors in paint order
        pub fn fill_colors(&self) -> Vec<Color> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    DrawCall::Fill { color, .. } => Some(*color),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
            self.calls.push(DrawCall::Fill {
                points: points.to_vec(),
                color,
            });
        }

        fn stroke_polygon(&mut self, points: &[Vec2], color: Color, _line_width: f32) {
            self.calls.push(DrawCall::Stroke {
                points: points.to_vec(),
                color,
            });
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
            self.calls.push(DrawCall::Circle {
                center,
                radius,
                color,
            });
        }

        fn fill_vertical_gradient(&mut self, _origin: Vec2, _size: Vec2, top: Color, bottom: Color) {
            self.calls.push(DrawCall::Gradient { top, bottom });
        }
    }
}
