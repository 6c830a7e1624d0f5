//! Axonometric projection from world space to screen space
//!
//! World axes: x runs forward (direction of travel), y runs sideways, z up.
//! With the negative view angle, increasing x moves up and to the right on
//! screen, which reads as "forward" for a chase camera.

use glam::{Vec2, Vec3};

use crate::consts::VIEW_ANGLE;

/// Project a world point onto the screen
#[inline]
pub fn project(x: f32, y: f32, z: f32, origin_x: f32, origin_y: f32, scale: f32) -> Vec2 {
    let iso_x = (x - y) * VIEW_ANGLE.cos();
    let iso_y = (x + y) * VIEW_ANGLE.sin() - z;
    Vec2::new(origin_x + iso_x * scale, origin_y + iso_y * scale)
}

/// Screen origin and zoom shared by every draw call of a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    /// Screen position of the world point (cam_x, 0, 0)
    pub origin: Vec2,
    /// Pixels per world unit
    pub scale: f32,
}

impl View {
    pub fn new(origin: Vec2, scale: f32) -> Self {
        Self { origin, scale }
    }

    #[inline]
    pub fn project(&self, p: Vec3) -> Vec2 {
        project(p.x, p.y, p.z, self.origin.x, self.origin.y, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_maps_to_origin() {
        let p = project(0.0, 0.0, 0.0, 120.0, 80.0, 4.0);
        assert_eq!(p, Vec2::new(120.0, 80.0));
    }

    #[test]
    fn test_forward_is_up_right() {
        let base = project(0.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        let ahead = project(10.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        assert!(ahead.x > base.x);
        assert!(ahead.y < base.y);
    }

    #[test]
    fn test_height_moves_straight_up() {
        let ground = project(3.0, 2.0, 0.0, 0.0, 0.0, 2.0);
        let raised = project(3.0, 2.0, 5.0, 0.0, 0.0, 2.0);
        assert!((ground.x - raised.x).abs() < 1e-5);
        assert!((ground.y - raised.y - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_known_value() {
        // cos(-30°) = 0.866.., sin(-30°) = -0.5
        let p = project(10.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        assert!((p.x - 8.660254).abs() < 1e-4);
        assert!((p.y + 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_view_matches_free_function() {
        let view = View::new(Vec2::new(50.0, 60.0), 4.0);
        let a = view.project(Vec3::new(1.0, -2.0, 3.0));
        let b = project(1.0, -2.0, 3.0, 50.0, 60.0, 4.0);
        assert_eq!(a, b);
    }
}
