//! Box ("voxel") rasterizer
//!
//! A box is drawn as three shaded quads. The camera sits at negative x/y
//! looking toward positive x/y with a downward tilt, so only the x = min face,
//! the y = min face and the top face can ever be visible. The far faces are
//! never emitted.

use glam::{Vec2, Vec3};

use super::color::Color;
use super::projection::View;
use super::surface::Surface;
use crate::Size3;

/// Shade applied to the x-facing side
pub const X_FACE_SHADE: i32 = -20;
/// Shade applied to the y-facing side
pub const Y_FACE_SHADE: i32 = -10;
pub const TOP_FACE_SHADE: i32 = 20;
pub const OUTLINE_SHADE: i32 = -30;
pub const OUTLINE_WIDTH: f32 = 1.0;

/// Height above which an object no longer casts a shadow
const SHADOW_FADE_HEIGHT: f32 = 80.0;
const SHADOW_MAX_OPACITY: f32 = 0.2;

/// Draw an axis-aligned box: x side, y side, then top
pub fn draw_box(surface: &mut impl Surface, pos: Vec3, size: Size3, color: Color, view: &View) {
    let Vec3 { x, y, z } = pos;
    let Size3 { w, d, h } = size;

    let top_back = view.project(Vec3::new(x, y, z + h));
    let top_right = view.project(Vec3::new(x + w, y, z + h));
    let top_front = view.project(Vec3::new(x + w, y + d, z + h));
    let top_left = view.project(Vec3::new(x, y + d, z + h));

    // (x, y, z) is the corner closest to the camera; (x+w, y+d, z) is hidden
    let bot_back = view.project(pos);
    let bot_right = view.project(Vec3::new(x + w, y, z));
    let bot_left = view.project(Vec3::new(x, y + d, z));

    let outline = color.shade(OUTLINE_SHADE);

    let x_face = [bot_back, bot_left, top_left, top_back];
    paint_face(surface, &x_face, color.shade(X_FACE_SHADE), outline);

    let y_face = [bot_back, bot_right, top_right, top_back];
    paint_face(surface, &y_face, color.shade(Y_FACE_SHADE), outline);

    let top_face = [top_back, top_right, top_front, top_left];
    paint_face(surface, &top_face, color.shade(TOP_FACE_SHADE), outline);
}

fn paint_face(surface: &mut impl Surface, quad: &[Vec2; 4], fill: Color, outline: Color) {
    surface.fill_polygon(quad, fill);
    surface.stroke_polygon(quad, outline, OUTLINE_WIDTH);
}

/// Draw a flat, unshaded quad lying in the plane z = pos.z
pub fn draw_flat_tile(surface: &mut impl Surface, pos: Vec3, size: Size3, color: Color, view: &View) {
    let Vec3 { x, y, z } = pos;
    let quad = [
        view.project(Vec3::new(x, y, z)),
        view.project(Vec3::new(x + size.w, y, z)),
        view.project(Vec3::new(x + size.w, y + size.d, z)),
        view.project(Vec3::new(x, y + size.d, z)),
    ];
    surface.fill_polygon(&quad, color);
}

/// Draw a soft ground shadow under a box, fading out with height
pub fn draw_shadow(surface: &mut impl Surface, pos: Vec3, size: Size3, view: &View) {
    let height_factor = (1.0 - pos.z / SHADOW_FADE_HEIGHT).max(0.0);
    if height_factor <= 0.0 {
        return;
    }

    let center = view.project(Vec3::new(pos.x + size.w / 2.0, pos.y + size.d / 2.0, 0.0));
    let half_w = size.w * view.scale / 2.0;
    let half_d = size.d * view.scale / 2.0;

    // Skew for a diagonal light source
    let skew = |u: f32, v: f32| Vec2::new(center.x + u - 0.5 * v, center.y + 0.5 * u + 0.5 * v);
    let quad = [
        skew(-half_w, -half_d),
        skew(half_w, -half_d),
        skew(half_w, half_d),
        skew(-half_w, half_d),
    ];

    let color = Color::BLACK.with_opacity(SHADOW_MAX_OPACITY * height_factor);
    surface.fill_polygon(&quad, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::recording::{DrawCall, RecordingSurface};

    fn view() -> View {
        View::new(Vec2::new(100.0, 100.0), 4.0)
    }

    #[test]
    fn test_face_order_and_shades() {
        let mut surface = RecordingSurface::default();
        let color = Color::from_hex("#166534").unwrap();
        draw_box(&mut surface, Vec3::ZERO, Size3::new(8.0, 4.0, 15.0), color, &view());

        assert_eq!(
            surface.fill_colors(),
            vec![color.shade(-20), color.shade(-10), color.shade(20)]
        );
        // fill, stroke, fill, stroke, fill, stroke
        assert_eq!(surface.calls.len(), 6);
        for call in surface.calls.iter().skip(1).step_by(2) {
            match call {
                DrawCall::Stroke { color: c, .. } => assert_eq!(*c, color.shade(-30)),
                other => panic!("expected stroke, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_top_face_is_last_fill() {
        let mut surface = RecordingSurface::default();
        let pos = Vec3::new(2.0, 1.0, 0.0);
        let size = Size3::new(3.0, 3.0, 3.0);
        draw_box(&mut surface, pos, size, Color::rgb(100, 100, 100), &view());

        let last_fill = surface
            .calls
            .iter()
            .rev()
            .find_map(|c| match c {
                DrawCall::Fill { points, .. } => Some(points.clone()),
                _ => None,
            })
            .unwrap();
        let expected_corner = view().project(Vec3::new(2.0, 1.0, 3.0));
        assert_eq!(last_fill[0], expected_corner);
    }

    #[test]
    fn test_shadow_fades_with_height() {
        let mut low = RecordingSurface::default();
        let mut high = RecordingSurface::default();
        let mut gone = RecordingSurface::default();
        let size = Size3::new(10.0, 6.0, 10.0);
        draw_shadow(&mut low, Vec3::ZERO, size, &view());
        draw_shadow(&mut high, Vec3::new(0.0, 0.0, 40.0), size, &view());
        draw_shadow(&mut gone, Vec3::new(0.0, 0.0, 90.0), size, &view());

        let alpha = |s: &RecordingSurface| s.fill_colors()[0].a;
        assert!(alpha(&low) > alpha(&high));
        assert!(gone.calls.is_empty());
    }

    #[test]
    fn test_flat_tile_keeps_color() {
        let mut surface = RecordingSurface::default();
        let color = Color::rgba(0xbf, 0xa0, 0x75, 0x44);
        draw_flat_tile(&mut surface, Vec3::ZERO, Size3::new(20.0, 2.0, 0.2), color, &view());
        assert_eq!(surface.fill_colors(), vec![color]);
    }
}
