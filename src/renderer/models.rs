//! Multi-box models for the player, obstacles and solid decorations
//!
//! Every drawer receives the camera-relative min corner and size of the
//! entity and paints its parts with [`draw_box`] in a fixed order.

use glam::Vec3;

use super::color::{Color, palette};
use super::projection::View;
use super::surface::Surface;
use super::voxel::draw_box;
use crate::Size3;

/// Small helper so model code reads as a list of parts
struct Parts<'a, S: Surface> {
    surface: &'a mut S,
    view: &'a View,
}

impl<S: Surface> Parts<'_, S> {
    #[allow(clippy::too_many_arguments)]
    fn part(&mut self, x: f32, y: f32, z: f32, w: f32, d: f32, h: f32, color: Color) {
        draw_box(
            &mut *self.surface,
            Vec3::new(x, y, z),
            Size3::new(w, d, h),
            color,
            self.view,
        );
    }
}

/// Runner pose inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerPose {
    /// Squash (+) / stretch (-) amount; 0 when reduced motion is on
    pub squash: f32,
    /// Run distance, drives the leg, arm and tail cycle
    pub distance: f32,
}

/// The runner, head first and tail last: the camera looks at its back
pub fn draw_player(surface: &mut impl Surface, pos: Vec3, size: Size3, pose: PlayerPose, view: &View) {
    let mut p = Parts { surface, view };

    let sh = (1.0 - pose.squash).max(0.1);
    let sw = 1.0 + pose.squash * 0.5;
    let w = size.w * sw;
    let d = size.d * sw;

    let jumping = pos.z > 1.0;
    let ducking = size.h < 8.0;
    let cycle = pose.distance * 0.15;
    let leg_swing = if jumping { 0.0 } else { cycle.sin() * 1.5 };

    let body_z = pos.z + 4.0 * sh;
    // Keep the squashed body centered on the footprint
    let cx = pos.x + (size.w - w) / 2.0;
    let cy = pos.y + (size.d - d) / 2.0;

    let head_z = if ducking { body_z } else { body_z + 5.0 * sh };
    let head_x = if ducking { cx + w + 4.0 } else { cx + w - 2.0 };

    if !ducking {
        p.part(cx + w - 3.0, cy + 1.5 * sw, body_z + 4.0 * sh, 4.0, 4.0 * sw, 4.0 * sh, palette::DINO_SKIN);
    }
    p.part(head_x + 6.0, cy + 1.5 * sw, head_z, 4.0, 4.0 * sw, 3.0 * sh, palette::DINO_SKIN);
    p.part(head_x, cy + 0.5 * sw, head_z, 6.0, 6.0 * sw, 6.0 * sh, palette::DINO_SKIN);
    p.part(head_x + 3.0, cy + 6.6 * sw, head_z + 3.0 * sh, 1.0, 0.1, 1.0, palette::DINO_EYE);

    let arm_z = body_z + 2.0 * sh;
    let arm_swing = if jumping { -2.0 } else { cycle.cos() * 2.0 };
    p.part(cx + w - 3.0 - arm_swing, cy + 6.0 * sw, arm_z, 3.0, 1.5 * sw, 1.5 * sh, palette::DINO_SKIN);
    p.part(cx + w - 3.0 + arm_swing, cy - 1.0 * sw, arm_z, 3.0, 1.5 * sw, 1.5 * sh, palette::DINO_SKIN);

    if ducking {
        p.part(cx, cy, body_z, w + 4.0, 7.0 * sw, 5.0 * sh, palette::DINO_SKIN);
    } else {
        p.part(cx, cy + 0.5 * sw, body_z, w, 6.0 * sw, 2.0 * sh, palette::DINO_BELLY);
        p.part(cx, cy, body_z + 2.0 * sh, w, 7.0 * sw, 4.0 * sh, palette::DINO_SKIN);
        p.part(cx + 2.0, cy + 2.0 * sw, body_z + 5.5 * sh, 2.0, 2.0, 1.0 * sh, palette::DINO_SPOTS);
        p.part(cx + 6.0, cy + 4.0 * sw, body_z + 5.0 * sh, 2.0, 2.0, 1.0 * sh, palette::DINO_SPOTS);
        p.part(cx + 4.0, cy, body_z + 4.0 * sh, 2.0, 1.0, 2.0 * sh, palette::DINO_SPOTS);
    }

    // Legs lift unevenly in the air
    let (r_leg_z, l_leg_z) = if jumping {
        (pos.z + 1.0, pos.z + 2.0)
    } else {
        (pos.z, pos.z)
    };
    p.part(cx + 2.0 - leg_swing, cy + 5.0 * sw, r_leg_z, 4.0, 2.0 * sw, 5.0 * sh, palette::DINO_SKIN);
    p.part(cx + 2.0 + leg_swing, cy, l_leg_z, 4.0, 2.0 * sw, 5.0 * sh, palette::DINO_SKIN);

    let wag = (cycle * 0.5).sin() * 1.5;
    let tail_x = cx - 4.0;
    let tail_z = body_z + 2.0 * sh + wag;
    p.part(tail_x, cy + 1.5 * sw, tail_z, 4.0, 4.0 * sw, 4.0 * sh, palette::DINO_SKIN);
    p.part(tail_x - 3.0, cy + 2.5 * sw, tail_z + 0.5, 3.0, 2.0 * sw, 3.0 * sh, palette::DINO_SKIN);
    p.part(tail_x - 5.0, cy + 3.0 * sw, tail_z + 1.0, 2.0, 1.0 * sw, 2.0 * sh, palette::DINO_SKIN);
}

/// Tall cactus with two arms
pub fn draw_large_cactus(surface: &mut impl Surface, pos: Vec3, size: Size3, view: &View) {
    let mut p = Parts { surface, view };
    let Vec3 { x, y, z } = pos;
    let h = size.h;
    let mid = x + size.w / 2.0;

    p.part(mid - 2.5, y + 1.0, z, 5.0, 4.0, h, palette::CACTUS_MAIN);
    p.part(mid - 2.5, y + 1.0, z + h, 5.0, 4.0, 1.0, palette::CACTUS_LIGHT);

    // Arms point along y so they read in the chase view
    p.part(mid - 1.0, y + 5.0, z + 6.0, 3.0, 4.0, 3.0, palette::CACTUS_MAIN);
    p.part(mid - 1.0, y + 8.0, z + 6.0, 3.0, 3.0, 6.0, palette::CACTUS_MAIN);
    p.part(mid - 1.0, y + 8.0, z + 12.0, 3.0, 3.0, 1.0, palette::CACTUS_LIGHT);

    p.part(mid - 1.0, y - 3.0, z + 8.0, 3.0, 4.0, 3.0, palette::CACTUS_MAIN);
    p.part(mid - 1.0, y - 5.0, z + 8.0, 3.0, 3.0, 4.0, palette::CACTUS_MAIN);
    p.part(mid - 1.0, y - 5.0, z + 12.0, 3.0, 3.0, 1.0, palette::CACTUS_LIGHT);
}

/// Short cactus with a stubby side shoot
pub fn draw_small_cactus(surface: &mut impl Surface, pos: Vec3, size: Size3, view: &View) {
    let mut p = Parts { surface, view };
    let Vec3 { x, y, z } = pos;
    let h = size.h;

    p.part(x + 2.0, y + 2.0, z, 4.0, 4.0, h, palette::CACTUS_MAIN);
    p.part(x + 2.0, y + 2.0, z + h, 4.0, 4.0, 1.0, palette::CACTUS_LIGHT);
    p.part(x, y - 1.0, z, 3.0, 3.0, h * 0.6, palette::CACTUS_MAIN);
    p.part(x, y - 1.0, z + h * 0.6, 3.0, 3.0, 1.0, palette::CACTUS_LIGHT);
}

/// Bird with wings that flap every 150 ms
pub fn draw_bird(surface: &mut impl Surface, pos: Vec3, color: Color, elapsed_secs: f32, view: &View) {
    let mut p = Parts { surface, view };
    let Vec3 { x, y, z } = pos;

    let wings_up = ((elapsed_secs * 1000.0 / 150.0).floor() as i64) % 2 == 0;
    let wing_z = if wings_up { 4.0 } else { -2.0 };

    p.part(x, y, z, 6.0, 3.0, 3.0, color);
    p.part(x - 3.0, y + 0.5, z + 1.0, 3.0, 2.0, 4.0, color);
    p.part(x - 5.0, y + 1.0, z + 3.0, 2.0, 1.0, 1.0, palette::SAND_DETAIL);
    p.part(x + 1.0, y - 5.0, z + 2.0 + wing_z, 4.0, 5.0, 1.0, palette::BIRD_WING);
    p.part(x + 1.0, y + 3.0, z + 2.0 + wing_z, 4.0, 5.0, 1.0, palette::BIRD_WING);
}

/// Lane rock: dark base, light cap, two bits of rubble
pub fn draw_rock(surface: &mut impl Surface, pos: Vec3, size: Size3, view: &View) {
    let mut p = Parts { surface, view };
    let Vec3 { x, y, z } = pos;
    let Size3 { w, d, h } = size;

    p.part(x, y, z, w, d, h * 0.6, palette::ROCK_DARK);
    p.part(x + 2.0, y + 1.0, z + h * 0.6, w - 4.0, d - 2.0, h * 0.4, palette::ROCK_LIGHT);
    p.part(x - 2.0, y + d / 2.0, z, 3.0, 3.0, h * 0.3, palette::ROCK_DARK);
    p.part(x + w - 1.0, y + 2.0, z, 2.0, 2.0, h * 0.2, palette::ROCK_LIGHT);
}

pub fn draw_rock_cluster(
    surface: &mut impl Surface,
    pos: Vec3,
    size: Size3,
    base: Color,
    accent: Color,
    view: &View,
) {
    let mut p = Parts { surface, view };
    let Vec3 { x, y, z } = pos;
    let Size3 { w, d, h } = size;

    p.part(x, y, z, w, d, h * 0.55, base);
    p.part(x + w * 0.25, y + d * 0.2, z + h * 0.4, w * 0.6, d * 0.65, h * 0.45, accent);
    p.part(x - 1.5, y + d * 0.55, z, 3.0, 3.0, h * 0.25, base);
    p.part(x + w * 0.75, y - d * 0.15, z, 3.0, 2.5, h * 0.2, accent);
}

pub fn draw_spire(surface: &mut impl Surface, pos: Vec3, size: Size3, color: Color, view: &View) {
    let mut p = Parts { surface, view };
    let Vec3 { x, y, z } = pos;
    let Size3 { w, d, h } = size;

    p.part(x, y, z, w, d, h * 0.7, color);
    p.part(x + w * 0.2, y + d * 0.2, z + h * 0.55, w * 0.6, d * 0.6, h * 0.45, palette::SANDSTONE_LIGHT);
}

pub fn draw_bush(surface: &mut impl Surface, pos: Vec3, size: Size3, view: &View) {
    let mut p = Parts { surface, view };
    let Vec3 { x, y, z } = pos;
    let Size3 { w, d, h } = size;

    p.part(x, y, z, w, d, (h * 0.45).max(3.0), palette::BUSH);
    p.part(x + w * 0.2, y + d * 0.35, z + h * 0.2, w * 0.6, d * 0.4, h * 0.4, palette::BUSH_HIGHLIGHT);
    p.part(x - 1.0, y + d * 0.2, z + h * 0.1, 2.0, 2.0, h * 0.35, palette::BUSH);
    p.part(x + w - 1.0, y - 1.0, z + h * 0.15, 2.0, 2.0, h * 0.3, palette::BUSH);
}

pub fn draw_bones(surface: &mut impl Surface, pos: Vec3, size: Size3, view: &View) {
    let mut p = Parts { surface, view };
    let Vec3 { x, y, z } = pos;
    let Size3 { w, d, h } = size;

    p.part(x + 1.0, y + 1.0, z, (w - 2.0).max(2.0), (d - 2.0).max(2.0), h * 0.5, palette::BONE);
    p.part(x - 1.0, y + d * 0.3, z + h * 0.1, w + 2.0, 2.0, h * 0.4, palette::BONE_SHADOW);
    p.part(x + w * 0.3, y - 1.0, z + h * 0.15, 2.0, d + 2.0, h * 0.35, palette::BONE);
    p.part(x + w * 0.6, y + d * 0.5, z + h * 0.35, 1.5, 1.5, h * 0.5, palette::BONE_SHADOW);
}

pub fn draw_driftwood(surface: &mut impl Surface, pos: Vec3, size: Size3, view: &View) {
    let mut p = Parts { surface, view };
    let Vec3 { x, y, z } = pos;
    let Size3 { w, d, h } = size;

    p.part(x, y, z, w, d, (h * 0.7).max(2.0), palette::DRIFTWOOD);
    p.part(x + w * 0.55, y - d * 0.35, z + h * 0.3, w * 0.35, d, h * 0.5, palette::DRIFTWOOD);
    p.part(x + w * 0.15, y + d * 0.4, z + h * 0.2, w * 0.6, d * 0.5, h * 0.5, palette::DRIFTWOOD_LIGHT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CACTUS_LARGE_SIZE, CACTUS_SMALL_SIZE, DINO_SIZE, ROCK_SIZE};
    use crate::renderer::surface::recording::RecordingSurface;
    use crate::renderer::voxel::TOP_FACE_SHADE;
    use glam::Vec2;

    fn view() -> View {
        View::new(Vec2::new(300.0, 400.0), 4.0)
    }

    /// Each box paints three fills
    fn box_count(surface: &RecordingSurface) -> usize {
        surface.fill_colors().len() / 3
    }

    #[test]
    fn test_player_part_counts() {
        let pose = PlayerPose {
            squash: 0.0,
            distance: 0.0,
        };

        let mut standing = RecordingSurface::default();
        draw_player(&mut standing, Vec3::ZERO, DINO_SIZE, pose, &view());
        // tail 3, legs 2, belly + body + 3 spots, arms 2, neck, snout, head, eye
        assert_eq!(box_count(&standing), 16);

        let mut ducking = RecordingSurface::default();
        draw_player(&mut ducking, Vec3::ZERO, DINO_SIZE.with_h(5.0), pose, &view());
        // one body box, no spots, no neck
        assert_eq!(box_count(&ducking), 12);
    }

    #[test]
    fn test_player_eye_before_body() {
        let mut surface = RecordingSurface::default();
        let pose = PlayerPose {
            squash: 0.2,
            distance: 37.0,
        };
        draw_player(&mut surface, Vec3::new(0.0, 0.0, 12.0), DINO_SIZE, pose, &view());
        let fills = surface.fill_colors();
        let eye = fills
            .iter()
            .position(|c| *c == palette::DINO_EYE.shade(TOP_FACE_SHADE))
            .unwrap();
        let belly = fills
            .iter()
            .position(|c| *c == palette::DINO_BELLY.shade(TOP_FACE_SHADE))
            .unwrap();
        assert!(eye < belly);
        // Tail tip closes the model
        assert_eq!(*fills.last().unwrap(), palette::DINO_SKIN.shade(TOP_FACE_SHADE));
    }

    #[test]
    fn test_cactus_caps_are_light() {
        let mut large = RecordingSurface::default();
        draw_large_cactus(&mut large, Vec3::ZERO, CACTUS_LARGE_SIZE, &view());
        assert_eq!(box_count(&large), 8);

        let mut small = RecordingSurface::default();
        draw_small_cactus(&mut small, Vec3::ZERO, CACTUS_SMALL_SIZE, &view());
        assert_eq!(box_count(&small), 4);
        let tops: Vec<Color> = small.fill_colors().into_iter().skip(2).step_by(3).collect();
        assert_eq!(tops[1], palette::CACTUS_LIGHT.shade(TOP_FACE_SHADE));
    }

    #[test]
    fn test_bird_wings_flap() {
        let mut up = RecordingSurface::default();
        let mut down = RecordingSurface::default();
        draw_bird(&mut up, Vec3::ZERO, palette::BIRD_BODY, 0.0, &view());
        draw_bird(&mut down, Vec3::ZERO, palette::BIRD_BODY, 0.16, &view());
        assert_eq!(box_count(&up), 5);
        assert_ne!(up.calls, down.calls);
    }

    #[test]
    fn test_decoration_models() {
        let s = Size3::new(8.0, 6.0, 10.0);
        let mut surface = RecordingSurface::default();
        draw_rock(&mut surface, Vec3::ZERO, ROCK_SIZE, &view());
        draw_rock_cluster(&mut surface, Vec3::ZERO, s, palette::ROCK_DARK, palette::ROCK_LIGHT, &view());
        draw_spire(&mut surface, Vec3::ZERO, s, palette::SANDSTONE_LIGHT, &view());
        draw_bush(&mut surface, Vec3::ZERO, s, &view());
        draw_bones(&mut surface, Vec3::ZERO, s, &view());
        draw_driftwood(&mut surface, Vec3::ZERO, s, &view());
        assert_eq!(box_count(&surface), 4 + 4 + 2 + 4 + 4 + 3);
    }
}
