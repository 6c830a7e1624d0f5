//! Collision detection between the player and obstacles
//!
//! Both boxes are shrunk by a per-axis pad before the overlap test, which
//! keeps grazing contacts from ending a run. A pad larger than half an
//! extent leaves a negative half extent, which eats into the other box's reach.

use glam::Vec3;

use crate::Size3;
use crate::consts::{COLLISION_PAD_X, COLLISION_PAD_Y, COLLISION_PAD_Z};

/// Shrink applied to each half extent
pub const COLLISION_PAD: Vec3 = Vec3::new(COLLISION_PAD_X, COLLISION_PAD_Y, COLLISION_PAD_Z);

/// Box given by its center and half extents; padding can make them negative
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitBox {
    pub center: Vec3,
    pub half: Vec3,
}

impl HitBox {
    /// Hit box for a min-corner position and size, shrunk by `pad` per side
    pub fn padded(pos: Vec3, size: Size3, pad: Vec3) -> Self {
        let half = Vec3::new(size.w, size.d, size.h) / 2.0;
        Self {
            center: pos + half,
            half: half - pad,
        }
    }

    /// Strict overlap on every axis; touching faces do not count
    pub fn overlaps(&self, other: &HitBox) -> bool {
        let dist = (self.center - other.center).abs();
        let reach = self.half + other.half;
        dist.x < reach.x && dist.y < reach.y && dist.z < reach.z
    }
}

/// Padded overlap test between two boxes
pub fn collides(a_pos: Vec3, a_size: Size3, b_pos: Vec3, b_size: Size3) -> bool {
    let a = HitBox::padded(a_pos, a_size, COLLISION_PAD);
    let b = HitBox::padded(b_pos, b_size, COLLISION_PAD);
    a.overlaps(&b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BIRD_SIZE, CACTUS_SMALL_SIZE, DINO_SIZE, ROCK_SIZE};
    use proptest::prelude::*;

    #[test]
    fn test_standing_player_hits_cactus() {
        let player = Vec3::new(100.0, 0.0, 0.0);
        let cactus = Vec3::new(101.0, 0.0, 0.0);
        assert!(collides(player, DINO_SIZE, cactus, CACTUS_SMALL_SIZE));
    }

    #[test]
    fn test_padding_forgives_grazing_contact() {
        // Boxes overlap by 2 units in x, less than the combined pad
        let player = Vec3::new(0.0, 0.0, 0.0);
        let rock = Vec3::new(8.0, 0.0, 0.0);
        assert!(!collides(player, DINO_SIZE, rock, ROCK_SIZE));
    }

    #[test]
    fn test_player_clears_cactus_at_apex() {
        let player = Vec3::new(100.0, 0.0, 60.0);
        let cactus = Vec3::new(100.0, 0.0, 0.0);
        assert!(!collides(player, DINO_SIZE, cactus, CACTUS_SMALL_SIZE));
    }

    #[test]
    fn test_lateral_separation_never_collides() {
        let player = Vec3::new(0.0, 0.0, 0.0);
        let side = Vec3::new(0.0, 40.0, 0.0);
        assert!(!collides(player, DINO_SIZE, side, CACTUS_SMALL_SIZE));
    }

    #[test]
    fn test_pad_goes_negative_on_thin_axis() {
        let bird = HitBox::padded(Vec3::ZERO, BIRD_SIZE, COLLISION_PAD);
        assert_eq!(bird.half.z, -1.0);
        let rock = HitBox::padded(Vec3::ZERO, ROCK_SIZE, COLLISION_PAD);
        assert_eq!(rock.half.x, -1.0);
    }

    #[test]
    fn test_thin_bird_shrinks_vertical_reach() {
        // Player half z is 2, bird half z is -1: reach 1 against a gap of 1.5
        let player = Vec3::new(0.0, 0.0, 4.5);
        let bird = Vec3::new(1.0, 0.0, 6.0);
        assert!(!collides(player, DINO_SIZE, bird, BIRD_SIZE));

        // Level centers still hit
        let player = Vec3::new(0.0, 0.0, 3.0);
        assert!(collides(player, DINO_SIZE, bird, BIRD_SIZE));
    }

    fn arb_box() -> impl Strategy<Value = (Vec3, Size3)> {
        (
            -50.0f32..50.0,
            -50.0f32..50.0,
            0.0f32..40.0,
            1.0f32..20.0,
            1.0f32..20.0,
            1.0f32..20.0,
        )
            .prop_map(|(x, y, z, w, d, h)| (Vec3::new(x, y, z), Size3::new(w, d, h)))
    }

    proptest! {
        #[test]
        fn collision_is_symmetric((ap, asz) in arb_box(), (bp, bsz) in arb_box()) {
            prop_assert_eq!(collides(ap, asz, bp, bsz), collides(bp, bsz, ap, asz));
        }

        #[test]
        fn disjoint_lanes_never_collide((ap, asz) in arb_box(), (bp, bsz) in arb_box()) {
            let bp = Vec3::new(bp.x, ap.y + asz.d + bsz.d + 1.0, bp.z);
            prop_assert!(!collides(ap, asz, bp, bsz));
        }
    }
}
