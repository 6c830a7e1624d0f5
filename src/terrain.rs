//! Procedural ground decoration
//!
//! The desert floor is a grid of cells. Each cell hashes its integer
//! coordinates into a handful of uniform values that decide what sits there,
//! so a cell always looks the same no matter where the camera is. Flat detail
//! (sand patches, ripples, pebbles, speckles) may cover the running lane;
//! anything solid is kept out of the lane corridor.

use glam::Vec3;

use crate::Size3;
use crate::consts::{GROUND_Z, LANE_WIDTH};
use crate::renderer::color::{Color, palette};
use crate::settings::Settings;

/// Grid and visibility parameters for the decorator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainConfig {
    /// Cell size in world units
    pub grid_step: f32,
    /// Solid decorations are skipped when |y| of the cell is below this
    pub lane_half_width: f32,
    /// Cells further than this from the camera are skipped
    pub cull_radius: f32,
    /// How far behind the camera the scan starts
    pub look_behind: f32,
    /// Length of the scanned window along x
    pub look_ahead_span: f32,
    /// Scan covers y in [-lateral_extent, lateral_extent]
    pub lateral_extent: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            grid_step: 40.0,
            lane_half_width: LANE_WIDTH * 2.75,
            cull_radius: 1500.0,
            look_behind: 500.0,
            look_ahead_span: 2400.0,
            lateral_extent: 520.0,
        }
    }
}

/// What a decoration is
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecorationKind {
    SandPatch,
    Ripple,
    Pebble,
    Speckle,
    RockCluster { accent: Color },
    Spire,
    Bush,
    Bones,
    Driftwood,
    Succulent,
}

impl DecorationKind {
    /// Allowed inside the lane corridor
    pub fn is_walkable(&self) -> bool {
        matches!(
            self,
            DecorationKind::SandPatch
                | DecorationKind::Ripple
                | DecorationKind::Pebble
                | DecorationKind::Speckle
        )
    }

    /// Painted as a flat tile without sides or shadow
    pub fn is_flat(&self) -> bool {
        matches!(
            self,
            DecorationKind::SandPatch | DecorationKind::Ripple | DecorationKind::Speckle
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoration {
    pub kind: DecorationKind,
    /// Grid cell that produced this decoration
    pub cell: (i32, i32),
    pub pos: Vec3,
    pub size: Size3,
    pub color: Color,
}

// Independent hash streams per cell
const SALT_PLACEMENT: u32 = 0x9e37_79b9;
const SALT_JITTER_X: u32 = 0x85eb_ca6b;
const SALT_JITTER_Y: u32 = 0xc2b2_ae35;
const SALT_CLUSTER: u32 = 0x27d4_eb2f;
const SALT_PATCH: u32 = 0x1656_67b1;

/// Cells per low-frequency patch region along each axis
const PATCH_REGION_CELLS: i32 = 5;

/// Deterministic value in [0, 1) for a cell and salt
pub fn cell_hash(cell_x: i32, cell_y: i32, salt: u32) -> f32 {
    let mut h = (cell_x as u32)
        .wrapping_mul(2654435761)
        .wrapping_add((cell_y as u32).wrapping_mul(0x8da6_b343))
        ^ salt;
    h ^= h >> 15;
    h = h.wrapping_mul(0x2c1b_3c6d);
    h ^= h >> 12;
    h = h.wrapping_mul(0x297a_2d39);
    h ^= h >> 15;
    // Top 24 bits keep the result exactly representable and below 1.0
    (h >> 8) as f32 / (1u32 << 24) as f32
}

impl TerrainConfig {
    /// Config with the decoration radius taken from the quality preset
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            cull_radius: settings.quality.decoration_radius(),
            ..Self::default()
        }
    }

    /// All decorations of one cell. Pure: same cell, same result.
    pub fn decorate(&self, cell_x: i32, cell_y: i32) -> Vec<Decoration> {
        let x = cell_x as f32 * self.grid_step;
        let y = cell_y as f32 * self.grid_step;
        let r = cell_hash(cell_x, cell_y, SALT_PLACEMENT);
        let jx = cell_hash(cell_x, cell_y, SALT_JITTER_X) * 12.0;
        let jy = cell_hash(cell_x, cell_y, SALT_JITTER_Y) * 12.0;

        let mut out = Vec::new();
        let mut push = |kind, pos: Vec3, size, color| {
            out.push(Decoration {
                kind,
                cell: (cell_x, cell_y),
                pos,
                size,
                color,
            });
        };

        if r > 0.95 {
            let patch = cell_hash(
                cell_x.div_euclid(PATCH_REGION_CELLS),
                cell_y.div_euclid(PATCH_REGION_CELLS),
                SALT_PATCH,
            );
            let base = if patch > 0.5 {
                palette::SAND_LIGHT
            } else {
                palette::SAND_DARK
            };
            push(
                DecorationKind::SandPatch,
                Vec3::new(x + r * 20.0, y + r * 20.0, GROUND_Z),
                Size3::new(40.0 + r * 60.0, 40.0 + r * 60.0, 0.0),
                Color { a: 0x22, ..base },
            );
        }

        if r > 0.8 && r < 0.85 {
            push(
                DecorationKind::Ripple,
                Vec3::new(x + r * 10.0, y, GROUND_Z),
                Size3::new(20.0 + r * 30.0, 2.0, 0.2),
                Color {
                    a: 0x44,
                    ..palette::SAND_DARK
                },
            );
        }

        if r < 0.08 {
            let count = 1 + (r * 50.0) as u32;
            let s = 1.0 + r * 2.0;
            for i in 0..count {
                let phase = r * 10.0 + i as f32;
                let color = if i % 2 == 0 {
                    palette::PEBBLE_LIGHT
                } else {
                    palette::PEBBLE_DARK
                };
                push(
                    DecorationKind::Pebble,
                    Vec3::new(x + phase.sin() * 15.0, y + phase.cos() * 15.0, GROUND_Z),
                    Size3::new(s, s, 0.6 + r * 1.2),
                    color,
                );
            }
        }

        if r > 0.4 && r < 0.55 {
            push(
                DecorationKind::Speckle,
                Vec3::new(x + r * 25.0, y + (1.0 - r) * 25.0, GROUND_Z),
                Size3::new(1.0, 1.0, 0.0),
                Color {
                    a: 0x88,
                    ..palette::SAND_DARK
                },
            );
        }

        if y.abs() < self.lane_half_width {
            return out;
        }

        let cluster = cell_hash(cell_x, cell_y, SALT_CLUSTER);

        if r > 0.985 {
            let (color, accent) = if r > 0.995 {
                (palette::ROCK_DARK, palette::ROCK_LIGHT)
            } else {
                (palette::SANDSTONE_DARK, palette::SANDSTONE_LIGHT)
            };
            push(
                DecorationKind::RockCluster { accent },
                Vec3::new(x + jx * 0.5, y + jy * 0.5, GROUND_Z),
                Size3::new(6.0 + r * 8.0, 5.0 + r * 7.0, 4.0 + r * 7.0),
                color,
            );
        } else if r > 0.965 {
            push(
                DecorationKind::Spire,
                Vec3::new(x + jx, y + jy * 0.8, GROUND_Z),
                Size3::new(3.0 + r * 2.0, 3.0 + r * 1.5, 10.0 + r * 12.0),
                palette::SANDSTONE_LIGHT,
            );
        } else if r < 0.015 {
            push(
                DecorationKind::Bush,
                Vec3::new(x + jx, y + jy, GROUND_Z),
                Size3::new(4.0, 4.0, 6.0 + r * 8.0),
                palette::BUSH,
            );
        } else if r > 0.045 && r < 0.052 {
            push(
                DecorationKind::Bones,
                Vec3::new(x + jx * 0.6, y + jy * 0.4, GROUND_Z),
                Size3::new(6.0, 5.0, 2.0 + r * 2.0),
                palette::BONE,
            );
        } else if cluster > 0.72 && cluster < 0.745 {
            push(
                DecorationKind::Driftwood,
                Vec3::new(x + jx * 0.3, y + jy * 0.5, GROUND_Z),
                Size3::new(
                    8.0 + cluster * 6.0,
                    2.0 + cluster * 2.0,
                    2.0 + cluster * 2.0,
                ),
                palette::DRIFTWOOD,
            );
        } else if r < 0.02 {
            push(
                DecorationKind::Succulent,
                Vec3::new(x + jx * 0.5, y + jy * 0.5, GROUND_Z),
                Size3::new(3.0, 3.0, 6.0 + r * 10.0),
                palette::CACTUS_MAIN,
            );
        }

        out
    }

    /// Grid cells visible from `cam_x`, in scan order
    pub fn visible_cells(&self, cam_x: f32) -> impl Iterator<Item = (i32, i32)> + '_ {
        let start = ((cam_x - self.look_behind) / self.grid_step).floor() as i32;
        let columns = (self.look_ahead_span / self.grid_step).ceil() as i32;
        let rows = (self.lateral_extent / self.grid_step).floor() as i32;
        let radius_sq = self.cull_radius * self.cull_radius;

        (start..start + columns)
            .flat_map(move |cx| (-rows..=rows).map(move |cy| (cx, cy)))
            .filter(move |&(cx, cy)| {
                let dx = cx as f32 * self.grid_step - cam_x;
                let dy = cy as f32 * self.grid_step;
                dx * dx + dy * dy <= radius_sq
            })
    }

    /// Every decoration around the camera
    pub fn scan(&self, cam_x: f32) -> Vec<Decoration> {
        self.visible_cells(cam_x)
            .flat_map(|(cx, cy)| self.decorate(cx, cy))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hash_range_and_spread() {
        let mut sum = 0.0;
        let n = 10_000;
        for i in 0..n {
            let v = cell_hash(i % 137 - 60, i / 137 - 30, SALT_PLACEMENT);
            assert!((0.0..1.0).contains(&v));
            sum += v;
        }
        let mean = sum / n as f32;
        assert!((mean - 0.5).abs() < 0.05, "mean {mean}");
    }

    #[test]
    fn test_lane_cells_only_walkable() {
        let config = TerrainConfig::default();
        // |y| < 110 means rows -2..=2
        for cx in -200..200 {
            for cy in -2..=2 {
                for d in config.decorate(cx, cy) {
                    assert!(d.kind.is_walkable(), "{:?} in lane at {:?}", d.kind, d.cell);
                }
            }
        }
    }

    #[test]
    fn test_solid_decorations_appear_off_lane() {
        let config = TerrainConfig::default();
        let solid = (-300..300)
            .flat_map(|cx| (3..=13).map(move |cy| (cx, cy)))
            .flat_map(|(cx, cy)| config.decorate(cx, cy))
            .filter(|d| !d.kind.is_walkable())
            .count();
        assert!(solid > 0);
    }

    #[test]
    fn test_scan_window() {
        let config = TerrainConfig::default();
        let cam_x = 1234.0;
        let start = ((cam_x - 500.0) / 40.0_f32).floor() as i32;
        for (cx, cy) in config.visible_cells(cam_x) {
            assert!(cx >= start && cx < start + 60);
            assert!((-13..=13).contains(&cy));
            let dx = cx as f32 * 40.0 - cam_x;
            let dy = cy as f32 * 40.0;
            assert!(dx * dx + dy * dy <= 1500.0 * 1500.0);
        }
    }

    #[test]
    fn test_nearby_cells_stable_across_camera_moves() {
        let config = TerrainConfig::default();
        let near = |cam: f32| -> Vec<Decoration> {
            config
                .scan(cam)
                .into_iter()
                .filter(|d| (d.cell.0 as f32 * 40.0 - 1000.0).abs() < 300.0)
                .collect()
        };
        assert_eq!(near(1000.0), near(1015.0));
    }

    #[test]
    fn test_quality_shrinks_radius() {
        let settings = Settings::from_preset(crate::settings::QualityPreset::Low);
        let low = TerrainConfig::from_settings(&settings);
        let high = TerrainConfig::default();
        assert!(low.visible_cells(0.0).count() < high.visible_cells(0.0).count());
    }

    proptest! {
        #[test]
        fn decorate_is_deterministic(cx in -10_000i32..10_000, cy in -13i32..=13) {
            let config = TerrainConfig::default();
            prop_assert_eq!(config.decorate(cx, cy), config.decorate(cx, cy));
        }

        #[test]
        fn hash_in_unit_interval(cx in any::<i32>(), cy in any::<i32>(), salt in any::<u32>()) {
            let v = cell_hash(cx, cy, salt);
            prop_assert!((0.0..1.0).contains(&v));
        }
    }
}
