//! Scene compositor
//!
//! Every frame the compositor paints the background layers, the ground slab
//! and the path strip, then gathers decorations, obstacles, particles and the
//! player into one render list. The list is sorted far-to-near (painter's
//! order for the chase camera) and each item is dispatched to its drawer.
//!
//! All world positions are drawn relative to the camera, which follows the
//! player along x.

use glam::{Vec2, Vec3};

use super::color::{Color, palette};
use super::models::{self, PlayerPose};
use super::projection::View;
use super::surface::Surface;
use super::voxel::{draw_box, draw_flat_tile, draw_shadow};
use crate::Size3;
use crate::consts::{GROUND_Z, LANE_WIDTH, VOXEL_SIZE};
use crate::settings::Settings;
use crate::sim::{GameState, Obstacle, ObstacleKind, Particle};
use crate::terrain::{Decoration, DecorationKind, TerrainConfig};

/// Screen position of the camera anchor as a fraction of the viewport
const VIEW_ANCHOR: Vec2 = Vec2::new(0.3, 0.8);

/// Lateral weight of the depth key
const DEPTH_Y_WEIGHT: f32 = 1.5;
/// Per-id nudge that keeps overlapping obstacles in spawn order
const DEPTH_ORDER_EPSILON: f32 = 0.001;

const SLAB_HALF_LENGTH: f32 = 15000.0;
const SLAB_HALF_WIDTH: f32 = 10000.0;
const GROUND_DEPTH: f32 = 38.0;
const PATH_WIDTH: f32 = LANE_WIDTH + 4.0;
const PATH_THICKNESS: f32 = 0.2;

const CLOUD_DRIFT: f32 = 0.05;
const CLOUD_OFFSET: f32 = 0.1;
const CLOUD_WRAP: f32 = 3000.0;
const CLOUD_WRAP_SHIFT: f32 = 1000.0;

const HAZE_BANDS: usize = 5;

/// What a render item is; the compositor matches on this exhaustively
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderKind {
    Player,
    Obstacle(ObstacleKind),
    Particle,
    Decoration(DecorationKind),
}

/// One entry of the per-frame render list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderItem {
    pub kind: RenderKind,
    /// World position (min corner)
    pub pos: Vec3,
    pub size: Size3,
    pub color: Color,
    /// Scales the x offset from the camera in the depth key
    pub depth_parallax: f32,
    /// Tie-breaker; obstacles use their id
    pub order: u32,
}

impl RenderItem {
    pub fn new(kind: RenderKind, pos: Vec3, size: Size3, color: Color) -> Self {
        Self {
            kind,
            pos,
            size,
            color,
            depth_parallax: 1.0,
            order: 0,
        }
    }

    /// Larger is further from the camera
    pub fn depth(&self, cam_x: f32) -> f32 {
        let x = cam_x + (self.pos.x - cam_x) * self.depth_parallax;
        x + self.pos.y * DEPTH_Y_WEIGHT + self.order as f32 * DEPTH_ORDER_EPSILON
    }

    pub fn casts_shadow(&self) -> bool {
        match self.kind {
            RenderKind::Particle => false,
            RenderKind::Decoration(kind) => !kind.is_flat(),
            RenderKind::Player | RenderKind::Obstacle(_) => true,
        }
    }
}

impl From<&Decoration> for RenderItem {
    fn from(d: &Decoration) -> Self {
        Self::new(RenderKind::Decoration(d.kind), d.pos, d.size, d.color)
    }
}

impl From<&Obstacle> for RenderItem {
    fn from(o: &Obstacle) -> Self {
        Self {
            order: o.id,
            ..Self::new(RenderKind::Obstacle(o.kind), o.pos, o.size, o.color)
        }
    }
}

impl From<&Particle> for RenderItem {
    fn from(p: &Particle) -> Self {
        Self::new(RenderKind::Particle, p.pos, p.box_size(), p.color)
    }
}

/// Camera for a viewport of the given size
pub fn view_for(width: f32, height: f32) -> View {
    View::new(Vec2::new(width, height) * VIEW_ANCHOR, VOXEL_SIZE)
}

/// Decorations, obstacles, particles, then the player
pub fn gather(state: &GameState, terrain: &TerrainConfig) -> Vec<RenderItem> {
    let cam_x = state.player.pos.x;
    let decorations = terrain.scan(cam_x);

    let mut items = Vec::with_capacity(
        decorations.len() + state.obstacles.len() + state.particles.len() + 1,
    );
    items.extend(decorations.iter().map(RenderItem::from));
    items.extend(state.obstacles.iter().map(RenderItem::from));
    items.extend(state.particles.particles().iter().map(RenderItem::from));
    items.push(RenderItem::new(
        RenderKind::Player,
        state.player.pos,
        state.player.size,
        palette::DINO_SKIN,
    ));
    items
}

/// Far-to-near; equal depths keep gather order
pub fn sort_by_depth(items: &mut [RenderItem], cam_x: f32) {
    items.sort_by(|a, b| b.depth(cam_x).total_cmp(&a.depth(cam_x)));
}

/// Paint a whole frame
pub fn render_scene(
    surface: &mut impl Surface,
    state: &GameState,
    settings: &Settings,
    terrain: &TerrainConfig,
    width: f32,
    height: f32,
) {
    let view = view_for(width, height);
    let cam_x = state.player.pos.x;

    draw_background(surface, state, settings, &view, width, height);
    draw_ground(surface, state.is_night, &view);

    let mut items = gather(state, terrain);
    sort_by_depth(&mut items, cam_x);

    let pose = PlayerPose {
        squash: if settings.effective_squash() {
            state.player.squash
        } else {
            0.0
        },
        distance: state.distance,
    };

    for item in &items {
        let rel = Vec3::new(item.pos.x - cam_x, item.pos.y, item.pos.z);
        if settings.shadows && item.casts_shadow() {
            draw_shadow(surface, rel, item.size, &view);
        }
        draw_item(surface, item, rel, pose, state.elapsed_time, &view);
    }
}

fn draw_item(
    surface: &mut impl Surface,
    item: &RenderItem,
    rel: Vec3,
    pose: PlayerPose,
    elapsed_secs: f32,
    view: &View,
) {
    let size = item.size;
    match item.kind {
        RenderKind::Player => models::draw_player(surface, rel, size, pose, view),
        RenderKind::Obstacle(kind) => match kind {
            ObstacleKind::CactusSmall => models::draw_small_cactus(surface, rel, size, view),
            ObstacleKind::CactusLarge => models::draw_large_cactus(surface, rel, size, view),
            ObstacleKind::Bird => models::draw_bird(surface, rel, item.color, elapsed_secs, view),
            ObstacleKind::Rock => models::draw_rock(surface, rel, size, view),
        },
        RenderKind::Decoration(kind) => match kind {
            DecorationKind::RockCluster { accent } => {
                models::draw_rock_cluster(surface, rel, size, item.color, accent, view)
            }
            DecorationKind::Spire => models::draw_spire(surface, rel, size, item.color, view),
            DecorationKind::Bush => models::draw_bush(surface, rel, size, view),
            DecorationKind::Bones => models::draw_bones(surface, rel, size, view),
            DecorationKind::Driftwood => models::draw_driftwood(surface, rel, size, view),
            DecorationKind::SandPatch | DecorationKind::Ripple | DecorationKind::Speckle => {
                draw_flat_tile(surface, rel, size, item.color, view)
            }
            DecorationKind::Pebble | DecorationKind::Succulent => {
                draw_box(surface, rel, size, item.color, view)
            }
        },
        RenderKind::Particle => draw_box(surface, rel, size, item.color, view),
    }
}

/// Ground slab and path strip, both centered under the camera
fn draw_ground(surface: &mut impl Surface, is_night: bool, view: &View) {
    let (ground, path) = if is_night {
        (palette::NIGHT_GROUND, palette::NIGHT_PATH)
    } else {
        (palette::GROUND_BASE, palette::PATH)
    };

    draw_box(
        surface,
        Vec3::new(-SLAB_HALF_LENGTH, -SLAB_HALF_WIDTH, GROUND_Z - GROUND_DEPTH),
        Size3::new(SLAB_HALF_LENGTH * 2.0, SLAB_HALF_WIDTH * 2.0, GROUND_DEPTH),
        ground,
        view,
    );
    draw_box(
        surface,
        Vec3::new(-SLAB_HALF_LENGTH, -PATH_WIDTH / 2.0, GROUND_Z - PATH_THICKNESS),
        Size3::new(SLAB_HALF_LENGTH * 2.0, PATH_WIDTH, PATH_THICKNESS),
        path,
        view,
    );
}

fn draw_background(
    surface: &mut impl Surface,
    state: &GameState,
    settings: &Settings,
    view: &View,
    width: f32,
    height: f32,
) {
    let (sky_top, sky_bottom) = if state.is_night {
        (palette::NIGHT_SKY_TOP, palette::NIGHT_SKY_BOTTOM)
    } else {
        (palette::SKY_TOP, palette::SKY_BOTTOM)
    };
    surface.fill_vertical_gradient(Vec2::ZERO, Vec2::new(width, height), sky_top, sky_bottom);

    let distance = state.distance;

    if settings.clouds {
        for cloud in &state.clouds {
            let rel_x = (cloud.pos.x - distance) * CLOUD_DRIFT + cloud.pos.x * CLOUD_OFFSET;
            let wrapped = rel_x.rem_euclid(CLOUD_WRAP) - CLOUD_WRAP_SHIFT;
            let p = view.project(Vec3::new(wrapped, cloud.pos.y, cloud.pos.z));
            let s = cloud.size.w * view.scale * 0.5;

            surface.fill_circle(p, s, palette::CLOUD);
            surface.fill_circle(p + Vec2::new(s, s * 0.2), s * 0.8, palette::CLOUD);
            surface.fill_circle(p + Vec2::new(-s * 0.8, s * 0.1), s * 0.6, palette::CLOUD);
        }
    }

    if settings.effective_heat_haze() {
        let t = state.elapsed_time * 2.0;
        for i in 0..HAZE_BANDS {
            let i = i as f32;
            let hx = (distance * 0.4 + i * 400.0).rem_euclid(2000.0);
            let hy = height * 0.7 + (t + i).sin() * 10.0;
            surface.fill_rect(
                Vec2::new(hx - 200.0, hy),
                Vec2::new(400.0, 150.0),
                palette::HEAT_HAZE,
            );
        }
    }

    if settings.landscape {
        let (far, near) = if state.is_night {
            (palette::NIGHT_MOUNTAIN_FAR, palette::NIGHT_MOUNTAIN_NEAR)
        } else {
            (palette::MOUNTAIN_FAR, palette::MOUNTAIN_NEAR)
        };
        MESAS.draw(surface, distance, state.elapsed_time, far, width, height);
        RIDGES.draw(surface, distance, state.elapsed_time, near, width, height);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Profile {
    /// Flat tops with a little jag
    Mesa,
    /// Two swaying sine waves
    Ridge,
}

/// A scrolling silhouette along the horizon
#[derive(Debug, Clone, Copy)]
struct LandscapeLayer {
    profile: Profile,
    /// Fraction of the run distance the layer scrolls by
    parallax: f32,
    /// Baseline height above the bottom edge
    y_base: f32,
    amplitude: f32,
    period: f32,
    /// Seconds multiplier for the ridge sway
    time_scale: f32,
    /// Horizontal sample spacing in pixels
    step: f32,
}

const MESAS: LandscapeLayer = LandscapeLayer {
    profile: Profile::Mesa,
    parallax: 0.05,
    y_base: 250.0,
    amplitude: 180.0,
    period: 400.0,
    time_scale: 0.2,
    step: 40.0,
};

const RIDGES: LandscapeLayer = LandscapeLayer {
    profile: Profile::Ridge,
    parallax: 0.15,
    y_base: 120.0,
    amplitude: 60.0,
    period: 250.0,
    time_scale: 0.5,
    step: 20.0,
};

/// Horizontal overscan so the silhouette edges stay off-screen
const LANDSCAPE_MARGIN: f32 = 50.0;

impl LandscapeLayer {
    /// Vertical offset from the baseline (negative is up)
    fn offset(&self, world_x: f32, elapsed_secs: f32) -> f32 {
        match self.profile {
            Profile::Mesa => {
                let n = (world_x / self.period).sin();
                let plateau = if n > 0.7 {
                    -self.amplitude
                } else if n < -0.7 {
                    -self.amplitude * 0.6
                } else {
                    0.0
                };
                plateau + (world_x / 20.0).sin() * 5.0
            }
            Profile::Ridge => {
                let t = elapsed_secs * self.time_scale;
                let sway = (t * 0.5 + world_x / 800.0).sin() * 10.0;
                (world_x / self.period + t * 0.2).sin() * self.amplitude
                    + (world_x / (self.period * 0.6) - t * 0.3).sin() * (self.amplitude * 0.3)
                    + sway
            }
        }
    }

    /// Filled down to the bottom edge as vertical strips
    fn draw(
        &self,
        surface: &mut impl Surface,
        distance: f32,
        elapsed_secs: f32,
        color: Color,
        width: f32,
        height: f32,
    ) {
        let scroll = distance * self.parallax;
        let right = width + LANDSCAPE_MARGIN;

        let mut prev: Option<Vec2> = None;
        let mut x = -LANDSCAPE_MARGIN;
        while x <= right {
            let top = Vec2::new(x, height - self.y_base + self.offset(x + scroll, elapsed_secs));
            if let Some(p) = prev {
                surface.fill_polygon(
                    &[Vec2::new(p.x, height), p, top, Vec2::new(top.x, height)],
                    color,
                );
            }
            prev = Some(top);
            x += self.step;
        }

        // Close the outline down to the bottom-right corner
        if let Some(p) = prev.filter(|p| p.x < right) {
            surface.fill_polygon(
                &[Vec2::new(p.x, height), p, Vec2::new(right, height)],
                color,
            );
        }
    }
}
