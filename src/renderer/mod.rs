//! Rendering module
//!
//! The scene is composed on the CPU against the `Surface` trait: projection,
//! box rasterizing and painter's-order compositing. `VertexBatch` turns the
//! draw calls into triangles that `RenderState` presents through WebGPU.

pub mod color;
pub mod models;
pub mod pipeline;
pub mod projection;
pub mod scene;
pub mod shapes;
pub mod surface;
pub mod vertex;
pub mod voxel;

pub use color::{Color, palette};
pub use pipeline::RenderState;
pub use projection::{View, project};
pub use scene::{RenderItem, RenderKind, render_scene};
pub use surface::Surface;
pub use vertex::{Vertex, VertexBatch};
pub use voxel::{draw_box, draw_flat_tile, draw_shadow};
