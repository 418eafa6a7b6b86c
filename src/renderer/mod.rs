//! WebGPU rendering module
//!
//! Simulation snapshots become flat-colored triangles in playfield pixels;
//! the pipeline letterboxes them into the canvas.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState, playfield_to_ndc};
pub use shapes::frame_vertices;
pub use vertex::Vertex;
