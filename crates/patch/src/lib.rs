//! Curved triangle patches from vertex normals.
//!
//! Each triangle of a mesh, together with a unit normal at each vertex, gets a
//! cubic (or quadratic) patch that passes through the vertices and is tangent
//! to the vertex normals there. Points on the patch are addressed by the
//! parameters `(eta, xi)` with the corners at `(0, 0)`, `(1, 0)` and `(1, 1)`.

mod config;
mod cubic;
mod error;
pub mod geometry;
mod moving;
mod params;
mod patch;
mod quadratic;
mod real;
pub mod transform;
mod triangle;

pub use config::*;
pub use cubic::*;
pub use error::*;
pub use moving::*;
pub use params::*;
pub use patch::*;
pub use quadratic::*;
pub use real::*;
pub use triangle::*;

/// Re-exported so callers do not need a direct `cgmath` dependency.
pub use cgmath::Vector3;
