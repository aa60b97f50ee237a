mod error;
mod geometry;
mod patched;
mod vertex_index;

pub use error::*;
pub use geometry::*;
pub use patched::*;
pub use vertex_index::*;

/// A reasonable default mesh to select for unopinionated consumers.
pub type DefaultMesh = VertexIndex;

pub trait TriangleMesh: Sized {
    /// Creates a TriangleMesh from a vector of floats that encode a list of triangles.
    ///
    /// # Arguments
    ///
    /// * `triangles` - A vector of the triangles of the mesh.
    fn from_triangles(triangles: Vec<Triangle>) -> Self;

    /// Returns the number of triangles that comprises this mesh.
    fn triangle_count(&self) -> usize;

    /// Iterates over the triangles of the mesh in file order.
    fn triangles(&self) -> impl Iterator<Item = Triangle> + '_;
}
