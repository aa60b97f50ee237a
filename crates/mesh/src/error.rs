#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error("face {index} out of range for a mesh with {count} faces")]
    FaceOutOfRange { index: usize, count: usize },

    #[error("vertex {index} out of range for a mesh with {count} vertices")]
    VertexOutOfRange { index: usize, count: usize },
}
