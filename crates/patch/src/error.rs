use crate::Edge;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    /// The line through a point parallel to one edge never meets the
    /// neighbouring edge, which happens for degenerate triangles.
    #[error("no parameter line through the point meets edge {edge}")]
    NoEdgeIntersection { edge: Edge },
}
