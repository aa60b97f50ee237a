use std::fmt;

use cgmath::Vector3;

use crate::geometry::normalize_or_zero;
use crate::Real;

/// One of the three oriented edges of a triangle.
///
/// Edges follow the winding order, so `P3P1` runs from the third vertex back
/// to the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    P1P2,
    P2P3,
    P3P1,
}

impl Edge {
    pub const ALL: [Edge; 3] = [Edge::P1P2, Edge::P2P3, Edge::P3P1];

    pub fn index(self) -> usize {
        match self {
            Edge::P1P2 => 0,
            Edge::P2P3 => 1,
            Edge::P3P1 => 2,
        }
    }

    /// Indices of the start and end vertex.
    pub fn endpoints(self) -> (usize, usize) {
        match self {
            Edge::P1P2 => (0, 1),
            Edge::P2P3 => (1, 2),
            Edge::P3P1 => (2, 0),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = self.endpoints();
        write!(f, "P{}-P{}", a + 1, b + 1)
    }
}

/// A triangle with a unit normal at each vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalTriangle<S> {
    pub vertices: [Vector3<S>; 3],
    pub normals: [Vector3<S>; 3],
}

impl<S: Real> NormalTriangle<S> {
    pub fn new(vertices: [Vector3<S>; 3], normals: [Vector3<S>; 3]) -> Self {
        Self { vertices, normals }
    }

    /// A triangle whose vertex normals all equal its face normal.
    pub fn flat(vertices: [Vector3<S>; 3]) -> Self {
        let n = face_normal(&vertices);
        Self {
            vertices,
            normals: [n; 3],
        }
    }

    pub fn face_normal(&self) -> Vector3<S> {
        face_normal(&self.vertices)
    }

    /// Start point, start normal, end point and end normal of `edge`.
    pub fn edge(&self, edge: Edge) -> (Vector3<S>, Vector3<S>, Vector3<S>, Vector3<S>) {
        let (a, b) = edge.endpoints();
        (
            self.vertices[a],
            self.normals[a],
            self.vertices[b],
            self.normals[b],
        )
    }
}

/// Unit normal of the triangle `p1, p2, p3` following the winding order, or
/// zero for a degenerate triangle.
pub fn face_normal<S: Real>(vertices: &[Vector3<S>; 3]) -> Vector3<S> {
    let [p1, p2, p3] = *vertices;
    normalize_or_zero((p2 - p1).cross(p3 - p1))
}
