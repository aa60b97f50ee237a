use std::collections::HashMap;

use npatch::{
    vertex_move_transform, CubicPatch, Edge, NormalTriangle, PatchConfig, QuadraticPatch,
};

use crate::{to_f32, to_f64, MeshError, Triangle, TriangleMesh, Vector3, VertexIndex};

/// Points in patch space are double precision regardless of the mesh.
pub type Point = cgmath::Vector3<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degree {
    Quadratic,
    Cubic,
}

impl Degree {
    /// Number of coefficient vectors stored per face.
    pub fn coefficient_count(self) -> usize {
        match self {
            Degree::Quadratic => 3,
            Degree::Cubic => 7,
        }
    }
}

/// The patch over a single face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FacePatch {
    Quadratic(QuadraticPatch<f64>),
    Cubic(CubicPatch<f64>),
}

impl FacePatch {
    pub fn build(triangle: &NormalTriangle<f64>, degree: Degree, config: &PatchConfig<f64>) -> Self {
        match degree {
            Degree::Quadratic => FacePatch::Quadratic(QuadraticPatch::new(triangle, config)),
            Degree::Cubic => FacePatch::Cubic(CubicPatch::new(triangle, config)),
        }
    }

    pub fn vertices(&self) -> [Point; 3] {
        match self {
            FacePatch::Quadratic(p) => p.vertices,
            FacePatch::Cubic(p) => p.vertices,
        }
    }

    /// Coefficients in file order, 3 for quadratic and 7 for cubic patches.
    pub fn coefficients(&self) -> Vec<Point> {
        match self {
            FacePatch::Quadratic(p) => p.coefficients.to_array().to_vec(),
            FacePatch::Cubic(p) => p.control_points.to_array().to_vec(),
        }
    }

    pub fn point_at(&self, eta: f64, xi: f64) -> Point {
        match self {
            FacePatch::Quadratic(p) => p.point_at(eta, xi),
            FacePatch::Cubic(p) => p.point_at(eta, xi),
        }
    }

    pub fn edge_midpoints(&self) -> [Point; 3] {
        match self {
            FacePatch::Quadratic(p) => p.edge_midpoints(),
            FacePatch::Cubic(p) => p.edge_midpoints(),
        }
    }
}

/// A mesh with a patch over every face.
#[derive(Debug, Clone)]
pub struct PatchedMesh {
    mesh: VertexIndex,
    degree: Degree,
    config: PatchConfig<f64>,
    triangles: Vec<NormalTriangle<f64>>,
    patches: Vec<FacePatch>,
}

impl PatchedMesh {
    /// Builds patches over `mesh` using smoothed vertex normals.
    pub fn build(mesh: VertexIndex, degree: Degree, config: PatchConfig<f64>) -> Self {
        let triangles: Vec<NormalTriangle<f64>> = mesh
            .facets
            .iter()
            .zip(mesh.corner_normals())
            .map(|(facet, normals)| {
                NormalTriangle::new(
                    facet.indices().map(|i| to_f64(mesh.points[i])),
                    normals.map(to_f64),
                )
            })
            .collect();
        let patches = build_patches(&triangles, degree, &config);
        log::info!(
            "built {} {:?} patches over {} vertices",
            patches.len(),
            degree,
            mesh.vertex_count()
        );

        Self {
            mesh,
            degree,
            config,
            triangles,
            patches,
        }
    }

    pub fn mesh(&self) -> &VertexIndex {
        &self.mesh
    }

    pub fn degree(&self) -> Degree {
        self.degree
    }

    pub fn patches(&self) -> &[FacePatch] {
        &self.patches
    }

    pub fn point_at(&self, face: usize, eta: f64, xi: f64) -> Result<Point, MeshError> {
        self.patches
            .get(face)
            .map(|p| p.point_at(eta, xi))
            .ok_or(MeshError::FaceOutOfRange {
                index: face,
                count: self.patches.len(),
            })
    }

    /// Splits every face into four, placing the new vertices on the patches
    /// at the edge midpoints.
    ///
    /// Neighbouring patches need not agree along a shared edge, so each edge
    /// gets a single new vertex: the average of the midpoints of the patches
    /// on either side. The refined mesh stays connected, with one vertex per
    /// original vertex and edge.
    pub fn subdivide(&self) -> VertexIndex {
        let mut shared: HashMap<(usize, usize), (Point, u32)> = HashMap::new();
        for (facet, patch) in self.mesh.facets.iter().zip(&self.patches) {
            let indices = facet.indices();
            for (edge, m) in Edge::ALL.iter().zip(patch.edge_midpoints()) {
                let entry = shared
                    .entry(edge_key(&indices, *edge))
                    .or_insert((Point::new(0.0, 0.0, 0.0), 0));
                entry.0 += m;
                entry.1 += 1;
            }
        }

        let triangles = self
            .mesh
            .facets
            .iter()
            .flat_map(|facet| {
                let indices = facet.indices();
                let [p1, p2, p3] = indices.map(|i| self.mesh.points[i]);
                let [m12, m23, m31] = Edge::ALL.map(|edge| {
                    let (sum, count) = shared[&edge_key(&indices, edge)];
                    to_f32(sum / f64::from(count))
                });
                [
                    Triangle::new(p1, m12, m31),
                    Triangle::new(m12, p2, m23),
                    Triangle::new(m31, m23, p3),
                    Triangle::new(m12, m23, m31),
                ]
            })
            .collect();
        VertexIndex::from_triangles(triangles)
    }

    /// Moves a vertex and updates the patches of every face around it.
    ///
    /// Each face carries its vertex normals along with the rigid motion of
    /// its frame. Cubic control points follow the same motion, quadratic
    /// patches are rebuilt from the moved normals.
    pub fn move_vertex(&mut self, vertex: usize, position: Vector3) -> Result<(), MeshError> {
        let count = self.mesh.vertex_count();
        if vertex >= count {
            return Err(MeshError::VertexOutOfRange {
                index: vertex,
                count,
            });
        }
        self.mesh.points[vertex] = position;

        let mut moved = 0;
        for (face, facet) in self.mesh.facets.iter().enumerate() {
            let indices = facet.indices();
            if !indices.contains(&vertex) {
                continue;
            }
            let vertices = indices.map(|i| to_f64(self.mesh.points[i]));
            let old = self.triangles[face];
            let transform = vertex_move_transform(&old.vertices, &vertices);
            let triangle =
                NormalTriangle::new(vertices, old.normals.map(|n| transform.transform_vector(n)));

            self.patches[face] = match self.patches[face] {
                FacePatch::Cubic(patch) => FacePatch::Cubic(patch.moved_to(vertices)),
                FacePatch::Quadratic(_) => {
                    FacePatch::Quadratic(QuadraticPatch::new(&triangle, &self.config))
                }
            };
            self.triangles[face] = triangle;
            moved += 1;
        }
        log::debug!("vertex {} moved, {} patches updated", vertex, moved);
        Ok(())
    }
}

/// Vertex indices of `edge`, smallest first, so both faces on an edge agree.
fn edge_key(indices: &[usize; 3], edge: Edge) -> (usize, usize) {
    let (a, b) = edge.endpoints();
    let (a, b) = (indices[a], indices[b]);
    (a.min(b), a.max(b))
}

#[cfg(feature = "parallel")]
fn build_patches(
    triangles: &[NormalTriangle<f64>],
    degree: Degree,
    config: &PatchConfig<f64>,
) -> Vec<FacePatch> {
    use rayon::prelude::*;
    triangles
        .par_iter()
        .map(|t| FacePatch::build(t, degree, config))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn build_patches(
    triangles: &[NormalTriangle<f64>],
    degree: Degree,
    config: &PatchConfig<f64>,
) -> Vec<FacePatch> {
    triangles
        .iter()
        .map(|t| FacePatch::build(t, degree, config))
        .collect()
}
