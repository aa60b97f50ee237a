use std::collections::HashMap;

use cgmath::InnerSpace;
use ordered_float::OrderedFloat;

use crate::{Triangle, TriangleMesh, Vector3};

/// Faces whose normals have a dot product above this with the current face
/// contribute to its vertex normals.
pub const NORMAL_SMOOTHING_THRESHOLD: f32 = 0.85;

type PointKey = [OrderedFloat<f32>; 3];

fn point_key(p: &Vector3) -> PointKey {
    [p.x.into(), p.y.into(), p.z.into()]
}

/// Maintains geometry for a single facet.
///
/// This type must be paired with a list of vertices. The points here are only indices into
/// another vector, so every facet that touches a vertex refers to the same entry. Normals are
/// averaged across those shared entries.
///
/// As a simple example, consider a simple geometry such as:
///
///    *-------*
///    |\     /|
///    | \   / |
///    |  \ /  |
///    |   *   |
///    |  / \  |
///    | /   \ |
///    |/     \|
///    *-------*
///
/// An STL file lists 12 points for these 4 facets. After indexing there are 5 points, and the
/// center point knows all 4 of its facets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facet {
    pub p0: u32,
    pub p1: u32,
    pub p2: u32,
}

impl Facet {
    pub fn indices(&self) -> [usize; 3] {
        [self.p0 as usize, self.p1 as usize, self.p2 as usize]
    }
}

#[derive(Debug, Clone, Default)]
pub struct VertexIndex {
    pub points: Vec<Vector3>,
    pub facets: Vec<Facet>,
}

impl VertexIndex {
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn triangle(&self, facet: usize) -> Triangle {
        let [a, b, c] = self.facets[facet].indices();
        Triangle::new(self.points[a], self.points[b], self.points[c])
    }

    pub fn face_normal(&self, facet: usize) -> Vector3 {
        self.triangle(facet).normal()
    }

    /// For each vertex, the facets that use it.
    pub fn vertex_faces(&self) -> Vec<Vec<usize>> {
        let mut faces = vec![Vec::new(); self.points.len()];
        for (i, facet) in self.facets.iter().enumerate() {
            for v in facet.indices() {
                faces[v].push(i);
            }
        }
        faces
    }

    /// Vertex normals for each corner of each facet.
    ///
    /// A corner normal is the normalized average of the normals of the facets around that vertex
    /// that face roughly the same way as the facet itself, so sharp creases stay sharp. A corner
    /// with no such neighbours keeps the face normal.
    pub fn corner_normals(&self) -> Vec<[Vector3; 3]> {
        let face_normals: Vec<Vector3> = (0..self.facets.len())
            .map(|i| self.face_normal(i))
            .collect();
        let vertex_faces = self.vertex_faces();

        self.facets
            .iter()
            .zip(&face_normals)
            .map(|(facet, &normal)| {
                facet.indices().map(|v| {
                    let sum = vertex_faces[v]
                        .iter()
                        .map(|&f| face_normals[f])
                        .filter(|n| n.dot(normal) > NORMAL_SMOOTHING_THRESHOLD)
                        .fold(Vector3::new(0.0, 0.0, 0.0), |acc, n| acc + n);
                    let len = sum.magnitude();
                    if len > 0.0 {
                        sum / len
                    } else {
                        normal
                    }
                })
            })
            .collect()
    }
}

impl TriangleMesh for VertexIndex {
    /// Indexes a triangle soup, merging points with identical coordinates.
    fn from_triangles(triangles: Vec<Triangle>) -> Self {
        let mut index: HashMap<PointKey, u32> = HashMap::new();
        let mut points = Vec::new();
        let mut lookup = |p: Vector3| {
            *index.entry(point_key(&p)).or_insert_with(|| {
                points.push(p);
                points.len() as u32 - 1
            })
        };

        let facets = triangles
            .iter()
            .map(|t| Facet {
                p0: lookup(t.p0),
                p1: lookup(t.p1),
                p2: lookup(t.p2),
            })
            .collect();

        log::debug!(
            "indexed {} triangles into {} vertices",
            triangles.len(),
            points.len()
        );
        VertexIndex { points, facets }
    }

    fn triangle_count(&self) -> usize {
        self.facets.len()
    }

    fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.facets.len()).map(|i| self.triangle(i))
    }
}
