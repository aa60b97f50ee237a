use cgmath::{InnerSpace, Vector3};
use num_traits::Zero;

use crate::geometry::{intersect_planes, midpoint, plane_d};
use crate::{Edge, NormalTriangle, PatchConfig, Real};

/// Curvature coefficients of a quadratic patch, one per edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticControlPoints<S> {
    pub edges: [Vector3<S>; 3],
}

impl<S: Real> QuadraticControlPoints<S> {
    pub fn edge(&self, edge: Edge) -> Vector3<S> {
        self.edges[edge.index()]
    }

    pub fn to_array(&self) -> [Vector3<S>; 3] {
        self.edges
    }

    pub fn is_flat(&self) -> bool {
        self.edges.iter().all(|c| c.is_zero())
    }
}

/// Builds the quadratic patch over `triangle`, using its own face normal.
pub fn build_quadratic<S: Real>(
    triangle: &NormalTriangle<S>,
    config: &PatchConfig<S>,
) -> QuadraticControlPoints<S> {
    build_quadratic_with_face_normal(triangle, triangle.face_normal(), config)
}

pub fn build_quadratic_with_face_normal<S: Real>(
    triangle: &NormalTriangle<S>,
    face_normal: Vector3<S>,
    config: &PatchConfig<S>,
) -> QuadraticControlPoints<S> {
    let edges = Edge::ALL.map(|edge| {
        let (pa, na, pb, nb) = triangle.edge(edge);
        quadratic_edge_coefficient(face_normal, pa, na, pb, nb, config)
    });
    QuadraticControlPoints { edges }
}

/// Curvature coefficient of the edge `pa -> pb`.
///
/// This is twice the offset from the edge midpoint to the closest point on
/// the intersection of both tangent planes, or zero for a flat edge.
pub fn quadratic_edge_coefficient<S: Real>(
    face_normal: Vector3<S>,
    pa: Vector3<S>,
    na: Vector3<S>,
    pb: Vector3<S>,
    nb: Vector3<S>,
    config: &PatchConfig<S>,
) -> Vector3<S> {
    let normal_deviation = S::one() - na.dot(nb).abs();
    if normal_deviation < config.angle_tolerance() {
        // Nearly parallel normals only keep their curvature if they are both
        // aligned with the face and not quite identical.
        let face_deviation = S::one() - face_normal.dot(na).abs();
        if face_deviation >= config.face_alignment_tolerance
            || normal_deviation < config.flat_normal_tolerance
        {
            return Vector3::zero();
        }
    }

    let Some(line) = intersect_planes(na, plane_d(pa, na), nb, plane_d(pb, nb)) else {
        return Vector3::zero();
    };
    let mid = midpoint(pa, pb);
    (mid - line.nearest_point(mid)) * S::lit(2.0)
}

/// Evaluates the quadratic patch at `(eta, zeta)`.
pub fn evaluate_quadratic<S: Real>(
    eta: S,
    zeta: S,
    vertices: &[Vector3<S>; 3],
    coefs: &QuadraticControlPoints<S>,
) -> Vector3<S> {
    let a1 = S::one() - eta;
    let a2 = eta - zeta;
    let [p1, p2, p3] = *vertices;
    let [c1, c2, c3] = coefs.edges;

    p1 * a1 + p2 * a2 + p3 * zeta - c1 * (a1 * a2) - c2 * (a2 * zeta) - c3 * (a1 * zeta)
}
