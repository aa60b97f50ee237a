use cgmath::Vector3;

use crate::{
    build_cubic, build_quadratic, evaluate_cubic, evaluate_quadratic, position_to_params,
    project_to_cubic, update_on_vertex_move, CubicControlPoints, NormalTriangle, PatchConfig,
    PatchError, QuadraticControlPoints, Real,
};

/// Parameters of the three edge midpoints, in edge order.
pub const EDGE_MIDPOINT_PARAMS: [(f64, f64); 3] = [(0.5, 0.0), (1.0, 0.5), (0.5, 0.5)];

/// A cubic patch together with the triangle it was built over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicPatch<S> {
    pub vertices: [Vector3<S>; 3],
    pub control_points: CubicControlPoints<S>,
}

impl<S: Real> CubicPatch<S> {
    pub fn new(triangle: &NormalTriangle<S>, config: &PatchConfig<S>) -> Self {
        Self {
            vertices: triangle.vertices,
            control_points: build_cubic(triangle, config),
        }
    }

    pub fn point_at(&self, eta: S, xi: S) -> Vector3<S> {
        evaluate_cubic(eta, xi, &self.vertices, &self.control_points)
    }

    pub fn params_of(&self, pos: Vector3<S>) -> Result<(S, S), PatchError> {
        position_to_params(pos, &self.vertices)
    }

    /// Maps a point in the plane of the triangle onto the patch.
    pub fn project(&self, pos: Vector3<S>) -> Result<Vector3<S>, PatchError> {
        project_to_cubic(pos, &self.vertices, &self.control_points)
    }

    pub fn edge_midpoints(&self) -> [Vector3<S>; 3] {
        EDGE_MIDPOINT_PARAMS.map(|(eta, xi)| self.point_at(S::lit(eta), S::lit(xi)))
    }

    /// This patch carried along with its vertices to `vertices`.
    pub fn moved_to(&self, vertices: [Vector3<S>; 3]) -> Self {
        Self {
            control_points: update_on_vertex_move(&self.vertices, &self.control_points, &vertices),
            vertices,
        }
    }
}

/// A quadratic patch together with the triangle it was built over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticPatch<S> {
    pub vertices: [Vector3<S>; 3],
    pub coefficients: QuadraticControlPoints<S>,
}

impl<S: Real> QuadraticPatch<S> {
    pub fn new(triangle: &NormalTriangle<S>, config: &PatchConfig<S>) -> Self {
        Self {
            vertices: triangle.vertices,
            coefficients: build_quadratic(triangle, config),
        }
    }

    pub fn point_at(&self, eta: S, zeta: S) -> Vector3<S> {
        evaluate_quadratic(eta, zeta, &self.vertices, &self.coefficients)
    }

    pub fn edge_midpoints(&self) -> [Vector3<S>; 3] {
        EDGE_MIDPOINT_PARAMS.map(|(eta, zeta)| self.point_at(S::lit(eta), S::lit(zeta)))
    }
}
