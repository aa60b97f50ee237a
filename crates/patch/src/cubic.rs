use cgmath::{InnerSpace, Vector3};
use log::{debug, warn};

use crate::geometry::{
    intersect_planes, line_vector, midpoint, mirror_across_axis, nearest_points_between_lines,
    plane_d, try_normalize,
};
use crate::params::position_to_params;
use crate::{Edge, NormalTriangle, PatchConfig, PatchError, Real};

/// Control points of a cubic patch.
///
/// Each edge has two control points ordered along the edge direction, plus
/// one shared center point. All points are absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicControlPoints<S> {
    pub edges: [[Vector3<S>; 2]; 3],
    pub center: Vector3<S>,
}

impl<S: Real> CubicControlPoints<S> {
    pub fn edge(&self, edge: Edge) -> [Vector3<S>; 2] {
        self.edges[edge.index()]
    }

    /// The 7 points in file order: both points of each edge, then the center.
    pub fn to_array(&self) -> [Vector3<S>; 7] {
        let [[a, b], [c, d], [e, f]] = self.edges;
        [a, b, c, d, e, f, self.center]
    }

    pub fn from_array(points: [Vector3<S>; 7]) -> Self {
        let [a, b, c, d, e, f, center] = points;
        Self {
            edges: [[a, b], [c, d], [e, f]],
            center,
        }
    }

    /// Applies `f` to every control point.
    pub fn map<F: FnMut(Vector3<S>) -> Vector3<S>>(&self, f: F) -> Self {
        Self::from_array(self.to_array().map(f))
    }
}

/// Builds the control points of the cubic patch over `triangle`.
pub fn build_cubic<S: Real>(
    triangle: &NormalTriangle<S>,
    config: &PatchConfig<S>,
) -> CubicControlPoints<S> {
    let edges = Edge::ALL.map(|edge| {
        let (pa, na, pb, nb) = triangle.edge(edge);
        control_points_edge(pa, na, pb, nb, config)
    });
    let center = center_control_point(&triangle.vertices, &edges);
    CubicControlPoints { edges, center }
}

/// The two control points of the edge `pa -> pb`.
pub fn control_points_edge<S: Real>(
    pa: Vector3<S>,
    na: Vector3<S>,
    pb: Vector3<S>,
    nb: Vector3<S>,
    config: &PatchConfig<S>,
) -> [Vector3<S>; 2] {
    let [p11_0, p11_1] = match edge_apex(pa, na, pb, nb, config) {
        Some(p11) => correct_apex(p11, pa, pb),
        None => [midpoint(pa, pb); 2],
    };
    let third = S::lit(3.0);
    let two = S::lit(2.0);
    [(pa + p11_0 * two) / third, (pb + p11_1 * two) / third]
}

/// The apex `p11` of the quadratic curve along the edge, or `None` when the
/// edge is flat or degenerate.
///
/// The apex lies on the intersection of both tangent planes, closest to the
/// edge midpoint, pushed onto the reference plane through `pa` that bisects
/// the two normals around the edge.
fn edge_apex<S: Real>(
    pa: Vector3<S>,
    na: Vector3<S>,
    pb: Vector3<S>,
    nb: Vector3<S>,
    config: &PatchConfig<S>,
) -> Option<Vector3<S>> {
    if S::one() - na.dot(nb).abs() < config.angle_tolerance() {
        return None;
    }

    let e = pb - pa;
    let Some(reference) = try_normalize(e.cross(na) + e.cross(nb)) else {
        debug!("no reference plane for edge {:?} -> {:?}", pa, pb);
        return None;
    };
    let Some(line) = intersect_planes(na, plane_d(pa, na), nb, plane_d(pb, nb)) else {
        debug!("tangent planes at {:?} and {:?} do not meet", pa, pb);
        return None;
    };

    let x = line.nearest_point(midpoint(pa, pb));
    Some(x + reference * (plane_d(pa, reference) - plane_d(x, reference)))
}

/// Moves an apex that fell outside the edge back over it.
///
/// Returns the apex to use for the first and second control point. When the
/// apex lies before `pa` or past `pb` along the edge, each endpoint's ray is
/// mirrored across the edge and intersected with the ray from the opposite
/// endpoint through the apex.
fn correct_apex<S: Real>(p11: Vector3<S>, pa: Vector3<S>, pb: Vector3<S>) -> [Vector3<S>; 2] {
    let (Some((edge_dir, _)), Some((a_dir, _)), Some((b_dir, _))) = (
        line_vector(pa, pb),
        line_vector(pa, p11),
        line_vector(pb, p11),
    ) else {
        return [p11; 2];
    };

    let inverted = edge_dir.dot(a_dir) < S::zero() || edge_dir.dot(b_dir) > S::zero();
    if !inverted {
        return [p11; 2];
    }

    let a_mirror = mirror_across_axis(edge_dir, a_dir);
    let b_mirror = mirror_across_axis(edge_dir, b_dir);

    let first = nearest_points_between_lines(pa, p11, pb, pb + b_mirror).map(|(p, _)| p);
    let second = nearest_points_between_lines(pb, p11, pa, pa + a_mirror).map(|(p, _)| p);

    [first, second].map(|corrected| {
        corrected.unwrap_or_else(|| {
            warn!(
                "apex correction failed on edge {:?} -> {:?}, using the midpoint",
                pa, pb
            );
            midpoint(pa, pb)
        })
    })
}

/// The center control point: a quarter of the edge control points minus a
/// sixth of the vertices.
pub fn center_control_point<S: Real>(
    vertices: &[Vector3<S>; 3],
    edges: &[[Vector3<S>; 2]; 3],
) -> Vector3<S> {
    let edge_sum = edges
        .iter()
        .flatten()
        .fold(Vector3::new(S::zero(), S::zero(), S::zero()), |acc, &p| acc + p);
    let vertex_sum = vertices[0] + vertices[1] + vertices[2];
    edge_sum / S::lit(4.0) - vertex_sum / S::lit(6.0)
}

/// Evaluates the cubic patch at `(eta, xi)`.
///
/// The corners are `(0, 0)`, `(1, 0)` and `(1, 1)`.
pub fn evaluate_cubic<S: Real>(
    eta: S,
    xi: S,
    vertices: &[Vector3<S>; 3],
    cps: &CubicControlPoints<S>,
) -> Vector3<S> {
    let u = eta - xi;
    let v = xi;
    let w = S::one() - eta;
    let three = S::lit(3.0);
    let six = S::lit(6.0);

    let [p1, p2, p3] = *vertices;
    let [[c11, c12], [c21, c22], [c31, c32]] = cps.edges;

    p1 * (w * w * w)
        + c11 * (three * u * w * w)
        + c12 * (three * u * u * w)
        + p2 * (u * u * u)
        + c21 * (three * u * u * v)
        + c22 * (three * u * v * v)
        + p3 * (v * v * v)
        + c31 * (three * v * v * w)
        + c32 * (three * v * w * w)
        + cps.center * (six * u * v * w)
}

/// Maps `pos`, a point in the plane of the triangle, onto the patch.
pub fn project_to_cubic<S: Real>(
    pos: Vector3<S>,
    vertices: &[Vector3<S>; 3],
    cps: &CubicControlPoints<S>,
) -> Result<Vector3<S>, PatchError> {
    let (eta, xi) = position_to_params(pos, vertices)?;
    Ok(evaluate_cubic(eta, xi, vertices, cps))
}
