use cgmath::{InnerSpace, Vector3};

use crate::geometry::nearest_points_between_lines;
use crate::{Edge, PatchError, Real};

/// Recovers the patch parameters `(eta, xi)` of `pos`.
///
/// `pos` must lie in the plane of the triangle; this is not checked and points
/// off the plane give meaningless parameters. The line through `pos` parallel
/// to `P2P3` meets `P1P2` at a point whose distance from `P1` gives `eta`, and
/// the line through `pos` parallel to `P1P2` meets `P2P3` at a point whose
/// distance from `P2` gives `xi`.
pub fn position_to_params<S: Real>(
    pos: Vector3<S>,
    vertices: &[Vector3<S>; 3],
) -> Result<(S, S), PatchError> {
    let [p1, p2, p3] = *vertices;

    let (x12, _) = nearest_points_between_lines(p1, p2, pos, pos + (p3 - p2))
        .ok_or(PatchError::NoEdgeIntersection { edge: Edge::P1P2 })?;
    let (_, x23) = nearest_points_between_lines(pos, pos + (p2 - p1), p2, p3)
        .ok_or(PatchError::NoEdgeIntersection { edge: Edge::P2P3 })?;

    let eta = (x12 - p1).magnitude() / (p2 - p1).magnitude();
    let xi = (x23 - p2).magnitude() / (p3 - p2).magnitude();
    Ok((eta, xi))
}
