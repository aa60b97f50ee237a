use cgmath::Vector3;
use log::debug;

use crate::transform::{Frame, Transform};
use crate::{CubicControlPoints, Real};

/// Carries control points along with their triangle when its vertices move.
///
/// The control points are expressed in the frame of the old triangle and then
/// placed in the frame of the new one, so the patch keeps its shape relative
/// to the first edge and the face normal. A degenerate old or new triangle
/// collapses every control point onto the new first vertex.
pub fn update_on_vertex_move<S: Real>(
    old_vertices: &[Vector3<S>; 3],
    cps: &CubicControlPoints<S>,
    new_vertices: &[Vector3<S>; 3],
) -> CubicControlPoints<S> {
    let transform = vertex_move_transform(old_vertices, new_vertices);
    cps.map(|p| transform.transform_point(p))
}

/// The rigid transform from the frame of `old_vertices` to the frame of
/// `new_vertices`.
pub fn vertex_move_transform<S: Real>(
    old_vertices: &[Vector3<S>; 3],
    new_vertices: &[Vector3<S>; 3],
) -> Transform<S> {
    let [o1, o2, o3] = *old_vertices;
    let [n1, n2, n3] = *new_vertices;
    let old = Frame::from_triangle(o1, o2, o3);
    let new = Frame::from_triangle(n1, n2, n3);
    if old.is_degenerate() || new.is_degenerate() {
        debug!("degenerate triangle, control points collapse onto {:?}", n1);
    }
    Transform::world_to_local(&old).then(&Transform::local_to_world(&new))
}
