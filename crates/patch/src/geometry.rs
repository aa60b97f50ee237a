use cgmath::{InnerSpace, Vector3};
use num_traits::Zero;

use crate::Real;

/// An infinite line through `point` along the unit vector `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line<S> {
    pub point: Vector3<S>,
    pub direction: Vector3<S>,
}

impl<S: Real> Line<S> {
    /// The point on this line closest to `p`.
    pub fn nearest_point(&self, p: Vector3<S>) -> Vector3<S> {
        nearest_point_on_line(p, self.point, self.direction)
    }
}

/// Scales `v` to unit length.
///
/// The result is not finite when `v` has zero length, use `try_normalize` for
/// vectors that may be degenerate.
#[inline(always)]
pub fn normalize<S: Real>(v: Vector3<S>) -> Vector3<S> {
    v / v.magnitude()
}

/// Scales `v` to unit length, or returns `None` if `v` is shorter than the
/// length tolerance.
pub fn try_normalize<S: Real>(v: Vector3<S>) -> Option<Vector3<S>> {
    let len = v.magnitude();
    if len <= S::LENGTH_TOLERANCE {
        None
    } else {
        Some(v / len)
    }
}

/// Like `try_normalize`, but degenerate vectors come back as the zero vector.
pub fn normalize_or_zero<S: Real>(v: Vector3<S>) -> Vector3<S> {
    try_normalize(v).unwrap_or_else(Vector3::zero)
}

/// Unit direction and length of the segment `from -> to`.
///
/// Returns `None` if the two points coincide.
pub fn line_vector<S: Real>(from: Vector3<S>, to: Vector3<S>) -> Option<(Vector3<S>, S)> {
    let d = to - from;
    let len = d.magnitude();
    if len <= S::LENGTH_TOLERANCE {
        None
    } else {
        Some((d / len, len))
    }
}

#[inline(always)]
pub fn midpoint<S: Real>(a: Vector3<S>, b: Vector3<S>) -> Vector3<S> {
    (a + b) * S::lit(0.5)
}

/// The `D` of the plane `n.x * x + n.y * y + n.z * z = D` through `point`.
#[inline(always)]
pub fn plane_d<S: Real>(point: Vector3<S>, normal: Vector3<S>) -> S {
    point.dot(normal)
}

/// Intersects the planes `n1 . x = d1` and `n2 . x = d2`.
///
/// The line is pinned down with a third plane through the origin whose normal
/// is the line direction, so the returned point is the point of the line
/// closest to the origin. Returns `None` for parallel planes.
pub fn intersect_planes<S: Real>(
    n1: Vector3<S>,
    d1: S,
    n2: Vector3<S>,
    d2: S,
) -> Option<Line<S>> {
    let direction = n1.cross(n2);
    if direction.magnitude() < S::VECTOR_TOLERANCE {
        return None;
    }
    let direction = normalize(direction);

    // Cramer's rule on the rows n1, n2, direction with right hand side
    // (d1, d2, 0).
    let n2_x_dir = n2.cross(direction);
    let det = n1.dot(n2_x_dir);
    if det.abs() < S::VECTOR_TOLERANCE {
        return None;
    }
    let point = (n2_x_dir * d1 + direction.cross(n1) * d2) / det;

    Some(Line { point, direction })
}

/// Orthogonal projection of `point` onto the line through `line_point` along
/// the unit vector `line_dir`.
#[inline(always)]
pub fn nearest_point_on_line<S: Real>(
    point: Vector3<S>,
    line_point: Vector3<S>,
    line_dir: Vector3<S>,
) -> Vector3<S> {
    line_point + line_dir * line_dir.dot(point - line_point)
}

/// Reflects `v` across the line through the origin along `axis`.
///
/// `axis` does not need to be unit length. A zero axis reflects through the
/// origin.
pub fn mirror_across_axis<S: Real>(axis: Vector3<S>, v: Vector3<S>) -> Vector3<S> {
    let len2 = axis.magnitude2();
    if len2.is_zero() {
        return -v;
    }
    let projection = axis * (axis.dot(v) / len2);
    projection * S::lit(2.0) - v
}

/// Closest points between the line through `p1`, `q1` and the line through
/// `p2`, `q2`.
///
/// Returns `None` if either pair of points coincides or the lines are
/// parallel.
pub fn nearest_points_between_lines<S: Real>(
    p1: Vector3<S>,
    q1: Vector3<S>,
    p2: Vector3<S>,
    q2: Vector3<S>,
) -> Option<(Vector3<S>, Vector3<S>)> {
    let (u1, _) = line_vector(p1, q1)?;
    let (u2, _) = line_vector(p2, q2)?;

    let cos = u1.dot(u2);
    let sin2 = S::one() - cos * cos;
    if sin2 < S::VECTOR_TOLERANCE {
        return None;
    }

    let w = p2 - p1;
    let w1 = w.dot(u1);
    let w2 = w.dot(u2);
    let t1 = (w1 - cos * w2) / sin2;
    let t2 = (cos * w1 - w2) / sin2;

    Some((p1 + u1 * t1, p2 + u2 * t2))
}
