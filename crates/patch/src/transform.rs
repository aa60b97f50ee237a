use cgmath::{InnerSpace, Vector3};
use num_traits::Zero;

use crate::geometry::{line_vector, normalize_or_zero};
use crate::Real;

/// A 4x4 affine transform in row-vector convention.
///
/// Points are rows `[x, y, z, 1]` multiplied from the left, so the
/// translation lives in the last row and `a.then(&b)` applies `a` first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform<S> {
    pub rows: [[S; 4]; 4],
}

impl<S: Real> Transform<S> {
    pub fn identity() -> Self {
        let mut rows = [[S::zero(); 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = S::one();
        }
        Self { rows }
    }

    pub fn translation(offset: Vector3<S>) -> Self {
        let mut t = Self::identity();
        t.rows[3][0] = offset.x;
        t.rows[3][1] = offset.y;
        t.rows[3][2] = offset.z;
        t
    }

    /// Rotation into the basis `x`, `y`, `z`.
    ///
    /// The axes become the columns of the 3x3 block, so a row vector times
    /// this matrix yields its coordinates along each axis. The axes must be
    /// orthonormal for the transpose to be the inverse.
    pub fn axis_rotation(x: Vector3<S>, y: Vector3<S>, z: Vector3<S>) -> Self {
        let mut t = Self::identity();
        for (i, axis) in [x, y, z].iter().enumerate() {
            t.rows[0][i] = axis.x;
            t.rows[1][i] = axis.y;
            t.rows[2][i] = axis.z;
        }
        t
    }

    /// Maps world coordinates into coordinates local to `frame`.
    pub fn world_to_local(frame: &Frame<S>) -> Self {
        Self::translation(-frame.origin).then(&Self::axis_rotation(frame.x, frame.y, frame.z))
    }

    /// Maps coordinates local to `frame` back into world coordinates.
    ///
    /// This is the inverse of `world_to_local` built from the transposed
    /// rotation followed by the translation. The axes of a frame are
    /// orthonormal by construction so no general inverse is needed.
    pub fn local_to_world(frame: &Frame<S>) -> Self {
        Self::axis_rotation(frame.x, frame.y, frame.z)
            .transpose()
            .then(&Self::translation(frame.origin))
    }

    pub fn transpose(&self) -> Self {
        let mut rows = [[S::zero(); 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, c) in row.iter_mut().enumerate() {
                *c = self.rows[j][i];
            }
        }
        Self { rows }
    }

    /// The product `self * other`: apply `self`, then `other`.
    pub fn then(&self, other: &Self) -> Self {
        let mut rows = [[S::zero(); 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, c) in row.iter_mut().enumerate() {
                *c = (0..4).fold(S::zero(), |acc, k| acc + self.rows[i][k] * other.rows[k][j]);
            }
        }
        Self { rows }
    }

    /// The product of the row vector `row` with this matrix.
    pub fn transform_row(&self, row: [S; 4]) -> [S; 4] {
        let mut out = [S::zero(); 4];
        for (j, c) in out.iter_mut().enumerate() {
            *c = (0..4).fold(S::zero(), |acc, i| acc + row[i] * self.rows[i][j]);
        }
        out
    }

    pub fn transform_point(&self, p: Vector3<S>) -> Vector3<S> {
        let [x, y, z, _] = self.transform_row([p.x, p.y, p.z, S::one()]);
        Vector3::new(x, y, z)
    }

    /// Transforms a direction, ignoring the translation.
    pub fn transform_vector(&self, v: Vector3<S>) -> Vector3<S> {
        let [x, y, z, _] = self.transform_row([v.x, v.y, v.z, S::zero()]);
        Vector3::new(x, y, z)
    }
}

/// A right handed coordinate frame attached to a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame<S> {
    pub origin: Vector3<S>,
    pub x: Vector3<S>,
    pub y: Vector3<S>,
    pub z: Vector3<S>,
}

impl<S: Real> Frame<S> {
    /// Frame with its origin at `p1`, `x` along `p1 -> p2` and `z` along the
    /// triangle normal.
    ///
    /// Degenerate triangles produce zero axes rather than non-finite ones, in
    /// which case every point maps onto the origin.
    pub fn from_triangle(p1: Vector3<S>, p2: Vector3<S>, p3: Vector3<S>) -> Self {
        let x = line_vector(p1, p2).map_or_else(Vector3::zero, |(dir, _)| dir);
        let z = normalize_or_zero(x.cross(p3 - p1));
        let y = z.cross(x);
        Self {
            origin: p1,
            x,
            y,
            z,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.z.magnitude2().is_zero()
    }
}
