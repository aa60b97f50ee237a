use crate::Real;

/// Tolerances that control when a patch edge is treated as flat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchConfig<S> {
    /// Maximum deviation, in degrees, between two vertex normals for them to
    /// still count as parallel.
    pub max_deviation_angle: S,

    /// Degree 2 only. Vertex normals closer than this to parallel produce a
    /// flat edge even when they agree with the face normal.
    pub flat_normal_tolerance: S,

    /// Degree 2 only. How far a vertex normal may deviate from the face normal
    /// for the edge to be considered aligned with the face.
    pub face_alignment_tolerance: S,
}

impl<S: Real> PatchConfig<S> {
    /// Compares against `1 - |na . nb|`.
    pub fn angle_tolerance(&self) -> S {
        self.max_deviation_angle.to_radians()
    }

    pub fn with_max_deviation_angle(self, degrees: S) -> Self {
        Self {
            max_deviation_angle: degrees,
            ..self
        }
    }
}

impl<S: Real> Default for PatchConfig<S> {
    fn default() -> Self {
        Self {
            max_deviation_angle: S::lit(0.18),
            flat_normal_tolerance: S::lit(1.0e-4),
            face_alignment_tolerance: S::lit(3.0e-3),
        }
    }
}
