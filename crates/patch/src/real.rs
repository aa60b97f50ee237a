use cgmath::BaseFloat;

/// Floating point precision a patch is computed in.
///
/// Degeneracy thresholds have to follow the representable precision, so each
/// precision carries its own tolerances. Single precision uses the looser set.
pub trait Real: BaseFloat + Send + Sync {
    /// Lengths at or below this are treated as zero (coincident points,
    /// zero-length edges).
    const LENGTH_TOLERANCE: Self;

    /// Cross products, determinants and `1 - cos²` terms below this are
    /// treated as parallel or singular.
    const VECTOR_TOLERANCE: Self;

    /// Converts a literal into this precision.
    fn lit(v: f64) -> Self;
}

impl Real for f32 {
    const LENGTH_TOLERANCE: Self = 1.0e-3;
    const VECTOR_TOLERANCE: Self = 1.0e-5;

    #[inline(always)]
    fn lit(v: f64) -> Self {
        v as f32
    }
}

impl Real for f64 {
    const LENGTH_TOLERANCE: Self = 1.0e-5;
    const VECTOR_TOLERANCE: Self = 1.0e-8;

    #[inline(always)]
    fn lit(v: f64) -> Self {
        v
    }
}
