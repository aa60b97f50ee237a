use cgmath::InnerSpace;

pub type Vector3 = cgmath::Vector3<f32>;

// We rely on Vector3 being repr(c).
static_assertions::assert_eq_size!(Vector3, [f32; 3]);
static_assertions::assert_eq_align!(Vector3, f32);

#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Triangle {
    pub p0: Vector3,
    pub p1: Vector3,
    pub p2: Vector3,
}

impl Triangle {
    pub fn new(p0: Vector3, p1: Vector3, p2: Vector3) -> Self {
        Self { p0, p1, p2 }
    }

    pub fn vertices(&self) -> [Vector3; 3] {
        [self.p0, self.p1, self.p2]
    }

    /// Unit normal following the counter-clockwise winding, or zero for a
    /// degenerate triangle.
    pub fn normal(&self) -> Vector3 {
        let n = (self.p1 - self.p0).cross(self.p2 - self.p0);
        let len = n.magnitude();
        if len > 0.0 {
            n / len
        } else {
            Vector3::new(0.0, 0.0, 0.0)
        }
    }
}

impl std::default::Default for Triangle {
    fn default() -> Self {
        let zero = Vector3::new(0.0, 0.0, 0.0);
        Self::new(zero, zero, zero)
    }
}

/// Widens a mesh point for patch computations.
pub fn to_f64(v: Vector3) -> cgmath::Vector3<f64> {
    v.map(f64::from)
}

pub fn to_f32(v: cgmath::Vector3<f64>) -> Vector3 {
    v.map(|c| c as f32)
}
