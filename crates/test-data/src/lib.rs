pub struct TestModel {
    pub bytes: &'static [u8],
    pub triangle_count: usize,
    pub vertex_count: usize,
}

/// Axis aligned cube spanning 0-20 on x, y and z.
pub const STL_CUBE: TestModel = TestModel {
    bytes: include_bytes!("../../../res/cube/cube-bin.stl"),
    triangle_count: 12,
    vertex_count: 8,
};

/// The same cube as `STL_CUBE`, in ASCII.
pub const STL_CUBE_ASCII: TestModel = TestModel {
    bytes: include_bytes!("../../../res/cube/cube-ascii.stl"),
    triangle_count: 12,
    vertex_count: 8,
};

/// Once subdivided icosahedron with its vertices on a sphere of radius 10.
pub const STL_ICOSPHERE: TestModel = TestModel {
    bytes: include_bytes!("../../../res/icosphere/icosphere-bin.stl"),
    triangle_count: 80,
    vertex_count: 42,
};

pub const ICOSPHERE_RADIUS: f32 = 10.0;
