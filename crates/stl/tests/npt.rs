use byteorder::{LittleEndian, ReadBytesExt};
use float_eq::assert_float_eq;
use npatch::PatchConfig;
use npatch_mesh::{Degree, PatchedMesh, Point, TriangleMesh, VertexIndex};
use npatch_stl::npt::{
    read_npt, read_npt_ascii, read_npt_binary, save_npt, write_npt_ascii, write_npt_binary,
};
use npatch_test_data::{STL_CUBE, STL_ICOSPHERE};

fn patched(bytes: &[u8], degree: Degree) -> PatchedMesh {
    let mesh = npatch_stl::parse_stl::<VertexIndex>(bytes).unwrap();
    PatchedMesh::build(mesh, degree, PatchConfig::default())
}

#[test]
fn ascii_layout() {
    let mesh = patched(STL_CUBE.bytes, Degree::Quadratic);
    let mut buf = Vec::new();
    write_npt_ascii(&mut buf, "cube", &mesh).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(" 12 ", lines[0]);
    assert_eq!("  file name : cube ", lines[1]);
    assert_eq!("", lines[2]);
    assert_eq!("  facet ID           0 ", lines[3]);
    assert_eq!(
        "      vertex   0.000000e+00   2.000000e+01   2.000000e+01",
        lines[4]
    );
    // The cube is flat everywhere so quadratic terms vanish.
    assert_eq!(
        "      coef1    0.000000e+00   0.000000e+00   0.000000e+00",
        lines[7]
    );
    assert_eq!("  facet ID          11 ", lines[3 + 11 * 7]);
    assert_eq!("end Face Informaion", *lines.last().unwrap());
    assert_eq!(3 + 12 * 7 + 1, lines.len());
}

#[test]
fn ascii_cubic_has_seven_coefficients() {
    let mesh = patched(STL_ICOSPHERE.bytes, Degree::Cubic);
    let mut buf = Vec::new();
    write_npt_ascii(&mut buf, "icosphere", &mesh).unwrap();
    let text = String::from_utf8(buf).unwrap();

    assert_eq!(80, text.matches("facet ID").count());
    assert_eq!(80 * 3, text.matches("vertex").count());
    assert_eq!(80, text.matches("coef7").count());
    assert_eq!(3 + 80 * 11 + 1, text.lines().count());
}

#[test]
fn binary_layout() {
    let mesh = patched(STL_ICOSPHERE.bytes, Degree::Cubic);
    let mut buf = Vec::new();
    write_npt_binary(&mut buf, &mesh).unwrap();
    assert_eq!(4 + 80 * (3 + Degree::Cubic.coefficient_count()) * 12, buf.len());

    let mut r = std::io::Cursor::new(&buf);
    assert_eq!(80, r.read_i32::<LittleEndian>().unwrap());

    // Each face starts with its vertices, then its coefficients.
    let patch = &mesh.patches()[1];
    r.set_position(4 + 10 * 12);
    let v0 = patch.vertices()[0];
    assert_eq!(v0.x as f32, r.read_f32::<LittleEndian>().unwrap());
    assert_eq!(v0.y as f32, r.read_f32::<LittleEndian>().unwrap());
    assert_eq!(v0.z as f32, r.read_f32::<LittleEndian>().unwrap());
    r.set_position(4 + 10 * 12 + 3 * 12);
    let c0 = patch.coefficients()[0];
    assert_eq!(c0.x as f32, r.read_f32::<LittleEndian>().unwrap());
}

#[test]
fn save_binary_quadratic() {
    let mesh = patched(STL_CUBE.bytes, Degree::Quadratic);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cube_lib.npt");
    save_npt(&path, &mesh, true).unwrap();
    assert_eq!(
        4 + 12 * (3 + 3) * 12,
        std::fs::metadata(&path).unwrap().len()
    );
}

#[test]
fn save_ascii_records_path() {
    let mesh = patched(STL_CUBE.bytes, Degree::Cubic);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cube_lib.npt");
    save_npt(&path, &mesh, false).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let header = text.lines().nth(1).unwrap();
    assert!(header.ends_with("cube_lib.npt "), "{}", header);
}

fn assert_point_near(a: Point, b: Point) {
    // Six decimals of a value around 10.
    assert_float_eq!(a.x, b.x, abs <= 1e-4);
    assert_float_eq!(a.y, b.y, abs <= 1e-4);
    assert_float_eq!(a.z, b.z, abs <= 1e-4);
}

#[test]
fn ascii_reads_back() {
    let mesh = patched(STL_ICOSPHERE.bytes, Degree::Cubic);
    let mut buf = Vec::new();
    write_npt_ascii(&mut buf, "icosphere", &mesh).unwrap();

    let faces = read_npt_ascii(&buf[..]).unwrap();
    assert_eq!(mesh.patches().len(), faces.len());
    for (patch, face) in mesh.patches().iter().zip(&faces) {
        for (a, b) in patch.vertices().iter().zip(&face.vertices) {
            assert_point_near(*a, *b);
        }
        assert_eq!(Degree::Cubic.coefficient_count(), face.coefficients.len());
        for (a, b) in patch.coefficients().iter().zip(&face.coefficients) {
            assert_point_near(*a, *b);
        }
    }
}

#[test]
fn binary_reads_back() {
    let mesh = patched(STL_CUBE.bytes, Degree::Quadratic);
    let mut buf = Vec::new();
    write_npt_binary(&mut buf, &mesh).unwrap();

    let faces = read_npt_binary(&mut std::io::Cursor::new(buf)).unwrap();
    assert_eq!(12, faces.len());
    let single = |p: Point| p.map(|c| c as f32 as f64);
    for (patch, face) in mesh.patches().iter().zip(&faces) {
        assert_eq!(patch.vertices().map(single), face.vertices);
        let coefficients: Vec<Point> = patch.coefficients().into_iter().map(single).collect();
        assert_eq!(coefficients, face.coefficients);
    }
}

#[test]
fn npt_file_reads_as_mesh() {
    let stl = npatch_stl::parse_stl::<VertexIndex>(STL_CUBE.bytes).unwrap();
    let mesh = patched(STL_CUBE.bytes, Degree::Cubic);
    let dir = tempfile::tempdir().unwrap();

    for binary in [false, true] {
        let path = dir.path().join("cube_lib.npt");
        save_npt(&path, &mesh, binary).unwrap();

        let back = read_npt::<VertexIndex, _>(&path).unwrap();
        assert_eq!(STL_CUBE.vertex_count, back.vertex_count());
        let expected: Vec<_> = stl.triangles().collect();
        let actual: Vec<_> = back.triangles().collect();
        assert_eq!(expected, actual);
    }
}
