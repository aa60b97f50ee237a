use std::collections::HashMap;

use cgmath::InnerSpace;
use float_eq::assert_float_eq;
use npatch::PatchConfig;
use npatch_mesh::{
    to_f64, Degree, MeshError, PatchedMesh, TriangleMesh, Vector3, VertexIndex,
};
use npatch_test_data::{ICOSPHERE_RADIUS, STL_CUBE, STL_ICOSPHERE};

fn icosphere() -> VertexIndex {
    npatch_stl::parse_stl::<VertexIndex>(STL_ICOSPHERE.bytes).unwrap()
}

fn mean_radial_error<I: Iterator<Item = f64>>(radii: I) -> f64 {
    let errors: Vec<f64> = radii
        .map(|r| (r - ICOSPHERE_RADIUS as f64).abs())
        .collect();
    errors.iter().sum::<f64>() / errors.len() as f64
}

#[test]
fn cubic_patches_approach_the_sphere() {
    let mesh = icosphere();
    let flat = mean_radial_error(mesh.triangles().map(|t| {
        let c = (to_f64(t.p0) + to_f64(t.p1) + to_f64(t.p2)) / 3.0;
        c.magnitude()
    }));

    let patched = PatchedMesh::build(mesh, Degree::Cubic, PatchConfig::default());
    let curved = mean_radial_error(
        (0..patched.patches().len())
            .map(|face| patched.point_at(face, 2.0 / 3.0, 1.0 / 3.0).unwrap().magnitude()),
    );
    assert!(curved < flat, "{} >= {}", curved, flat);
}

#[test]
fn quadratic_patches_approach_the_sphere() {
    let mesh = icosphere();
    let flat = mean_radial_error(mesh.triangles().map(|t| {
        let c = (to_f64(t.p0) + to_f64(t.p1) + to_f64(t.p2)) / 3.0;
        c.magnitude()
    }));

    let patched = PatchedMesh::build(mesh, Degree::Quadratic, PatchConfig::default());
    let curved = mean_radial_error(
        patched
            .patches()
            .iter()
            .map(|p| p.point_at(2.0 / 3.0, 1.0 / 3.0).magnitude()),
    );
    assert!(curved < flat, "{} >= {}", curved, flat);
    assert_eq!(
        Degree::Quadratic.coefficient_count(),
        patched.patches()[0].coefficients().len()
    );
}

#[test]
fn patches_pass_through_mesh_vertices() {
    let patched = PatchedMesh::build(icosphere(), Degree::Cubic, PatchConfig::default());
    for (face, patch) in patched.patches().iter().enumerate() {
        let [p1, p2, p3] = patch.vertices();
        for (p, (eta, xi)) in [(p1, (0.0, 0.0)), (p2, (1.0, 0.0)), (p3, (1.0, 1.0))] {
            let q = patched.point_at(face, eta, xi).unwrap();
            assert_float_eq!(p.x, q.x, abs <= 1e-9);
            assert_float_eq!(p.y, q.y, abs <= 1e-9);
            assert_float_eq!(p.z, q.z, abs <= 1e-9);
        }
        assert_eq!(Degree::Cubic.coefficient_count(), patch.coefficients().len());
    }
}

#[test]
fn cube_stays_flat_when_subdivided() {
    let mesh = npatch_stl::parse_stl::<VertexIndex>(STL_CUBE.bytes).unwrap();
    let patched = PatchedMesh::build(mesh, Degree::Cubic, PatchConfig::default());
    let refined = patched.subdivide();

    // 8 corners plus one point per edge and face diagonal.
    assert_eq!(48, refined.triangle_count());
    assert_eq!(26, refined.vertex_count());
    for p in &refined.points {
        let on_face = [p.x, p.y, p.z]
            .iter()
            .any(|&c| c.abs() < 0.0001 || (c - 20.0).abs() < 0.0001);
        assert!(on_face, "{:?} is off the cube", p);
    }
}

fn assert_closed(mesh: &VertexIndex) {
    let mut edges: HashMap<(usize, usize), usize> = HashMap::new();
    for facet in &mesh.facets {
        let [a, b, c] = facet.indices();
        for (x, y) in [(a, b), (b, c), (c, a)] {
            *edges.entry((x.min(y), x.max(y))).or_insert(0) += 1;
        }
    }
    assert!(edges.values().all(|&n| n == 2));
}

#[test]
fn subdivision_shares_edge_vertices() {
    for degree in [Degree::Cubic, Degree::Quadratic] {
        let patched = PatchedMesh::build(icosphere(), degree, PatchConfig::default());
        let refined = patched.subdivide();

        // One new vertex per edge of the closed input.
        let edges = 3 * STL_ICOSPHERE.triangle_count / 2;
        assert_eq!(STL_ICOSPHERE.vertex_count + edges, refined.vertex_count());
        assert_closed(&refined);

        let twice = PatchedMesh::build(refined, degree, PatchConfig::default()).subdivide();
        assert_eq!(16 * STL_ICOSPHERE.triangle_count, twice.triangle_count());
        assert_closed(&twice);
    }
}

#[test]
fn subdivided_icosphere_is_rounder() {
    let patched = PatchedMesh::build(icosphere(), Degree::Cubic, PatchConfig::default());
    let refined = patched.subdivide();
    assert_eq!(4 * STL_ICOSPHERE.triangle_count, refined.triangle_count());

    // New vertices sit further out than the flat edge midpoints would.
    let flat_midpoint = {
        let t = patched.mesh().triangle(0);
        to_f64((t.p0 + t.p1) / 2.0).magnitude()
    };
    let [m12, _, _] = patched.patches()[0].edge_midpoints();
    assert!(m12.magnitude() > flat_midpoint);
    assert!(m12.magnitude() < ICOSPHERE_RADIUS as f64);
}

#[test]
fn moving_a_vertex_updates_its_faces() {
    let mut patched = PatchedMesh::build(icosphere(), Degree::Cubic, PatchConfig::default());
    let before: Vec<_> = patched.patches().to_vec();
    let faces = patched.mesh().vertex_faces()[0].clone();

    let p = patched.mesh().points[0];
    patched.move_vertex(0, p * 1.1).unwrap();

    for (face, (old, new)) in before.iter().zip(patched.patches()).enumerate() {
        if faces.contains(&face) {
            assert_ne!(old, new);
            // The patch still passes through the moved vertex.
            let corner = patched.mesh().facets[face]
                .indices()
                .iter()
                .position(|&i| i == 0)
                .unwrap();
            let q = new.vertices()[corner];
            assert_float_eq!(q.magnitude(), to_f64(p * 1.1).magnitude(), abs <= 1e-9);
        } else {
            assert_eq!(old, new);
        }
    }
}

#[test]
fn moving_a_vertex_rebuilds_quadratic_faces() {
    let mut patched = PatchedMesh::build(icosphere(), Degree::Quadratic, PatchConfig::default());
    let p = patched.mesh().points[3];
    patched.move_vertex(3, p + Vector3::new(0.5, 0.0, 0.0)).unwrap();
    for patch in patched.patches() {
        for c in patch.coefficients() {
            assert!(c.x.is_finite() && c.y.is_finite() && c.z.is_finite());
        }
    }
}

#[test]
fn out_of_range_indices() {
    let mut patched = PatchedMesh::build(icosphere(), Degree::Cubic, PatchConfig::default());
    assert_eq!(
        Err(MeshError::FaceOutOfRange {
            index: 80,
            count: 80
        }),
        patched.point_at(80, 0.5, 0.5)
    );
    assert_eq!(
        Err(MeshError::VertexOutOfRange {
            index: 42,
            count: 42
        }),
        patched.move_vertex(42, Vector3::new(0.0, 0.0, 0.0))
    );
}
