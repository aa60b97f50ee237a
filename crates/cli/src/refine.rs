use anyhow::Context;
use npatch::PatchConfig;
use npatch_mesh::{DefaultMesh, PatchedMesh, TriangleMesh};

use crate::args;

pub fn refine_command(args: args::RefineArgs) -> anyhow::Result<()> {
    let mut mesh = npatch_stl::read_stl::<DefaultMesh, _>(&args.stl_path)
        .with_context(|| format!("failed to read {}", args.stl_path))?;
    let config = PatchConfig::default().with_max_deviation_angle(args.patch.max_angle);

    for level in 0..args.levels {
        mesh = PatchedMesh::build(mesh, args.patch.degree, config).subdivide();
        log::info!(
            "level {}: {} triangles",
            level + 1,
            mesh.triangle_count()
        );
    }

    npatch_stl::save_stl(&args.output, &mesh)
        .with_context(|| format!("failed to write {}", args.output))
}
