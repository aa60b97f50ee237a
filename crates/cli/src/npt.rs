use std::path::{Path, PathBuf};

use anyhow::Context;
use npatch::PatchConfig;
use npatch_mesh::{DefaultMesh, PatchedMesh};
use npatch_stl::npt::{npt_output_path, read_npt, save_npt};

use crate::args;

fn is_npt(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext.eq_ignore_ascii_case("npt"))
}

/// Loads the triangles of an STL file, or of an existing NPT file.
fn read_mesh(path: &str) -> anyhow::Result<DefaultMesh> {
    let mesh = if is_npt(Path::new(path)) {
        read_npt::<DefaultMesh, _>(path)
    } else {
        npatch_stl::read_stl::<DefaultMesh, _>(path)
    };
    mesh.with_context(|| format!("failed to read {}", path))
}

pub fn npt_command(args: args::NptArgs) -> anyhow::Result<()> {
    let mesh = read_mesh(&args.input_path)?;
    let config = PatchConfig::default().with_max_deviation_angle(args.patch.max_angle);
    let patched = PatchedMesh::build(mesh, args.patch.degree, config);

    let output = args
        .output
        .map(PathBuf::from)
        .unwrap_or_else(|| npt_output_path(&args.input_path));
    save_npt(&output, &patched, args.binary)
        .with_context(|| format!("failed to write {}", output.display()))
}

#[cfg(test)]
mod tests {
    use npatch_test_data::STL_CUBE;

    use super::*;
    use crate::args::{NptArgs, PatchArgs};
    use npatch_mesh::Degree;

    fn patch_args() -> PatchArgs {
        PatchArgs {
            degree: Degree::Cubic,
            max_angle: 0.18,
        }
    }

    #[test]
    fn writes_next_to_input_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cube.stl");
        std::fs::write(&input, STL_CUBE.bytes).unwrap();

        npt_command(NptArgs {
            input_path: input.to_string_lossy().into_owned(),
            output: None,
            binary: true,
            patch: patch_args(),
        })
        .unwrap();

        let written = std::fs::metadata(dir.path().join("cube_lib.npt")).unwrap();
        assert_eq!(4 + 12 * (3 + 7) * 12, written.len());
    }

    #[test]
    fn explicit_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cube.stl");
        let output = dir.path().join("out.npt");
        std::fs::write(&input, STL_CUBE.bytes).unwrap();

        npt_command(NptArgs {
            input_path: input.to_string_lossy().into_owned(),
            output: Some(output.to_string_lossy().into_owned()),
            binary: false,
            patch: patch_args(),
        })
        .unwrap();

        let text = std::fs::read_to_string(output).unwrap();
        assert!(text.starts_with(" 12 \n"));
    }

    #[test]
    fn repatches_an_npt_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cube.stl");
        std::fs::write(&input, STL_CUBE.bytes).unwrap();
        npt_command(NptArgs {
            input_path: input.to_string_lossy().into_owned(),
            output: None,
            binary: false,
            patch: patch_args(),
        })
        .unwrap();

        let cubic = dir.path().join("cube_lib.npt");
        let quadratic = dir.path().join("cube_2.npt");
        npt_command(NptArgs {
            input_path: cubic.to_string_lossy().into_owned(),
            output: Some(quadratic.to_string_lossy().into_owned()),
            binary: true,
            patch: PatchArgs {
                degree: Degree::Quadratic,
                max_angle: 0.18,
            },
        })
        .unwrap();

        let written = std::fs::metadata(quadratic).unwrap();
        assert_eq!(4 + 12 * (3 + 3) * 12, written.len());
    }

    #[test]
    fn missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = npt_command(NptArgs {
            input_path: dir.path().join("missing.stl").to_string_lossy().into_owned(),
            output: None,
            binary: false,
            patch: patch_args(),
        })
        .unwrap_err();
        assert!(err.to_string().starts_with("failed to read"));
    }
}
