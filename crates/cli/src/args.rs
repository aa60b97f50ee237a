use clap::{Parser, Subcommand};
use npatch_mesh::Degree;

fn parse_degree(s: &str) -> Result<Degree, String> {
    match s {
        "2" => Ok(Degree::Quadratic),
        "3" => Ok(Degree::Cubic),
        _ => Err(format!("degree must be 2 or 3, got {}", s)),
    }
}

#[derive(clap::Args, Debug)]
pub struct PatchArgs {
    /// Patch degree, 2 for quadratic or 3 for cubic.
    #[arg(short, long, default_value = "3", value_parser = parse_degree)]
    pub degree: Degree,

    /// Vertex normals closer than this many degrees count as parallel.
    #[arg(long, default_value_t = 0.18)]
    pub max_angle: f64,
}

#[derive(clap::Args, Debug)]
pub struct NptArgs {
    /// An stl file, or an npt file to patch again.
    pub input_path: String,

    /// Output path, `<stem>_lib.npt` next to the input by default.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write the binary form instead of ASCII.
    #[arg(short, long)]
    pub binary: bool,

    #[command(flatten)]
    pub patch: PatchArgs,
}

#[derive(clap::Args, Debug)]
pub struct RefineArgs {
    pub stl_path: String,

    /// Output path for the refined stl.
    #[arg(short, long)]
    pub output: String,

    /// Number of times every face is split in four.
    #[arg(short, long, default_value_t = 1)]
    pub levels: u32,

    #[command(flatten)]
    pub patch: PatchArgs,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Computes patch coefficients for every face and writes them as npt.
    ///
    /// An npt input is read for its triangles only.
    Npt(NptArgs),
    /// Subdivides a mesh onto its patches.
    Refine(RefineArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn npt_defaults() {
        let args = Args::parse_from(["npatch", "npt", "part.stl"]);
        let Commands::Npt(npt) = args.command else {
            panic!("expected npt");
        };
        assert_eq!("part.stl", npt.input_path);
        assert_eq!(None, npt.output);
        assert!(!npt.binary);
        assert_eq!(Degree::Cubic, npt.patch.degree);
        assert_eq!(0.18, npt.patch.max_angle);
    }

    #[test]
    fn refine_flags() {
        let args = Args::parse_from([
            "npatch", "refine", "in.stl", "-o", "out.stl", "--levels", "2", "--degree", "2",
        ]);
        let Commands::Refine(refine) = args.command else {
            panic!("expected refine");
        };
        assert_eq!("out.stl", refine.output);
        assert_eq!(2, refine.levels);
        assert_eq!(Degree::Quadratic, refine.patch.degree);
    }

    #[test]
    fn rejects_other_degrees() {
        assert!(Args::try_parse_from(["npatch", "npt", "a.stl", "--degree", "4"]).is_err());
    }
}
