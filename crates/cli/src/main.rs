use clap::Parser;

mod args;
mod npt;
mod refine;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = args::Args::parse();
    match args.command {
        args::Commands::Npt(args) => npt::npt_command(args),
        args::Commands::Refine(args) => refine::refine_command(args),
    }
}
