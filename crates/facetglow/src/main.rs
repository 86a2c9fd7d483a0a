mod background;
mod cli;
mod mesh;
mod paths;
mod run;
mod settings;
mod simulate;

use anyhow::Result;
use cli::Command;
use paths::AppPaths;

fn main() -> Result<()> {
    let cli = cli::parse();
    run::initialise_tracing();

    match cli.command {
        Command::Knobs => run::run_knobs(),
        Command::Mesh(args) => mesh::run_mesh(args, &AppPaths::discover()?),
        Command::Simulate(args) => simulate::run_simulate(args, &AppPaths::discover()?),
        Command::Config(config) => run::run_config(config.action, &AppPaths::discover()?),
    }
}
