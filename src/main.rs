use clap::Parser;
use fluxback::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
