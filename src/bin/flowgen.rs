//! flowgen binary — describe a process, get a Mermaid diagram.

use clap::Parser;
use flowgen::cli::{run, Cli};

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
