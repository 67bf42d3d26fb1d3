//! CLI entry point for layered model synthesis

use clap::Parser;
use layered_synth::io::cli::{Cli, SynthesisRunner};

fn main() -> layered_synth::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut runner = SynthesisRunner::new(cli);
    runner.run()
}
