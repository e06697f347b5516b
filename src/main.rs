//! Pipeline Simulator CLI.
//!
//! Loads a hex-per-line memory image and runs it to completion in one of
//! three modes, then prints the final architectural state.

use std::process;

use clap::Parser;

use pipesim::config::Config;
use pipesim::sim::{self, Mode};
use pipesim::stats;
use pipesim::trace;

/// Command-line arguments for the pipeline simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "Pipeline Cycle-Accurate Simulator")]
struct Args {
    /// Path to the hex-per-line memory image.
    image: String,

    /// Simulation mode: FS (functional-only), NF (no forwarding), or WF
    /// (with forwarding).
    #[arg(ignore_case = true)]
    mode: Mode,

    /// Path to a TOML configuration file. Missing fields fall back to
    /// built-in defaults.
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Print a per-cycle trace to stderr.
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    let config = Config::load(&args.config).unwrap_or_default();

    let image = match sim::loader::load_image(&args.image) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    let trace = trace::build(args.debug);

    let result = sim::run(&image, args.mode, &config, trace.as_ref());

    stats::print_final_state(
        &result.machine.counters,
        result.machine.gpr.values(),
        result.machine.gpr.written(),
        result.machine.pc,
        result.machine.mem.words(),
        result.machine.mem.changed(),
        result.timing.as_ref(),
    );

    if let Some(e) = result.error {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
