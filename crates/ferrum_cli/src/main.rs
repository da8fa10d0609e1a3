//! Ferrum CLI: lowers serialized design graphs to Yosys RTLIL.
//!
//! Provides `ferrum convert` for turning a JSON design (given directly or
//! named by `ferrum.toml`) into RTLIL text, and `ferrum demo` for emitting
//! the bundled example designs.

#![warn(missing_docs)]

mod convert;
mod demo;
mod pipeline;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Ferrum: an RTLIL backend for hardware design graphs.
#[derive(Parser, Debug)]
#[command(name = "ferrum", version, about = "Ferrum RTLIL backend")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `ferrum.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert a JSON design graph to RTLIL.
    Convert(ConvertArgs),
    /// Emit one of the bundled example designs.
    Demo(DemoArgs),
}

/// Arguments for the `ferrum convert` subcommand.
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Design graph to convert. Taken from `ferrum.toml` when omitted.
    pub design: Option<String>,

    /// Output path for the RTLIL text (default: configured output or stdout).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Override the name of the outermost module.
    #[arg(long)]
    pub top: Option<String>,
}

/// Arguments for the `ferrum demo` subcommand.
#[derive(Parser, Debug)]
pub struct DemoArgs {
    /// Which example design to build.
    #[arg(value_enum)]
    pub design: DemoDesign,

    /// Register width in bits.
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..=32))]
    pub width: u32,

    /// Emit the JSON design graph instead of RTLIL.
    #[arg(long)]
    pub json: bool,

    /// Output path (default: stdout).
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Bundled example designs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DemoDesign {
    /// A free-running counter whose top bit drives the output.
    Counter,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };
    init_tracing(&global);

    let result = match cli.command {
        Command::Convert(ref args) => convert::run(args, &global),
        Command::Demo(ref args) => demo::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Default log filter when `RUST_LOG` is not set.
fn default_filter(global: &GlobalArgs) -> &'static str {
    if global.verbose {
        "debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    }
}

/// Installs the stderr log subscriber. Standard output is reserved for RTLIL.
fn init_tracing(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(global)));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
