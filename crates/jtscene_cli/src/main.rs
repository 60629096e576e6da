#![allow(missing_docs)]

use std::io::IsTerminal;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "jtscene", about = "JT scene-graph container inspection tools")]
struct Cli {
	/// Log decoder progress to stderr.
	#[arg(long, short, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print the file header and table of contents.
	Info(cmd::info::Args),
	/// Decode and print the root scene graph.
	Scene(cmd::scene::Args),
	/// Decode one segment by id.
	Segment(cmd::segment::Args),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(err.kind().exit_code());
	}
}

fn run(command: Commands) -> jtscene::jt::Result<()> {
	let name = match &command {
		Commands::Info(_) => "info",
		Commands::Scene(_) => "scene",
		Commands::Segment(_) => "segment",
	};
	tracing::debug!(command = name, "running command");

	match command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Scene(args) => cmd::scene::run(args),
		Commands::Segment(args) => cmd::segment::run(args),
	}
}

fn init_tracing(verbose: bool) {
	let default = if verbose { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(std::io::stderr().is_terminal())
		.with_target(false)
		.init();
}
