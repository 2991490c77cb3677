#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "slotdec", about = "Typed value decoding for memory and storage snapshots")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Decode(cmd::decode::Args),
	Describe {
		identifier: String,
	},
	Info {
		path: PathBuf,
		#[arg(long = "decl")]
		decl_id: Option<u64>,
	},
}

fn main() {
	init_tracing();
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> slotdec::data::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Decode(args) => cmd::decode::run(args),
		Commands::Describe { identifier } => cmd::describe::run(&identifier),
		Commands::Info { path, decl_id } => cmd::info::run(path, decl_id),
	}
}

/// Enable with `RUST_LOG=slotdec=debug` or `RUST_LOG=slotdec=trace`.
fn init_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.try_init();
}
