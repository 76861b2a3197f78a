#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "hdrconst", about = "Compile-time constant stream tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Dump {
		facts: PathBuf,
	},
	Show {
		path: PathBuf,
		#[arg(long, default_value = "tree")]
		format: String,
		#[arg(long)]
		lenient: bool,
	},
	Get {
		path: PathBuf,
		name: String,
		#[arg(long)]
		lenient: bool,
	},
	Enums {
		path: PathBuf,
		#[arg(long)]
		lenient: bool,
	},
	Merge {
		#[arg(required = true)]
		paths: Vec<PathBuf>,
		#[arg(long, default_value = "tree")]
		format: String,
		#[arg(long)]
		lenient: bool,
	},
}

fn main() {
	init_tracing();
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> hdrconst::consts::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Dump { facts } => cmd::dump::run(facts),
		Commands::Show { path, format, lenient } => cmd::show::run(path, &format, lenient),
		Commands::Get { path, name, lenient } => cmd::get::run(path, &name, lenient),
		Commands::Enums { path, lenient } => cmd::enums::run(path, lenient),
		Commands::Merge { paths, format, lenient } => cmd::merge::run(paths, &format, lenient),
	}
}

/// Diagnostics go to stderr and only when `RUST_LOG` asks for them, keeping
/// stdout clean for stream and query output.
fn init_tracing() {
	use tracing_subscriber::EnvFilter;

	if std::env::var_os("RUST_LOG").is_some() {
		tracing_subscriber::fmt()
			.with_env_filter(EnvFilter::from_default_env())
			.with_writer(std::io::stderr)
			.init();
	}
}
