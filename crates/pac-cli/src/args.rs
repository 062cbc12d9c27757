use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::{create::CreateArgs, extract::ExtractArgs, list::ListArgs};

/// Create, list, and extract FPAC archives.
#[derive(Debug, Clone, Parser)]
#[command(
	name = "pac",
	bin_name = "pac",
	author,
	version,
	after_help = "Want more detail? Try the long '--help' flag!",
	after_long_help = "Didn't expect this much output? Use the short '-h' flag to get short help."
)]
#[cfg_attr(debug_assertions, command(before_help = "⚠ DEBUG BUILD ⚠"))]
pub struct Args {
	/// Set diagnostic log level.
	///
	/// This enables diagnostic logging, which is useful for investigating bugs or gaining more
	/// insight into archives. Use multiple times to increase verbosity.
	///
	/// You may want to use with '--log-file' to avoid polluting your terminal.
	///
	/// Setting $RUST_LOG also works, and takes precedence, but is not recommended.
	#[arg(long, short, action = ArgAction::Count, global = true)]
	pub verbose: u8,

	/// Write diagnostic logs to a file.
	///
	/// This writes diagnostic logs to a file, instead of the terminal, in JSON format. If a
	/// directory is given, a timestamped file is created in it.
	#[arg(
		long,
		global = true,
		value_hint = ValueHint::AnyPath,
		value_name = "PATH",
	)]
	pub log_file: Option<PathBuf>,

	/// What to do.
	#[command(subcommand)]
	pub action: Action,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Action {
	/// Pack the files of a directory into an archive.
	Create(CreateArgs),

	/// Extract the files of an archive into a directory.
	Extract(ExtractArgs),

	/// List the files in an archive.
	List(ListArgs),
}
