use std::path::{Path, PathBuf};

use clap::{Parser, ValueHint};
use regex::Regex;
use tracing::info;

use crate::matches_filters;

#[derive(Debug, Clone, Parser)]
pub struct CreateArgs {
	/// Directory of files to pack.
	///
	/// Only the files directly inside it are packed, under their base names.
	#[arg(
		value_hint = ValueHint::DirPath,
		value_name = "DIR",
	)]
	pub file_dir: PathBuf,

	/// Archive output path.
	///
	/// Must end in '.pac'. Defaults to the directory's name with '.pac' appended, next to it.
	#[arg(short, long,
		value_hint = ValueHint::AnyPath,
		value_name = "PATH",
	)]
	pub output_file: Option<PathBuf>,

	/// Pack only files whose name matches (with a regex).
	///
	/// Can be given multiple times, and files will be packed if they match any of the regexes.
	#[arg(long, value_name = "REGEX")]
	pub filter: Vec<Regex>,
}

pub(crate) fn create(args: CreateArgs) -> miette::Result<()> {
	info!(dir = ?args.file_dir, "create archive");

	let filter = |path: &Path| {
		let name = path
			.file_name()
			.map(|name| name.to_string_lossy())
			.unwrap_or_default();
		matches_filters(&args.filter, &name)
	};

	let output = pac::encode::write_archive(&args.file_dir, args.output_file.as_deref(), Some(&filter))?;
	println!("{}", output.display());
	Ok(())
}
