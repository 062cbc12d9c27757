use std::path::PathBuf;

use clap::{Parser, ValueHint};
use pac::format::Entry;
use regex::Regex;
use tracing::info;

use crate::matches_filters;

#[derive(Debug, Clone, Parser)]
pub struct ExtractArgs {
	/// Archive to extract.
	#[arg(
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub pac_path: PathBuf,

	/// Directory to extract into.
	///
	/// Created if it doesn't exist. Defaults to the archive's path without its extension.
	#[arg(short, long,
		value_hint = ValueHint::DirPath,
		value_name = "DIR",
	)]
	pub output_dir: Option<PathBuf>,

	/// Extract only files whose name matches (with a regex).
	///
	/// Can be given multiple times, and files will be extracted if they match any of the regexes.
	#[arg(long, value_name = "REGEX")]
	pub filter: Vec<Regex>,
}

pub(crate) fn extract(args: ExtractArgs) -> miette::Result<()> {
	info!(path = ?args.pac_path, "extract archive");

	let filter = |entry: &Entry| matches_filters(&args.filter, &entry.name);
	let out_dir = pac::fs::extract_archive(&args.pac_path, args.output_dir.as_deref(), Some(&filter))?;
	println!("{}", out_dir.display());
	Ok(())
}
