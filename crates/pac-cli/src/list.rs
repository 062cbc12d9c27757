use std::path::PathBuf;

use clap::{Parser, ValueHint};
use regex::Regex;
use tracing::info;

use crate::matches_filters;

#[derive(Debug, Clone, Parser)]
pub struct ListArgs {
	/// Archive to list.
	#[arg(
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub pac_path: PathBuf,

	/// Show id, offset, and size before each name.
	#[arg(long)]
	pub long: bool,

	/// Filter files by name (with a regex).
	///
	/// Can be given multiple times, and files will be matched if they match any of the regexes.
	#[arg(long, value_name = "REGEX")]
	pub filter: Vec<Regex>,
}

pub(crate) fn list(args: ListArgs) -> miette::Result<()> {
	info!(path = ?args.pac_path, "read directory");
	let entries = pac::decode::enumerate(&args.pac_path)?;

	info!(count = %entries.len(), "list files");
	for entry in entries
		.iter()
		.filter(|entry| matches_filters(&args.filter, &entry.name))
	{
		if args.long {
			println!(
				"{:>6} {:>10} {:>10}  {}",
				entry.id, entry.offset, entry.size, entry.name
			);
		} else {
			println!("{}", entry.name);
		}
	}

	Ok(())
}
