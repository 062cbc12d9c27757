//! Filesystem conveniences around the codec.
//!
//! Listing source files, picking default output paths, and extracting into a directory that may
//! not exist yet.

use std::{
	ffi::OsString,
	io::{Error as IoError, ErrorKind as IoErrorKind},
	path::{Path, PathBuf},
};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::{
	decode,
	error::{ErrorKind, FormatError, Result},
	format::{Entry, ARCHIVE_EXTENSION},
};

/// Regular files directly inside a directory, sorted by name.
///
/// Archives hold base names only, so subdirectories aren't descended into. Symlinks are followed.
#[instrument(level = "debug")]
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
	let mut files = Vec::new();
	for entry in WalkDir::new(dir)
		.min_depth(1)
		.max_depth(1)
		.follow_links(true)
		.sort_by_file_name()
	{
		let entry = entry.map_err(IoError::from)?;
		if entry.file_type().is_file() {
			files.push(entry.into_path());
		}
	}

	debug!(count = %files.len(), "listed files");
	Ok(files)
}

/// Check that a path has the archive extension.
pub fn check_archive_extension(path: &Path) -> Result<()> {
	if path
		.extension()
		.map_or(false, |ext| ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION))
	{
		Ok(())
	} else {
		Err(FormatError::new(ErrorKind::BadExtension)
			.with_message(format!(
				"output path {path:?} must have the .{ARCHIVE_EXTENSION} extension"
			))
			.into())
	}
}

/// Default archive path for a source directory: `<parent>/<dirname>.pac`.
pub fn default_archive_path(source_dir: &Path) -> Result<PathBuf> {
	let source_dir = source_dir.canonicalize()?;
	let mut name = source_dir
		.file_name()
		.map(OsString::from)
		.ok_or_else(|| {
			IoError::new(
				IoErrorKind::InvalidInput,
				format!("{source_dir:?} has no directory name to name the archive after"),
			)
		})?;
	name.push(".");
	name.push(ARCHIVE_EXTENSION);
	Ok(source_dir.with_file_name(name))
}

/// Default extraction directory for an archive: its path without the extension.
///
/// For an archive without an extension, `_extracted` is appended instead so the directory doesn't
/// collide with the archive itself.
pub fn default_output_dir(archive: &Path) -> PathBuf {
	let stripped = archive.with_extension("");
	if stripped == archive {
		let mut name = archive.as_os_str().to_owned();
		name.push("_extracted");
		PathBuf::from(name)
	} else {
		stripped
	}
}

/// Extract an archive, creating the output directory if needed.
///
/// The output defaults to [`default_output_dir()`]. Returns the directory extracted to.
#[instrument(level = "debug", skip(filter))]
pub fn extract_archive(
	archive: &Path,
	out_dir: Option<&Path>,
	filter: Option<&dyn Fn(&Entry) -> bool>,
) -> Result<PathBuf> {
	let out_dir = out_dir.map_or_else(|| default_output_dir(archive), Path::to_owned);
	std::fs::create_dir_all(&out_dir)?;
	debug!(?out_dir, "created output directory");

	decode::extract(archive, &out_dir, filter)?;
	Ok(out_dir)
}
