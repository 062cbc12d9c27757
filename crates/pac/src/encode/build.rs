use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, trace};

use crate::{error::Result, fs};

use super::Encoder;

/// Build an archive from files on disk.
///
/// Paths for which `filter` returns false are skipped; with no filter, all are included. Each
/// file is stored under its base name, in the order given.
#[instrument(level = "debug", skip(paths, filter), fields(paths = paths.len()))]
pub fn build<P: AsRef<Path>>(
	paths: &[P],
	filter: Option<&dyn Fn(&Path) -> bool>,
) -> Result<Vec<u8>> {
	let mut encoder = Encoder::new();
	for path in paths {
		let path = path.as_ref();
		if filter.map_or(false, |filter| !filter(path)) {
			trace!(?path, "filtered out");
			continue;
		}

		encoder.add_path(path)?;
	}

	debug!(files = %encoder.len(), "read source files");
	encoder.finalise()
}

/// Build an archive from the files in a directory, and write it out.
///
/// The output defaults to a `.pac` file named after the directory, next to it. An explicit output
/// must have the `.pac` extension; this is checked before anything is read or written. Returns
/// the path written to.
#[instrument(level = "debug", skip(filter))]
pub fn write_archive(
	source_dir: &Path,
	output: Option<&Path>,
	filter: Option<&dyn Fn(&Path) -> bool>,
) -> Result<PathBuf> {
	let output = match output {
		Some(output) => {
			fs::check_archive_extension(output)?;
			output.to_owned()
		}
		None => fs::default_archive_path(source_dir)?,
	};

	let files = fs::list_files(source_dir)?;
	let bytes = build(&files, filter)?;

	std::fs::write(&output, &bytes)?;
	info!(?output, length = %bytes.len(), "wrote archive");
	Ok(output)
}
