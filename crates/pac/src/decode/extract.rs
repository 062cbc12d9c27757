use std::{fs, path::Path};

use tracing::{debug, info, instrument, trace};

use crate::{
	error::{ErrorKind, FormatError, Result},
	format::Entry,
};

use super::Decoder;

impl<'data> Decoder<'data> {
	/// The data of an entry.
	///
	/// This uses the entry's stored offset into the payload region. Archives built by this crate
	/// are packed tightly in directory order, but that isn't assumed here.
	pub fn entry_data(&self, entry: &Entry) -> Result<&'data [u8]> {
		let payload = self.payload();
		let start = entry.offset as usize;
		let end = start.checked_add(entry.size as usize);

		match end {
			Some(end) if end <= payload.len() => Ok(&payload[start..end]),
			_ => Err(FormatError::new(ErrorKind::OutOfBounds)
				.with_message(format!(
					"entry {} ({:?}) spans {}+{} bytes but the payload region is {} bytes",
					entry.id,
					entry.name,
					entry.offset,
					entry.size,
					payload.len()
				))
				.into()),
		}
	}

	/// Iterate through entries and their data, skipping those the filter rejects.
	///
	/// Every yielded entry has had its name and bounds checked.
	pub fn files<'d>(
		&'d self,
		filter: Option<&'d dyn Fn(&Entry) -> bool>,
	) -> impl Iterator<Item = Result<(&'d str, &'data [u8])>> + 'd {
		self.entries
			.iter()
			.filter(move |entry| filter.map_or(true, |filter| filter(entry)))
			.map(move |entry| -> Result<(&'d str, &'data [u8])> {
				Ok((entry.file_name()?, self.entry_data(entry)?))
			})
	}
}

/// List the entries of an archive on disk.
///
/// Returns metadata only; no file data is kept.
#[instrument(level = "debug")]
pub fn enumerate(path: &Path) -> Result<Vec<Entry>> {
	let bytes = fs::read(path)?;
	Ok(Decoder::new(&bytes)?.into_entries())
}

/// Extract the files of an archive on disk into a directory.
///
/// Only entries for which `filter` returns true are written; with no filter, all are. The
/// destination must exist. Entries are all checked before any file is written, so a malformed
/// archive leaves the destination untouched.
#[instrument(level = "debug", skip(filter))]
pub fn extract(
	path: &Path,
	destination: &Path,
	filter: Option<&dyn Fn(&Entry) -> bool>,
) -> Result<()> {
	let bytes = fs::read(path)?;
	let decoder = Decoder::new(&bytes)?;

	let files = decoder.files(filter).collect::<Result<Vec<_>>>()?;
	debug!(
		selected = %files.len(),
		total = %decoder.entries().len(),
		"checked entries"
	);

	for (name, data) in files {
		let target = destination.join(name);
		trace!(?target, length = %data.len(), "write file");
		fs::write(&target, data)?;
	}

	info!(?destination, "extracted archive");
	Ok(())
}
