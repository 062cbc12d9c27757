use tracing::{debug, error, instrument, trace};

use crate::{
	error::{ErrorKind, Result},
	format::{encode_entries, Entry, Header, HEADER_SIZE},
};

use super::Encoder;

impl Encoder {
	/// Lay out and serialise the archive.
	///
	/// Files get sequential ids and are packed tightly in the order they were added, so each
	/// offset is the total size of the files before it. Consumes the encoder.
	#[instrument(level = "debug", skip(self), fields(files = self.files.len()))]
	pub fn finalise(self) -> Result<Vec<u8>> {
		let layout = self.layout()?;
		let file_count = u32::try_from(self.files.len()).map_err(|_| ErrorKind::TooLarge)?;

		let mut entries = Vec::with_capacity(self.files.len());
		let mut offset: u32 = 0;
		for (id, file) in (0..file_count).zip(&self.files) {
			let size = u32::try_from(file.data.len()).map_err(|_| ErrorKind::TooLarge)?;
			entries.push(Entry {
				name: file.name.clone(),
				id,
				offset,
				size,
				reserved: Vec::new(),
			});
			offset = offset.checked_add(size).ok_or(ErrorKind::TooLarge)?;
		}

		let data_start = layout
			.directory_len(file_count)?
			.checked_add(HEADER_SIZE)
			.ok_or(ErrorKind::TooLarge)?;
		let total_size = data_start
			.checked_add(offset)
			.ok_or(ErrorKind::TooLarge)?;
		debug!(?layout, %data_start, %total_size, "computed archive layout");

		let header = Header::new(
			data_start,
			total_size,
			file_count,
			layout.string_size(),
			self.reserved,
		);

		let mut bytes = Vec::with_capacity(total_size as usize);
		bytes.extend(header.encode()?);
		bytes.extend(encode_entries(&entries, layout)?);
		trace!(length = %bytes.len(), "wrote header and directory");

		for file in &self.files {
			bytes.extend_from_slice(&file.data);
		}

		// a mismatch is a layout bug, so debug builds stop here
		debug_assert_eq!(
			bytes.len(),
			total_size as usize,
			"built archive length doesn't match its layout"
		);
		if bytes.len() != total_size as usize {
			error!(
				expected = %total_size,
				actual = %bytes.len(),
				"built archive length doesn't match its layout"
			);
			return Err(ErrorKind::SizeMismatch {
				expected: total_size,
				actual: bytes.len(),
			}
			.into());
		}

		Ok(bytes)
	}
}
