use tracing::{debug, instrument, warn};

use crate::{
	error::{ErrorKind, Result},
	format::{decode_entries, Header, Layout, HEADER_SIZE},
};

use super::Decoder;

impl<'data> Decoder<'data> {
	/// Parse an archive.
	///
	/// This reads the [header][crate::format::Header], derives the entry layout from it, and
	/// reads the whole directory. Any inconsistency is an error; there's no partial result.
	#[instrument(level = "debug", skip(bytes), fields(length = bytes.len()))]
	pub fn new(bytes: &'data [u8]) -> Result<Self> {
		let header = Header::decode(bytes)?;
		let entry_size = header.entry_size()?;
		debug!(%entry_size, "derived entry size");

		let data_start = header.data_start as usize;
		if data_start > bytes.len() {
			return Err(ErrorKind::Truncated {
				needed: data_start,
				available: bytes.len(),
			}
			.into());
		}

		if header.total_size as usize != bytes.len() {
			warn!(
				declared = %header.total_size,
				actual = %bytes.len(),
				"archive length doesn't match its header"
			);
		}

		let (layout, entries) = if header.file_count == 0 {
			(None, Vec::new())
		} else {
			let layout = Layout::new(header.string_size, entry_size)?;
			debug!(?layout, "checked entry layout");
			let directory = &bytes[HEADER_SIZE as usize..data_start];
			let entries = decode_entries(directory, header.file_count, layout)?;
			(Some(layout), entries)
		};

		debug!(count = %entries.len(), "read pac directory");
		Ok(Self {
			bytes,
			header,
			layout,
			entries,
		})
	}
}

#[cfg(test)]
mod tests {
	use crate::format::{encode_entries, Entry, ReservedFields};

	use super::*;

	fn archive(header: Header, directory: &[u8], payload: &[u8]) -> Vec<u8> {
		let mut bytes = header.encode().expect("header");
		bytes.extend(directory);
		bytes.extend(payload);
		bytes
	}

	#[test]
	fn reads_hand_built_archive() {
		let layout = Layout::new(12, 28).expect("layout");
		let directory = encode_entries(
			&[Entry {
				name: "hello.bin".into(),
				id: 0,
				offset: 0,
				size: 5,
				reserved: Vec::new(),
			}],
			layout,
		)
		.expect("directory");
		let bytes = archive(
			Header::new(60, 65, 1, 12, ReservedFields::default()),
			&directory,
			b"hello",
		);

		let decoder = Decoder::new(&bytes).expect("decodes");
		assert_eq!(decoder.layout(), Some(layout));
		assert_eq!(decoder.entries()[0].name, "hello.bin");
		assert_eq!(decoder.payload(), b"hello");
	}

	#[test]
	fn empty_archive() {
		let bytes = archive(Header::new(32, 32, 0, 0, ReservedFields::default()), &[], &[]);
		let decoder = Decoder::new(&bytes).expect("decodes");
		assert!(decoder.entries().is_empty());
		assert_eq!(decoder.layout(), None);
		assert!(decoder.payload().is_empty());
	}

	#[test]
	fn data_start_past_end() {
		let bytes = archive(Header::new(64, 64, 1, 8, ReservedFields::default()), &[], &[]);
		assert_eq!(
			Decoder::new(&bytes).expect_err("truncated").kind(),
			Some(ErrorKind::Truncated {
				needed: 64,
				available: 32
			})
		);
	}

	#[test]
	fn entry_width_too_narrow() {
		let bytes = archive(
			Header::new(48, 48, 1, 8, ReservedFields::default()),
			&[0; 16],
			&[],
		);
		assert_eq!(
			Decoder::new(&bytes).expect_err("narrow").kind(),
			Some(ErrorKind::InvalidEntryWidth {
				string_size: 8,
				entry_size: 16
			})
		);
	}
}
