//! PAC Header structure
//!
//! The header is the first [`HEADER_SIZE`] bytes of an archive. Besides identifying the file, it
//! carries everything needed to find the directory and the payload region: the directory sits
//! between the header and `data_start`, and every entry in it has the same width, which is
//! derived from the header alone with [`Header::entry_size()`].

use deku::prelude::*;
use tracing::{debug, instrument};

use crate::error::{self, ErrorKind, FormatError, SourceError};

use super::constants::{HEADER_SIZE, PAC_MAGIC};

/// PAC Header
#[derive(Clone, Debug, Eq, PartialEq, DekuRead, DekuWrite)]
#[deku(endian = "little")]
pub struct Header {
	/// Magic number. Asserted to match [`PAC_MAGIC`].
	#[deku(assert = "*magic == PAC_MAGIC")]
	pub magic: [u8; 4],

	/// Offset in bytes of the payload region, from the start of the archive.
	pub data_start: u32,

	/// Length in bytes of the whole archive.
	pub total_size: u32,

	/// Number of directory entries.
	pub file_count: u32,

	/// Reserved, written as 1.
	pub unknown0: u32,

	/// Width in bytes of the name column of each directory entry.
	pub string_size: u32,

	/// Reserved, written as 0.
	pub unknown1: u32,

	/// Reserved, written as 0.
	pub unknown2: u32,
}

/// Values of the reserved header fields.
///
/// Their meaning is unknown. They're preserved when read and written with the [default] values
/// unless told otherwise, which is what existing archives contain.
///
/// [default]: ReservedFields::default
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ReservedFields {
	/// Written before the string size.
	pub unknown0: u32,

	/// Written after the string size.
	pub unknown1: u32,

	/// Written last.
	pub unknown2: u32,
}

impl Default for ReservedFields {
	fn default() -> Self {
		Self {
			unknown0: 1,
			unknown1: 0,
			unknown2: 0,
		}
	}
}

impl Header {
	/// Create a header from its meaningful fields.
	pub fn new(
		data_start: u32,
		total_size: u32,
		file_count: u32,
		string_size: u32,
		reserved: ReservedFields,
	) -> Self {
		Self {
			magic: PAC_MAGIC,
			data_start,
			total_size,
			file_count,
			unknown0: reserved.unknown0,
			string_size,
			unknown1: reserved.unknown1,
			unknown2: reserved.unknown2,
		}
	}

	/// The reserved fields as found in this header.
	pub fn reserved(&self) -> ReservedFields {
		ReservedFields {
			unknown0: self.unknown0,
			unknown1: self.unknown1,
			unknown2: self.unknown2,
		}
	}

	/// Parse the header at the start of an archive.
	///
	/// Only the first [`HEADER_SIZE`] bytes are looked at.
	#[instrument(level = "debug", skip(bytes), fields(length = bytes.len()))]
	pub fn decode(bytes: &[u8]) -> error::Result<Self> {
		if bytes.len() < HEADER_SIZE as usize {
			return Err(ErrorKind::Truncated {
				needed: HEADER_SIZE as _,
				available: bytes.len(),
			}
			.into());
		}

		if bytes[..PAC_MAGIC.len()] != PAC_MAGIC {
			return Err(SourceError::from_source(ErrorKind::InvalidMagic, bytes, 0, 8).into());
		}

		let (_, header) = Self::from_bytes((bytes, 0)).map_err(FormatError::from_deku)?;
		debug!(?header, "read pac header");
		Ok(header)
	}

	/// Serialise the header.
	pub fn encode(&self) -> error::Result<Vec<u8>> {
		let bytes = self.to_bytes().map_err(FormatError::from_deku)?;
		debug_assert_eq!(bytes.len(), HEADER_SIZE as usize);
		Ok(bytes)
	}

	/// Width in bytes of each directory entry.
	///
	/// The directory fills the space between the header and the payload region, so this is that
	/// span divided by the file count. An archive with no files must have an empty span, and its
	/// entry width is reported as zero.
	pub fn entry_size(&self) -> error::Result<u32> {
		let span = self
			.data_start
			.checked_sub(HEADER_SIZE)
			.ok_or(ErrorKind::DataStartInHeader(self.data_start))?;

		if self.file_count == 0 {
			return if span == 0 {
				Ok(0)
			} else {
				Err(ErrorKind::EmptyArchiveDirectory(self.data_start).into())
			};
		}

		if span % self.file_count != 0 {
			return Err(ErrorKind::UnevenDirectory {
				span,
				file_count: self.file_count,
			}
			.into());
		}

		Ok(span / self.file_count)
	}
}
