//! PAC Directory
//!
//! The directory is an array of fixed-width entries directly after the header. Entries are read
//! by slicing at `index * entry_size`, so each one decodes independently of the others.

use deku::{
	bitvec::{BitSlice, BitVec, Msb0},
	prelude::*,
};
use tracing::{instrument, trace};

use crate::error::{self, ErrorKind, FormatError, SourceError};

use super::layout::Layout;

/// A directory entry.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Entry {
	/// File name.
	pub name: String,

	/// Position of the entry in the directory, assigned when building.
	pub id: u32,

	/// Offset in bytes of the file's data, from the start of the payload region.
	pub offset: u32,

	/// Length in bytes of the file's data.
	pub size: u32,

	/// Reserved integer fields after the size.
	///
	/// Kept as read, and written back padded with zeros to fill the entry.
	pub reserved: Vec<u32>,
}

impl Entry {
	/// The name, checked to be usable as a single path component.
	///
	/// Rejects empty names, `.` and `..`, and names with separators, so that joining the name onto
	/// a directory can't land outside of it.
	pub fn file_name(&self) -> error::Result<&str> {
		let name = self.name.as_str();
		if name.is_empty()
			|| name == "."
			|| name == ".."
			|| name.contains(['/', '\\', '\0'])
		{
			return Err(FormatError::new(ErrorKind::UnsafeName)
				.with_message(format!("entry {} has an unsafe name: {name:?}", self.id))
				.into());
		}

		Ok(name)
	}
}

/// An entry as laid out on disk.
#[derive(Clone, Debug, Eq, PartialEq, DekuRead, DekuWrite)]
#[deku(endian = "little", ctx = "string_size: usize, reserved_count: usize")]
struct RawEntry {
	#[deku(count = "string_size")]
	name: Vec<u8>,

	id: u32,

	offset: u32,

	size: u32,

	#[deku(count = "reserved_count")]
	reserved: Vec<u32>,
}

fn ctx(layout: Layout) -> (usize, usize) {
	(
		layout.string_size() as usize,
		layout.reserved_count() as usize,
	)
}

/// Decode a name column: trailing NULs are padding, and each byte is one Latin-1 character.
pub fn decode_name(column: &[u8]) -> String {
	let end = column
		.iter()
		.rposition(|&byte| byte != 0)
		.map_or(0, |last| last + 1);
	column[..end].iter().copied().map(char::from).collect()
}

/// Encode a name as Latin-1, one byte per character.
///
/// NUL is the column padding, so names containing it are refused: they wouldn't read back.
pub fn encode_name(name: &str) -> error::Result<Vec<u8>> {
	if name.contains('\0') {
		return Err(FormatError::new(ErrorKind::NameEncoding)
			.with_message(format!("name {name:?} contains a NUL byte"))
			.into());
	}

	name.chars()
		.map(u8::try_from)
		.collect::<Result<Vec<u8>, _>>()
		.map_err(|_| {
			FormatError::new(ErrorKind::NameEncoding)
				.with_message(format!("name {name:?} is not representable in Latin-1"))
				.into()
		})
}

/// Decode `file_count` entries from the directory bytes.
///
/// `bytes` starts at the first entry; anything after the last entry is ignored.
#[instrument(level = "debug", skip(bytes), fields(length = bytes.len()))]
pub fn decode_entries(
	bytes: &[u8],
	file_count: u32,
	layout: Layout,
) -> error::Result<Vec<Entry>> {
	let entry_size = layout.entry_size() as usize;
	let needed = entry_size
		.checked_mul(file_count as usize)
		.ok_or(ErrorKind::TooLarge)?;
	if bytes.len() < needed {
		return Err(ErrorKind::Truncated {
			needed,
			available: bytes.len(),
		}
		.into());
	}

	(0..file_count as usize)
		.map(|index| -> error::Result<Entry> {
			let start = index * entry_size;
			let slice = &bytes[start..start + entry_size];

			let (_, raw) = RawEntry::read(BitSlice::<u8, Msb0>::from_slice(slice), ctx(layout))
				.map_err(|err| SourceError::from_deku(err, bytes, start, entry_size))?;

			let entry = Entry {
				name: decode_name(&raw.name),
				id: raw.id,
				offset: raw.offset,
				size: raw.size,
				reserved: raw.reserved,
			};
			trace!(index, ?entry, "read entry");
			Ok(entry)
		})
		.collect()
}

/// Encode entries into directory bytes, exactly `entry_size` bytes each.
///
/// Names are never truncated: one that doesn't fit the name column is an error.
#[instrument(level = "debug", skip(entries), fields(count = entries.len()))]
pub fn encode_entries(entries: &[Entry], layout: Layout) -> error::Result<Vec<u8>> {
	let string_size = layout.string_size() as usize;
	let reserved_count = layout.reserved_count() as usize;

	let mut output: BitVec<u8, Msb0> =
		BitVec::with_capacity(entries.len() * layout.entry_size() as usize * 8);
	for entry in entries {
		let mut name = encode_name(&entry.name)?;
		if name.len() > string_size {
			return Err(FormatError::new(ErrorKind::NameTooLong {
				width: layout.string_size(),
				length: name.len(),
			})
			.with_message(format!(
				"name {:?} is {} bytes, longer than the {string_size}-byte column",
				entry.name,
				name.len()
			))
			.into());
		}
		name.resize(string_size, 0);

		if entry.reserved.len() > reserved_count {
			return Err(ErrorKind::ReservedOverflow {
				capacity: layout.reserved_count(),
				actual: entry.reserved.len(),
			}
			.into());
		}
		let mut reserved = entry.reserved.clone();
		reserved.resize(reserved_count, 0);

		let raw = RawEntry {
			name,
			id: entry.id,
			offset: entry.offset,
			size: entry.size,
			reserved,
		};
		raw.write(&mut output, ctx(layout))
			.map_err(FormatError::from_deku)?;
		trace!(?entry, "wrote entry");
	}

	let bytes = output.into_vec();
	debug_assert_eq!(bytes.len(), entries.len() * layout.entry_size() as usize);
	Ok(bytes)
}
