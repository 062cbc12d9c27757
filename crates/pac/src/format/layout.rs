//! Directory entry layout.
//!
//! Every entry in a directory has the same shape: a name column of `string_size` bytes, then
//! integer fields up to `entry_size`. The first three integers are the entry's id, offset, and
//! size; any further ones are reserved.

use crate::error::{ErrorKind, Result};

use super::constants::{BLOCK_SIZE, ENTRY_FIELDS, INT_SIZE};

/// Widths of the name column and of whole entries.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Layout {
	string_size: u32,
	entry_size: u32,
}

impl Layout {
	/// Check a layout found in an archive.
	///
	/// The integer area after the name column must be made of whole integers, and hold at least
	/// the three entry fields.
	pub fn new(string_size: u32, entry_size: u32) -> Result<Self> {
		let invalid = ErrorKind::InvalidEntryWidth {
			string_size,
			entry_size,
		};

		let int_area = entry_size.checked_sub(string_size).ok_or(invalid)?;
		if int_area % INT_SIZE != 0 || int_area / INT_SIZE < ENTRY_FIELDS {
			return Err(invalid.into());
		}

		Ok(Self {
			string_size,
			entry_size,
		})
	}

	/// Derive the layout for building an archive whose longest name is `name_width` bytes.
	///
	/// The name column is `name_width` rounded up to a whole integer. The entry is then grown in
	/// integer steps until it's at least twice the name column, has room for the entry fields, and
	/// is a whole number of blocks.
	pub fn for_name_width(name_width: u32) -> Result<Self> {
		let string_size = round_up(u64::from(name_width), u64::from(INT_SIZE));

		// stepping by INT_SIZE from an aligned start lands on the first block multiple past the minimum
		let minimum = (string_size * 2).max(string_size + u64::from(ENTRY_FIELDS * INT_SIZE));
		let entry_size = round_up(minimum, u64::from(BLOCK_SIZE));

		Ok(Self {
			string_size: u32::try_from(string_size).map_err(|_| ErrorKind::TooLarge)?,
			entry_size: u32::try_from(entry_size).map_err(|_| ErrorKind::TooLarge)?,
		})
	}

	/// Derive the layout for building an archive from the encoded lengths of its names.
	pub fn for_names(lengths: impl IntoIterator<Item = usize>) -> Result<Self> {
		let longest = lengths.into_iter().max().unwrap_or(0);
		Self::for_name_width(u32::try_from(longest).map_err(|_| ErrorKind::TooLarge)?)
	}

	/// Width in bytes of the name column.
	pub fn string_size(self) -> u32 {
		self.string_size
	}

	/// Width in bytes of a whole entry.
	pub fn entry_size(self) -> u32 {
		self.entry_size
	}

	/// Number of integer fields in each entry.
	pub fn int_count(self) -> u32 {
		(self.entry_size - self.string_size) / INT_SIZE
	}

	/// Number of reserved integer fields after id, offset, and size.
	pub fn reserved_count(self) -> u32 {
		self.int_count() - ENTRY_FIELDS
	}

	/// Length in bytes of a directory of `file_count` entries.
	pub fn directory_len(self, file_count: u32) -> Result<u32> {
		self.entry_size
			.checked_mul(file_count)
			.ok_or_else(|| ErrorKind::TooLarge.into())
	}
}

fn round_up(value: u64, multiple: u64) -> u64 {
	value.div_ceil(multiple) * multiple
}
