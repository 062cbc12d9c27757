//! Decoder types and functions.
//!
//! Archives are read whole into memory, and a [`Decoder`] parses them from a byte slice. The
//! [`enumerate()`] and [`extract()`] functions do this for a file on disk.

use crate::format::{Entry, Header, Layout};

#[doc(inline)]
pub use self::extract::{enumerate, extract};

mod extract;
mod open;

/// Decoder context.
///
/// Borrows the archive bytes; holds the parsed header and directory.
#[derive(Clone, Debug)]
pub struct Decoder<'data> {
	bytes: &'data [u8],

	/// Header, as read.
	header: Header,

	/// Entry layout. Absent for archives with no files, as it can't be derived.
	layout: Option<Layout>,

	/// Directory, in file order.
	entries: Vec<Entry>,
}

impl<'data> Decoder<'data> {
	/// The archive header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// The entry layout, if the archive has any files.
	pub fn layout(&self) -> Option<Layout> {
		self.layout
	}

	/// Directory entries, in file order.
	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	/// Take the directory entries.
	pub fn into_entries(self) -> Vec<Entry> {
		self.entries
	}

	/// The payload region: everything from `data_start` to the end of the archive.
	pub fn payload(&self) -> &'data [u8] {
		&self.bytes[self.header.data_start as usize..]
	}
}
