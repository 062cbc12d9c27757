//! Encoder types and functions.
//!
//! The [`Encoder`] collects files in memory and lays out the whole archive at once in
//! [`finalise()`](Encoder::finalise). [`build()`] and [`write_archive()`] drive it from files on
//! disk.

use std::fmt;

use tracing::{instrument, trace};

use crate::{
	error::Result,
	format::{encode_name, Layout, ReservedFields},
};

#[doc(inline)]
pub use self::build::{build, write_archive};

mod add_file;
mod build;
mod finalise;

/// A file queued for the archive.
#[derive(Clone, Eq, PartialEq)]
struct SourceFile {
	name: String,
	data: Vec<u8>,
}

impl fmt::Debug for SourceFile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SourceFile")
			.field("name", &self.name)
			.field("data", &format!("{} bytes", self.data.len()))
			.finish()
	}
}

/// PAC encoder context.
#[derive(Clone, Debug, Default)]
pub struct Encoder {
	files: Vec<SourceFile>,

	/// Fixed name column width, instead of deriving it from the names.
	string_size: Option<u32>,

	reserved: ReservedFields,
}

impl Encoder {
	/// Create an empty encoder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Fix the width of the name column.
	///
	/// By default it's derived from the longest name. With a fixed width, the entry layout is
	/// derived from that width instead, and longer names fail the build.
	#[instrument(level = "trace", skip(self))]
	pub fn with_string_size(mut self, width: u32) -> Self {
		self.string_size = Some(width);
		self
	}

	/// Set the values of the reserved header fields.
	#[instrument(level = "trace", skip(self))]
	pub fn with_reserved(mut self, reserved: ReservedFields) -> Self {
		self.reserved = reserved;
		self
	}

	/// Number of files queued so far.
	pub fn len(&self) -> usize {
		self.files.len()
	}

	/// Whether no files are queued.
	pub fn is_empty(&self) -> bool {
		self.files.is_empty()
	}

	/// The layout the archive will be built with, given the files queued so far.
	pub fn layout(&self) -> Result<Layout> {
		let layout = if let Some(width) = self.string_size {
			Layout::for_name_width(width)?
		} else {
			let lengths = self
				.files
				.iter()
				.map(|file| encode_name(&file.name).map(|name| name.len()))
				.collect::<Result<Vec<_>>>()?;
			Layout::for_names(lengths)?
		};

		trace!(?layout, "derived layout");
		Ok(layout)
	}
}
