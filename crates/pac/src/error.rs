//! Error types shared by the [decoder](crate::decode) and the [encoder](crate::encode).
use std::borrow::Cow;

use deku::DekuError;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::format::{ARCHIVE_EXTENSION, HEADER_SIZE, INT_SIZE};

/// Convenience return type.
pub type Result<T> = std::result::Result<T, Error>;

/// Combined error type for every PAC operation.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
	/// I/O error.
	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// Format error that's just a message.
	#[error(transparent)]
	Format(#[from] FormatError),

	/// Format error that includes a snippet of the archive.
	#[error(transparent)]
	Source(#[from] SourceError),
}

impl Error {
	/// The format error kind, if this is a format error.
	pub fn kind(&self) -> Option<ErrorKind> {
		match self {
			Self::Io(_) => None,
			Self::Format(err) => Some(err.kind),
			Self::Source(err) => Some(err.kind),
		}
	}
}

/// Format error.
#[derive(Error, Diagnostic, Debug)]
#[error("pac: {message}")]
pub struct FormatError {
	/// Error kind.
	pub kind: ErrorKind,

	/// Error message.
	pub message: Cow<'static, str>,
}

/// Format error pointing into the archive bytes.
#[derive(Error, Diagnostic, Debug)]
#[error("pac: {message}")]
pub struct SourceError {
	/// Error kind.
	pub kind: ErrorKind,

	/// Error message.
	pub message: Cow<'static, str>,

	/// Error location in the snippet.
	#[label("here")]
	pub at: SourceSpan,

	/// Snippet of the archive, hex-formatted.
	#[source_code]
	pub snippet: String,
}

impl FormatError {
	/// New error with the kind's default message.
	pub fn new(kind: ErrorKind) -> Self {
		Self {
			kind,
			message: kind.default_message(),
		}
	}

	/// New error from deku.
	pub fn from_deku(orig: DekuError) -> Self {
		Self::new(ErrorKind::Parse).with_message(orig.to_string())
	}

	/// Change the error message.
	pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
		self.message = message.into();
		self
	}
}

impl SourceError {
	/// New error with source snippet.
	pub fn new(kind: ErrorKind, snippet: &[u8], at_byte: usize) -> Self {
		Self {
			kind,
			message: kind.default_message(),
			snippet: format!("{snippet:02x?}"),
			at: SourceSpan::from((
				// each byte is "xx, " and the list opens with [
				(at_byte * 4) + 1,
				2,
			)),
		}
	}

	/// New error with source snippet, extracted from a larger source.
	pub fn from_source(kind: ErrorKind, source: &[u8], at_byte: usize, context: usize) -> Self {
		let start = at_byte.saturating_sub(context);
		let end = at_byte.saturating_add(context).min(source.len());
		Self::new(kind, &source[start..end], at_byte.saturating_sub(start))
	}

	/// New error from deku.
	pub fn from_deku(orig: DekuError, source: &[u8], at_byte: usize, context: usize) -> Self {
		Self::from_source(ErrorKind::Parse, source, at_byte, context).with_message(orig.to_string())
	}

	/// Change the error message.
	pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
		self.message = message.into();
		self
	}
}

/// Format error kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Low-level parse error.
	Parse,

	/// The archive doesn't start with the `FPAC` marker.
	InvalidMagic,

	/// The input is shorter than a structure that must be there.
	Truncated {
		/// Bytes needed
		needed: usize,
		/// Bytes available
		available: usize,
	},

	/// The payload region is declared to start inside the header.
	DataStartInHeader(u32),

	/// The directory span isn't a whole multiple of the file count.
	UnevenDirectory {
		/// Bytes between the header and the payload region
		span: u32,
		/// Declared number of files
		file_count: u32,
	},

	/// An empty archive declares a non-empty directory.
	EmptyArchiveDirectory(u32),

	/// The entry width can't hold the name column and the three entry fields.
	InvalidEntryWidth {
		/// Name column width
		string_size: u32,
		/// Entry width
		entry_size: u32,
	},

	/// A file name doesn't fit the name column.
	NameTooLong {
		/// Name column width
		width: u32,
		/// Encoded name length
		length: usize,
	},

	/// A file name has characters outside of Latin-1.
	NameEncoding,

	/// A file name would escape the extraction directory.
	UnsafeName,

	/// An entry carries more reserved fields than its layout holds.
	ReservedOverflow {
		/// Reserved fields the layout holds
		capacity: u32,
		/// Reserved fields on the entry
		actual: usize,
	},

	/// An entry's data lies outside the payload region.
	OutOfBounds,

	/// The archive would exceed the 32-bit size limit.
	TooLarge,

	/// The built archive doesn't have the length its header declares.
	SizeMismatch {
		/// Length declared in the header
		expected: u32,
		/// Length actually produced
		actual: usize,
	},

	/// An output archive path doesn't have the `.pac` extension.
	BadExtension,
}

impl ErrorKind {
	/// Get the default error message for this error kind.
	pub fn default_message(self) -> Cow<'static, str> {
		match self {
			ErrorKind::Parse => Cow::Borrowed("parse error"),
			ErrorKind::InvalidMagic => Cow::Borrowed("not a PAC archive: bad magic"),
			ErrorKind::Truncated { needed, available } => Cow::Owned(format!(
				"truncated input: need {needed} bytes, have {available}"
			)),
			ErrorKind::DataStartInHeader(data_start) => Cow::Owned(format!(
				"data start {data_start} is inside the {HEADER_SIZE}-byte header"
			)),
			ErrorKind::UnevenDirectory { span, file_count } => Cow::Owned(format!(
				"directory of {span} bytes doesn't divide evenly into {file_count} entries"
			)),
			ErrorKind::EmptyArchiveDirectory(data_start) => Cow::Owned(format!(
				"archive has no files but data starts at {data_start}"
			)),
			ErrorKind::InvalidEntryWidth {
				string_size,
				entry_size,
			} => Cow::Owned(format!(
				"entry width {entry_size} can't hold a {string_size}-byte name and three {INT_SIZE}-byte fields"
			)),
			ErrorKind::NameTooLong { width, length } => Cow::Owned(format!(
				"name of {length} bytes doesn't fit in a {width}-byte column"
			)),
			ErrorKind::NameEncoding => Cow::Borrowed("name is not representable in Latin-1"),
			ErrorKind::UnsafeName => Cow::Borrowed("name is not a plain file name"),
			ErrorKind::ReservedOverflow { capacity, actual } => Cow::Owned(format!(
				"entry has {actual} reserved fields but the layout holds {capacity}"
			)),
			ErrorKind::OutOfBounds => Cow::Borrowed("entry data lies outside the payload region"),
			ErrorKind::TooLarge => Cow::Borrowed("archive exceeds the 4 GiB format limit"),
			ErrorKind::SizeMismatch { expected, actual } => Cow::Owned(format!(
				"built {actual} bytes but the header declares {expected}"
			)),
			ErrorKind::BadExtension => Cow::Owned(format!(
				"output path must have the .{ARCHIVE_EXTENSION} extension"
			)),
		}
	}
}

impl From<ErrorKind> for FormatError {
	fn from(ek: ErrorKind) -> Self {
		Self::new(ek)
	}
}

impl From<ErrorKind> for Error {
	fn from(ek: ErrorKind) -> Self {
		Self::Format(ek.into())
	}
}
