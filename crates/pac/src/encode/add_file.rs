use std::path::Path;

use tracing::{instrument, trace, warn};

use crate::error::{ErrorKind, FormatError, Result};

use super::{Encoder, SourceFile};

impl Encoder {
	/// Add a file from memory.
	///
	/// Files are stored in the order they're added.
	#[instrument(level = "trace", skip(self, data))]
	pub fn add_file(&mut self, name: impl Into<String> + std::fmt::Debug, data: impl Into<Vec<u8>>) {
		let name = name.into();
		if self.files.iter().any(|file| file.name == name) {
			warn!(%name, "duplicate name, the later file will overwrite the earlier on extraction");
		}

		let data = data.into();
		trace!(%name, length = %data.len(), "added file");
		self.files.push(SourceFile { name, data });
	}

	/// Add a file from disk, named by its base name.
	#[instrument(level = "trace", skip(self))]
	pub fn add_path(&mut self, path: &Path) -> Result<()> {
		let name = path
			.file_name()
			.and_then(|name| name.to_str())
			.ok_or_else(|| {
				FormatError::new(ErrorKind::NameEncoding)
					.with_message(format!("path {path:?} has no usable file name"))
			})?
			.to_owned();

		let data = std::fs::read(path)?;
		self.add_file(name, data);
		Ok(())
	}
}
