//! Glue between the codec and whatever holds the iXML text.
//!
//! Reading and writing chunks of actual audio files is up to the application: implement
//! [`MetadataContainer`] for your file type, and use [`read_archives`] and [`write_archives`].

use std::{
	fs,
	io::{ErrorKind as IoErrorKind, Result as IoResult},
	path::{Path, PathBuf},
};

use tracing::{debug, instrument};

use crate::{
	decode::{decode_chunk, error::Result},
	dictionary::ArchiveDictionary,
	encode::Encoder,
};

/// Something that stores iXML metadata text, typically the iXML chunk of a WAV or AIFF file.
pub trait MetadataContainer {
	/// The current metadata text, if there is any.
	fn metadata_text(&self) -> IoResult<Option<String>>;

	/// Replace the metadata text.
	fn set_metadata_text(&mut self, text: String) -> IoResult<()>;
}

/// Read the archives from a container.
///
/// A container without metadata has no archives.
#[instrument(level = "debug", skip(container))]
pub fn read_archives<C: MetadataContainer + ?Sized>(container: &C) -> Result<ArchiveDictionary> {
	match container.metadata_text()? {
		Some(text) => decode_chunk(&text),
		None => {
			debug!("container has no metadata");
			Ok(ArchiveDictionary::new())
		}
	}
}

/// Write archives to a container, keeping its other metadata.
#[instrument(level = "debug", skip(container, encoder, dict))]
pub fn write_archives<C: MetadataContainer + ?Sized>(
	container: &mut C,
	encoder: &Encoder,
	dict: &ArchiveDictionary,
) -> Result<()> {
	let existing = container.metadata_text()?;
	let text = encoder.encode(dict, existing.as_deref())?;
	container.set_metadata_text(text)?;
	Ok(())
}

/// A standalone file holding iXML text, e.g. extracted from an audio file with another tool.
///
/// A file that doesn't exist has no metadata; writing creates it.
#[derive(Clone, Debug)]
pub struct TextFile {
	path: PathBuf,
}

impl TextFile {
	/// Refer to the file at this path. Nothing is read until needed.
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	/// The path of the file.
	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl MetadataContainer for TextFile {
	fn metadata_text(&self) -> IoResult<Option<String>> {
		match fs::read_to_string(&self.path) {
			Ok(text) => Ok(Some(text)),
			Err(err) if err.kind() == IoErrorKind::NotFound => Ok(None),
			Err(err) => Err(err),
		}
	}

	fn set_metadata_text(&mut self, text: String) -> IoResult<()> {
		fs::write(&self.path, text)
	}
}
