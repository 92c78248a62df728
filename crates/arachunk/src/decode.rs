//! Decoder functions.
//!
//! Decoding is all-or-nothing: any malformed entry fails the whole chunk, rather than silently
//! dropping an archive that some application may not be able to recreate.

use tracing::{debug, instrument, trace};

use crate::{
	archive::{ArchiveEntry, PlugInDescriptor},
	base64,
	dictionary::ArchiveDictionary,
	format::{
		ARA_VENDOR_KEYWORD, ARCHIVE_DATA, AUDIO_SOURCE, AUDIO_SOURCES, DOCUMENT_ARCHIVE_ID,
		FALSE_LITERAL, INFORMATION_URL, LOWEST_SUPPORTED_VERSION, MANUFACTURER_NAME,
		OPEN_AUTOMATICALLY, PERSISTENT_ID, PLUG_IN_NAME, SUGGESTED_PLUG_IN, TRUE_LITERAL,
	},
	version::VersionToken,
	xml::{Document, Element},
};

use self::error::{ErrorKind, Result, SimpleError};

pub mod error;

/// Decode the ARA archives from iXML text.
///
/// Text without an `<ARA>` element (or without `<audioSources>` in it) decodes to an empty
/// dictionary: most audio files don't carry any archives.
#[instrument(level = "debug", skip(text), fields(len = text.len()))]
pub fn decode_chunk(text: &str) -> Result<ArchiveDictionary> {
	let document = Document::parse(text)?;
	decode_document(&document)
}

/// Decode the ARA archives from an already-parsed document.
#[instrument(level = "debug", skip(document))]
pub fn decode_document(document: &Document) -> Result<ArchiveDictionary> {
	let Some(vendor) = find_vendor_subtree(document) else {
		debug!("no ARA element");
		return Ok(ArchiveDictionary::new());
	};

	let Some(sources) = vendor.find_child(AUDIO_SOURCES) else {
		debug!("no audioSources element");
		return Ok(ArchiveDictionary::new());
	};

	let entries = read_entries(sources)?;
	debug!(count = entries.len(), "read audio source archives");
	ArchiveDictionary::from_entries(entries)
}

/// Find the `<ARA>` element.
///
/// It's either a top-level element (in a minimal chunk), or a child of the root element (in a
/// full iXML document, under `<BWFXML>`).
pub fn find_vendor_subtree(document: &Document) -> Option<&Element> {
	document.find_element(ARA_VENDOR_KEYWORD).or_else(|| {
		document
			.root()
			.and_then(|root| root.find_child(ARA_VENDOR_KEYWORD))
	})
}

/// Read every `<audioSource>` in document order.
///
/// This doesn't check for uniqueness: that's done when building the dictionary.
#[cfg_attr(feature = "expose-internals", visibility::make(pub))]
pub(crate) fn read_entries(sources: &Element) -> Result<Vec<ArchiveEntry>> {
	sources
		.child_elements()
		.filter(|child| child.name == AUDIO_SOURCE)
		.enumerate()
		.map(|(index, source)| read_entry(index, source))
		.collect()
}

/// Read one `<audioSource>`.
#[cfg_attr(feature = "expose-internals", visibility::make(pub))]
#[instrument(level = "trace", skip(source))]
pub(crate) fn read_entry(index: usize, source: &Element) -> Result<ArchiveEntry> {
	let archive_id = required_text(source, DOCUMENT_ARCHIVE_ID, index)?;
	if archive_id.is_empty() {
		return Err(ErrorKind::MissingField {
			field: DOCUMENT_ARCHIVE_ID,
			index,
		}
		.into());
	}
	trace!(%archive_id, "read archive id");

	let open_automatically = parse_bool(&required_text(source, OPEN_AUTOMATICALLY, index)?)?;
	let persistent_id = required_text(source, PERSISTENT_ID, index)?;
	let payload = base64::decode(&required_text(source, ARCHIVE_DATA, index)?)?;
	let suggested_plug_in = source
		.find_child(SUGGESTED_PLUG_IN)
		.map(|element| read_suggested_plug_in(index, element))
		.transpose()?;

	Ok(ArchiveEntry {
		archive_id,
		open_automatically,
		suggested_plug_in,
		persistent_id,
		payload,
	})
}

/// Read a `<suggestedPlugIn>`, where name and manufacturer are required.
#[cfg_attr(feature = "expose-internals", visibility::make(pub))]
pub(crate) fn read_suggested_plug_in(index: usize, element: &Element) -> Result<PlugInDescriptor> {
	Ok(PlugInDescriptor {
		name: required_text(element, PLUG_IN_NAME, index)?,
		manufacturer: required_text(element, MANUFACTURER_NAME, index)?,
		lowest_supported_version: element
			.find_child(LOWEST_SUPPORTED_VERSION)
			.map(|version| VersionToken::parse(version.text().trim()))
			.transpose()?,
		information_url: element
			.find_child(INFORMATION_URL)
			.map(|url| url.text().into_owned()),
	})
}

fn required_text(parent: &Element, field: &'static str, index: usize) -> Result<String> {
	parent
		.find_child(field)
		.map(|child| child.text().into_owned())
		.ok_or_else(|| ErrorKind::MissingField { field, index }.into())
}

fn parse_bool(text: &str) -> Result<bool> {
	match text.trim() {
		TRUE_LITERAL => Ok(true),
		FALSE_LITERAL => Ok(false),
		other => Err(SimpleError::new(ErrorKind::InvalidBooleanLiteral)
			.with_message(format!(
				"invalid boolean literal {other:?} for <{OPEN_AUTOMATICALLY}>, expected `{TRUE_LITERAL}` or `{FALSE_LITERAL}`"
			))
			.into()),
	}
}
