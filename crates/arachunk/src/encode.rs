//! Encoder types and functions.

use tracing::{debug, instrument, trace};

use crate::{
	archive::{ArchiveEntry, PlugInDescriptor},
	base64,
	decode::error::Result,
	dictionary::ArchiveDictionary,
	format::{
		ARA_VENDOR_KEYWORD, ARCHIVE_DATA, AUDIO_SOURCE, AUDIO_SOURCES, DOCUMENT_ARCHIVE_ID,
		FALSE_LITERAL, INFORMATION_URL, LOWEST_SUPPORTED_VERSION, MANUFACTURER_NAME,
		OPEN_AUTOMATICALLY, PERSISTENT_ID, PLUG_IN_NAME, SUGGESTED_PLUG_IN, TRUE_LITERAL,
	},
	xml::{Document, Element, Indent, Node},
};

/// Encode archives into iXML text, with default options.
///
/// See [`Encoder::encode`].
pub fn encode_chunk(dict: &ArchiveDictionary, existing: Option<&str>) -> Result<String> {
	Encoder::new().encode(dict, existing)
}

/// Chunk encoder context.
///
/// Holds the output options; encoding itself doesn't change it, so one encoder can be reused.
#[derive(Clone, Debug, Default)]
pub struct Encoder {
	indent: Indent,
}

impl Encoder {
	/// Create a new encoder with default options.
	///
	/// By default, output is compact.
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the indentation of the `<ARA>` subtree.
	///
	/// Only the subtree written by the encoder is affected, the rest of the document is kept as-is.
	pub fn set_indent(&mut self, indent: Indent) {
		self.indent = indent;
	}

	/// Encode archives into iXML text.
	///
	/// With `existing` text (the iXML chunk already in the audio file), only the `<ARA>` element is
	/// replaced, in place, or added at the end of the root element if it's not there yet; all other
	/// content is kept byte for byte. Without existing text, or if it's blank, the output is a lone
	/// `<ARA>` element.
	///
	/// Archives are written in dictionary order, so the same input always gives the same output.
	///
	/// Fails if the existing text isn't well-formed XML, or with
	/// [`ErrorKind::InvalidCharacter`](crate::decode::error::ErrorKind::InvalidCharacter) if a
	/// text field holds characters XML can't carry. Nothing is written in either case.
	#[instrument(level = "debug", skip_all, fields(entries = dict.len(), existing = existing.is_some()))]
	pub fn encode(&self, dict: &ArchiveDictionary, existing: Option<&str>) -> Result<String> {
		let mut document = match existing {
			Some(text) if !text.trim().is_empty() => Document::parse(text)?,
			_ => Document::default(),
		};

		self.place_vendor_subtree(&mut document, dict)?;
		Ok(document.to_string())
	}

	/// Build the `<ARA>` element for these archives, indented as if it was at `depth`.
	pub fn vendor_subtree(&self, dict: &ArchiveDictionary, depth: usize) -> Result<Element> {
		let mut sources = Element::new(AUDIO_SOURCES);
		for entry in dict {
			trace!(archive_id = %entry.archive_id, "write audio source archive");
			sources.push(audio_source(entry)?);
		}

		let mut vendor = Element::new(ARA_VENDOR_KEYWORD);
		vendor.push(sources);
		vendor.indent(self.indent, depth);
		Ok(vendor)
	}

	/// Put the `<ARA>` element where a decoder will find it.
	fn place_vendor_subtree(&self, document: &mut Document, dict: &ArchiveDictionary) -> Result<()> {
		if let Some(existing) = document.find_element_mut(ARA_VENDOR_KEYWORD) {
			debug!("replace top-level ARA element");
			*existing = self.vendor_subtree(dict, 0)?;
		} else if let Some(root) = document.root_mut() {
			debug!(root = %root.name, "replace or insert ARA element in root");
			root.replace_or_insert_child(self.vendor_subtree(dict, 1)?);
		} else {
			debug!("write minimal document");
			document.nodes.push(Node::Element(self.vendor_subtree(dict, 0)?));
		}
		Ok(())
	}
}

fn audio_source(entry: &ArchiveEntry) -> Result<Element> {
	let mut source = Element::new(AUDIO_SOURCE);
	source.push(Element::with_text(DOCUMENT_ARCHIVE_ID, &entry.archive_id)?);
	source.push(Element::with_text(
		OPEN_AUTOMATICALLY,
		if entry.open_automatically {
			TRUE_LITERAL
		} else {
			FALSE_LITERAL
		},
	)?);
	if let Some(plug_in) = &entry.suggested_plug_in {
		source.push(suggested_plug_in(plug_in)?);
	}
	source.push(Element::with_text(PERSISTENT_ID, &entry.persistent_id)?);
	source.push(Element::with_text(ARCHIVE_DATA, base64::encode(&entry.payload))?);
	Ok(source)
}

fn suggested_plug_in(plug_in: &PlugInDescriptor) -> Result<Element> {
	let mut element = Element::new(SUGGESTED_PLUG_IN);
	element.push(Element::with_text(PLUG_IN_NAME, &plug_in.name)?);
	if let Some(version) = &plug_in.lowest_supported_version {
		element.push(Element::with_text(LOWEST_SUPPORTED_VERSION, version.as_str())?);
	}
	element.push(Element::with_text(MANUFACTURER_NAME, &plug_in.manufacturer)?);
	if let Some(url) = &plug_in.information_url {
		element.push(Element::with_text(INFORMATION_URL, url)?);
	}
	Ok(element)
}
