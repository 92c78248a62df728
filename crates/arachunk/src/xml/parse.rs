use quick_xml::{
	events::{BytesStart, Event},
	Reader,
};
use tracing::{debug, instrument, trace};

use super::{invalid_char, Document, Element, Node, Text};
use crate::decode::error::{Error, ErrorKind, Result, SourceError};

/// How many bytes of context to include in error snippets, on either side.
const SNIPPET_CONTEXT: usize = 40;

impl Document {
	/// Parse XML text.
	///
	/// Fails with [`ErrorKind::MalformedXml`] on unbalanced or mismatched tags, unclosed elements,
	/// invalid character data or attributes, characters not allowed in XML, and non-whitespace
	/// text outside of any element.
	#[instrument(level = "debug", skip(text), fields(len = text.len()))]
	pub fn parse(text: &str) -> Result<Self> {
		let mut reader = Reader::from_str(text);
		reader.trim_text(false);
		reader.expand_empty_elements(false);
		reader.check_end_names(false);

		let malformed = |at: usize, message: String| -> Error {
			SourceError::from_source(ErrorKind::MalformedXml, text, at, SNIPPET_CONTEXT)
				.with_message(format!("malformed xml: {message}"))
				.into()
		};

		if let Some((at, c)) = invalid_char(text) {
			return Err(malformed(at, format!("character {c:?} is not allowed")));
		}

		let mut top = Vec::new();
		let mut open: Vec<Element> = Vec::new();

		loop {
			let at = reader.buffer_position();
			let event = reader
				.read_event()
				.map_err(|err| malformed(reader.buffer_position(), err.to_string()))?;
			trace!(?event, %at, "xml event");

			let node = match event {
				Event::Eof => break,
				Event::Start(start) => {
					open.push(start_element(&start).map_err(|err| malformed(at, err))?);
					continue;
				}
				Event::End(end) => {
					let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
					let Some(element) = open.pop() else {
						return Err(malformed(at, format!("unexpected end tag </{name}>")));
					};
					if element.name != name {
						return Err(malformed(
							at,
							format!("expected </{}>, found </{name}>", element.name),
						));
					}
					Node::Element(element)
				}
				Event::Empty(start) => {
					let mut element = start_element(&start).map_err(|err| malformed(at, err))?;
					element.self_closing = true;
					Node::Element(element)
				}
				Event::Text(chars) => {
					let raw = utf8(chars.into_inner().into_owned()).map_err(|err| malformed(at, err))?;
					let chars = Text::checked_raw(raw).map_err(|err| malformed(at, err))?;
					if open.is_empty() && !chars.is_whitespace() {
						return Err(malformed(at, "text outside of any element".into()));
					}
					Node::Text(chars)
				}
				Event::CData(data) => {
					if open.is_empty() {
						return Err(malformed(at, "CDATA outside of any element".into()));
					}
					Node::CData(utf8(data.into_inner().into_owned()).map_err(|err| malformed(at, err))?)
				}
				Event::Comment(comment) => Node::Comment(
					utf8(comment.into_inner().into_owned()).map_err(|err| malformed(at, err))?,
				),
				Event::PI(pi) => Node::ProcessingInstruction(
					utf8(pi.into_inner().into_owned()).map_err(|err| malformed(at, err))?,
				),
				Event::Decl(decl) => {
					Node::Declaration(utf8(decl.to_vec()).map_err(|err| malformed(at, err))?)
				}
				Event::DocType(doctype) => {
					let content =
						utf8(doctype.into_inner().into_owned()).map_err(|err| malformed(at, err))?;
					// the reader trims whitespace after the keyword
					let end = reader.buffer_position();
					let raw = text
						.get(at + "<!DOCTYPE".len()..end.saturating_sub(1))
						.filter(|raw| raw.ends_with(content.as_str()));
					Node::DocType(raw.map_or_else(|| format!(" {content}"), str::to_owned))
				}
			};

			if let Some(parent) = open.last_mut() {
				parent.children.push(node);
			} else {
				top.push(node);
			}
		}

		if let Some(unclosed) = open.last() {
			return Err(malformed(
				text.len(),
				format!("unclosed element <{}>", unclosed.name),
			));
		}

		debug!(nodes = top.len(), "parsed xml");
		Ok(Self { nodes: top })
	}

	/// Parse XML from bytes, which must be UTF-8.
	pub fn parse_bytes(bytes: &[u8]) -> Result<Self> {
		let text = std::str::from_utf8(bytes).map_err(|err| {
			let lossy = String::from_utf8_lossy(bytes);
			SourceError::from_source(
				ErrorKind::MalformedXml,
				&lossy,
				err.valid_up_to(),
				SNIPPET_CONTEXT,
			)
			.with_message(format!("malformed xml: not utf-8: {err}"))
		})?;
		Self::parse(text)
	}
}

/// Build an element from its start tag, checking that attributes are well-formed.
fn start_element(start: &BytesStart<'_>) -> std::result::Result<Element, String> {
	let name = utf8(start.name().as_ref().to_vec())?;
	if name.is_empty() {
		return Err("empty tag name".into());
	}

	for attribute in start.attributes() {
		let attribute = attribute.map_err(|err| format!("in <{name}>: {err}"))?;
		let value = attribute
			.unescape_value()
			.map_err(|err| format!("in <{name}>: {err}"))?;
		if let Some((_, c)) = invalid_char(&value) {
			return Err(format!("in <{name}>: {c:?} is not allowed in attribute values"));
		}
	}

	Ok(Element {
		attributes: utf8(start.attributes_raw().to_vec())?,
		name,
		children: Vec::new(),
		self_closing: false,
	})
}

fn utf8(bytes: Vec<u8>) -> std::result::Result<String, String> {
	String::from_utf8(bytes).map_err(|err| format!("not utf-8: {err}"))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn kind_of(text: &str) -> Option<ErrorKind> {
		Document::parse(text).unwrap_err().kind()
	}

	#[test]
	fn round_trips_untouched_content() {
		let inputs = [
			"<a/>",
			"<a />",
			"<a></a>",
			"<a>text</a>",
			r#"<?xml version="1.0" encoding="UTF-8"?>
<BWFXML>
	<IXML_VERSION>2.10</IXML_VERSION>
	<PROJECT>Tom &amp; Jerry &#x263A;</PROJECT>
	<!-- a comment -->
	<NOTE attr='x &lt; y'  other="2">with <![CDATA[<raw>]]> data</NOTE>
	<?app instruction?>
	<EMPTY/>
</BWFXML>
"#,
			"<!DOCTYPE note><note>x</note>",
			"<!DOCTYPE  note\n  SYSTEM \"note.dtd\"><note>x</note>",
			"<!DOCTYPE note [<!ENTITY writer \"Someone\">]><note>x</note>",
			"<ns:a xmlns:ns=\"urn:x\"><ns:b>1</ns:b></ns:a>",
			"<a>1</a><b>2</b>",
		];

		for input in inputs {
			let doc = Document::parse(input).unwrap();
			assert_eq!(doc.to_string(), input);
		}
	}

	#[test]
	fn builds_tree() {
		let doc = Document::parse("<r><a>1</a><b><c>2</c></b></r>").unwrap();
		let root = doc.root().unwrap();
		assert_eq!(root.name, "r");
		let names: Vec<_> = root.child_elements().map(|e| e.name.as_str()).collect();
		assert_eq!(names, vec!["a", "b"]);
		assert_eq!(
			root.find_child("b")
				.and_then(|b| b.find_child("c"))
				.map(|c| c.text().into_owned()),
			Some("2".into())
		);
	}

	#[test]
	fn keeps_raw_attributes() {
		let doc = Document::parse(r#"<a  x="1"   y='&amp;' />"#).unwrap();
		let root = doc.root().unwrap();
		assert_eq!(root.attributes, r#"  x="1"   y='&amp;' "#);
		assert!(root.self_closing);
	}

	#[test]
	fn empty_input_is_empty_document() {
		assert_eq!(Document::parse("").unwrap(), Document::default());
		assert!(Document::parse("\n  \n").unwrap().root().is_none());
	}

	#[test]
	fn rejects_mismatched_tags() {
		assert_eq!(kind_of("<a><b></a></b>"), Some(ErrorKind::MalformedXml));
	}

	#[test]
	fn rejects_unclosed() {
		assert_eq!(kind_of("<a><b></b>"), Some(ErrorKind::MalformedXml));
	}

	#[test]
	fn rejects_unopened() {
		assert_eq!(kind_of("<a></a></b>"), Some(ErrorKind::MalformedXml));
	}

	#[test]
	fn rejects_bad_entities() {
		assert_eq!(kind_of("<a>x &nope; y</a>"), Some(ErrorKind::MalformedXml));
		assert_eq!(kind_of("<a>x & y</a>"), Some(ErrorKind::MalformedXml));
	}

	#[test]
	fn rejects_bad_attributes() {
		assert_eq!(kind_of(r#"<a x="1" x="2"/>"#), Some(ErrorKind::MalformedXml));
		assert_eq!(kind_of(r#"<a x="&nope;"/>"#), Some(ErrorKind::MalformedXml));
	}

	#[test]
	fn rejects_stray_text() {
		assert_eq!(kind_of("hello <a/>"), Some(ErrorKind::MalformedXml));
		assert_eq!(kind_of("<a/> trailing"), Some(ErrorKind::MalformedXml));
	}

	#[test]
	fn rejects_non_utf8() {
		let err = Document::parse_bytes(b"<a>\xff\xfe</a>").unwrap_err();
		assert_eq!(err.kind(), Some(ErrorKind::MalformedXml));
	}

	#[test]
	fn accepts_utf8_bytes() {
		let doc = Document::parse_bytes("<a>é</a>".as_bytes()).unwrap();
		assert_eq!(doc.root().unwrap().text(), "é");
	}

	#[test]
	fn errors_point_into_source() {
		let err = Document::parse("<a><b>1</b></c>").unwrap_err();
		let crate::decode::error::Error::Source(source) = err else {
			panic!("expected a source error, got {err:?}");
		};
		assert!(source.snippet.contains("</c>"));
		assert!(source.message.contains("expected </a>"));
	}

	#[test]
	fn rejects_characters_not_allowed_in_xml() {
		for input in [
			"<a>\u{1}</a>",
			"<a>x\u{0}</a>",
			"<a x=\"\u{7}\"/>",
			"<a><![CDATA[\u{2}]]></a>",
			"<!--\u{1B}--><a/>",
			"<a>&#1;</a>",
			"<a x=\"&#x8;\"/>",
		] {
			assert_eq!(kind_of(input), Some(ErrorKind::MalformedXml), "{input:?}");
		}
	}

	#[test]
	fn invalid_character_error_has_one_message() {
		let err = Document::parse("<a>&#1;</a>").unwrap_err();
		assert_eq!(
			err.to_string().matches("malformed xml").count(),
			1,
			"{err}"
		);
		assert!(err.to_string().starts_with("ara chunk: malformed xml: invalid character data"));
	}

	#[test]
	fn internal_subset_entities_are_not_resolved() {
		let input = "<!DOCTYPE note [<!ENTITY writer \"Someone\">]><note>&writer;</note>";
		assert_eq!(kind_of(input), Some(ErrorKind::MalformedXml));
	}
}
