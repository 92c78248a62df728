//! A small XML tree, lossless for anything it doesn't need to understand.
//!
//! iXML documents carry metadata from many tools. The codec only ever rewrites the one subtree
//! it owns, so everything else is kept as written: text and attributes are stored raw (still
//! escaped), and comments, CDATA sections, processing instructions, declarations and doctypes
//! are kept as nodes. Serialising an untouched tree gives back the input byte for byte, with
//! the exception of whitespace inside end tags (`</a >` becomes `</a>`) and the case of the
//! `DOCTYPE` keyword.
//!
//! Entities declared in a DTD internal subset (`<!DOCTYPE x [<!ENTITY foo "bar">]>`) are not
//! resolved: the declaration itself is kept, but a reference to it like `&foo;` fails to parse
//! with [`ErrorKind::MalformedXml`].
//!
//! Only characters allowed by XML 1.0 can be parsed or written; see [`is_xml_char`].

use std::{borrow::Cow, fmt};

use quick_xml::escape::{escape, unescape};

use crate::decode::error::{Error, ErrorKind, Result, SimpleError};

#[doc(inline)]
pub use self::write::Indent;

mod parse;
mod write;

/// Whether a character may appear in an XML 1.0 document.
///
/// This is the `Char` production: tab, line feed, carriage return, and everything from space up
/// except surrogates, U+FFFE and U+FFFF.
pub fn is_xml_char(c: char) -> bool {
	matches!(
		c,
		'\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
	)
}

/// Byte offset and value of the first character not allowed in XML.
fn invalid_char(text: &str) -> Option<(usize, char)> {
	text.char_indices().find(|&(_, c)| !is_xml_char(c))
}

/// A parsed XML document or fragment.
///
/// There can be any number of top-level nodes: a full iXML document has a declaration and a
/// single root element, while the minimal chunk written by this crate is a lone `<ARA>` element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
	/// Top-level nodes in document order.
	pub nodes: Vec<Node>,
}

/// Any XML node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
	/// An element and its subtree.
	Element(Element),

	/// Character data.
	Text(Text),

	/// Content of a `<![CDATA[...]]>` section.
	CData(String),

	/// Content of a `<!--...-->` comment.
	Comment(String),

	/// Content of a `<?...?>` processing instruction, other than the XML declaration.
	ProcessingInstruction(String),

	/// Content of the `<?xml ...?>` declaration.
	Declaration(String),

	/// Content of a `<!DOCTYPE ...>` declaration after the keyword, including leading whitespace.
	DocType(String),
}

/// An element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
	/// Tag name, including any namespace prefix.
	pub name: String,

	/// Attributes, raw as written in the start tag, including leading whitespace.
	///
	/// The codec never writes attributes; this only exists so they survive a round trip.
	pub attributes: String,

	/// Child nodes in document order.
	pub children: Vec<Node>,

	/// Whether this was written as `<name/>`. Only honoured while there are no children.
	pub self_closing: bool,
}

/// Character data, keeping both the raw and the unescaped forms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Text {
	raw: String,
	value: String,
}

impl Text {
	/// Text from an unescaped value.
	///
	/// Fails with [`ErrorKind::InvalidCharacter`] if the value has characters that XML can't
	/// carry, even escaped.
	pub fn new(value: impl Into<String>) -> Result<Self> {
		let value = value.into();
		if let Some((at, c)) = invalid_char(&value) {
			return Err(SimpleError::new(ErrorKind::InvalidCharacter)
				.with_message(format!(
					"character {c:?} at byte {at} can't be written in xml"
				))
				.into());
		}

		Ok(Self {
			raw: escape(&value).into_owned(),
			value,
		})
	}

	/// Text from raw, escaped, character data.
	///
	/// Fails with [`ErrorKind::MalformedXml`] if it contains unknown entities, a stray `&`, or
	/// characters (literal or referenced) not allowed in XML.
	pub fn from_raw(raw: impl Into<String>) -> Result<Self> {
		Self::checked_raw(raw.into()).map_err(|message| {
			Error::from(
				SimpleError::new(ErrorKind::MalformedXml)
					.with_message(format!("malformed xml: {message}")),
			)
		})
	}

	fn checked_raw(raw: String) -> std::result::Result<Self, String> {
		let value = unescape(&raw)
			.map_err(|err| format!("invalid character data: {err}"))?
			.into_owned();
		if let Some((_, c)) = invalid_char(&value) {
			return Err(format!("invalid character data: {c:?} is not allowed"));
		}
		Ok(Self { raw, value })
	}

	/// Whitespace used for indentation, which needs neither escaping nor checking.
	fn whitespace(indent: String) -> Self {
		Self {
			raw: indent.clone(),
			value: indent,
		}
	}

	/// The text as written.
	pub fn raw(&self) -> &str {
		&self.raw
	}

	/// The text with entities resolved.
	pub fn value(&self) -> &str {
		&self.value
	}

	/// Whether this is only whitespace.
	pub fn is_whitespace(&self) -> bool {
		self.raw.chars().all(|c| c.is_ascii_whitespace())
	}
}

impl Element {
	/// A new element without attributes or children.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			attributes: String::new(),
			children: Vec::new(),
			self_closing: false,
		}
	}

	/// A new element containing only the given text.
	///
	/// Fails like [`Text::new`].
	pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Result<Self> {
		let mut element = Self::new(name);
		element.children.push(Node::Text(Text::new(text)?));
		Ok(element)
	}

	/// Append a child node.
	pub fn push(&mut self, child: impl Into<Node>) {
		self.children.push(child.into());
	}

	/// Iterate over child elements, skipping text, comments, etc.
	pub fn child_elements(&self) -> impl Iterator<Item = &Element> + '_ {
		self.children.iter().filter_map(Node::as_element)
	}

	/// Find the first immediate child element with this tag name.
	pub fn find_child(&self, name: &str) -> Option<&Element> {
		self.child_elements().find(|child| child.name == name)
	}

	/// Find the first immediate child element with this tag name, mutably.
	pub fn find_child_mut(&mut self, name: &str) -> Option<&mut Element> {
		self.children
			.iter_mut()
			.filter_map(Node::as_element_mut)
			.find(|child| child.name == name)
	}

	/// Replace the first child element with the same tag name as `new`, or append it.
	///
	/// A replaced element keeps its position; no other child is touched.
	pub fn replace_or_insert_child(&mut self, new: Element) {
		if let Some(existing) = self.find_child_mut(&new.name) {
			*existing = new;
		} else {
			self.children.push(Node::Element(new));
		}
	}

	/// Text content, with entities resolved.
	///
	/// This concatenates text and CDATA children, ignoring comments and processing instructions.
	/// For elements that have child elements, this is only the text in between.
	pub fn text(&self) -> Cow<'_, str> {
		let mut parts = self.children.iter().filter_map(|node| match node {
			Node::Text(text) => Some(text.value()),
			Node::CData(data) => Some(data.as_str()),
			_ => None,
		});

		let Some(first) = parts.next() else {
			return Cow::Borrowed("");
		};

		match parts.next() {
			None => Cow::Borrowed(first),
			Some(second) => {
				let mut text = String::from(first);
				text.push_str(second);
				parts.for_each(|part| text.push_str(part));
				Cow::Owned(text)
			}
		}
	}
}

impl Node {
	/// This node as an element, if it is one.
	pub fn as_element(&self) -> Option<&Element> {
		match self {
			Self::Element(element) => Some(element),
			_ => None,
		}
	}

	/// This node as a mutable element, if it is one.
	pub fn as_element_mut(&mut self) -> Option<&mut Element> {
		match self {
			Self::Element(element) => Some(element),
			_ => None,
		}
	}
}

impl From<Element> for Node {
	fn from(element: Element) -> Self {
		Self::Element(element)
	}
}

impl From<Text> for Node {
	fn from(text: Text) -> Self {
		Self::Text(text)
	}
}

impl Document {
	/// A document made of a single element.
	pub fn from_element(element: Element) -> Self {
		Self {
			nodes: vec![Node::Element(element)],
		}
	}

	/// Iterate over top-level elements.
	pub fn elements(&self) -> impl Iterator<Item = &Element> + '_ {
		self.nodes.iter().filter_map(Node::as_element)
	}

	/// The first top-level element.
	pub fn root(&self) -> Option<&Element> {
		self.elements().next()
	}

	/// The first top-level element, mutably.
	pub fn root_mut(&mut self) -> Option<&mut Element> {
		self.nodes.iter_mut().find_map(Node::as_element_mut)
	}

	/// Find the first top-level element with this tag name.
	pub fn find_element(&self, name: &str) -> Option<&Element> {
		self.elements().find(|element| element.name == name)
	}

	/// Find the first top-level element with this tag name, mutably.
	pub fn find_element_mut(&mut self, name: &str) -> Option<&mut Element> {
		self.nodes
			.iter_mut()
			.filter_map(Node::as_element_mut)
			.find(|element| element.name == name)
	}
}

impl fmt::Display for Document {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.nodes.iter().try_for_each(|node| write::node(f, node))
	}
}

impl fmt::Display for Element {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write::element(f, self)
	}
}
