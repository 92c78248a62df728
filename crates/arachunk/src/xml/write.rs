use std::fmt::{self, Write};

use super::{Element, Node, Text};

/// Indentation style for elements built by the encoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Indent {
	/// No whitespace is added.
	#[default]
	None,

	/// Indent by this many spaces per level.
	Spaces(u8),

	/// Indent by one tab per level.
	Tabs,
}

impl Indent {
	fn unit(self) -> Option<String> {
		match self {
			Self::None => None,
			Self::Spaces(n) => Some(" ".repeat(n.into())),
			Self::Tabs => Some("\t".into()),
		}
	}
}

impl Element {
	/// Add indentation whitespace to this subtree.
	///
	/// `depth` is the nesting level this element sits at; its closing tag gets `depth` indents,
	/// its children one more. Only elements that have child elements and no other text are
	/// changed: leaf elements keep their content exactly, even if it's only whitespace.
	pub fn indent(&mut self, indent: Indent, depth: usize) {
		if let Some(unit) = indent.unit() {
			self.indent_with(&unit, depth);
		}
	}

	fn indent_with(&mut self, unit: &str, depth: usize) {
		let has_elements = self.children.iter().any(|node| matches!(node, Node::Element(_)));
		let has_text = self.children.iter().any(|node| match node {
			Node::Text(text) => !text.is_whitespace(),
			Node::CData(_) => true,
			_ => false,
		});
		if has_text || !has_elements {
			return;
		}

		let inner = format!("\n{}", unit.repeat(depth + 1));
		let outer = format!("\n{}", unit.repeat(depth));

		let mut children = Vec::with_capacity(self.children.len() * 2 + 1);
		for mut child in self.children.drain(..) {
			match &mut child {
				Node::Text(_) => continue,
				Node::Element(element) => element.indent_with(unit, depth + 1),
				_ => {}
			}
			children.push(Node::Text(Text::whitespace(inner.clone())));
			children.push(child);
		}
		children.push(Node::Text(Text::whitespace(outer)));
		self.children = children;
	}
}

pub(super) fn node(f: &mut fmt::Formatter<'_>, node: &Node) -> fmt::Result {
	match node {
		Node::Element(e) => element(f, e),
		Node::Text(text) => f.write_str(text.raw()),
		Node::CData(data) => write!(f, "<![CDATA[{data}]]>"),
		Node::Comment(comment) => write!(f, "<!--{comment}-->"),
		Node::ProcessingInstruction(pi) | Node::Declaration(pi) => write!(f, "<?{pi}?>"),
		Node::DocType(doctype) => write!(f, "<!DOCTYPE{doctype}>"),
	}
}

pub(super) fn element(f: &mut fmt::Formatter<'_>, element: &Element) -> fmt::Result {
	f.write_char('<')?;
	f.write_str(&element.name)?;
	f.write_str(&element.attributes)?;

	if element.children.is_empty() && element.self_closing {
		return f.write_str("/>");
	}

	f.write_char('>')?;
	for child in &element.children {
		node(f, child)?;
	}
	write!(f, "</{}>", element.name)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::xml::Document;

	fn tree() -> Element {
		let mut inner = Element::new("b");
		inner.push(Element::with_text("c", "1").unwrap());
		inner.push(Element::with_text("d", "  spaced  ").unwrap());
		let mut outer = Element::new("a");
		outer.push(inner);
		outer.push(Element::new("e"));
		outer
	}

	#[test]
	fn compact_by_default() {
		let mut element = tree();
		element.indent(Indent::None, 0);
		assert_eq!(
			element.to_string(),
			"<a><b><c>1</c><d>  spaced  </d></b><e></e></a>"
		);
	}

	#[test]
	fn indents_with_spaces() {
		let mut element = tree();
		element.indent(Indent::Spaces(2), 0);
		assert_eq!(
			element.to_string(),
			"<a>\n  <b>\n    <c>1</c>\n    <d>  spaced  </d>\n  </b>\n  <e></e>\n</a>"
		);
	}

	#[test]
	fn indents_with_tabs_at_depth() {
		let mut element = tree();
		element.indent(Indent::Tabs, 1);
		assert_eq!(
			element.to_string(),
			"<a>\n\t\t<b>\n\t\t\t<c>1</c>\n\t\t\t<d>  spaced  </d>\n\t\t</b>\n\t\t<e></e>\n\t</a>"
		);
	}

	#[test]
	fn reindenting_replaces_whitespace() {
		let mut element = tree();
		element.indent(Indent::Spaces(4), 0);
		element.indent(Indent::Spaces(2), 0);
		let mut expected = tree();
		expected.indent(Indent::Spaces(2), 0);
		assert_eq!(element, expected);
	}

	#[test]
	fn leaves_whitespace_leaves_alone() {
		let mut element = Element::new("a");
		element.push(Element::with_text("b", "  ").unwrap());
		element.push(Element::with_text("c", "").unwrap());
		element.indent(Indent::Spaces(1), 0);
		assert_eq!(element.to_string(), "<a>\n <b>  </b>\n <c></c>\n</a>");
	}

	#[test]
	fn self_closing_only_without_children() {
		let mut doc = Document::parse("<a/>").unwrap();
		assert_eq!(doc.to_string(), "<a/>");
		doc.root_mut().unwrap().push(Element::new("b"));
		assert_eq!(doc.to_string(), "<a><b></b></a>");
	}

	#[test]
	fn writes_every_node_kind() {
		let mut element = Element::new("x");
		element.push(Node::Comment(" c ".into()));
		element.push(Node::CData("<d>".into()));
		element.push(Node::ProcessingInstruction("pi data".into()));
		element.push(Text::new("&").unwrap());
		let doc = Document {
			nodes: vec![
				Node::Declaration(r#"xml version="1.0""#.into()),
				Node::DocType(" x".into()),
				Node::Element(element),
			],
		};
		assert_eq!(
			doc.to_string(),
			r#"<?xml version="1.0"?><!DOCTYPE x><x><!-- c --><![CDATA[<d>]]><?pi data?>&amp;</x>"#
		);
	}
}
