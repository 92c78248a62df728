//! Error types for the chunk codec.
use std::borrow::Cow;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Convenience return type.
pub type Result<T> = std::result::Result<T, Error>;

/// Combined return error type for codec operations.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
	/// I/O error.
	///
	/// Only returned by the [`container`](crate::container) helpers; the codec itself does no I/O.
	#[error(transparent)]
	Io(#[from] std::io::Error),

	/// Codec error that's just a message.
	#[error(transparent)]
	Simple(#[from] SimpleError),

	/// Codec error that includes source.
	#[error(transparent)]
	#[diagnostic(transparent)]
	Source(#[from] SourceError),
}

impl Error {
	/// The kind of this error, if it's not an I/O error.
	pub fn kind(&self) -> Option<ErrorKind> {
		match self {
			Self::Io(_) => None,
			Self::Simple(err) => Some(err.kind),
			Self::Source(err) => Some(err.kind),
		}
	}
}

/// Codec error.
#[derive(Error, Diagnostic, Debug)]
#[error("ara chunk: {message}")]
pub struct SimpleError {
	/// Error kind.
	pub kind: ErrorKind,

	/// Error message.
	pub message: Cow<'static, str>,
}

/// Codec error pointing into the XML text.
#[derive(Error, Diagnostic, Debug)]
#[error("ara chunk: {message}")]
pub struct SourceError {
	/// Error kind.
	pub kind: ErrorKind,

	/// Error message.
	pub message: Cow<'static, str>,

	/// Error location in the snippet.
	#[label("here")]
	pub at: SourceSpan,

	/// Snippet of the XML text.
	#[source_code]
	pub snippet: String,
}

impl SimpleError {
	/// New error without source.
	pub fn new(kind: ErrorKind) -> Self {
		Self {
			kind,
			message: kind.default_message(),
		}
	}

	/// Change the error message.
	pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
		self.message = message.into();
		self
	}
}

impl SourceError {
	/// New error with source snippet, extracted from a larger source.
	///
	/// `context` is how many bytes on either side of `at_byte` are kept in the snippet. Bounds are
	/// widened as needed to land on character boundaries.
	pub fn from_source(kind: ErrorKind, source: &str, at_byte: usize, context: usize) -> Self {
		let mut at_byte = at_byte.min(source.len());
		while !source.is_char_boundary(at_byte) {
			at_byte -= 1;
		}

		let mut start = at_byte.saturating_sub(context);
		while !source.is_char_boundary(start) {
			start -= 1;
		}

		let mut end = at_byte.saturating_add(context).min(source.len());
		while !source.is_char_boundary(end) {
			end += 1;
		}

		Self {
			kind,
			message: kind.default_message(),
			snippet: source[start..end].to_owned(),
			at: SourceSpan::from((at_byte - start, usize::from(at_byte < end))),
		}
	}

	/// Change the error message.
	pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
		self.message = message.into();
		self
	}
}

/// Codec error kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// The XML text could not be parsed, or isn't UTF-8.
	MalformedXml,

	/// A required element is absent from an `audioSource` entry.
	MissingField {
		/// Tag name of the missing element.
		field: &'static str,

		/// Position of the entry in document order, starting at zero.
		index: usize,
	},

	/// `openAutomatically` is neither `true` nor `false`.
	InvalidBooleanLiteral,

	/// `archiveData` is not valid padded standard Base64.
	MalformedEncoding,

	/// A version string isn't dotted numeric.
	InvalidVersionFormat,

	/// Two entries share a `documentArchiveID`.
	DuplicateArchiveId,

	/// A value has characters that can't appear in an XML document, like most control characters.
	InvalidCharacter,
}

impl ErrorKind {
	/// Get the default error message for this error kind.
	pub fn default_message(self) -> Cow<'static, str> {
		match self {
			ErrorKind::MalformedXml => Cow::Borrowed("malformed xml"),
			ErrorKind::MissingField { field, index } => Cow::Owned(format!(
				"audio source archive #{index} is missing required field <{field}>"
			)),
			ErrorKind::InvalidBooleanLiteral => {
				Cow::Borrowed("invalid boolean literal, expected `true` or `false`")
			}
			ErrorKind::MalformedEncoding => Cow::Borrowed("malformed base64 encoding"),
			ErrorKind::InvalidVersionFormat => Cow::Borrowed("invalid version format"),
			ErrorKind::DuplicateArchiveId => Cow::Borrowed("duplicate document archive id"),
			ErrorKind::InvalidCharacter => Cow::Borrowed("character not allowed in xml"),
		}
	}
}

impl From<ErrorKind> for SimpleError {
	fn from(ek: ErrorKind) -> Self {
		Self::new(ek)
	}
}

impl From<ErrorKind> for Error {
	fn from(ek: ErrorKind) -> Self {
		Self::Simple(ek.into())
	}
}
