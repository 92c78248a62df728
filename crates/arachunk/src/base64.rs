//! Base64 transcoding of archive payloads.
//!
//! Standard alphabet with padding, as per [RFC 4648 §4](https://tools.ietf.org/html/rfc4648#section-4).
//! Decoding is strict, except that whitespace is tolerated anywhere in the input, as XML
//! pretty-printers like to wrap long text.

use base64ct::{Base64, Encoding};
use tracing::{instrument, trace};

use crate::decode::error::{ErrorKind, Result, SimpleError};

/// Encode bytes to padded standard Base64, on a single line.
pub fn encode(bytes: &[u8]) -> String {
	Base64::encode_string(bytes)
}

/// Decode padded standard Base64.
///
/// ASCII whitespace is stripped before decoding. Anything else outside of the standard alphabet,
/// missing or misplaced padding, truncated groups, and non-zero trailing bits are all rejected
/// with [`ErrorKind::MalformedEncoding`].
#[instrument(level = "trace", skip(text), fields(len = text.len()))]
pub fn decode(text: &str) -> Result<Vec<u8>> {
	let compact: String;
	let text = if text.bytes().any(|b| b.is_ascii_whitespace()) {
		trace!("stripping whitespace");
		compact = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
		compact.as_str()
	} else {
		text
	};

	Base64::decode_vec(text).map_err(|err| {
		SimpleError::new(ErrorKind::MalformedEncoding)
			.with_message(format!("malformed base64 encoding: {err}"))
			.into()
	})
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn rfc4648_vectors() {
		let vectors: [(&[u8], &str); 7] = [
			(b"", ""),
			(b"f", "Zg=="),
			(b"fo", "Zm8="),
			(b"foo", "Zm9v"),
			(b"foob", "Zm9vYg=="),
			(b"fooba", "Zm9vYmE="),
			(b"foobar", "Zm9vYmFy"),
		];

		for (bytes, text) in vectors {
			assert_eq!(encode(bytes), text);
			assert_eq!(decode(text).unwrap(), bytes);
		}
	}

	#[test]
	fn uses_standard_alphabet() {
		assert_eq!(encode(&[0xfb, 0xff, 0xfe]), "+//+");
		assert_eq!(decode("+//+").unwrap(), vec![0xfb, 0xff, 0xfe]);
	}

	#[test]
	fn tolerates_whitespace() {
		assert_eq!(decode("TW9p\n  biBE\r\n\tdQ==\n").unwrap(), b"Moin Du");
		assert_eq!(decode("  \n ").unwrap(), Vec::<u8>::new());
	}

	#[test]
	fn never_emits_whitespace() {
		let encoded = encode(&[0x42; 1024]);
		assert!(!encoded.chars().any(|c| c.is_ascii_whitespace()));
	}

	#[test]
	fn rejects_url_safe_alphabet() {
		let err = decode("-__-").unwrap_err();
		assert_eq!(err.kind(), Some(ErrorKind::MalformedEncoding));
	}

	#[test]
	fn rejects_invalid_characters() {
		assert!(decode("Zm9v!mFy").is_err());
		assert!(decode("Zm9v\u{e9}mFy").is_err());
	}

	#[test]
	fn rejects_missing_padding() {
		assert!(decode("Zg").is_err());
		assert!(decode("Zm8").is_err());
	}

	#[test]
	fn rejects_wrong_padding() {
		assert!(decode("Zg=").is_err());
		assert!(decode("Zg===").is_err());
		assert!(decode("Z===").is_err());
		assert!(decode("=Zg=").is_err());
		assert!(decode("Zg==Zg==").is_err());
	}

	#[test]
	fn rejects_truncated_group() {
		assert!(decode("Zm9vY").is_err());
	}

	#[test]
	fn rejects_non_canonical_trailing_bits() {
		// "Zh==" decodes to the same byte as "Zg==" in lax decoders
		assert!(decode("Zh==").is_err());
	}

	proptest! {
		#[test]
		fn round_trips(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
			prop_assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
		}

		#[test]
		fn encoded_length_is_padded(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
			let encoded = encode(&bytes);
			prop_assert_eq!(encoded.len() % 4, 0);
			prop_assert_eq!(encoded.len(), (bytes.len() + 2) / 3 * 4);
		}
	}
}
