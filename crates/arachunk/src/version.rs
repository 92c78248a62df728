//! Dotted numeric plug-in versions.

use std::{
	cmp::Ordering,
	fmt,
	hash::{Hash, Hasher},
	str::FromStr,
};

use crate::decode::error::{Error, ErrorKind, Result, SimpleError};

/// A version like `5.0.0`, as found in `<lowestSupportedVersion>`.
///
/// Components are non-negative integers of any length; they are kept as normalised digit strings
/// so that there is no overflow. Comparison is numeric and component-wise, with missing trailing
/// components counting as zero: `1` and `1.0` are equal, `1.10` is greater than `1.9`.
///
/// The original text is retained and written back out as-is.
#[derive(Clone, Debug)]
pub struct VersionToken {
	text: String,
	segments: Vec<String>,
}

impl VersionToken {
	/// Parse a version string.
	///
	/// Fails with [`ErrorKind::InvalidVersionFormat`] on empty input, empty components (including
	/// leading or trailing dots), or components that aren't all ASCII digits.
	pub fn parse(text: &str) -> Result<Self> {
		let invalid = |why: &str| -> Error {
			SimpleError::new(ErrorKind::InvalidVersionFormat)
				.with_message(format!("invalid version format {text:?}: {why}"))
				.into()
		};

		if text.is_empty() {
			return Err(invalid("empty"));
		}

		let segments = text
			.split('.')
			.map(|segment| {
				if segment.is_empty() {
					Err(invalid("empty component"))
				} else if !segment.bytes().all(|b| b.is_ascii_digit()) {
					Err(invalid("non-numeric component"))
				} else {
					let trimmed = segment.trim_start_matches('0');
					Ok(if trimmed.is_empty() { "0" } else { trimmed }.to_owned())
				}
			})
			.collect::<Result<Vec<_>>>()?;

		Ok(Self {
			text: text.to_owned(),
			segments,
		})
	}

	/// The version as originally written.
	pub fn as_str(&self) -> &str {
		&self.text
	}

	/// The numeric components, without leading zeros.
	pub fn segments(&self) -> impl Iterator<Item = &str> + '_ {
		self.segments.iter().map(String::as_str)
	}

	/// Whether an installed plug-in version meets this minimum version.
	pub fn is_satisfied_by(&self, installed: &VersionToken) -> bool {
		installed >= self
	}

	/// Components with trailing zeros removed, so that equal versions have equal significant parts.
	fn significant(&self) -> &[String] {
		let len = self
			.segments
			.iter()
			.rposition(|s| s != "0")
			.map_or(0, |last| last + 1);
		&self.segments[..len]
	}
}

/// Compare two normalised digit strings numerically.
fn cmp_digits(a: &str, b: &str) -> Ordering {
	a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl Ord for VersionToken {
	fn cmp(&self, other: &Self) -> Ordering {
		let len = self.segments.len().max(other.segments.len());
		(0..len)
			.map(|i| {
				let a = self.segments.get(i).map_or("0", String::as_str);
				let b = other.segments.get(i).map_or("0", String::as_str);
				cmp_digits(a, b)
			})
			.find(|ord| ord.is_ne())
			.unwrap_or(Ordering::Equal)
	}
}

impl PartialOrd for VersionToken {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl PartialEq for VersionToken {
	fn eq(&self, other: &Self) -> bool {
		self.significant() == other.significant()
	}
}

impl Eq for VersionToken {}

impl Hash for VersionToken {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.significant().hash(state);
	}
}

impl FromStr for VersionToken {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self> {
		Self::parse(s)
	}
}

impl fmt::Display for VersionToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.text)
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	fn v(s: &str) -> VersionToken {
		s.parse().unwrap()
	}

	#[test]
	fn ordering() {
		assert!(v("2.0") > v("1.9"));
		assert!(v("1.10") > v("1.9"));
		assert!(v("5") < v("5.1"));
		assert!(v("5.0.1") > v("5"));
		assert!(v("0.9.99") < v("1"));
	}

	#[test]
	fn zero_padded_equality() {
		assert_eq!(v("1"), v("1.0"));
		assert_eq!(v("1.0.0"), v("1"));
		assert_eq!(v("01.002"), v("1.2"));
		assert_eq!(v("1").cmp(&v("1.0.0")), Ordering::Equal);
		assert_eq!(v("0"), v("0.0"));
	}

	#[test]
	fn hash_agrees_with_eq() {
		let set: HashSet<_> = [v("1"), v("1.0"), v("1.0.0"), v("01")].into_iter().collect();
		assert_eq!(set.len(), 1);
	}

	#[test]
	fn arbitrary_digit_count() {
		let big = v("1.18446744073709551616");
		assert!(big > v("1.18446744073709551615"));
		assert!(big < v("2"));
		assert_eq!(
			big.segments().collect::<Vec<_>>(),
			vec!["1", "18446744073709551616"]
		);
	}

	#[test]
	fn keeps_original_text() {
		assert_eq!(v("5.00.1").to_string(), "5.00.1");
		assert_eq!(v("5.00.1").as_str(), "5.00.1");
	}

	#[test]
	fn rejects_malformed() {
		for bad in ["", ".", "1..0", ".1", "1.", "1.a", "a", "1.-2", "1 .2", " 1", "1.0b", "v1"] {
			let err = VersionToken::parse(bad).unwrap_err();
			assert_eq!(err.kind(), Some(ErrorKind::InvalidVersionFormat), "{bad:?}");
		}
	}

	#[test]
	fn satisfaction() {
		let lowest = v("5.0.0");
		assert!(lowest.is_satisfied_by(&v("5")));
		assert!(lowest.is_satisfied_by(&v("5.3.1")));
		assert!(!lowest.is_satisfied_by(&v("4.99")));
	}
}
