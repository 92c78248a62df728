//! Audio source archive entries.

use std::fmt;

use crate::version::VersionToken;

/// One audio source archive, as stored in an `<audioSource>` element.
///
/// All fields are opaque to the codec: they're decoded and encoded, never interpreted.
#[derive(Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
	/// Document archive ID.
	///
	/// Unique key in an [`ArchiveDictionary`](crate::dictionary::ArchiveDictionary), and the
	/// compatibility token for the archive content: plug-ins advertise which archive IDs they
	/// can read.
	pub archive_id: String,

	/// Whether the host should load the archive immediately when importing the audio file, or
	/// only when the user explicitly asks for it by applying a matching plug-in.
	pub open_automatically: bool,

	/// Information about the plug-in the archive was created with.
	pub suggested_plug_in: Option<PlugInDescriptor>,

	/// Persistent ID of the audio source in the archive.
	///
	/// The plug-in uses this to find the object to restore the state into.
	pub persistent_id: String,

	/// The archive itself.
	pub payload: Vec<u8>,
}

/// User-readable information about a plug-in, for `<suggestedPlugIn>`.
///
/// This is advisory, e.g. to show a useful error when no compatible plug-in is installed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlugInDescriptor {
	/// Plug-in name.
	pub name: String,

	/// Plug-in manufacturer.
	pub manufacturer: String,

	/// Lowest version of the plug-in that can read the archive.
	pub lowest_supported_version: Option<VersionToken>,

	/// Where to get more information about the plug-in.
	pub information_url: Option<String>,
}

impl ArchiveEntry {
	/// New entry that isn't opened automatically and has no suggested plug-in.
	pub fn new(
		archive_id: impl Into<String>,
		persistent_id: impl Into<String>,
		payload: impl Into<Vec<u8>>,
	) -> Self {
		Self {
			archive_id: archive_id.into(),
			open_automatically: false,
			suggested_plug_in: None,
			persistent_id: persistent_id.into(),
			payload: payload.into(),
		}
	}

	/// Set whether the archive should be opened automatically.
	pub fn open_automatically(mut self, open: bool) -> Self {
		self.open_automatically = open;
		self
	}

	/// Set the suggested plug-in.
	pub fn with_suggested_plug_in(mut self, plug_in: PlugInDescriptor) -> Self {
		self.suggested_plug_in = Some(plug_in);
		self
	}
}

// Payloads can be large; show their size only.
impl fmt::Debug for ArchiveEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ArchiveEntry")
			.field("archive_id", &self.archive_id)
			.field("open_automatically", &self.open_automatically)
			.field("suggested_plug_in", &self.suggested_plug_in)
			.field("persistent_id", &self.persistent_id)
			.field("payload", &format_args!("[{} bytes]", self.payload.len()))
			.finish()
	}
}

impl PlugInDescriptor {
	/// New descriptor with only the required fields.
	pub fn new(name: impl Into<String>, manufacturer: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			manufacturer: manufacturer.into(),
			lowest_supported_version: None,
			information_url: None,
		}
	}

	/// Set the lowest supported version.
	pub fn with_lowest_supported_version(mut self, version: VersionToken) -> Self {
		self.lowest_supported_version = Some(version);
		self
	}

	/// Set the information URL.
	pub fn with_information_url(mut self, url: impl Into<String>) -> Self {
		self.information_url = Some(url.into());
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn debug_hides_payload() {
		let entry = ArchiveEntry::new("id", "pid", vec![0xAA; 4096]);
		let debug = format!("{entry:?}");
		assert!(debug.contains("[4096 bytes]"));
		assert!(!debug.contains("170"));
	}

	#[test]
	fn builders() {
		let entry = ArchiveEntry::new("id", "pid", b"x".to_vec())
			.open_automatically(true)
			.with_suggested_plug_in(
				PlugInDescriptor::new("Melodyne", "Celemony")
					.with_lowest_supported_version("5.0.0".parse().unwrap())
					.with_information_url("https://www.celemony.com"),
			);
		assert!(entry.open_automatically);
		let plug_in = entry.suggested_plug_in.unwrap();
		assert_eq!(plug_in.lowest_supported_version.unwrap().as_str(), "5.0.0");
		assert_eq!(plug_in.information_url.as_deref(), Some("https://www.celemony.com"));
	}
}
