//! The ordered dictionary of audio source archives.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::{
	archive::ArchiveEntry,
	decode::error::{Error, ErrorKind, Result, SimpleError},
	format::DOCUMENT_ARCHIVE_ID,
};

/// Audio source archives keyed by document archive ID.
///
/// Iteration (and so serialisation) follows insertion order. IDs are unique and never empty: the
/// only way to overwrite an entry is [`replace`](Self::replace), everything else fails on
/// conflict.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArchiveDictionary {
	entries: Vec<ArchiveEntry>,
	by_id: HashMap<String, usize>,
}

pub(crate) fn duplicate(id: &str) -> Error {
	SimpleError::new(ErrorKind::DuplicateArchiveId)
		.with_message(format!("duplicate document archive id {id:?}"))
		.into()
}

/// An empty ID can't be told apart from a missing one once written, so it's refused up front.
fn check_id(entry: &ArchiveEntry, index: usize) -> Result<()> {
	if entry.archive_id.is_empty() {
		return Err(ErrorKind::MissingField {
			field: DOCUMENT_ARCHIVE_ID,
			index,
		}
		.into());
	}
	Ok(())
}

impl ArchiveDictionary {
	/// An empty dictionary.
	pub fn new() -> Self {
		Self::default()
	}

	/// Build a dictionary from entries in order, failing on the first repeated or empty ID.
	pub fn from_entries(entries: impl IntoIterator<Item = ArchiveEntry>) -> Result<Self> {
		let mut dict = Self::new();
		for entry in entries {
			dict.insert(entry)?;
		}
		Ok(dict)
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether there are no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Whether there's an entry with this ID.
	pub fn contains(&self, archive_id: &str) -> bool {
		self.by_id.contains_key(archive_id)
	}

	/// Get an entry by ID.
	pub fn get(&self, archive_id: &str) -> Option<&ArchiveEntry> {
		self.by_id.get(archive_id).map(|&index| &self.entries[index])
	}

	/// Iterate over entries in order.
	pub fn iter(&self) -> std::slice::Iter<'_, ArchiveEntry> {
		self.entries.iter()
	}

	/// Iterate over IDs in order.
	pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
		self.entries.iter().map(|entry| entry.archive_id.as_str())
	}

	/// Add an entry at the end.
	///
	/// Fails with [`ErrorKind::DuplicateArchiveId`] if the ID is already present, and with
	/// [`ErrorKind::MissingField`] if it's empty.
	pub fn insert(&mut self, entry: ArchiveEntry) -> Result<()> {
		check_id(&entry, self.len())?;
		if self.contains(&entry.archive_id) {
			return Err(duplicate(&entry.archive_id));
		}

		self.by_id
			.insert(entry.archive_id.clone(), self.entries.len());
		self.entries.push(entry);
		Ok(())
	}

	/// Add an entry, overwriting any entry with the same ID in place.
	///
	/// Returns the overwritten entry. This is for callers that have decided which of two
	/// conflicting archives to keep. Fails with [`ErrorKind::MissingField`] if the ID is empty.
	pub fn replace(&mut self, entry: ArchiveEntry) -> Result<Option<ArchiveEntry>> {
		check_id(&entry, self.len())?;
		Ok(match self.by_id.get(&entry.archive_id) {
			Some(&index) => Some(std::mem::replace(&mut self.entries[index], entry)),
			None => {
				self.by_id
					.insert(entry.archive_id.clone(), self.entries.len());
				self.entries.push(entry);
				None
			}
		})
	}

	/// Remove an entry by ID, keeping the order of the others.
	pub fn remove(&mut self, archive_id: &str) -> Option<ArchiveEntry> {
		let index = self.by_id.remove(archive_id)?;
		let entry = self.entries.remove(index);
		for later in self.by_id.values_mut().filter(|i| **i > index) {
			*later -= 1;
		}
		Some(entry)
	}

	/// Combine two dictionaries: `self`'s entries, then `other`'s.
	///
	/// Any ID present in both is a conflict, reported as [`ErrorKind::DuplicateArchiveId`]; there
	/// is no automatic reconciliation, as either archive may be irreplaceable.
	#[instrument(level = "debug", skip_all, fields(left = self.len(), right = other.len()))]
	pub fn merge(mut self, other: ArchiveDictionary) -> Result<ArchiveDictionary> {
		if let Some(conflict) = other.ids().find(|id| self.contains(id)) {
			debug!(%conflict, "merge conflict");
			return Err(duplicate(conflict));
		}

		for entry in other.entries {
			self.insert(entry)?;
		}
		Ok(self)
	}

	/// Find the archive to use given a list of archive IDs a plug-in can read.
	///
	/// `compatible` is in order of preference, typically the plug-in's own document archive ID
	/// followed by the older ones it is still compatible with. Versions are not checked.
	pub fn best_match<'id>(
		&self,
		compatible: impl IntoIterator<Item = &'id str>,
	) -> Option<&ArchiveEntry> {
		compatible.into_iter().find_map(|id| self.get(id))
	}

	/// Entries that should be loaded as soon as the audio file is imported.
	pub fn entries_to_open_automatically(&self) -> impl Iterator<Item = &ArchiveEntry> + '_ {
		self.entries.iter().filter(|entry| entry.open_automatically)
	}
}

impl<'a> IntoIterator for &'a ArchiveDictionary {
	type Item = &'a ArchiveEntry;
	type IntoIter = std::slice::Iter<'a, ArchiveEntry>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl IntoIterator for ArchiveDictionary {
	type Item = ArchiveEntry;
	type IntoIter = std::vec::IntoIter<ArchiveEntry>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}
