//! Arachunk: ARA audio source archives in audio file chunks.
//!
//! ARA 2 lets applications exchange persistent audio source state (plug-in analysis, edits) by
//! embedding it into the iXML chunk of WAV and AIFF files. Several archives, for different
//! plug-ins, can live side by side, keyed by their document archive ID. This crate decodes and
//! encodes that part of the iXML document, and leaves everything else in it alone.
//!
//! ```
//! use arachunk::{decode::decode_chunk, encode::encode_chunk, ArchiveDictionary, ArchiveEntry};
//!
//! let mut archives = ArchiveDictionary::new();
//! archives.insert(ArchiveEntry::new("com.example.archive.1", "source-1", b"state".to_vec()))?;
//!
//! let ixml = "<BWFXML><PROJECT>Demo</PROJECT></BWFXML>";
//! let updated = encode_chunk(&archives, Some(ixml))?;
//! assert!(updated.starts_with("<BWFXML><PROJECT>Demo</PROJECT><ARA>"));
//! assert_eq!(decode_chunk(&updated)?, archives);
//! # Ok::<(), arachunk::decode::error::Error>(())
//! ```
//!
//! The codec does no I/O. See [`container`] to plug it into a file format.

#![warn(clippy::unwrap_used, missing_docs)]
#![deny(rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

#[doc(inline)]
pub use self::archive::{ArchiveEntry, PlugInDescriptor};
#[doc(inline)]
pub use self::dictionary::ArchiveDictionary;
#[doc(inline)]
pub use self::version::VersionToken;

pub mod archive;
pub mod base64;
pub mod container;
pub mod decode;
pub mod dictionary;
pub mod encode;
pub mod format;
pub mod version;
pub mod xml;
