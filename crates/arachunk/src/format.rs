//! Reserved names of the ARA audio file chunk format.
//!
//! ARA embeds audio source archives into iXML, under a vendor-specific `<ARA>` element that holds
//! a dictionary of archives keyed by their `<documentArchiveID>`:
//!
//! ```xml
//! <ARA>
//!     <audioSources>
//!         <audioSource>
//!             <documentArchiveID>com.celemony.ara.audiosourcedescription.13</documentArchiveID>
//!             <openAutomatically>false</openAutomatically>
//!             <suggestedPlugIn>
//!                 <plugInName>Melodyne</plugInName>
//!                 <lowestSupportedVersion>5.0.0</lowestSupportedVersion>
//!                 <manufacturerName>Celemony</manufacturerName>
//!                 <informationURL>https://www.celemony.com</informationURL>
//!             </suggestedPlugIn>
//!             <persistentID>59D4874F-FA5A-4FE8-BAC6-0E8BC5F6184A</persistentID>
//!             <archiveData>TW9pbiBEdQ==</archiveData>
//!         </audioSource>
//!     </audioSources>
//! </ARA>
//! ```
//!
//! None of these names are configurable.

/// Element that contains the vendor-specific iXML sub-tree for ARA.
pub const ARA_VENDOR_KEYWORD: &str = "ARA";

/// Element that contains the dictionary of audio source archives inside the ARA sub-tree.
pub const AUDIO_SOURCES: &str = "audioSources";

/// Element for each entry inside the dictionary of audio source archives.
pub const AUDIO_SOURCE: &str = "audioSource";

/// Unique dictionary key of an audio source archive, identifying the opaque archive content.
pub const DOCUMENT_ARCHIVE_ID: &str = "documentArchiveID";

/// Whether the host should load the archive immediately, or only on user request.
pub const OPEN_AUTOMATICALLY: &str = "openAutomatically";

/// User-readable information about the plug-in that created the archive.
pub const SUGGESTED_PLUG_IN: &str = "suggestedPlugIn";

/// Persistent ID assigned to the audio source when the archive was created.
pub const PERSISTENT_ID: &str = "persistentID";

/// The binary archive, in Base64.
pub const ARCHIVE_DATA: &str = "archiveData";

/// Plug-in name, inside [`SUGGESTED_PLUG_IN`].
pub const PLUG_IN_NAME: &str = "plugInName";

/// Minimum plug-in version compatible with the archive, inside [`SUGGESTED_PLUG_IN`].
pub const LOWEST_SUPPORTED_VERSION: &str = "lowestSupportedVersion";

/// Plug-in manufacturer, inside [`SUGGESTED_PLUG_IN`].
pub const MANUFACTURER_NAME: &str = "manufacturerName";

/// Plug-in information URL, inside [`SUGGESTED_PLUG_IN`].
pub const INFORMATION_URL: &str = "informationURL";

/// Literal for a true [`OPEN_AUTOMATICALLY`].
pub const TRUE_LITERAL: &str = "true";

/// Literal for a false [`OPEN_AUTOMATICALLY`].
pub const FALSE_LITERAL: &str = "false";
