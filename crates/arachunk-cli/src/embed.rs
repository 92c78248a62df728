use std::{fs, path::PathBuf};

use arachunk::{
	container::{read_archives, write_archives, TextFile},
	xml::Indent,
	ArchiveEntry, PlugInDescriptor, VersionToken,
};
use clap::{Parser, ValueHint};
use miette::IntoDiagnostic;
use tracing::{info, warn};

#[derive(Debug, Clone, Parser)]
pub struct EmbedArgs {
	/// iXML file to edit.
	///
	/// Created if it doesn't exist.
	#[arg(
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub input: PathBuf,

	/// Document archive ID of the new archive.
	#[arg(long, value_name = "ID")]
	pub id: String,

	/// File containing the archive itself.
	#[arg(long,
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub payload: PathBuf,

	/// Persistent ID of the audio source in the archive.
	#[arg(long, value_name = "ID")]
	pub persistent_id: String,

	/// Ask hosts to load the archive as soon as the audio file is imported.
	#[arg(long)]
	pub open_automatically: bool,

	/// Name of the plug-in that created the archive.
	///
	/// Requires '--manufacturer'.
	#[arg(long, value_name = "NAME", requires = "manufacturer")]
	pub plug_in_name: Option<String>,

	/// Manufacturer of the plug-in that created the archive.
	#[arg(long, value_name = "NAME", requires = "plug_in_name")]
	pub manufacturer: Option<String>,

	/// Lowest plug-in version that can read the archive.
	#[arg(long, value_name = "VERSION", requires = "plug_in_name")]
	pub lowest_version: Option<VersionToken>,

	/// Where to find more about the plug-in.
	#[arg(long, value_name = "URL", requires = "plug_in_name")]
	pub information_url: Option<String>,

	/// Overwrite an existing archive with the same ID.
	///
	/// Without this, an archive with the same ID is an error.
	#[arg(long)]
	pub replace: bool,

	/// Indentation of the rewritten ARA element: 'none', 'tabs', or a number of spaces.
	#[arg(long, value_name = "INDENT", default_value = "none", value_parser = crate::args::indent)]
	pub indent: Indent,
}

pub(crate) fn embed(args: EmbedArgs) -> miette::Result<()> {
	let mut file = TextFile::new(&args.input);

	info!(path=?args.input, "read archives");
	let mut archives = read_archives(&file)?;

	info!(path=?args.payload, "read payload");
	let payload = fs::read(&args.payload).into_diagnostic()?;

	let mut entry = ArchiveEntry::new(args.id, args.persistent_id, payload)
		.open_automatically(args.open_automatically);
	if let (Some(name), Some(manufacturer)) = (args.plug_in_name, args.manufacturer) {
		let mut plug_in = PlugInDescriptor::new(name, manufacturer);
		plug_in.lowest_supported_version = args.lowest_version;
		plug_in.information_url = args.information_url;
		entry = entry.with_suggested_plug_in(plug_in);
	}

	if args.replace {
		if archives.replace(entry)?.is_some() {
			warn!("replaced existing archive");
		}
	} else {
		archives.insert(entry)?;
	}

	info!(count = archives.len(), "write archives");
	write_archives(&mut file, &crate::args::encoder(args.indent), &archives)?;
	Ok(())
}
