use std::path::PathBuf;

use arachunk::{
	container::{read_archives, MetadataContainer, TextFile},
	decode::decode_chunk,
	xml::Indent,
	ArchiveDictionary,
};
use clap::{Parser, ValueHint};
use miette::IntoDiagnostic;
use tracing::{debug, info};

#[derive(Debug, Clone, Parser)]
pub struct MergeArgs {
	/// iXML file to merge into.
	///
	/// Its other metadata is kept in the output; it's created if it doesn't exist.
	#[arg(
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub input: PathBuf,

	/// iXML files to take archives from, in order.
	#[arg(
		required = true,
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub others: Vec<PathBuf>,

	/// Output file.
	///
	/// If not given, INPUT is modified in place.
	#[arg(long,
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub output: Option<PathBuf>,

	/// Indentation of the rewritten ARA element: 'none', 'tabs', or a number of spaces.
	#[arg(long, value_name = "INDENT", default_value = "none", value_parser = crate::args::indent)]
	pub indent: Indent,
}

pub(crate) fn merge(args: MergeArgs) -> miette::Result<()> {
	info!(path=?args.input, "read archives");
	let existing = TextFile::new(&args.input)
		.metadata_text()
		.into_diagnostic()?;
	let mut archives = match &existing {
		Some(text) => decode_chunk(text)?,
		None => ArchiveDictionary::new(),
	};

	for other in &args.others {
		info!(path=?other, "merge archives");
		let more = read_archives(&TextFile::new(other))?;
		debug!(count = more.len(), "read archives to merge");
		archives = archives.merge(more)?;
	}

	// the input's other metadata is carried over to the output
	let text = crate::args::encoder(args.indent).encode(&archives, existing.as_deref())?;

	let output = args.output.as_ref().unwrap_or(&args.input);
	info!(count = archives.len(), path = ?output, "write archives");
	TextFile::new(output)
		.set_metadata_text(text)
		.into_diagnostic()?;
	Ok(())
}
