use std::path::PathBuf;

use arachunk::{
	container::{read_archives, write_archives, TextFile},
	xml::Indent,
};
use clap::{Parser, ValueHint};
use miette::miette;
use tracing::info;

#[derive(Debug, Clone, Parser)]
pub struct RemoveArgs {
	/// iXML file to edit.
	#[arg(
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub input: PathBuf,

	/// Document archive ID of the archive to remove.
	#[arg(long, value_name = "ID")]
	pub id: String,

	/// Don't fail if there's no such archive.
	#[arg(long)]
	pub ignore_missing: bool,

	/// Indentation of the rewritten ARA element: 'none', 'tabs', or a number of spaces.
	#[arg(long, value_name = "INDENT", default_value = "none", value_parser = crate::args::indent)]
	pub indent: Indent,
}

pub(crate) fn remove(args: RemoveArgs) -> miette::Result<()> {
	let mut file = TextFile::new(&args.input);

	info!(path=?args.input, "read archives");
	let mut archives = read_archives(&file)?;

	if archives.remove(&args.id).is_none() {
		if args.ignore_missing {
			info!(id = %args.id, "no such archive, nothing to do");
			return Ok(());
		}

		return Err(miette!(
			"no archive with id {:?} in {}",
			args.id,
			args.input.display()
		));
	}

	info!(remaining = archives.len(), "write archives");
	write_archives(&mut file, &crate::args::encoder(args.indent), &archives)?;
	Ok(())
}
