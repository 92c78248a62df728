use std::path::PathBuf;

use arachunk::container::{read_archives, TextFile};
use clap::{Parser, ValueHint};
use regex::Regex;
use tracing::info;

#[derive(Debug, Clone, Parser)]
pub struct ListArgs {
	/// Input iXML file.
	#[arg(
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub input: PathBuf,

	/// Show details of each archive.
	#[arg(long, short)]
	pub long: bool,

	/// Filter archives by document archive ID (with a regex).
	///
	/// Can be given multiple times, and archives will be matched if they match any of the regexes.
	#[arg(long, value_name = "REGEX")]
	pub filter: Vec<Regex>,
}

pub(crate) fn list(args: ListArgs) -> miette::Result<()> {
	info!(path=?args.input, "read archives");
	let archives = read_archives(&TextFile::new(&args.input))?;

	info!(count = archives.len(), "list archives");
	for entry in &archives {
		if !args.filter.is_empty()
			&& !args
				.filter
				.iter()
				.any(|filter| filter.is_match(&entry.archive_id))
		{
			continue;
		}

		println!("{}", entry.archive_id);
		if !args.long {
			continue;
		}

		println!("  persistent id: {}", entry.persistent_id);
		println!("  open automatically: {}", entry.open_automatically);
		println!("  archive size: {} bytes", entry.payload.len());
		if let Some(plug_in) = &entry.suggested_plug_in {
			println!(
				"  suggested plug-in: {} by {}",
				plug_in.name, plug_in.manufacturer
			);
			if let Some(version) = &plug_in.lowest_supported_version {
				println!("    lowest supported version: {version}");
			}
			if let Some(url) = &plug_in.information_url {
				println!("    information: {url}");
			}
		}
	}

	Ok(())
}
