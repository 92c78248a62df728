use std::{fs, io::Write, path::PathBuf};

use arachunk::container::{read_archives, TextFile};
use clap::{Parser, ValueHint};
use miette::{miette, IntoDiagnostic};
use tracing::info;

#[derive(Debug, Clone, Parser)]
pub struct ExtractArgs {
	/// Input iXML file.
	#[arg(
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub input: PathBuf,

	/// Document archive ID of the archive to extract.
	#[arg(long, value_name = "ID")]
	pub id: String,

	/// Output file.
	///
	/// If not given, the payload is written to stdout.
	#[arg(long,
		value_hint = ValueHint::FilePath,
		value_name = "PATH",
	)]
	pub output: Option<PathBuf>,
}

pub(crate) fn extract(args: ExtractArgs) -> miette::Result<()> {
	info!(path=?args.input, "read archives");
	let archives = read_archives(&TextFile::new(&args.input))?;

	let entry = archives
		.get(&args.id)
		.ok_or_else(|| miette!("no archive with id {:?} in {}", args.id, args.input.display()))?;

	info!(size = entry.payload.len(), output = ?args.output, "write payload");
	if let Some(output) = &args.output {
		fs::write(output, &entry.payload).into_diagnostic()?;
	} else {
		let mut stdout = std::io::stdout().lock();
		stdout.write_all(&entry.payload).into_diagnostic()?;
		stdout.flush().into_diagnostic()?;
	}

	Ok(())
}
