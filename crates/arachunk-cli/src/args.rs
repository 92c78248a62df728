use std::path::PathBuf;

use arachunk::{encode::Encoder, xml::Indent};
use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::{
	embed::EmbedArgs, extract::ExtractArgs, list::ListArgs, merge::MergeArgs, remove::RemoveArgs,
};

/// Inspect and edit ARA audio source archives in iXML metadata.
///
/// Works on iXML text files, as extracted from WAV or AIFF files by your tool of choice.
#[derive(Debug, Clone, Parser)]
#[command(
	name = "arachunk",
	bin_name = "arachunk",
	author,
	version,
	after_help = "Want more detail? Try the long '--help' flag!",
	after_long_help = "Didn't expect this much output? Use the short '-h' flag to get short help."
)]
#[cfg_attr(debug_assertions, command(before_help = "⚠ DEBUG BUILD ⚠"))]
pub struct Args {
	/// Set diagnostic log level.
	///
	/// This enables diagnostic logging, which is useful for investigating bugs. Use multiple
	/// times to increase verbosity.
	///
	/// You may want to use with '--log-file' to avoid polluting your terminal.
	///
	/// Setting $RUST_LOG also works, and takes precedence, but is not recommended unless you know
	/// what you're doing.
	#[arg(long, short, action = ArgAction::Count, global = true)]
	pub verbose: u8,

	/// Write diagnostic logs to a file.
	///
	/// This writes diagnostic logs to a file, instead of the terminal, in JSON format. If a log
	/// level was not already specified, this will set it to '-vvv' (debug).
	///
	/// If a path is not provided, the default is the working directory.
	///
	/// If the path provided is a directory, a file will be created in that directory. The file
	/// name will be the current date and time, in the format 'arachunk.YYYY-MM-DDTHH-MM-SSZ.log'.
	#[arg(
		long,
		num_args = 0..=1,
		default_missing_value = ".",
		value_hint = ValueHint::AnyPath,
		value_name = "PATH",
		global = true,
	)]
	pub log_file: Option<PathBuf>,

	/// What to do.
	#[command(subcommand)]
	pub action: Action,
}

/// Verbosity implied by '--log-file' alone.
const LOG_FILE_VERBOSITY: u8 = 3;

impl Args {
	/// Effective verbosity, from '-v' flags or '--log-file'.
	pub fn verbosity(&self) -> u8 {
		match (self.verbose, &self.log_file) {
			(0, Some(_)) => LOG_FILE_VERBOSITY,
			(v, _) => v,
		}
	}
}

#[derive(Debug, Clone, Subcommand)]
pub enum Action {
	/// List the archives in an iXML file.
	List(ListArgs),

	/// Write the payload of one archive to a file.
	Extract(ExtractArgs),

	/// Add an archive to an iXML file.
	Embed(EmbedArgs),

	/// Remove an archive from an iXML file.
	Remove(RemoveArgs),

	/// Combine the archives of several iXML files.
	Merge(MergeArgs),
}

/// Parse an indentation setting: `none`, `tabs`, or a number of spaces.
pub fn indent(value: &str) -> Result<Indent, String> {
	match value {
		"none" | "0" => Ok(Indent::None),
		"tab" | "tabs" => Ok(Indent::Tabs),
		spaces => spaces
			.parse()
			.map(Indent::Spaces)
			.map_err(|err| format!("expected 'none', 'tabs', or a number of spaces: {err}")),
	}
}

/// Build an encoder from the indentation setting.
pub fn encoder(indent: Indent) -> Encoder {
	let mut encoder = Encoder::new();
	encoder.set_indent(indent);
	encoder
}
