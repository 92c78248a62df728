//! Diagnostic logging, to the terminal or to a JSON file.

use std::{
	env::var,
	fs::{metadata, File},
	io::{Error, Result},
	path::{Path, PathBuf},
	sync::Mutex,
};

use chrono::{DateTime, Utc};
use tracing::info;
use tracing_subscriber::fmt::format::FmtSpan;

use crate::args::Args;

/// Set up logging from $RUST_LOG, if it's set.
pub fn from_env() -> Result<bool> {
	if var("RUST_LOG").is_err() {
		return Ok(false);
	}

	tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.try_init()
		.map_err(Error::other)?;
	Ok(true)
}

/// Set up logging from '-v' and '--log-file'.
pub fn from_args(args: &Args) -> Result<()> {
	let verbosity = args.verbosity();
	let Some(directives) = filter(verbosity) else {
		return Ok(());
	};

	let log_file = args
		.log_file
		.as_deref()
		.map(|path| File::create(log_file_path(path, Utc::now())))
		.transpose()?;

	let mut builder = tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(directives);
	if verbosity > 2 {
		builder = builder.with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);
	}

	let init = match log_file {
		Some(writer) => builder.json().with_writer(Mutex::new(writer)).try_init(),
		None if verbosity > 3 => builder.pretty().try_init(),
		None => builder.try_init(),
	};
	match init {
		Ok(_) => info!(verbosity, "logging initialised"),
		Err(e) => eprintln!("Failed to initialise logging, continuing with none\n{e}"),
	}

	Ok(())
}

/// Filter directives for a verbosity level, or `None` to leave logging off.
///
/// Up to debug, only the tool and the codec log; at trace, everything does.
fn filter(verbosity: u8) -> Option<&'static str> {
	Some(match verbosity {
		0 => return None,
		1 => "arachunk=warn",
		2 => "arachunk=info",
		3 => "arachunk=debug",
		_ => "trace",
	})
}

/// Where to write logs: the given file, or a timestamped file in the given directory.
fn log_file_path(path: &Path, now: DateTime<Utc>) -> PathBuf {
	if metadata(path).map_or(false, |info| info.is_dir()) {
		path.join(format!("arachunk.{}.log", now.format("%Y-%m-%dT%H-%M-%SZ")))
	} else {
		path.to_owned()
	}
}

#[cfg(test)]
mod tests {
	use chrono::TimeZone;

	use super::*;

	#[test]
	fn filters_by_verbosity() {
		assert_eq!(filter(0), None);
		assert_eq!(filter(1), Some("arachunk=warn"));
		assert_eq!(filter(3), Some("arachunk=debug"));
		assert_eq!(filter(9), Some("trace"));
	}

	#[test]
	fn log_file_in_directory_is_timestamped() {
		let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
		let dir = std::env::temp_dir();
		assert_eq!(
			log_file_path(&dir, now),
			dir.join("arachunk.2024-01-02T03-04-05Z.log")
		);
	}

	#[test]
	fn log_file_path_is_kept() {
		let now = Utc::now();
		let file = std::env::temp_dir().join("does-not-exist").join("out.log");
		assert_eq!(log_file_path(&file, now), file);
	}
}
