use std::io::Write;
use std::path::Path;

use weektally::{Report, WeekdayTotals};

/// The time log to read, relative to the working directory.
const LOG_FILE: &str = "log.csv";

/// Print the time logged per weekday in log.csv.
#[derive(clap::Parser)]
#[clap(version)]
struct Options {
	/// Print more log messages, can be given multiple times.
	#[clap(long, short)]
	#[clap(action = clap::ArgAction::Count)]
	verbose: u8,
}

fn main() {
	if let Err(()) = do_main(clap::Parser::parse()) {
		std::process::exit(1);
	}
}

fn init_logging(verbosity: u8) {
	let level = match verbosity {
		0 => log::LevelFilter::Info,
		1 => log::LevelFilter::Debug,
		_ => log::LevelFilter::Trace,
	};

	env_logger::Builder::from_default_env()
		.filter_module(module_path!(), level)
		.filter_module("weektally", level)
		.init();
}

fn do_main(options: Options) -> Result<(), ()> {
	init_logging(options.verbose);
	write_report(Path::new(LOG_FILE), &mut std::io::stdout().lock())
}

/// Aggregate a time log and write the report.
///
/// Nothing is written unless the whole log was read successfully.
fn write_report(path: &Path, output: &mut impl Write) -> Result<(), ()> {
	let totals = WeekdayTotals::read_file(path)
		.map_err(|e| log::error!("{}", e))?;
	log::debug!("read {}, total time {}", path.display(), totals.total());

	write!(output, "{}", Report::new(&totals))
		.map_err(|e| log::error!("failed to write report: {}", e))
}

#[cfg(test)]
fn write_temp_log(name: &str, data: &str) -> std::path::PathBuf {
	let path = std::env::temp_dir().join(format!("tally-{}-{}.csv", std::process::id(), name));
	std::fs::write(&path, data).unwrap();
	path
}

#[cfg(test)]
#[test]
fn test_write_report() {
	use assert2::{assert, let_assert};

	let path = write_temp_log("ok", "a,Mon,x,1:00:00\nb,Mon,y,0:30:00\nc,Tue,z,2:15:30\n");
	let mut output = Vec::new();
	let result = write_report(&path, &mut output);
	std::fs::remove_file(&path).unwrap();

	assert!(result == Ok(()));
	let_assert!(Ok(output) = String::from_utf8(output));
	assert!(output.starts_with("\n\tMon\t01:30:00\n\tTue\t02:15:30\n"));
	assert!(output.ends_with("\tTot\t03:45:30\n\t-----------------\n\n"));
}

#[cfg(test)]
#[test]
fn test_no_report_on_error() {
	use assert2::assert;

	let path = write_temp_log("sat", "a,Mon,x,1:00:00\nb,Sat,y,0:30:00\n");
	let mut output = Vec::new();
	let result = write_report(&path, &mut output);
	std::fs::remove_file(&path).unwrap();

	assert!(result == Err(()));
	assert!(output.is_empty());

	let mut output = Vec::new();
	assert!(write_report(Path::new("/this/path/does/not/exist/log.csv"), &mut output) == Err(()));
	assert!(output.is_empty());
}
