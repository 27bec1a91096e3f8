use std::path::{Path, PathBuf};

use crate::duration::Duration;
use crate::record::{LogRecord, RecordError};
use crate::weekday::Weekday;

/// Logged time per weekday.
///
/// Every weekday always has a bucket, starting at zero.
/// Buckets only ever grow.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct WeekdayTotals {
	buckets: [Duration; 5],
}

impl WeekdayTotals {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add logged time to the bucket of a weekday.
	///
	/// Fails without changing anything if the grand total would no longer fit.
	pub fn add(&mut self, weekday: Weekday, duration: Duration) -> Result<(), TotalOverflow> {
		// Every bucket is bounded by the grand total, so checking the total covers both.
		if self.total().checked_add(duration).is_none() {
			return Err(TotalOverflow { weekday, duration });
		}
		self.buckets[weekday.index()] += duration;
		Ok(())
	}

	pub fn add_record(&mut self, record: LogRecord) -> Result<(), TotalOverflow> {
		self.add(record.weekday, record.duration)
	}

	/// Get the time logged for a weekday.
	pub fn get(&self, weekday: Weekday) -> Duration {
		self.buckets[weekday.index()]
	}

	/// Iterate over all weekdays and their totals, from Monday to Friday.
	pub fn iter(&self) -> impl Iterator<Item = (Weekday, Duration)> + '_ {
		Weekday::ALL.into_iter().map(move |day| (day, self.get(day)))
	}

	/// The grand total of all weekdays.
	///
	/// This never overflows: [`WeekdayTotals::add`] refuses time that would make it overflow.
	pub fn total(&self) -> Duration {
		self.buckets.iter().sum()
	}

	/// Aggregate a comma separated time log.
	///
	/// The log has no header and rows may have any number of fields.
	/// Quoted fields may span multiple lines.
	/// The first bad row aborts the whole pass, including empty lines.
	pub fn from_reader(reader: impl std::io::BufRead) -> Result<Self, ReadLogError> {
		let mut totals = Self::new();
		let mut row = Vec::new();
		let mut row_start = 0;

		for (i, line) in reader.split(b'\n').enumerate() {
			let line = line.map_err(ReadLogError::Io)?;
			if row.is_empty() {
				row_start = i as u64 + 1;
			} else {
				row.push(b'\n');
			}
			row.extend_from_slice(&line);

			if !inside_quotes(&row) {
				totals.read_row(row_start, &row)?;
				row.clear();
			}
		}

		// An unterminated quote runs until the end of the log.
		if !row.is_empty() {
			totals.read_row(row_start, &row)?;
		}

		Ok(totals)
	}

	/// Open a time log file and aggregate it.
	pub fn read_file(path: impl AsRef<Path>) -> Result<Self, ReadLogError> {
		let path = path.as_ref();
		let file = std::fs::File::open(path)
			.map_err(|e| ReadLogError::MissingFile(path.into(), e))?;
		Self::from_reader(std::io::BufReader::new(file))
	}

	fn read_row(&mut self, line: u64, row: &[u8]) -> Result<(), ReadLogError> {
		let mut reader = csv::ReaderBuilder::new()
			.has_headers(false)
			.flexible(true)
			.from_reader(row);

		// An empty line has no record at all.
		let mut raw = csv::StringRecord::new();
		if !reader.read_record(&mut raw)? {
			raw.clear();
		}
		log::trace!("line {}: {:?}", line, raw);

		let fields: Vec<&str> = raw.iter().collect();
		let record = LogRecord::from_fields(&fields)
			.map_err(|error| ReadLogError::Record { line, error })?;
		log::debug!("line {}: {} {}", line, record.weekday, record.duration);

		self.add_record(record)
			.map_err(|error| ReadLogError::Overflow { line, error })
	}
}

/// Check if a (partial) row ends inside a quoted field.
///
/// A quote only opens a field at the start of the field, like a CSV reader does.
fn inside_quotes(row: &[u8]) -> bool {
	let mut quoted = false;
	let mut can_open = true;
	for &c in row {
		if quoted {
			if c == b'"' {
				quoted = false;
				// A doubled quote is an escaped quote.
				can_open = true;
			}
		} else if c == b'"' && can_open {
			quoted = true;
		} else {
			can_open = c == b',';
		}
	}
	quoted
}

/// Adding time would overflow the grand total.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TotalOverflow {
	pub weekday: Weekday,
	pub duration: Duration,
}

impl std::error::Error for TotalOverflow {}

impl std::fmt::Display for TotalOverflow {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "total logged time overflows when adding {} to {}", self.duration, self.weekday)
	}
}

#[derive(Debug)]
pub enum ReadLogError {
	MissingFile(PathBuf, std::io::Error),
	Io(std::io::Error),
	Csv(csv::Error),
	Record { line: u64, error: RecordError },
	Overflow { line: u64, error: TotalOverflow },
}

impl From<csv::Error> for ReadLogError {
	fn from(other: csv::Error) -> Self {
		Self::Csv(other)
	}
}

impl std::error::Error for ReadLogError {}

impl std::fmt::Display for ReadLogError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::MissingFile(path, error) => write!(f, "failed to open {}: {}", path.display(), error),
			Self::Io(error) => write!(f, "failed to read time log: {}", error),
			Self::Csv(error) => write!(f, "failed to read time log: {}", error),
			Self::Record { line, error } => write!(f, "parse error on line {}: {}", line, error),
			Self::Overflow { line, error } => write!(f, "error on line {}: {}", line, error),
		}
	}
}

#[cfg(test)]
#[test]
fn test_empty_log() {
	use assert2::{assert, let_assert};

	let_assert!(Ok(totals) = WeekdayTotals::from_reader("".as_bytes()));
	assert!(totals == WeekdayTotals::new());
	for (_, duration) in totals.iter() {
		assert!(duration == Duration::ZERO);
	}
	assert!(totals.total() == Duration::ZERO);
}

#[cfg(test)]
#[test]
fn test_aggregate() {
	use assert2::{assert, let_assert};

	let log = "\
		2024-03-04,Mon,reading,1:00:00\n\
		2024-03-04,Mon,writing,0:30:00\n\
		2024-03-05,Tue,\"meeting, weekly\",2:15:30\n\
	";
	let_assert!(Ok(totals) = WeekdayTotals::from_reader(log.as_bytes()));
	assert!(totals.get(Weekday::Mon) == Duration::from_hms(1, 30, 0));
	assert!(totals.get(Weekday::Tue) == Duration::from_hms(2, 15, 30));
	assert!(totals.get(Weekday::Wed) == Duration::ZERO);
	assert!(totals.get(Weekday::Thu) == Duration::ZERO);
	assert!(totals.get(Weekday::Fri) == Duration::ZERO);
	assert!(totals.total() == Duration::from_hms(3, 45, 30));

	let days: Vec<Weekday> = totals.iter().map(|(day, _)| day).collect();
	assert!(days == Weekday::ALL);
}

#[cfg(test)]
#[test]
fn test_variable_row_length() {
	use assert2::{assert, let_assert};

	let log = "x,Wed,0:10:00\n,Wed,a,b,c,0:20:00\r\nx,Thu,,0:00:05";
	let_assert!(Ok(totals) = WeekdayTotals::from_reader(log.as_bytes()));
	assert!(totals.get(Weekday::Wed) == Duration::from_hms(0, 30, 0));
	assert!(totals.get(Weekday::Thu) == Duration::from_seconds(5));
}

#[cfg(test)]
#[test]
fn test_quoted_fields() {
	use assert2::{assert, let_assert};

	let log = "x,Mon,\"notes, part one\nand \"\"two\"\"\",1:00:00\nx,Tue,say \"hi,0:30:00\nx,Mon,0:15:00\n";
	let_assert!(Ok(totals) = WeekdayTotals::from_reader(log.as_bytes()));
	assert!(totals.get(Weekday::Mon) == Duration::from_hms(1, 15, 0));
	assert!(totals.get(Weekday::Tue) == Duration::from_hms(0, 30, 0));

	// The multi-line row counts as the line it starts on.
	let log = "x,Mon,\"a\nb\",1:00:00\nx,Sat,1:00:00\n";
	let_assert!(Err(ReadLogError::Record { line, .. }) = WeekdayTotals::from_reader(log.as_bytes()));
	assert!(line == 3);
}

#[cfg(test)]
#[test]
fn test_inside_quotes() {
	use assert2::assert;

	assert!(!inside_quotes(b""));
	assert!(!inside_quotes(b"x,Mon,1:00:00"));
	assert!(inside_quotes(b"x,\"Mon"));
	assert!(!inside_quotes(b"x,\"Mon\",1:00:00"));
	assert!(inside_quotes(b"x,\"a \"\"quoted\"\" word"));
	assert!(!inside_quotes(b"x,say \"hi,1:00:00"));
}

#[cfg(test)]
#[test]
fn test_additivity() {
	use assert2::assert;

	let d1 = Duration::from_hms(3, 59, 59);
	let d2 = Duration::from_hms(0, 0, 1);
	let mut totals = WeekdayTotals::new();
	assert!(totals.add(Weekday::Thu, d1) == Ok(()));
	assert!(totals.get(Weekday::Thu) == d1);
	assert!(totals.add(Weekday::Thu, d2) == Ok(()));
	assert!(totals.get(Weekday::Thu) == d1 + d2);
	assert!(totals.get(Weekday::Thu) == Duration::from_hms(4, 0, 0));
	assert!(totals.total() == Duration::from_hms(4, 0, 0));
}

#[cfg(test)]
#[test]
fn test_order_independent() {
	use assert2::assert;

	fn aggregate<'a>(records: impl Iterator<Item = &'a LogRecord>) -> WeekdayTotals {
		let mut totals = WeekdayTotals::new();
		for record in records {
			totals.add_record(*record).unwrap();
		}
		totals
	}

	let records = [
		LogRecord { weekday: Weekday::Fri, duration: Duration::from_hms(8, 0, 0) },
		LogRecord { weekday: Weekday::Mon, duration: Duration::from_hms(1, 2, 3) },
		LogRecord { weekday: Weekday::Fri, duration: Duration::from_seconds(59) },
		LogRecord { weekday: Weekday::Wed, duration: Duration::from_hms(0, 90, 0) },
	];

	let forward = aggregate(records.iter());
	let backward = aggregate(records.iter().rev());
	let rotated = aggregate(records.iter().cycle().skip(2).take(records.len()));

	assert!(forward == backward);
	assert!(forward == rotated);
	assert!(forward.total() == forward.iter().map(|(_, x)| x).sum::<Duration>());
	assert!(forward.total() == Duration::from_hms(10, 33, 2));
}

#[cfg(test)]
#[test]
fn test_overflow() {
	use assert2::{assert, let_assert};

	let log = "x,Mon,5000000000000000:00:00\nx,Mon,5000000000000000:00:00\n";
	let_assert!(Err(ReadLogError::Overflow { line, error }) = WeekdayTotals::from_reader(log.as_bytes()));
	assert!(line == 2);
	assert!(error.weekday == Weekday::Mon);

	// Overflowing the grand total is caught even when no single bucket overflows.
	let log = "x,Mon,4000000000000000:00:00\nx,Tue,4000000000000000:00:00\n";
	let_assert!(Err(ReadLogError::Overflow { line, error }) = WeekdayTotals::from_reader(log.as_bytes()));
	assert!(line == 2);
	assert!(error.weekday == Weekday::Tue);

	// A refused addition leaves the totals untouched.
	let big = Duration::from_hms(4_000_000_000_000_000, 0, 0);
	let mut totals = WeekdayTotals::new();
	assert!(totals.add(Weekday::Mon, big) == Ok(()));
	assert!(totals.add(Weekday::Tue, big) == Err(TotalOverflow { weekday: Weekday::Tue, duration: big }));
	assert!(totals.get(Weekday::Mon) == big);
	assert!(totals.get(Weekday::Tue) == Duration::ZERO);
	assert!(totals.total() == big);

	let max = Duration::from_seconds(u64::MAX);
	let mut totals = WeekdayTotals::new();
	assert!(totals.add(Weekday::Fri, max) == Ok(()));
	assert!(totals.total() == max);
	assert!(let Err(_) = totals.add(Weekday::Fri, Duration::from_seconds(1)));
}

#[cfg(test)]
#[test]
fn test_errors() {
	use assert2::{assert, let_assert};

	let log = "x,Mon,1:00:00\nx,Sat,1:00:00\nx,Tue,1:00:00\n";
	let_assert!(Err(ReadLogError::Record { line, error }) = WeekdayTotals::from_reader(log.as_bytes()));
	assert!(line == 2);
	assert!(let RecordError::UnknownWeekday(_) = error);

	let log = "x,Mon,1:00:00\nx,Mon,1:00\n";
	let_assert!(Err(ReadLogError::Record { line, error }) = WeekdayTotals::from_reader(log.as_bytes()));
	assert!(line == 2);
	assert!(let RecordError::MalformedDuration(_) = error);

	let log = "1:00:00\n";
	let_assert!(Err(ReadLogError::Record { line, error }) = WeekdayTotals::from_reader(log.as_bytes()));
	assert!(line == 1);
	assert!(error == RecordError::ShortRow { fields: 1 });

	// Empty lines are rows without fields.
	let log = "x,Mon,1:00:00\n\nx,Tue,1:00:00\n";
	let_assert!(Err(ReadLogError::Record { line, error }) = WeekdayTotals::from_reader(log.as_bytes()));
	assert!(line == 2);
	assert!(error == RecordError::ShortRow { fields: 0 });

	let log = "x,Mon,1:00:00\r\n\r\n";
	let_assert!(Err(ReadLogError::Record { line, error }) = WeekdayTotals::from_reader(log.as_bytes()));
	assert!(line == 2);
	assert!(error == RecordError::ShortRow { fields: 0 });

	let_assert!(Err(ReadLogError::Csv(_)) = WeekdayTotals::from_reader(&b"x,Mon,\xff1:00:00\n"[..]));
}

#[cfg(test)]
#[test]
fn test_missing_file() {
	use assert2::{assert, let_assert};

	let path = Path::new("/this/path/does/not/exist/log.csv");
	let_assert!(Err(ReadLogError::MissingFile(reported, _)) = WeekdayTotals::read_file(path));
	assert!(reported == path);
}
