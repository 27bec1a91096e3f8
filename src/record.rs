use crate::duration::{Duration, DurationParseError};
use crate::weekday::{Weekday, WeekdayParseError};

/// The meaningful part of a single row in the time log.
///
/// A row looks like `anything, weekday, ..., duration`.
/// Only the second field and the last field are interpreted, everything else is ignored.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct LogRecord {
	pub weekday: Weekday,
	pub duration: Duration,
}

impl LogRecord {
	pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self, RecordError> {
		if fields.len() < 2 {
			return Err(RecordError::ShortRow { fields: fields.len() });
		}

		let weekday = fields[1].as_ref().parse()?;
		let duration = fields[fields.len() - 1].as_ref().parse()?;

		Ok(Self { weekday, duration })
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RecordError {
	ShortRow { fields: usize },
	UnknownWeekday(WeekdayParseError),
	MalformedDuration(DurationParseError),
}

impl From<WeekdayParseError> for RecordError {
	fn from(other: WeekdayParseError) -> Self {
		Self::UnknownWeekday(other)
	}
}

impl From<DurationParseError> for RecordError {
	fn from(other: DurationParseError) -> Self {
		Self::MalformedDuration(other)
	}
}

impl std::error::Error for RecordError {}

impl std::fmt::Display for RecordError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::ShortRow { fields } => write!(f, "invalid syntax: expected at least 2 fields (\"..., weekday, ..., duration\"), got {}", fields),
			Self::UnknownWeekday(e) => write!(f, "{}", e),
			Self::MalformedDuration(e) => write!(f, "{}", e),
		}
	}
}

#[cfg(test)]
#[test]
fn test_from_fields() {
	use assert2::{assert, let_assert};

	let record = LogRecord::from_fields(&["2024-03-04", "Mon", "writing", "1:30:00"]);
	assert!(record == Ok(LogRecord { weekday: Weekday::Mon, duration: Duration::from_hms(1, 30, 0) }));

	let record = LogRecord::from_fields(&["x", "Fri", "0:00:42"]);
	assert!(record == Ok(LogRecord { weekday: Weekday::Fri, duration: Duration::from_seconds(42) }));

	// The fields in between are ignored, however many there are.
	let record = LogRecord::from_fields(&["", "Wed", "a", "b", "c", "d", "2:00:00"]);
	assert!(record == Ok(LogRecord { weekday: Weekday::Wed, duration: Duration::from_hms(2, 0, 0) }));

	let empty: [&str; 0] = [];
	assert!(LogRecord::from_fields(&empty) == Err(RecordError::ShortRow { fields: 0 }));
	assert!(LogRecord::from_fields(&["1:00:00"]) == Err(RecordError::ShortRow { fields: 1 }));

	let_assert!(Err(RecordError::UnknownWeekday(e)) = LogRecord::from_fields(&["x", "Sat", "1:00:00"]));
	assert!(e.data() == "Sat");

	let_assert!(Err(RecordError::MalformedDuration(e)) = LogRecord::from_fields(&["x", "Tue", "1:00"]));
	assert!(e.data() == "1:00");

	// With only two fields the weekday is also the duration.
	let_assert!(Err(RecordError::MalformedDuration(_)) = LogRecord::from_fields(&["x", "Thu"]));
}

#[cfg(test)]
#[test]
fn test_from_owned_fields() {
	use assert2::assert;

	let fields = vec![String::from("x"), String::from("Thu"), String::from("0:45:00")];
	assert!(LogRecord::from_fields(&fields) == Ok(LogRecord { weekday: Weekday::Thu, duration: Duration::from_hms(0, 45, 0) }));
}
