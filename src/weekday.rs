/// A working day of the week.
///
/// Only Monday through Friday can be logged.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Weekday {
	Mon,
	Tue,
	Wed,
	Thu,
	Fri,
}

impl Weekday {
	/// All weekdays, in report order.
	pub const ALL: [Weekday; 5] = [Self::Mon, Self::Tue, Self::Wed, Self::Thu, Self::Fri];

	/// The three letter label used in the log and the report.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Mon => "Mon",
			Self::Tue => "Tue",
			Self::Wed => "Wed",
			Self::Thu => "Thu",
			Self::Fri => "Fri",
		}
	}

	/// The zero based position of the day in the week.
	pub(crate) fn index(self) -> usize {
		self as usize
	}
}

impl std::str::FromStr for Weekday {
	type Err = WeekdayParseError;

	fn from_str(data: &str) -> Result<Self, Self::Err> {
		Self::ALL.into_iter()
			.find(|day| day.as_str() == data)
			.ok_or_else(|| WeekdayParseError::new(data))
	}
}

impl std::fmt::Display for Weekday {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		f.pad(self.as_str())
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WeekdayParseError {
	data: String,
}

impl WeekdayParseError {
	fn new(data: impl Into<String>) -> Self {
		Self { data: data.into() }
	}

	/// The label that is not a known weekday.
	pub fn data(&self) -> &str {
		&self.data
	}
}

impl std::error::Error for WeekdayParseError {}

impl std::fmt::Display for WeekdayParseError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "unknown weekday: expected one of Mon, Tue, Wed, Thu or Fri, got {:?}", self.data)
	}
}

#[cfg(test)]
#[test]
fn test_parse_weekday() {
	use assert2::assert;

	for day in Weekday::ALL {
		assert!(day.as_str().parse::<Weekday>() == Ok(day));
		assert!(day.to_string() == day.as_str());
	}

	assert!(let Err(_) = "".parse::<Weekday>());
	assert!(let Err(_) = "Sat".parse::<Weekday>());
	assert!(let Err(_) = "Sun".parse::<Weekday>());
	assert!(let Err(_) = "mon".parse::<Weekday>());
	assert!(let Err(_) = "Monday".parse::<Weekday>());
	assert!(let Err(_) = " Mon".parse::<Weekday>());
}

#[cfg(test)]
#[test]
fn test_order() {
	use assert2::assert;

	for (i, day) in Weekday::ALL.iter().enumerate() {
		assert!(day.index() == i);
	}
	assert!(Weekday::Mon < Weekday::Fri);
}
