/// A span of logged time with a resolution of one second.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Duration {
	seconds: u64,
}

impl Duration {
	pub const ZERO: Self = Self::from_seconds(0);

	pub const fn from_seconds(seconds: u64) -> Self {
		Self { seconds }
	}

	pub const fn from_hms(hours: u64, minutes: u64, seconds: u64) -> Self {
		Self::from_seconds(hours * 3600 + minutes * 60 + seconds)
	}

	pub fn total_seconds(self) -> u64 {
		self.seconds
	}

	pub fn hours(self) -> u64 {
		self.seconds / 3600
	}

	pub fn minutes(self) -> u64 {
		self.seconds % 3600 / 60
	}

	pub fn seconds(self) -> u64 {
		self.seconds % 60
	}

	/// Add two durations, returning `None` if the result does not fit.
	pub fn checked_add(self, other: Duration) -> Option<Self> {
		self.seconds.checked_add(other.seconds).map(Self::from_seconds)
	}
}

impl std::str::FromStr for Duration {
	type Err = DurationParseError;

	/// Parse a duration in the form `H:M:S`.
	///
	/// Minutes and seconds are not range checked, so `1:90:00` is accepted as two and a half hours.
	fn from_str(data: &str) -> Result<Self, Self::Err> {
		let mut fields = data.split(':');
		let hours = parse_component(fields.next(), data)?;
		let minutes = parse_component(fields.next(), data)?;
		let seconds = parse_component(fields.next(), data)?;

		// Make sure no garbage remains.
		if fields.next().is_some() {
			return Err(DurationParseError::new(data));
		}

		hours.checked_mul(3600)
			.and_then(|total| total.checked_add(minutes.checked_mul(60)?))
			.and_then(|total| total.checked_add(seconds))
			.map(Self::from_seconds)
			.ok_or_else(|| DurationParseError::new(data))
	}
}

fn parse_component(field: Option<&str>, data: &str) -> Result<u64, DurationParseError> {
	field
		.ok_or_else(|| DurationParseError::new(data))?
		.trim()
		.parse()
		.map_err(|_| DurationParseError::new(data))
}

impl std::fmt::Display for Duration {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{:02}:{:02}:{:02}", self.hours(), self.minutes(), self.seconds())
	}
}

/// Panics on overflow, use [`Duration::checked_add`] for untrusted input.
impl std::ops::Add<Duration> for Duration {
	type Output = Self;
	fn add(self, other: Duration) -> Self::Output {
		self.checked_add(other).expect("overflow when adding durations")
	}
}

impl std::ops::Add<&'_ Duration> for &'_ Duration {
	type Output = Duration;
	fn add(self, other: &Duration) -> Self::Output {
		*self + *other
	}
}

impl std::ops::AddAssign for Duration {
	fn add_assign(&mut self, other: Duration) {
		*self = *self + other;
	}
}

impl std::ops::AddAssign<&'_ Duration> for Duration {
	fn add_assign(&mut self, other: &Duration) {
		*self += *other;
	}
}

impl std::iter::Sum for Duration {
	fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.fold(Self::ZERO, |total, x| total + x)
	}
}

impl<'a> std::iter::Sum<&'a Duration> for Duration {
	fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
		iter.copied().sum()
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DurationParseError {
	data: String,
}

impl DurationParseError {
	fn new(data: impl Into<String>) -> Self {
		Self { data: data.into() }
	}

	/// The text that failed to parse.
	pub fn data(&self) -> &str {
		&self.data
	}
}

impl std::error::Error for DurationParseError {}

impl std::fmt::Display for DurationParseError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "invalid duration syntax: expected something like 1:30:00, got {:?}", self.data)
	}
}

#[cfg(test)]
#[test]
fn test_parse_duration() {
	use assert2::assert;

	assert!(let Err(_) = "".parse::<Duration>());
	assert!(let Err(_) = "10".parse::<Duration>());
	assert!(let Err(_) = "1:30".parse::<Duration>());
	assert!(let Err(_) = "1:30:00:00".parse::<Duration>());
	assert!(let Err(_) = "1:3O:00".parse::<Duration>());
	assert!(let Err(_) = "-1:30:00".parse::<Duration>());
	assert!(let Err(_) = "1::00".parse::<Duration>());
	assert!(let Err(_) = "99999999999999999999:00:00".parse::<Duration>());
	assert!("0:00:00".parse::<Duration>() == Ok(Duration::ZERO));
	assert!("1:30:00".parse::<Duration>() == Ok(Duration::from_hms(1, 30, 0)));
	assert!("01:02:03".parse::<Duration>() == Ok(Duration::from_seconds(3723)));
	assert!(" 2: 15 :30 ".parse::<Duration>() == Ok(Duration::from_hms(2, 15, 30)));
	assert!("1:90:00".parse::<Duration>() == Ok(Duration::from_hms(2, 30, 0)));
	assert!("0:0:125".parse::<Duration>() == Ok(Duration::from_hms(0, 2, 5)));
}

#[cfg(test)]
#[test]
fn test_parse_error_message() {
	use assert2::{assert, let_assert};

	let_assert!(Err(e) = "1:30".parse::<Duration>());
	assert!(e.data() == "1:30");
	assert!(e.to_string() == "invalid duration syntax: expected something like 1:30:00, got \"1:30\"");
}

#[cfg(test)]
#[test]
fn test_display() {
	use assert2::assert;

	assert!(Duration::ZERO.to_string() == "00:00:00");
	assert!(Duration::from_hms(1, 30, 0).to_string() == "01:30:00");
	assert!(Duration::from_hms(23, 59, 59).to_string() == "23:59:59");
	assert!(Duration::from_hms(25, 0, 0).to_string() == "25:00:00");
	assert!(Duration::from_hms(99, 59, 59).to_string() == "99:59:59");
	assert!(Duration::from_hms(100, 0, 1).to_string() == "100:00:01");

	// Over-range input is normalized on output.
	let a: Duration = "1:90:00".parse().unwrap();
	let b: Duration = "2:30:00".parse().unwrap();
	assert!(a.to_string() == "02:30:00");
	assert!(a.to_string() == b.to_string());
}

#[cfg(test)]
#[test]
fn test_display_shape() {
	use assert2::assert;

	for seconds in (0..360_000).step_by(997) {
		let text = Duration::from_seconds(seconds).to_string();
		let bytes = text.as_bytes();
		assert!(bytes.len() == 8);
		assert!(bytes[2] == b':');
		assert!(bytes[5] == b':');
		assert!(bytes.iter().enumerate().all(|(i, c)| i == 2 || i == 5 || c.is_ascii_digit()));
	}
}

#[cfg(test)]
#[test]
fn test_add() {
	use assert2::assert;

	assert!(Duration::from_seconds(1) + Duration::from_seconds(1) == Duration::from_seconds(2));
	assert!(&Duration::from_seconds(1) + &Duration::from_seconds(1) == Duration::from_seconds(2));
	assert!(Duration::from_hms(1, 0, 0) + Duration::from_hms(0, 30, 0) == Duration::from_hms(1, 30, 0));

	let mut duration = Duration::from_seconds(1);
	duration += Duration::from_seconds(1);
	assert!(duration.total_seconds() == 2);
	duration += &Duration::from_seconds(1);
	assert!(duration.total_seconds() == 3);
	duration += Duration::from_seconds(3597);
	assert!(duration == Duration::from_hms(1, 0, 0));

	let parts = [Duration::from_hms(1, 0, 0), Duration::from_hms(0, 30, 0), Duration::from_hms(2, 15, 30)];
	assert!(parts.iter().sum::<Duration>() == Duration::from_hms(3, 45, 30));
	assert!(parts.into_iter().sum::<Duration>() == Duration::from_hms(3, 45, 30));
	assert!(std::iter::empty::<Duration>().sum::<Duration>() == Duration::ZERO);
}

#[cfg(test)]
#[test]
fn test_checked_add() {
	use assert2::assert;

	let max = Duration::from_seconds(u64::MAX);
	assert!(Duration::from_seconds(1).checked_add(Duration::from_seconds(2)) == Some(Duration::from_seconds(3)));
	assert!(max.checked_add(Duration::ZERO) == Some(max));
	assert!(max.checked_add(Duration::from_seconds(1)) == None);

	let big: Duration = "5000000000000000:00:00".parse().unwrap();
	assert!(big.checked_add(big) == None);
}

#[cfg(test)]
#[test]
#[should_panic(expected = "overflow when adding durations")]
fn test_add_overflow_panics() {
	let _ = Duration::from_seconds(u64::MAX) + Duration::from_seconds(1);
}
