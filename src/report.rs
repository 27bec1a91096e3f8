use crate::totals::WeekdayTotals;

const SEPARATOR: &str = "-----------------";

/// Human readable overview of logged time per weekday and the grand total.
#[derive(Copy, Clone, Debug)]
pub struct Report<'a> {
	totals: &'a WeekdayTotals,
}

impl<'a> Report<'a> {
	pub fn new(totals: &'a WeekdayTotals) -> Self {
		Self { totals }
	}
}

impl std::fmt::Display for Report<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		writeln!(f)?;
		for (day, duration) in self.totals.iter() {
			writeln!(f, "\t{}\t{}", day, duration)?;
		}
		writeln!(f, "\t{}", SEPARATOR)?;
		writeln!(f, "\tTot\t{}", self.totals.total())?;
		writeln!(f, "\t{}", SEPARATOR)?;
		writeln!(f)
	}
}

#[cfg(test)]
#[test]
fn test_empty_report() {
	use assert2::assert;

	let totals = WeekdayTotals::new();
	assert!(Report::new(&totals).to_string() == "\n\
		\tMon\t00:00:00\n\
		\tTue\t00:00:00\n\
		\tWed\t00:00:00\n\
		\tThu\t00:00:00\n\
		\tFri\t00:00:00\n\
		\t-----------------\n\
		\tTot\t00:00:00\n\
		\t-----------------\n\
		\n"
	);
}

#[cfg(test)]
#[test]
fn test_report() {
	use assert2::{assert, let_assert};

	let log = "a,Mon,x,1:00:00\nb,Mon,y,0:30:00\nc,Tue,z,2:15:30\n";
	let_assert!(Ok(totals) = WeekdayTotals::from_reader(log.as_bytes()));
	assert!(Report::new(&totals).to_string() == "\n\
		\tMon\t01:30:00\n\
		\tTue\t02:15:30\n\
		\tWed\t00:00:00\n\
		\tThu\t00:00:00\n\
		\tFri\t00:00:00\n\
		\t-----------------\n\
		\tTot\t03:45:30\n\
		\t-----------------\n\
		\n"
	);
}

#[cfg(test)]
#[test]
fn test_long_week() {
	use assert2::assert;
	use crate::{Duration, Weekday};

	let mut totals = WeekdayTotals::new();
	for day in Weekday::ALL {
		totals.add(day, Duration::from_hms(20, 0, 0)).unwrap();
	}
	totals.add(Weekday::Wed, Duration::from_hms(0, 90, 30)).unwrap();

	let report = Report::new(&totals).to_string();
	assert!(report.contains("\tWed\t21:30:30\n"));
	assert!(report.contains("\tTot\t101:30:30\n"));
}
