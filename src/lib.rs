//! Sum the time logged in a comma separated time log per weekday.
//!
//! Each row of the log names a weekday in its second field and a duration like `1:30:00` in its last field.
//! The durations are added up per weekday and the result can be rendered as a [`Report`].

mod duration;
mod record;
mod report;
mod totals;
mod weekday;

pub use duration::*;
pub use record::*;
pub use report::*;
pub use totals::*;
pub use weekday::*;
