//! Immutable date/time values on top of the platform calendar routines.
//!
//! An [`Instant`] is a count of seconds or milliseconds since the Unix epoch,
//! chosen once per type through its [`Scale`]. Calendar fields are always
//! derived on demand through the reentrant `localtime_r`/`gmtime_r`, and
//! constructed through `mktime`, which normalizes out-of-range fields instead
//! of rejecting them.
//!
//! ```
//! use dmdatetime::{Format, InstantS64};
//!
//! let christmas = InstantS64::from_components(2024, 12, 25, 15, 30, 45).unwrap();
//! assert_eq!(christmas.day_of_week(), 3);
//! assert_eq!(christmas.add_days(7).format(Format::ShortDate), "2025-01-01");
//! ```

pub use calendar::{days_in_month, is_leap_year, CalendarFields, InstantBuilder, MonthOverflow};
pub use duration::{Duration, DurationMs64, DurationS64};
pub use error::{Error, Result};
pub use format::Format;
pub use instant::{Instant, InstantMs64, InstantS64};
pub use scale::{Milliseconds, Scale, Seconds};
pub use unit::{EpochUnit, TimeUnit};

mod calendar;
mod duration;
mod error;
mod format;
mod instant;
mod scale;
mod sys;
mod unit;
