pub use builder::InstantBuilder;
pub use fields::CalendarFields;
pub use gregorian::{days_in_month, is_leap_year};

mod builder;
mod fields;
pub(crate) mod gregorian;

use lazy_static::lazy_static;

use crate::sys;

/// What `add_months`/`add_years` do when the day of month does not exist in the
/// target month, e.g. January 31 plus one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MonthOverflow {
    /// Let the normalizer carry the surplus days into the following month, so
    /// 2024-01-31 + 1 month is 2024-03-02.
    #[default]
    Roll,
    /// Pin the day to the last day of the target month, so 2024-01-31 + 1 month
    /// is 2024-02-29.
    Clamp,
}

// Oldest and newest local readings an instant may be built from.
const MIN_YEAR: i32 = 1900;
const MAX_YEAR: i32 = 9999;

lazy_static! {
    /// Unix seconds of local 1900-01-01 00:00:00 and 9999-12-31 23:59:59,
    /// falling back to the `time_t` limits where the platform can't go that far.
    static ref SUPPORTED_SECONDS: (i64, i64) = {
        let lower = local_to_unix_time(MIN_YEAR, 1, 1, 0, 0, 0)
            .unwrap_or(libc::time_t::MIN as i64);
        let upper = local_to_unix_time(MAX_YEAR, 12, 31, 23, 59, 59)
            .unwrap_or(libc::time_t::MAX as i64);
        (lower, upper)
    };
}

/// Inclusive range of whole Unix seconds that construction accepts.
pub(crate) fn supported_seconds() -> (i64, i64) {
    *SUPPORTED_SECONDS
}

/// Run local calendar fields through the normalizer.
pub(crate) fn local_to_unix_time(
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
    minute: i32,
    second: i32,
) -> Option<i64> {
    let mut tm = sys::tm_from_fields(year, month, day, hour, minute, second)?;
    sys::normalize_local(&mut tm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_range_is_ordered() {
        let (lower, upper) = supported_seconds();
        assert!(lower < 0);
        assert!(upper > 0);
        let (lower2, upper2) = supported_seconds();
        assert_eq!((lower, upper), (lower2, upper2));
    }

    #[test]
    fn default_overflow_policy_rolls() {
        assert_eq!(MonthOverflow::default(), MonthOverflow::Roll);
    }
}
