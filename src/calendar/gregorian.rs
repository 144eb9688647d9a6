use num_integer::Integer;

const GREGORIAN_MONTH_LENGTHS_NON_LEAP_YEAR: [u8; 12] =
    [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Julian day number of the Unix epoch, 1970-01-01.
const UNIX_EPOCH_JULIAN_DAY: i64 = 2_440_588;
const SECONDS_PER_DAY: i64 = 86_400;

/// Gregorian leap-year rule: divisible by 4, except centuries not divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    // Get offset into cycle first so negative years follow the same rule.
    let year = year.mod_floor(&400);
    year % 4 == 0 && (year % 100 != 0 || year == 0)
}

/// Number of days in `month` (1-12) of `year`, or 0 if the month is out of range.
pub fn days_in_month(year: i32, month: i32) -> u8 {
    if !(1..=12).contains(&month) {
        return 0;
    }
    if month == 2 && is_leap_year(year) {
        29
    } else {
        GREGORIAN_MONTH_LENGTHS_NON_LEAP_YEAR[(month - 1) as usize]
    }
}

/// Shift a (year, zero-based month) pair by `months`, carrying whole years.
pub(crate) fn shift_months(year: i32, month0: i32, months: i32) -> Option<(i32, i32)> {
    let total = month0.checked_add(months)?;
    let (carry, month0) = total.div_mod_floor(&12);
    Some((year.checked_add(carry)?, month0))
}

/// Unix time of a UTC calendar reading. Every day has exactly 86,400 seconds.
///
/// Only meaningful for in-range fields on or after the start of the Julian
/// period (4713 BC).
pub(crate) fn utc_to_unix_time(
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
    minute: i32,
    second: i32,
) -> i64 {
    let days = julian_day(year, month, day) - UNIX_EPOCH_JULIAN_DAY;
    days * SECONDS_PER_DAY + hour as i64 * 3_600 + minute as i64 * 60 + second as i64
}

fn julian_day(year: i32, month: i32, day: i32) -> i64 {
    // https://en.wikipedia.org/wiki/Julian_day
    // JDN = (1461 × (Y + 4800 + (M − 14)/12))/4
    // + (367 × (M − 2 − 12 × ((M − 14)/12)))/12
    // − (3 × ((Y + 4900 + (M - 14)/12)/100))/4 + D − 32075
    let y = year as i64;
    let m = month as i64;
    let d = day as i64;
    (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
        - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
        + d
        - 32075
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_julian_day() {
        assert_eq!(julian_day(2000, 1, 1), 2451545);
        assert_eq!(julian_day(1970, 1, 1), 2440588);
    }

    #[test]
    fn test_utc_to_unix_time() {
        assert_eq!(utc_to_unix_time(1970, 1, 1, 0, 0, 0), 0);
        assert_eq!(utc_to_unix_time(1969, 12, 31, 23, 59, 59), -1);
        assert_eq!(utc_to_unix_time(2023, 12, 25, 13, 50, 45), 1_703_512_245);
        assert_eq!(utc_to_unix_time(2000, 3, 1, 0, 0, 0), 11_017 * 86_400);
    }

    #[test]
    fn test_is_leap_year() {
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(2023));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2100));
        assert!(is_leap_year(0));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(-100));

        for year in 1800..=2500 {
            let expected = year % 4 == 0 && (year % 100 != 0 || year % 400 == 0);
            assert_eq!(is_leap_year(year), expected, "year {}", year);
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2023, 1), 31);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2024, 4), 30);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 0), 0);
        assert_eq!(days_in_month(2024, 13), 0);
    }

    #[test]
    fn test_shift_months() {
        assert_eq!(shift_months(2024, 11, 1), Some((2025, 0)));
        assert_eq!(shift_months(2024, 0, -1), Some((2023, 11)));
        assert_eq!(shift_months(2024, 0, -13), Some((2022, 11)));
        assert_eq!(shift_months(2024, 5, 24), Some((2026, 5)));
        assert_eq!(shift_months(i32::MAX, 11, 1), None);
    }
}
