use std::ops::RangeInclusive;

use log::trace;

use super::scan::{scan, Scan};
use super::{
    Format, MONTH_NAMES, SCAN_FILE_NAME, SCAN_ISO8601, SCAN_SLASHED_MS, SCAN_STANDARD_MS,
    SCAN_TIME_ONLY, WEEKDAY_NAMES,
};
use crate::calendar::{days_in_month, gregorian, CalendarFields};
use crate::error::{Error, Result};
use crate::unit::EpochUnit;
use crate::{Instant, Scale};

/// Year, month and day must all be present.
const MIN_VALUES: usize = 3;

/// Templates tried in order by [`Instant::parse_any`].
const AUTO_DETECT_TEMPLATES: [&str; 3] = [SCAN_STANDARD_MS, SCAN_SLASHED_MS, SCAN_FILE_NAME];

/// Where to anchor parsed fields that carry no explicit offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DefaultZone {
    Local,
    Utc,
}

impl<S: Scale> Instant<S> {
    /// Parse `input` with a named format or a scanf-style template.
    ///
    /// Templates fill year, month, day, hour, minute, second and millisecond
    /// from their `%d` conversions in that order; at least the first three
    /// must be found. A day of 0 is read as 1, any other field outside its
    /// usual range is an error. Text after the last matched conversion is
    /// ignored.
    ///
    /// ```
    /// use dmdatetime::{Format, InstantS64};
    ///
    /// let parsed = InstantS64::parse("2024-12-25 15:30:45", Format::Standard).unwrap();
    /// assert_eq!(parsed, InstantS64::from_components(2024, 12, 25, 15, 30, 45).unwrap());
    ///
    /// let parsed = InstantS64::parse("25.12.2024", "%d.%d.%d");
    /// assert!(parsed.is_err());
    /// ```
    pub fn parse<'a>(input: &str, format: impl Into<Format<'a>>) -> Result<Self> {
        let format = format.into();
        if let Some(template) = format.scan_template() {
            return Self::from_scan(input, &scan(input, template));
        }
        match format {
            Format::TimeOnly => Self::parse_time_only(input),
            Format::Iso8601Utc => Self::parse_iso8601(input, DefaultZone::Utc),
            Format::Iso8601Offset => Self::parse_iso8601(input, DefaultZone::Local),
            Format::Timestamp => Self::parse_timestamp(input),
            Format::Rfc2822 => Self::parse_rfc2822(input),
            _ => Err(Error::parse(input, "format has no parse template")),
        }
    }

    /// Try `Y-M-D H:M:S[.ms]`, `Y/M/D H:M:S[.ms]` and `YYYYMMDD_HHMMSS` in
    /// that order, taking the first one that yields at least year, month and
    /// day.
    pub fn parse_any(input: &str) -> Result<Self> {
        for template in AUTO_DETECT_TEMPLATES {
            let scan = scan(input, template);
            trace!(
                "template {:?} recovered {} field(s) from {:?}",
                template,
                scan.values.len(),
                input
            );
            if scan.values.len() >= MIN_VALUES {
                return Self::from_scan(input, &scan);
            }
        }
        Err(Error::parse(input, "no known date/time layout matched"))
    }

    fn from_scan(input: &str, scan: &Scan) -> Result<Self> {
        let fields = fields_from_values(input, &scan.values)?;
        Self::from_parsed_fields(input, &fields)
    }

    fn from_parsed_fields(input: &str, fields: &CalendarFields) -> Result<Self> {
        Self::from_local_fields(fields).map_err(|e| Error::parse(input, e.to_string()))
    }

    fn parse_time_only(input: &str) -> Result<Self> {
        let scan = scan(input, SCAN_TIME_ONLY);
        if scan.values.len() < 3 {
            return Err(Error::parse(input, "expected hour, minute and second"));
        }
        let today = Self::today().to_local_fields();
        let mut values = vec![today.year as i64, today.month as i64, today.day as i64];
        values.extend_from_slice(&scan.values);
        let fields = fields_from_values(input, &values)?;
        Self::from_parsed_fields(input, &fields)
    }

    fn parse_iso8601(input: &str, default_zone: DefaultZone) -> Result<Self> {
        let scan = scan(input, SCAN_ISO8601);
        let mut values = scan.values.clone();
        if let Some(millisecond) = values.get_mut(6) {
            if let Some(scaled) = fraction_to_millis(&input[..scan.consumed]) {
                *millisecond = scaled;
            }
        }
        let fields = fields_from_values(input, &values)?;
        let rest = &input[scan.consumed..];
        let offset = if rest.is_empty() {
            match default_zone {
                DefaultZone::Local => return Self::from_parsed_fields(input, &fields),
                DefaultZone::Utc => 0,
            }
        } else {
            parse_utc_offset(rest)
                .ok_or_else(|| Error::parse(input, format!("invalid UTC offset {:?}", rest)))?
        };
        Self::from_utc_fields_with_offset(input, &fields, offset)
    }

    fn parse_timestamp(input: &str) -> Result<Self> {
        let seconds: i64 = input
            .trim()
            .parse()
            .map_err(|e| Error::parse(input, format!("invalid timestamp: {}", e)))?;
        Self::from_epoch(seconds, EpochUnit::Seconds).map_err(|e| Error::parse(input, e.to_string()))
    }

    /// `[Wed,] 25 Dec 2024 15:30:45 [GMT|UTC|UT|Z|±hhmm]`, case-insensitive
    /// names. A missing zone means UTC.
    fn parse_rfc2822(input: &str) -> Result<Self> {
        let mut tokens = input.split_whitespace().peekable();

        if let Some(token) = tokens.peek() {
            let name = token.trim_end_matches(',');
            if WEEKDAY_NAMES.iter().any(|day| day.eq_ignore_ascii_case(name)) {
                tokens.next();
            }
        }

        let mut next = |what: &str| {
            tokens
                .next()
                .ok_or_else(|| Error::parse(input, format!("missing {}", what)))
        };
        let day: i64 = next("day")?
            .parse()
            .map_err(|_| Error::parse(input, "invalid day"))?;
        let month_name = next("month")?;
        let month_index = MONTH_NAMES
            .iter()
            .position(|month| month.eq_ignore_ascii_case(month_name))
            .ok_or_else(|| Error::parse(input, format!("unknown month {:?}", month_name)))?;
        let month = month_index as i64 + 1;
        let year: i64 = next("year")?
            .parse()
            .map_err(|_| Error::parse(input, "invalid year"))?;
        let time = next("time")?;
        let time_scan = scan(time, SCAN_TIME_ONLY);
        if time_scan.values.len() < 3 || time_scan.consumed != time.len() {
            return Err(Error::parse(input, format!("invalid time {:?}", time)));
        }
        let offset = match tokens.next() {
            None => 0,
            Some(zone) => parse_rfc2822_zone(zone)
                .ok_or_else(|| Error::parse(input, format!("invalid zone {:?}", zone)))?,
        };
        if let Some(extra) = tokens.next() {
            return Err(Error::parse(input, format!("unexpected {:?}", extra)));
        }

        let mut values = vec![year, month, day];
        values.extend_from_slice(&time_scan.values);
        let fields = fields_from_values(input, &values)?;
        Self::from_utc_fields_with_offset(input, &fields, offset)
    }

    /// Fields are a wall-clock reading `offset` seconds east of UTC.
    fn from_utc_fields_with_offset(
        input: &str,
        fields: &CalendarFields,
        offset: i64,
    ) -> Result<Self> {
        let seconds = gregorian::utc_to_unix_time(
            fields.year,
            fields.month as i32,
            fields.day as i32,
            fields.hour as i32,
            fields.minute as i32,
            fields.second as i32,
        ) - offset;
        let milliseconds = seconds
            .checked_mul(1_000)
            .and_then(|ms| ms.checked_add(fields.millisecond as i64))
            .ok_or_else(|| Error::parse(input, Error::RangeOverflow.to_string()))?;
        Self::from_epoch(milliseconds, EpochUnit::Milliseconds)
            .map_err(|e| Error::parse(input, e.to_string()))
    }
}

/// Check scanned values against their usual ranges.
fn fields_from_values(input: &str, values: &[i64]) -> Result<CalendarFields> {
    if values.len() < MIN_VALUES {
        return Err(Error::parse(
            input,
            format!(
                "expected at least year, month and day, found {} field(s)",
                values.len()
            ),
        ));
    }
    let value = |index: usize| values.get(index).copied().unwrap_or(0);

    let year = i32::try_from(values[0])
        .map_err(|_| Error::parse(input, format!("year {} out of range", values[0])))?;
    let month = check_range(input, "month", value(1), 1..=12)?;
    let last_day = days_in_month(year, month as i32) as i64;
    let day = match check_range(input, "day", value(2), 0..=last_day)? {
        0 => 1,
        day => day,
    };

    Ok(CalendarFields {
        year,
        month: month as u8,
        day: day as u8,
        hour: check_range(input, "hour", value(3), 0..=23)? as u8,
        minute: check_range(input, "minute", value(4), 0..=59)? as u8,
        second: check_range(input, "second", value(5), 0..=59)? as u8,
        millisecond: check_range(input, "millisecond", value(6), 0..=999)? as u16,
    })
}

fn check_range(input: &str, name: &str, value: i64, range: RangeInclusive<i64>) -> Result<i64> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(Error::parse(
            input,
            format!(
                "{} {} outside {}..={}",
                name,
                value,
                range.start(),
                range.end()
            ),
        ))
    }
}

/// Milliseconds of a decimal fraction ending `matched`, so `.5` is 500 and
/// `.123456` is 123. `None` if `matched` does not end in `.` and digits.
fn fraction_to_millis(matched: &str) -> Option<i64> {
    let digit_count = matched
        .bytes()
        .rev()
        .take_while(|b| b.is_ascii_digit())
        .count();
    let (head, digits) = matched.split_at(matched.len() - digit_count);
    if digits.is_empty() || !head.ends_with('.') {
        return None;
    }
    format!("{:0<3}", &digits[..digits.len().min(3)]).parse().ok()
}

/// `Z`, `±hh:mm` or `±hhmm`, as seconds east of UTC.
fn parse_utc_offset(text: &str) -> Option<i64> {
    if text.eq_ignore_ascii_case("z") {
        return Some(0);
    }
    if !text.is_ascii() {
        return None;
    }
    let (sign, digits) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };
    let (hours, minutes) = match digits.len() {
        5 if digits.as_bytes()[2] == b':' => (&digits[..2], &digits[3..]),
        4 => (&digits[..2], &digits[2..]),
        _ => return None,
    };
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i64 = hours.parse().ok()?;
    let minutes: i64 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(sign * (hours * 3_600 + minutes * 60))
}

fn parse_rfc2822_zone(zone: &str) -> Option<i64> {
    if ["GMT", "UTC", "UT"]
        .iter()
        .any(|name| name.eq_ignore_ascii_case(zone))
    {
        Some(0)
    } else {
        parse_utc_offset(zone)
    }
}
