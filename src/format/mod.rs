//! Converting instants to and from text.
//!
//! Output patterns accept both strftime specifiers (`%Y-%m-%d`, with `%f` for
//! milliseconds) and friendly tokens (`yyyy-MM-dd`, with `fff`). Parsing uses
//! scanf-style templates whose `%d` conversions fill year, month, day, hour,
//! minute, second and millisecond, in that order.

mod parse;
mod pattern;
mod scan;

use std::fmt;

use crate::{Instant, Scale};

const STANDARD: &str = "yyyy-MM-dd HH:mm:ss";
const STANDARD_MS: &str = "yyyy-MM-dd HH:mm:ss.fff";
const SHORT_DATE: &str = "yyyy-MM-dd";
const TIME_ONLY: &str = "HH:mm:ss";
const STANDARD_CN: &str = "yyyy年MM月dd日 HH时mm分ss秒";
const STANDARD_MS_CN: &str = "yyyy年MM月dd日 HH时mm分ss秒.fff";
const SHORT_DATE_CN: &str = "yyyy年MM月dd日";
const FILE_NAME: &str = "yyyyMMdd_HHmmss";
const ISO8601: &str = "yyyy-MM-ddTHH:mm:ss.fff";
const UTC_STRING: &str = "yyyy-MM-dd HH:mm:ss.fff UTC";

const SCAN_STANDARD: &str = "%d-%d-%d %d:%d:%d";
const SCAN_STANDARD_MS: &str = "%d-%d-%d %d:%d:%d.%d";
const SCAN_SHORT_DATE: &str = "%d-%d-%d";
const SCAN_TIME_ONLY: &str = "%d:%d:%d";
const SCAN_STANDARD_CN: &str = "%d年%d月%d日 %d时%d分%d秒";
const SCAN_STANDARD_MS_CN: &str = "%d年%d月%d日 %d时%d分%d秒.%d";
const SCAN_SHORT_DATE_CN: &str = "%d年%d月%d日";
const SCAN_FILE_NAME: &str = "%4d%2d%2d_%2d%2d%2d";
const SCAN_ISO8601: &str = "%d-%d-%dT%d:%d:%d.%d";
const SCAN_SLASHED_MS: &str = "%d/%d/%d %d:%d:%d.%d";

const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A named pattern, or a caller-supplied one.
///
/// Every variant renders local time unless noted otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format<'a> {
    /// `2024-12-25 15:30:45`
    #[default]
    Standard,
    /// `2024-12-25 15:30:45.123`
    StandardMs,
    /// `2024-12-25`
    ShortDate,
    /// `15:30:45`. Parsing takes the date from today.
    TimeOnly,
    /// `2024年12月25日 15时30分45秒`
    StandardCn,
    /// `2024年12月25日 15时30分45秒.123`
    StandardMsCn,
    /// `2024年12月25日`
    ShortDateCn,
    /// `20241225_153045`, safe to use in a file name.
    FileName,
    /// `2024-12-25T13:50:45.123Z`, in UTC. When parsing, the fraction is a
    /// decimal fraction of a second cut to milliseconds, so `.5` is 500 ms.
    Iso8601Utc,
    /// `2024-12-25T21:50:45.123+08:00`, local time with its offset from UTC.
    Iso8601Offset,
    /// Whole seconds since the Unix epoch.
    Timestamp,
    /// `Wed, 25 Dec 2024 13:50:45 GMT`, in UTC with English names.
    Rfc2822,
    /// A strftime or friendly-token pattern when formatting, a scanf-style
    /// template when parsing.
    Pattern(&'a str),
}

impl<'a> From<&'a str> for Format<'a> {
    fn from(pattern: &'a str) -> Self {
        Format::Pattern(pattern)
    }
}

impl<'a> Format<'a> {
    /// Output pattern for the variants that are plain local renderings.
    fn local_pattern(&self) -> Option<&'a str> {
        match *self {
            Format::Standard => Some(STANDARD),
            Format::StandardMs => Some(STANDARD_MS),
            Format::ShortDate => Some(SHORT_DATE),
            Format::TimeOnly => Some(TIME_ONLY),
            Format::StandardCn => Some(STANDARD_CN),
            Format::StandardMsCn => Some(STANDARD_MS_CN),
            Format::ShortDateCn => Some(SHORT_DATE_CN),
            Format::FileName => Some(FILE_NAME),
            Format::Pattern(pattern) => Some(pattern),
            Format::Iso8601Utc | Format::Iso8601Offset | Format::Timestamp | Format::Rfc2822 => {
                None
            }
        }
    }

    /// Scan template for the variants that parse as plain local fields.
    fn scan_template(&self) -> Option<&'a str> {
        match *self {
            Format::Standard => Some(SCAN_STANDARD),
            Format::StandardMs => Some(SCAN_STANDARD_MS),
            Format::ShortDate => Some(SCAN_SHORT_DATE),
            Format::StandardCn => Some(SCAN_STANDARD_CN),
            Format::StandardMsCn => Some(SCAN_STANDARD_MS_CN),
            Format::ShortDateCn => Some(SCAN_SHORT_DATE_CN),
            Format::FileName => Some(SCAN_FILE_NAME),
            Format::Pattern(template) => Some(template),
            Format::TimeOnly
            | Format::Iso8601Utc
            | Format::Iso8601Offset
            | Format::Timestamp
            | Format::Rfc2822 => None,
        }
    }
}

/// `+hh:mm` or `-hh:mm` for an offset in seconds east of UTC.
fn format_utc_offset(offset: i64) -> String {
    let sign = if offset < 0 { '-' } else { '+' };
    let offset = offset.abs();
    format!("{}{:02}:{:02}", sign, offset / 3_600, offset % 3_600 / 60)
}

impl<S: Scale> Instant<S> {
    /// Render this instant.
    ///
    /// ```
    /// use dmdatetime::{EpochUnit, Format, InstantS64};
    ///
    /// let instant = InstantS64::from_epoch(1_703_512_245, EpochUnit::Seconds).unwrap();
    /// assert_eq!(instant.format(Format::Iso8601Utc), "2023-12-25T13:50:45.000Z");
    /// assert_eq!(instant.format(Format::Timestamp), "1703512245");
    /// ```
    pub fn format<'a>(&self, format: impl Into<Format<'a>>) -> String {
        let format = format.into();
        match format {
            Format::Iso8601Utc => {
                let mut output = self.render(ISO8601, &self.utc_tm());
                output.push('Z');
                output
            }
            Format::Iso8601Offset => {
                let mut output = self.render(ISO8601, &self.local_tm());
                output.push_str(&format_utc_offset(self.utc_offset()));
                output
            }
            Format::Timestamp => self.timestamp().to_string(),
            Format::Rfc2822 => {
                let tm = self.utc_tm();
                format!(
                    "{}, {:02} {} {:04} {:02}:{:02}:{:02} GMT",
                    WEEKDAY_NAMES[tm.tm_wday as usize],
                    tm.tm_mday,
                    MONTH_NAMES[tm.tm_mon as usize],
                    tm.tm_year + 1900,
                    tm.tm_hour,
                    tm.tm_min,
                    tm.tm_sec
                )
            }
            _ => self.render(format.local_pattern().unwrap_or_default(), &self.local_tm()),
        }
    }

    fn render(&self, pattern: &str, tm: &libc::tm) -> String {
        pattern::render(&pattern::compile(pattern), tm, self.millisecond())
    }

    /// ISO 8601 in local time with a numeric UTC offset.
    pub fn to_iso_string(&self) -> String {
        self.format(Format::Iso8601Offset)
    }

    /// `2023-12-25 13:50:45.000 UTC`
    pub fn to_utc_string(&self) -> String {
        self.render(UTC_STRING, &self.utc_tm())
    }
}

impl<S: Scale> fmt::Display for Instant<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = if S::TICKS_PER_SECOND >= 1_000 {
            Format::StandardMs
        } else {
            Format::Standard
        };
        f.write_str(&self.format(format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EpochUnit, InstantMs64, InstantS64};

    fn christmas_ms() -> InstantMs64 {
        InstantMs64::from_components_ms(2024, 12, 25, 15, 30, 45, 7).unwrap()
    }

    #[test]
    fn local_named_patterns() {
        let instant = christmas_ms();
        assert_eq!(instant.format(Format::Standard), "2024-12-25 15:30:45");
        assert_eq!(instant.format(Format::StandardMs), "2024-12-25 15:30:45.007");
        assert_eq!(instant.format(Format::ShortDate), "2024-12-25");
        assert_eq!(instant.format(Format::TimeOnly), "15:30:45");
        assert_eq!(
            instant.format(Format::StandardCn),
            "2024年12月25日 15时30分45秒"
        );
        assert_eq!(
            instant.format(Format::StandardMsCn),
            "2024年12月25日 15时30分45秒.007"
        );
        assert_eq!(instant.format(Format::ShortDateCn), "2024年12月25日");
        assert_eq!(instant.format(Format::FileName), "20241225_153045");
        assert_eq!(instant.format(Format::default()), "2024-12-25 15:30:45");
    }

    #[test]
    fn caller_patterns() {
        let instant = christmas_ms();
        assert_eq!(instant.format("%Y/%m/%d %H.%M.%S.%f"), "2024/12/25 15.30.45.007");
        assert_eq!(instant.format("dd/MM/yyyy fff"), "25/12/2024 007");
        assert_eq!(instant.format("%j"), "360");
        assert_eq!(instant.format(""), "");
    }

    #[test]
    fn utc_renderings() {
        let instant = InstantMs64::from_epoch(1_703_512_245_123, EpochUnit::Milliseconds).unwrap();
        assert_eq!(instant.format(Format::Iso8601Utc), "2023-12-25T13:50:45.123Z");
        assert_eq!(instant.format(Format::Rfc2822), "Mon, 25 Dec 2023 13:50:45 GMT");
        assert_eq!(instant.format(Format::Timestamp), "1703512245");
        assert_eq!(instant.to_utc_string(), "2023-12-25 13:50:45.123 UTC");

        let instant = InstantS64::from_epoch(1_703_512_245, EpochUnit::Seconds).unwrap();
        assert_eq!(instant.to_utc_string(), "2023-12-25 13:50:45.000 UTC");
    }

    #[test]
    fn iso_offset_uses_local_fields() {
        let instant = christmas_ms();
        let iso = instant.to_iso_string();
        assert!(iso.starts_with("2024-12-25T15:30:45.007"), "{}", iso);
        assert!(iso.ends_with(&format_utc_offset(instant.utc_offset())));
        assert_eq!(iso.len(), "2024-12-25T15:30:45.007+00:00".len());
    }

    #[test]
    fn utc_offset_formatting() {
        assert_eq!(format_utc_offset(0), "+00:00");
        assert_eq!(format_utc_offset(8 * 3_600), "+08:00");
        assert_eq!(format_utc_offset(-(3 * 3_600 + 30 * 60)), "-03:30");
        assert_eq!(format_utc_offset(5 * 3_600 + 45 * 60), "+05:45");
    }

    #[test]
    fn display() {
        assert_eq!(christmas_ms().to_string(), "2024-12-25 15:30:45.007");
        let instant = InstantS64::from_components(2024, 12, 25, 15, 30, 45).unwrap();
        assert_eq!(instant.to_string(), "2024-12-25 15:30:45");
        assert_eq!(format!("{}", instant), instant.format(Format::Standard));
    }
}
