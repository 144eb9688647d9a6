/// A calendar reading of an instant, either in local time or in UTC.
///
/// Produced on demand and never stored inside an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarFields {
    /// Absolute year, e.g. 2024.
    pub year: i32,
    /// 1-12.
    pub month: u8,
    /// 1-31.
    pub day: u8,
    /// 0-23.
    pub hour: u8,
    /// 0-59.
    pub minute: u8,
    /// 0-59, or 60 on a leap second if the platform zone reports one.
    pub second: u8,
    /// 0-999. Always 0 at second scale.
    pub millisecond: u16,
}

impl CalendarFields {
    pub(crate) fn from_tm(tm: &libc::tm, millisecond: u16) -> Self {
        CalendarFields {
            year: tm.tm_year + 1900,
            month: (tm.tm_mon + 1) as u8,
            day: tm.tm_mday as u8,
            hour: tm.tm_hour as u8,
            minute: tm.tm_min as u8,
            second: tm.tm_sec as u8,
            millisecond,
        }
    }
}
