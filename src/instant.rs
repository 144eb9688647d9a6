use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ops::{Add, Sub};
use std::time::SystemTime;

use log::debug;
use num_integer::Integer;

use crate::calendar::{self, gregorian, CalendarFields, InstantBuilder, MonthOverflow};
use crate::error::{Error, Result};
use crate::scale::{millis_to_ticks, millis_to_ticks_floor, ticks_to_millis, Milliseconds, Scale, Seconds};
use crate::sys;
use crate::unit::{EpochUnit, TimeUnit};
use crate::Duration;

/// An absolute point in time, counted in ticks of `S` since the Unix epoch.
///
/// Ticks follow Unix time: every day has exactly 86,400 seconds. An instant is
/// immutable; every `add_*` and boundary method returns a new value. All
/// calendar readings are taken in the platform's local zone unless the method
/// name says UTC.
#[derive(Debug, Clone, Copy)]
pub struct Instant<S: Scale> {
    ticks: i64,
    phantom: PhantomData<S>,
}

pub type InstantS64 = Instant<Seconds>;
pub type InstantMs64 = Instant<Milliseconds>;

impl<S: Scale> Instant<S> {
    pub(crate) fn from_ticks_since_epoch(ticks: i64) -> Self {
        Self {
            ticks,
            phantom: PhantomData,
        }
    }

    pub fn ticks_since_epoch(&self) -> i64 {
        self.ticks
    }

    pub fn epoch() -> Self {
        Self::from_ticks_since_epoch(0)
    }

    pub fn now() -> Self {
        let milliseconds = system_time_to_unix_millis(SystemTime::now());
        Self::from_ticks_since_epoch(millis_to_ticks_floor::<S>(milliseconds))
    }

    /// Local midnight at the start of the current day.
    pub fn today() -> Self {
        Self::now().start_of_day()
    }

    pub fn builder() -> InstantBuilder<S> {
        InstantBuilder::new()
    }

    /// Local 1900-01-01 00:00:00.000, the oldest instant construction accepts.
    pub fn min_value() -> Self {
        let (lower, _) = calendar::supported_seconds();
        Self::from_ticks_since_epoch(lower.saturating_mul(S::TICKS_PER_SECOND))
    }

    /// Local 9999-12-31 23:59:59.999, the newest instant construction accepts.
    pub fn max_value() -> Self {
        let (_, upper) = calendar::supported_seconds();
        let ticks = upper
            .saturating_mul(S::TICKS_PER_SECOND)
            .saturating_add(millis_to_ticks::<S>(999));
        Self::from_ticks_since_epoch(ticks)
    }

    fn in_supported_range(ticks: i64) -> bool {
        (Self::min_value().ticks..=Self::max_value().ticks).contains(&ticks)
    }

    pub fn from_ymd(year: i32, month: i32, day: i32) -> Result<Self> {
        Self::from_components_ms(year, month, day, 0, 0, 0, 0)
    }

    pub fn from_components(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
    ) -> Result<Self> {
        Self::from_components_ms(year, month, day, hour, minute, second, 0)
    }

    /// Build an instant from local calendar fields.
    ///
    /// The fields are normalized, not validated: month 13 becomes January of
    /// the next year, day 0 the last day of the previous month, and so on. The
    /// millisecond is clamped to 0-999. Fails if the normalizer cannot
    /// represent the result or it lies outside
    /// [`min_value`](Self::min_value)..=[`max_value`](Self::max_value).
    #[allow(clippy::too_many_arguments)]
    pub fn from_components_ms(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
    ) -> Result<Self> {
        let invalid = || Error::InvalidComponents {
            year,
            month,
            day,
            hour,
            minute,
            second,
        };
        let seconds = calendar::local_to_unix_time(year, month, day, hour, minute, second)
            .ok_or_else(invalid)?;
        let subsecond = millis_to_ticks::<S>(millisecond.clamp(0, 999) as i64);
        let ticks = seconds
            .checked_mul(S::TICKS_PER_SECOND)
            .and_then(|ticks| ticks.checked_add(subsecond))
            .ok_or_else(invalid)?;
        if !Self::in_supported_range(ticks) {
            debug!(
                "{}-{}-{} {}:{}:{} is outside the supported range",
                year, month, day, hour, minute, second
            );
            return Err(invalid());
        }
        Ok(Self::from_ticks_since_epoch(ticks))
    }

    pub fn from_local_fields(fields: &CalendarFields) -> Result<Self> {
        Self::from_components_ms(
            fields.year,
            fields.month as i32,
            fields.day as i32,
            fields.hour as i32,
            fields.minute as i32,
            fields.second as i32,
            fields.millisecond as i32,
        )
    }

    /// Build from a raw epoch count. Milliseconds are floored at second scale.
    pub fn from_epoch(value: i64, unit: EpochUnit) -> Result<Self> {
        let ticks = match unit {
            EpochUnit::Seconds => value.checked_mul(S::TICKS_PER_SECOND),
            EpochUnit::Milliseconds => Some(millis_to_ticks_floor::<S>(value)),
        }
        .ok_or(Error::RangeOverflow)?;
        if !Self::in_supported_range(ticks) {
            debug!("epoch value {} ({:?}) is outside the supported range", value, unit);
            return Err(Error::RangeOverflow);
        }
        Ok(Self::from_ticks_since_epoch(ticks))
    }

    /// Reconstruct from local fields that came out of a breakdown of an
    /// existing instant, so the normalizer is known to accept them.
    #[allow(clippy::too_many_arguments)]
    fn from_local_unchecked(
        year: i32,
        month: i32,
        day: i32,
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
    ) -> Self {
        let seconds = calendar::local_to_unix_time(year, month, day, hour, minute, second)
            .expect("calendar boundary of a representable instant should be representable");
        Self::from_ticks_since_epoch(
            seconds * S::TICKS_PER_SECOND + millis_to_ticks::<S>(millisecond as i64),
        )
    }

    /// Whole seconds since the epoch, rounded toward negative infinity.
    pub fn timestamp(&self) -> i64 {
        self.ticks.div_floor(&S::TICKS_PER_SECOND)
    }

    pub fn timestamp_millis(&self) -> i64 {
        ticks_to_millis::<S>(self.ticks)
    }

    pub(crate) fn local_tm(&self) -> libc::tm {
        sys::local_breakdown(self.timestamp())
            .expect("instant should be within the platform's calendar range")
    }

    pub(crate) fn utc_tm(&self) -> libc::tm {
        sys::utc_breakdown(self.timestamp())
            .expect("instant should be within the platform's calendar range")
    }

    pub fn to_local_fields(&self) -> CalendarFields {
        CalendarFields::from_tm(&self.local_tm(), self.millisecond())
    }

    pub fn to_utc_fields(&self) -> CalendarFields {
        CalendarFields::from_tm(&self.utc_tm(), self.millisecond())
    }

    pub fn year(&self) -> i32 {
        self.local_tm().tm_year + 1900
    }

    pub fn month(&self) -> u8 {
        (self.local_tm().tm_mon + 1) as u8
    }

    pub fn day(&self) -> u8 {
        self.local_tm().tm_mday as u8
    }

    pub fn hour(&self) -> u8 {
        self.local_tm().tm_hour as u8
    }

    pub fn minute(&self) -> u8 {
        self.local_tm().tm_min as u8
    }

    pub fn second(&self) -> u8 {
        self.local_tm().tm_sec as u8
    }

    /// Always 0 at second scale.
    pub fn millisecond(&self) -> u16 {
        let subsecond = self.ticks.mod_floor(&S::TICKS_PER_SECOND);
        ticks_to_millis::<S>(subsecond) as u16
    }

    /// 0 = Sunday through 6 = Saturday.
    pub fn day_of_week(&self) -> u8 {
        self.local_tm().tm_wday as u8
    }

    /// 1-based day of the year.
    pub fn day_of_year(&self) -> u16 {
        (self.local_tm().tm_yday + 1) as u16
    }

    pub fn is_leap_year(&self) -> bool {
        gregorian::is_leap_year(self.year())
    }

    pub fn is_weekday(&self) -> bool {
        (1..=5).contains(&self.day_of_week())
    }

    pub fn is_weekend(&self) -> bool {
        !self.is_weekday()
    }

    pub fn days_in_month(&self) -> u8 {
        let tm = self.local_tm();
        gregorian::days_in_month(tm.tm_year + 1900, tm.tm_mon + 1)
    }

    /// Offset of local time from UTC at this instant, in seconds east of UTC.
    ///
    /// Computed by reading the local fields back as if they were UTC and
    /// subtracting the real Unix time.
    pub fn utc_offset(&self) -> i64 {
        let tm = self.local_tm();
        let local_as_utc = gregorian::utc_to_unix_time(
            tm.tm_year + 1900,
            tm.tm_mon + 1,
            tm.tm_mday,
            tm.tm_hour,
            tm.tm_min,
            tm.tm_sec,
        );
        local_as_utc - self.timestamp()
    }

    pub fn add_years(&self, years: i32) -> Result<Self> {
        self.add_calendar_months(years, 0, MonthOverflow::Roll)
    }

    /// Add calendar months on the local reading. With the default
    /// [`MonthOverflow::Roll`] a day that does not exist in the target month
    /// spills into the next one.
    pub fn add_months(&self, months: i32) -> Result<Self> {
        self.add_calendar_months(0, months, MonthOverflow::Roll)
    }

    pub fn add_years_with(&self, years: i32, overflow: MonthOverflow) -> Result<Self> {
        self.add_calendar_months(years, 0, overflow)
    }

    pub fn add_months_with(&self, months: i32, overflow: MonthOverflow) -> Result<Self> {
        self.add_calendar_months(0, months, overflow)
    }

    fn add_calendar_months(
        &self,
        years: i32,
        months: i32,
        overflow: MonthOverflow,
    ) -> Result<Self> {
        let fields = self.to_local_fields();
        let year = fields.year.checked_add(years).ok_or(Error::RangeOverflow)?;
        let (year, month0) = gregorian::shift_months(year, fields.month as i32 - 1, months)
            .ok_or(Error::RangeOverflow)?;
        let month = month0 + 1;
        let day = match overflow {
            MonthOverflow::Roll => fields.day as i32,
            MonthOverflow::Clamp => {
                (fields.day as i32).min(gregorian::days_in_month(year, month) as i32)
            }
        };
        Self::from_components_ms(
            year,
            month,
            day,
            fields.hour as i32,
            fields.minute as i32,
            fields.second as i32,
            fields.millisecond as i32,
        )
        .map_err(|e| {
            debug!("calendar addition left the supported range: {}", e);
            Error::RangeOverflow
        })
    }

    // Fixed-length offsets on the absolute instant. They don't look at the
    // calendar, so a day is always 86,400 seconds even across a DST change.

    pub fn add_days(&self, days: i32) -> Self {
        *self + Duration::from_days(days as i64)
    }

    pub fn add_hours(&self, hours: i32) -> Self {
        *self + Duration::from_hours(hours as i64)
    }

    pub fn add_minutes(&self, minutes: i32) -> Self {
        *self + Duration::from_minutes(minutes as i64)
    }

    pub fn add_seconds(&self, seconds: i32) -> Self {
        *self + Duration::from_seconds(seconds as i64)
    }

    /// Truncated toward zero at second scale.
    pub fn add_milliseconds(&self, milliseconds: i32) -> Self {
        *self + Duration::from_milliseconds(milliseconds as i64)
    }

    /// Add `value` units. Months and years are calendar-aware (rolling over
    /// like [`add_months`](Self::add_months)); the other units are fixed spans.
    /// Fails with [`Error::RangeOverflow`] when the result falls outside
    /// [`min_value`](Self::min_value)..=[`max_value`](Self::max_value).
    pub fn add_time(&self, value: i32, unit: TimeUnit) -> Result<Self> {
        match unit {
            TimeUnit::Month => self.add_months(value),
            TimeUnit::Year => self.add_years(value),
            _ => {
                let milliseconds = (value as i64)
                    .checked_mul(unit.approximate_millis())
                    .ok_or(Error::RangeOverflow)?;
                let result = self
                    .checked_add(Duration::from_milliseconds(milliseconds))
                    .ok_or(Error::RangeOverflow)?;
                if !Self::in_supported_range(result.ticks) {
                    debug!("adding {} {:?} left the supported range", value, unit);
                    return Err(Error::RangeOverflow);
                }
                Ok(result)
            }
        }
    }

    pub fn sub_time(&self, value: i32, unit: TimeUnit) -> Result<Self> {
        let value = value.checked_neg().ok_or(Error::RangeOverflow)?;
        self.add_time(value, unit)
    }

    /// `self - other` in whole `unit`s, truncated toward zero. Months count as
    /// 30 days and years as 365 days.
    pub fn diff(&self, other: &Self, unit: TimeUnit) -> i64 {
        self.subtract(other).total_milliseconds() / unit.approximate_millis()
    }

    pub fn subtract(&self, other: &Self) -> Duration<S> {
        *self - *other
    }

    pub fn checked_add(&self, duration: Duration<S>) -> Option<Self> {
        Some(Self::from_ticks_since_epoch(
            self.ticks.checked_add(duration.ticks())?,
        ))
    }

    pub fn checked_sub(&self, duration: Duration<S>) -> Option<Self> {
        Some(Self::from_ticks_since_epoch(
            self.ticks.checked_sub(duration.ticks())?,
        ))
    }

    pub fn start_of_day(&self) -> Self {
        let fields = self.to_local_fields();
        Self::from_local_unchecked(fields.year, fields.month as i32, fields.day as i32, 0, 0, 0, 0)
    }

    /// 23:59:59.999 local, or 23:59:59 at second scale.
    pub fn end_of_day(&self) -> Self {
        let fields = self.to_local_fields();
        Self::from_local_unchecked(
            fields.year,
            fields.month as i32,
            fields.day as i32,
            23,
            59,
            59,
            999,
        )
    }

    pub fn start_of_month(&self) -> Self {
        let fields = self.to_local_fields();
        Self::from_local_unchecked(fields.year, fields.month as i32, 1, 0, 0, 0, 0)
    }

    /// One tick before the start of the following month.
    pub fn end_of_month(&self) -> Self {
        let fields = self.to_local_fields();
        // Month 13 is normalized into January of the following year.
        let next = Self::from_local_unchecked(fields.year, fields.month as i32 + 1, 1, 0, 0, 0, 0);
        Self::from_ticks_since_epoch(next.ticks - 1)
    }

    pub fn start_of_year(&self) -> Self {
        Self::from_local_unchecked(self.year(), 1, 1, 0, 0, 0, 0)
    }

    /// One tick before the start of the following year.
    pub fn end_of_year(&self) -> Self {
        let next = Self::from_local_unchecked(self.year() + 1, 1, 1, 0, 0, 0, 0);
        Self::from_ticks_since_epoch(next.ticks - 1)
    }

    /// Inclusive on both ends.
    pub fn is_between(&self, start: &Self, end: &Self) -> bool {
        self.is_between_with(start, end, true, true)
    }

    pub fn is_between_with(
        &self,
        start: &Self,
        end: &Self,
        inclusive_start: bool,
        inclusive_end: bool,
    ) -> bool {
        let after_start = if inclusive_start {
            self >= start
        } else {
            self > start
        };
        let before_end = if inclusive_end { self <= end } else { self < end };
        after_start && before_end
    }

    /// Convert to a coarser scale, rounding toward negative infinity.
    pub fn floor<S2: Scale>(&self) -> Instant<S2> {
        assert!(
            S2::TICKS_PER_SECOND <= S::TICKS_PER_SECOND,
            "Cannot floor scale to a higher scale"
        );
        let factor = S::TICKS_PER_SECOND / S2::TICKS_PER_SECOND;
        Instant::from_ticks_since_epoch(self.ticks.div_floor(&factor))
    }

    /// Convert to a finer scale, or `None` on overflow.
    pub fn extend<S2: Scale>(&self) -> Option<Instant<S2>> {
        assert!(
            S2::TICKS_PER_SECOND >= S::TICKS_PER_SECOND,
            "Cannot extend scale to a lower scale"
        );
        let factor = S2::TICKS_PER_SECOND / S::TICKS_PER_SECOND;
        Some(Instant::from_ticks_since_epoch(
            self.ticks.checked_mul(factor)?,
        ))
    }
}

impl<S: Scale> Sub for Instant<S> {
    type Output = Duration<S>;

    fn sub(self, rhs: Self) -> Self::Output {
        Duration::new(
            self.ticks
                .checked_sub(rhs.ticks)
                .expect("instant subtraction underflow"),
        )
    }
}

impl<S: Scale> Add<Duration<S>> for Instant<S> {
    type Output = Self;

    fn add(self, rhs: Duration<S>) -> Self::Output {
        self.checked_add(rhs).expect("instant addition overflow")
    }
}

impl<S: Scale> Sub<Duration<S>> for Instant<S> {
    type Output = Self;

    fn sub(self, rhs: Duration<S>) -> Self::Output {
        self.checked_sub(rhs).expect("instant subtraction overflow")
    }
}

impl<S1: Scale, S2: Scale> PartialEq<Instant<S2>> for Instant<S1> {
    fn eq(&self, other: &Instant<S2>) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl<S: Scale> Eq for Instant<S> {}

impl<S1: Scale, S2: Scale> PartialOrd<Instant<S2>> for Instant<S1> {
    fn partial_cmp(&self, other: &Instant<S2>) -> Option<Ordering> {
        // If
        //
        // t1/s1 < t2/s2
        //
        // then
        //
        // t1*s2 < t2*s1
        //
        // which can't overflow in i128.
        let t1 = self.ticks as i128 * S2::TICKS_PER_SECOND as i128;
        let t2 = other.ticks as i128 * S1::TICKS_PER_SECOND as i128;
        Some(t1.cmp(&t2))
    }
}

impl<S: Scale> Ord for Instant<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ticks.cmp(&other.ticks)
    }
}

impl<S: Scale> Hash for Instant<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ticks.hash(state);
    }
}

/// Milliseconds since the Unix epoch, negative before it.
fn system_time_to_unix_millis(value: SystemTime) -> i64 {
    match value.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(duration) => duration.as_millis() as i64,
        Err(before_epoch) => -(before_epoch.duration().as_millis() as i64),
    }
}
