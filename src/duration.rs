use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Mul, Neg, Sub};

use crate::scale::{millis_to_ticks, ticks_to_millis, Milliseconds, Scale, Seconds};

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;

/// A signed span of time counted in ticks of `S`.
///
/// The `total_*` accessors truncate toward zero, so a span of -90 seconds is
/// -1 minute.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Duration<S: Scale> {
    ticks: i64,
    phantom: PhantomData<S>,
}

pub type DurationS64 = Duration<Seconds>;
pub type DurationMs64 = Duration<Milliseconds>;

impl<S: Scale> Duration<S> {
    pub(crate) fn new(ticks: i64) -> Self {
        Self {
            ticks,
            phantom: PhantomData,
        }
    }

    pub fn zero() -> Self {
        Self::new(0)
    }

    pub fn from_ticks(ticks: i64) -> Self {
        Self::new(ticks)
    }

    // The from_* constructors panic on tick overflow, like the arithmetic
    // operators below.

    pub fn from_days(days: i64) -> Self {
        Self::from_whole_seconds(days, SECONDS_PER_DAY)
    }

    pub fn from_hours(hours: i64) -> Self {
        Self::from_whole_seconds(hours, SECONDS_PER_HOUR)
    }

    pub fn from_minutes(minutes: i64) -> Self {
        Self::from_whole_seconds(minutes, SECONDS_PER_MINUTE)
    }

    pub fn from_seconds(seconds: i64) -> Self {
        Self::from_whole_seconds(seconds, 1)
    }

    /// At second scale the sub-second part is truncated toward zero.
    pub fn from_milliseconds(milliseconds: i64) -> Self {
        Self::new(millis_to_ticks::<S>(milliseconds))
    }

    fn from_whole_seconds(count: i64, seconds_per_unit: i64) -> Self {
        let ticks = count
            .checked_mul(seconds_per_unit * S::TICKS_PER_SECOND)
            .expect("duration overflow");
        Self::new(ticks)
    }

    pub fn ticks(&self) -> i64 {
        self.ticks
    }

    pub fn total_days(&self) -> i64 {
        self.ticks / (SECONDS_PER_DAY * S::TICKS_PER_SECOND)
    }

    pub fn total_hours(&self) -> i64 {
        self.ticks / (SECONDS_PER_HOUR * S::TICKS_PER_SECOND)
    }

    pub fn total_minutes(&self) -> i64 {
        self.ticks / (SECONDS_PER_MINUTE * S::TICKS_PER_SECOND)
    }

    pub fn total_seconds(&self) -> i64 {
        self.ticks / S::TICKS_PER_SECOND
    }

    pub fn total_milliseconds(&self) -> i64 {
        ticks_to_millis::<S>(self.ticks)
    }

    pub fn is_negative(&self) -> bool {
        self.ticks < 0
    }

    pub fn abs(&self) -> Self {
        Self::new(
            self.ticks
                .checked_abs()
                .expect("duration absolute value overflow"),
        )
    }

    /// Convert to a coarser scale, truncating toward zero.
    pub fn floor<S2: Scale>(&self) -> Duration<S2> {
        assert!(
            S2::TICKS_PER_SECOND <= S::TICKS_PER_SECOND,
            "Cannot floor to a higher scale"
        );
        let factor = S::TICKS_PER_SECOND / S2::TICKS_PER_SECOND;
        Duration::new(self.ticks / factor)
    }

    /// Convert to a finer scale, or `None` on overflow.
    pub fn extend<S2: Scale>(&self) -> Option<Duration<S2>> {
        assert!(
            S2::TICKS_PER_SECOND >= S::TICKS_PER_SECOND,
            "Cannot extend scale to a lower scale"
        );
        let factor = S2::TICKS_PER_SECOND / S::TICKS_PER_SECOND;
        Some(Duration::new(self.ticks.checked_mul(factor)?))
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(Self::new(self.ticks.checked_add(rhs.ticks)?))
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        Some(Self::new(self.ticks.checked_sub(rhs.ticks)?))
    }
}

impl<S: Scale> Add for Duration<S> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).expect("duration addition overflow")
    }
}

impl<S: Scale> Sub for Duration<S> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs).expect("duration subtraction overflow")
    }
}

impl<S: Scale> Mul<i64> for Duration<S> {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::new(
            self.ticks
                .checked_mul(rhs)
                .expect("duration multiplication overflow"),
        )
    }
}

impl<S: Scale> Neg for Duration<S> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(self.ticks.checked_neg().expect("duration negation overflow"))
    }
}

/// `[-]d.hh:mm:ss`, with `.fff` appended at millisecond scale.
impl<S: Scale> fmt::Display for Duration<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Unsigned magnitude, so i64::MIN ticks still render.
        let ticks = self.ticks.unsigned_abs();
        let ticks_per_second = S::TICKS_PER_SECOND as u64;
        let seconds = ticks / ticks_per_second;
        if self.is_negative() {
            write!(f, "-")?;
        }
        write!(
            f,
            "{}.{:02}:{:02}:{:02}",
            seconds / SECONDS_PER_DAY as u64,
            seconds / SECONDS_PER_HOUR as u64 % 24,
            seconds / SECONDS_PER_MINUTE as u64 % 60,
            seconds % 60
        )?;
        if ticks_per_second >= 1_000 {
            let subsecond = ticks % ticks_per_second;
            write!(f, ".{:03}", subsecond / (ticks_per_second / 1_000))?;
        }
        Ok(())
    }
}
