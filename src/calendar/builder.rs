use std::marker::PhantomData;

use log::debug;

use crate::error::{Error, Result};
use crate::{Instant, Scale};

/// Step-by-step construction of an [`Instant`] from local calendar fields.
///
/// Only the year is mandatory. Month and day default to 1, the time of day to
/// midnight. Fields are normalized rather than validated, so `.month(13)` rolls
/// into January of the following year.
#[derive(Debug, Clone)]
pub struct InstantBuilder<S: Scale> {
    year: Option<i32>,
    month: Option<i32>,
    day: Option<i32>,
    hour: Option<i32>,
    minute: Option<i32>,
    second: Option<i32>,
    millisecond: Option<i32>,
    phantom: PhantomData<S>,
}

impl<S: Scale> Default for InstantBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scale> InstantBuilder<S> {
    pub fn new() -> Self {
        InstantBuilder {
            year: None,
            month: None,
            day: None,
            hour: None,
            minute: None,
            second: None,
            millisecond: None,
            phantom: PhantomData,
        }
    }

    pub fn year(&mut self, year: i32) -> &mut Self {
        self.year = Some(year);
        self
    }

    pub fn month(&mut self, month: i32) -> &mut Self {
        self.month = Some(month);
        self
    }

    pub fn day(&mut self, day: i32) -> &mut Self {
        self.day = Some(day);
        self
    }

    pub fn hour(&mut self, hour: i32) -> &mut Self {
        self.hour = Some(hour);
        self
    }

    pub fn minute(&mut self, minute: i32) -> &mut Self {
        self.minute = Some(minute);
        self
    }

    pub fn second(&mut self, second: i32) -> &mut Self {
        self.second = Some(second);
        self
    }

    /// Clamped to 0-999 when building.
    pub fn millisecond(&mut self, millisecond: i32) -> &mut Self {
        self.millisecond = Some(millisecond);
        self
    }

    /// # Panics
    ///
    /// Panics if [`checked_build`](Self::checked_build) fails.
    pub fn build(&self) -> Instant<S> {
        match self.checked_build() {
            Ok(instant) => instant,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn checked_build(&self) -> Result<Instant<S>> {
        let month = self.month.unwrap_or(1);
        let day = self.day.unwrap_or(1);
        let hour = self.hour.unwrap_or(0);
        let minute = self.minute.unwrap_or(0);
        let second = self.second.unwrap_or(0);
        let Some(year) = self.year else {
            debug!("instant builder used without a year");
            return Err(Error::InvalidComponents {
                year: 0,
                month,
                day,
                hour,
                minute,
                second,
            });
        };
        Instant::from_components_ms(
            year,
            month,
            day,
            hour,
            minute,
            second,
            self.millisecond.unwrap_or(0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InstantMs64, InstantS64};

    #[test]
    fn test_builder() {
        let instant = InstantMs64::builder()
            .year(2024)
            .month(12)
            .day(25)
            .hour(15)
            .minute(30)
            .second(45)
            .millisecond(123)
            .build();
        assert_eq!(instant.year(), 2024);
        assert_eq!(instant.month(), 12);
        assert_eq!(instant.day(), 25);
        assert_eq!(instant.hour(), 15);
        assert_eq!(instant.minute(), 30);
        assert_eq!(instant.second(), 45);
        assert_eq!(instant.millisecond(), 123);

        // Defaults to the start of the year.
        let instant = InstantS64::builder().year(2000).build();
        assert_eq!(instant.month(), 1);
        assert_eq!(instant.day(), 1);
        assert_eq!(instant.hour(), 0);
        assert_eq!(instant.minute(), 0);
        assert_eq!(instant.second(), 0);

        // Out of range fields roll over.
        let instant = InstantS64::builder().year(2024).month(13).day(1).hour(12).build();
        assert_eq!(instant.year(), 2025);
        assert_eq!(instant.month(), 1);
        assert_eq!(instant.day(), 1);

        // Millisecond is clamped.
        let instant = InstantMs64::builder()
            .year(2024)
            .month(6)
            .day(1)
            .hour(12)
            .millisecond(5000)
            .build();
        assert_eq!(instant.millisecond(), 999);
        assert_eq!(instant.second(), 0);
    }

    #[test]
    fn test_checked_build_errors() {
        let result = InstantS64::builder().month(1).day(1).checked_build();
        assert!(matches!(result, Err(Error::InvalidComponents { year: 0, .. })));

        let result = InstantS64::builder().year(10_000).month(1).day(1).checked_build();
        assert!(matches!(
            result,
            Err(Error::InvalidComponents { year: 10_000, .. })
        ));

        let result = InstantS64::builder().year(1800).checked_build();
        assert!(result.is_err());
    }

    #[test]
    #[should_panic]
    fn test_build_panics_without_year() {
        InstantS64::builder().day(3).build();
    }
}
