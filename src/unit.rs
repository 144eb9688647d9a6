/// Unit of a raw epoch value handed to [`Instant::from_epoch`](crate::Instant::from_epoch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EpochUnit {
    Seconds,
    Milliseconds,
}

/// Unit for [`Instant::add_time`](crate::Instant::add_time) and
/// [`Instant::diff`](crate::Instant::diff).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    /// Calendar month when adding; 30 days when measuring a difference.
    Month,
    /// Calendar year when adding; 365 days when measuring a difference.
    Year,
}

impl TimeUnit {
    /// Fixed length of the unit in milliseconds, using the approximations
    /// above for months and years.
    pub(crate) const fn approximate_millis(self) -> i64 {
        match self {
            TimeUnit::Millisecond => 1,
            TimeUnit::Second => 1_000,
            TimeUnit::Minute => 60_000,
            TimeUnit::Hour => 3_600_000,
            TimeUnit::Day => 86_400_000,
            TimeUnit::Week => 7 * 86_400_000,
            TimeUnit::Month => 30 * 86_400_000,
            TimeUnit::Year => 365 * 86_400_000,
        }
    }
}
