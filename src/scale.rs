use std::fmt::Debug;
use std::hash::Hash;

use num_integer::Integer;

/// Base unit of an [`Instant`](crate::Instant) or [`Duration`](crate::Duration).
///
/// The unit is fixed per type, so an `Instant<Seconds>` can never carry
/// milliseconds and arithmetic between the two scales needs an explicit
/// conversion.
pub trait Scale: Debug + Clone + Copy + Ord + PartialOrd + Eq + PartialEq + Hash + Sized {
    const TICKS_PER_SECOND: i64;
}

#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Seconds;

#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Milliseconds;

impl Scale for Seconds {
    const TICKS_PER_SECOND: i64 = 1;
}

impl Scale for Milliseconds {
    const TICKS_PER_SECOND: i64 = 1_000;
}

/// Convert a millisecond count into ticks of `S`, truncating toward zero.
pub(crate) fn millis_to_ticks<S: Scale>(milliseconds: i64) -> i64 {
    if S::TICKS_PER_SECOND >= 1_000 {
        milliseconds * (S::TICKS_PER_SECOND / 1_000)
    } else {
        milliseconds / (1_000 / S::TICKS_PER_SECOND)
    }
}

/// Convert a millisecond count into ticks of `S`, rounding toward negative
/// infinity so that instants before the epoch land on the right second.
pub(crate) fn millis_to_ticks_floor<S: Scale>(milliseconds: i64) -> i64 {
    if S::TICKS_PER_SECOND >= 1_000 {
        milliseconds * (S::TICKS_PER_SECOND / 1_000)
    } else {
        milliseconds.div_floor(&(1_000 / S::TICKS_PER_SECOND))
    }
}

/// Convert a tick count of `S` into milliseconds.
pub(crate) fn ticks_to_millis<S: Scale>(ticks: i64) -> i64 {
    if S::TICKS_PER_SECOND >= 1_000 {
        ticks / (S::TICKS_PER_SECOND / 1_000)
    } else {
        ticks * (1_000 / S::TICKS_PER_SECOND)
    }
}
