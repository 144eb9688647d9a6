//! Thin wrappers around the C library's calendar routines.
//!
//! Every breakdown goes through the reentrant `*_r` forms with a caller-owned
//! `tm`, so concurrent calls from independent threads never share storage.

use std::ffi::CString;

use log::{debug, trace};

const STRFTIME_INITIAL_CAPACITY: usize = 64;
const STRFTIME_MAX_CAPACITY: usize = 64 * 1024;

pub(crate) fn empty_tm() -> libc::tm {
    // SAFETY: libc::tm is a plain C struct; all-zero is a valid value (the
    // optional zone pointer becomes null).
    unsafe { std::mem::zeroed() }
}

/// Build a `tm` for the normalizer from absolute calendar fields.
///
/// Returns `None` if `year - 1900` does not fit in the C `int`.
pub(crate) fn tm_from_fields(
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
    minute: i32,
    second: i32,
) -> Option<libc::tm> {
    let mut tm = empty_tm();
    tm.tm_year = year.checked_sub(1900)?;
    tm.tm_mon = month.checked_sub(1)?;
    tm.tm_mday = day;
    tm.tm_hour = hour;
    tm.tm_min = minute;
    tm.tm_sec = second;
    Some(tm)
}

/// Normalize local calendar fields into seconds since the Unix epoch (`mktime`).
///
/// Out-of-range fields roll over into their neighbours. `tm` is updated with
/// the normalized fields on success.
pub(crate) fn normalize_local(tm: &mut libc::tm) -> Option<i64> {
    tm.tm_isdst = -1;
    // mktime writes tm_wday on success, so a surviving sentinel tells a real
    // failure apart from the valid instant one second before the epoch.
    tm.tm_wday = -1;
    // SAFETY: tm is a valid, exclusively borrowed struct.
    let seconds = unsafe { libc::mktime(tm) };
    if seconds == -1 && tm.tm_wday == -1 {
        debug!(
            "mktime could not represent {}-{}-{} {}:{}:{}",
            tm.tm_year as i64 + 1900,
            tm.tm_mon + 1,
            tm.tm_mday,
            tm.tm_hour,
            tm.tm_min,
            tm.tm_sec
        );
        None
    } else {
        Some(seconds as i64)
    }
}

/// Local-time breakdown of `seconds` since the epoch (`localtime_r`).
pub(crate) fn local_breakdown(seconds: i64) -> Option<libc::tm> {
    let time: libc::time_t = seconds.try_into().ok()?;
    let mut tm = empty_tm();
    // SAFETY: both pointers refer to live, caller-owned values.
    let result = unsafe { libc::localtime_r(&time, &mut tm) };
    if result.is_null() {
        None
    } else {
        Some(tm)
    }
}

/// UTC breakdown of `seconds` since the epoch (`gmtime_r`).
pub(crate) fn utc_breakdown(seconds: i64) -> Option<libc::tm> {
    let time: libc::time_t = seconds.try_into().ok()?;
    let mut tm = empty_tm();
    // SAFETY: both pointers refer to live, caller-owned values.
    let result = unsafe { libc::gmtime_r(&time, &mut tm) };
    if result.is_null() {
        None
    } else {
        Some(tm)
    }
}

/// Render `tm` through the platform `strftime`.
///
/// An empty string comes back when the format contains an interior NUL or the
/// output would exceed the internal size limit.
pub(crate) fn strftime(format: &str, tm: &libc::tm) -> String {
    if format.is_empty() {
        return String::new();
    }
    let c_format = match CString::new(format) {
        Ok(c_format) => c_format,
        Err(_) => {
            debug!("strftime format {:?} contains a NUL byte", format);
            return String::new();
        }
    };

    let mut capacity = STRFTIME_INITIAL_CAPACITY.max(format.len() * 4);
    while capacity <= STRFTIME_MAX_CAPACITY {
        let mut buffer = vec![0u8; capacity];
        // SAFETY: buffer has `capacity` writable bytes; strftime writes at most
        // that many including the terminating NUL.
        let len = unsafe {
            libc::strftime(
                buffer.as_mut_ptr() as *mut libc::c_char,
                capacity,
                c_format.as_ptr(),
                tm,
            )
        };
        if len > 0 {
            buffer.truncate(len);
            return String::from_utf8_lossy(&buffer).into_owned();
        }
        trace!("strftime output did not fit in {} bytes", capacity);
        capacity *= 2;
    }
    debug!("strftime output for {:?} is empty or too large", format);
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utc_breakdown_of_epoch() {
        let tm = utc_breakdown(0).unwrap();
        assert_eq!(tm.tm_year, 70);
        assert_eq!(tm.tm_mon, 0);
        assert_eq!(tm.tm_mday, 1);
        assert_eq!(tm.tm_hour, 0);
        assert_eq!(tm.tm_wday, 4); // Thursday
        assert_eq!(tm.tm_yday, 0);
    }

    #[test]
    fn normalize_round_trips_local_breakdown() {
        let mut tm = tm_from_fields(2024, 12, 25, 15, 30, 45).unwrap();
        let seconds = normalize_local(&mut tm).unwrap();
        let local = local_breakdown(seconds).unwrap();
        assert_eq!(local.tm_year, 124);
        assert_eq!(local.tm_mon, 11);
        assert_eq!(local.tm_mday, 25);
        assert_eq!(local.tm_hour, 15);
        assert_eq!(local.tm_min, 30);
        assert_eq!(local.tm_sec, 45);
    }

    #[test]
    fn normalize_rolls_month_over() {
        let mut tm = tm_from_fields(2024, 13, 1, 12, 0, 0).unwrap();
        normalize_local(&mut tm).unwrap();
        assert_eq!(tm.tm_year, 125);
        assert_eq!(tm.tm_mon, 0);
        assert_eq!(tm.tm_mday, 1);
    }

    #[test]
    fn tm_from_fields_rejects_int_overflow() {
        assert!(tm_from_fields(i32::MIN, 1, 1, 0, 0, 0).is_none());
    }

    #[test]
    fn strftime_formats_and_grows() {
        let tm = utc_breakdown(0).unwrap();
        assert_eq!(strftime("%Y-%m-%d %H:%M:%S", &tm), "1970-01-01 00:00:00");
        assert_eq!(strftime("", &tm), "");
        assert_eq!(strftime("a\0b", &tm), "");

        let long = "%Y".repeat(100);
        assert_eq!(strftime(&long, &tm), "1970".repeat(100));
    }
}
