//! Offset-aware datetime utilities without timezone dependencies.
//!
//! Provides a lightweight `DateTime` struct for the timestamp handling a
//! sitemap feed needs: parse content-store timestamps and format them back
//! as ISO-8601 with an explicit UTC offset (`2024-06-15T14:30:45+02:00`).
//!
//! # Features
//!
//! - Zero external dependencies for date parsing
//! - Accepts `YYYY-MM-DD`, ISO `T` and MySQL-style space separators
//! - Validation with clear error messages
//! - Leap year handling
//!
//! # Examples
//!
//! ```ignore
//! let dt = DateTime::parse("2024-06-15 14:30:45").unwrap();
//! assert_eq!(dt.to_iso8601(), "2024-06-15T14:30:45+00:00");
//!
//! let dt = DateTime::parse("2024-06-15T14:30:45+02:00").unwrap();
//! assert_eq!(dt.offset_minutes, 120);
//! ```

use anyhow::{Result, bail};

/// Calendar datetime with a fixed UTC offset in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Offset from UTC in minutes; `Z` and missing offsets parse as 0.
    pub offset_minutes: i16,
}

impl DateTime {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            offset_minutes: 0,
        }
    }

    /// Parse `YYYY-MM-DD`, optionally followed by `THH:MM:SS` (or a space
    /// separator as MySQL exports use), optionally followed by `Z` or
    /// `+HH:MM`/`-HH:MM`.
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.trim().as_bytes();

        // Minimum: "YYYY-MM-DD" (10 chars)
        if bytes.len() < 10 {
            return None;
        }

        let year = parse_u16(&bytes[0..4])?;
        if bytes[4] != b'-' || bytes[7] != b'-' {
            return None;
        }
        let month = parse_u8(&bytes[5..7])?;
        let day = parse_u8(&bytes[8..10])?;

        let (hour, minute, second, rest) =
            if bytes.len() >= 19 && (bytes[10] == b'T' || bytes[10] == b' ') {
                if bytes[13] != b':' || bytes[16] != b':' {
                    return None;
                }
                (
                    parse_u8(&bytes[11..13])?,
                    parse_u8(&bytes[14..16])?,
                    parse_u8(&bytes[17..19])?,
                    &bytes[19..],
                )
            } else if bytes.len() == 10 {
                (0, 0, 0, &bytes[..0])
            } else {
                return None;
            };

        let offset_minutes = match rest {
            [] | [b'Z'] => 0,
            [sign @ (b'+' | b'-'), h1, h2, b':', m1, m2] => {
                let hours = parse_u8(&[*h1, *h2])?;
                let minutes = parse_u8(&[*m1, *m2])?;
                if hours > 23 || minutes > 59 {
                    return None;
                }
                let total = i16::from(hours) * 60 + i16::from(minutes);
                if *sign == b'-' { -total } else { total }
            }
            _ => return None,
        };

        let dt = Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            offset_minutes,
        };
        dt.validate().ok()?;
        Some(dt)
    }

    #[allow(clippy::trivially_copy_pass_by_ref)] // Method style is more idiomatic
    pub fn validate(&self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            ..
        } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        if second > 59 {
            bail!("second is invalid: {second}");
        }

        Ok(())
    }

    /// Format as ISO-8601 with an explicit offset, e.g.
    /// `2024-06-15T14:30:45+02:00`.
    pub fn to_iso8601(&self) -> String {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            offset_minutes,
        } = *self;

        let sign = if offset_minutes < 0 { '-' } else { '+' };
        let abs = offset_minutes.unsigned_abs();
        format!(
            "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}{sign}{:02}:{:02}",
            abs / 60,
            abs % 60
        )
    }

    const fn is_leap_year(year: u16) -> bool {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }

    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 => {
                if Self::is_leap_year(year) {
                    29
                } else {
                    28
                }
            }
            _ => 0,
        }
    }
}

/// Parse exactly the given ASCII digits as u16.
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    let mut value: u16 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value.checked_mul(10)?.checked_add(u16::from(b - b'0'))?;
    }
    Some(value)
}

/// Parse exactly the given ASCII digits as u8.
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    let mut value: u8 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value.checked_mul(10)?.checked_add(b - b'0')?;
    }
    Some(value)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let dt = DateTime::parse("2024-06-15").unwrap();
        assert_eq!(dt, DateTime::new(2024, 6, 15, 0, 0, 0));
        assert_eq!(dt.to_iso8601(), "2024-06-15T00:00:00+00:00");
    }

    #[test]
    fn test_parse_iso_separator() {
        let dt = DateTime::parse("2024-06-15T14:30:45Z").unwrap();
        assert_eq!(dt, DateTime::new(2024, 6, 15, 14, 30, 45));
    }

    #[test]
    fn test_parse_mysql_separator() {
        let dt = DateTime::parse("2024-06-15 14:30:45").unwrap();
        assert_eq!(dt.to_iso8601(), "2024-06-15T14:30:45+00:00");
    }

    #[test]
    fn test_parse_positive_offset() {
        let dt = DateTime::parse("2024-06-15T14:30:45+02:00").unwrap();
        assert_eq!(dt.offset_minutes, 120);
        assert_eq!(dt.to_iso8601(), "2024-06-15T14:30:45+02:00");
    }

    #[test]
    fn test_parse_negative_offset() {
        let dt = DateTime::parse("2024-06-15T14:30:45-05:30").unwrap();
        assert_eq!(dt.offset_minutes, -330);
        assert_eq!(dt.to_iso8601(), "2024-06-15T14:30:45-05:30");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(DateTime::parse("").is_none());
        assert!(DateTime::parse("2024").is_none());
        assert!(DateTime::parse("2024/06/15").is_none());
        assert!(DateTime::parse("2024-06-15T14:30").is_none());
        assert!(DateTime::parse("2024-06-15T14:30:45+2:00").is_none());
        assert!(DateTime::parse("not a date").is_none());
    }

    #[test]
    fn test_parse_rejects_invalid_fields() {
        assert!(DateTime::parse("2024-13-01").is_none());
        assert!(DateTime::parse("2024-00-01").is_none());
        assert!(DateTime::parse("2024-06-31").is_none());
        assert!(DateTime::parse("2024-06-15T24:00:00").is_none());
        assert!(DateTime::parse("2024-06-15T14:60:00").is_none());
        assert!(DateTime::parse("2024-06-15T14:30:45+25:00").is_none());
    }

    #[test]
    fn test_leap_year() {
        assert!(DateTime::parse("2024-02-29").is_some());
        assert!(DateTime::parse("2023-02-29").is_none());
        assert!(DateTime::parse("2000-02-29").is_some());
        assert!(DateTime::parse("1900-02-29").is_none());
    }

    #[test]
    fn test_validate_messages() {
        let dt = DateTime::new(2024, 2, 30, 0, 0, 0);
        let err = dt.validate().unwrap_err();
        assert!(err.to_string().contains("day is invalid"));
    }
}
