// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time of day without date or zone.

use crate::delta::{Span, NANOS_PER_SECOND, SECONDS_PER_DAY};
use crate::error::{Error, Result};
use crate::format::render;
use chrono::{NaiveTime, Timelike};
use std::fmt;

const NANOS_PER_DAY: i128 = SECONDS_PER_DAY as i128 * NANOS_PER_SECOND;

/// A wall-clock time (`hour:minute:second`).
///
/// Sub-second digits are kept but never formatted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Time(NaiveTime);

impl Time {
    /// Midnight.
    pub const MIDNIGHT: Self = Self(NaiveTime::MIN);

    /// Sum the spans and wrap the result into a single day.
    ///
    /// ```
    /// use civiltime::{Span, Time};
    ///
    /// let t = Time::new([Span::Hours(2), Span::Days(1), Span::Seconds(78)]).unwrap();
    /// assert_eq!(t.isoformat(), "02:01:18");
    /// ```
    ///
    /// # Errors
    /// [`Error::EmptyDurationConstruction`] when `spans` yields nothing.
    pub fn new<I>(spans: I) -> Result<Self>
    where
        I: IntoIterator<Item = Span>,
    {
        let mut spans = spans.into_iter().peekable();
        if spans.peek().is_none() {
            return Err(Error::EmptyDurationConstruction);
        }
        let total: i128 = spans.map(Span::as_nanos).sum();
        let of_day = total.rem_euclid(NANOS_PER_DAY);
        let secs = (of_day / NANOS_PER_SECOND) as u32;
        let nanos = (of_day % NANOS_PER_SECOND) as u32;
        NaiveTime::from_num_seconds_from_midnight_opt(secs, nanos)
            .map(Self)
            .ok_or(Error::InvalidTimeOfDay {
                hour: secs / 3_600,
                minute: secs / 60 % 60,
                second: secs % 60,
            })
    }

    /// # Errors
    /// [`Error::InvalidTimeOfDay`] outside `00:00:00 ..= 23:59:59`.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Result<Self> {
        NaiveTime::from_hms_opt(hour, minute, second)
            .map(Self)
            .ok_or(Error::InvalidTimeOfDay {
                hour,
                minute,
                second,
            })
    }

    pub(crate) const fn from_naive(time: NaiveTime) -> Self {
        Self(time)
    }

    pub(crate) const fn naive(&self) -> NaiveTime {
        self.0
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    /// `HH:MM:SS`.
    pub fn isoformat(&self) -> String {
        self.0.format("%H:%M:%S").to_string()
    }

    /// Format with strftime specifiers; date specifiers are rejected.
    ///
    /// # Errors
    /// [`Error::InvalidFormat`] for unknown or date-only specifiers.
    pub fn strftime(&self, format: &str) -> Result<String> {
        render(format, |items| self.0.format_with_items(items))
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.isoformat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_span() {
        let t = Time::new([Span::Hours(2)]).unwrap();
        assert_eq!((t.hour(), t.minute(), t.second()), (2, 0, 0));
        assert_eq!(t.to_string(), "02:00:00");
    }

    #[test]
    fn spans_wrap_around_midnight() {
        let t = Time::new([Span::Hours(2), Span::Days(1), Span::Seconds(78)]).unwrap();
        assert_eq!(t.isoformat(), "02:01:18");

        let t = Time::new([Span::Minutes(-30)]).unwrap();
        assert_eq!(t.isoformat(), "23:30:00");
    }

    #[test]
    fn sub_second_digits_are_not_formatted() {
        let t = Time::new([Span::Seconds(5), Span::Microseconds(250_000)]).unwrap();
        assert_eq!(t.isoformat(), "00:00:05");
    }

    #[test]
    fn empty_input_and_bad_fields_are_rejected() {
        assert_eq!(Time::new([]), Err(Error::EmptyDurationConstruction));
        assert_eq!(
            Time::from_hms(24, 0, 0),
            Err(Error::InvalidTimeOfDay {
                hour: 24,
                minute: 0,
                second: 0
            })
        );
    }

    #[test]
    fn strftime_uses_time_specifiers() {
        let t = Time::from_hms(16, 30, 5).unwrap();
        assert_eq!(t.strftime("%I:%M %p").unwrap(), "04:30 PM");
        assert!(matches!(t.strftime("%Q"), Err(Error::InvalidFormat(_))));
        assert!(matches!(t.strftime("%Y"), Err(Error::InvalidFormat(_))));
    }
}
