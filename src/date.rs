// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar dates.
//!
//! [`Date`] is a proleptic-Gregorian `(year, month, day)` triple with no time
//! of day and no zone.  Arithmetic with a [`TimeDelta`] is **day-granular**:
//! only [`TimeDelta::days`] is applied, the sub-day components are dropped.

use crate::clock::Clock;
use crate::delta::TimeDelta;
use crate::error::{Error, Result};
use crate::format::render;
use chrono::{Datelike, NaiveDate, NaiveTime};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A valid calendar date.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(NaiveDate);

impl Date {
    // ── constructors ──────────────────────────────────────────────────

    /// # Errors
    /// [`Error::InvalidCalendarDate`] if the triple is not a real date.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(Error::InvalidCalendarDate { year, month, day })
    }

    /// Current date in the system zone.
    ///
    /// # Errors
    /// Fails if the system zone cannot be determined.
    pub fn today() -> Result<Self> {
        Clock::system().date_today()
    }

    /// Date, in the system zone, of a Unix timestamp.
    ///
    /// # Errors
    /// Fails if the system zone cannot be determined or the timestamp is out
    /// of range.
    pub fn fromtimestamp(timestamp: i64) -> Result<Self> {
        Clock::system().date_fromtimestamp(timestamp)
    }

    pub(crate) const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    pub(crate) const fn naive(&self) -> NaiveDate {
        self.0
    }

    // ── fields ────────────────────────────────────────────────────────

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// `1 ..= 12`.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// `1 ..= 31`.
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Monday = 0 … Sunday = 6.
    pub fn weekday(&self) -> u32 {
        self.0.weekday().num_days_from_monday()
    }

    /// Monday = 1 … Sunday = 7.
    pub fn isoweekday(&self) -> u32 {
        self.0.weekday().number_from_monday()
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Move forward by `delta.days()`; `None` outside the supported range.
    pub fn checked_add(self, delta: TimeDelta) -> Option<Self> {
        chrono::TimeDelta::try_days(delta.days())
            .and_then(|days| self.0.checked_add_signed(days))
            .map(Self)
    }

    /// Move backward by `delta.days()`; `None` outside the supported range.
    pub fn checked_sub(self, delta: TimeDelta) -> Option<Self> {
        chrono::TimeDelta::try_days(delta.days())
            .and_then(|days| self.0.checked_sub_signed(days))
            .map(Self)
    }

    // ── formatting ────────────────────────────────────────────────────

    /// `YYYY-MM-DD`.
    pub fn isoformat(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// Locale-style rendering (`%c`) at midnight.
    pub fn ctime(&self) -> String {
        self.at_midnight().format("%c").to_string()
    }

    /// Format with strftime specifiers; time specifiers see midnight.
    ///
    /// # Errors
    /// [`Error::InvalidFormat`] for unknown specifiers.
    pub fn strftime(&self, format: &str) -> Result<String> {
        let midnight = self.at_midnight();
        render(format, |items| midnight.format_with_items(items))
    }

    fn at_midnight(&self) -> chrono::NaiveDateTime {
        self.0.and_time(NaiveTime::MIN)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Operators
// ═══════════════════════════════════════════════════════════════════════════

/// # Panics
/// If the result is outside the supported calendar range.
impl Add<TimeDelta> for Date {
    type Output = Date;

    fn add(self, rhs: TimeDelta) -> Self::Output {
        self.checked_add(rhs).expect("date out of range")
    }
}

impl Add<Date> for TimeDelta {
    type Output = Date;

    fn add(self, rhs: Date) -> Self::Output {
        rhs + self
    }
}

/// # Panics
/// If the result is outside the supported calendar range.
impl Sub<TimeDelta> for Date {
    type Output = Date;

    fn sub(self, rhs: TimeDelta) -> Self::Output {
        self.checked_sub(rhs).expect("date out of range")
    }
}

/// Whole-day difference.
impl Sub for Date {
    type Output = TimeDelta;

    fn sub(self, rhs: Self) -> Self::Output {
        TimeDelta::from_days(self.0.signed_duration_since(rhs.0).num_days())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Display / FromStr / Serde
// ═══════════════════════════════════════════════════════════════════════════

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Parses `YYYY-MM-DD`.
impl FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|e| Error::ParseMismatch {
                text: s.to_owned(),
                format: "%Y-%m-%d".to_owned(),
                reason: e.to_string(),
            })
    }
}

#[cfg(feature = "serde")]
impl Serialize for Date {
    fn serialize<Ser>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_str(&self.isoformat())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IsoDate;

        impl de::Visitor<'_> for IsoDate {
            type Value = Date;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a YYYY-MM-DD date")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Date, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(IsoDate)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
