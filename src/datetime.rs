// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Timezone-aware instants.
//!
//! [`DateTime`] pairs an absolute instant with a [`Zone`].  Only the instant
//! and the zone are stored; the local date, time of day and UTC offset are
//! derived on demand from the timezone database.
//!
//! Arithmetic works on the **absolute** instant: adding one day across a DST
//! change moves the wall clock by 23 or 25 hours.  Equality and ordering
//! compare instants only, so the same moment seen from two zones is equal.

use crate::clock::{Clock, Precision};
use crate::date::Date;
use crate::delta::{TimeDelta, NANOS_PER_SECOND};
use crate::error::Result;
use crate::format::render;
use crate::time::Time;
use crate::zone::Zone;
use chrono::{Datelike, Timelike, Utc};
use chrono_tz::Tz;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

/// An absolute instant seen from a timezone.
#[derive(Debug, Copy, Clone)]
pub struct DateTime {
    instant: chrono::DateTime<Utc>,
    zone: Zone,
    precision: Precision,
}

impl DateTime {
    // ── constructors ──────────────────────────────────────────────────

    pub(crate) fn from_instant(
        instant: chrono::DateTime<Utc>,
        zone: Zone,
        precision: Precision,
    ) -> Self {
        Self {
            instant: precision.floor(instant),
            zone,
            precision,
        }
    }

    /// Current instant in the system zone.  Same as `now(None)`.
    pub fn today() -> Result<Self> {
        Clock::system().today()
    }

    /// Current instant in `timezone`, or in the system zone when `None`.
    pub fn now(timezone: Option<&str>) -> Result<Self> {
        Clock::system().now(timezone)
    }

    /// Current instant attached to UTC.
    pub fn utcnow() -> Self {
        Clock::system().utcnow()
    }

    /// See [`Clock::fromtimestamp`].
    pub fn fromtimestamp(timestamp: f64, timezone: Option<&str>) -> Result<Self> {
        Clock::system().fromtimestamp(timestamp, timezone)
    }

    /// See [`Clock::utcfromtimestamp`].
    pub fn utcfromtimestamp(timestamp: f64) -> Result<Self> {
        Clock::system().utcfromtimestamp(timestamp)
    }

    /// See [`Clock::strptime`].
    pub fn strptime(text: &str, format: &str) -> Result<Self> {
        Clock::system().strptime(text, format)
    }

    /// See [`Clock::combine`].
    pub fn combine(date: Date, time: Time, timezone: Option<&str>) -> Result<Self> {
        Clock::system().combine(date, time, timezone)
    }

    // ── instant, zone, precision ──────────────────────────────────────

    /// The absolute instant.
    pub fn instant(&self) -> chrono::DateTime<Utc> {
        self.instant
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Same instant floored to another precision.
    pub fn with_precision(self, precision: Precision) -> Self {
        Self::from_instant(self.instant, self.zone, precision)
    }

    /// Same instant seen from another zone.
    pub fn astimezone(self, zone: Zone) -> Self {
        Self { zone, ..self }
    }

    pub fn time_zone(&self) -> Zone {
        self.zone
    }

    /// IANA identifier of the attached zone.
    pub fn tzinfo(&self) -> &'static str {
        self.zone.name()
    }

    /// Offset from UTC in effect at this instant.
    pub fn utcoffset(&self) -> TimeDelta {
        TimeDelta::from_seconds(self.zone.offset_at(self.instant).into())
    }

    fn local(&self) -> chrono::DateTime<Tz> {
        self.instant.with_timezone(&self.zone.tz())
    }

    // ── local civil fields ────────────────────────────────────────────

    /// Local calendar date.
    pub fn date(&self) -> Date {
        Date::from_naive(self.local().date_naive())
    }

    /// Local time of day.
    pub fn time(&self) -> Time {
        Time::from_naive(self.local().time())
    }

    pub fn year(&self) -> i32 {
        self.local().year()
    }

    pub fn month(&self) -> u32 {
        self.local().month()
    }

    pub fn day(&self) -> u32 {
        self.local().day()
    }

    pub fn hour(&self) -> u32 {
        self.local().hour()
    }

    pub fn minute(&self) -> u32 {
        self.local().minute()
    }

    pub fn second(&self) -> u32 {
        self.local().second()
    }

    pub fn nanosecond(&self) -> u32 {
        self.local().nanosecond()
    }

    // ── epoch ─────────────────────────────────────────────────────────

    /// Nanoseconds since the Unix epoch.
    pub fn timestamp_nanos(&self) -> i128 {
        self.instant.timestamp() as i128 * NANOS_PER_SECOND
            + self.instant.timestamp_subsec_nanos() as i128
    }

    /// Seconds since the Unix epoch with six decimals, e.g.
    /// `"1497252490.028201"`.
    pub fn timestamp(&self) -> String {
        format!("{:.6}", self.timestamp_nanos() as f64 / 1e9)
    }

    // ── formatting ────────────────────────────────────────────────────

    /// Locale-style rendering (`%c`) of the local time.
    pub fn ctime(&self) -> String {
        self.local().format("%c").to_string()
    }

    /// `YYYY-MM-DD<sep>HH:MM:SS` in local time.
    pub fn isoformat(&self, sep: &str) -> String {
        let pattern = format!("%Y-%m-%d{}%H:%M:%S", sep.replace('%', "%%"));
        self.local().format(&pattern).to_string()
    }

    /// Format the local time with strftime specifiers (`%Z` is the zone
    /// abbreviation).
    ///
    /// # Errors
    /// [`Error::InvalidFormat`](crate::Error::InvalidFormat) for unknown
    /// specifiers.
    pub fn strftime(&self, format: &str) -> Result<String> {
        let local = self.local();
        render(format, |items| local.format_with_items(items))
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Shift the absolute instant; `None` outside the supported range.
    ///
    /// The result is floored to this value's precision, toward the past
    /// whatever the sign of `delta`.  At [`Precision::Seconds`] adding
    /// 1.5 s moves forward 1 s but subtracting it moves back 2 s, so
    /// `(t - d) + d == t` only holds for deltas that are whole ticks.
    pub fn checked_add(self, delta: TimeDelta) -> Option<Self> {
        let micros = i64::try_from(delta.total_micros()).ok()?;
        let instant = self
            .instant
            .checked_add_signed(chrono::TimeDelta::microseconds(micros))?;
        Some(Self::from_instant(instant, self.zone, self.precision))
    }

    /// Shift the absolute instant backwards; `None` outside the supported
    /// range.  Floors like [`checked_add`](Self::checked_add).
    pub fn checked_sub(self, delta: TimeDelta) -> Option<Self> {
        self.checked_add(-delta)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Comparison — by absolute instant only
// ═══════════════════════════════════════════════════════════════════════════

impl PartialEq for DateTime {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for DateTime {}

impl Ord for DateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl PartialOrd for DateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for DateTime {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.instant.hash(state);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Arithmetic
// ═══════════════════════════════════════════════════════════════════════════

/// # Panics
/// If the result is outside the supported range.
impl Add<TimeDelta> for DateTime {
    type Output = DateTime;

    fn add(self, rhs: TimeDelta) -> Self::Output {
        self.checked_add(rhs).expect("datetime out of range")
    }
}

impl Add<DateTime> for TimeDelta {
    type Output = DateTime;

    fn add(self, rhs: DateTime) -> Self::Output {
        rhs + self
    }
}

/// # Panics
/// If the result is outside the supported range.
impl Sub<TimeDelta> for DateTime {
    type Output = DateTime;

    fn sub(self, rhs: TimeDelta) -> Self::Output {
        self.checked_sub(rhs).expect("datetime out of range")
    }
}

/// Elapsed absolute time, whatever the attached zones.
impl Sub for DateTime {
    type Output = TimeDelta;

    fn sub(self, rhs: Self) -> Self::Output {
        TimeDelta::from_nanos(self.timestamp_nanos() - rhs.timestamp_nanos())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Display
// ═══════════════════════════════════════════════════════════════════════════

/// `YYYY-MM-DD HH:MM:SS[.f…] <abbreviation>`, with as many fractional
/// digits as the precision carries.
impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let local = self.local();
        write!(f, "{}", local.format("%Y-%m-%d %H:%M:%S"))?;
        let digits = self.precision.digits();
        if digits > 0 {
            let ticks = local.nanosecond() / self.precision.tick_nanos();
            write!(f, ".{ticks:0digits$}")?;
        }
        write!(f, " {}", local.format("%Z"))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
