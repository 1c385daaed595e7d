// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Construction configuration: tick precision and the local-zone source.
//!
//! A [`Clock`] bundles the two settings every "current time" or
//! "interpret as local time" entry point depends on:
//!
//! - a [`Precision`], the tick resolution every produced [`DateTime`] is
//!   floored to;
//! - a [`ZoneProvider`], the answer to "what is the local zone?".
//!
//! The inherent constructors (`DateTime::now`, `Date::today`, …) use
//! [`Clock::system`].  Tests and embedders build their own clock:
//!
//! ```
//! use civiltime::{Clock, FixedZone, Precision, Zone};
//!
//! let clock = Clock::with_zones(FixedZone(Zone::UTC)).with_precision(Precision::Seconds);
//! let dt = clock.fromtimestamp(1_497_252_490.0282006, None).unwrap();
//! assert_eq!(dt.to_string(), "2017-06-12 07:28:10 UTC");
//! ```

use crate::date::Date;
use crate::datetime::DateTime;
use crate::error::{Error, Result};
use crate::time::Time;
use crate::zone::{SystemZone, Zone, ZoneProvider};
use chrono::format::ParseErrorKind;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};

// ═══════════════════════════════════════════════════════════════════════════
// Precision
// ═══════════════════════════════════════════════════════════════════════════

/// Sub-second tick resolution of a [`DateTime`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Precision {
    Seconds,
    Milliseconds,
    Microseconds,
    #[default]
    Nanoseconds,
}

impl Precision {
    /// Length of one tick in nanoseconds.
    pub const fn tick_nanos(self) -> u32 {
        match self {
            Precision::Seconds => 1_000_000_000,
            Precision::Milliseconds => 1_000_000,
            Precision::Microseconds => 1_000,
            Precision::Nanoseconds => 1,
        }
    }

    /// Number of fractional digits printed for this precision.
    pub const fn digits(self) -> usize {
        match self {
            Precision::Seconds => 0,
            Precision::Milliseconds => 3,
            Precision::Microseconds => 6,
            Precision::Nanoseconds => 9,
        }
    }

    /// Round `instant` down to a whole tick.
    pub(crate) fn floor(self, instant: chrono::DateTime<Utc>) -> chrono::DateTime<Utc> {
        let nanos = instant.timestamp_subsec_nanos();
        instant
            .with_nanosecond(nanos - nanos % self.tick_nanos())
            .unwrap_or(instant)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Clock
// ═══════════════════════════════════════════════════════════════════════════

/// Entry point for every construction path that needs "now", a timestamp,
/// or the local zone.
#[derive(Debug, Copy, Clone, Default)]
pub struct Clock<Z = SystemZone> {
    precision: Precision,
    zones: Z,
}

impl Clock<SystemZone> {
    /// Nanosecond precision, operating-system zone.
    pub fn system() -> Self {
        Self::with_zones(SystemZone)
    }
}

impl<Z: ZoneProvider> Clock<Z> {
    /// Nanosecond precision, local zone taken from `zones`.
    pub fn with_zones(zones: Z) -> Self {
        Self {
            precision: Precision::default(),
            zones,
        }
    }

    pub fn with_precision(self, precision: Precision) -> Self {
        Self { precision, ..self }
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// The zone local times are interpreted in.
    pub fn current_zone(&self) -> Result<Zone> {
        self.zones.current_zone()
    }

    fn zone_or_current(&self, timezone: Option<&str>) -> Result<Zone> {
        match timezone {
            Some(name) => Zone::new(name),
            None => self.current_zone(),
        }
    }

    // ── DateTime ──────────────────────────────────────────────────────

    /// Current instant in the local zone.
    pub fn today(&self) -> Result<DateTime> {
        self.now(None)
    }

    /// Current instant in `timezone`, or in the local zone when `None`.
    ///
    /// # Errors
    /// [`Error::UnknownTimezone`] for an unrecognised identifier.
    pub fn now(&self, timezone: Option<&str>) -> Result<DateTime> {
        let zone = self.zone_or_current(timezone)?;
        Ok(DateTime::from_instant(Utc::now(), zone, self.precision))
    }

    /// Current instant in UTC; the local zone is never consulted.
    pub fn utcnow(&self) -> DateTime {
        DateTime::from_instant(Utc::now(), Zone::UTC, self.precision)
    }

    /// Instant of a (fractional) Unix timestamp, shown in `timezone` or in
    /// the local zone.
    ///
    /// The fraction is truncated to nanoseconds; far from the epoch an `f64`
    /// cannot carry that many digits and the low ones are noise.
    ///
    /// # Errors
    /// [`Error::TimestampOutOfRange`] for non-finite or huge values,
    /// [`Error::UnknownTimezone`] for an unrecognised identifier.
    pub fn fromtimestamp(&self, timestamp: f64, timezone: Option<&str>) -> Result<DateTime> {
        let instant = instant_from_timestamp(timestamp)?;
        let zone = self.zone_or_current(timezone)?;
        Ok(DateTime::from_instant(instant, zone, self.precision))
    }

    /// Same as [`fromtimestamp`](Self::fromtimestamp), attached to UTC.
    pub fn utcfromtimestamp(&self, timestamp: f64) -> Result<DateTime> {
        let instant = instant_from_timestamp(timestamp)?;
        Ok(DateTime::from_instant(instant, Zone::UTC, self.precision))
    }

    /// Parse `text` as a civil **local** time and anchor it in the local zone.
    ///
    /// A format without time fields yields local midnight.
    ///
    /// # Errors
    /// [`Error::ParseMismatch`] when `text` does not follow `format`.
    pub fn strptime(&self, text: &str, format: &str) -> Result<DateTime> {
        let local = parse_local(text, format)?;
        let zone = self.current_zone()?;
        let instant = zone.resolve_local(local)?;
        Ok(DateTime::from_instant(instant, zone, self.precision))
    }

    /// Anchor a civil date and time in `timezone` (local zone when `None`).
    pub fn combine(&self, date: Date, time: Time, timezone: Option<&str>) -> Result<DateTime> {
        let zone = self.zone_or_current(timezone)?;
        let instant = zone.resolve_local(date.naive().and_time(time.naive()))?;
        Ok(DateTime::from_instant(instant, zone, self.precision))
    }

    // ── Date ──────────────────────────────────────────────────────────

    /// Current calendar date in the local zone.
    pub fn date_today(&self) -> Result<Date> {
        let zone = self.current_zone()?;
        Ok(Date::from_naive(zone.civil_local_time(Utc::now()).date()))
    }

    /// Calendar date, in the local zone, of a Unix timestamp.
    pub fn date_fromtimestamp(&self, timestamp: i64) -> Result<Date> {
        let instant =
            chrono::DateTime::from_timestamp(timestamp, 0).ok_or(Error::TimestampOutOfRange)?;
        let zone = self.current_zone()?;
        Ok(Date::from_naive(zone.civil_local_time(instant).date()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════════

fn instant_from_timestamp(timestamp: f64) -> Result<chrono::DateTime<Utc>> {
    if !timestamp.is_finite() {
        return Err(Error::TimestampOutOfRange);
    }
    let secs = timestamp.floor();
    if secs < i64::MIN as f64 || secs >= i64::MAX as f64 {
        return Err(Error::TimestampOutOfRange);
    }
    let nanos = (((timestamp - secs) * 1e9) as u32).min(999_999_999);
    chrono::DateTime::from_timestamp(secs as i64, nanos).ok_or(Error::TimestampOutOfRange)
}

fn parse_local(text: &str, format: &str) -> Result<NaiveDateTime> {
    let mismatch = |e: chrono::ParseError| Error::ParseMismatch {
        text: text.to_owned(),
        format: format.to_owned(),
        reason: e.to_string(),
    };

    match NaiveDateTime::parse_from_str(text, format) {
        Ok(local) => Ok(local),
        Err(e) if e.kind() == ParseErrorKind::NotEnough => NaiveDate::parse_from_str(text, format)
            .map(|date| date.and_time(NaiveTime::MIN))
            .map_err(|_| mismatch(e)),
        Err(e) => Err(mismatch(e)),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::FixedZone;

    fn utc_clock() -> Clock<FixedZone> {
        Clock::with_zones(FixedZone(Zone::UTC))
    }

    #[test]
    fn precision_floors_sub_second_digits() {
        let instant = chrono::DateTime::from_timestamp(10, 123_456_789).unwrap();
        let floored = |p: Precision| p.floor(instant).timestamp_subsec_nanos();
        assert_eq!(floored(Precision::Seconds), 0);
        assert_eq!(floored(Precision::Milliseconds), 123_000_000);
        assert_eq!(floored(Precision::Microseconds), 123_456_000);
        assert_eq!(floored(Precision::Nanoseconds), 123_456_789);
    }

    #[test]
    fn precision_floors_before_the_epoch() {
        // -0.5 s is 1969-12-31 23:59:59.5; flooring to seconds goes to -1 s.
        let instant = chrono::DateTime::from_timestamp(-1, 500_000_000).unwrap();
        assert_eq!(Precision::Seconds.floor(instant).timestamp(), -1);
    }

    #[test]
    fn fractional_timestamps_keep_nanoseconds() {
        let instant = instant_from_timestamp(1_497_252_490.0282006).unwrap();
        assert_eq!(instant.timestamp(), 1_497_252_490);
        assert_eq!(instant.timestamp_subsec_nanos(), 28_200_626);

        let before_epoch = instant_from_timestamp(-1.25).unwrap();
        assert_eq!(before_epoch.timestamp(), -2);
        assert_eq!(before_epoch.timestamp_subsec_nanos(), 750_000_000);
    }

    #[test]
    fn non_finite_timestamps_are_rejected() {
        for ts in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e300] {
            assert_eq!(instant_from_timestamp(ts), Err(Error::TimestampOutOfRange));
        }
    }

    #[test]
    fn now_without_zone_uses_the_provider() {
        let tehran = Zone::new("Asia/Tehran").unwrap();
        let clock = Clock::with_zones(FixedZone(tehran));
        assert_eq!(clock.now(None).unwrap().time_zone(), tehran);
        assert_eq!(clock.today().unwrap().time_zone(), tehran);
        assert_eq!(clock.utcnow().time_zone(), Zone::UTC);
    }

    #[test]
    fn now_floors_to_configured_precision() {
        let clock = utc_clock().with_precision(Precision::Milliseconds);
        assert_eq!(clock.precision(), Precision::Milliseconds);
        assert_eq!(clock.utcnow().nanosecond() % 1_000_000, 0);
    }

    #[test]
    fn unknown_zone_is_an_error_not_a_fallback() {
        assert_eq!(
            utc_clock().now(Some("Nowhere/Land")).unwrap_err(),
            Error::UnknownTimezone("Nowhere/Land".into())
        );
        assert!(utc_clock().fromtimestamp(0.0, Some("Nowhere/Land")).is_err());
    }

    #[test]
    fn strptime_reads_local_civil_time() {
        let dt = utc_clock().strptime("21/11/92 16:30", "%d/%m/%y %H:%M").unwrap();
        assert_eq!(dt.to_string(), "1992-11-21 16:30:00.000000000 UTC");

        let berlin = Clock::with_zones(FixedZone(Zone::new("Europe/Berlin").unwrap()));
        let dt = berlin.strptime("21/11/06 16:30", "%d/%m/%y %H:%M").unwrap();
        assert_eq!(dt.instant().to_rfc3339(), "2006-11-21T15:30:00+00:00");
    }

    #[test]
    fn strptime_date_only_is_midnight() {
        let dt = utc_clock().strptime("2017-06-09", "%Y-%m-%d").unwrap();
        assert_eq!(dt.isoformat("T"), "2017-06-09T00:00:00");
    }

    #[test]
    fn strptime_mismatch_is_distinct() {
        let err = utc_clock()
            .strptime("21-11-92 16:30", "%d/%m/%y %H:%M")
            .unwrap_err();
        assert!(matches!(err, Error::ParseMismatch { .. }));

        let err = utc_clock().strptime("16:30", "%H:%M").unwrap_err();
        assert!(matches!(err, Error::ParseMismatch { .. }));
    }

    #[test]
    fn combine_resolves_in_named_zone() {
        let date = Date::new(2021, 10, 31).unwrap();
        let time = Time::from_hms(2, 30, 0).unwrap();
        let dt = utc_clock().combine(date, time, Some("Europe/Berlin")).unwrap();
        assert_eq!(dt.to_string(), "2021-10-31 02:30:00.000000000 CEST");
    }

    #[test]
    fn date_today_matches_datetime_date() {
        let clock = utc_clock();
        let before = clock.date_today().unwrap();
        let now = clock.today().unwrap().date();
        let after = clock.date_today().unwrap();
        assert!(before <= now && now <= after);
    }
}
