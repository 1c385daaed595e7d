// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Normalised signed durations.
//!
//! [`TimeDelta`] stores a span of time as a `(days, seconds, microseconds)`
//! triple.  The triple is always derived from a single signed total by
//! **truncating** division (see [`normalize`]), so all three components
//! share the sign of the total:
//!
//! ```text
//! -25 h  →  (-1 days, -3600 s, 0 µs)      // not (-2 days, 82800 s, 0 µs)
//! ```
//!
//! This differs on purpose from floor-based schemes that keep the sub-day
//! residual non-negative.
//!
//! A duration is built from one or more [`Span`]s, which are summed exactly
//! (in nanoseconds) before being decomposed, so the order of the inputs
//! never matters.

use crate::error::{Error, Result};
use qtty::{Day, Days, Second, Seconds};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub(crate) const SECONDS_PER_DAY: i64 = 86_400;
pub(crate) const MICROS_PER_SECOND: i128 = 1_000_000;
pub(crate) const MICROS_PER_DAY: i128 = SECONDS_PER_DAY as i128 * MICROS_PER_SECOND;
pub(crate) const NANOS_PER_MICRO: i128 = 1_000;
pub(crate) const NANOS_PER_SECOND: i128 = 1_000_000_000;
const NANOS_PER_DAY: i128 = SECONDS_PER_DAY as i128 * NANOS_PER_SECOND;

// ═══════════════════════════════════════════════════════════════════════════
// Span — one scaled input
// ═══════════════════════════════════════════════════════════════════════════

/// A single scaled time-span input ("3 hours", "-250 microseconds", ...).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Span {
    /// Seven-day weeks.
    Weeks(i64),
    /// 86 400-second days.
    Days(i64),
    /// 3 600-second hours.
    Hours(i64),
    /// 60-second minutes.
    Minutes(i64),
    /// SI seconds.
    Seconds(i64),
    /// Milliseconds (10⁻³ s).
    Milliseconds(i64),
    /// Microseconds (10⁻⁶ s), the finest stored resolution.
    Microseconds(i64),
    /// Nanoseconds (10⁻⁹ s); truncated toward zero when stored.
    Nanoseconds(i64),
}

impl Span {
    /// Exact length of the span in nanoseconds.
    pub const fn as_nanos(self) -> i128 {
        match self {
            Span::Weeks(n) => n as i128 * 7 * NANOS_PER_DAY,
            Span::Days(n) => n as i128 * NANOS_PER_DAY,
            Span::Hours(n) => n as i128 * 3_600 * NANOS_PER_SECOND,
            Span::Minutes(n) => n as i128 * 60 * NANOS_PER_SECOND,
            Span::Seconds(n) => n as i128 * NANOS_PER_SECOND,
            Span::Milliseconds(n) => n as i128 * 1_000_000,
            Span::Microseconds(n) => n as i128 * NANOS_PER_MICRO,
            Span::Nanoseconds(n) => n as i128,
        }
    }
}

/// Rounds a fractional quantity of seconds to the nearest nanosecond.
///
/// Values beyond ±292 years saturate.
impl From<Seconds> for Span {
    fn from(seconds: Seconds) -> Self {
        Span::Nanoseconds((seconds.value() * 1e9).round() as i64)
    }
}

impl From<Days> for Span {
    fn from(days: Days) -> Self {
        Span::from(days.to::<Second>())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Normalisation
// ═══════════════════════════════════════════════════════════════════════════

/// Decompose a signed total of microseconds into `(days, seconds, micros)`.
///
/// Each step truncates toward zero, so every component carries the sign of
/// `total_micros` and `|seconds| < 86 400`, `|micros| < 1 000 000`.
///
/// ```
/// use civiltime::normalize;
///
/// assert_eq!(normalize(90_000_000_001), (1, 3_600, 1));
/// assert_eq!(normalize(-90_000_000_001), (-1, -3_600, -1));
/// ```
pub fn normalize(total_micros: i128) -> (i64, i64, i64) {
    let days = total_micros / MICROS_PER_DAY;
    let rest = total_micros - days * MICROS_PER_DAY;
    let seconds = rest / MICROS_PER_SECOND;
    let micros = rest - seconds * MICROS_PER_SECOND;
    (days as i64, seconds as i64, micros as i64)
}

/// [`normalize`], or `None` when the day count does not fit in an `i64`.
///
/// ```
/// use civiltime::checked_normalize;
///
/// assert_eq!(checked_normalize(-1), Some((0, 0, -1)));
/// assert_eq!(checked_normalize(i128::MAX), None);
/// ```
pub fn checked_normalize(total_micros: i128) -> Option<(i64, i64, i64)> {
    let days = i64::try_from(total_micros / MICROS_PER_DAY).ok()?;
    let (_, seconds, micros) = normalize(total_micros % MICROS_PER_DAY);
    Some((days, seconds, micros))
}

// ═══════════════════════════════════════════════════════════════════════════
// TimeDelta
// ═══════════════════════════════════════════════════════════════════════════

/// A normalised signed span of time with microsecond resolution.
///
/// Immutable: every arithmetic operation produces a new, renormalised value.
/// Day counts are stored as `i64`; totals beyond roughly ±10^13 days are
/// outside the supported range.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct TimeDelta {
    days: i64,
    seconds: i64,
    microseconds: i64,
}

impl TimeDelta {
    /// The zero-length duration.
    pub const ZERO: Self = Self {
        days: 0,
        seconds: 0,
        microseconds: 0,
    };

    // ── constructors ──────────────────────────────────────────────────

    /// Sum one or more spans and normalise the result.
    ///
    /// Sub-microsecond remainders of the *sum* are truncated toward zero.
    ///
    /// ```
    /// use civiltime::{Span, TimeDelta};
    ///
    /// let delta = TimeDelta::new([Span::Weeks(1), Span::Days(2), Span::Hours(3)]).unwrap();
    /// assert_eq!((delta.days(), delta.seconds()), (9, 10_800));
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
        Ok(Self::from_nanos(total))
    }

    /// Duration made of a single span.
    pub fn from_span(span: Span) -> Self {
        Self::from_nanos(span.as_nanos())
    }

    /// `n` weeks of seven days.
    pub fn from_weeks(n: i64) -> Self {
        Self::from_span(Span::Weeks(n))
    }

    /// `n` days of 86 400 seconds.
    pub fn from_days(n: i64) -> Self {
        Self::from_span(Span::Days(n))
    }

    /// `n` hours.
    pub fn from_hours(n: i64) -> Self {
        Self::from_span(Span::Hours(n))
    }

    /// `n` minutes.
    pub fn from_minutes(n: i64) -> Self {
        Self::from_span(Span::Minutes(n))
    }

    /// `n` seconds.
    pub fn from_seconds(n: i64) -> Self {
        Self::from_span(Span::Seconds(n))
    }

    /// `n` milliseconds.
    pub fn from_millis(n: i64) -> Self {
        Self::from_span(Span::Milliseconds(n))
    }

    /// `n` microseconds.
    pub fn from_micros(n: i64) -> Self {
        Self::from_span(Span::Microseconds(n))
    }

    /// Build from possibly unnormalised components.
    pub fn from_components(days: i64, seconds: i64, microseconds: i64) -> Self {
        Self::from_total_micros(
            days as i128 * MICROS_PER_DAY + seconds as i128 * MICROS_PER_SECOND + microseconds as i128,
        )
    }

    pub(crate) fn from_total_micros(total: i128) -> Self {
        let (days, seconds, microseconds) = normalize(total);
        Self {
            days,
            seconds,
            microseconds,
        }
    }

    pub(crate) fn from_nanos(total: i128) -> Self {
        Self::from_total_micros(total / NANOS_PER_MICRO)
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Whole days.
    #[inline]
    pub const fn days(&self) -> i64 {
        self.days
    }

    /// Sub-day seconds, `-86 399 ..= 86 399`, same sign as the total.
    #[inline]
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Sub-second microseconds, `-999 999 ..= 999 999`, same sign as the total.
    #[inline]
    pub const fn microseconds(&self) -> i64 {
        self.microseconds
    }

    /// `days * 86 400 + seconds`; the microseconds are dropped.
    #[inline]
    pub const fn total_seconds(&self) -> i64 {
        self.days * SECONDS_PER_DAY + self.seconds
    }

    pub(crate) fn total_micros(&self) -> i128 {
        self.days as i128 * MICROS_PER_DAY
            + self.seconds as i128 * MICROS_PER_SECOND
            + self.microseconds as i128
    }

    /// `true` if the duration is strictly shorter than zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.days < 0 || self.seconds < 0 || self.microseconds < 0
    }

    /// Total length as a fractional quantity of seconds.
    pub fn as_seconds(&self) -> Seconds {
        Seconds::new(self.total_micros() as f64 / MICROS_PER_SECOND as f64)
    }

    /// Total length as a fractional quantity of days.
    pub fn as_days(&self) -> Days {
        self.as_seconds().to::<Day>()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait implementations
// ═══════════════════════════════════════════════════════════════════════════

impl From<Span> for TimeDelta {
    fn from(span: Span) -> Self {
        Self::from_span(span)
    }
}

impl Ord for TimeDelta {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_micros().cmp(&other.total_micros())
    }
}

impl PartialOrd for TimeDelta {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add for TimeDelta {
    type Output = Self;

    /// Field-wise sum, renormalised.
    fn add(self, rhs: Self) -> Self::Output {
        Self::from_components(
            self.days + rhs.days,
            self.seconds + rhs.seconds,
            self.microseconds + rhs.microseconds,
        )
    }
}

impl Sub for TimeDelta {
    type Output = Self;

    /// Field-wise difference, renormalised.
    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_components(
            self.days - rhs.days,
            self.seconds - rhs.seconds,
            self.microseconds - rhs.microseconds,
        )
    }
}

impl Neg for TimeDelta {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::from_total_micros(-self.total_micros())
    }
}

impl Sum for TimeDelta {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Exact integral scaling: each component is multiplied, then the triple is
/// renormalised.
impl Mul<i64> for TimeDelta {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from_components(
            self.days * rhs,
            self.seconds * rhs,
            self.microseconds * rhs,
        )
    }
}

impl Mul<TimeDelta> for i64 {
    type Output = TimeDelta;

    fn mul(self, rhs: TimeDelta) -> Self::Output {
        rhs * self
    }
}

/// Lossy floating scaling.
///
/// The whole-second part (`total_seconds`) and the microsecond part are
/// scaled and rounded half-to-even **independently**, so the fractional
/// seconds produced by scaling the first part are lost:
///
/// ```
/// use civiltime::TimeDelta;
///
/// let delta = TimeDelta::from_components(0, 1, 500_000) * 0.5;
/// assert_eq!((delta.seconds(), delta.microseconds()), (0, 250_000));
/// ```
impl Mul<f64> for TimeDelta {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        let seconds = (rhs * self.total_seconds() as f64).round_ties_even();
        let micros = (rhs * self.microseconds as f64).round_ties_even();
        Self::from_total_micros(seconds as i128 * MICROS_PER_SECOND + micros as i128)
    }
}

impl Mul<TimeDelta> for f64 {
    type Output = TimeDelta;

    fn mul(self, rhs: TimeDelta) -> Self::Output {
        rhs * self
    }
}

// ── Display / FromStr ─────────────────────────────────────────────────────

/// `"<days> days, [-]HH:MM:SS.ffffff"`.
impl fmt::Display for TimeDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.seconds < 0 || self.microseconds < 0 {
            "-"
        } else {
            ""
        };
        let secs = self.seconds.unsigned_abs();
        write!(
            f,
            "{} days, {}{:02}:{:02}:{:02}.{:06}",
            self.days,
            sign,
            secs / 3_600,
            secs / 60 % 60,
            secs % 60,
            self.microseconds.unsigned_abs()
        )
    }
}

/// Parses the [`Display`](fmt::Display) form back into a duration.
impl FromStr for TimeDelta {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidDurationText(s.to_owned());

        let (days, clock) = s.split_once(" days, ").ok_or_else(invalid)?;
        let days: i64 = days.trim().parse().map_err(|_| invalid())?;
        let (negative, clock) = match clock.trim().strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, clock.trim()),
        };
        let (hms, fraction) = clock.split_once('.').unwrap_or((clock, ""));

        let fields = hms
            .split(':')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid());
                }
                part.parse::<i128>().map_err(|_| invalid())
            })
            .collect::<Result<Vec<_>>>()?;
        let &[hours, minutes, seconds] = fields.as_slice() else {
            return Err(invalid());
        };
        if minutes >= 60 || seconds >= 60 {
            return Err(invalid());
        }

        if fraction.len() > 6 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let micros = format!("{fraction:0<6}").parse::<i128>().map_err(|_| invalid())?;

        let clock_micros = hours
            .checked_mul(3_600)
            .and_then(|s| s.checked_add(minutes * 60 + seconds))
            .and_then(|s| s.checked_mul(MICROS_PER_SECOND))
            .and_then(|us| us.checked_add(micros))
            .ok_or_else(invalid)?;
        let clock_micros = if negative { -clock_micros } else { clock_micros };
        let total = (days as i128 * MICROS_PER_DAY)
            .checked_add(clock_micros)
            .ok_or_else(invalid)?;
        let (days, seconds, microseconds) = checked_normalize(total).ok_or_else(invalid)?;
        Ok(Self {
            days,
            seconds,
            microseconds,
        })
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct RawDelta {
    days: i64,
    seconds: i64,
    microseconds: i64,
}

#[cfg(feature = "serde")]
impl Serialize for TimeDelta {
    fn serialize<Ser>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        RawDelta {
            days: self.days,
            seconds: self.seconds,
            microseconds: self.microseconds,
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for TimeDelta {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawDelta::deserialize(deserializer)?;
        Ok(Self::from_components(raw.days, raw.seconds, raw.microseconds))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(delta: TimeDelta) -> (i64, i64, i64) {
        (delta.days(), delta.seconds(), delta.microseconds())
    }

    #[test]
    fn empty_span_list_is_rejected() {
        assert_eq!(
            TimeDelta::new(Vec::new()),
            Err(Error::EmptyDurationConstruction)
        );
    }

    #[test]
    fn microsecond_inputs_carry_into_seconds() {
        let delta = TimeDelta::new([Span::Microseconds(4_000), Span::Microseconds(1_000_000)])
            .unwrap();
        assert_eq!(triple(delta), (0, 1, 4_000));
        assert_eq!(delta.to_string(), "0 days, 00:00:01.004000");
    }

    #[test]
    fn mixed_units_carry_into_days() {
        let delta = TimeDelta::new([
            Span::Microseconds(2_400),
            Span::Seconds(3_600 * 25),
            Span::Weeks(2),
        ])
        .unwrap();
        assert_eq!(triple(delta), (15, 3_600, 2_400));
        assert_eq!(delta.to_string(), "15 days, 01:00:00.002400");
    }

    #[test]
    fn negative_totals_truncate_toward_zero() {
        assert_eq!(triple(TimeDelta::from_hours(-25)), (-1, -3_600, 0));
        assert_eq!(triple(TimeDelta::from_micros(-1)), (0, 0, -1));
        assert_eq!(TimeDelta::from_hours(-1).to_string(), "0 days, -01:00:00.000000");
    }

    #[test]
    fn nanoseconds_are_summed_before_truncation() {
        let delta = TimeDelta::new([Span::Nanoseconds(1_500), Span::Nanoseconds(1_500)]).unwrap();
        assert_eq!(delta.microseconds(), 3);
        assert_eq!(TimeDelta::from_span(Span::Nanoseconds(-999)), TimeDelta::ZERO);
    }

    #[test]
    fn total_seconds_drops_microseconds() {
        let delta = TimeDelta::from_components(2, 5, 999_999);
        assert_eq!(delta.total_seconds(), 2 * 86_400 + 5);
    }

    #[test]
    fn add_and_sub_renormalise() {
        let four = TimeDelta::from_hours(4);
        let minus_one = TimeDelta::from_hours(-1);
        assert_eq!(triple(four + minus_one), (0, 10_800, 0));
        assert_eq!((minus_one - four).to_string(), "0 days, -05:00:00.000000");

        let carry = TimeDelta::from_components(0, 86_399, 999_999) + TimeDelta::from_micros(1);
        assert_eq!(triple(carry), (1, 0, 0));

        let mixed = TimeDelta::from_days(1) + TimeDelta::from_hours(-30);
        assert_eq!(triple(mixed), (0, -21_600, 0));
    }

    #[test]
    fn integral_scaling_is_exact() {
        let delta = TimeDelta::new([Span::Seconds(3_600 * 23), Span::Microseconds(500_000)]).unwrap();
        let scaled = 4 * delta;
        assert_eq!(triple(scaled), (3, 72_002, 0));
        assert_eq!(scaled.to_string(), "3 days, 20:00:02.000000");
        assert_eq!(delta * -1, -delta);
    }

    #[test]
    fn floating_scaling_rounds_each_part() {
        let delta = TimeDelta::new([Span::Seconds(3_600 * 23), Span::Microseconds(500_000)]).unwrap();
        let scaled = delta * 1.2;
        assert_eq!(scaled.to_string(), "1 days, 03:36:00.600000");

        // half-to-even on both halves
        assert_eq!(TimeDelta::from_seconds(5) * 0.5, TimeDelta::from_seconds(2));
        assert_eq!(TimeDelta::from_seconds(3) * 0.5, TimeDelta::from_seconds(2));
        assert_eq!(
            TimeDelta::from_micros(5) * 0.5,
            TimeDelta::from_micros(2)
        );
    }

    #[test]
    fn ordering_follows_total_length() {
        let mut deltas = vec![
            TimeDelta::from_hours(-25),
            TimeDelta::ZERO,
            TimeDelta::from_micros(-1),
            TimeDelta::from_days(1),
        ];
        deltas.sort();
        assert_eq!(
            deltas,
            vec![
                TimeDelta::from_hours(-25),
                TimeDelta::from_micros(-1),
                TimeDelta::ZERO,
                TimeDelta::from_days(1),
            ]
        );
        assert!(TimeDelta::from_hours(-25).is_negative());
    }

    #[test]
    fn display_parses_back() {
        for delta in [
            TimeDelta::ZERO,
            TimeDelta::from_hours(-25),
            TimeDelta::from_components(15, 3_600, 2_400),
            TimeDelta::from_components(-3, -1, -7),
        ] {
            assert_eq!(delta.to_string().parse::<TimeDelta>(), Ok(delta));
        }
        assert_eq!(
            "2 days, 01:02:03".parse::<TimeDelta>(),
            Ok(TimeDelta::from_components(2, 3_723, 0))
        );
    }

    #[test]
    fn malformed_text_is_rejected() {
        for text in ["", "3 days", "1 days, 01:00", "x days, 00:00:00.0", "0 days, 00:61:00.0"] {
            assert!(matches!(
                text.parse::<TimeDelta>(),
                Err(Error::InvalidDurationText(_))
            ));
        }
    }

    #[test]
    fn out_of_range_text_is_rejected() {
        for text in [
            "9223372036854775807 days, 24:00:00.000000",
            "0 days, 99999999999999999999999999999999999:00:00",
            "-9223372036854775808 days, -24:00:00.000000",
        ] {
            assert!(matches!(
                text.parse::<TimeDelta>(),
                Err(Error::InvalidDurationText(_))
            ));
        }
        let max = "9223372036854775807 days, 23:59:59.999999".parse::<TimeDelta>();
        assert_eq!(max.map(triple), Ok((i64::MAX, 86_399, 999_999)));
    }

    #[test]
    fn checked_normalize_matches_normalize_in_range() {
        for total in [0, 1, -1, 90_000_000_001, -90_000_000_001] {
            assert_eq!(checked_normalize(total), Some(normalize(total)));
        }
        assert_eq!(checked_normalize(i64::MAX as i128 * MICROS_PER_DAY + MICROS_PER_DAY), None);
        assert_eq!(checked_normalize(i128::MIN), None);
    }

    #[test]
    fn quantity_interop() {
        let delta = TimeDelta::from(Span::from(Seconds::new(1.5)));
        assert_eq!(triple(delta), (0, 1, 500_000));

        let day = TimeDelta::from(Span::from(Days::new(1.0)));
        assert_eq!(triple(day), (1, 0, 0));
        assert!((TimeDelta::from_hours(36).as_days() - Days::new(1.5)).abs() < Days::new(1e-12));
    }

    #[test]
    fn sum_of_deltas() {
        let total: TimeDelta = [TimeDelta::from_hours(20), TimeDelta::from_hours(5), TimeDelta::from_minutes(-30)]
            .into_iter()
            .sum();
        assert_eq!(triple(total), (1, 1_800, 0));
    }
}
