// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Timezone handles and the "current system zone" capability.
//!
//! [`Zone`] is a copyable handle into the IANA database compiled into
//! `chrono-tz`.  Nothing is cached: every offset lookup goes straight to the
//! database, and [`SystemZone`] asks the operating system on every call.
//!
//! # Local-time disambiguation
//!
//! Civil local times around a DST transition are resolved with the UTC
//! offset that was in effect **before** the transition:
//!
//! | Local time | Result |
//! |------------|--------|
//! | ambiguous (clocks fall back) | the earlier of the two instants |
//! | nonexistent (clocks spring forward) | `local − offset_before`, i.e. past the gap |

use crate::error::{Error, Result};
use chrono::{DateTime, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use log::{debug, warn};
use std::fmt;
use std::str::FromStr;

// ═══════════════════════════════════════════════════════════════════════════
// Zone
// ═══════════════════════════════════════════════════════════════════════════

/// An IANA timezone.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Zone(Tz);

impl Zone {
    /// Coordinated Universal Time.
    pub const UTC: Self = Self(Tz::UTC);

    /// Look a zone up by its IANA identifier (e.g. `"Europe/Berlin"`).
    ///
    /// # Errors
    /// [`Error::UnknownTimezone`] if the identifier is not in the database.
    pub fn new(name: &str) -> Result<Self> {
        name.parse::<Tz>()
            .map(Self)
            .map_err(|_| Error::UnknownTimezone(name.to_owned()))
    }

    /// The IANA identifier.
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    pub(crate) const fn tz(&self) -> Tz {
        self.0
    }

    /// Offset from UTC, in seconds, in effect at `instant`.
    pub fn offset_at(&self, instant: DateTime<Utc>) -> i32 {
        self.0
            .offset_from_utc_datetime(&instant.naive_utc())
            .fix()
            .local_minus_utc()
    }

    /// Wall-clock date and time shown in this zone at `instant`.
    pub fn civil_local_time(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.0).naive_local()
    }

    /// Anchor a civil local time in this zone to an absolute instant.
    ///
    /// See the module documentation for the DST policy.
    ///
    /// # Errors
    /// [`Error::TimestampOutOfRange`] near the limits of the calendar engine.
    pub fn resolve_local(&self, local: NaiveDateTime) -> Result<DateTime<Utc>> {
        match self.0.from_local_datetime(&local) {
            LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(a, b) => {
                let earlier = a.with_timezone(&Utc).min(b.with_timezone(&Utc));
                debug!("{local} is ambiguous in {self}; using {earlier}");
                Ok(earlier)
            }
            LocalResult::None => {
                let probe = local
                    .checked_sub_signed(chrono::TimeDelta::days(1))
                    .ok_or(Error::TimestampOutOfRange)?;
                let before = self.0.offset_from_utc_datetime(&probe).fix();
                let utc = local
                    .checked_sub_signed(chrono::TimeDelta::seconds(
                        before.local_minus_utc().into(),
                    ))
                    .ok_or(Error::TimestampOutOfRange)?;
                let resolved = Utc.from_utc_datetime(&utc);
                debug!("{local} does not exist in {self}; using {resolved}");
                Ok(resolved)
            }
        }
    }
}

impl Default for Zone {
    fn default() -> Self {
        Self::UTC
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Zone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ZoneProvider
// ═══════════════════════════════════════════════════════════════════════════

/// Source of the "current system zone".
///
/// Operations that default to the local zone take a provider instead of
/// reading global state, so callers can pin the zone (see [`FixedZone`]).
pub trait ZoneProvider {
    /// The zone local times should be interpreted in right now.
    fn current_zone(&self) -> Result<Zone>;
}

impl<Z: ZoneProvider + ?Sized> ZoneProvider for &Z {
    fn current_zone(&self) -> Result<Zone> {
        (**self).current_zone()
    }
}

/// The operating system's zone.
///
/// A `TZ` environment variable naming an IANA zone wins over the OS setting.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SystemZone;

impl ZoneProvider for SystemZone {
    fn current_zone(&self) -> Result<Zone> {
        if let Some(zone) = std::env::var("TZ").ok().as_deref().and_then(zone_from_tz) {
            debug!("system timezone `{zone}` taken from TZ");
            return Ok(zone);
        }

        let name = iana_time_zone::get_timezone()
            .map_err(|e| Error::SystemZoneUnavailable(e.to_string()))?;
        debug!("system timezone `{name}` reported by the operating system");
        Zone::new(&name)
    }
}

/// Interpret a `TZ` value (`"Europe/Berlin"` or `":Europe/Berlin"`).
///
/// `None` when the value is empty or names no IANA zone; the latter is
/// logged, and the caller falls back to the operating system.
fn zone_from_tz(value: &str) -> Option<Zone> {
    let name = value.trim_start_matches(':');
    if name.is_empty() {
        return None;
    }
    match Zone::new(name) {
        Ok(zone) => Some(zone),
        Err(_) => {
            warn!("ignoring unrecognised TZ value `{value}`");
            None
        }
    }
}

/// A provider that always answers with the same zone.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedZone(pub Zone);

impl ZoneProvider for FixedZone {
    fn current_zone(&self) -> Result<Zone> {
        Ok(self.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
