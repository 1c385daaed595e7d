// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar and time values with `datetime`-style ergonomics.
//!
//! Civil-calendar work is delegated to `chrono`, the IANA timezone database
//! to `chrono-tz`.  This crate adds immutable value types on top of them.
//!
//! # Core types
//!
//! - [`TimeDelta`] — normalised signed duration `(days, seconds, microseconds)`.
//! - [`Date`] — calendar date; arithmetic with a [`TimeDelta`] is day-granular.
//! - [`DateTime`] — absolute instant attached to a [`Zone`].
//! - [`Time`] — wall-clock time of day.
//!
//! # Configuration
//!
//! | Item | Role |
//! |------|------|
//! | [`Precision`] | tick resolution of a [`DateTime`] (s, ms, µs, ns) |
//! | [`ZoneProvider`] | source of the local zone ([`SystemZone`], [`FixedZone`]) |
//! | [`Clock`] | bundles both; every "now"/timestamp/parse entry point |
//!
//! # Normalisation
//!
//! Durations are decomposed with truncating division, so negative values
//! keep negative sub-day components (`-25 h` is `-1 days, -01:00:00`).
//! The single place this happens is [`normalize`].
//!
//! # Quick example
//!
//! ```
//! use civiltime::{Clock, Date, FixedZone, Span, TimeDelta, Zone};
//!
//! let delta = TimeDelta::new([Span::Weeks(1), Span::Days(2)]).unwrap();
//! assert_eq!(Date::new(2017, 6, 10).unwrap() + delta, Date::new(2017, 6, 19).unwrap());
//!
//! let clock = Clock::with_zones(FixedZone(Zone::UTC));
//! let dt = clock.fromtimestamp(1_497_252_490.0282006, Some("Europe/Paris")).unwrap();
//! assert_eq!(dt.to_string(), "2017-06-12 09:28:10.028200626 CEST");
//! ```

mod clock;
mod date;
mod datetime;
mod delta;
mod error;
mod format;
mod time;
mod zone;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use clock::{Clock, Precision};
pub use date::Date;
pub use datetime::DateTime;
pub use delta::{checked_normalize, normalize, Span, TimeDelta};
pub use error::{Error, Result};
pub use time::Time;
pub use zone::{FixedZone, SystemZone, Zone, ZoneProvider};
