// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by every fallible constructor and parser.

use thiserror::Error;

/// Failures raised at construction, parsing or formatting time.
///
/// Every variant is a caller-input problem; none of them is transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The year/month/day triple does not name a real calendar date.
    #[error("{year:04}-{month:02}-{day:02} is not a valid calendar date")]
    InvalidCalendarDate { year: i32, month: u32, day: u32 },

    /// The hour/minute/second triple is outside a single day.
    #[error("{hour:02}:{minute:02}:{second:02} is not a valid time of day")]
    InvalidTimeOfDay { hour: u32, minute: u32, second: u32 },

    /// The identifier is not present in the timezone database.
    #[error("unknown timezone `{0}`")]
    UnknownTimezone(String),

    /// The operating system did not report a usable local timezone.
    #[error("cannot determine the system timezone: {0}")]
    SystemZoneUnavailable(String),

    /// The input text does not conform to the given format.
    #[error("`{text}` does not match format `{format}`: {reason}")]
    ParseMismatch {
        text: String,
        format: String,
        reason: String,
    },

    /// A duration was requested from an empty list of spans.
    #[error("a duration needs at least one span")]
    EmptyDurationConstruction,

    /// The strftime pattern contains an unknown or unsupported specifier.
    #[error("invalid format string `{0}`")]
    InvalidFormat(String),

    /// The timestamp is not finite or falls outside the representable range.
    #[error("timestamp out of range")]
    TimestampOutOfRange,

    /// The text is not in the `"<days> days, HH:MM:SS.ffffff"` form.
    #[error("invalid duration text `{0}`")]
    InvalidDurationText(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_the_offending_input() {
        let err = Error::InvalidCalendarDate {
            year: 2017,
            month: 2,
            day: 30,
        };
        assert_eq!(err.to_string(), "2017-02-30 is not a valid calendar date");

        let err = Error::UnknownTimezone("Mars/Olympus".into());
        assert_eq!(err.to_string(), "unknown timezone `Mars/Olympus`");
    }
}
