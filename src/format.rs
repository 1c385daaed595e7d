// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! strftime rendering shared by the value types.

use crate::error::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use std::fmt::{self, Write};

/// Render `format` through `apply`, turning chrono's panicking paths into
/// [`Error::InvalidFormat`].
///
/// Unknown specifiers are caught while tokenising; specifiers that need a
/// field the value does not have (e.g. `%Y` on a bare time) surface as a
/// `fmt::Error` while writing.
pub(crate) fn render<'a, F, D>(format: &'a str, apply: F) -> Result<String>
where
    F: FnOnce(std::vec::IntoIter<Item<'a>>) -> D,
    D: fmt::Display,
{
    let invalid = || Error::InvalidFormat(format.to_owned());

    let items: Vec<Item<'a>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }

    let mut out = String::new();
    write!(out, "{}", apply(items.into_iter())).map_err(|_| invalid())?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn renders_known_specifiers() {
        let date = NaiveDate::from_ymd_opt(2017, 6, 9).unwrap();
        let text = render("%A %d. %B %Y", |items| date.format_with_items(items)).unwrap();
        assert_eq!(text, "Friday 09. June 2017");
    }

    #[test]
    fn rejects_unknown_specifiers() {
        let date = NaiveDate::from_ymd_opt(2017, 6, 9).unwrap();
        assert_eq!(
            render("%Q", |items| date.format_with_items(items)),
            Err(Error::InvalidFormat("%Q".into()))
        );
    }
}
