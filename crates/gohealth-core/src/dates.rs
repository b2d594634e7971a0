// ABOUTME: Calendar date codec for the DD-MM-YYYY wire format used by every API collaborator
// ABOUTME: Strict parsing, formatting, YYYY-MM month parsing and serde adapters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 GoHealth

//! Dates cross the API boundary as `DD-MM-YYYY` strings. Parsing is strict: anything
//! else (ISO 8601 included) is an `InvalidFormat` error.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

/// Message returned for any malformed date
pub const INVALID_DATE_MESSAGE: &str = "Invalid date format. Please use DD-MM-YYYY";

/// Message returned for a malformed month selector
pub const INVALID_MONTH_MESSAGE: &str = "Invalid month format. Please use YYYY-MM";

fn all_digits(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a `DD-MM-YYYY` date
///
/// # Errors
///
/// Returns `InvalidFormat` unless the input is two-digit day, two-digit month and four-digit
/// year separated by `-`, naming a real calendar day.
pub fn parse_date(input: &str) -> AppResult<NaiveDate> {
    let mut parts = input.split('-');
    let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(AppError::invalid_format(INVALID_DATE_MESSAGE));
    };

    if day.len() != 2
        || month.len() != 2
        || year.len() != 4
        || !all_digits(day)
        || !all_digits(month)
        || !all_digits(year)
    {
        return Err(AppError::invalid_format(INVALID_DATE_MESSAGE));
    }

    let (Ok(day), Ok(month), Ok(year)) = (day.parse(), month.parse(), year.parse()) else {
        return Err(AppError::invalid_format(INVALID_DATE_MESSAGE));
    };

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| AppError::invalid_format(INVALID_DATE_MESSAGE))
}

/// Parse an optional `DD-MM-YYYY` query value, treating an absent or blank value as `None`
///
/// # Errors
///
/// Returns `InvalidFormat` when a non-blank value is malformed.
pub fn parse_optional_date(input: Option<&str>) -> AppResult<Option<NaiveDate>> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date(value).map(Some),
    }
}

/// Format a date as `DD-MM-YYYY`
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Parse a `YYYY-MM` month selector into `(year, month)`
///
/// # Errors
///
/// Returns `InvalidFormat` for anything other than a four-digit year and a month in 1..=12.
pub fn parse_month(input: &str) -> AppResult<(i32, u32)> {
    let Some((year, month)) = input.split_once('-') else {
        return Err(AppError::invalid_format(INVALID_MONTH_MESSAGE));
    };
    if year.len() != 4 || month.len() != 2 || !all_digits(year) || !all_digits(month) {
        return Err(AppError::invalid_format(INVALID_MONTH_MESSAGE));
    }
    match (year.parse::<i32>(), month.parse::<u32>()) {
        (Ok(year), Ok(month)) if (1..=12).contains(&month) => Ok((year, month)),
        _ => Err(AppError::invalid_format(INVALID_MONTH_MESSAGE)),
    }
}

/// First day of the month containing `date`
#[must_use]
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the given month, `None` for an impossible month
#[must_use]
pub fn last_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).and_then(|d| d.pred_opt())
}

/// Serde adapter for `NaiveDate` fields carried as `DD-MM-YYYY`
pub mod dd_mm_yyyy {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Serialize as `DD-MM-YYYY`
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    /// Deserialize from `DD-MM-YYYY`
    ///
    /// # Errors
    ///
    /// Fails with the standard invalid-date message.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(|e| de::Error::custom(e.message))
    }
}

/// Serde adapter for `Option<NaiveDate>` fields carried as `DD-MM-YYYY`
pub mod option_dd_mm_yyyy {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Serialize as `DD-MM-YYYY` or `null`
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_str(&super::format_date(*date)),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize from `DD-MM-YYYY` or `null`
    ///
    /// # Errors
    ///
    /// Fails with the standard invalid-date message.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| super::parse_date(&raw).map_err(|e| de::Error::custom(e.message)))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_of_month_handles_leap_years() {
        assert_eq!(
            last_of_month(2024, 2),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(
            last_of_month(2023, 12),
            NaiveDate::from_ymd_opt(2023, 12, 31)
        );
        assert_eq!(last_of_month(2023, 13), None);
    }

    #[test]
    fn test_parse_optional_date_blank_is_none() {
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert_eq!(parse_optional_date(Some("  ")).unwrap(), None);
        assert!(parse_optional_date(Some("2024-01-01")).is_err());
    }
}
