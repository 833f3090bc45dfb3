//! Partial-precision date values used by `date` and `dateTime`.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, SecondsFormat};
use std::fmt;
use std::str::FromStr;

use crate::error::FhirModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PartialDate {
    Year(i32),
    YearMonth(i32, u32),
    Date(NaiveDate),
}

impl PartialDate {
    pub fn year(&self) -> i32 {
        match self {
            Self::Year(year) | Self::YearMonth(year, _) => *year,
            Self::Date(date) => date.year(),
        }
    }
}

fn parse_year(text: &str) -> Result<i32, FhirModelError> {
    if text.len() != 4 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FhirModelError::parsing_error(format!(
            "'{text}' is not a four digit year"
        )));
    }
    text.parse::<i32>()
        .map_err(|e| FhirModelError::parsing_error(e.to_string()))
}

impl FromStr for PartialDate {
    type Err = FhirModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.len() {
            4 => Ok(Self::Year(parse_year(s)?)),
            7 => {
                let (year, month) = s
                    .split_once('-')
                    .ok_or_else(|| FhirModelError::parsing_error(format!("invalid date '{s}'")))?;
                let month: u32 = month
                    .parse()
                    .map_err(|_| FhirModelError::parsing_error(format!("invalid month in '{s}'")))?;
                if !(1..=12).contains(&month) {
                    return Err(FhirModelError::parsing_error(format!(
                        "month out of range in '{s}'"
                    )));
                }
                Ok(Self::YearMonth(parse_year(year)?, month))
            }
            10 => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(Self::Date)
                .map_err(|e| FhirModelError::parsing_error(format!("invalid date '{s}': {e}"))),
            _ => Err(FhirModelError::parsing_error(format!("invalid date '{s}'"))),
        }
    }
}

impl fmt::Display for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{year:04}"),
            Self::YearMonth(year, month) => write!(f, "{year:04}-{month:02}"),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl From<NaiveDate> for PartialDate {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

/// A `dateTime`: either a partial date or a full timestamp with offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartialDateTime {
    Partial(PartialDate),
    Timestamp(DateTime<FixedOffset>),
}

impl FromStr for PartialDateTime {
    type Err = FhirModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains('T') {
            DateTime::parse_from_rfc3339(s)
                .map(Self::Timestamp)
                .map_err(|e| FhirModelError::parsing_error(format!("invalid dateTime '{s}': {e}")))
        } else {
            s.parse().map(Self::Partial)
        }
    }
}

impl fmt::Display for PartialDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Partial(date) => write!(f, "{date}"),
            Self::Timestamp(timestamp) => {
                write!(f, "{}", timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
        }
    }
}

impl From<PartialDate> for PartialDateTime {
    fn from(date: PartialDate) -> Self {
        Self::Partial(date)
    }
}

impl From<DateTime<FixedOffset>> for PartialDateTime {
    fn from(timestamp: DateTime<FixedOffset>) -> Self {
        Self::Timestamp(timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_precisions_parse_and_print() {
        for text in ["2024", "2024-03", "2024-03-09"] {
            let date: PartialDate = text.parse().unwrap();
            assert_eq!(date.to_string(), text);
        }
    }

    #[test]
    fn invalid_dates_are_rejected() {
        assert!("2024-13".parse::<PartialDate>().is_err());
        assert!("2024-02-30".parse::<PartialDate>().is_err());
        assert!("24".parse::<PartialDate>().is_err());
    }

    #[test]
    fn timestamps_keep_their_offset() {
        let value: PartialDateTime = "2024-03-09T10:30:00+02:00".parse().unwrap();
        assert_eq!(value.to_string(), "2024-03-09T10:30:00+02:00");
        let utc: PartialDateTime = "2024-03-09T10:30:00Z".parse().unwrap();
        assert_eq!(utc.to_string(), "2024-03-09T10:30:00Z");
    }

    #[test]
    fn timestamp_without_offset_is_rejected() {
        assert!("2024-03-09T10:30:00".parse::<PartialDateTime>().is_err());
    }
}
