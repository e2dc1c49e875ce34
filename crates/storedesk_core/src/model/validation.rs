//! Field-level validation shared by domain entities.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static ISO_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?<year>[0-9]{4})-(?<month>0[1-9]|1[0-2])-(?<day>0[1-9]|[12][0-9]|3[01])$")
        .expect("valid date regex")
});
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9][0-9\- ()]{4,19}$").expect("valid phone regex"));

/// Domain validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// A required name field is blank.
    BlankName(&'static str),
    /// A date field is not a calendar date in `YYYY-MM-DD` form.
    InvalidDate { field: &'static str, value: String },
    InvalidPhone(String),
    /// Delivery date precedes the order date.
    DeliveryBeforeOrder {
        ordered_on: String,
        delivered_on: String,
    },
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName(field) => write!(f, "{field} cannot be blank"),
            Self::InvalidDate { field, value } => {
                write!(f, "{field} must be YYYY-MM-DD, got `{value}`")
            }
            Self::InvalidPhone(value) => write!(f, "invalid phone number `{value}`"),
            Self::DeliveryBeforeOrder {
                ordered_on,
                delivered_on,
            } => write!(
                f,
                "delivered_on {delivered_on} is earlier than ordered_on {ordered_on}"
            ),
        }
    }
}

impl Error for ModelValidationError {}

pub(crate) fn require_name(field: &'static str, value: &str) -> Result<(), ModelValidationError> {
    if value.trim().is_empty() {
        return Err(ModelValidationError::BlankName(field));
    }
    Ok(())
}

pub(crate) fn require_date(field: &'static str, value: &str) -> Result<(), ModelValidationError> {
    let in_calendar = ISO_DATE_RE.captures(value).is_some_and(|caps| {
        match (
            caps["year"].parse::<u32>(),
            caps["month"].parse::<u32>(),
            caps["day"].parse::<u32>(),
        ) {
            (Ok(year), Ok(month), Ok(day)) => day <= days_in_month(year, month),
            _ => false,
        }
    });
    if !in_calendar {
        return Err(ModelValidationError::InvalidDate {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

pub(crate) fn check_phone(value: Option<&str>) -> Result<(), ModelValidationError> {
    match value {
        Some(phone) if !PHONE_RE.is_match(phone) => {
            Err(ModelValidationError::InvalidPhone(phone.to_string()))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{check_phone, require_date, require_name, ModelValidationError};

    #[test]
    fn date_must_be_iso() {
        assert!(require_date("ordered_on", "2024-02-29").is_ok());
        assert!(require_date("ordered_on", "2000-02-29").is_ok());
        assert!(require_date("ordered_on", "2024-12-31").is_ok());
        assert!(require_date("ordered_on", "2024-02-31").is_err());
        assert!(require_date("ordered_on", "2023-02-29").is_err());
        assert!(require_date("ordered_on", "1900-02-29").is_err());
        assert!(require_date("ordered_on", "2024-04-31").is_err());
        assert!(require_date("ordered_on", "2024-13-01").is_err());
        assert!(require_date("ordered_on", "2024/01/01").is_err());
    }

    #[test]
    fn blank_names_are_rejected() {
        assert_eq!(
            require_name("customer name", "  "),
            Err(ModelValidationError::BlankName("customer name"))
        );
    }

    #[test]
    fn phone_is_optional_but_checked() {
        assert!(check_phone(None).is_ok());
        assert!(check_phone(Some("03-1234-5678")).is_ok());
        assert!(check_phone(Some("call me")).is_err());
    }
}
