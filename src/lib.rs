//! oncalendar: syntax validation for systemd `OnCalendar=` expressions.
//!
//! Accepts the calendar event language of `systemd.time(7)`: shorthands
//! (`daily`, `weekly`, ...), weekday lists, dates and times with lists,
//! ranges and repetitions, fractional seconds, and an optional trailing
//! timezone that is checked against the system timezone database.
//!
//! # Examples
//!
//! ```
//! assert!(oncalendar::is_valid("Mon..Fri *-*-* 09:00:00"));
//! assert!(oncalendar::is_valid("2003-03-05 05:40 UTC"));
//! assert!(!oncalendar::is_valid("Mon2030-01-01"));
//!
//! let expr = oncalendar::validate("sat,sunday   *-*-1/7 10:00").unwrap();
//! assert_eq!(expr.to_string(), "Sat,Sun *-*-1/7 10:00");
//! ```
//!
//! Nothing is evaluated: day 31 of February or hour 99 are syntactically
//! fine, exactly as a linter in front of systemd needs.

#[macro_use]
mod logging;

pub mod ast;
pub mod display;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod timezone;
pub mod validate;

pub use ast::{CalendarExpr, CalendarExpression};
pub use error::{CalendarError, Span};
pub use timezone::{SystemTimeZones, TimezoneResolver};
pub use validate::CalendarValidator;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// True if `pattern` is a well-formed calendar expression whose timezone,
/// if any, exists in the system timezone database.
pub fn is_valid(pattern: &str) -> bool {
    CalendarValidator::new().is_valid(pattern)
}

/// Like [`is_valid`], but returns the parsed expression or the reason for
/// rejecting it.
pub fn validate(pattern: &str) -> Result<CalendarExpression, CalendarError> {
    CalendarValidator::new().validate(pattern)
}

/// Check syntax only. A trailing timezone is captured but not looked up.
pub fn parse(pattern: &str) -> Result<CalendarExpression, CalendarError> {
    parser::parse(pattern)
}

// --- CalendarExpression convenience methods ---

impl CalendarExpression {
    /// Parse an expression without resolving its timezone.
    pub fn parse(input: &str) -> Result<Self, CalendarError> {
        parser::parse(input)
    }

    /// Parse and resolve against the system timezone database.
    pub fn validate(input: &str) -> Result<Self, CalendarError> {
        validate(input)
    }

    /// Parse and resolve against a caller-supplied resolver.
    pub fn validate_with<R: TimezoneResolver>(input: &str, resolver: R) -> Result<Self, CalendarError> {
        CalendarValidator::with_resolver(resolver).validate(input)
    }

    pub fn is_valid(input: &str) -> bool {
        is_valid(input)
    }

    /// Get the timezone for this expression, if specified.
    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }
}

impl FromStr for CalendarExpression {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl Serialize for CalendarExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(None)?;

        match &self.expr {
            CalendarExpr::Shorthand(shorthand) => {
                map.serialize_entry("kind", "shorthand")?;
                map.serialize_entry("shorthand", shorthand)?;
                map.serialize_entry("expansion", shorthand.expansion())?;
            }
            CalendarExpr::Calendar {
                weekdays,
                date,
                time,
            } => {
                map.serialize_entry("kind", "calendar")?;
                map.serialize_entry("weekdays", weekdays)?;
                map.serialize_entry("date", date)?;
                map.serialize_entry("time", time)?;
            }
        }

        map.serialize_entry("timezone", &self.timezone)?;
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for CalendarExpression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Deserialize from the expression string
        let s = String::deserialize(deserializer)?;
        CalendarExpression::parse(&s).map_err(serde::de::Error::custom)
    }
}
