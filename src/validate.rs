use crate::ast::CalendarExpression;
use crate::error::{CalendarError, Span};
use crate::lexer::normalize;
use crate::parser;
use crate::timezone::{SystemTimeZones, TimezoneResolver};

/// Checks calendar expressions: syntax first, then the trailing timezone
/// against a [`TimezoneResolver`].
///
/// # Examples
///
/// ```
/// use oncalendar::CalendarValidator;
///
/// let validator = CalendarValidator::with_resolver(|tz: &str| tz == "UTC");
/// assert!(validator.is_valid("Mon..Fri 09:00 UTC"));
/// assert!(!validator.is_valid("Mon..Fri 09:00 Europe/Berlin"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CalendarValidator<R = SystemTimeZones> {
    resolver: R,
}

impl CalendarValidator {
    /// A validator backed by the system timezone database.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<R: TimezoneResolver> CalendarValidator<R> {
    pub fn with_resolver(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// True if `pattern` is well formed and its timezone, if any, is known.
    pub fn is_valid(&self, pattern: &str) -> bool {
        self.validate(pattern).is_ok()
    }

    /// Parse `pattern` and resolve its timezone, returning the structured
    /// expression or the first reason it was rejected.
    pub fn validate(&self, pattern: &str) -> Result<CalendarExpression, CalendarError> {
        let normalized = normalize(pattern);
        let expression = parser::parse(&normalized).map_err(|err| {
            debug!("rejected '{normalized}': {err}");
            err
        })?;

        if let Some(tz) = &expression.timezone {
            self.check_timezone(tz, &normalized)?;
        }
        Ok(expression)
    }

    /// Validate a batch of expressions, keeping each input next to its outcome.
    pub fn validate_all<'a, I>(&self, patterns: I) -> Vec<(String, Result<CalendarExpression, CalendarError>)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        patterns
            .into_iter()
            .map(|pattern| (pattern.to_string(), self.validate(pattern)))
            .collect()
    }

    fn check_timezone(&self, tz: &str, normalized: &str) -> Result<(), CalendarError> {
        if !self.resolver.is_available() {
            warn!("no timezone data available, cannot check '{tz}'");
            return Err(CalendarError::TimezoneDatabaseUnavailable {
                name: tz.to_string(),
            });
        }
        if !self.resolver.is_known(tz) {
            debug!("rejected '{normalized}': unknown timezone '{tz}'");
            // The timezone is always the tail of the normalized input.
            let span = Span::new(normalized.len() - tz.len(), normalized.len());
            return Err(CalendarError::unknown_timezone(tz, span, normalized));
        }
        Ok(())
    }
}
