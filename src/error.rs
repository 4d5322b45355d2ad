use std::fmt;

/// Byte range within the normalized input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Every reason a calendar expression can be rejected.
///
/// Spans and `input` refer to the *normalized* expression (trimmed, with
/// runs of spaces collapsed), which is what the parser actually reads.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CalendarError {
    /// Nothing left after trimming.
    EmptyInput,

    /// A weekday, date or time section violates its sub-grammar.
    MalformedSection {
        message: String,
        span: Span,
        input: String,
    },

    /// Two sections touch without the single separating space.
    MissingSeparator { span: Span, input: String },

    /// Text remains that is neither a section nor a timezone.
    UnconsumedTrailingText { span: Span, input: String },

    /// The trailing timezone name is not known to the resolver.
    UnknownTimezone {
        name: String,
        span: Span,
        input: String,
    },

    /// The resolver has no timezone data at all, so `name` could not be checked.
    TimezoneDatabaseUnavailable { name: String },
}

impl fmt::Display for CalendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "empty calendar expression"),
            Self::MalformedSection { message, .. } => write!(f, "{message}"),
            Self::MissingSeparator { span, input } => write!(
                f,
                "missing space before '{}'",
                snippet(input, *span)
            ),
            Self::UnconsumedTrailingText { span, input } => write!(
                f,
                "unexpected trailing text '{}'",
                snippet(input, *span)
            ),
            Self::UnknownTimezone { name, .. } => write!(f, "unknown timezone '{name}'"),
            Self::TimezoneDatabaseUnavailable { name } => {
                write!(f, "no timezone database available to check '{name}'")
            }
        }
    }
}

impl std::error::Error for CalendarError {}

impl CalendarError {
    pub fn malformed(message: impl Into<String>, span: Span, input: impl Into<String>) -> Self {
        Self::MalformedSection {
            message: message.into(),
            span,
            input: input.into(),
        }
    }

    pub fn missing_separator(span: Span, input: impl Into<String>) -> Self {
        Self::MissingSeparator {
            span,
            input: input.into(),
        }
    }

    pub fn trailing(span: Span, input: impl Into<String>) -> Self {
        Self::UnconsumedTrailingText {
            span,
            input: input.into(),
        }
    }

    pub fn unknown_timezone(name: impl Into<String>, span: Span, input: impl Into<String>) -> Self {
        Self::UnknownTimezone {
            name: name.into(),
            span,
            input: input.into(),
        }
    }

    /// True for rejections caused by the expression itself, as opposed to
    /// the environment it was checked in.
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::MalformedSection { .. }
                | Self::MissingSeparator { .. }
                | Self::UnconsumedTrailingText { .. }
        )
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::MalformedSection { span, .. }
            | Self::MissingSeparator { span, .. }
            | Self::UnconsumedTrailingText { span, .. }
            | Self::UnknownTimezone { span, .. } => Some(*span),
            Self::EmptyInput | Self::TimezoneDatabaseUnavailable { .. } => None,
        }
    }

    /// Format a rich error with the input and an underline.
    pub fn display_rich(&self) -> String {
        match self {
            Self::MalformedSection { span, input, .. }
            | Self::MissingSeparator { span, input }
            | Self::UnconsumedTrailingText { span, input }
            | Self::UnknownTimezone { span, input, .. } => {
                format_span_error("error", &self.to_string(), span, input)
            }
            Self::EmptyInput | Self::TimezoneDatabaseUnavailable { .. } => {
                format!("error: {self}")
            }
        }
    }
}

fn snippet(input: &str, span: Span) -> &str {
    input.get(span.start..span.end).unwrap_or_default()
}

fn format_span_error(prefix: &str, message: &str, span: &Span, input: &str) -> String {
    let mut out = format!("{prefix}: {message}\n");
    out.push_str(&format!("  {input}\n"));
    // Column in characters, not bytes, so the caret lines up under non-ASCII input.
    let column = input
        .get(..span.start)
        .map_or(span.start, |prefix| prefix.chars().count());
    let width = snippet(input, *span).chars().count().max(1);
    out.push_str(&" ".repeat(column + 2));
    out.push_str(&"^".repeat(width));
    out
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rich_underlines_span() {
        let err = CalendarError::missing_separator(Span::new(3, 7), "Mon2030-01-01");
        let rendered = err.display_rich();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "error: missing space before '2030'");
        assert_eq!(lines[1], "  Mon2030-01-01");
        assert_eq!(lines[2], "     ^^^^");
    }

    #[test]
    fn test_display_rich_without_span() {
        assert_eq!(
            CalendarError::EmptyInput.display_rich(),
            "error: empty calendar expression"
        );
    }

    #[test]
    fn test_syntax_error_classification() {
        assert!(CalendarError::EmptyInput.is_syntax_error());
        assert!(!CalendarError::unknown_timezone("Nowhere", Span::new(6, 13), "daily Nowhere")
            .is_syntax_error());
        assert!(!CalendarError::TimezoneDatabaseUnavailable {
            name: "UTC".into()
        }
        .is_syntax_error());
    }
}
