// Hand-rolled recursive descent parser for calendar event expressions.
//
//   expression = shorthand [ " " timezone ]
//              | calendar [ " " timezone ]
//   calendar   = weekdays [ " " date ] [ " " time ]
//              | date [ " " time ]
//              | time
//   weekdays   = weekday-item { "," weekday-item } [ "," ]
//   weekday-item = weekday [ ".." weekday ]
//   date       = [ field "-" ] field ( "-" | "~" ) field
//   time       = field ":" field [ ":" seconds-field ]
//   field      = "*" | range-step { "," range-step }
//   range-step = value [ ".." value ] [ "/" value ]
//   value      = digits                  (seconds: digits [ "." digits ])
//   timezone   = not-digit-or-star { any }

use crate::ast::*;
use crate::error::{CalendarError, Span};
use crate::lexer::{normalize, Lexer, Token, TokenKind};

/// Whether a field admits fractional values. Only seconds do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Numeric {
    Integer,
    Decimal,
}

/// What follows a complete section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Next {
    End,
    /// A space, then a digit or `*`.
    Section,
    /// A space, then anything else.
    Timezone,
}

enum NumericSection {
    Date(DateSpec),
    Time(TimeSpec),
}

/// Parser state: consumes a slice of tokens.
struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    input: &'a str,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], input: &'a str) -> Self {
        Self {
            tokens,
            pos: 0,
            input,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn advance(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn current_span(&self) -> Span {
        if let Some(tok) = self.peek() {
            tok.span
        } else {
            Span::new(self.input.len(), self.input.len())
        }
    }

    fn text(&self, span: Span) -> &'a str {
        &self.input[span.start..span.end]
    }

    /// Human-readable name of the current token, for error messages.
    fn describe(&self) -> String {
        match self.peek() {
            None => "end of input".into(),
            Some(tok) if tok.kind == TokenKind::Space => "a space".into(),
            Some(tok) => format!("'{}'", self.text(tok.span)),
        }
    }

    fn malformed(&self, message: impl Into<String>, span: Span) -> CalendarError {
        CalendarError::malformed(message, span, self.input)
    }

    fn consume_kind(
        &mut self,
        expected: &str,
        check: impl Fn(&TokenKind) -> bool,
    ) -> Result<Span, CalendarError> {
        let span = self.current_span();
        match self.peek() {
            Some(tok) if check(&tok.kind) => {
                self.pos += 1;
                Ok(span)
            }
            _ => Err(self.malformed(format!("expected {expected}, found {}", self.describe()), span)),
        }
    }

    fn at(&self, check: impl Fn(&TokenKind) -> bool) -> bool {
        self.peek_kind().is_some_and(check)
    }

    // --- Grammar productions ---

    fn parse_expression(&mut self) -> Result<CalendarExpression, CalendarError> {
        let span = self.current_span();
        let (expr, next) = match self.peek_kind() {
            Some(TokenKind::Shorthand(shorthand)) => {
                let shorthand = *shorthand;
                self.advance();
                trace!("shorthand '{}'", shorthand.as_str());
                (CalendarExpr::Shorthand(shorthand), self.after_section()?)
            }
            Some(TokenKind::DayName(_) | TokenKind::Digits | TokenKind::Star) => {
                self.parse_calendar()?
            }
            _ => {
                return Err(self.malformed(
                    format!(
                        "expected a shorthand, weekday, date or time, found {}",
                        self.describe()
                    ),
                    span,
                ));
            }
        };

        let mut expression = CalendarExpression::new(expr);
        expression.timezone = self.parse_tail(next)?;
        Ok(expression)
    }

    // calendar = [weekdays] [date] [time], each separated by one space
    fn parse_calendar(&mut self) -> Result<(CalendarExpr, Next), CalendarError> {
        let mut weekdays = Vec::new();
        let mut date = None;
        let mut time = None;
        let mut next = Next::Section;

        if self.at(|k| matches!(k, TokenKind::DayName(_))) {
            weekdays = self.parse_weekday_list()?;
            trace!("weekday section with {} item(s)", weekdays.len());
            next = self.after_section()?;
        }

        if next == Next::Section {
            match self.parse_numeric_section(true)? {
                NumericSection::Date(spec) => {
                    trace!("date section '{spec}'");
                    date = Some(spec);
                    next = self.after_section()?;
                    if next == Next::Section {
                        if let NumericSection::Time(spec) = self.parse_numeric_section(false)? {
                            trace!("time section '{spec}'");
                            time = Some(spec);
                        }
                        next = self.after_section()?;
                    }
                }
                NumericSection::Time(spec) => {
                    trace!("time section '{spec}'");
                    time = Some(spec);
                    next = self.after_section()?;
                }
            }
        }

        Ok((
            CalendarExpr::Calendar {
                weekdays,
                date,
                time,
            },
            next,
        ))
    }

    /// Check the boundary after a section: end of input, or exactly one
    /// space followed by a further section (digit or `*`) or a timezone.
    fn after_section(&mut self) -> Result<Next, CalendarError> {
        let Some(tok) = self.peek() else {
            return Ok(Next::End);
        };
        let span = tok.span;
        if tok.kind != TokenKind::Space {
            if tok.kind.starts_section() {
                return Err(CalendarError::missing_separator(span, self.input));
            }
            return Err(self.trailing_from(span.start));
        }
        self.advance();

        // Anything that cannot open a section is timezone text, left for the
        // resolver to judge: `UTC`, `Europe/Berlin`, `+01:00`.
        match self.peek_kind() {
            Some(TokenKind::Digits | TokenKind::Star) => Ok(Next::Section),
            Some(_) => Ok(Next::Timezone),
            None => Ok(Next::End),
        }
    }

    /// Whatever is left once no more sections can follow.
    fn parse_tail(&mut self, next: Next) -> Result<Option<String>, CalendarError> {
        match next {
            Next::End => Ok(None),
            Next::Timezone => {
                let start = self.current_span().start;
                self.pos = self.tokens.len();
                let tz = &self.input[start..];
                trace!("timezone '{tz}'");
                Ok(Some(tz.to_string()))
            }
            Next::Section => Err(self.trailing_from(self.current_span().start)),
        }
    }

    fn trailing_from(&self, start: usize) -> CalendarError {
        CalendarError::trailing(Span::new(start, self.input.len()), self.input)
    }

    // weekdays = weekday_item {"," weekday_item} [","]
    fn parse_weekday_list(&mut self) -> Result<Vec<WeekdayItem>, CalendarError> {
        let mut items = vec![self.parse_weekday_item()?];

        while self.at(|k| *k == TokenKind::Comma) {
            self.advance();
            let span = self.current_span();
            match self.peek_kind() {
                Some(TokenKind::DayName(_)) => items.push(self.parse_weekday_item()?),
                Some(kind) if kind.is_word() => {
                    return Err(self.malformed(format!("unknown weekday {}", self.describe()), span));
                }
                Some(TokenKind::Comma) => {
                    return Err(self.malformed("empty item in weekday list", span));
                }
                // A trailing comma closes the list.
                _ => break,
            }
        }

        Ok(items)
    }

    // weekday_item = weekday [".." weekday]
    fn parse_weekday_item(&mut self) -> Result<WeekdayItem, CalendarError> {
        let first = self.parse_weekday("a weekday")?;
        if !self.at(|k| *k == TokenKind::DotDot) {
            return Ok(WeekdayItem::Single(first));
        }
        self.advance();
        let last = self.parse_weekday("a weekday after '..'")?;
        if self.at(|k| *k == TokenKind::DotDot) {
            let span = self.current_span();
            return Err(self.malformed("a weekday range takes exactly two endpoints", span));
        }
        Ok(WeekdayItem::Range(first, last))
    }

    fn parse_weekday(&mut self, expected: &str) -> Result<Weekday, CalendarError> {
        match self.peek_kind() {
            Some(TokenKind::DayName(day)) => {
                let day = *day;
                self.advance();
                Ok(day)
            }
            _ => {
                let span = self.current_span();
                Err(self.malformed(format!("expected {expected}, found {}", self.describe()), span))
            }
        }
    }

    /// A date or a time: both start with a numeric field, and the separator
    /// after it decides which.
    fn parse_numeric_section(&mut self, allow_date: bool) -> Result<NumericSection, CalendarError> {
        let first = self.parse_field_list(Numeric::Integer)?;
        let span = self.current_span();

        match self.peek_kind() {
            Some(TokenKind::Colon) => {
                self.advance();
                self.parse_time_rest(first).map(NumericSection::Time)
            }
            Some(TokenKind::Dash | TokenKind::Tilde) if allow_date => {
                self.parse_date_rest(first).map(NumericSection::Date)
            }
            Some(TokenKind::Dash | TokenKind::Tilde) => Err(self.malformed(
                "expected a time after the date, found another date",
                span,
            )),
            _ => {
                let expected = if allow_date {
                    "'-', '~' or ':'"
                } else {
                    "':'"
                };
                Err(self.malformed(format!("expected {expected}, found {}", self.describe()), span))
            }
        }
    }

    // date = [year "-"] month ("-" | "~") day, with `first` already parsed
    fn parse_date_rest(&mut self, first: FieldList) -> Result<DateSpec, CalendarError> {
        let from_end = self.at(|k| *k == TokenKind::Tilde);
        self.advance();
        let second = self.parse_field_list(Numeric::Integer)?;

        let spec = if from_end {
            DateSpec {
                year: None,
                month: first,
                from_end: true,
                day: second,
            }
        } else {
            match self.peek_kind() {
                Some(TokenKind::Dash | TokenKind::Tilde) => {
                    let from_end = self.at(|k| *k == TokenKind::Tilde);
                    self.advance();
                    let day = self.parse_field_list(Numeric::Integer)?;
                    DateSpec {
                        year: Some(first),
                        month: second,
                        from_end,
                        day,
                    }
                }
                _ => DateSpec {
                    year: None,
                    month: first,
                    from_end: false,
                    day: second,
                },
            }
        };

        match self.peek_kind() {
            Some(TokenKind::Dash | TokenKind::Tilde) => {
                let span = self.current_span();
                Err(self.malformed("a date has at most three fields", span))
            }
            // The day digits ran straight into an hour: `2030-01-0112:30`.
            Some(TokenKind::Colon) => {
                let start = self.tokens[self.pos - 1].span.start;
                let span = Span::new(start, self.current_span().end);
                Err(CalendarError::missing_separator(span, self.input))
            }
            _ => Ok(spec),
        }
    }

    // time = hour ":" minute [":" second], with `hour` and the first ':' consumed
    fn parse_time_rest(&mut self, hour: FieldList) -> Result<TimeSpec, CalendarError> {
        let minute = self.parse_field_list(Numeric::Integer)?;
        let second = if self.at(|k| *k == TokenKind::Colon) {
            self.advance();
            Some(self.parse_field_list(Numeric::Decimal)?)
        } else {
            None
        };

        if self.at(|k| *k == TokenKind::Colon) {
            let span = self.current_span();
            return Err(self.malformed("a time has at most three fields", span));
        }

        Ok(TimeSpec {
            hour,
            minute,
            second,
        })
    }

    // field = "*" | range_step {"," range_step}
    fn parse_field_list(&mut self, numeric: Numeric) -> Result<FieldList, CalendarError> {
        let span = self.current_span();
        match self.peek_kind() {
            Some(TokenKind::Star) => {
                self.advance();
                let next = self.current_span();
                match self.peek_kind() {
                    Some(TokenKind::Comma) => {
                        Err(self.malformed("'*' cannot be combined with a list", next))
                    }
                    Some(TokenKind::DotDot | TokenKind::Slash) => Err(self.malformed(
                        "'*' cannot take a range or a repetition",
                        next,
                    )),
                    _ => Ok(FieldList::Any),
                }
            }
            Some(TokenKind::Digits) => {
                let mut items = vec![self.parse_range_step(numeric)?];
                while self.at(|k| *k == TokenKind::Comma) {
                    let comma = self.current_span();
                    self.advance();
                    // Unlike weekday lists, a numeric list may not end in a comma.
                    if !self.at(|k| *k == TokenKind::Digits) {
                        return Err(self.malformed(
                            "a ',' in a date or time field must be followed by another value",
                            comma,
                        ));
                    }
                    items.push(self.parse_range_step(numeric)?);
                }
                Ok(FieldList::Items(items))
            }
            _ => Err(self.malformed(
                format!("expected a number or '*', found {}", self.describe()),
                span,
            )),
        }
    }

    // range_step = value [".." value] ["/" value]
    fn parse_range_step(&mut self, numeric: Numeric) -> Result<RangeStep, CalendarError> {
        let start = self.parse_value(numeric)?;

        let end = if self.at(|k| *k == TokenKind::DotDot) {
            self.advance();
            let end = self.parse_value(numeric)?;
            if self.at(|k| *k == TokenKind::DotDot) {
                let span = self.current_span();
                return Err(self.malformed("a range takes exactly two endpoints", span));
            }
            Some(end)
        } else {
            None
        };

        let step = if self.at(|k| *k == TokenKind::Slash) {
            self.advance();
            let step = self.parse_value(numeric)?;
            let span = self.current_span();
            match self.peek_kind() {
                Some(TokenKind::DotDot) => {
                    return Err(self.malformed("a repetition cannot be a range", span));
                }
                Some(TokenKind::Slash) => {
                    return Err(self.malformed("a value takes at most one repetition", span));
                }
                _ => {}
            }
            Some(step)
        } else {
            None
        };

        Ok(RangeStep { start, end, step })
    }

    // value = digits ["." digits]   (fraction only for seconds)
    fn parse_value(&mut self, numeric: Numeric) -> Result<Value, CalendarError> {
        let whole = self.consume_kind("a number", |k| *k == TokenKind::Digits)?;
        let whole = self.text(whole);

        if !self.at(|k| *k == TokenKind::Dot) {
            return Ok(Value::integer(whole));
        }
        let dot = self.current_span();
        if numeric == Numeric::Integer {
            return Err(self.malformed(
                "fractional values are only allowed in the seconds field",
                dot,
            ));
        }
        self.advance();
        let fraction = self.consume_kind("digits after '.'", |k| *k == TokenKind::Digits)?;
        let fraction = self.text(fraction);
        if self.at(|k| *k == TokenKind::Dot) {
            let span = self.current_span();
            return Err(self.malformed("a value takes at most one fractional part", span));
        }
        Ok(Value::decimal(whole, fraction))
    }
}

/// Parse a calendar expression without resolving its timezone.
///
/// The input is normalized first (see [`normalize`]); spans in the returned
/// error refer to the normalized text.
pub fn parse(input: &str) -> Result<CalendarExpression, CalendarError> {
    let normalized = normalize(input);
    if normalized.is_empty() {
        return Err(CalendarError::EmptyInput);
    }

    let tokens = Lexer::new(&normalized).tokenize();
    let mut parser = Parser::new(&tokens, &normalized);
    parser.parse_expression()
}
