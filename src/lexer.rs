use crate::ast::{Shorthand, Weekday};
use crate::error::Span;

/// Characters trimmed from both ends: ASCII whitespace including vertical tab
/// and form feed, plus NUL.
fn is_trimmed(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0B' | '\x0C')
}

/// Trim surrounding whitespace and collapse every run of spaces into one.
///
/// Only the space character is collapsed; a tab inside an expression stays put
/// and is later rejected by the parser.
pub fn normalize(input: &str) -> String {
    let trimmed = input.trim_matches(is_trimmed);
    let mut out = String::with_capacity(trimmed.len());
    let mut prev_space = false;
    for c in trimmed.chars() {
        if c == ' ' {
            if !prev_space {
                out.push(c);
            }
            prev_space = true;
        } else {
            out.push(c);
            prev_space = false;
        }
    }
    out
}

/// Token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Words
    Shorthand(Shorthand),
    DayName(Weekday),
    Word, // any other run of ASCII letters

    // Literals
    Digits,

    // Punctuation
    Comma,
    DotDot,
    Dot,
    Slash,
    Dash,
    Tilde,
    Colon,
    Star,
    Space,

    /// Anything else. Only legal inside a trailing timezone name.
    Other,
}

impl TokenKind {
    /// Letters, digits and `*` can start a section or a timezone name.
    pub fn starts_section(&self) -> bool {
        matches!(
            self,
            Self::Shorthand(_) | Self::DayName(_) | Self::Word | Self::Digits | Self::Star
        )
    }

    pub fn is_word(&self) -> bool {
        matches!(self, Self::Shorthand(_) | Self::DayName(_) | Self::Word)
    }
}

pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    /// Split the input into tokens. Never fails: characters with no meaning in
    /// the grammar become [`TokenKind::Other`] and are judged by the parser.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while self.pos < self.bytes.len() {
            let start = self.pos;
            let ch = self.bytes[self.pos];

            let kind = if ch.is_ascii_alphabetic() {
                self.lex_word()
            } else if ch.is_ascii_digit() {
                self.eat_while(|b| b.is_ascii_digit());
                TokenKind::Digits
            } else if ch == b'.' {
                if self.bytes.get(self.pos + 1) == Some(&b'.') {
                    self.pos += 2;
                    TokenKind::DotDot
                } else {
                    self.pos += 1;
                    TokenKind::Dot
                }
            } else {
                self.lex_punct()
            };

            tokens.push(Token {
                kind,
                span: Span::new(start, self.pos),
            });
        }
        tokens
    }

    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while self.pos < self.bytes.len() && pred(self.bytes[self.pos]) {
            self.pos += 1;
        }
    }

    fn lex_punct(&mut self) -> TokenKind {
        let kind = match self.bytes[self.pos] {
            b',' => TokenKind::Comma,
            b'/' => TokenKind::Slash,
            b'-' => TokenKind::Dash,
            b'~' => TokenKind::Tilde,
            b':' => TokenKind::Colon,
            b'*' => TokenKind::Star,
            b' ' => TokenKind::Space,
            _ => {
                // Step over a whole UTF-8 scalar so spans stay on char boundaries.
                let width = self.input[self.pos..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                self.pos += width;
                return TokenKind::Other;
            }
        };
        self.pos += 1;
        kind
    }

    fn lex_word(&mut self) -> TokenKind {
        let start = self.pos;
        self.eat_while(|b| b.is_ascii_alphabetic());
        let word = self.input[start..self.pos].to_ascii_lowercase();

        if let Some(day) = Weekday::parse(&word) {
            return TokenKind::DayName(day);
        }
        match Shorthand::parse(&word) {
            Some(shorthand) => TokenKind::Shorthand(shorthand),
            None => TokenKind::Word,
        }
    }
}
