//! Splits WKT text into tokens.

use std::fmt::{Display, Formatter};
use std::iter::FusedIterator;

use crate::error::WktError;

/// Kind and value of a WKT token.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TokenKind<'a> {
    /// Maximal run of ASCII letters, case preserved.
    Word(&'a str),
    /// Numeric literal.
    Number(f64),
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
}

impl Display for TokenKind<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Word(word) => write!(f, "word {word:?}"),
            TokenKind::Number(number) => write!(f, "number {number}"),
            TokenKind::LeftParen => f.write_str("'('"),
            TokenKind::RightParen => f.write_str("')'"),
            TokenKind::Comma => f.write_str("','"),
        }
    }
}

/// A token with its byte offset in the input.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Token<'a> {
    /// Kind and value.
    pub kind: TokenKind<'a>,
    /// Byte offset of the first character of the token.
    pub position: usize,
}

/// Iterator over the tokens of a WKT string.
///
/// Whitespace between tokens is skipped. Numbers are always read with `.` as the decimal separator. After
/// the first error the iterator returns `None`.
///
/// ```
/// use geotext_wkt::tokenizer::{TokenKind, Tokenizer};
///
/// let kinds: Vec<_> = Tokenizer::new("point (1 -2.5e1)")
///     .map(|t| t.map(|t| t.kind))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(
///     kinds,
///     [
///         TokenKind::Word("point"),
///         TokenKind::LeftParen,
///         TokenKind::Number(1.0),
///         TokenKind::Number(-25.0),
///         TokenKind::RightParen,
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    position: usize,
    can_continue: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer over the given text.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            can_continue: true,
        }
    }

    /// Byte offset of the next unread character.
    pub fn position(&self) -> usize {
        self.position
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.as_bytes().get(self.position).copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if !c.is_whitespace() {
                break;
            }
            self.position += c.len_utf8();
        }
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.position;
        while self.peek_byte().is_some_and(|b| b.is_ascii_digit()) {
            self.position += 1;
        }
        self.position - start
    }

    fn symbol(&mut self, kind: TokenKind<'a>) -> Token<'a> {
        let token = Token {
            kind,
            position: self.position,
        };
        self.position += 1;
        token
    }

    fn read_word(&mut self) -> Token<'a> {
        let start = self.position;
        while self.peek_byte().is_some_and(|b| b.is_ascii_alphabetic()) {
            self.position += 1;
        }

        Token {
            kind: TokenKind::Word(&self.input[start..self.position]),
            position: start,
        }
    }

    fn read_number(&mut self) -> Result<Token<'a>, WktError> {
        let start = self.position;
        if matches!(self.peek_byte(), Some(b'+' | b'-')) {
            self.position += 1;
        }

        let mut digits = self.skip_digits();
        if self.peek_byte() == Some(b'.') {
            self.position += 1;
            digits += self.skip_digits();
        }

        if digits == 0 {
            return Err(self.lex_error_at(start));
        }

        if matches!(self.peek_byte(), Some(b'e' | b'E')) {
            self.position += 1;
            if matches!(self.peek_byte(), Some(b'+' | b'-')) {
                self.position += 1;
            }

            if self.skip_digits() == 0 {
                return Err(self.lex_error_at(self.position));
            }
        }

        // A number must not run into another number or a word, e.g. `1.2.3` or `10x`.
        if self
            .peek_byte()
            .is_some_and(|b| b == b'.' || b.is_ascii_alphanumeric())
        {
            return Err(self.lex_error_at(self.position));
        }

        let text = &self.input[start..self.position];
        // Literals out of the f64 range cannot be written back.
        let value = text
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| self.lex_error_at(start))?;

        Ok(Token {
            kind: TokenKind::Number(value),
            position: start,
        })
    }

    fn lex_error_at(&self, position: usize) -> WktError {
        // At the end of input the last character of the malformed run is reported.
        let (character, position) = match self.input[position..].chars().next() {
            Some(c) => (c, position),
            None => match self.input[..position].chars().next_back() {
                Some(c) => (c, position - c.len_utf8()),
                None => (' ', position),
            },
        };

        WktError::Lex {
            character,
            position,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, WktError>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.can_continue {
            return None;
        }

        self.skip_whitespace();
        let result = match self.peek_char()? {
            '(' => Ok(self.symbol(TokenKind::LeftParen)),
            ')' => Ok(self.symbol(TokenKind::RightParen)),
            ',' => Ok(self.symbol(TokenKind::Comma)),
            c if c.is_ascii_alphabetic() => Ok(self.read_word()),
            c if c.is_ascii_digit() || matches!(c, '+' | '-' | '.') => self.read_number(),
            character => Err(WktError::Lex {
                character,
                position: self.position,
            }),
        };

        if result.is_err() {
            self.can_continue = false;
        }

        Some(result)
    }
}

impl FusedIterator for Tokenizer<'_> {}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn kinds(input: &str) -> Result<Vec<TokenKind<'_>>, WktError> {
        Tokenizer::new(input).map(|t| t.map(|t| t.kind)).collect()
    }

    #[test]
    fn symbols_and_words() {
        assert_eq!(
            kinds("  MultiPoint\t(\n( 1 2 ) ,EMPTY)").expect("valid input"),
            [
                TokenKind::Word("MultiPoint"),
                TokenKind::LeftParen,
                TokenKind::LeftParen,
                TokenKind::Number(1.0),
                TokenKind::Number(2.0),
                TokenKind::RightParen,
                TokenKind::Comma,
                TokenKind::Word("EMPTY"),
                TokenKind::RightParen,
            ]
        );
        assert!(kinds("   ").expect("valid input").is_empty());
    }

    #[test]
    fn number_forms() {
        assert_eq!(
            kinds("0 -1 +2 3.25 .5 6. -7.5e2 8E-1 9e+0").expect("valid input"),
            [0.0, -1.0, 2.0, 3.25, 0.5, 6.0, -750.0, 0.8, 9.0]
                .map(TokenKind::Number)
                .to_vec()
        );
    }

    #[test]
    fn positions_are_byte_offsets() {
        let positions: Vec<_> = Tokenizer::new("POINT (15 20)")
            .map(|t| t.expect("valid input").position)
            .collect();
        assert_eq!(positions, [0, 6, 7, 10, 12]);
    }

    #[test]
    fn unknown_character() {
        let mut tokenizer = Tokenizer::new("POINT(1 2;");
        let results: Vec<_> = tokenizer.by_ref().collect();
        assert_eq!(results.len(), 5);
        assert_matches!(
            results.last(),
            Some(Err(WktError::Lex {
                character: ';',
                position: 9
            }))
        );
        assert_eq!(tokenizer.next(), None);
    }

    #[test]
    fn malformed_numbers() {
        assert_matches!(
            kinds("1.2.3"),
            Err(WktError::Lex {
                character: '.',
                position: 3
            })
        );
        assert_matches!(
            kinds("- 1"),
            Err(WktError::Lex {
                character: '-',
                position: 0
            })
        );
        assert_matches!(
            kinds("1ex"),
            Err(WktError::Lex {
                character: 'x',
                position: 2
            })
        );
        assert_matches!(kinds("10abc"), Err(WktError::Lex { position: 2, .. }));
        assert_matches!(
            kinds("1e"),
            Err(WktError::Lex {
                character: 'e',
                position: 1
            })
        );
    }

    #[test]
    fn out_of_range_numbers() {
        assert_matches!(
            kinds("0 1e999"),
            Err(WktError::Lex {
                character: '1',
                position: 2
            })
        );
        assert_matches!(kinds("-1E400"), Err(WktError::Lex { position: 0, .. }));
        assert_eq!(kinds("1e308").ok(), Some(vec![TokenKind::Number(1e308)]));
        assert_eq!(kinds("1e-999").ok(), Some(vec![TokenKind::Number(0.0)]));
    }

    #[test]
    fn non_ascii_letters_are_rejected() {
        assert_matches!(
            kinds("PÖINT"),
            Err(WktError::Lex {
                character: 'Ö',
                position: 1
            })
        );
    }
}
