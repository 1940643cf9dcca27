//! Recursive descent WKT parser.

use std::iter::Peekable;

use geotext_types::cartesian::Coord;
use geotext_types::impls::{
    GeometryCollection, LineString, LinearRing, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};
use geotext_types::{Geom, Geometry, GeometryType};

use crate::error::WktError;
use crate::tokenizer::{Token, TokenKind, Tokenizer};

/// Default maximum nesting depth of parenthesized lists.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// WKT reader configuration.
///
/// ```
/// use geotext_wkt::WktReader;
///
/// let reader = WktReader::new().with_max_depth(2);
/// assert!(reader.parse("POLYGON((0 0, 1 0, 1 1, 0 0))").is_ok());
/// assert!(reader.parse("MULTIPOLYGON(((0 0, 1 0, 1 1, 0 0)))").is_err());
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WktReader {
    max_depth: usize,
}

impl Default for WktReader {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl WktReader {
    /// Creates a reader with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of nested parenthesized lists.
    ///
    /// Every opening parenthesis counts as one level, so `POINT(1 2)` has depth 1 and a polygon inside a
    /// multipolygon has depth 3.
    pub fn with_max_depth(self, max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Maximum nesting depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parses one geometry from WKT text.
    ///
    /// The whole input must be consumed by the geometry. No partial result is returned on error.
    pub fn parse(&self, text: &str) -> Result<Geom, WktError> {
        let mut parser = Parser::new(text, self.max_depth);
        let geom = parser.geometry_tagged_text()?;
        parser.end_of_input()?;

        log::trace!("Parsed {} geometry from WKT", geom.geometry_type());
        Ok(geom)
    }
}

struct Parser<'a> {
    tokens: Peekable<Tokenizer<'a>>,
    input_len: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, max_depth: usize) -> Self {
        Self {
            tokens: Tokenizer::new(text).peekable(),
            input_len: text.len(),
            depth: 0,
            max_depth,
        }
    }

    fn next_token(&mut self) -> Result<Option<Token<'a>>, WktError> {
        self.tokens.next().transpose()
    }

    fn peek_kind(&mut self) -> Result<Option<TokenKind<'a>>, WktError> {
        match self.tokens.peek() {
            Some(Ok(token)) => Ok(Some(token.kind)),
            Some(Err(err)) => Err(err.clone()),
            None => Ok(None),
        }
    }

    fn unexpected(&self, expected: &str, found: Option<Token<'_>>) -> WktError {
        match found {
            Some(token) => WktError::Syntax {
                expected: expected.to_string(),
                found: token.kind.to_string(),
                position: token.position,
            },
            None => WktError::Syntax {
                expected: expected.to_string(),
                found: "end of input".to_string(),
                position: self.input_len,
            },
        }
    }

    fn end_of_input(&mut self) -> Result<(), WktError> {
        match self.next_token()? {
            None => Ok(()),
            token => Err(self.unexpected("end of input", token)),
        }
    }

    /// `<geometry tagged text>`
    fn geometry_tagged_text(&mut self) -> Result<Geom, WktError> {
        let (keyword, position) = match self.next_token()? {
            Some(Token {
                kind: TokenKind::Word(word),
                position,
            }) => (word, position),
            token => return Err(self.unexpected("geometry type", token)),
        };

        let geometry_type = keyword.parse::<GeometryType>().map_err(|_| {
            WktError::UnsupportedGeometryType {
                keyword: keyword.to_string(),
                position,
            }
        })?;

        Ok(match geometry_type {
            GeometryType::Point => self.point_text()?.into(),
            GeometryType::LineString => LineString::new(self.linestring_text()?).into(),
            GeometryType::Polygon => self.polygon_text()?.into(),
            GeometryType::MultiPoint => self.multipoint_text()?.into(),
            GeometryType::MultiLineString => self.multilinestring_text()?.into(),
            GeometryType::MultiPolygon => self.multipolygon_text()?.into(),
            GeometryType::GeometryCollection => self.geometrycollection_text()?.into(),
        })
    }

    /// Consumes `EMPTY` or `(`. Returns true for `EMPTY`.
    fn empty_or_open(&mut self) -> Result<bool, WktError> {
        match self.next_token()? {
            Some(Token {
                kind: TokenKind::Word(word),
                ..
            }) if word.eq_ignore_ascii_case("EMPTY") => Ok(true),
            Some(Token {
                kind: TokenKind::LeftParen,
                ..
            }) => {
                self.depth += 1;
                if self.depth > self.max_depth {
                    return Err(WktError::NestingTooDeep {
                        max_depth: self.max_depth,
                    });
                }

                Ok(false)
            }
            token => Err(self.unexpected("'EMPTY' or '('", token)),
        }
    }

    /// Consumes `,` or `)`. Returns true if the list continues.
    fn list_continues(&mut self) -> Result<bool, WktError> {
        match self.next_token()? {
            Some(Token {
                kind: TokenKind::Comma,
                ..
            }) => Ok(true),
            Some(Token {
                kind: TokenKind::RightParen,
                ..
            }) => {
                self.depth -= 1;
                Ok(false)
            }
            token => Err(self.unexpected("',' or ')'", token)),
        }
    }

    /// `EMPTY | ( item {, item}* )`
    fn list<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, WktError>,
    ) -> Result<Vec<T>, WktError> {
        if self.empty_or_open()? {
            return Ok(vec![]);
        }

        let mut items = vec![];
        loop {
            items.push(item(self)?);
            if !self.list_continues()? {
                break;
            }
        }

        Ok(items)
    }

    fn number(&mut self) -> Result<f64, WktError> {
        match self.next_token()? {
            Some(Token {
                kind: TokenKind::Number(value),
                ..
            }) => Ok(value),
            token => Err(self.unexpected("number", token)),
        }
    }

    fn coordinate(&mut self) -> Result<Coord, WktError> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(Coord::new(x, y))
    }

    fn point_text(&mut self) -> Result<Point, WktError> {
        if self.empty_or_open()? {
            return Ok(Point::empty());
        }

        let coord = self.coordinate()?;
        match self.next_token()? {
            Some(Token {
                kind: TokenKind::RightParen,
                ..
            }) => {
                self.depth -= 1;
                Ok(coord.into())
            }
            token => Err(self.unexpected("')'", token)),
        }
    }

    fn linestring_text(&mut self) -> Result<Vec<Coord>, WktError> {
        self.list(Self::coordinate)
    }

    fn polygon_text(&mut self) -> Result<Polygon, WktError> {
        let mut rings = self
            .list(|p| p.linestring_text().map(LinearRing::new))?
            .into_iter();

        Ok(match rings.next() {
            Some(exterior) => Polygon::new(exterior, rings.collect()),
            None => Polygon::empty(),
        })
    }

    /// Members may be written both as `1 2` and as `(1 2)`.
    fn multipoint_text(&mut self) -> Result<MultiPoint, WktError> {
        let points = self.list(|p| match p.peek_kind()? {
            Some(TokenKind::Number(_)) => Ok(Point::from(p.coordinate()?)),
            _ => p.point_text(),
        })?;

        Ok(points.into())
    }

    fn multilinestring_text(&mut self) -> Result<MultiLineString, WktError> {
        let lines = self.list(|p| p.linestring_text().map(LineString::new))?;
        Ok(lines.into())
    }

    fn multipolygon_text(&mut self) -> Result<MultiPolygon, WktError> {
        let polygons = self.list(Self::polygon_text)?;
        Ok(polygons.into())
    }

    fn geometrycollection_text(&mut self) -> Result<GeometryCollection, WktError> {
        let geometries = self.list(Self::geometry_tagged_text)?;
        Ok(geometries.into())
    }
}
