//! FITS header card parsing
//!
//! A header is a run of 80-byte ASCII cards terminated by an `END` card and
//! padded to the 2880-byte block size.

use super::{CARD_SIZE, FitsError, padded_len};
use std::fmt;

/// Parsed value of a `KEYWORD = value / comment` card
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    Logical(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    /// Value indicator present but the field is blank
    Undefined,
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Logical(true) => f.write_str("T"),
            Self::Logical(false) => f.write_str("F"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::Undefined => Ok(()),
        }
    }
}

/// Valued keywords of one HDU header, in file order
///
/// Commentary cards (`COMMENT`, `HISTORY`, blank keywords) are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    cards: Vec<(String, HeaderValue)>,
}

impl Header {
    #[must_use]
    pub fn get(&self, keyword: &str) -> Option<&HeaderValue> {
        self.cards
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, v)| v)
    }

    /// Keyword of the first valued card
    #[must_use]
    pub fn first_keyword(&self) -> Option<&str> {
        self.cards.first().map(|(k, _)| k.as_str())
    }

    #[must_use]
    pub fn get_int(&self, keyword: &str) -> Option<i64> {
        match self.get(keyword)? {
            HeaderValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric value, accepting integers written without a decimal point
    #[must_use]
    pub fn get_real(&self, keyword: &str) -> Option<f64> {
        match self.get(keyword)? {
            HeaderValue::Real(v) => Some(*v),
            HeaderValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_text(&self, keyword: &str) -> Option<&str> {
        match self.get(keyword)? {
            HeaderValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_logical(&self, keyword: &str) -> Option<bool> {
        match self.get(keyword)? {
            HeaderValue::Logical(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Parse the header starting at `data[0]`
///
/// Returns the header and the number of bytes it occupies, padding included.
pub fn parse_header(data: &[u8], hdu: usize) -> Result<(Header, usize), FitsError> {
    let mut cards = Vec::new();

    for (idx, card) in data.chunks_exact(CARD_SIZE).enumerate() {
        let keyword = String::from_utf8_lossy(&card[..8]).trim_end().to_string();

        if keyword == "END" {
            let header_len = padded_len((idx + 1) * CARD_SIZE);
            if header_len > data.len() {
                return Err(FitsError::UnexpectedEof { hdu, section: "header" });
            }
            return Ok((Header { cards }, header_len));
        }

        // Only "= " in columns 9-10 marks a valued card
        if keyword.is_empty() || &card[8..10] != b"= " {
            continue;
        }

        let field = String::from_utf8_lossy(&card[10..]);
        cards.push((keyword, parse_value(&field)));
    }

    Err(FitsError::UnexpectedEof { hdu, section: "header" })
}

/// Parse the value field (columns 11-80) of a card
fn parse_value(field: &str) -> HeaderValue {
    let field = field.trim_start();

    if let Some(rest) = field.strip_prefix('\'') {
        return HeaderValue::Text(parse_quoted(rest));
    }

    let value = field.split_once('/').map_or(field, |(v, _)| v).trim();

    match value {
        "" => HeaderValue::Undefined,
        "T" => HeaderValue::Logical(true),
        "F" => HeaderValue::Logical(false),
        _ => {
            if let Ok(v) = value.parse::<i64>() {
                HeaderValue::Integer(v)
            } else if let Ok(v) = value.replace(['D', 'd'], "E").parse::<f64>() {
                HeaderValue::Real(v)
            } else {
                // Complex and other exotic values are kept verbatim
                HeaderValue::Text(value.to_string())
            }
        }
    }
}

/// Read a quoted string body; `''` is an escaped quote, trailing blanks are insignificant
fn parse_quoted(rest: &str) -> String {
    let mut text = String::new();
    let mut chars = rest.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\'' {
            if chars.peek() == Some(&'\'') {
                text.push('\'');
                chars.next();
            } else {
                break;
            }
        } else {
            text.push(c);
        }
    }

    text.trim_end().to_string()
}
