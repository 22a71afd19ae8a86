//! A forgiving reader for the array literals pages embed in `<script>` tags.
//!
//! The embedded data is close to JSON but not quite: strings may use single quotes, containers
//! may carry trailing commas, and constants may be spelled the Python way (`True`, `None`).
//! Everything is read into a [`serde_json::Value`] so the rest of the crate only ever sees JSON.
//!
//! Accepted:
//! - objects `{...}` with string, number or bare-identifier keys,
//! - arrays `[...]` and tuples `(...)` (read as arrays),
//! - single- or double-quoted strings with the usual backslash escapes (`\n`, `\uXXXX`, `\xHH`),
//! - integers & floats, with an optional exponent,
//! - `true`/`True`, `false`/`False`, `null`/`None`.

use serde_json::{Map, Number, Value};

/// Containers nested deeper than this are rejected instead of recursing further.
const MAX_DEPTH: usize = 128;

/// A parse error with the byte offset it was raised at.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("parse error at position {position}: {message}")]
pub struct LiteralError {
    pub message: String,
    pub position: usize,
}

/// Parse `src` as a single literal value, surrounded by optional whitespace.
///
/// ```rust
/// use tally_spider::literal;
///
/// let value = literal::parse("[{'ticker': 'AAPL', 'qty': 10,},]").unwrap();
/// assert_eq!(value, serde_json::json!([{ "ticker": "AAPL", "qty": 10 }]));
/// ```
pub fn parse(src: &str) -> Result<Value, LiteralError> {
    let mut parser = Parser { src, pos: 0, depth: 0 };
    let value = parser.value()?;
    parser.skip_ws();
    if parser.pos < src.len() {
        return Err(parser.error("unexpected trailing characters"));
    }
    Ok(value)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, message: impl Into<String>) -> LiteralError {
        LiteralError {
            message: message.into(),
            position: self.pos,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn value(&mut self) -> Result<Value, LiteralError> {
        self.skip_ws();
        match self.peek() {
            Some('[') => self.sequence('[', ']'),
            Some('(') => self.sequence('(', ')'),
            Some('{') => self.object(),
            Some(quote @ ('\'' | '"')) => self.string(quote).map(Value::String),
            Some(c) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => self.number(),
            Some(c) if is_ident_start(c) => self.constant(),
            Some(c) => Err(self.error(format!("unexpected character '{c}'"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn enter(&mut self) -> Result<(), LiteralError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        Ok(())
    }

    /// `[a, b, c,]` or `(a, b, c,)`.
    fn sequence(&mut self, open: char, close: char) -> Result<Value, LiteralError> {
        self.enter()?;
        self.eat(open);
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.eat(close) {
                break;
            }
            items.push(self.value()?);
            self.skip_ws();
            if self.eat(',') {
                continue;
            }
            if self.eat(close) {
                break;
            }
            return Err(self.error(format!("expected ',' or '{close}'")));
        }
        self.depth -= 1;
        Ok(Value::Array(items))
    }

    /// `{key: value, ...,}`.
    fn object(&mut self) -> Result<Value, LiteralError> {
        self.enter()?;
        self.eat('{');
        let mut map = Map::new();
        loop {
            self.skip_ws();
            if self.eat('}') {
                break;
            }
            let key = self.key()?;
            self.skip_ws();
            if !self.eat(':') {
                return Err(self.error("expected ':' after object key"));
            }
            let value = self.value()?;
            map.insert(key, value);
            self.skip_ws();
            if self.eat(',') {
                continue;
            }
            if self.eat('}') {
                break;
            }
            return Err(self.error("expected ',' or '}'"));
        }
        self.depth -= 1;
        Ok(Value::Object(map))
    }

    fn key(&mut self) -> Result<String, LiteralError> {
        match self.peek() {
            Some(quote @ ('\'' | '"')) => self.string(quote),
            Some(c) if c == '-' || c.is_ascii_digit() => match self.number()? {
                Value::Number(n) => Ok(n.to_string()),
                _ => Err(self.error("invalid numeric key")),
            },
            Some(c) if is_ident_start(c) => Ok(self.ident().to_string()),
            Some(c) => Err(self.error(format!("unexpected character '{c}' in object key"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn string(&mut self, quote: char) -> Result<String, LiteralError> {
        let start = self.pos;
        self.eat(quote);
        let mut out = String::new();
        loop {
            match self.bump() {
                None => {
                    self.pos = start;
                    return Err(self.error("unterminated string"));
                }
                Some(c) if c == quote => return Ok(out),
                Some('\\') => self.escape(&mut out)?,
                Some(c) => out.push(c),
            }
        }
    }

    fn escape(&mut self, out: &mut String) -> Result<(), LiteralError> {
        match self.bump() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('0') => out.push('\0'),
            Some('x') => {
                let code = self.hex(2)?;
                out.push(char::from_u32(code).ok_or_else(|| self.error("invalid \\x escape"))?);
            }
            Some('u') => {
                let code = self.hex(4)?;
                out.push(self.utf16(code)?);
            }
            // a newline after a backslash continues the string
            Some('\n') => {}
            Some(c @ ('\\' | '\'' | '"' | '/')) => out.push(c),
            // unknown escapes are kept verbatim
            Some(c) => {
                out.push('\\');
                out.push(c);
            }
            None => return Err(self.error("unterminated escape")),
        }
        Ok(())
    }

    fn hex(&mut self, digits: usize) -> Result<u32, LiteralError> {
        let end = self.pos + digits;
        let code = self
            .src
            .get(self.pos..end)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .ok_or_else(|| self.error(format!("expected {digits} hex digits")))?;
        self.pos = end;
        Ok(code)
    }

    /// Resolve a `\u` escape, pairing surrogates when a low half follows.
    fn utf16(&mut self, high: u32) -> Result<char, LiteralError> {
        if !(0xD800..0xDC00).contains(&high) {
            return char::from_u32(high).ok_or_else(|| self.error("invalid \\u escape"));
        }
        if !self.src[self.pos..].starts_with("\\u") {
            return Err(self.error("unpaired surrogate in \\u escape"));
        }
        self.pos += 2;
        let low = self.hex(4)?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err(self.error("invalid low surrogate in \\u escape"));
        }
        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        char::from_u32(code).ok_or_else(|| self.error("invalid \\u escape"))
    }

    fn number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        let mut text = String::new();
        if self.eat('-') {
            text.push('-');
        } else {
            self.eat('+');
        }
        let mut is_float = false;
        while let Some(c) = self.peek() {
            match c {
                '0'..='9' => text.push(c),
                // digit separators
                '_' => {}
                '.' => {
                    is_float = true;
                    text.push(c);
                }
                'e' | 'E' => {
                    is_float = true;
                    text.push(c);
                    self.bump();
                    if let Some(sign @ ('+' | '-')) = self.peek() {
                        text.push(sign);
                        self.bump();
                    }
                    continue;
                }
                _ => break,
            }
            self.bump();
        }

        let number = if is_float {
            text.parse::<f64>().ok().and_then(Number::from_f64)
        } else {
            text.parse::<i64>()
                .map(Number::from)
                .ok()
                .or_else(|| text.parse::<u64>().ok().map(Number::from))
        };
        number.map(Value::Number).ok_or_else(|| LiteralError {
            message: format!("invalid number \"{}\"", &self.src[start..self.pos]),
            position: start,
        })
    }

    fn ident(&mut self) -> &'a str {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn constant(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        match self.ident() {
            "true" | "True" => Ok(Value::Bool(true)),
            "false" | "False" => Ok(Value::Bool(false)),
            "null" | "None" | "undefined" => Ok(Value::Null),
            other => Err(LiteralError {
                message: format!("unknown name \"{other}\""),
                position: start,
            }),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

//////////////////////////////////////////////////////////////
// -- TESTS --
//////////////////////////////////////////////////////////////
