use tabula_db_core::types::Row;
use tabula_db_core::types::value::{Value, parse_date};

use super::tokenizer::Token;

pub(super) type ParseResult<T> = Result<T, String>;

/// Walks a token slice left to right.
pub(super) struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(super) fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub(super) fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    pub(super) fn next(&mut self) -> Option<&'a Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    pub(super) fn at_keyword(&self, kw: &str) -> bool {
        matches!(self.peek(), Some(Token::Word(w)) if w.eq_ignore_ascii_case(kw))
    }

    pub(super) fn at_symbol(&self, sym: char) -> bool {
        matches!(self.peek(), Some(Token::Symbol(c)) if *c == sym)
    }

    /// Consumes `kw` if it is next.
    pub(super) fn eat_keyword(&mut self, kw: &str) -> bool {
        let hit = self.at_keyword(kw);
        if hit {
            self.pos += 1;
        }
        hit
    }

    pub(super) fn eat_symbol(&mut self, sym: char) -> bool {
        let hit = self.at_symbol(sym);
        if hit {
            self.pos += 1;
        }
        hit
    }

    pub(super) fn expect_keyword(&mut self, kw: &str) -> ParseResult<()> {
        if self.eat_keyword(kw) {
            Ok(())
        } else {
            Err(format!("Expected '{kw}' but got {:?}", self.peek()))
        }
    }

    pub(super) fn expect_symbol(&mut self, sym: char) -> ParseResult<()> {
        if self.eat_symbol(sym) {
            Ok(())
        } else {
            Err(format!("Expected '{sym}' but got {:?}", self.peek()))
        }
    }

    /// Table or column name, lower-cased.
    pub(super) fn identifier(&mut self) -> ParseResult<String> {
        match self.next() {
            Some(Token::Word(w)) if is_identifier(w) => Ok(w.to_lowercase()),
            other => Err(format!("Expected identifier but got {other:?}")),
        }
    }

    pub(super) fn integer(&mut self) -> ParseResult<i64> {
        match self.next() {
            Some(Token::Word(w)) => w
                .parse::<i64>()
                .map_err(|_| format!("Expected integer but got '{w}'")),
            other => Err(format!("Expected integer but got {other:?}")),
        }
    }

    /// Remaining tokens rendered back to text, consuming them.
    pub(super) fn rest_as_text(&mut self) -> String {
        let mut out = String::new();
        while let Some(tok) = self.next() {
            if !out.is_empty() {
                out.push(' ');
            }
            match tok {
                Token::Word(w) => out.push_str(w),
                Token::Quoted(q) => {
                    out.push('\'');
                    out.push_str(q);
                    out.push('\'');
                }
                Token::Symbol(c) => out.push(*c),
            }
        }
        out
    }

    pub(super) fn finish(&self) -> ParseResult<()> {
        match self.peek() {
            None => Ok(()),
            Some(tok) => Err(format!("Unexpected trailing token {tok:?}")),
        }
    }
}

fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// `( a, b, ... )`, at least one name.
pub(super) fn parse_column_name_list(cur: &mut Cursor) -> ParseResult<Vec<String>> {
    cur.expect_symbol('(')?;
    let mut cols = vec![cur.identifier()?];
    while cur.eat_symbol(',') {
        cols.push(cur.identifier()?);
    }
    cur.expect_symbol(')')?;
    Ok(cols)
}

/// `( v1, v2, ... )` where each value is a quoted string, an integer, a
/// `YYYY-MM-DD` date or `null`.
pub(super) fn parse_value_list(cur: &mut Cursor) -> ParseResult<Row> {
    cur.expect_symbol('(')?;
    let mut values = vec![parse_value(cur)?];
    while cur.eat_symbol(',') {
        values.push(parse_value(cur)?);
    }
    cur.expect_symbol(')')?;
    Ok(values)
}

fn parse_value(cur: &mut Cursor) -> ParseResult<Value> {
    match cur.next() {
        Some(Token::Quoted(s)) => Ok(Value::Text(s.clone())),
        Some(Token::Word(w)) if w.eq_ignore_ascii_case("null") => Ok(Value::Null),
        Some(Token::Word(w)) => {
            if let Ok(n) = w.parse::<i64>() {
                Ok(Value::Int(n))
            } else {
                parse_date(w)
            }
        }
        other => Err(format!("Expected value but got {other:?}")),
    }
}
