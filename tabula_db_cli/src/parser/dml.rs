use tabula_db_core::{Command, Query, TableReference};

use super::common::{Cursor, ParseResult, parse_column_name_list, parse_value_list};
use super::tokenizer::Token;

/// insert into <table> [ ( col, ... ) ] values ( v, ... )
pub(super) fn parse_insert(cur: &mut Cursor) -> ParseResult<Command> {
    cur.expect_keyword("into")?;
    let table = cur.identifier()?;
    let columns = if cur.at_symbol('(') {
        Some(parse_column_name_list(cur)?)
    } else {
        None
    };
    cur.expect_keyword("values")?;
    let values = parse_value_list(cur)?;
    cur.finish()?;
    Ok(Command::Insert {
        table,
        columns,
        values,
    })
}

/// select * | col [, col ...] from <table> [[as] alias] [, ...] [where ...]
pub(super) fn parse_select(cur: &mut Cursor) -> ParseResult<Command> {
    let columns = if cur.eat_keyword("*") {
        None
    } else {
        let mut cols = vec![parse_column_ref(cur)?];
        while cur.eat_symbol(',') {
            cols.push(parse_column_ref(cur)?);
        }
        Some(cols)
    };

    cur.expect_keyword("from")?;
    let mut from = vec![parse_table_reference(cur)?];
    while cur.eat_symbol(',') {
        from.push(parse_table_reference(cur)?);
    }

    let filter = parse_where(cur)?;
    cur.finish()?;
    Ok(Command::Select(Query {
        columns,
        from,
        filter,
    }))
}

/// delete from <table> [where ...]
pub(super) fn parse_delete(cur: &mut Cursor) -> ParseResult<Command> {
    cur.expect_keyword("from")?;
    let table = cur.identifier()?;
    parse_where(cur)?;
    cur.finish()?;
    Ok(Command::Delete { table })
}

/// update <table> set ... ; everything after SET is accepted unread.
pub(super) fn parse_update(cur: &mut Cursor) -> ParseResult<Command> {
    let table = cur.identifier()?;
    cur.expect_keyword("set")?;
    if cur.peek().is_none() {
        return Err("UPDATE requires at least one assignment".to_string());
    }
    cur.rest_as_text();
    Ok(Command::Update { table })
}

fn parse_where(cur: &mut Cursor) -> ParseResult<Option<String>> {
    if !cur.eat_keyword("where") {
        return Ok(None);
    }
    let text = cur.rest_as_text();
    if text.is_empty() {
        return Err("WHERE requires a condition".to_string());
    }
    Ok(Some(text))
}

/// `col` or `table.col`, lower-cased.
fn parse_column_ref(cur: &mut Cursor) -> ParseResult<String> {
    match cur.next() {
        Some(Token::Word(w)) if is_column_ref(w) => Ok(w.to_lowercase()),
        other => Err(format!("Expected column reference but got {other:?}")),
    }
}

fn is_column_ref(word: &str) -> bool {
    let parts: Vec<&str> = word.split('.').collect();
    parts.len() <= 2
        && parts.iter().all(|part| {
            part.chars()
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

fn parse_table_reference(cur: &mut Cursor) -> ParseResult<TableReference> {
    let table = cur.identifier()?;
    let alias = if cur.eat_keyword("as") {
        Some(cur.identifier()?)
    } else if matches!(cur.peek(), Some(Token::Word(w)) if !w.eq_ignore_ascii_case("where")) {
        Some(cur.identifier()?)
    } else {
        None
    };
    Ok(TableReference { table, alias })
}
