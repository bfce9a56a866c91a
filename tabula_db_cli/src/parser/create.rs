use tabula_db_core::Command;
use tabula_db_core::storage::{ColumnDefinition, TableConstraint};
use tabula_db_core::types::datatype::{DataType, parse_datatype};

use super::common::{Cursor, ParseResult, parse_column_name_list};

/// create table <table> ( <element> [, <element> ...] )
///
/// Column definitions and key constraints may be interleaved; they come
/// back as two separate lists.
pub(super) fn parse_create(cur: &mut Cursor) -> ParseResult<Command> {
    cur.expect_keyword("table")?;
    let table = cur.identifier()?;
    cur.expect_symbol('(')?;

    let mut columns: Vec<ColumnDefinition> = Vec::new();
    let mut constraints: Vec<TableConstraint> = Vec::new();
    loop {
        if cur.at_keyword("primary") || cur.at_keyword("foreign") {
            constraints.push(parse_table_constraint(cur)?);
        } else {
            columns.push(parse_column_definition(cur)?);
        }
        if !cur.eat_symbol(',') {
            break;
        }
    }
    cur.expect_symbol(')')?;
    cur.finish()?;

    if columns.is_empty() {
        return Err("CREATE requires at least one column".to_string());
    }
    Ok(Command::CreateTable {
        table,
        columns,
        constraints,
    })
}

fn parse_column_definition(cur: &mut Cursor) -> ParseResult<ColumnDefinition> {
    let name = cur.identifier()?;
    let (data_type, data_len) = parse_data_type(cur)?;
    let mut not_null = false;
    if cur.eat_keyword("not") {
        cur.expect_keyword("null")?;
        not_null = true;
    }
    Ok(ColumnDefinition::new(name, data_type, data_len, not_null))
}

fn parse_data_type(cur: &mut Cursor) -> ParseResult<(DataType, Option<i64>)> {
    let name = cur.identifier()?;
    let data_type = parse_datatype(&name)?;
    if data_type != DataType::Char {
        return Ok((data_type, None));
    }
    cur.expect_symbol('(')?;
    let len = cur.integer()?;
    cur.expect_symbol(')')?;
    Ok((data_type, Some(len)))
}

fn parse_table_constraint(cur: &mut Cursor) -> ParseResult<TableConstraint> {
    if cur.eat_keyword("primary") {
        cur.expect_keyword("key")?;
        let cols = parse_column_name_list(cur)?;
        return Ok(TableConstraint::primary_key(cols));
    }
    cur.expect_keyword("foreign")?;
    cur.expect_keyword("key")?;
    let cols = parse_column_name_list(cur)?;
    cur.expect_keyword("references")?;
    let ref_table = cur.identifier()?;
    let ref_cols = parse_column_name_list(cur)?;
    Ok(TableConstraint::foreign_key(cols, ref_table, ref_cols))
}
