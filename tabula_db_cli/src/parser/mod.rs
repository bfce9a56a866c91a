//! Turns statement text into typed commands for the core.

mod common;
mod create;
mod dml;
mod tokenizer;

use tabula_db_core::{Command, DbError};
use tracing::debug;

use common::{Cursor, ParseResult};
pub use tokenizer::split_statements;

#[derive(Debug, PartialEq, Eq)]
pub enum Statement {
    Exit,
    Command(Command),
}

/// Parses one statement (without its trailing `;`). Every failure is
/// reported as a plain syntax error; the detail only goes to the log.
pub fn parse(input: &str) -> Result<Statement, DbError> {
    parse_statement(input).map_err(|reason| {
        debug!(%reason, input, "statement rejected");
        DbError::Syntax
    })
}

fn parse_statement(input: &str) -> ParseResult<Statement> {
    let tokens = tokenizer::tokenize(input)?;
    let mut cur = Cursor::new(&tokens);
    let keyword = match cur.next() {
        Some(tokenizer::Token::Word(w)) => w.to_lowercase(),
        _ => return Err("Empty command".to_string()),
    };

    let cmd = match keyword.as_str() {
        "exit" => {
            cur.finish()?;
            return Ok(Statement::Exit);
        }
        "create" => create::parse_create(&mut cur)?,
        "drop" => {
            cur.expect_keyword("table")?;
            let table = cur.identifier()?;
            cur.finish()?;
            Command::DropTable { table }
        }
        "explain" | "describe" | "desc" => {
            let table = cur.identifier()?;
            cur.finish()?;
            Command::Explain { table }
        }
        "show" => {
            cur.expect_keyword("tables")?;
            cur.finish()?;
            Command::ShowTables
        }
        "insert" => dml::parse_insert(&mut cur)?,
        "select" => dml::parse_select(&mut cur)?,
        "delete" => dml::parse_delete(&mut cur)?,
        "update" => dml::parse_update(&mut cur)?,
        other => return Err(format!("Unknown command '{other}'")),
    };
    Ok(Statement::Command(cmd))
}
