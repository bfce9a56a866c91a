use crate::command::Command;
use crate::engine::format::format_select;
use crate::error::{DbError, DbResult, Response};
use crate::storage::{KvStore, Repository};

/// Executes a parsed command against the repository
pub fn execute_command<S: KvStore>(cmd: Command, repo: &mut Repository<S>) -> DbResult<Response> {
    match cmd {
        Command::CreateTable {
            table,
            columns,
            constraints,
        } => repo.create_table(&table, columns, constraints),
        Command::DropTable { table } => repo.drop_table(&table),
        Command::Select(query) => {
            let result = repo.select(&query)?;
            Ok(Response::Rendered(format_select(&result)))
        }
        Command::Insert {
            table,
            columns,
            values,
        } => repo.insert(&table, values, columns.as_deref()),
        Command::Explain { table } => repo.explain(&table).map(Response::Rendered),
        Command::ShowTables => Ok(Response::Rendered(repo.show_tables())),
        Command::Update { .. } => Err(DbError::Unsupported("UPDATE")),
        Command::Delete { .. } => Err(DbError::Unsupported("DELETE")),
    }
}
