pub mod types;
pub mod command;
pub mod config;
pub mod error;
pub mod storage;
pub mod engine;

pub use command::{Command, Query, TableReference};
pub use config::DbConfig;
pub use error::{DbError, DbResult, Response};

use storage::{FileStore, KvStore, MemStore, Repository};
use tracing::info;

/// Entry point for callers: a repository over one store handle, opened
/// once and held until drop.
#[derive(Debug)]
pub struct Database<S: KvStore = FileStore> {
    repo: Repository<S>,
}

impl Database<FileStore> {
    pub fn open(config: &DbConfig) -> DbResult<Self> {
        let db = Self::with_store(FileStore::open(&config.data_dir)?)?;
        info!(data_dir = %config.data_dir.display(), "database opened");
        Ok(db)
    }
}

impl Database<MemStore> {
    pub fn in_memory() -> DbResult<Self> {
        Self::with_store(MemStore::new())
    }
}

impl<S: KvStore> Database<S> {
    pub fn with_store(store: S) -> DbResult<Self> {
        Ok(Self {
            repo: Repository::load(store)?,
        })
    }

    pub fn execute(&mut self, cmd: Command) -> DbResult<Response> {
        engine::execute_command(cmd, &mut self.repo)
    }

    pub fn repository(&self) -> &Repository<S> {
        &self.repo
    }
}
