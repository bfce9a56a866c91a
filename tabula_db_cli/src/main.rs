mod parser;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tabula_db_core::config::DEFAULT_DATA_DIR;
use tabula_db_core::storage::KvStore;
use tabula_db_core::{Database, DbConfig, Response};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::parser::{Statement, parse, split_statements};

const PROMPT: &str = "tabula> ";

/// Interactive shell for the tabula catalog
#[derive(Parser, Debug)]
#[command(name = "tabula", version, about)]
struct Args {
    /// Directory holding the table records
    #[arg(short = 'd', long, value_name = "DIR", default_value = DEFAULT_DATA_DIR, env = "TABULA_DB_DIR")]
    data_dir: PathBuf,

    /// Log level (error, warn, info, debug, trace); RUST_LOG wins when set
    #[arg(long, default_value = "warn", env = "TABULA_LOG")]
    log_level: String,

    /// Keep everything in memory; nothing is written to disk
    #[arg(long)]
    memory: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if args.memory {
        info!("running in memory-only mode");
        run(Database::in_memory()?)
    } else {
        let config = DbConfig::new(args.data_dir);
        let db = Database::open(&config)
            .with_context(|| format!("failed to open database at {}", config.data_dir.display()))?;
        run(db)
    }
}

/// Reads until a line ends with `;`, then runs every statement in the
/// batch in order. A syntax error drops the rest of the batch.
fn run<S: KvStore>(mut db: Database<S>) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut buffer = String::new();

    loop {
        if buffer.is_empty() {
            print!("{PROMPT}");
            io::stdout().flush()?;
        }

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        buffer.push_str(&line);
        if !buffer.trim_end().ends_with(';') {
            continue;
        }

        let batch = std::mem::take(&mut buffer);
        for stmt in split_statements(&batch) {
            match parse(&stmt) {
                Ok(Statement::Exit) => return Ok(()),
                Ok(Statement::Command(cmd)) => match db.execute(cmd) {
                    Ok(Response::Rendered(text)) => println!("{text}"),
                    Ok(response) => println!("{PROMPT}{response}"),
                    Err(err) => println!("{PROMPT}{err}"),
                },
                Err(err) => {
                    println!("{PROMPT}{err}");
                    break;
                }
            }
        }
    }
}
