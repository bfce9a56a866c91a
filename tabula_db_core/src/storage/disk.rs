use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::storage::engine::KvStore;

const RECORD_EXT: &str = "rec";
const TMP_EXT: &str = "tmp";

/// Directory-backed store: one file per key under `<root>/tables/`.
///
/// Files are named by the SHA-256 of the key so that name length never
/// depends on the key. The first line of each file holds the hex-encoded
/// key and the value follows it unchanged.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens the store at `root`, creating the directory layout if needed.
    pub fn open(root: impl Into<PathBuf>) -> DbResult<Self> {
        let root = root.into();
        initialize_layout(&root)?;
        debug!(root = %root.display(), "opened file store");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn tables_dir(&self) -> PathBuf {
        self.root.join("tables")
    }

    fn record_path(&self, key: &[u8]) -> PathBuf {
        self.tables_dir()
            .join(format!("{}.{RECORD_EXT}", key_digest(key)))
    }
}

fn initialize_layout(root: &Path) -> DbResult<()> {
    fs::create_dir_all(root.join("tables"))?;
    Ok(())
}

fn key_digest(key: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key);
    hex::encode(hasher.finalize())
}

/// Splits a record file into its key and value, checking the key against
/// the digest in the file name.
fn decode_record(stem: &str, contents: Vec<u8>) -> DbResult<(Vec<u8>, Vec<u8>)> {
    let corrupt = |reason: String| DbError::CorruptRecord {
        key: stem.to_string(),
        reason,
    };
    let split = contents
        .iter()
        .position(|&b| b == b'\n')
        .ok_or_else(|| corrupt("missing key header".to_string()))?;
    let key = hex::decode(&contents[..split])
        .map_err(|e| corrupt(format!("key header is not hex: {e}")))?;
    if key_digest(&key) != stem {
        return Err(corrupt("key does not match file name".to_string()));
    }
    let value = contents[split + 1..].to_vec();
    Ok((key, value))
}

impl KvStore for FileStore {
    fn put(&mut self, key: &[u8], value: &[u8]) -> DbResult<()> {
        let target = self.record_path(key);
        let tmp = target.with_extension(TMP_EXT);
        {
            let mut file = File::create(&tmp)?;
            file.write_all(hex::encode(key).as_bytes())?;
            file.write_all(b"\n")?;
            file.write_all(value)?;
            file.sync_all()?;
        }
        // rename is atomic on the same filesystem
        fs::rename(&tmp, &target)?;
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> DbResult<()> {
        match fs::remove_file(self.record_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn iterate(&self) -> DbResult<Vec<(Vec<u8>, Vec<u8>)>> {
        let mut out = Vec::new();
        for entry in fs::read_dir(self.tables_dir())? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXT) {
                continue;
            }
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            out.push(decode_record(&stem, fs::read(&path)?)?);
        }
        Ok(out)
    }
}
