//! File-backed key-value store: durability without a native database
//! dependency. Suitable for development and light production.

use crate::domain::{ChainError, Result};
use crate::ports::outbound::KeyValueStore;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Key-value store persisted to a single binary file.
///
/// The committed view is loaded once at open. `put` stages writes in memory;
/// `commit` merges them into the committed view and rewrites the file
/// atomically (temp file + rename).
#[derive(Debug)]
pub struct FileBackedKVStore {
    committed: HashMap<Vec<u8>, Vec<u8>>,
    staged: HashMap<Vec<u8>, Vec<u8>>,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Opens the store at `path`, loading any existing contents.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let committed = Self::load_from_file(&path).unwrap_or_default();

        if committed.is_empty() {
            info!(path = %path.display(), "storage file empty or not found");
        } else {
            info!(
                path = %path.display(),
                keys = committed.len(),
                "loaded existing storage file"
            );
        }

        FileBackedKVStore {
            committed,
            staged: HashMap::new(),
            path,
        }
    }

    // File format: repeated [key_len:u32 le][key][value_len:u32 le][value].
    fn load_from_file(path: &Path) -> Option<HashMap<Vec<u8>, Vec<u8>>> {
        let mut file = std::fs::File::open(path).ok()?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).ok()?;

        let mut data = HashMap::new();
        let mut cursor = 0;
        loop {
            let Some(key) = Self::read_chunk(&bytes, &mut cursor) else {
                break;
            };
            let Some(value) = Self::read_chunk(&bytes, &mut cursor) else {
                break;
            };
            data.insert(key, value);
        }
        Some(data)
    }

    fn read_chunk(bytes: &[u8], cursor: &mut usize) -> Option<Vec<u8>> {
        let len_end = cursor.checked_add(4)?;
        if len_end > bytes.len() {
            return None;
        }
        let len = u32::from_le_bytes(bytes[*cursor..len_end].try_into().ok()?) as usize;
        let chunk_end = len_end.checked_add(len)?;
        if chunk_end > bytes.len() {
            return None;
        }
        let chunk = bytes[len_end..chunk_end].to_vec();
        *cursor = chunk_end;
        Some(chunk)
    }

    fn save_to_file(&self) -> Result<()> {
        let io_err = |e: std::io::Error| ChainError::Persistence(e.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut bytes = Vec::new();
        for (key, value) in &self.committed {
            bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
            bytes.extend_from_slice(key);
            bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
            bytes.extend_from_slice(value);
        }

        // Write atomically via temp file so a crash mid-write cannot corrupt
        // the committed view.
        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(io_err)?;
        file.write_all(&bytes).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        std::fs::rename(&temp_path, &self.path).map_err(io_err)?;
        Ok(())
    }
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        if let Some(value) = self.staged.get(key) {
            return Ok(Some(value.clone()));
        }
        Ok(self.committed.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.staged.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        let staged: Vec<_> = self.staged.drain().collect();
        self.committed.extend(staged);
        self.save_to_file()
    }
}
