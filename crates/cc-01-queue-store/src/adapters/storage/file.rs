use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{BatchOperation, KeyValueStore, ScanResult};
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File magic, followed by the entry list.
const MAGIC: &[u8; 4] = b"CCQ1";

type Entries = BTreeMap<Vec<u8>, Vec<u8>>;

/// File-backed key-value store.
///
/// Keeps the whole image in memory and rewrites the file on every commit
/// through a temp file + rename, so a crash leaves either the old or the new
/// image on disk, never a torn one.
///
/// File format: `MAGIC [key_len:u32][key][value_len:u32][value]...`
#[derive(Debug)]
pub struct FileBackedKVStore {
    data: Entries,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Open (or create) the store at `path`.
    ///
    /// Fails if the parent directory cannot be created or the existing file
    /// is not a store image.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| KVStoreError::Unavailable {
                message: format!("cannot create {}: {}", parent.display(), e),
            })?;
        }

        let data = match std::fs::File::open(&path) {
            Ok(mut file) => {
                let mut bytes = Vec::new();
                file.read_to_end(&mut bytes).map_err(KVStoreError::io)?;
                let data = decode(&bytes)?;
                info!(
                    "[cc-01] Loaded {} keys from {}",
                    data.len(),
                    path.display()
                );
                data
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("[cc-01] No existing store at {}, starting empty", path.display());
                Entries::new()
            }
            Err(e) => {
                return Err(KVStoreError::Unavailable {
                    message: format!("cannot open {}: {}", path.display(), e),
                })
            }
        };

        Ok(Self { data, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, data: &Entries) -> Result<(), KVStoreError> {
        let bytes = encode(data);

        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(KVStoreError::io)?;
        file.write_all(&bytes).map_err(KVStoreError::io)?;
        file.sync_all().map_err(KVStoreError::io)?;
        std::fs::rename(&temp_path, &self.path).map_err(KVStoreError::io)?;

        debug!(keys = data.len(), bytes = bytes.len(), "[cc-01] Store image committed");
        Ok(())
    }

    /// Apply `operations` to a copy, persist it, then swap it in.
    fn commit(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        let mut next = self.data.clone();
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    next.insert(key, value);
                }
                BatchOperation::Delete { key } => {
                    next.remove(&key);
                }
            }
        }
        self.save(&next)?;
        self.data = next;
        Ok(())
    }
}

fn encode(data: &Entries) -> Vec<u8> {
    let mut bytes = MAGIC.to_vec();
    for (key, value) in data {
        bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
        bytes.extend_from_slice(key);
        bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
        bytes.extend_from_slice(value);
    }
    bytes
}

fn decode(bytes: &[u8]) -> Result<Entries, KVStoreError> {
    if bytes.is_empty() {
        return Ok(Entries::new());
    }
    let body = bytes
        .strip_prefix(MAGIC.as_slice())
        .ok_or_else(|| corruption("missing store header"))?;

    let mut data = Entries::new();
    let mut cursor = 0;
    while cursor < body.len() {
        let key = read_chunk(body, &mut cursor)?;
        let value = read_chunk(body, &mut cursor)?;
        data.insert(key, value);
    }
    Ok(data)
}

fn read_chunk(body: &[u8], cursor: &mut usize) -> Result<Vec<u8>, KVStoreError> {
    let len_end = *cursor + 4;
    let len_bytes: [u8; 4] = body
        .get(*cursor..len_end)
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| corruption("truncated length prefix"))?;
    let len = u32::from_le_bytes(len_bytes) as usize;

    let chunk = body
        .get(len_end..len_end + len)
        .ok_or_else(|| corruption("truncated entry"))?;
    *cursor = len_end + len;
    Ok(chunk.to_vec())
}

fn corruption(message: &str) -> KVStoreError {
    KVStoreError::CorruptionError {
        message: message.to_string(),
    }
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.commit(vec![BatchOperation::put(key, value)])
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), KVStoreError> {
        if !self.data.contains_key(key) {
            return Ok(());
        }
        self.commit(vec![BatchOperation::delete(key)])
    }

    fn atomic_batch_write(&mut self, operations: Vec<BatchOperation>) -> Result<(), KVStoreError> {
        self.commit(operations)
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }

    fn prefix_scan(&self, prefix: &[u8]) -> Result<ScanResult, KVStoreError> {
        Ok(self
            .data
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
