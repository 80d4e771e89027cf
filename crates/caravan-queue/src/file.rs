use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{debug, warn};

use caravan_types::{Record, RecordId};

use crate::error::{QueueError, QueueResult};
use crate::store::RecordStore;

/// Snapshot file magic: "CRVQ".
const MAGIC: [u8; 4] = *b"CRVQ";
/// Snapshot format version.
const FORMAT_VERSION: u16 = 1;
/// Header: 4 bytes magic + 2 bytes version + 4 bytes length + 4 bytes CRC.
const HEADER_SIZE: usize = 14;

/// Crash-safe single-file record store.
///
/// The whole collection is kept in memory and written out as one snapshot
/// on every mutation. On-disk format:
///
/// ```text
/// [4 bytes: magic "CRVQ"]
/// [2 bytes: format version (little-endian u16)]
/// [4 bytes: payload length (little-endian u32)]
/// [4 bytes: CRC32 of payload (little-endian u32)]
/// [N bytes: payload (bincode-serialized Vec<Record>)]
/// ```
///
/// Each write lands in a temp file first and is atomically renamed into
/// place, so a crash mid-write leaves the previous snapshot intact and a
/// reader never observes a torn collection. A CRC mismatch on load is
/// reported as corruption rather than silently dropping records.
pub struct FileRecordStore {
    path: PathBuf,
    records: RwLock<HashMap<RecordId, Record>>,
}

impl FileRecordStore {
    /// Open (or create) a record store backed by the given snapshot path.
    pub fn open(path: impl Into<PathBuf>) -> QueueResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let records = if path.exists() {
            let loaded = load_snapshot(&path)?;
            debug!(count = loaded.len(), path = %path.display(), "snapshot loaded");
            loaded.into_iter().map(|r| (r.id, r)).collect()
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize the current collection and atomically swap it into place.
    /// Callers must hold the write lock.
    fn write_snapshot(&self, records: &HashMap<RecordId, Record>) -> QueueResult<()> {
        let mut ordered: Vec<&Record> = records.values().collect();
        ordered.sort_by_key(|r| r.id);

        let payload =
            bincode::serialize(&ordered).map_err(|e| QueueError::Serialization(e.to_string()))?;
        let crc = crc32fast::hash(&payload);

        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
        tmp.write_all(&MAGIC)?;
        tmp.write_all(&FORMAT_VERSION.to_le_bytes())?;
        tmp.write_all(&(payload.len() as u32).to_le_bytes())?;
        tmp.write_all(&crc.to_le_bytes())?;
        tmp.write_all(&payload)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| QueueError::Io(e.error))?;

        debug!(bytes = payload.len(), "snapshot written");
        Ok(())
    }
}

fn load_snapshot(path: &Path) -> QueueResult<Vec<Record>> {
    let mut file = File::open(path)?;
    let mut header = [0u8; HEADER_SIZE];
    file.read_exact(&mut header)
        .map_err(|_| QueueError::CorruptSnapshot("truncated header".into()))?;

    if header[..4] != MAGIC {
        return Err(QueueError::CorruptSnapshot("bad magic".into()));
    }
    let version = u16::from_le_bytes([header[4], header[5]]);
    if version != FORMAT_VERSION {
        return Err(QueueError::CorruptSnapshot(format!(
            "unsupported format version {version}"
        )));
    }

    let length = u32::from_le_bytes([header[6], header[7], header[8], header[9]]) as usize;
    let expected_crc = u32::from_le_bytes([header[10], header[11], header[12], header[13]]);

    let mut payload = vec![0u8; length];
    file.read_exact(&mut payload)
        .map_err(|_| QueueError::CorruptSnapshot("truncated payload".into()))?;

    let actual_crc = crc32fast::hash(&payload);
    if actual_crc != expected_crc {
        warn!(
            expected = expected_crc,
            actual = actual_crc,
            "snapshot CRC mismatch"
        );
        return Err(QueueError::CorruptSnapshot("CRC mismatch".into()));
    }

    bincode::deserialize(&payload).map_err(|e| QueueError::CorruptSnapshot(e.to_string()))
}

impl RecordStore for FileRecordStore {
    fn put(&self, record: Record) -> QueueResult<()> {
        let mut map = self.records.write().expect("lock poisoned");
        map.insert(record.id, record);
        self.write_snapshot(&map)
    }

    fn get(&self, id: &RecordId) -> QueueResult<Option<Record>> {
        let map = self.records.read().expect("lock poisoned");
        Ok(map.get(id).cloned())
    }

    fn get_all(&self) -> QueueResult<Vec<Record>> {
        let map = self.records.read().expect("lock poisoned");
        let mut records: Vec<Record> = map.values().cloned().collect();
        records.sort_by_key(|r| r.id);
        Ok(records)
    }

    fn replace_all(&self, records: Vec<Record>) -> QueueResult<()> {
        let mut map = self.records.write().expect("lock poisoned");
        map.clear();
        map.extend(records.into_iter().map(|r| (r.id, r)));
        self.write_snapshot(&map)
    }
}

impl std::fmt::Debug for FileRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileRecordStore")
            .field("path", &self.path)
            .field(
                "record_count",
                &self.records.read().expect("lock poisoned").len(),
            )
            .finish()
    }
}
