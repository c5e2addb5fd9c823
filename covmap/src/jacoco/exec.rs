//! Execution data in JaCoCo's `.exec` layout, so dumps written by the JaCoCo
//! agent can be read and ours can be opened by JaCoCo tooling.

use std::io::Write;
use std::path::Path;

use indexmap::IndexMap;

use super::cursor::Cursor;
use crate::error::CovmapError;

const BLOCK_HEADER: u8 = 0x01;
const BLOCK_SESSION_INFO: u8 = 0x10;
const BLOCK_EXECUTION_DATA: u8 = 0x11;
const MAGIC_NUMBER: u16 = 0xC0C0;
const FORMAT_VERSION: u16 = 0x1007;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub id: String,
    pub start: i64,
    pub dump: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionData {
    pub id: u64,
    pub name: String,
    pub probes: Vec<bool>,
}

impl ExecutionData {
    pub fn has_hits(&self) -> bool {
        self.probes.iter().any(|p| *p)
    }

    fn merge(&mut self, other: &ExecutionData) -> Result<(), CovmapError> {
        if self.name != other.name || self.probes.len() != other.probes.len() {
            return Err(CovmapError::IncompatibleExecData {
                id: self.id,
                name: self.name.clone(),
                message: format!(
                    "cannot merge {} with {} probes into {} probes",
                    other.name,
                    other.probes.len(),
                    self.probes.len()
                ),
            });
        }
        self.probes
            .iter_mut()
            .zip(&other.probes)
            .for_each(|(mine, theirs)| *mine |= *theirs);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionDataStore {
    entries: IndexMap<u64, ExecutionData>,
}

impl ExecutionDataStore {
    pub fn put(&mut self, data: ExecutionData) -> Result<(), CovmapError> {
        match self.entries.get_mut(&data.id) {
            Some(existing) => existing.merge(&data),
            None => {
                self.entries.insert(data.id, data);
                Ok(())
            }
        }
    }

    pub fn get(&self, id: u64) -> Option<&ExecutionData> {
        self.entries.get(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExecutionData> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Raw execution data captured for one test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionRecord {
    pub sessions: Vec<SessionInfo>,
    pub store: ExecutionDataStore,
}

impl ExecutionRecord {
    pub fn merge(&mut self, other: ExecutionRecord) -> Result<(), CovmapError> {
        self.sessions.extend(other.sessions);
        for data in other.store.entries.into_values() {
            self.store.put(data)?;
        }
        Ok(())
    }

    /// Whether the accumulator holds an entry for `class_id` whose id is
    /// non-zero. Probe hits are not consulted.
    ///
    /// Ids are unsigned here: CRC64 ids with the top bit set count as
    /// executed, unlike a signed `id > 0` comparison.
    pub fn has_recorded_execution(&self, class_id: u64) -> bool {
        self.store.get(class_id).is_some_and(|data| data.id > 0)
    }
}

pub fn encode(record: &ExecutionRecord) -> Vec<u8> {
    let mut out: Vec<u8> = vec![BLOCK_HEADER];
    out.extend(MAGIC_NUMBER.to_be_bytes());
    out.extend(FORMAT_VERSION.to_be_bytes());
    for session in &record.sessions {
        out.push(BLOCK_SESSION_INFO);
        write_utf(&mut out, &session.id);
        out.extend(session.start.to_be_bytes());
        out.extend(session.dump.to_be_bytes());
    }
    for data in record.store.iter() {
        out.push(BLOCK_EXECUTION_DATA);
        out.extend(data.id.to_be_bytes());
        write_utf(&mut out, &data.name);
        write_probes(&mut out, &data.probes);
    }
    out
}

pub fn decode(bytes: &[u8]) -> Result<ExecutionRecord, String> {
    let mut cur = Cursor::new(bytes);
    let mut record = ExecutionRecord::default();
    while !cur.is_at_end() {
        match cur.u1()? {
            BLOCK_HEADER => {
                let magic = cur.u2()?;
                if magic != MAGIC_NUMBER {
                    return Err(format!("invalid magic number {magic:#06x}"));
                }
                let version = cur.u2()?;
                if version != FORMAT_VERSION {
                    return Err(format!("incompatible format version {version:#06x}"));
                }
            }
            BLOCK_SESSION_INFO => {
                let id = read_utf(&mut cur)?;
                let start = cur.u8()? as i64;
                let dump = cur.u8()? as i64;
                record.sessions.push(SessionInfo { id, start, dump });
            }
            BLOCK_EXECUTION_DATA => {
                let id = cur.u8()?;
                let name = read_utf(&mut cur)?;
                let probes = read_probes(&mut cur)?;
                record
                    .store
                    .put(ExecutionData { id, name, probes })
                    .map_err(|err| err.to_string())?;
            }
            other => return Err(format!("unknown block type {other:#04x}")),
        }
    }
    Ok(record)
}

pub fn read_exec_file(path: &Path) -> Result<ExecutionRecord, CovmapError> {
    let bytes = std::fs::read(path).map_err(|e| CovmapError::io(path, e))?;
    decode(&bytes).map_err(|message| CovmapError::ExecFormat {
        path: path.to_path_buf(),
        message,
    })
}

/// Appends `record` to `path`, creating the file and its parent directory when
/// missing. Every append starts with its own header block.
pub fn append_exec_file(path: &Path, record: &ExecutionRecord) -> Result<(), CovmapError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CovmapError::io(parent, e))?;
    }
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CovmapError::io(path, e))?;
    file.write_all(&encode(record))
        .map_err(|e| CovmapError::io(path, e))
}

// Java's DataOutput.writeUTF: u16 byte length, then the bytes.
fn write_utf(out: &mut Vec<u8>, value: &str) {
    let bytes = value.as_bytes();
    let len = bytes.len().min(usize::from(u16::MAX));
    out.extend((len as u16).to_be_bytes());
    out.extend(&bytes[..len]);
}

fn read_utf(cur: &mut Cursor<'_>) -> Result<String, String> {
    let len = cur.u2()?;
    Ok(String::from_utf8_lossy(cur.take(usize::from(len))?).to_string())
}

fn write_var_int(out: &mut Vec<u8>, mut value: u32) {
    while value & 0xFFFF_FF80 != 0 {
        out.push(((value & 0x7F) | 0x80) as u8);
        value >>= 7;
    }
    out.push(value as u8);
}

fn read_var_int(cur: &mut Cursor<'_>) -> Result<u32, String> {
    let mut value = 0u32;
    let mut shift = 0u32;
    loop {
        let byte = cur.u1()?;
        if shift >= 32 {
            return Err("varint too long".to_string());
        }
        value |= u32::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
    }
}

fn write_probes(out: &mut Vec<u8>, probes: &[bool]) {
    write_var_int(out, probes.len() as u32);
    for chunk in probes.chunks(8) {
        let packed = chunk
            .iter()
            .enumerate()
            .fold(0u8, |acc, (bit, hit)| if *hit { acc | (1 << bit) } else { acc });
        out.push(packed);
    }
}

fn read_probes(cur: &mut Cursor<'_>) -> Result<Vec<bool>, String> {
    let len = read_var_int(cur)? as usize;
    let packed = cur.take(len.div_ceil(8))?;
    Ok((0..len)
        .map(|i| packed[i / 8] & (1 << (i % 8)) != 0)
        .collect())
}
