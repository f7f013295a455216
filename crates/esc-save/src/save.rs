//! The save file: a single snapshot of a game in progress.
//!
//! Layout, all integers in native byte order:
//!
//! ```text
//! "ESCP1"             magic, 5 bytes
//! u8                  format version (1)
//! u8                  difficulty (1..=3)
//! i32 x4              current room, moves, hints, elapsed seconds
//! i32                 inventory count, then per item: i32 length + bytes
//! i32                 object count, then one solved byte per object
//! ```

use std::fs;
use std::path::Path;

use esc_core::{Difficulty, Level};
use esc_engine::{Inventory, RuntimeState};

use crate::bytes::{ByteReader, ByteWriter};
use crate::error::{LoadError, SaveError};

/// Leading tag of every save file.
pub const MAGIC: &[u8; 5] = b"ESCP1";

/// The only format version this crate reads and writes.
pub const FORMAT_VERSION: u8 = 1;

/// Encode runtime state into a save image.
pub fn encode_state(state: &RuntimeState) -> Result<Vec<u8>, SaveError> {
    let mut w = ByteWriter::new();
    w.put_bytes(MAGIC);
    w.put_u8(FORMAT_VERSION);
    w.put_u8(state.difficulty.code());
    w.put_count(state.current_room, "room index")?;
    w.put_count(state.total_moves as usize, "move count")?;
    w.put_count(state.hints_used as usize, "hint count")?;
    w.put_count(state.elapsed_secs as usize, "elapsed time")?;

    let items = state.inventory.items();
    w.put_count(items.len(), "inventory")?;
    for item in items {
        w.put_str(item, "item name")?;
    }

    w.put_count(state.solved.len(), "object count")?;
    for &solved in &state.solved {
        w.put_u8(u8::from(solved));
    }
    Ok(w.into_bytes())
}

/// Decode a save image for `level`.
///
/// The image must carry one solved flag per object of the level and point at
/// one of its rooms.
pub fn decode_state(bytes: &[u8], level: &Level) -> Result<RuntimeState, LoadError> {
    let mut r = ByteReader::new(bytes);

    if r.take(MAGIC.len()) != Some(&MAGIC[..]) {
        return Err(LoadError::corrupt("not a save file"));
    }
    let version = r.u8().ok_or_else(|| truncated("version"))?;
    if version != FORMAT_VERSION {
        return Err(LoadError::UnsupportedVersion(version));
    }

    let code = r.u8().ok_or_else(|| truncated("difficulty"))?;
    let difficulty = Difficulty::from_code(code)
        .ok_or_else(|| LoadError::corrupt(format!("unknown difficulty {code}")))?;

    let current_room = count(&mut r, "room index")?;
    let total_moves = counter(&mut r, "move count")?;
    let hints_used = counter(&mut r, "hint count")?;
    let elapsed_secs = counter(&mut r, "elapsed time")?;

    let item_count = count(&mut r, "inventory count")?;
    let mut items = Vec::new();
    for _ in 0..item_count {
        let len = count(&mut r, "item name length")?;
        let raw = r.take(len).ok_or_else(|| truncated("item name"))?;
        let name = String::from_utf8(raw.to_vec())
            .map_err(|_| LoadError::corrupt("item name is not valid UTF-8"))?;
        items.push(name);
    }

    let found = count(&mut r, "object count")?;
    if found != level.object_count() {
        return Err(LoadError::ObjectCountMismatch {
            expected: level.object_count(),
            found,
        });
    }
    let flags = r.take(found).ok_or_else(|| truncated("solved flags"))?;
    let solved = flags.iter().map(|&f| f != 0).collect();

    if current_room >= level.room_count() {
        return Err(LoadError::corrupt(format!(
            "room {current_room} does not exist (level has {} rooms)",
            level.room_count()
        )));
    }
    if !r.is_at_end() {
        log::warn!("ignoring {} trailing bytes in save file", r.remaining());
    }

    Ok(RuntimeState {
        difficulty,
        current_room,
        total_moves,
        hints_used,
        elapsed_secs,
        inventory: Inventory::from(items),
        solved,
    })
}

/// Write a save file, replacing any previous one.
pub fn save_game(path: &Path, state: &RuntimeState) -> Result<(), SaveError> {
    let bytes = encode_state(state)?;
    fs::write(path, &bytes).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("saved {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Read a save file for `level`. Nothing is returned unless the whole file
/// checks out.
pub fn load_game(path: &Path, level: &Level) -> Result<RuntimeState, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let state = decode_state(&bytes, level)?;
    log::debug!(
        "loaded save from {} (room {}, {}s)",
        path.display(),
        state.current_room,
        state.elapsed_secs
    );
    Ok(state)
}

fn truncated(field: &str) -> LoadError {
    LoadError::corrupt(format!("file ends before {field}"))
}

/// A non-negative 32-bit field read as a length or index.
fn count(r: &mut ByteReader<'_>, field: &str) -> Result<usize, LoadError> {
    let value = r.i32().ok_or_else(|| truncated(field))?;
    usize::try_from(value).map_err(|_| LoadError::corrupt(format!("negative {field}: {value}")))
}

/// A non-negative 32-bit field read as a counter.
fn counter(r: &mut ByteReader<'_>, field: &str) -> Result<u32, LoadError> {
    let value = r.i32().ok_or_else(|| truncated(field))?;
    u32::try_from(value).map_err(|_| LoadError::corrupt(format!("negative {field}: {value}")))
}
