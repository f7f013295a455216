//! The high-score ledger: an append-only file of finished games.
//!
//! There is no header. Each record is, in native byte order:
//!
//! ```text
//! i32    name length
//! bytes  name
//! u8     difficulty (1..=3)
//! i32    elapsed seconds
//! i32    score
//! u16    hints used
//! ```

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use esc_core::Difficulty;

use crate::bytes::{ByteReader, ByteWriter};
use crate::error::{LoadError, SaveError};

/// Longest player name kept, in characters.
pub const MAX_NAME_CHARS: usize = 31;

/// Name recorded when the player leaves it blank.
pub const DEFAULT_NAME: &str = "Player";

/// One finished game in the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreRecord {
    /// Player name.
    pub name: String,
    /// Difficulty played on.
    pub difficulty: Difficulty,
    /// Play time in seconds.
    pub elapsed_secs: u32,
    /// Final score.
    pub score: u32,
    /// Hints used.
    pub hints_used: u16,
}

impl HighScoreRecord {
    /// Build a record, tidying the player name: surrounding whitespace is
    /// dropped, a blank name becomes [`DEFAULT_NAME`], and long names are cut
    /// to [`MAX_NAME_CHARS`]. Hint counts beyond `u16::MAX` are capped.
    pub fn new(
        name: &str,
        difficulty: Difficulty,
        elapsed_secs: u32,
        score: u32,
        hints_used: u32,
    ) -> Self {
        Self {
            name: normalize_name(name),
            difficulty,
            elapsed_secs,
            score,
            hints_used: u16::try_from(hints_used).unwrap_or(u16::MAX),
        }
    }

    fn encode(&self) -> Result<Vec<u8>, SaveError> {
        let mut w = ByteWriter::new();
        w.put_str(&self.name, "player name")?;
        w.put_u8(self.difficulty.code());
        w.put_count(self.elapsed_secs as usize, "elapsed time")?;
        w.put_count(self.score as usize, "score")?;
        w.put_u16(self.hints_used);
        Ok(w.into_bytes())
    }

    /// Read one record, or `None` if the ledger ends partway through it.
    fn decode(r: &mut ByteReader<'_>) -> Option<Self> {
        let len = usize::try_from(r.i32()?).unwrap_or(0);
        let name = String::from_utf8_lossy(r.take(len)?).into_owned();
        let code = r.u8()?;
        let elapsed = r.i32()?;
        let score = r.i32()?;
        let hints_used = r.u16()?;

        let difficulty = Difficulty::from_code(code).unwrap_or_else(|| {
            log::warn!("high score for {name:?} has unknown difficulty {code}, reading as Hard");
            Difficulty::Hard
        });
        Some(Self {
            name,
            difficulty,
            elapsed_secs: u32::try_from(elapsed).unwrap_or(0),
            score: u32::try_from(score).unwrap_or(0),
            hints_used,
        })
    }
}

fn normalize_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return DEFAULT_NAME.to_string();
    }
    trimmed.chars().take(MAX_NAME_CHARS).collect()
}

/// Append a record to the ledger, creating the file if needed.
///
/// Earlier records are never read or rewritten.
pub fn append_high_score(path: &Path, record: &HighScoreRecord) -> Result<(), SaveError> {
    let bytes = record.encode()?;
    let io_err = |source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)?;
    file.write_all(&bytes).map_err(io_err)?;
    log::debug!("recorded score {} for {}", record.score, record.name);
    Ok(())
}

/// Read every complete record, best score first.
///
/// A missing ledger reads as empty. A partial record at the end of the file
/// is ignored. Equal scores keep their ledger order.
pub fn read_high_scores(path: &Path) -> Result<Vec<HighScoreRecord>, LoadError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut r = ByteReader::new(&bytes);
    let mut records = Vec::new();
    while !r.is_at_end() {
        match HighScoreRecord::decode(&mut r) {
            Some(record) => records.push(record),
            None => {
                log::warn!("ignoring truncated record at the end of {}", path.display());
                break;
            }
        }
    }

    records.sort_by(|a, b| b.score.cmp(&a.score));
    Ok(records)
}
