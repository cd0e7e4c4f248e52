//! File I/O utilities for loading hand records and preparing output paths.
//!
//! Hand inputs come in three shapes, chosen by file extension:
//! - `.jsonl`: one [`HandRecord`] per line
//! - `.jsonl.zst`: the same, Zstandard compressed
//! - `.db` / `.sqlite` / `.sqlite3`: a SQLite hand store (see [`crate::store`])
//!
//! ## Error Handling
//!
//! Text helpers return `Result<_, String>`; [`load_records`] lifts those into
//! [`CliError`] so command handlers can use `?`.

use crate::error::CliError;
use homegame_engine::record::HandRecord;
use std::io::Write;
use std::path::Path;

/// On-disk layout of a hand input or output, detected from the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Jsonl,
    JsonlZst,
    Sqlite,
}

impl InputFormat {
    /// Detect the format from the file extension (case-insensitive).
    ///
    /// # Example
    ///
    /// ```rust
    /// # use homegame_cli::io_utils::InputFormat;
    /// assert_eq!(InputFormat::from_path("hands.JSONL"), Some(InputFormat::Jsonl));
    /// assert_eq!(InputFormat::from_path("a/b.jsonl.zst"), Some(InputFormat::JsonlZst));
    /// assert_eq!(InputFormat::from_path("store.db"), Some(InputFormat::Sqlite));
    /// assert_eq!(InputFormat::from_path("notes.txt"), None);
    /// ```
    pub fn from_path(path: &str) -> Option<Self> {
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".jsonl.zst") {
            Some(InputFormat::JsonlZst)
        } else if lower.ends_with(".jsonl") {
            Some(InputFormat::Jsonl)
        } else if lower.ends_with(".db") || lower.ends_with(".sqlite") || lower.ends_with(".sqlite3")
        {
            Some(InputFormat::Sqlite)
        } else {
            None
        }
    }

    fn require(path: &str) -> Result<Self, CliError> {
        Self::from_path(path).ok_or_else(|| {
            CliError::InvalidInput(format!(
                "Unsupported file type: {} (expected .jsonl, .jsonl.zst, .db or .sqlite)",
                path
            ))
        })
    }
}

/// Load every hand record from a JSONL, compressed JSONL or SQLite input.
///
/// A line that is not a valid record aborts the load with its 1-based line
/// number. Records whose action logs are bad still load; the engine reports
/// those per hand.
pub fn load_records(path: &str) -> Result<Vec<HandRecord>, CliError> {
    let records = match InputFormat::require(path)? {
        InputFormat::Sqlite => {
            if !Path::new(path).exists() {
                return Err(CliError::InvalidInput(format!("Failed to read {}: not found", path)));
            }
            crate::store::read_hands(Path::new(path))?
        }
        InputFormat::Jsonl | InputFormat::JsonlZst => {
            let content = read_text_auto(path)
                .map_err(|e| CliError::InvalidInput(format!("Failed to read {}: {}", path, e)))?;
            parse_jsonl(&content)?
        }
    };
    tracing::debug!(path, records = records.len(), "loaded hand records");
    Ok(records)
}

/// Parse JSONL text into hand records, skipping blank lines.
pub fn parse_jsonl(content: &str) -> Result<Vec<HandRecord>, CliError> {
    let mut records = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }
        let record: HandRecord = serde_json::from_str(raw).map_err(|e| {
            CliError::InvalidInput(format!("Invalid record at line {}: {}", idx + 1, e))
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Write hand records to `path` in the format its extension names.
pub fn save_records(path: &str, records: &[HandRecord]) -> Result<usize, CliError> {
    match InputFormat::require(path)? {
        InputFormat::Sqlite => crate::store::write_hands(Path::new(path), records),
        InputFormat::Jsonl => {
            let mut w = homegame_engine::record::RecordWriter::create(path)?;
            for r in records {
                w.write(r)?;
            }
            Ok(w.finish()?)
        }
        InputFormat::JsonlZst => {
            let mut buf = Vec::new();
            for r in records {
                serde_json::to_writer(&mut buf, r)?;
                buf.write_all(b"\n")?;
            }
            let comp = zstd::stream::encode_all(&buf[..], 0)?;
            ensure_parent_dir(Path::new(path)).map_err(CliError::InvalidInput)?;
            std::fs::write(path, comp)?;
            Ok(records.len())
        }
    }
}

/// Read text file with automatic .zst decompression detection.
///
/// If the path ends with ".zst", the file is decompressed using Zstandard.
/// A UTF-8 BOM is stripped if present.
///
/// # Example
///
/// ```rust,no_run
/// # use homegame_cli::io_utils::read_text_auto;
///
/// let content = read_text_auto("hands.jsonl").unwrap();
/// let compressed = read_text_auto("hands.jsonl.zst").unwrap();
/// ```
pub fn read_text_auto(path: &str) -> Result<String, String> {
    let mut content = if path.ends_with(".zst") {
        let comp = std::fs::read(path).map_err(|e| e.to_string())?;
        let dec = zstd::stream::decode_all(&comp[..]).map_err(|e| e.to_string())?;
        String::from_utf8(dec).map_err(|e| e.to_string())?
    } else {
        std::fs::read_to_string(path).map_err(|e| e.to_string())?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Ensure parent directory exists for given path, creating if needed.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// # use homegame_cli::io_utils::ensure_parent_dir;
///
/// ensure_parent_dir(Path::new("out/tags/2025.csv")).unwrap();
/// ```
pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
