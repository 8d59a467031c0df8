//! Board file persistence.
//!
//! The board lives in `.fieldboard/board.json` as one camelCase key per
//! column. Writes go to a sibling temp file first and are renamed into
//! place, so a crash mid-write leaves the previous board intact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::board::Board;
use crate::config;
use crate::error::ErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no board found at {}", .0.display())]
    NotInitialized(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("board file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotInitialized(_) => ErrorCode::NotInitialized,
            Self::Read { .. } => ErrorCode::InternalUnexpected,
            Self::Corrupt { .. } => ErrorCode::BoardFileCorrupt,
            Self::Write { .. } => ErrorCode::BoardWriteFailed,
        }
    }
}

/// Parse a board from JSON text (the `board.json` / seed file format).
///
/// # Errors
///
/// [`StoreError::Corrupt`] when the text is not a valid board, including
/// boards that list a ticket twice.
pub fn parse_board(path: &Path, raw: &str) -> Result<Board, StoreError> {
    serde_json::from_str(raw).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a board file from an explicit path.
///
/// # Errors
///
/// [`StoreError::NotInitialized`] when the file is missing, otherwise read or
/// parse failures.
pub fn read_board(path: &Path) -> Result<Board, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StoreError::NotInitialized(path.to_path_buf()));
        }
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let board = parse_board(path, &raw)?;
    debug!(path = %path.display(), tickets = board.len(), "board loaded");
    Ok(board)
}

/// Load `.fieldboard/board.json` under `project_root`.
///
/// # Errors
///
/// See [`read_board`].
pub fn load_board(project_root: &Path) -> Result<Board, StoreError> {
    read_board(&config::board_path(project_root))
}

/// Write `board` to `.fieldboard/board.json` under `project_root`.
///
/// # Errors
///
/// [`StoreError::Write`] if the project directory is missing or the file
/// cannot be written.
pub fn save_board(project_root: &Path, board: &Board) -> Result<(), StoreError> {
    write_board(&config::board_path(project_root), board)
}

/// Write `board` to `path` via a temp file and rename.
///
/// # Errors
///
/// [`StoreError::Write`] on any I/O failure.
pub fn write_board(path: &Path, board: &Board) -> Result<(), StoreError> {
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut json = serde_json::to_string_pretty(board)
        .map_err(|e| write_err(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    json.push('\n');

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).map_err(write_err)?;
    fs::rename(&tmp, path).map_err(write_err)?;

    debug!(path = %path.display(), tickets = board.len(), "board saved");
    Ok(())
}
