pub mod board;
pub mod coverage;
pub mod drag;
pub mod finance;
pub mod init;
pub mod move_cmd;
pub mod show;

use crate::output::{CliError, OutputMode, fail};
use fieldboard_core::Board;
use fieldboard_core::config::{self, ProjectConfig};
use fieldboard_core::error::ErrorCode;
use fieldboard_core::store::{self, StoreError};
use std::path::Path;

/// Load the project board, reporting a coded error when it is missing or bad.
pub fn open_board(output: OutputMode, project_root: &Path) -> anyhow::Result<Board> {
    store::load_board(project_root).map_err(|e| store_failure(output, &e))
}

/// Persist the project board.
pub fn save_board(output: OutputMode, project_root: &Path, board: &Board) -> anyhow::Result<()> {
    store::save_board(project_root, board).map_err(|e| store_failure(output, &e))
}

fn store_failure(output: OutputMode, err: &StoreError) -> anyhow::Error {
    fail(output, &CliError::from(err))
}

/// Load `.fieldboard/config.toml`, reporting parse failures with a code.
pub fn open_config(output: OutputMode, project_root: &Path) -> anyhow::Result<ProjectConfig> {
    config::load_project_config(project_root).map_err(|e| {
        fail(
            output,
            &CliError::coded(format!("{e:#}"), ErrorCode::ConfigParseError),
        )
    })
}
