//! `fb init`: create the `.fieldboard/` project directory.

use crate::output::{CliError, OutputMode, fail, render};
use anyhow::{Context as _, Result};
use clap::Args;
use fieldboard_core::store;
use fieldboard_core::{Board, config};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force re-initialization even if `.fieldboard/` already exists.
    #[arg(long)]
    pub force: bool,

    /// Seed the board from a JSON file (one key per column).
    #[arg(long, value_name = "FILE")]
    pub seed: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct InitResult {
    ok: bool,
    board: String,
    config: String,
    tickets: usize,
}

/// Execute `fb init`. Creates the project skeleton:
///
/// ```text
/// .fieldboard/
///   board.json    (empty board, or the --seed file)
///   config.toml   (default project config template)
/// ```
///
/// # Errors
///
/// Returns an error if `.fieldboard/` already exists and `--force` is not
/// set, if the seed file is unreadable or not a valid board, or if any
/// filesystem operation fails.
pub fn run_init(args: &InitArgs, output: OutputMode, project_root: &Path) -> Result<()> {
    let project_dir = config::project_dir(project_root);

    if project_dir.exists() && !args.force {
        return Err(fail(
            output,
            &CliError::new(".fieldboard/ already exists. Use `fb init --force` to reinitialize."),
        ));
    }

    // Parse the seed before touching the filesystem.
    let board = match &args.seed {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read seed file: {}", path.display()))?;
            store::parse_board(path, &raw).map_err(|e| fail(output, &CliError::from(&e)))?
        }
        None => Board::new(),
    };

    std::fs::create_dir_all(&project_dir).with_context(|| {
        format!(
            "Failed to create project directory: {}",
            project_dir.display()
        )
    })?;

    let config_path = config::project_config_path(project_root);
    std::fs::write(&config_path, config::DEFAULT_CONFIG_TOML)
        .with_context(|| format!("Failed to write config: {}", config_path.display()))?;

    store::save_board(project_root, &board).map_err(|e| fail(output, &CliError::from(&e)))?;
    info!(tickets = board.len(), "project initialized");

    let result = InitResult {
        ok: true,
        board: config::board_path(project_root).display().to_string(),
        config: config_path.display().to_string(),
        tickets: board.len(),
    };

    render(output, &result, |r, w| {
        writeln!(w, "✓ Initialized .fieldboard/ with {} ticket(s).", r.tickets)?;
        writeln!(w)?;
        writeln!(w, "  Board:   .fieldboard/board.json")?;
        writeln!(w, "  Config:  .fieldboard/config.toml")?;
        writeln!(w)?;
        writeln!(w, "Next steps:")?;
        writeln!(w, "  fb board")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldboard_core::ColumnId;
    use tempfile::TempDir;

    fn args(force: bool, seed: Option<PathBuf>) -> InitArgs {
        InitArgs { force, seed }
    }

    #[test]
    fn fresh_init_creates_structure() {
        let root = TempDir::new().expect("temp dir");
        run_init(&args(false, None), OutputMode::Json, root.path()).expect("init should succeed");

        assert!(config::project_dir(root.path()).is_dir());
        assert!(config::board_path(root.path()).is_file());
        assert!(config::project_config_path(root.path()).is_file());
        assert!(store::load_board(root.path()).expect("board").is_empty());
    }

    #[test]
    fn reinit_without_force_fails() {
        let root = TempDir::new().expect("temp dir");
        run_init(&args(false, None), OutputMode::Json, root.path()).expect("first init");
        let result = run_init(&args(false, None), OutputMode::Json, root.path());
        assert!(result.is_err(), "reinit without --force must fail");
    }

    #[test]
    fn reinit_with_force_resets_board() {
        let root = TempDir::new().expect("temp dir");
        let seed = root.path().join("seed.json");
        std::fs::write(&seed, r#"{"onHold":[{"id":"H1","title":"waiting"}]}"#).expect("seed");

        run_init(&args(false, Some(seed)), OutputMode::Json, root.path()).expect("seeded init");
        let board = store::load_board(root.path()).expect("board");
        assert_eq!(board.column_of("H1"), Some(ColumnId::OnHold));

        run_init(&args(true, None), OutputMode::Json, root.path()).expect("forced init");
        assert!(store::load_board(root.path()).expect("board").is_empty());
    }

    #[test]
    fn bad_seed_leaves_no_project() {
        let root = TempDir::new().expect("temp dir");
        let seed = root.path().join("seed.json");
        std::fs::write(&seed, "[1, 2, 3]").expect("seed");

        let result = run_init(&args(false, Some(seed)), OutputMode::Json, root.path());
        assert!(result.is_err());
        assert!(!config::project_dir(root.path()).exists());
    }

    #[test]
    fn init_args_parse() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: InitArgs,
        }
        let w = Wrapper::parse_from(["test", "--force", "--seed", "board.json"]);
        assert!(w.args.force);
        assert_eq!(w.args.seed, Some(PathBuf::from("board.json")));
    }
}
