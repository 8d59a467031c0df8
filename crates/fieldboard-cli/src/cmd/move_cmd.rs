//! `fb move`: move a ticket to another column.

use crate::cmd::{open_board, open_config, save_board};
use crate::output::{CliError, OutputMode, fail, render};
use clap::Args;
use fieldboard_core::error::ErrorCode;
use fieldboard_core::{Board, ColumnId, MoveError, MoveOutcome};
use serde::Serialize;
use std::path::Path;

#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Ticket ID to move.
    pub id: String,

    /// Destination column (`new`, `inProgress`, `scheduled`, `onHold`, `completed`).
    #[arg(long, value_name = "COL")]
    pub to: String,

    /// Column the ticket is expected to be in. Defaults to its current column.
    #[arg(long, value_name = "COL")]
    pub from: Option<String>,

    /// Insert position in the destination column. Appends when absent or out of range.
    #[arg(long, value_name = "N")]
    pub index: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveResult {
    ok: bool,
    ticket_id: String,
    moved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<ColumnId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<ColumnId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
}

/// Apply the move described by `args`.
///
/// With `allow_reorder`, a same-column move that names an index reorders the
/// column instead of being a no-op.
fn apply(
    board: &mut Board,
    args: &MoveArgs,
    from: &str,
    allow_reorder: bool,
) -> Result<MoveOutcome, MoveError> {
    let reorder = args
        .index
        .filter(|_| allow_reorder)
        .and_then(|index| {
            let from: ColumnId = from.parse().ok()?;
            let to: ColumnId = args.to.parse().ok()?;
            (from == to).then_some((to, index))
        });

    match reorder {
        Some((column, index)) => board.reorder_within(&args.id, column, index),
        None => board.apply_move_named(&args.id, from, &args.to, args.index),
    }
}

/// Execute `fb move <id> --to <col>`.
///
/// The board file is only rewritten when the ticket actually moved.
///
/// # Errors
///
/// Returns an error if the board cannot be loaded or saved, the ticket is not
/// on the board, a column name is unknown, or the ticket is not in `--from`.
pub fn run_move(args: &MoveArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let cfg = open_config(output, project_root)?;
    let mut board = open_board(output, project_root)?;

    let from = match &args.from {
        Some(from) => from.clone(),
        None => match board.column_of(&args.id) {
            Some(column) => column.as_str().to_string(),
            None => {
                return Err(fail(
                    output,
                    &CliError::coded(
                        format!("ticket '{}' not found", args.id),
                        ErrorCode::TicketNotFound,
                    ),
                ));
            }
        },
    };

    let outcome = apply(&mut board, args, &from, cfg.board.allow_reorder)
        .map_err(|e| fail(output, &CliError::from(&e)))?;

    let result = match outcome {
        MoveOutcome::Moved { from, to, index } => {
            save_board(output, project_root, &board)?;
            MoveResult {
                ok: true,
                ticket_id: args.id.clone(),
                moved: true,
                from: Some(from),
                to: Some(to),
                index: Some(index),
            }
        }
        MoveOutcome::Unchanged => MoveResult {
            ok: true,
            ticket_id: args.id.clone(),
            moved: false,
            from: None,
            to: None,
            index: None,
        },
    };

    render(output, &result, |r, w| match (r.from, r.to, r.index) {
        (Some(from), Some(to), Some(index)) if from == to => {
            writeln!(w, "✓ {}: reordered in {} to position {index}", r.ticket_id, to.title())
        }
        (Some(from), Some(to), _) => {
            writeln!(w, "✓ {}: {} → {}", r.ticket_id, from.title(), to.title())
        }
        _ => writeln!(w, "{}: already there, nothing to do", r.ticket_id),
    })
}
