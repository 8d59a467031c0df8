//! `fb drag`: replay a single drag gesture against the board.
//!
//! Runs the same start → hover → end sequence a pointer would, so drops that
//! resolve to nothing (empty space, own column) are reported rather than
//! failing. The board file is rewritten only when the drop dispatched a move.

use crate::cmd::{open_board, open_config, save_board};
use crate::output::{CliError, OutputMode, fail, render};
use clap::Args;
use fieldboard_core::error::ErrorCode;
use fieldboard_core::interaction::{DragController, DragEnd};
use fieldboard_core::{Board, MoveError, MoveOutcome, TransitionIntent};
use serde::Serialize;
use std::path::Path;

#[derive(Args, Debug)]
pub struct DragArgs {
    /// Ticket ID being dragged.
    pub id: String,

    /// Ticket ID under the drop point. Omit to drop on empty space.
    #[arg(long, value_name = "ID")]
    pub over: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DragResult {
    ticket_id: String,
    dispatched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    intent: Option<TransitionIntent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// Run one gesture. `None` when the dragged ticket is not on the board.
fn run_gesture(
    board: &mut Board,
    args: &DragArgs,
    allow_reorder: bool,
) -> Option<DragEnd<Result<MoveOutcome, MoveError>>> {
    let mut drag = DragController::new().with_reorder(allow_reorder);
    drag.start(board, &args.id)?;
    drag.hover(args.over.as_deref());
    Some(drag.end(board, args.over.as_deref(), |board, intent| {
        board.apply_intent(intent)
    }))
}

/// Execute `fb drag <id> [--over <id>]`.
///
/// # Errors
///
/// Returns an error if the board cannot be loaded or saved, or the dragged
/// ticket is not on the board.
pub fn run_drag(args: &DragArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let cfg = open_config(output, project_root)?;
    let mut board = open_board(output, project_root)?;

    let Some(end) = run_gesture(&mut board, args, cfg.board.allow_reorder) else {
        return Err(fail(
            output,
            &CliError::coded(
                format!("ticket '{}' not found", args.id),
                ErrorCode::TicketNotFound,
            ),
        ));
    };

    let result = match end {
        DragEnd::Dispatched { intent, result } => {
            let outcome = result.map_err(|e| fail(output, &CliError::from(&e)))?;
            if matches!(outcome, MoveOutcome::Moved { .. }) {
                save_board(output, project_root, &board)?;
            }
            DragResult {
                ticket_id: args.id.clone(),
                dispatched: true,
                intent: Some(intent),
                reason: None,
            }
        }
        DragEnd::Rejected(rejection) => DragResult {
            ticket_id: args.id.clone(),
            dispatched: false,
            intent: None,
            reason: Some(rejection.to_string()),
        },
        DragEnd::Cancelled | DragEnd::NoGesture => DragResult {
            ticket_id: args.id.clone(),
            dispatched: false,
            intent: None,
            reason: Some("gesture cancelled".to_string()),
        },
    };

    render(output, &result, |r, w| match (&r.intent, &r.reason) {
        (Some(intent), _) if intent.is_reorder() => writeln!(
            w,
            "✓ {}: reordered within {}",
            r.ticket_id,
            intent.destination.title()
        ),
        (Some(intent), _) => writeln!(
            w,
            "✓ {}: {} → {}",
            r.ticket_id,
            intent.source.title(),
            intent.destination.title()
        ),
        (None, reason) => writeln!(
            w,
            "{}: drop discarded ({})",
            r.ticket_id,
            reason.as_deref().unwrap_or("no target")
        ),
    })
}
