//! `fb board`: list every column and its tickets in display order.

use crate::cmd::open_board;
use crate::output::{OutputMode, pretty_section, render_mode};
use clap::Args;
use fieldboard_core::{Board, ColumnId, Priority};
use serde::Serialize;
use std::path::Path;

#[derive(Args, Debug)]
pub struct BoardArgs {
    /// Show a single column (e.g. `scheduled`, `in-progress`).
    #[arg(long, value_name = "COL")]
    pub column: Option<ColumnId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnView {
    pub id: ColumnId,
    pub title: &'static str,
    pub count: usize,
    pub tickets: Vec<TicketRow>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRow {
    pub id: String,
    pub priority: Priority,
    pub title: String,
    pub client: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub assignee: String,
}

/// Build the column views shown by `fb board`.
pub fn column_views(board: &Board, only: Option<ColumnId>) -> Vec<ColumnView> {
    board
        .columns()
        .filter(|(id, _)| only.is_none_or(|c| c == *id))
        .map(|(id, tickets)| ColumnView {
            id,
            title: id.title(),
            count: tickets.len(),
            tickets: tickets
                .iter()
                .map(|t| TicketRow {
                    id: t.id.clone(),
                    priority: t.priority,
                    title: t.title.clone(),
                    client: t.client.clone(),
                    assignee: t.assignee.initials.clone(),
                })
                .collect(),
        })
        .collect()
}

pub fn run_board(args: &BoardArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let board = open_board(output, project_root)?;
    let views = column_views(&board, args.column);

    render_mode(
        output,
        &views,
        |views, w| {
            for view in views {
                for t in &view.tickets {
                    writeln!(
                        w,
                        "{}\t{}\t{}\t{}\t{}",
                        view.id, t.id, t.priority, t.title, t.client
                    )?;
                }
            }
            Ok(())
        },
        |views, w| {
            for (i, view) in views.iter().enumerate() {
                if i > 0 {
                    writeln!(w)?;
                }
                pretty_section(w, &format!("{} ({})", view.title, view.count))?;
                if view.tickets.is_empty() {
                    writeln!(w, "  (empty)")?;
                }
                for t in &view.tickets {
                    let assignee = if t.assignee.is_empty() {
                        String::new()
                    } else {
                        format!("  [{}]", t.assignee)
                    };
                    writeln!(
                        w,
                        "  {:<10} {:<8} {}  ({}){assignee}",
                        t.id, t.priority, t.title, t.client
                    )?;
                }
            }
            Ok(())
        },
    )
}
