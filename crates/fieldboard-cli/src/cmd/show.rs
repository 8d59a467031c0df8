//! `fb show`: display one ticket card with its work stage and financials.

use crate::cmd::open_board;
use crate::output::{
    CliError, OutputMode, fail, money, pretty_kv, pretty_rule, pretty_section, render_mode,
};
use clap::Args;
use fieldboard_core::error::ErrorCode;
use fieldboard_core::finance::{Financials, compute_financials};
use fieldboard_core::model::ticket::VisibleDates;
use fieldboard_core::{Board, ColumnId, Ticket};
use serde::Serialize;
use std::path::Path;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Ticket ID to display.
    pub id: String,
}

/// Everything `fb show` prints for a ticket.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketCard<'a> {
    pub column: ColumnId,
    pub ticket: &'a Ticket,
    pub dates: VisibleDates<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_display: Option<&'a str>,
    pub financials: Financials,
}

impl<'a> TicketCard<'a> {
    pub fn build(board: &'a Board, ticket_id: &str) -> Option<Self> {
        let column = board.column_of(ticket_id)?;
        let ticket = board.ticket(ticket_id)?;
        Some(Self {
            column,
            ticket,
            dates: ticket.visible_dates(),
            po_display: ticket.work_stage.as_ref().map(|ws| ws.po_display()),
            financials: compute_financials(ticket),
        })
    }
}

/// Execute `fb show <id>`.
///
/// # Errors
///
/// Returns an error if the board cannot be loaded, the ticket is not on the
/// board, or output rendering fails.
pub fn run_show(args: &ShowArgs, output: OutputMode, project_root: &Path) -> anyhow::Result<()> {
    let board = open_board(output, project_root)?;

    let Some(card) = TicketCard::build(&board, &args.id) else {
        return Err(fail(
            output,
            &CliError::coded(
                format!("ticket '{}' not found", args.id),
                ErrorCode::TicketNotFound,
            ),
        ));
    };

    render_mode(
        output,
        &card,
        |c, w| {
            let t = c.ticket;
            writeln!(w, "id\t{}", t.id)?;
            writeln!(w, "column\t{}", c.column)?;
            writeln!(w, "title\t{}", t.title)?;
            writeln!(w, "client\t{}", t.client)?;
            writeln!(w, "priority\t{}", t.priority)?;
            writeln!(w, "quote\t{}", money(c.financials.quote_amount))?;
            writeln!(w, "expenses\t{}", money(c.financials.total_expenses))?;
            writeln!(w, "net\t{}", money(c.financials.net_amount))?;
            writeln!(w, "payment\t{}", c.financials.payment_status)
        },
        |c, w| {
            let t = c.ticket;
            pretty_section(w, &format!("{}  {}", t.id, t.title))?;
            pretty_kv(w, "Column", c.column.title())?;
            pretty_kv(w, "Priority", t.priority.to_string())?;
            pretty_kv(w, "Client", &t.client)?;
            if !t.branch.is_empty() {
                pretty_kv(w, "Branch", &t.branch)?;
            }
            if !t.assignee.name.is_empty() {
                pretty_kv(
                    w,
                    "Assignee",
                    format!("{} ({})", t.assignee.name, t.assignee.initials),
                )?;
            }
            if t.comments > 0 {
                pretty_kv(w, "Comments", t.comments.to_string())?;
            }
            if let Some(due) = c.dates.due {
                pretty_kv(w, "Due", due)?;
            }
            if let Some(scheduled) = c.dates.scheduled {
                pretty_kv(w, "Scheduled", scheduled)?;
            }
            if let Some(completed) = c.dates.completed {
                pretty_kv(w, "Completed", completed)?;
            }

            if let Some(ws) = &t.work_stage {
                writeln!(w)?;
                pretty_section(w, "Work stage")?;
                pretty_kv(w, "Quote no", &ws.quote_no)?;
                pretty_kv(w, "Taxable", money(ws.quote_taxable))?;
                pretty_kv(w, "PO", c.po_display.unwrap_or_default())?;
                pretty_kv(w, "PO status", &ws.po_status)?;
                pretty_kv(w, "Work status", &ws.work_status)?;
                pretty_kv(w, "JCR status", &ws.jcr_status)?;
                pretty_kv(w, "Agent", &ws.agent_name)?;
                pretty_kv(w, "Received", &ws.date_received)?;
            }

            writeln!(w)?;
            pretty_section(w, "Financials")?;
            for expense in &t.expenses {
                pretty_kv(w, &expense.label, money(expense.amount))?;
            }
            if !t.expenses.is_empty() {
                pretty_rule(w)?;
            }
            let f = &c.financials;
            pretty_kv(w, "Quote", money(f.quote_amount))?;
            pretty_kv(w, "Expenses", money(f.total_expenses))?;
            let over = if f.is_over_budget() {
                "  (over budget)"
            } else {
                ""
            };
            pretty_kv(w, "Net", format!("{}{over}", money(f.net_amount)))?;
            pretty_kv(w, "Payment", f.payment_status.to_string())
        },
    )
}
