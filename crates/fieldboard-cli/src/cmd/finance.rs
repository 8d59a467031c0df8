//! `fb finance`: per-ticket financials and totals.

use crate::cmd::open_board;
use crate::output::{OutputMode, money, pretty_kv, pretty_rule, pretty_section, render_mode};
use clap::Args;
use fieldboard_core::finance::{FinancialSummary, Financials, compute_financials};
use fieldboard_core::{Board, ColumnId};
use serde::Serialize;
use std::path::Path;

#[derive(Args, Debug)]
pub struct FinanceArgs {
    /// Limit the report to one column.
    #[arg(long, value_name = "COL")]
    pub column: Option<ColumnId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceRow {
    pub id: String,
    pub column: ColumnId,
    pub client: String,
    #[serde(flatten)]
    pub financials: Financials,
    pub over_budget: bool,
}

#[derive(Debug, Serialize)]
pub struct FinanceReport {
    pub tickets: Vec<FinanceRow>,
    pub summary: FinancialSummary,
}

impl FinanceReport {
    pub fn build(board: &Board, only: Option<ColumnId>) -> Self {
        let selected: Vec<_> = board
            .tickets()
            .filter(|(column, _)| only.is_none_or(|c| c == *column))
            .collect();

        let tickets = selected
            .iter()
            .map(|(column, ticket)| {
                let financials = compute_financials(ticket);
                FinanceRow {
                    id: ticket.id.clone(),
                    column: *column,
                    client: ticket.client.clone(),
                    financials,
                    over_budget: financials.is_over_budget(),
                }
            })
            .collect();
        let summary = FinancialSummary::from_tickets(selected.iter().map(|(_, t)| *t));

        Self { tickets, summary }
    }
}

pub fn run_finance(
    args: &FinanceArgs,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let board = open_board(output, project_root)?;
    let report = FinanceReport::build(&board, args.column);

    render_mode(
        output,
        &report,
        |r, w| {
            for row in &r.tickets {
                let f = &row.financials;
                writeln!(
                    w,
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    row.id,
                    row.column,
                    money(f.quote_amount),
                    money(f.total_expenses),
                    money(f.net_amount),
                    f.payment_status
                )?;
            }
            Ok(())
        },
        |r, w| {
            pretty_section(w, "Ticket financials")?;
            writeln!(
                w,
                "{:<10} {:<12} {:>10} {:>10} {:>10}  {}",
                "ID", "COLUMN", "QUOTE", "EXPENSES", "NET", "PAYMENT"
            )?;
            for row in &r.tickets {
                let f = &row.financials;
                let flag = if row.over_budget { "  !" } else { "" };
                writeln!(
                    w,
                    "{:<10} {:<12} {:>10} {:>10} {:>10}  {}{flag}",
                    row.id,
                    row.column,
                    money(f.quote_amount),
                    money(f.total_expenses),
                    money(f.net_amount),
                    f.payment_status
                )?;
            }
            pretty_rule(w)?;
            let s = &r.summary;
            pretty_kv(w, "Tickets", s.tickets.to_string())?;
            pretty_kv(w, "Quoted", money(s.quote_total))?;
            pretty_kv(w, "Expenses", money(s.expense_total))?;
            pretty_kv(w, "Net", money(s.net_total))?;
            pretty_kv(w, "Paid", format!("{} received, {} pending", s.received, s.pending))?;
            pretty_kv(w, "Over budget", s.over_budget.to_string())
        },
    )
}
