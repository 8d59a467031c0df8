//! Per-ticket money: quote, expenses, net payable, payment status.
//!
//! Everything here is derived on read from the ticket's own fields. Nothing
//! errors: a missing work stage counts as a zero quote, an empty expense list
//! as zero expenses. A negative net amount is an over-budget ticket, which is
//! a valid outcome and is reported as-is.

use serde::Serialize;
use std::fmt;

use crate::model::ticket::{Expense, Ticket};

/// Whether the client has paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PaymentStatus {
    Received,
    Pending,
}

impl PaymentStatus {
    #[must_use]
    pub const fn from_flag(received: bool) -> Self {
        if received { Self::Received } else { Self::Pending }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "Received",
            Self::Pending => "Pending",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived financial fields for one ticket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    pub quote_amount: f64,
    pub total_expenses: f64,
    pub net_amount: f64,
    pub payment_status: PaymentStatus,
}

impl Financials {
    /// Expenses exceed the quote.
    #[must_use]
    pub fn is_over_budget(&self) -> bool {
        self.net_amount < 0.0
    }
}

/// Sum of expense amounts; zero for an empty list.
#[must_use]
pub fn total_expenses(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.amount).sum()
}

/// Compute the financial view of a ticket.
#[must_use]
pub fn compute_financials(ticket: &Ticket) -> Financials {
    let quote_amount = ticket.work_stage.as_ref().map_or(0.0, |ws| ws.quote_amount);
    let total_expenses = total_expenses(&ticket.expenses);
    Financials {
        quote_amount,
        total_expenses,
        net_amount: quote_amount - total_expenses,
        payment_status: PaymentStatus::from_flag(ticket.payment_received),
    }
}

/// Totals over a set of tickets (one column, or the whole board).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub tickets: usize,
    pub quote_total: f64,
    pub expense_total: f64,
    pub net_total: f64,
    pub received: usize,
    pub pending: usize,
    pub over_budget: usize,
}

impl FinancialSummary {
    pub fn from_tickets<'a, I>(tickets: I) -> Self
    where
        I: IntoIterator<Item = &'a Ticket>,
    {
        tickets
            .into_iter()
            .map(compute_financials)
            .fold(Self::default(), |mut acc, f| {
                acc.tickets += 1;
                acc.quote_total += f.quote_amount;
                acc.expense_total += f.total_expenses;
                acc.net_total += f.net_amount;
                match f.payment_status {
                    PaymentStatus::Received => acc.received += 1,
                    PaymentStatus::Pending => acc.pending += 1,
                }
                if f.is_over_budget() {
                    acc.over_budget += 1;
                }
                acc
            })
    }
}
