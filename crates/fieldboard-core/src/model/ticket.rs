use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::ParseEnumError;

/// Shown in place of a PO number that has not been issued yet.
pub const PO_PENDING: &str = "Pending";

/// Ticket priority. Ordered `Low < Medium < High < Critical`.
///
/// Unrecognized values deserialize as [`Priority::Low`], which is also the
/// default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(ParseEnumError {
                expected: "priority",
                got: s.to_string(),
            }),
        }
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        value.as_str().to_string()
    }
}

/// Person a ticket is assigned to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assignee {
    pub name: String,
    pub initials: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A single recorded cost against a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub label: String,
    pub amount: f64,
}

/// Error returned for an expense amount that is negative, NaN or infinite.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("expense '{label}' has invalid amount {amount}")]
pub struct InvalidExpense {
    pub label: String,
    pub amount: f64,
}

impl Expense {
    /// Build an expense, rejecting amounts that are not finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidExpense`] when `amount` is negative or not finite.
    pub fn new(label: impl Into<String>, amount: f64) -> Result<Self, InvalidExpense> {
        let expense = Self {
            label: label.into(),
            amount,
        };
        expense.validate()?;
        Ok(expense)
    }

    fn validate(&self) -> Result<(), InvalidExpense> {
        if self.amount.is_finite() && self.amount >= 0.0 {
            Ok(())
        } else {
            Err(InvalidExpense {
                label: self.label.clone(),
                amount: self.amount,
            })
        }
    }
}

/// Service and billing sub-record of a ticket.
///
/// `quote_amount` is the gross billable amount. `quote_taxable` is carried
/// for display and never enters net-amount arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkStage {
    pub quote_no: String,
    pub quote_amount: f64,
    pub quote_taxable: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_number: Option<String>,
    pub po_status: String,
    pub work_status: String,
    pub jcr_status: String,
    pub agent_name: String,
    pub date_received: String,
}

impl WorkStage {
    /// The PO number, or [`PO_PENDING`] when none (or an empty one) is recorded.
    #[must_use]
    pub fn po_display(&self) -> &str {
        match self.po_number.as_deref() {
            Some(po) if !po.is_empty() => po,
            _ => PO_PENDING,
        }
    }
}

/// A field-service ticket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub title: String,
    pub client: String,
    pub branch: String,
    pub priority: Priority,
    pub assignee: Assignee,
    pub comments: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<String>,
    pub payment_received: bool,
    pub expenses: Vec<Expense>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_stage: Option<WorkStage>,
}

/// Dates a ticket card shows, after lifecycle filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VisibleDates<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<&'a str>,
}

impl Ticket {
    /// A ticket with the given identity and title and every other field defaulted.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Append an expense.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidExpense`] when `amount` is negative or not finite.
    pub fn add_expense(&mut self, label: impl Into<String>, amount: f64) -> Result<(), InvalidExpense> {
        self.expenses.push(Expense::new(label, amount)?);
        Ok(())
    }

    /// Check every expense amount.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidExpense`] found.
    pub fn validate(&self) -> Result<(), InvalidExpense> {
        self.expenses.iter().try_for_each(Expense::validate)
    }

    /// Dates worth showing on the card.
    ///
    /// The due date is hidden once the ticket has a completed date, and the
    /// scheduled date is cut at its first comma (`"12 Mar, 10:00"` → `"12 Mar"`).
    #[must_use]
    pub fn visible_dates(&self) -> VisibleDates<'_> {
        let completed = self.completed_date.as_deref().filter(|d| !d.is_empty());
        let due = if completed.is_none() {
            self.due_date.as_deref().filter(|d| !d.is_empty())
        } else {
            None
        };
        let scheduled = self
            .scheduled_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .and_then(|d| d.split(',').next());

        VisibleDates {
            due,
            scheduled,
            completed,
        }
    }
}
