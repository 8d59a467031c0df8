use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::ParseEnumError;

/// The five fixed workflow columns, in board display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnId {
    New,
    InProgress,
    Scheduled,
    OnHold,
    Completed,
}

impl ColumnId {
    /// Every column, left to right.
    pub const ALL: [Self; 5] = [
        Self::New,
        Self::InProgress,
        Self::Scheduled,
        Self::OnHold,
        Self::Completed,
    ];

    /// Position of the column on the board.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::New => 0,
            Self::InProgress => 1,
            Self::Scheduled => 2,
            Self::OnHold => 3,
            Self::Completed => 4,
        }
    }

    /// Stable identifier used in board files and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "inProgress",
            Self::Scheduled => "scheduled",
            Self::OnHold => "onHold",
            Self::Completed => "completed",
        }
    }

    /// Column heading shown to people.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::InProgress => "In Progress",
            Self::Scheduled => "Scheduled",
            Self::OnHold => "On Hold",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Accepts the canonical ids plus kebab/snake/space spellings in any case,
/// e.g. `inProgress`, `in-progress`, `IN_PROGRESS`, `on hold`.
impl FromStr for ColumnId {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match folded.as_str() {
            "new" => Ok(Self::New),
            "inprogress" => Ok(Self::InProgress),
            "scheduled" => Ok(Self::Scheduled),
            "onhold" => Ok(Self::OnHold),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseEnumError {
                expected: "column",
                got: s.to_string(),
            }),
        }
    }
}
