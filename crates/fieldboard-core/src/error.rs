use std::fmt;

/// Machine-readable error codes for scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInitialized,
    ConfigParseError,
    BoardFileCorrupt,
    TicketNotFound,
    InvalidTransition,
    UnknownColumn,
    DuplicateTicket,
    InvalidExpense,
    InvalidEnumValue,
    BoardWriteFailed,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotInitialized => "E1001",
            Self::ConfigParseError => "E1002",
            Self::BoardFileCorrupt => "E1003",
            Self::TicketNotFound => "E2001",
            Self::InvalidTransition => "E2002",
            Self::UnknownColumn => "E2003",
            Self::DuplicateTicket => "E2004",
            Self::InvalidExpense => "E2005",
            Self::InvalidEnumValue => "E2006",
            Self::BoardWriteFailed => "E5001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotInitialized => "Board not initialized",
            Self::ConfigParseError => "Config file parse error",
            Self::BoardFileCorrupt => "Board file is corrupt",
            Self::TicketNotFound => "Ticket not found",
            Self::InvalidTransition => "Ticket is not in the source column",
            Self::UnknownColumn => "Unknown column",
            Self::DuplicateTicket => "Ticket appears more than once",
            Self::InvalidExpense => "Invalid expense amount",
            Self::InvalidEnumValue => "Invalid priority/column value",
            Self::BoardWriteFailed => "Board file write failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => Some("Run `fb init` to create a board in this directory."),
            Self::ConfigParseError => Some("Fix syntax in .fieldboard/config.toml and retry."),
            Self::BoardFileCorrupt => {
                Some("Restore .fieldboard/board.json or re-seed it with `fb init --force`.")
            }
            Self::TicketNotFound => Some("Run `fb board` to list ticket IDs."),
            Self::InvalidTransition => {
                Some("Omit --from to move the ticket from its current column.")
            }
            Self::UnknownColumn => {
                Some("Use one of: new, inProgress, scheduled, onHold, completed.")
            }
            Self::DuplicateTicket => Some("Give every ticket a unique ID."),
            Self::InvalidExpense => Some("Expense amounts must be finite and non-negative."),
            Self::InvalidEnumValue => Some("Use one of the documented priority/column values."),
            Self::BoardWriteFailed => Some("Check disk space and write permissions."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
