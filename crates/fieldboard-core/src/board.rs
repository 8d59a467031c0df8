//! The five-column ticket board and its transition rules.
//!
//! A [`Board`] owns every ticket and keeps them partitioned: each ticket ID
//! lives in exactly one column, and a column's order is its display order.
//! All mutating operations validate first and mutate second, so a failed
//! call leaves the board exactly as it was.
//!
//! # Moves
//!
//! The board enforces structure only. Any column may move to any other
//! column; there is no workflow-legality policy (completed → new is fine).
//!
//! # Drag resolution
//!
//! Drag-and-drop is split into two phases. [`Board::resolve_transition_intent`]
//! turns "ticket X was dropped on ticket Y" into a [`TransitionIntent`] (or
//! nothing, for drops that do not change the column), and only a resolved
//! intent is ever applied. No partial mutation is observable.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info, warn};

use crate::error::ErrorCode;
use crate::model::column::ColumnId;
use crate::model::ticket::{InvalidExpense, Ticket};

/// Why a move was refused. The board is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The ticket is not in the column the move claims to start from.
    #[error("ticket {ticket_id} is not in column {column}")]
    InvalidTransition { ticket_id: String, column: ColumnId },

    /// A column id outside the five recognized columns.
    #[error("unknown column: '{0}'")]
    UnknownColumn(String),
}

impl MoveError {
    /// Stable error code for this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            Self::UnknownColumn(_) => ErrorCode::UnknownColumn,
        }
    }
}

/// Errors from building or editing a board.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoardError {
    #[error("ticket {id} appears in both {first} and {second}")]
    DuplicateTicket {
        id: String,
        first: ColumnId,
        second: ColumnId,
    },

    #[error("ticket {id}: {source}")]
    InvalidExpense {
        id: String,
        #[source]
        source: InvalidExpense,
    },

    #[error("ticket not found: {0}")]
    TicketNotFound(String),

    #[error("ticket {0} cannot change its id through an edit")]
    IdentityChanged(String),
}

impl BoardError {
    /// Stable error code for this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateTicket { .. } => ErrorCode::DuplicateTicket,
            Self::InvalidExpense { .. } => ErrorCode::InvalidExpense,
            Self::TicketNotFound(_) => ErrorCode::TicketNotFound,
            Self::IdentityChanged(_) => ErrorCode::InternalUnexpected,
        }
    }
}

/// A resolved, not yet applied, ticket move.
///
/// Serializes as `{"source", "destination", "ticketId"}`; `position` is only
/// present on reorder intents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionIntent {
    pub source: ColumnId,
    pub destination: ColumnId,
    pub ticket_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

impl TransitionIntent {
    /// True when the intent keeps the ticket in its column.
    #[must_use]
    pub fn is_reorder(&self) -> bool {
        self.source == self.destination
    }
}

/// Result of a successful move call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The ticket now sits in `to` at `index`.
    Moved {
        from: ColumnId,
        to: ColumnId,
        index: usize,
    },
    /// Nothing to do (same column, or already at the requested position).
    Unchanged,
}

/// Why a drop did not resolve to a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropRejection {
    /// The drag ended over empty space.
    NoTarget,
    /// The dragged ticket is not on the board.
    UnknownSource,
    /// The ticket under the drop point is not on the board.
    UnknownDestination,
    /// The drop landed in the column the ticket already occupies.
    SameColumn,
}

impl fmt::Display for DropRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoTarget => "no drop target",
            Self::UnknownSource => "dragged ticket not on board",
            Self::UnknownDestination => "drop target not on board",
            Self::SameColumn => "dropped in its own column",
        })
    }
}

/// Ticket board: five ordered columns partitioning every ticket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardColumns", into = "BoardColumns")]
pub struct Board {
    columns: [Vec<Ticket>; 5],
}

/// On-disk shape: one camelCase key per column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct BoardColumns {
    new: Vec<Ticket>,
    in_progress: Vec<Ticket>,
    scheduled: Vec<Ticket>,
    on_hold: Vec<Ticket>,
    completed: Vec<Ticket>,
}

impl TryFrom<BoardColumns> for Board {
    type Error = BoardError;

    fn try_from(value: BoardColumns) -> Result<Self, Self::Error> {
        let board = Self {
            columns: [
                value.new,
                value.in_progress,
                value.scheduled,
                value.on_hold,
                value.completed,
            ],
        };
        board.validate()?;
        Ok(board)
    }
}

impl From<Board> for BoardColumns {
    fn from(board: Board) -> Self {
        let [new, in_progress, scheduled, on_hold, completed] = board.columns;
        Self {
            new,
            in_progress,
            scheduled,
            on_hold,
            completed,
        }
    }
}

impl Board {
    /// An empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from per-column ticket lists.
    ///
    /// A column listed more than once has its tickets appended in order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DuplicateTicket`] if an ID occurs twice anywhere,
    /// or [`BoardError::InvalidExpense`] for a ticket with a bad expense amount.
    pub fn from_columns<I>(columns: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = (ColumnId, Vec<Ticket>)>,
    {
        let mut board = Self::new();
        for (column, tickets) in columns {
            board.columns[column.index()].extend(tickets);
        }
        board.validate()?;
        Ok(board)
    }

    fn validate(&self) -> Result<(), BoardError> {
        let mut seen: HashMap<&str, ColumnId> = HashMap::new();
        for (column, ticket) in self.tickets() {
            if let Some(first) = seen.insert(ticket.id.as_str(), column) {
                return Err(BoardError::DuplicateTicket {
                    id: ticket.id.clone(),
                    first,
                    second: column,
                });
            }
            ticket.validate().map_err(|source| BoardError::InvalidExpense {
                id: ticket.id.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Add a freshly created ticket to the end of the `new` column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DuplicateTicket`] if the ID is already on the
    /// board, or [`BoardError::InvalidExpense`] for a bad expense amount.
    pub fn insert_new(&mut self, ticket: Ticket) -> Result<(), BoardError> {
        if let Some((existing, _)) = self.locate(&ticket.id) {
            return Err(BoardError::DuplicateTicket {
                id: ticket.id,
                first: existing,
                second: ColumnId::New,
            });
        }
        ticket.validate().map_err(|source| BoardError::InvalidExpense {
            id: ticket.id.clone(),
            source,
        })?;
        debug!(ticket_id = %ticket.id, "ticket added to new");
        self.columns[ColumnId::New.index()].push(ticket);
        Ok(())
    }

    /// Tickets in one column, in display order.
    #[must_use]
    pub fn column(&self, column: ColumnId) -> &[Ticket] {
        &self.columns[column.index()]
    }

    /// Every column with its tickets, left to right.
    pub fn columns(&self) -> impl Iterator<Item = (ColumnId, &[Ticket])> + '_ {
        ColumnId::ALL
            .into_iter()
            .map(|column| (column, self.column(column)))
    }

    /// Every ticket with the column holding it, in board display order.
    pub fn tickets(&self) -> impl Iterator<Item = (ColumnId, &Ticket)> + '_ {
        self.columns()
            .flat_map(|(column, tickets)| tickets.iter().map(move |t| (column, t)))
    }

    /// Total number of tickets across all columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }

    /// Column and index of a ticket.
    #[must_use]
    pub fn locate(&self, ticket_id: &str) -> Option<(ColumnId, usize)> {
        self.columns().find_map(|(column, tickets)| {
            tickets
                .iter()
                .position(|t| t.id == ticket_id)
                .map(|index| (column, index))
        })
    }

    #[must_use]
    pub fn column_of(&self, ticket_id: &str) -> Option<ColumnId> {
        self.locate(ticket_id).map(|(column, _)| column)
    }

    #[must_use]
    pub fn ticket(&self, ticket_id: &str) -> Option<&Ticket> {
        self.locate(ticket_id)
            .map(|(column, index)| &self.columns[column.index()][index])
    }

    /// Edit a ticket's fields in place.
    ///
    /// The edit is all-or-nothing: if it changes the ticket's ID or leaves an
    /// invalid expense behind, the ticket is restored and an error returned.
    ///
    /// # Errors
    ///
    /// [`BoardError::TicketNotFound`], [`BoardError::IdentityChanged`], or
    /// [`BoardError::InvalidExpense`].
    pub fn edit_ticket<F>(&mut self, ticket_id: &str, edit: F) -> Result<(), BoardError>
    where
        F: FnOnce(&mut Ticket),
    {
        let (column, index) = self
            .locate(ticket_id)
            .ok_or_else(|| BoardError::TicketNotFound(ticket_id.to_string()))?;
        let slot = &mut self.columns[column.index()][index];
        let before = slot.clone();
        edit(&mut *slot);

        if slot.id != ticket_id {
            warn!(ticket_id, attempted = %slot.id, "edit tried to change ticket id; reverted");
            *slot = before;
            return Err(BoardError::IdentityChanged(ticket_id.to_string()));
        }
        if let Err(source) = slot.validate() {
            *slot = before;
            return Err(BoardError::InvalidExpense {
                id: ticket_id.to_string(),
                source,
            });
        }
        Ok(())
    }

    /// Move a ticket between columns.
    ///
    /// The ticket is inserted into `to` at `target_index`, or appended when the
    /// index is absent or past the end. Every other ticket keeps its relative
    /// order. Moving within the same column is a no-op; see
    /// [`Board::reorder_within`] for positional moves.
    ///
    /// # Errors
    ///
    /// [`MoveError::InvalidTransition`] when `from` does not hold the ticket.
    pub fn apply_move(
        &mut self,
        ticket_id: &str,
        from: ColumnId,
        to: ColumnId,
        target_index: Option<usize>,
    ) -> Result<MoveOutcome, MoveError> {
        let Some(position) = self.position_in(from, ticket_id) else {
            warn!(ticket_id, %from, %to, "move rejected: ticket not in source column");
            return Err(MoveError::InvalidTransition {
                ticket_id: ticket_id.to_string(),
                column: from,
            });
        };

        if from == to {
            debug!(ticket_id, column = %from, "same-column move ignored");
            return Ok(MoveOutcome::Unchanged);
        }

        let ticket = self.columns[from.index()].remove(position);
        let dest = &mut self.columns[to.index()];
        let index = target_index
            .filter(|&i| i <= dest.len())
            .unwrap_or(dest.len());
        dest.insert(index, ticket);

        info!(ticket_id, %from, %to, index, "ticket moved");
        Ok(MoveOutcome::Moved { from, to, index })
    }

    /// [`Board::apply_move`] with columns given as text.
    ///
    /// # Errors
    ///
    /// [`MoveError::UnknownColumn`] when either column does not parse, then the
    /// errors of [`Board::apply_move`].
    pub fn apply_move_named(
        &mut self,
        ticket_id: &str,
        from: &str,
        to: &str,
        target_index: Option<usize>,
    ) -> Result<MoveOutcome, MoveError> {
        let from = parse_column(from)?;
        let to = parse_column(to)?;
        self.apply_move(ticket_id, from, to, target_index)
    }

    /// Apply a resolved intent.
    ///
    /// Reorder intents (source == destination with a position) go through
    /// [`Board::reorder_within`]; everything else through [`Board::apply_move`].
    ///
    /// # Errors
    ///
    /// [`MoveError::InvalidTransition`] if the board changed since the intent
    /// was resolved and the ticket is no longer in the source column.
    pub fn apply_intent(&mut self, intent: &TransitionIntent) -> Result<MoveOutcome, MoveError> {
        match (intent.is_reorder(), intent.position) {
            (true, Some(position)) => {
                self.reorder_within(&intent.ticket_id, intent.source, position)
            }
            _ => self.apply_move(
                &intent.ticket_id,
                intent.source,
                intent.destination,
                intent.position,
            ),
        }
    }

    /// Move a ticket to `target_index` inside its own column.
    ///
    /// Array-move semantics: the ticket is removed and reinserted so that it
    /// ends up at `target_index` (clamped to the last slot).
    ///
    /// # Errors
    ///
    /// [`MoveError::InvalidTransition`] when `column` does not hold the ticket.
    pub fn reorder_within(
        &mut self,
        ticket_id: &str,
        column: ColumnId,
        target_index: usize,
    ) -> Result<MoveOutcome, MoveError> {
        let Some(position) = self.position_in(column, ticket_id) else {
            warn!(ticket_id, %column, "reorder rejected: ticket not in column");
            return Err(MoveError::InvalidTransition {
                ticket_id: ticket_id.to_string(),
                column,
            });
        };

        let tickets = &mut self.columns[column.index()];
        let index = target_index.min(tickets.len() - 1);
        if index == position {
            return Ok(MoveOutcome::Unchanged);
        }

        let ticket = tickets.remove(position);
        tickets.insert(index, ticket);
        info!(ticket_id, %column, from_index = position, index, "ticket reordered");
        Ok(MoveOutcome::Moved {
            from: column,
            to: column,
            index,
        })
    }

    /// Turn "`dragged_id` was dropped on `dropped_on_id`" into a move.
    ///
    /// Returns `None` for drops over empty space, for IDs not on the board,
    /// and for drops inside the ticket's own column.
    #[must_use]
    pub fn resolve_transition_intent(
        &self,
        dragged_id: &str,
        dropped_on_id: Option<&str>,
    ) -> Option<TransitionIntent> {
        self.resolve_drop(dragged_id, dropped_on_id).ok()
    }

    /// Like [`Board::resolve_transition_intent`], reporting why a drop was
    /// rejected.
    ///
    /// # Errors
    ///
    /// The [`DropRejection`] explaining the no-op.
    pub fn resolve_drop(
        &self,
        dragged_id: &str,
        dropped_on_id: Option<&str>,
    ) -> Result<TransitionIntent, DropRejection> {
        let over = dropped_on_id.ok_or(DropRejection::NoTarget)?;
        let source = self
            .column_of(dragged_id)
            .ok_or(DropRejection::UnknownSource)?;
        let destination = self
            .column_of(over)
            .ok_or(DropRejection::UnknownDestination)?;
        if source == destination {
            return Err(DropRejection::SameColumn);
        }
        Ok(TransitionIntent {
            source,
            destination,
            ticket_id: dragged_id.to_string(),
            position: None,
        })
    }

    fn position_in(&self, column: ColumnId, ticket_id: &str) -> Option<usize> {
        self.columns[column.index()]
            .iter()
            .position(|t| t.id == ticket_id)
    }
}

fn parse_column(raw: &str) -> Result<ColumnId, MoveError> {
    raw.parse()
        .map_err(|_| MoveError::UnknownColumn(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ticket::Expense;

    fn t(id: &str) -> Ticket {
        Ticket::new(id, format!("ticket {id}"))
    }

    fn ids(board: &Board, column: ColumnId) -> Vec<&str> {
        board.column(column).iter().map(|t| t.id.as_str()).collect()
    }

    fn two_in_new() -> Board {
        Board::from_columns([(ColumnId::New, vec![t("T1"), t("T2")])]).unwrap()
    }

    // === construction ===

    #[test]
    fn from_columns_rejects_duplicates_across_columns() {
        let err = Board::from_columns([
            (ColumnId::New, vec![t("T1")]),
            (ColumnId::Completed, vec![t("T1")]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            BoardError::DuplicateTicket {
                id: "T1".into(),
                first: ColumnId::New,
                second: ColumnId::Completed,
            }
        );
        assert_eq!(err.code(), ErrorCode::DuplicateTicket);
    }

    #[test]
    fn from_columns_rejects_negative_expense() {
        let mut bad = t("T1");
        bad.expenses.push(Expense {
            label: "refund".into(),
            amount: -10.0,
        });
        let err = Board::from_columns([(ColumnId::New, vec![bad])]).unwrap_err();
        assert!(matches!(err, BoardError::InvalidExpense { ref id, .. } if id == "T1"));
    }

    #[test]
    fn insert_new_appends_to_new_and_rejects_duplicates() {
        let mut board = two_in_new();
        board.insert_new(t("T3")).unwrap();
        assert_eq!(ids(&board, ColumnId::New), ["T1", "T2", "T3"]);

        board
            .apply_move("T3", ColumnId::New, ColumnId::OnHold, None)
            .unwrap();
        let err = board.insert_new(t("T3")).unwrap_err();
        assert!(matches!(
            err,
            BoardError::DuplicateTicket {
                first: ColumnId::OnHold,
                ..
            }
        ));
        assert_eq!(board.len(), 3);
    }

    // === apply_move ===

    #[test]
    fn move_to_other_column_appends() {
        let mut board = two_in_new();
        let outcome = board
            .apply_move("T2", ColumnId::New, ColumnId::InProgress, None)
            .unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                from: ColumnId::New,
                to: ColumnId::InProgress,
                index: 0,
            }
        );
        assert_eq!(ids(&board, ColumnId::New), ["T1"]);
        assert_eq!(ids(&board, ColumnId::InProgress), ["T2"]);
    }

    #[test]
    fn move_inserts_at_target_index() {
        let mut board = Board::from_columns([
            (ColumnId::New, vec![t("A")]),
            (ColumnId::Scheduled, vec![t("S1"), t("S2")]),
        ])
        .unwrap();
        board
            .apply_move("A", ColumnId::New, ColumnId::Scheduled, Some(1))
            .unwrap();
        assert_eq!(ids(&board, ColumnId::Scheduled), ["S1", "A", "S2"]);
    }

    #[test]
    fn out_of_range_index_appends() {
        let mut board = Board::from_columns([
            (ColumnId::New, vec![t("A")]),
            (ColumnId::Scheduled, vec![t("S1")]),
        ])
        .unwrap();
        let outcome = board
            .apply_move("A", ColumnId::New, ColumnId::Scheduled, Some(99))
            .unwrap();
        assert_eq!(ids(&board, ColumnId::Scheduled), ["S1", "A"]);
        assert!(matches!(outcome, MoveOutcome::Moved { index: 1, .. }));
    }

    #[test]
    fn move_from_wrong_column_is_invalid_and_leaves_board() {
        let mut board = two_in_new();
        let before = board.clone();
        let err = board
            .apply_move("T9", ColumnId::New, ColumnId::InProgress, None)
            .unwrap_err();
        assert_eq!(
            err,
            MoveError::InvalidTransition {
                ticket_id: "T9".into(),
                column: ColumnId::New,
            }
        );
        assert_eq!(err.code(), ErrorCode::InvalidTransition);
        assert_eq!(board, before);
    }

    #[test]
    fn same_column_move_is_noop() {
        let mut board = two_in_new();
        let before = board.clone();
        let outcome = board
            .apply_move("T1", ColumnId::New, ColumnId::New, Some(1))
            .unwrap();
        assert_eq!(outcome, MoveOutcome::Unchanged);
        assert_eq!(board, before);
    }

    #[test]
    fn same_column_move_still_checks_membership() {
        let mut board = two_in_new();
        assert!(
            board
                .apply_move("T1", ColumnId::Completed, ColumnId::Completed, None)
                .is_err()
        );
    }

    #[test]
    fn any_column_can_move_to_any_other() {
        let mut board =
            Board::from_columns([(ColumnId::Completed, vec![t("DONE")])]).unwrap();
        board
            .apply_move("DONE", ColumnId::Completed, ColumnId::New, None)
            .unwrap();
        assert_eq!(board.column_of("DONE"), Some(ColumnId::New));
    }

    #[test]
    fn named_move_reports_unknown_column() {
        let mut board = two_in_new();
        let before = board.clone();
        assert_eq!(
            board.apply_move_named("T1", "new", "archived", None),
            Err(MoveError::UnknownColumn("archived".into()))
        );
        assert_eq!(
            board.apply_move_named("T1", "backlog", "new", None),
            Err(MoveError::UnknownColumn("backlog".into()))
        );
        assert_eq!(board, before);

        board
            .apply_move_named("T1", "new", "in-progress", None)
            .unwrap();
        assert_eq!(board.column_of("T1"), Some(ColumnId::InProgress));
    }

    // === reorder ===

    #[test]
    fn reorder_uses_array_move_semantics() {
        let mut board =
            Board::from_columns([(ColumnId::New, vec![t("A"), t("B"), t("C")])]).unwrap();
        board.reorder_within("A", ColumnId::New, 2).unwrap();
        assert_eq!(ids(&board, ColumnId::New), ["B", "C", "A"]);
        board.reorder_within("A", ColumnId::New, 0).unwrap();
        assert_eq!(ids(&board, ColumnId::New), ["A", "B", "C"]);
        assert_eq!(
            board.reorder_within("A", ColumnId::New, 0).unwrap(),
            MoveOutcome::Unchanged
        );
        board.reorder_within("B", ColumnId::New, 50).unwrap();
        assert_eq!(ids(&board, ColumnId::New), ["A", "C", "B"]);
    }

    #[test]
    fn apply_intent_routes_reorder_and_transition() {
        let mut board =
            Board::from_columns([(ColumnId::New, vec![t("A"), t("B")])]).unwrap();
        let reorder = TransitionIntent {
            source: ColumnId::New,
            destination: ColumnId::New,
            ticket_id: "B".into(),
            position: Some(0),
        };
        board.apply_intent(&reorder).unwrap();
        assert_eq!(ids(&board, ColumnId::New), ["B", "A"]);

        let transition = TransitionIntent {
            source: ColumnId::New,
            destination: ColumnId::Scheduled,
            ticket_id: "A".into(),
            position: None,
        };
        board.apply_intent(&transition).unwrap();
        assert_eq!(ids(&board, ColumnId::Scheduled), ["A"]);

        // Stale intent: A already left `new`.
        assert!(board.apply_intent(&transition).is_err());
    }

    // === resolve ===

    #[test]
    fn resolve_cross_column_drop() {
        let board = Board::from_columns([
            (ColumnId::New, vec![t("T1")]),
            (ColumnId::OnHold, vec![t("H1")]),
        ])
        .unwrap();
        let intent = board.resolve_transition_intent("T1", Some("H1")).unwrap();
        assert_eq!(intent.source, ColumnId::New);
        assert_eq!(intent.destination, ColumnId::OnHold);
        assert_eq!(intent.ticket_id, "T1");
        assert_eq!(intent.position, None);
    }

    #[test]
    fn resolve_rejections() {
        let board = Board::from_columns([
            (ColumnId::New, vec![t("T1"), t("T2")]),
            (ColumnId::OnHold, vec![t("H1")]),
        ])
        .unwrap();
        assert_eq!(board.resolve_drop("T1", None), Err(DropRejection::NoTarget));
        assert_eq!(
            board.resolve_drop("ZZ", Some("H1")),
            Err(DropRejection::UnknownSource)
        );
        assert_eq!(
            board.resolve_drop("T1", Some("ZZ")),
            Err(DropRejection::UnknownDestination)
        );
        assert_eq!(
            board.resolve_drop("T1", Some("T2")),
            Err(DropRejection::SameColumn)
        );
        assert_eq!(board.resolve_transition_intent("T1", Some("T1")), None);
    }

    #[test]
    fn intent_json_shape() {
        let intent = TransitionIntent {
            source: ColumnId::New,
            destination: ColumnId::InProgress,
            ticket_id: "T1".into(),
            position: None,
        };
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"source": "new", "destination": "inProgress", "ticketId": "T1"})
        );
    }

    // === edit ===

    #[test]
    fn edit_ticket_updates_fields() {
        let mut board = two_in_new();
        board
            .edit_ticket("T1", |ticket| {
                ticket.payment_received = true;
                ticket.comments = 3;
            })
            .unwrap();
        let ticket = board.ticket("T1").unwrap();
        assert!(ticket.payment_received);
        assert_eq!(ticket.comments, 3);
    }

    #[test]
    fn edit_ticket_cannot_change_identity() {
        let mut board = two_in_new();
        let before = board.clone();
        let err = board
            .edit_ticket("T1", |ticket| {
                ticket.id = "T2".into();
                ticket.title = "hijacked".into();
            })
            .unwrap_err();
        assert_eq!(err, BoardError::IdentityChanged("T1".into()));
        assert_eq!(board, before);
    }

    #[test]
    fn edit_ticket_rejects_bad_expense() {
        let mut board = two_in_new();
        let err = board
            .edit_ticket("T2", |ticket| {
                ticket.expenses.push(Expense {
                    label: "oops".into(),
                    amount: f64::NAN,
                });
            })
            .unwrap_err();
        assert!(matches!(err, BoardError::InvalidExpense { .. }));
        assert!(board.ticket("T2").unwrap().expenses.is_empty());
        assert_eq!(
            board.edit_ticket("nope", |_| {}),
            Err(BoardError::TicketNotFound("nope".into()))
        );
    }

    // === serde ===

    #[test]
    fn board_json_roundtrip_keeps_order() {
        let board = Board::from_columns([
            (ColumnId::New, vec![t("B"), t("A")]),
            (ColumnId::InProgress, vec![t("C")]),
        ])
        .unwrap();
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["new"][0]["id"], "B");
        assert_eq!(json["inProgress"][0]["id"], "C");
        assert_eq!(json["onHold"], serde_json::json!([]));

        let back: Board = serde_json::from_value(json).unwrap();
        assert_eq!(back, board);
    }

    #[test]
    fn deserialize_rejects_duplicate_ids() {
        let raw = r#"{"new": [{"id": "X"}], "completed": [{"id": "X"}]}"#;
        let err = serde_json::from_str::<Board>(raw).unwrap_err();
        assert!(err.to_string().contains("appears in both"));
    }

    #[test]
    fn missing_columns_default_to_empty() {
        let board: Board = serde_json::from_str(r#"{"scheduled": [{"id": "S"}]}"#).unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board.column_of("S"), Some(ColumnId::Scheduled));
        assert!(!board.is_empty());
        assert!(Board::new().is_empty());
    }
}
