//! Drag gesture controller.
//!
//! Turns a stream of discrete gesture events (start, hover, end, cancel)
//! from an input source into at most one board mutation per gesture. The
//! controller holds a single active-gesture slot; it never mutates the board
//! itself. On a successful drop it resolves a [`TransitionIntent`] and hands
//! it to the caller's callback, which owns the mutation (and persistence).
//!
//! ```ignore
//! let mut drag = DragController::new();
//! drag.start(&board, "TKT-1");
//! drag.hover(Some("TKT-7"));
//! let end = drag.end(&mut board, Some("TKT-7"), |board, intent| board.apply_intent(intent));
//! ```

use tracing::debug;

use crate::board::{Board, DropRejection, TransitionIntent};
use crate::model::column::ColumnId;
use crate::model::ticket::Ticket;

/// One input event of a drag gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Start { ticket_id: String },
    Hover { over: Option<String> },
    End { over: Option<String> },
    Cancel,
}

/// The gesture in flight. Ephemeral; never part of board state.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveDrag {
    pub ticket_id: String,
    pub source: ColumnId,
    /// Copy of the ticket taken at gesture start, for the drag overlay.
    pub snapshot: Ticket,
    pub hover: Option<String>,
}

/// How a gesture finished.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEnd<R> {
    /// The callback ran once with this intent and returned `result`.
    Dispatched { intent: TransitionIntent, result: R },
    /// The drop resolved to nothing; the callback did not run.
    Rejected(DropRejection),
    /// The gesture was cancelled by the input source.
    Cancelled,
    /// An end or cancel arrived with no gesture in flight.
    NoGesture,
}

impl<R> DragEnd<R> {
    #[must_use]
    pub const fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    active: Option<ActiveDrag>,
    allow_reorder: bool,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow same-column drops over another ticket to reorder the column.
    #[must_use]
    pub fn with_reorder(mut self, allow: bool) -> Self {
        self.allow_reorder = allow;
        self
    }

    #[must_use]
    pub const fn active(&self) -> Option<&ActiveDrag> {
        self.active.as_ref()
    }

    /// Ticket to draw under the pointer while dragging.
    #[must_use]
    pub fn overlay(&self) -> Option<&Ticket> {
        self.active.as_ref().map(|drag| &drag.snapshot)
    }

    /// Begin a gesture on `ticket_id`.
    ///
    /// Replaces any gesture already in flight. Returns `None` (and leaves the
    /// slot empty) when the ticket is not on the board.
    pub fn start(&mut self, board: &Board, ticket_id: &str) -> Option<&ActiveDrag> {
        if let Some(previous) = self.active.take() {
            debug!(ticket_id = %previous.ticket_id, "drag superseded by new gesture");
        }

        let Some((source, index)) = board.locate(ticket_id) else {
            debug!(ticket_id, "drag start on unknown ticket ignored");
            return None;
        };

        debug!(ticket_id, %source, "drag started");
        self.active = Some(ActiveDrag {
            ticket_id: ticket_id.to_string(),
            source,
            snapshot: board.column(source)[index].clone(),
            hover: None,
        });
        self.active.as_ref()
    }

    /// Track the current hover target. No-op without an active gesture.
    pub fn hover(&mut self, over: Option<&str>) {
        if let Some(drag) = self.active.as_mut() {
            drag.hover = over.map(str::to_string);
        }
    }

    /// Abandon the gesture in flight.
    pub fn cancel(&mut self) -> Option<ActiveDrag> {
        let cancelled = self.active.take();
        if let Some(drag) = &cancelled {
            debug!(ticket_id = %drag.ticket_id, "drag cancelled");
        }
        cancelled
    }

    /// Finish the gesture with a drop over `over` (a ticket ID, or `None` for
    /// empty space).
    ///
    /// `on_move` runs at most once, and only when the drop resolves to an
    /// intent. The active slot is cleared in every case.
    pub fn end<R, F>(&mut self, board: &mut Board, over: Option<&str>, on_move: F) -> DragEnd<R>
    where
        F: FnOnce(&mut Board, &TransitionIntent) -> R,
    {
        let Some(drag) = self.active.take() else {
            return DragEnd::NoGesture;
        };

        let intent = match board.resolve_drop(&drag.ticket_id, over) {
            Ok(intent) => intent,
            Err(DropRejection::SameColumn) if self.allow_reorder => {
                match reorder_intent(board, &drag.ticket_id, over) {
                    Some(intent) => intent,
                    None => return DragEnd::Rejected(DropRejection::SameColumn),
                }
            }
            Err(rejection) => {
                debug!(ticket_id = %drag.ticket_id, %rejection, "drop discarded");
                return DragEnd::Rejected(rejection);
            }
        };

        debug!(
            ticket_id = %intent.ticket_id,
            source = %intent.source,
            destination = %intent.destination,
            "drop dispatched"
        );
        let result = on_move(board, &intent);
        DragEnd::Dispatched { intent, result }
    }

    /// Feed one event. Returns `Some` only for events that finish a gesture.
    pub fn handle<R, F>(&mut self, board: &mut Board, event: DragEvent, on_move: F) -> Option<DragEnd<R>>
    where
        F: FnOnce(&mut Board, &TransitionIntent) -> R,
    {
        match event {
            DragEvent::Start { ticket_id } => {
                self.start(board, &ticket_id);
                None
            }
            DragEvent::Hover { over } => {
                self.hover(over.as_deref());
                None
            }
            DragEvent::End { over } => Some(self.end(board, over.as_deref(), on_move)),
            DragEvent::Cancel => Some(match self.cancel() {
                Some(_) => DragEnd::Cancelled,
                None => DragEnd::NoGesture,
            }),
        }
    }
}

/// Same-column drop over a different ticket: move to that ticket's slot.
fn reorder_intent(board: &Board, dragged_id: &str, over: Option<&str>) -> Option<TransitionIntent> {
    let over = over.filter(|id| *id != dragged_id)?;
    let (column, position) = board.locate(over)?;
    Some(TransitionIntent {
        source: column,
        destination: column,
        ticket_id: dragged_id.to_string(),
        position: Some(position),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::MoveOutcome;

    fn board() -> Board {
        Board::from_columns([
            (
                ColumnId::New,
                vec![Ticket::new("T1", "one"), Ticket::new("T2", "two")],
            ),
            (ColumnId::Scheduled, vec![Ticket::new("S1", "sched")]),
        ])
        .unwrap()
    }

    #[test]
    fn start_captures_snapshot_without_mutating() {
        let board = board();
        let before = board.clone();
        let mut drag = DragController::new();
        let active = drag.start(&board, "T2").unwrap();
        assert_eq!(active.source, ColumnId::New);
        assert_eq!(active.snapshot.title, "two");
        assert_eq!(drag.overlay().map(|t| t.id.as_str()), Some("T2"));
        assert_eq!(board, before);
    }

    #[test]
    fn start_on_unknown_ticket_leaves_slot_empty() {
        let board = board();
        let mut drag = DragController::new();
        assert!(drag.start(&board, "nope").is_none());
        assert!(drag.active().is_none());
    }

    #[test]
    fn successful_drop_invokes_callback_once() {
        let mut board = board();
        let mut drag = DragController::new();
        drag.start(&board, "T1");
        drag.hover(Some("S1"));
        assert_eq!(drag.active().unwrap().hover.as_deref(), Some("S1"));

        let mut calls = 0;
        let end = drag.end(&mut board, Some("S1"), |board, intent| {
            calls += 1;
            board.apply_intent(intent)
        });

        assert_eq!(calls, 1);
        let DragEnd::Dispatched { intent, result } = end else {
            panic!("expected dispatch");
        };
        assert_eq!(intent.source, ColumnId::New);
        assert_eq!(intent.destination, ColumnId::Scheduled);
        assert!(matches!(result, Ok(MoveOutcome::Moved { .. })));
        assert_eq!(board.column_of("T1"), Some(ColumnId::Scheduled));
        assert!(drag.active().is_none());
    }

    #[test]
    fn drop_on_empty_space_discards() {
        let mut board = board();
        let before = board.clone();
        let mut drag = DragController::new();
        drag.start(&board, "T1");
        let end = drag.end(&mut board, None, |_, _| panic!("callback must not run"));
        assert_eq!(end, DragEnd::<()>::Rejected(DropRejection::NoTarget));
        assert_eq!(board, before);
        assert!(drag.active().is_none());
    }

    #[test]
    fn same_column_drop_is_rejected_by_default() {
        let mut board = board();
        let before = board.clone();
        let mut drag = DragController::new();
        drag.start(&board, "T1");
        let end = drag.end(&mut board, Some("T2"), |_, _| panic!("callback must not run"));
        assert_eq!(end, DragEnd::<()>::Rejected(DropRejection::SameColumn));
        assert_eq!(board, before);
    }

    #[test]
    fn same_column_drop_reorders_when_enabled() {
        let mut board = board();
        let mut drag = DragController::new().with_reorder(true);
        drag.start(&board, "T1");
        let end = drag.end(&mut board, Some("T2"), |board, intent| board.apply_intent(intent));
        let DragEnd::Dispatched { intent, .. } = end else {
            panic!("expected reorder dispatch");
        };
        assert!(intent.is_reorder());
        assert_eq!(intent.position, Some(1));
        let order: Vec<_> = board.column(ColumnId::New).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(order, ["T2", "T1"]);
    }

    #[test]
    fn dropping_on_itself_is_rejected_even_with_reorder() {
        let mut board = board();
        let mut drag = DragController::new().with_reorder(true);
        drag.start(&board, "T1");
        let end = drag.end(&mut board, Some("T1"), |_, _| panic!("callback must not run"));
        assert_eq!(end, DragEnd::<()>::Rejected(DropRejection::SameColumn));
    }

    #[test]
    fn end_without_start_is_no_gesture() {
        let mut board = board();
        let mut drag = DragController::new();
        let end = drag.end(&mut board, Some("S1"), |_, _| panic!("callback must not run"));
        assert_eq!(end, DragEnd::<()>::NoGesture);
    }

    #[test]
    fn second_start_replaces_first() {
        let board = board();
        let mut drag = DragController::new();
        drag.start(&board, "T1");
        drag.start(&board, "S1");
        assert_eq!(drag.active().unwrap().ticket_id, "S1");
    }

    #[test]
    fn event_stream_drives_one_move() {
        let mut board = board();
        let mut drag = DragController::new();
        let events = [
            DragEvent::Start {
                ticket_id: "S1".into(),
            },
            DragEvent::Hover {
                over: Some("T2".into()),
            },
            DragEvent::Hover { over: None },
            DragEvent::End {
                over: Some("T2".into()),
            },
        ];

        let mut finished = Vec::new();
        for event in events {
            if let Some(end) = drag.handle(&mut board, event, |board, intent| {
                board.apply_intent(intent)
            }) {
                finished.push(end.is_dispatched());
            }
        }
        assert_eq!(finished, [true]);
        assert_eq!(board.column_of("S1"), Some(ColumnId::New));
        assert_eq!(board.column(ColumnId::New).last().map(|t| t.id.as_str()), Some("S1"));
    }

    #[test]
    fn cancel_event_discards() {
        let mut board = board();
        let mut drag = DragController::new();
        drag.start(&board, "T1");
        let end = drag.handle(&mut board, DragEvent::Cancel, |_, _| ());
        assert_eq!(end, Some(DragEnd::Cancelled));
        let again = drag.handle(&mut board, DragEvent::Cancel, |_, _| ());
        assert_eq!(again, Some(DragEnd::NoGesture));
    }
}
