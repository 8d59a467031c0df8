//! fieldboard-core library.
//!
//! The board state machine, the per-ticket financial calculator, the
//! rate-card coverage checker, and the drag interaction controller that
//! feeds transition intents into the board. `store` and `config` cover the
//! `.fieldboard/` project directory on disk.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums per module; `anyhow::Result` only at I/O edges.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).

pub mod board;
pub mod config;
pub mod coverage;
pub mod error;
pub mod finance;
pub mod interaction;
pub mod model;
pub mod store;

pub use board::{Board, BoardError, MoveError, MoveOutcome, TransitionIntent};
pub use model::column::ColumnId;
pub use model::ticket::{Assignee, Expense, Priority, Ticket, WorkStage};
