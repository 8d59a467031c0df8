//! Rate-card coverage: which clients have no uploaded rate card.
//!
//! Client names are matched by exact string equality. No trimming, no case
//! folding; callers that need normalization must do it before building the
//! roster.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::board::Board;

/// Set of client names known to have an uploaded rate card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateCardRoster {
    covered: HashSet<String>,
}

impl RateCardRoster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `client` has a rate card.
    pub fn insert(&mut self, client: impl Into<String>) {
        self.covered.insert(client.into());
    }

    #[must_use]
    pub fn covers(&self, client: &str) -> bool {
        self.covered.contains(client)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.covered.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.covered.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for RateCardRoster {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            covered: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Clients in `all_clients` without a rate card, in input order.
#[must_use]
pub fn check_coverage<S: AsRef<str>>(all_clients: &[S], covered: &RateCardRoster) -> Vec<String> {
    all_clients
        .iter()
        .map(AsRef::as_ref)
        .filter(|client| !covered.covers(client))
        .map(str::to_string)
        .collect()
}

/// Distinct client names on the board, in board display order.
#[must_use]
pub fn clients_on_board(board: &Board) -> Vec<String> {
    let mut seen = HashSet::new();
    board
        .tickets()
        .map(|(_, ticket)| ticket.client.as_str())
        .filter(|client| !client.is_empty() && seen.insert(*client))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CoverageStatus {
    Available,
    Missing,
}

impl fmt::Display for CoverageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Available => "Rate Card Available",
            Self::Missing => "Missing Rate Card",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageEntry {
    pub client: String,
    pub status: CoverageStatus,
}

/// Per-client coverage, in roster order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    pub entries: Vec<CoverageEntry>,
}

impl CoverageReport {
    #[must_use]
    pub fn build<S: AsRef<str>>(all_clients: &[S], covered: &RateCardRoster) -> Self {
        let entries = all_clients
            .iter()
            .map(|client| {
                let client = client.as_ref();
                let status = if covered.covers(client) {
                    CoverageStatus::Available
                } else {
                    CoverageStatus::Missing
                };
                CoverageEntry {
                    client: client.to_string(),
                    status,
                }
            })
            .collect();
        Self { entries }
    }

    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.with_status(CoverageStatus::Missing)
    }

    pub fn available(&self) -> impl Iterator<Item = &str> {
        self.with_status(CoverageStatus::Available)
    }

    /// Every client has a rate card (vacuously true for an empty roster).
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing().next().is_none()
    }

    fn with_status(&self, status: CoverageStatus) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(move |e| e.status == status)
            .map(|e| e.client.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::column::ColumnId;
    use crate::model::ticket::Ticket;

    #[test]
    fn missing_clients_keep_roster_order() {
        let roster = ["A Bank", "B Corp", "C Fintech"];
        let covered: RateCardRoster = ["A Bank"].into_iter().collect();
        assert_eq!(check_coverage(&roster, &covered), ["B Corp", "C Fintech"]);
    }

    #[test]
    fn matching_is_exact() {
        let covered: RateCardRoster = ["ABC Corp"].into_iter().collect();
        let roster = ["abc corp", "ABC Corp ", "ABC Corp"];
        assert_eq!(check_coverage(&roster, &covered), ["abc corp", "ABC Corp "]);
    }

    #[test]
    fn check_is_idempotent() {
        let roster = vec!["X".to_string(), "Y".to_string()];
        let covered = RateCardRoster::new();
        let first = check_coverage(&roster, &covered);
        assert_eq!(first, check_coverage(&roster, &covered));
        assert_eq!(first, ["X", "Y"]);
    }

    #[test]
    fn duplicate_roster_entries_are_kept() {
        let covered = RateCardRoster::new();
        assert_eq!(check_coverage(&["Z", "Z"], &covered), ["Z", "Z"]);
    }

    #[test]
    fn report_marks_each_client() {
        let mut covered = RateCardRoster::new();
        covered.insert("AUSFB Bank");
        let report = CoverageReport::build(&["AUSFB Bank", "ABC Corp", "Xyz Fintech"], &covered);
        assert_eq!(report.entries[0].status, CoverageStatus::Available);
        assert_eq!(report.entries[1].status, CoverageStatus::Missing);
        assert_eq!(report.missing().collect::<Vec<_>>(), ["ABC Corp", "Xyz Fintech"]);
        assert_eq!(report.available().collect::<Vec<_>>(), ["AUSFB Bank"]);
        assert!(!report.is_complete());
        assert_eq!(report.entries[1].status.to_string(), "Missing Rate Card");
    }

    #[test]
    fn empty_roster_is_complete() {
        let report = CoverageReport::build::<&str>(&[], &RateCardRoster::new());
        assert!(report.is_complete());
    }

    #[test]
    fn clients_on_board_are_distinct_in_display_order() {
        let ticket = |id: &str, client: &str| Ticket {
            client: client.into(),
            ..Ticket::new(id, "job")
        };
        let board = Board::from_columns([
            (ColumnId::New, vec![ticket("1", "B Corp"), ticket("2", "")]),
            (
                ColumnId::Completed,
                vec![ticket("3", "A Bank"), ticket("4", "B Corp")],
            ),
        ])
        .unwrap();
        assert_eq!(clients_on_board(&board), ["B Corp", "A Bank"]);
    }
}
