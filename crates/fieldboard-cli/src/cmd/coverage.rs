//! `fb coverage`: which clients still lack a rate card.
//!
//! The client roster is `[rate_cards] clients` from the project config, or
//! the distinct clients on the board when that list is empty. The covered
//! set is `[rate_cards] covered`.

use crate::cmd::{open_board, open_config};
use crate::output::{OutputMode, pretty_section, render_mode};
use clap::Args;
use fieldboard_core::Board;
use fieldboard_core::config::RateCardConfig;
use fieldboard_core::coverage::{CoverageReport, CoverageStatus, clients_on_board};
use serde::Serialize;
use std::path::Path;

#[derive(Args, Debug)]
pub struct CoverageArgs {
    /// List only clients without a rate card.
    #[arg(long)]
    pub missing_only: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CoverageOutput {
    complete: bool,
    missing: Vec<String>,
    #[serde(flatten)]
    report: CoverageReport,
}

/// Build the report from configured rate cards, falling back to the board's
/// clients when no roster is configured.
pub fn coverage_for(board: &Board, rate_cards: &RateCardConfig) -> CoverageReport {
    let roster = rate_cards.roster();
    if rate_cards.clients.is_empty() {
        CoverageReport::build(&clients_on_board(board), &roster)
    } else {
        CoverageReport::build(&rate_cards.clients, &roster)
    }
}

pub fn run_coverage(
    args: &CoverageArgs,
    output: OutputMode,
    project_root: &Path,
) -> anyhow::Result<()> {
    let cfg = open_config(output, project_root)?;
    let board = open_board(output, project_root)?;

    let mut report = coverage_for(&board, &cfg.rate_cards);
    let missing: Vec<String> = report.missing().map(str::to_string).collect();
    if args.missing_only {
        report
            .entries
            .retain(|e| e.status == CoverageStatus::Missing);
    }
    let out = CoverageOutput {
        complete: missing.is_empty(),
        missing,
        report,
    };

    render_mode(
        output,
        &out,
        |o, w| {
            for entry in &o.report.entries {
                writeln!(w, "{}\t{}", entry.client, entry.status)?;
            }
            Ok(())
        },
        |o, w| {
            pretty_section(w, "Rate card coverage")?;
            if o.report.entries.is_empty() {
                writeln!(w, "  (no clients)")?;
            }
            for entry in &o.report.entries {
                let mark = match entry.status {
                    CoverageStatus::Available => "✓",
                    CoverageStatus::Missing => "✗",
                };
                writeln!(w, "  {mark} {:<30} {}", entry.client, entry.status)?;
            }
            writeln!(w)?;
            if o.complete {
                writeln!(w, "All clients have a rate card.")
            } else {
                writeln!(w, "{} client(s) missing a rate card.", o.missing.len())
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldboard_core::{ColumnId, Ticket};

    fn ticket(id: &str, client: &str) -> Ticket {
        let mut t = Ticket::new(id, "visit");
        t.client = client.into();
        t
    }

    fn board() -> Board {
        Board::from_columns([
            (
                ColumnId::New,
                vec![ticket("T1", "B Corp"), ticket("T2", "A Bank")],
            ),
            (ColumnId::Scheduled, vec![ticket("T3", "B Corp")]),
        ])
        .unwrap()
    }

    #[test]
    fn configured_roster_wins() {
        let cards = RateCardConfig {
            clients: vec!["A Bank".into(), "B Corp".into(), "C Fintech".into()],
            covered: vec!["A Bank".into()],
        };
        let report = coverage_for(&board(), &cards);
        assert_eq!(report.missing().collect::<Vec<_>>(), ["B Corp", "C Fintech"]);
    }

    #[test]
    fn empty_roster_falls_back_to_board_clients() {
        let cards = RateCardConfig {
            clients: Vec::new(),
            covered: vec!["B Corp".into()],
        };
        let report = coverage_for(&board(), &cards);
        let clients: Vec<_> = report.entries.iter().map(|e| e.client.as_str()).collect();
        assert_eq!(clients, ["B Corp", "A Bank"]);
        assert_eq!(report.missing().collect::<Vec<_>>(), ["A Bank"]);
    }

    #[test]
    fn output_json_shape() {
        let report = coverage_for(&board(), &RateCardConfig::default());
        let out = CoverageOutput {
            complete: report.is_complete(),
            missing: report.missing().map(str::to_string).collect(),
            report,
        };
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["complete"], false);
        assert_eq!(json["missing"], serde_json::json!(["B Corp", "A Bank"]));
        assert_eq!(json["entries"][0]["status"], "Missing");
    }
}
