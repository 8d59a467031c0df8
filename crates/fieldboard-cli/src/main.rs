#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use fieldboard_core::config;
use output::OutputMode;
use std::env;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "fieldboard: service-ticket board for field operations",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Output format: pretty, text, or json.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output (shorthand for `--format json`).
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags, environment, and user config.
    fn output_mode(&self) -> OutputMode {
        let user = config::load_user_config().unwrap_or_else(|e| {
            warn!("ignoring user config: {e:#}");
            config::UserConfig::default()
        });
        output::resolve_output_mode(self.format, self.json, user.output.as_deref())
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Setup",
        about = "Initialize a fieldboard project",
        long_about = "Create .fieldboard/ with an empty (or seeded) board and a default config.",
        after_help = "EXAMPLES:\n    # Start with an empty board\n    fb init\n\n    # Seed the board from an export\n    fb init --seed board.json\n\n    # Start over\n    fb init --force"
    )]
    Init(cmd::init::InitArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show the board",
        long_about = "List every column in board order with its tickets.",
        after_help = "EXAMPLES:\n    # Whole board\n    fb board\n\n    # One column\n    fb board --column scheduled\n\n    # Emit machine-readable output\n    fb board --json"
    )]
    Board(cmd::board::BoardArgs),

    #[command(
        next_help_heading = "Read",
        about = "Show one ticket",
        long_about = "Show the ticket card: details, work stage, visible dates, and financials.",
        after_help = "EXAMPLES:\n    # Show a ticket\n    fb show TKT-001\n\n    # Emit machine-readable output\n    fb show TKT-001 --json"
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Workflow",
        about = "Move a ticket to another column",
        long_about = "Move a ticket between columns. The ticket must be in --from (default: its current column).",
        after_help = "EXAMPLES:\n    # Start work\n    fb move TKT-001 --to in-progress\n\n    # Assert the source column\n    fb move TKT-001 --from scheduled --to completed\n\n    # Insert at the top of the destination\n    fb move TKT-001 --to on-hold --index 0"
    )]
    Move(cmd::move_cmd::MoveArgs),

    #[command(
        next_help_heading = "Workflow",
        about = "Drop a ticket onto another ticket",
        long_about = "Replay a drag gesture: the ticket moves to the column of the ticket it is dropped on.",
        after_help = "EXAMPLES:\n    # Drop TKT-002 where TKT-003 lives\n    fb drag TKT-002 --over TKT-003\n\n    # Drop on empty space (discarded)\n    fb drag TKT-002"
    )]
    Drag(cmd::drag::DragArgs),

    #[command(
        next_help_heading = "Reports",
        about = "Quote, expense, and net payable report",
        long_about = "Per-ticket financials (quote, expenses, net, payment) and totals.",
        after_help = "EXAMPLES:\n    # Whole board\n    fb finance\n\n    # Completed work only\n    fb finance --column completed"
    )]
    Finance(cmd::finance::FinanceArgs),

    #[command(
        next_help_heading = "Reports",
        about = "Rate-card coverage report",
        long_about = "List clients and whether each has an uploaded rate card.",
        after_help = "EXAMPLES:\n    # Full report\n    fb coverage\n\n    # Only the gaps\n    fb coverage --missing-only --json"
    )]
    Coverage(cmd::coverage::CoverageArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FIELDBOARD_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "fieldboard=debug,info"
        } else {
            "fieldboard=info,warn"
        })
    });

    let format = env::var("FIELDBOARD_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = env::current_dir()?;
    let output = cli.output_mode();

    match cli.command {
        Commands::Init(ref args) => cmd::init::run_init(args, output, &project_root),
        Commands::Board(ref args) => cmd::board::run_board(args, output, &project_root),
        Commands::Show(ref args) => cmd::show::run_show(args, output, &project_root),
        Commands::Move(ref args) => cmd::move_cmd::run_move(args, output, &project_root),
        Commands::Drag(ref args) => cmd::drag::run_drag(args, output, &project_root),
        Commands::Finance(ref args) => cmd::finance::run_finance(args, output, &project_root),
        Commands::Coverage(ref args) => {
            cmd::coverage::run_coverage(args, output, &project_root)
        }
    }
}
