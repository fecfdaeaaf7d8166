use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use meeting_roster::display::{print_meeting_roster, print_pool_index, write_roster_json, write_roster_to_file};
use meeting_roster::ledger::{LedgerWriter, RecordingLedger, SheetLedger};
use meeting_roster::parser::{load_meetings, load_pool_sheet};
use meeting_roster::schedule::{build_pool_index, plan_meetings};
use meeting_roster::RosterConfig;

#[derive(Parser)]
#[command(name = "meeting-roster")]
#[command(about = "Assigns people to midweek meeting roles by rotation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill every meeting's roles and update the pool sheet
    Plan {
        /// Pool sheet (CSV) with eligibility and last-served dates
        #[arg(long)]
        pool: PathBuf,
        /// Parsed meetings (JSON array)
        #[arg(long)]
        meetings: PathBuf,
        /// Roster config (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write the roster as text
        #[arg(long)]
        output: Option<PathBuf>,
        /// Write the annotated meetings as JSON
        #[arg(long)]
        json: Option<PathBuf>,
        /// Where to save the updated pool sheet (defaults to --pool)
        #[arg(long)]
        ledger_out: Option<PathBuf>,
        /// Plan without saving the pool sheet
        #[arg(long)]
        dry_run: bool,
    },
    /// Show each role's candidates in selection order
    Pool {
        #[arg(long)]
        pool: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            pool,
            meetings,
            config,
            output,
            json,
            ledger_out,
            dry_run,
        } => {
            let config = RosterConfig::load(config.as_deref())?;

            tracing::info!("Loading pool sheet from {}", pool.display());
            let mut sheet = load_pool_sheet(&pool)?;
            let mut pool_index = build_pool_index(&sheet, &config)?;
            tracing::info!("Loaded {} role pools", pool_index.len());

            let meetings = load_meetings(&meetings)?;
            tracing::info!("Loaded {} meetings", meetings.len());

            let planned = if dry_run {
                let mut ledger = RecordingLedger::new();
                let planned = plan_meetings(meetings, &mut pool_index, &mut ledger, &config)?;
                println!("\n=== Ledger updates (dry run, not saved) ===");
                for entry in &ledger.entries {
                    println!("  {} -> {} ({})", entry.candidate, entry.role, entry.meeting_date);
                }
                planned
            } else {
                let mut ledger = SheetLedger::new(&mut sheet, &config);
                let ledger: &mut dyn LedgerWriter = &mut ledger;
                plan_meetings(meetings, &mut pool_index, ledger, &config)?
            };

            print_meeting_roster(&planned, &config)?;

            if let Some(path) = output {
                write_roster_to_file(&planned, &config, &path)?;
                println!("Roster saved to {}", path.display());
            }
            if let Some(path) = json {
                write_roster_json(&planned, &path)?;
                println!("Roster JSON saved to {}", path.display());
            }
            if !dry_run {
                let target = ledger_out.unwrap_or(pool);
                sheet.save(&target)?;
                println!("Pool sheet updated at {}", target.display());
            }
        }
        Commands::Pool { pool, config } => {
            let config = RosterConfig::load(config.as_deref())?;
            let sheet = load_pool_sheet(&pool)?;
            let pool_index = build_pool_index(&sheet, &config)?;
            print_pool_index(&pool_index, &config)?;
        }
    }

    Ok(())
}
