//! `booking` CLI — replay a meeting scenario through the booking engine and
//! query the result.
//!
//! ## Usage
//!
//! ```sh
//! # Book every meeting in the scenario and report which ones were rejected
//! booking book -i scenario.json
//!
//! # Nearest slot where Esh and Doe are both free, starting at 16:30
//! booking suggest -i scenario.json --participants Esh,Doe --start 2021-07-09T16:30:00Z
//!
//! # Esh's upcoming appointments (scenario read from stdin)
//! cat scenario.json | booking agenda --participant Esh --now 2021-07-08T12:00:00Z --upcoming
//!
//! # Start the first meeting of the scenario
//! booking start -i scenario.json --meeting 0 --now 2021-07-08T16:00:00Z
//! ```
//!
//! Results are printed to stdout as JSON. Logs go to stderr and follow
//! `RUST_LOG`; `--verbose` raises the default level to debug.

mod scenario;

use anyhow::{bail, Context, Result};
use booking_engine::MeetingState;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Read};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::scenario::Scenario;

#[derive(Parser)]
#[command(
    name = "booking",
    version,
    about = "Multi-party meeting booking CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Scenario file (reads from stdin if omitted)
    #[arg(short, long, global = true)]
    input: Option<String>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Book the scenario's meetings in order and report each outcome
    Book,
    /// Find the nearest slot where all the given participants are free
    Suggest {
        /// Comma-separated participant names
        #[arg(long, value_delimiter = ',', required = true)]
        participants: Vec<String>,
        /// Desired start (RFC 3339)
        #[arg(long)]
        start: DateTime<Utc>,
        /// Meeting length; defaults to the scenario's configured duration
        #[arg(long)]
        duration_minutes: Option<i64>,
        /// Candidates to test before giving up; defaults to the scenario's config
        #[arg(long)]
        max_iterations: Option<u32>,
    },
    /// List a participant's appointments
    Agenda {
        /// Participant name
        #[arg(long)]
        participant: String,
        /// Reference instant (RFC 3339)
        #[arg(long)]
        now: DateTime<Utc>,
        /// Only appointments starting at or after --now
        #[arg(long)]
        upcoming: bool,
    },
    /// Start a booked scenario meeting
    Start {
        /// Zero-based index of the meeting in the scenario file
        #[arg(long)]
        meeting: usize,
        /// Reference instant (RFC 3339)
        #[arg(long)]
        now: DateTime<Utc>,
    },
}

#[derive(Serialize)]
struct Started {
    meeting: usize,
    started: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let json = read_input(cli.input.as_deref())?;
    let mut session = Scenario::parse(&json)?.replay()?;

    match cli.command {
        Commands::Book => {
            print_json(&session.reports)?;
        }
        Commands::Suggest {
            participants,
            start,
            duration_minutes,
            max_iterations,
        } => {
            let meeting = session.meeting(&participants, start, duration_minutes, "")?;
            let max_iterations =
                max_iterations.unwrap_or(session.scheduler.config().max_search_iterations);
            let slot = session
                .scheduler
                .suggest_time(meeting.participants(), meeting.interval(), max_iterations)
                .context("Failed to suggest a time")?;
            print_json(&slot)?;
        }
        Commands::Agenda {
            participant,
            now,
            upcoming,
        } => {
            let appointments = session.participant(&participant)?.list_appointments(upcoming, now);
            print_json(&appointments)?;
        }
        Commands::Start { meeting, now } => {
            let count = session.meetings.len();
            let Some(target) = session.meetings.get_mut(meeting) else {
                bail!("No meeting #{} (scenario has {} meetings)", meeting, count);
            };
            if target.state() != MeetingState::Booked {
                bail!("Meeting #{} was not booked", meeting);
            }
            let started = target.start(now).context("Failed to start meeting")?;
            print_json(&Started { meeting, started })?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "booking=debug,booking_engine=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let pretty = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", pretty);
    Ok(())
}
