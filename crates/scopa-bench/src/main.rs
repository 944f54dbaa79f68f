use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use scopa_bench::config::AnalysisConfig;
use scopa_bench::logging::init_logging;
use scopa_bench::session::{ReportRequest, Session};
use scopa_core::AppInfo;

/// Monte Carlo opponent-risk estimates for Scopa.
#[derive(Debug, Parser)]
#[command(
    name = "scopa",
    author,
    version,
    about = "Estimate opponent holdings, sweep risk and primiera from the unseen cards"
)]
struct Cli {
    /// Path to an optional YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the PRNG seed (reproducible estimates).
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the trial count for the primary analyses.
    #[arg(long, value_name = "COUNT")]
    trials: Option<usize>,

    /// Override the trial count per candidate card when advising.
    #[arg(long, value_name = "COUNT")]
    advisory_trials: Option<usize>,

    /// Cards already out of play (played, captured or on the table), e.g. "1C,7D".
    #[arg(short, long, value_name = "CARDS", default_value = "")]
    seen: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the seen and unseen cards.
    Pool,
    /// Per-card holding probability and the settebello probability.
    Odds,
    /// Sweep risk if the given card is played onto the table.
    Risk {
        /// Card you intend to play, e.g. "6C".
        #[arg(long, value_name = "CARD")]
        play: String,
        /// Table cards, e.g. "1C,2D,3B".
        #[arg(long, value_name = "CARDS")]
        table: String,
    },
    /// Expected opponent primiera score.
    Primiera,
    /// Sweep risk of every card in hand and the safest play.
    Advise {
        /// Your hand, e.g. "1C,6D,10S".
        #[arg(long, value_name = "CARDS")]
        hand: String,
        /// Table cards, e.g. "2C,4S,5B".
        #[arg(long, value_name = "CARDS")]
        table: String,
    },
    /// Run every analysis; failing ones are reported as skipped.
    Report {
        #[arg(long, value_name = "CARD")]
        play: Option<String>,
        #[arg(long, value_name = "CARDS")]
        hand: Option<String>,
        #[arg(long, value_name = "CARDS")]
        table: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = AnalysisConfig::load(cli.config.as_deref())?;

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    if let Some(trials) = cli.trials {
        config.trials.primary = trials;
    }

    if let Some(trials) = cli.advisory_trials {
        config.trials.advisory = trials;
    }

    config.validate()?;

    let _logging_guard = init_logging(&config.logging)?;
    tracing::info!(
        target: "scopa_bench::main",
        app = AppInfo::name(),
        version = AppInfo::version(),
        seed = ?config.seed,
        primary_trials = config.trials.primary,
        advisory_trials = config.trials.advisory,
        "starting analysis"
    );

    let mut session = Session::new(&config);
    session
        .mark_seen(&cli.seen)
        .context("reading --seen cards")?;

    match cli.command {
        Command::Pool => emit(cli.format, &session.pool()),
        Command::Odds => emit(cli.format, &session.odds()?),
        Command::Risk { play, table } => emit(cli.format, &session.risk(&play, &table)?),
        Command::Primiera => emit(cli.format, &session.primiera()?),
        Command::Advise { hand, table } => emit(cli.format, &session.advise(&hand, &table)?),
        Command::Report { play, hand, table } => {
            let request = ReportRequest { play, hand, table };
            emit(cli.format, &session.report(&request))
        }
    }
}

fn emit<T>(format: Format, report: &T) -> anyhow::Result<()>
where
    T: Serialize + std::fmt::Display,
{
    match format {
        Format::Text => println!("{report}"),
        Format::Json => println!(
            "{}",
            serde_json::to_string_pretty(report).context("serializing report")?
        ),
    }
    Ok(())
}
