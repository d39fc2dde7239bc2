use clap::{Parser, Subcommand};
use engine::repository::{CompetitionRepository, InMemoryCompetitionRepository};
use rand::SeedableRng;
use rand::rngs::StdRng;
use runner::{MeetReplay, MeetValidator, load_meet, load_scoring, write_standings};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "meet")]
#[command(about = "Weightlifting meet validator and replayer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check meet files without replaying them
    Validate {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Replay meet files and write their standings
    Run {
        #[arg(required = true)]
        files: Vec<PathBuf>,

        #[arg(long, env = "MEET_OUTPUT_DIR", default_value = "./standings")]
        output: PathBuf,

        #[arg(long, env = "MEET_SCORING_CONFIG")]
        scoring: Option<PathBuf>,

        /// Seed for the start number draw
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("meet={},runner={},engine={}", log_level, log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Validate { files } => {
            handle_validate(files).await?;
        }
        Commands::Run {
            files,
            output,
            scoring,
            seed,
        } => {
            handle_run(files, output, scoring, seed).await?;
        }
    }

    Ok(())
}

async fn handle_validate(files: Vec<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let mut error_count = 0;

    for (idx, file) in files.iter().enumerate() {
        tracing::info!("[{}/{}] Validating: {}", idx + 1, files.len(), file.display());

        let result = match load_meet(file).await {
            Ok(meet) => MeetValidator::validate(&meet),
            Err(e) => Err(e),
        };

        match result {
            Ok(report) => {
                report.log_warnings();
                tracing::info!("  ✓ Valid ({} warning(s))", report.warnings.len());
            }
            Err(e) => {
                error_count += 1;
                tracing::error!("  ✗ {}", e);
            }
        }
    }

    if error_count > 0 {
        return Err(format!("{} file(s) failed validation", error_count).into());
    }

    Ok(())
}

async fn handle_run(
    files: Vec<PathBuf>,
    output: PathBuf,
    scoring: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let scoring = Arc::new(load_scoring(scoring.as_deref()).await?);
    let replay = MeetReplay::new(scoring);
    let mut repository = InMemoryCompetitionRepository::new();
    let mut reports = Vec::new();

    for (idx, file) in files.iter().enumerate() {
        tracing::info!("[{}/{}] Processing: {}", idx + 1, files.len(), file.display());

        let meet = load_meet(file).await?;
        let validation_report = MeetValidator::validate(&meet)?;
        validation_report.log_warnings();

        let outcome = match seed {
            Some(seed) => replay.run_with_rng(meet, &mut StdRng::seed_from_u64(seed))?,
            None => replay.run(meet)?,
        };

        reports.push((outcome.competition.id(), outcome.standings_report()));
        repository.save(outcome.competition);
    }

    for (id, report) in &reports {
        let competition = repository.find_by_id(*id)?;
        for group in &report.groups {
            if let Some(winner) = group.winner() {
                tracing::info!(
                    "{}: {} group won by {} ({} kg, Sinclair {})",
                    competition.name(),
                    group.gender.map(|g| g.as_str()).unwrap_or("-"),
                    winner.name,
                    winner.total,
                    winner.sinclair
                );
            }
        }
        write_standings(&output, report).await?;
    }

    tracing::info!("Summary: {} meet(s) replayed", repository.len());

    Ok(())
}
