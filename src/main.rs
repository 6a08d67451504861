use clap::Parser;
use std::path::PathBuf;
use std::process;
use tvdb_renamer::{
    CacheStorage, CachedMetadataProvider, Config, EPISODE_CACHE_TTL, MetadataProvider,
    ProgressEvent, RenamerError, SessionOutcome, TerminalReviewer, Tone, TvdbProvider,
    run_session, styled,
};

/// Rename tv series video files to their canonical TheTVDB episode titles
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Series title to search TheTVDB for
    #[arg(short, long)]
    series: String,

    /// Directory with video files
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Always ask TheTVDB instead of reusing cached episode lookups
    #[arg(long)]
    no_cache: bool,

    /// Show matcher decisions and API calls
    #[arg(short, long)]
    verbose: bool,
}

/// Handles progress events and prints formatted output to stdout
fn handle_progress_event(event: ProgressEvent) {
    match event {
        ProgressEvent::SearchingSeries { query } => {
            println!("Searching TheTVDB for '{}'...", query);
        }
        ProgressEvent::SeriesSelected { name, year } => {
            println!();
            println!(
                "{}",
                styled(&format!("Selected: {} {}", name, year), Tone::Highlight)
            );
        }
        ProgressEvent::ScanningDirectory { directory } => {
            tracing::debug!(directory = %directory.display(), "scanning for video files");
        }
        ProgressEvent::VideosFound { count } => {
            println!("Found {} video file(s)", count);
        }
        ProgressEvent::FileSkipped { filename } => {
            tracing::debug!(%filename, "no episode number, skipping");
        }
        ProgressEvent::EpisodeMatched {
            filename,
            episode_number,
            match_type,
        } => {
            tracing::debug!(%filename, episode_number, %match_type, "matched episode");
        }
        ProgressEvent::PlanCreated {
            old_file_name,
            new_file_name,
        } => {
            tracing::debug!(%old_file_name, %new_file_name, "planned rename");
        }
        ProgressEvent::RenameSucceeded { new_file_name, .. } => {
            println!("{}", styled(&format!("✔  {}", new_file_name), Tone::Success));
        }
        ProgressEvent::RenameFailed {
            old_file_name,
            error,
        } => {
            println!("{}", styled(&format!("✖  {}", old_file_name), Tone::Error));
            println!("{}", styled(&format!("   Error: {}", error), Tone::Dim));
        }
    }
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default_filter = if verbose {
        "tvdb_renamer=debug,tvdb_rename=debug"
    } else {
        "tvdb_renamer=info,tvdb_rename=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> Result<SessionOutcome, RenamerError> {
    let config = Config::from_env()?;
    let tvdb = TvdbProvider::login(&config.api_key)?;

    let provider: Box<dyn MetadataProvider> = if cli.no_cache {
        Box::new(tvdb)
    } else {
        match CacheStorage::open("episodes", Some(EPISODE_CACHE_TTL)) {
            Ok(cache) => Box::new(CachedMetadataProvider::new(tvdb, cache)),
            Err(e) => {
                tracing::warn!(error = %e, "episode cache unavailable, continuing without it");
                Box::new(tvdb)
            }
        }
    };

    let reviewer = TerminalReviewer::new();

    run_session(
        &cli.dir,
        &cli.series,
        provider.as_ref(),
        &reviewer,
        handle_progress_event,
    )
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(SessionOutcome::NothingToRename) => {
            println!();
            println!(
                "{}",
                styled("No valid files available to rename", Tone::Error)
            );
        }
        Ok(SessionOutcome::NothingSelected) => {
            println!(
                "{}",
                styled("No files selected, no files have been renamed.", Tone::Error)
            );
        }
        Ok(SessionOutcome::Cancelled { .. }) => {
            println!(
                "{}",
                styled("Rename cancelled, no files have been renamed.", Tone::Error)
            );
        }
        Ok(SessionOutcome::Completed(summary)) => {
            println!();
            println!(
                "{}",
                styled(
                    &format!(
                        "✔  Successfully renamed {} file(s)",
                        summary.success_count()
                    ),
                    Tone::Success
                )
            );
            if summary.failure_count() > 0 {
                println!(
                    "{}",
                    styled(
                        &format!("✖  {} file(s) could not be renamed", summary.failure_count()),
                        Tone::Error
                    )
                );
            }
        }
        Err(e) => {
            eprintln!();
            eprintln!("{}", styled(&format!("Error: {}", e), Tone::Error));
            process::exit(1);
        }
    }
}
