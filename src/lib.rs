//! tvdb_renamer - Rename loosely named episode files to their canonical titles
//!
//! This library infers the absolute episode number carried by each video
//! filename in a directory, resolves it against a metadata provider, and turns
//! the result into rename plans that are only applied after a human has
//! selected and confirmed them.

mod cache;
mod config;
mod episode_matcher;
mod file_operations;
mod file_resolver;
mod interaction;
mod metadata_retrieval;
mod presentation;

use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

// Re-export error types
pub use cache::CacheError;
pub use config::ConfigError;
pub use file_resolver::FileResolverError;
pub use interaction::InteractionError;
pub use metadata_retrieval::MetadataRetrievalError;

pub use cache::CacheStorage;
pub use config::Config;
pub use episode_matcher::{EpisodeMatch, MatchType, match_episode_number};
pub use file_operations::{
    RenameOutcome, RenamePlan, RenameSummary, execute_renames, format_filename,
    sanitize_component,
};
pub use file_resolver::{VIDEO_EXTENSION, VideoFile, scan_for_videos};
pub use interaction::{Reviewer, TerminalReviewer};
pub use metadata_retrieval::{
    CachedMetadataProvider, EpisodeInfo, MetadataProvider, SeriesCandidate, TvdbProvider,
};
pub use presentation::{Tone, styled, truncate};

/// How long resolved episodes stay in the local cache
pub const EPISODE_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Progress event emitted while planning and applying renames
///
/// These events allow library users to report progress however they like;
/// the library itself never prints.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Searching the metadata provider for the series
    SearchingSeries { query: String },

    /// A series was chosen, automatically or by the reviewer
    SeriesSelected { name: String, year: String },

    /// Listing the target directory
    ScanningDirectory { directory: PathBuf },

    /// Candidate video files found
    VideosFound { count: usize },

    /// No episode number could be inferred from this file
    FileSkipped { filename: String },

    /// An episode number was inferred from a filename
    EpisodeMatched {
        filename: String,
        episode_number: u32,
        match_type: MatchType,
    },

    /// A rename plan was built for a file
    PlanCreated {
        old_file_name: String,
        new_file_name: String,
    },

    /// A file was renamed
    RenameSucceeded {
        old_file_name: String,
        new_file_name: String,
    },

    /// A file could not be renamed; the batch continues
    RenameFailed {
        old_file_name: String,
        error: String,
    },
}

/// How a renaming session ended, when it did not fail
#[derive(Debug)]
pub enum SessionOutcome {
    /// No file in the directory produced a rename plan
    NothingToRename,

    /// The reviewer deselected every plan
    NothingSelected,

    /// The reviewer declined the final confirmation; nothing was renamed
    Cancelled { selected: usize },

    /// Renames were attempted for every selected plan
    Completed(RenameSummary),
}

/// Top-level error type for renamer operations
#[derive(Debug, Error)]
pub enum RenamerError {
    /// Error while loading configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error during file resolution
    #[error("File resolution error: {0}")]
    FileResolver(#[from] FileResolverError),

    /// Error during metadata retrieval
    #[error("Metadata retrieval error: {0}")]
    MetadataRetrieval(#[from] MetadataRetrievalError),

    /// Error while prompting the user
    #[error("Interaction error: {0}")]
    Interaction(#[from] InteractionError),
}

/// Searches for a series and settles on exactly one candidate
///
/// A single search result is taken as-is; several are handed to the
/// reviewer to choose from.
pub fn resolve_series<P, R, F>(
    query: &str,
    provider: &P,
    reviewer: &R,
    mut progress_callback: F,
) -> Result<SeriesCandidate, RenamerError>
where
    P: MetadataProvider + ?Sized,
    R: Reviewer + ?Sized,
    F: FnMut(ProgressEvent),
{
    progress_callback(ProgressEvent::SearchingSeries {
        query: query.to_string(),
    });

    let mut candidates = provider.search_series(query)?;
    if candidates.is_empty() {
        return Err(MetadataRetrievalError::SeriesNotFound(query.to_string()).into());
    }

    let index = if candidates.len() == 1 {
        0
    } else {
        let index = reviewer.choose_series(&candidates)?;
        if index >= candidates.len() {
            return Err(InteractionError::InvalidSelection {
                index,
                len: candidates.len(),
            }
            .into());
        }
        index
    };

    let series = candidates.swap_remove(index);

    progress_callback(ProgressEvent::SeriesSelected {
        name: series.name.clone(),
        year: series.year.clone(),
    });

    Ok(series)
}

/// Builds a rename plan for every matchable video file in `directory`
///
/// Files without an inferable episode number are skipped. A failed metadata
/// lookup aborts planning altogether, so either every matched file gets a
/// plan or the caller gets an error.
///
/// # Examples
///
/// ```no_run
/// use tvdb_renamer::{TvdbProvider, MetadataProvider, plan_renames};
/// use std::path::Path;
///
/// let provider = TvdbProvider::login("my-api-key").unwrap();
/// let series = provider.search_series("Cowboy Bebop").unwrap().remove(0);
///
/// let plans = plan_renames(Path::new("."), &series, &provider, |_| {}).unwrap();
/// for plan in &plans {
///     println!("{}", plan.label());
/// }
/// ```
pub fn plan_renames<P, F>(
    directory: &Path,
    series: &SeriesCandidate,
    provider: &P,
    mut progress_callback: F,
) -> Result<Vec<RenamePlan>, RenamerError>
where
    P: MetadataProvider + ?Sized,
    F: FnMut(ProgressEvent),
{
    progress_callback(ProgressEvent::ScanningDirectory {
        directory: directory.to_path_buf(),
    });
    let videos = scan_for_videos(directory)?;

    progress_callback(ProgressEvent::VideosFound {
        count: videos.len(),
    });

    let mut plans = Vec::new();

    for video in &videos {
        let episode_match = match_episode_number(&video.filename);

        let Some(match_type) = episode_match.match_type else {
            progress_callback(ProgressEvent::FileSkipped {
                filename: video.filename.clone(),
            });
            continue;
        };

        progress_callback(ProgressEvent::EpisodeMatched {
            filename: video.filename.clone(),
            episode_number: episode_match.episode_number,
            match_type,
        });

        let episode = provider.fetch_episode(series, episode_match.episode_number)?;
        let plan = RenamePlan::new(&series.name, &episode_match, &episode);

        progress_callback(ProgressEvent::PlanCreated {
            old_file_name: plan.old_file_name.clone(),
            new_file_name: plan.new_file_name.clone(),
        });

        plans.push(plan);
    }

    Ok(plans)
}

/// Runs a complete renaming session for one directory
///
/// The session resolves the series, plans every rename, lets the reviewer
/// select a subset and confirm it, and only then renames the selected files
/// in selection order. Any error before the confirmation leaves the
/// directory untouched; failures of individual renames are reported in the
/// returned summary instead.
pub fn run_session<P, R, F>(
    directory: &Path,
    query: &str,
    provider: &P,
    reviewer: &R,
    mut progress_callback: F,
) -> Result<SessionOutcome, RenamerError>
where
    P: MetadataProvider + ?Sized,
    R: Reviewer + ?Sized,
    F: FnMut(ProgressEvent),
{
    let series = resolve_series(query, provider, reviewer, &mut progress_callback)?;
    let plans = plan_renames(directory, &series, provider, &mut progress_callback)?;

    if plans.is_empty() {
        return Ok(SessionOutcome::NothingToRename);
    }

    let selection = reviewer.select_plans(&plans)?;
    if selection.is_empty() {
        return Ok(SessionOutcome::NothingSelected);
    }

    let selected = selection
        .iter()
        .map(|&index| {
            plans.get(index).ok_or(InteractionError::InvalidSelection {
                index,
                len: plans.len(),
            })
        })
        .collect::<Result<Vec<&RenamePlan>, _>>()?;

    if !reviewer.confirm(&selected)? {
        return Ok(SessionOutcome::Cancelled {
            selected: selected.len(),
        });
    }

    let summary = execute_renames(directory, selected, &mut progress_callback);

    Ok(SessionOutcome::Completed(summary))
}
