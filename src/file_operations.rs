use crate::ProgressEvent;
use crate::episode_matcher::EpisodeMatch;
use crate::file_resolver::VIDEO_EXTENSION;
use crate::metadata_retrieval::EpisodeInfo;
use std::fs;
use std::io;
use std::path::Path;

/// One proposed rename, fully resolved before it is offered for review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    /// Series name shared by every plan of a run
    pub series_name: String,
    /// Season the metadata lookup placed the episode in
    pub season_number: u32,
    /// Episode number within that season
    pub seasonal_episode_number: u32,
    /// Canonical English title, possibly empty
    pub episode_title: String,
    /// The current filename inside the target directory
    pub old_file_name: String,
    /// The filename the file will be renamed to
    pub new_file_name: String,
}

impl RenamePlan {
    /// Builds the plan for a matched file from its looked-up metadata
    pub fn new(series_name: &str, episode_match: &EpisodeMatch, episode: &EpisodeInfo) -> Self {
        let new_file_name = format_filename(
            series_name,
            episode.season_number,
            episode.seasonal_episode_number,
            &episode.title,
        );

        Self {
            series_name: series_name.to_string(),
            season_number: episode.season_number,
            seasonal_episode_number: episode.seasonal_episode_number,
            episode_title: episode.title.clone(),
            old_file_name: episode_match.filename.clone(),
            new_file_name,
        }
    }

    /// One-line `old → new` description
    pub fn label(&self) -> String {
        format!("{} → {}", self.old_file_name, self.new_file_name)
    }
}

/// Outcome of a single attempted rename
#[derive(Debug)]
pub struct RenameOutcome {
    pub old_file_name: String,
    pub new_file_name: String,
    pub result: io::Result<()>,
}

/// Per-file results of a rename batch, in execution order
#[derive(Debug, Default)]
pub struct RenameSummary {
    pub outcomes: Vec<RenameOutcome>,
}

impl RenameSummary {
    /// Number of renames that completed without error
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Number of renames that failed
    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }
}

/// Replaces characters that would turn a name into a path
///
/// Only path separators and control characters are replaced (with `-`); the
/// rest of the title is kept verbatim.
pub fn sanitize_component(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect()
}

/// Formats the target filename for an episode
///
/// The season is zero-padded to two digits, the episode number is not padded.
///
/// # Examples
///
/// ```
/// use tvdb_renamer::format_filename;
///
/// assert_eq!(format_filename("Show", 3, 5, "Pilot"), "Show S03E5 - Pilot.mkv");
/// ```
pub fn format_filename(series_name: &str, season: u32, episode: u32, title: &str) -> String {
    format!(
        "{} S{:02}E{} - {}.{}",
        sanitize_component(series_name),
        season,
        episode,
        sanitize_component(title),
        VIDEO_EXTENSION
    )
}

/// Renames the given plans inside `directory`, one after another
///
/// Every plan is attempted, whatever happened to the ones before it. An
/// existing file at the destination is reported as a failure instead of
/// being overwritten. Nothing is rolled back.
pub fn execute_renames<'a, I, F>(
    directory: &Path,
    plans: I,
    mut progress_callback: F,
) -> RenameSummary
where
    I: IntoIterator<Item = &'a RenamePlan>,
    F: FnMut(ProgressEvent),
{
    let mut summary = RenameSummary::default();

    for plan in plans {
        let result = rename_one(directory, plan);

        match &result {
            Ok(()) => progress_callback(ProgressEvent::RenameSucceeded {
                old_file_name: plan.old_file_name.clone(),
                new_file_name: plan.new_file_name.clone(),
            }),
            Err(e) => progress_callback(ProgressEvent::RenameFailed {
                old_file_name: plan.old_file_name.clone(),
                error: e.to_string(),
            }),
        }

        summary.outcomes.push(RenameOutcome {
            old_file_name: plan.old_file_name.clone(),
            new_file_name: plan.new_file_name.clone(),
            result,
        });
    }

    summary
}

fn rename_one(directory: &Path, plan: &RenamePlan) -> io::Result<()> {
    let source = directory.join(&plan.old_file_name);
    let destination = directory.join(&plan.new_file_name);

    if destination != source && destination.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists", plan.new_file_name),
        ));
    }

    fs::rename(&source, &destination)
}
