//! Human review of series candidates and rename plans
//!
//! The renamer never mutates the filesystem without the user having picked
//! the plans to apply and confirmed that subset. This module defines the
//! `Reviewer` seam for that and a terminal implementation built on dialoguer.

use crate::file_operations::RenamePlan;
use crate::metadata_retrieval::SeriesCandidate;
use crate::presentation::{Tone, styled, truncate};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, MultiSelect, Select};
use thiserror::Error;

/// Longest old filename shown in the selection list
const OLD_NAME_WIDTH: usize = 80;
/// Longest new filename shown in the selection list
const NEW_NAME_WIDTH: usize = 90;

/// Errors that can occur while talking to the user
#[derive(Debug, Error)]
pub enum InteractionError {
    /// The terminal prompt failed (not a tty, I/O error, ...)
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// The reviewer returned an index outside the offered options
    #[error("Selection {index} out of range for {len} options")]
    InvalidSelection { index: usize, len: usize },
}

/// Decisions only a human can make
pub trait Reviewer {
    /// Picks one series out of several search results
    ///
    /// Only called with two or more candidates. Returns the chosen index.
    fn choose_series(&self, candidates: &[SeriesCandidate]) -> Result<usize, InteractionError>;

    /// Picks the plans to apply; every plan starts out selected
    ///
    /// Returns indices into `plans` in the order they should be executed.
    fn select_plans(&self, plans: &[RenamePlan]) -> Result<Vec<usize>, InteractionError>;

    /// Asks for a final go-ahead on exactly the selected plans
    fn confirm(&self, selected: &[&RenamePlan]) -> Result<bool, InteractionError>;
}

/// Interactive terminal reviewer
pub struct TerminalReviewer {
    theme: ColorfulTheme,
}

impl TerminalReviewer {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalReviewer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reviewer for TerminalReviewer {
    fn choose_series(&self, candidates: &[SeriesCandidate]) -> Result<usize, InteractionError> {
        let labels: Vec<String> = candidates.iter().map(SeriesCandidate::label).collect();

        let index = Select::with_theme(&self.theme)
            .with_prompt("Select the correct series (↑ ↓ to navigate, Enter to confirm)")
            .items(&labels)
            .default(0)
            .interact()?;

        Ok(index)
    }

    fn select_plans(&self, plans: &[RenamePlan]) -> Result<Vec<usize>, InteractionError> {
        let labels: Vec<String> = plans.iter().map(selection_label).collect();
        let defaults = vec![true; plans.len()];

        let selected = MultiSelect::with_theme(&self.theme)
            .with_prompt("Select files to rename (Space to toggle, Enter to rename selected)")
            .items(&labels)
            .defaults(&defaults)
            .interact()?;

        Ok(selected)
    }

    fn confirm(&self, selected: &[&RenamePlan]) -> Result<bool, InteractionError> {
        println!();
        println!("{}", styled("Files to be renamed:", Tone::Title));
        println!();
        for plan in selected {
            println!(
                "{}{}{}",
                styled(&plan.old_file_name, Tone::Old),
                styled(" → ", Tone::Arrow),
                styled(&plan.new_file_name, Tone::New)
            );
        }
        println!();

        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt(format!(
                "Proceed with renaming these {} file(s)?",
                selected.len()
            ))
            .default(false)
            .interact()?;

        Ok(confirmed)
    }
}

fn selection_label(plan: &RenamePlan) -> String {
    format!(
        "{}  →  {}",
        truncate(&plan.old_file_name, OLD_NAME_WIDTH),
        truncate(&plan.new_file_name, NEW_NAME_WIDTH)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_label_truncates_both_names() {
        let plan = RenamePlan {
            series_name: "Show".to_string(),
            season_number: 1,
            seasonal_episode_number: 1,
            episode_title: "x".repeat(100),
            old_file_name: "o".repeat(100),
            new_file_name: format!("Show S01E1 - {}.mkv", "x".repeat(100)),
        };

        let label = selection_label(&plan);
        let (old, new) = label.split_once("  →  ").unwrap();

        assert_eq!(old.chars().count(), OLD_NAME_WIDTH);
        assert!(old.ends_with("..."));
        assert_eq!(new.chars().count(), NEW_NAME_WIDTH);
        assert!(new.starts_with("Show S01E1 - "));
    }
}
