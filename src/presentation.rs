//! Terminal presentation helpers
//!
//! Pure formatting functions: callers pass plain text plus the kind of
//! message it is and get back a styled string. Whether colors are emitted is
//! decided by `console` based on the terminal.

use console::style;

/// The role a piece of text plays in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Title,
    Highlight,
    Success,
    Error,
    /// A filename that is about to be replaced
    Old,
    /// A filename that is about to be created
    New,
    Arrow,
    Dim,
}

/// Styles `text` according to `tone`
pub fn styled(text: &str, tone: Tone) -> String {
    let base = style(text);
    match tone {
        Tone::Title => base.magenta().bold(),
        Tone::Highlight | Tone::New => base.green().bold(),
        Tone::Success => base.green().bright().bold(),
        Tone::Error => base.red().bold(),
        Tone::Old => base.dim().strikethrough(),
        Tone::Arrow => base.blue(),
        Tone::Dim => base.dim(),
    }
    .to_string()
}

/// Shortens `text` to at most `max` characters, ending in `...` when cut
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut shortened: String = text.chars().take(max - 3).collect();
    shortened.push_str("...");
    shortened
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        assert_eq!(truncate("a longer filename.mkv", 10), "a longe...");
        assert_eq!(truncate("abcdef", 3), "abc");
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("ブレイキング・バッド", 6), "ブレイ...");
    }

    #[test]
    fn test_styled_keeps_text() {
        console::set_colors_enabled(false);
        assert_eq!(styled("done", Tone::Success), "done");
        assert_eq!(styled("old.mkv", Tone::Old), "old.mkv");
    }
}
