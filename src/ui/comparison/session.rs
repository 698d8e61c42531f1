use crate::engine::{
    ChangeStats, CharStats, DiffResult, HighlightedRows, char_stats, compare_texts,
    get_change_stats, highlight_rows,
};
use chrono::{DateTime, Local};

/// Snapshot of one comparison.
///
/// A session is never mutated: recomputing the diff or flipping scroll sync
/// builds a new value which replaces the old one wholesale.
#[derive(Debug, Clone)]
pub struct ComparisonSession {
    original_text: String,
    edited_text: String,
    current_diff: Option<DiffResult>,
    rows: HighlightedRows,
    stats: Option<ChangeStats>,
    char_stats: Option<CharStats>,
    scroll_sync_enabled: bool,
    compared_at: Option<DateTime<Local>>,
}

impl ComparisonSession {
    /// Session before the first comparison.
    pub fn empty(scroll_sync_enabled: bool) -> Self {
        Self {
            original_text: String::new(),
            edited_text: String::new(),
            current_diff: None,
            rows: HighlightedRows::default(),
            stats: None,
            char_stats: None,
            scroll_sync_enabled,
            compared_at: None,
        }
    }

    /// Run the full comparison for a new pair of texts.
    pub fn compare(original_text: &str, edited_text: &str, scroll_sync_enabled: bool) -> Self {
        let diff = compare_texts(original_text, edited_text);
        let rows = highlight_rows(&diff);
        let stats = get_change_stats(&diff);
        let char_stats = char_stats(&diff);

        Self {
            original_text: original_text.to_string(),
            edited_text: edited_text.to_string(),
            current_diff: Some(diff),
            rows,
            stats: Some(stats),
            char_stats: Some(char_stats),
            scroll_sync_enabled,
            compared_at: Some(Local::now()),
        }
    }

    pub fn with_scroll_sync(&self, enabled: bool) -> Self {
        Self {
            scroll_sync_enabled: enabled,
            ..self.clone()
        }
    }

    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    pub fn edited_text(&self) -> &str {
        &self.edited_text
    }

    pub fn current_diff(&self) -> Option<&DiffResult> {
        self.current_diff.as_ref()
    }

    pub fn rows(&self) -> &HighlightedRows {
        &self.rows
    }

    pub fn stats(&self) -> Option<ChangeStats> {
        self.stats
    }

    pub fn char_stats(&self) -> Option<CharStats> {
        self.char_stats
    }

    pub fn scroll_sync_enabled(&self) -> bool {
        self.scroll_sync_enabled
    }

    pub fn compared_at(&self) -> Option<DateTime<Local>> {
        self.compared_at
    }

    /// True when there is nothing to draw in either pane.
    pub fn is_blank(&self) -> bool {
        self.current_diff.as_ref().is_none_or(DiffResult::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_session_has_no_diff() {
        let session = ComparisonSession::empty(true);
        assert!(session.current_diff().is_none());
        assert!(session.stats().is_none());
        assert!(session.is_blank());
        assert!(session.scroll_sync_enabled());
    }

    #[test]
    fn compare_fills_everything() {
        let session = ComparisonSession::compare("a\nb", "a\nc", false);
        let diff = session.current_diff().unwrap();
        assert!(diff.has_changes);
        assert_eq!(session.stats().unwrap().modified_lines, 1);
        assert_eq!(session.rows().original.len(), 2);
        assert!(session.compared_at().is_some());
        assert!(!session.is_blank());
        assert_eq!(session.original_text(), "a\nb");
        assert_eq!(session.edited_text(), "a\nc");
    }

    #[test]
    fn toggling_sync_keeps_the_diff() {
        let session = ComparisonSession::compare("x", "y", true);
        let toggled = session.with_scroll_sync(false);
        assert!(!toggled.scroll_sync_enabled());
        assert_eq!(toggled.current_diff(), session.current_diff());
        assert!(session.scroll_sync_enabled());
    }
}
