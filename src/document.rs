use crate::engine::{ChangeKind, ChangeRecord, split_lines};
use crate::messages::ComparisonEvent;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Line {line} is out of range, the edited text has {len} lines")]
    InvalidLine { line: usize, len: usize },

    #[error("Line {line} no longer matches the change being reverted")]
    StaleChange { line: usize },

    #[error("Change on line {line} has no {side} content")]
    MissingContent { line: usize, side: &'static str },
}

/// Authoritative original and edited report text.
///
/// Applies the intents emitted by the comparison view; the caller refreshes
/// the view afterwards.
#[derive(Debug, Clone, Default)]
pub struct ReportDocument {
    original: String,
    edited: String,
}

impl ReportDocument {
    pub fn new(original: impl Into<String>, edited: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            edited: edited.into(),
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn edited(&self) -> &str {
        &self.edited
    }

    /// Mutable access for an editor widget.
    pub fn edited_mut(&mut self) -> &mut String {
        &mut self.edited
    }

    pub fn is_modified(&self) -> bool {
        self.original != self.edited
    }

    pub fn apply(&mut self, event: &ComparisonEvent) -> Result<(), DocumentError> {
        match event {
            ComparisonEvent::RevertChange {
                change,
                line_number,
                ..
            } => self.revert(change, *line_number),
            ComparisonEvent::ResetAllChanges { original_text } => {
                self.edited = original_text.clone();
                info!("Reset edited report to original");
                Ok(())
            }
        }
    }

    fn revert(&mut self, change: &ChangeRecord, line_number: usize) -> Result<(), DocumentError> {
        // an empty side was compared as one unsplit block
        if self.original.is_empty() && change.kind == ChangeKind::Added {
            self.edited.clear();
            info!(line_number, "Reverted added block");
            return Ok(());
        }
        if self.edited.is_empty() && change.kind == ChangeKind::Removed {
            self.edited = self.original.clone();
            info!(line_number, "Restored removed block");
            return Ok(());
        }

        let mut lines: Vec<String> = split_lines(&self.edited)
            .into_iter()
            .map(str::to_string)
            .collect();
        let index = line_number.saturating_sub(1);
        let missing = |side| DocumentError::MissingContent {
            line: line_number,
            side,
        };

        match change.kind {
            ChangeKind::Modified => {
                let original = change.original_text().ok_or_else(|| missing("original"))?;
                let edited = change.edited_text().ok_or_else(|| missing("edited"))?;
                let current = lines.get_mut(index).ok_or(DocumentError::InvalidLine {
                    line: line_number,
                    len: self.line_count(),
                })?;
                if current.as_str() != edited {
                    return Err(DocumentError::StaleChange { line: line_number });
                }
                *current = original.to_string();
            }
            ChangeKind::Added => {
                let added = change.edited_text().ok_or_else(|| missing("edited"))?;
                match lines.get(index) {
                    Some(current) if current == added => {
                        lines.remove(index);
                    }
                    Some(_) => return Err(DocumentError::StaleChange { line: line_number }),
                    None => {
                        return Err(DocumentError::InvalidLine {
                            line: line_number,
                            len: lines.len(),
                        });
                    }
                }
            }
            ChangeKind::Removed => {
                let removed = change.original_text().ok_or_else(|| missing("original"))?;
                let at = index.min(lines.len());
                lines.insert(at, removed.to_string());
            }
            ChangeKind::Unchanged => return Ok(()),
        }

        self.edited = lines.join("\n");
        info!(line_number, kind = ?change.kind, "Reverted change");
        Ok(())
    }

    fn line_count(&self) -> usize {
        split_lines(&self.edited).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComparisonSettings;
    use crate::engine::compare_texts;
    use crate::ui::comparison::ComparisonView;
    use std::sync::mpsc;
    use std::time::Instant;

    fn revert_line(doc: &mut ReportDocument, line: usize) -> Result<(), DocumentError> {
        let diff = compare_texts(doc.original(), doc.edited());
        let change = diff.find_by_line(line).unwrap().clone();
        doc.apply(&ComparisonEvent::RevertChange {
            line_number: line,
            change_kind: change.kind,
            change,
        })
    }

    #[test]
    fn revert_modified_line() {
        let mut doc = ReportDocument::new("a\nb\nc", "a\nX\nc");
        revert_line(&mut doc, 2).unwrap();
        assert_eq!(doc.edited(), "a\nb\nc");
        assert!(!doc.is_modified());
    }

    #[test]
    fn revert_keeps_trailing_carriage_return() {
        let mut doc = ReportDocument::new("a\nb\r", "X\nb\r");
        revert_line(&mut doc, 1).unwrap();
        assert_eq!(doc.edited(), "a\nb\r");
        assert!(!doc.is_modified());
    }

    #[test]
    fn revert_added_line() {
        let mut doc = ReportDocument::new("a\nb", "a\nb\nextra");
        revert_line(&mut doc, 3).unwrap();
        assert_eq!(doc.edited(), "a\nb");
    }

    #[test]
    fn revert_removed_line() {
        let mut doc = ReportDocument::new("a\nb\nc", "a");
        revert_line(&mut doc, 2).unwrap();
        assert_eq!(doc.edited(), "a\nb");
        revert_line(&mut doc, 3).unwrap();
        assert_eq!(doc.edited(), "a\nb\nc");
    }

    #[test]
    fn revert_only_touches_one_line() {
        let mut doc = ReportDocument::new("one\ntwo\nthree", "ONE\nTWO\nthree");
        revert_line(&mut doc, 1).unwrap();
        assert_eq!(doc.edited(), "one\nTWO\nthree");
        let diff = compare_texts(doc.original(), doc.edited());
        assert_eq!(diff.changed_lines().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn revert_degenerate_blocks() {
        let mut doc = ReportDocument::new("", "all new\ntext");
        revert_line(&mut doc, 1).unwrap();
        assert_eq!(doc.edited(), "");

        let mut doc = ReportDocument::new("all\nremoved", "");
        revert_line(&mut doc, 1).unwrap();
        assert_eq!(doc.edited(), "all\nremoved");
    }

    #[test]
    fn stale_revert_is_rejected() {
        let mut doc = ReportDocument::new("a\nb", "a\nX");
        let diff = compare_texts(doc.original(), doc.edited());
        let change = diff.find_by_line(2).unwrap().clone();
        doc.edited_mut().push_str("YZ");

        let result = doc.apply(&ComparisonEvent::RevertChange {
            line_number: 2,
            change_kind: change.kind,
            change,
        });
        assert_eq!(result, Err(DocumentError::StaleChange { line: 2 }));
        assert_eq!(doc.edited(), "a\nXYZ");
    }

    #[test]
    fn out_of_range_revert_is_rejected() {
        let mut doc = ReportDocument::new("a\nb\nc", "a\nb");
        let result = doc.apply(&ComparisonEvent::RevertChange {
            line_number: 5,
            change_kind: ChangeKind::Modified,
            change: ChangeRecord::modified(5, "x", "y", Vec::new()),
        });
        assert_eq!(result, Err(DocumentError::InvalidLine { line: 5, len: 2 }));
    }

    #[test]
    fn reset_restores_original() {
        let mut doc = ReportDocument::new("a\nb", "c");
        doc.apply(&ComparisonEvent::ResetAllChanges {
            original_text: "a\nb".to_string(),
        })
        .unwrap();
        assert_eq!(doc.edited(), "a\nb");
    }

    #[test]
    fn view_intents_round_trip_through_owner() {
        let (sender, events) = mpsc::channel();
        let mut view = ComparisonView::new("owner_test", ComparisonSettings::default(), sender);
        let mut doc = ReportDocument::new(
            "Title\nRevenue rose 4%\nOutlook stable",
            "Title\nRevenue rose 7%\nOutlook stable\nAppendix",
        );
        view.update_comparison(doc.original(), doc.edited());
        assert_eq!(view.revert_bindings(), &[2, 4]);

        assert!(view.activate_revert(4, Instant::now()));
        for event in events.try_iter() {
            doc.apply(&event).unwrap();
        }
        view.update_comparison(doc.original(), doc.edited());
        assert_eq!(view.revert_bindings(), &[2]);

        assert!(view.reset_all());
        for event in events.try_iter() {
            doc.apply(&event).unwrap();
        }
        view.update_comparison(doc.original(), doc.edited());
        assert!(!view.current_diff().unwrap().has_changes);
        assert!(!doc.is_modified());
    }
}
