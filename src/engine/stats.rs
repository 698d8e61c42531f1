use super::types::{ChangeKind, DiffResult};
use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStats {
    pub total_lines: usize,
    pub added_lines: usize,
    pub removed_lines: usize,
    pub modified_lines: usize,
    pub unchanged_lines: usize,
}

impl ChangeStats {
    pub fn changed_lines(&self) -> usize {
        self.added_lines + self.removed_lines + self.modified_lines
    }
}

/// Count records by kind.
pub fn get_change_stats(diff: &DiffResult) -> ChangeStats {
    let mut stats = ChangeStats {
        total_lines: diff.changes.len(),
        ..Default::default()
    };

    for change in &diff.changes {
        match change.kind {
            ChangeKind::Added => stats.added_lines += 1,
            ChangeKind::Removed => stats.removed_lines += 1,
            ChangeKind::Modified => stats.modified_lines += 1,
            ChangeKind::Unchanged => stats.unchanged_lines += 1,
        }
    }

    stats
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharStats {
    pub added_chars: usize,
    pub removed_chars: usize,
}

/// Character-level insert/delete counts across the whole diff.
///
/// Modified lines are compared char by char (better for CJK than word
/// splitting); added and removed lines count in full.
pub fn char_stats(diff: &DiffResult) -> CharStats {
    let mut stats = CharStats::default();

    for change in &diff.changes {
        match change.kind {
            ChangeKind::Added => {
                stats.added_chars += change.edited_text().map_or(0, |t| t.chars().count());
            }
            ChangeKind::Removed => {
                stats.removed_chars += change.original_text().map_or(0, |t| t.chars().count());
            }
            ChangeKind::Modified => {
                let original = change.original_text().unwrap_or_default();
                let edited = change.edited_text().unwrap_or_default();
                let diff = TextDiff::from_chars(original, edited);
                for c in diff.iter_all_changes() {
                    match c.tag() {
                        ChangeTag::Insert => stats.added_chars += c.value().chars().count(),
                        ChangeTag::Delete => stats.removed_chars += c.value().chars().count(),
                        ChangeTag::Equal => {}
                    }
                }
            }
            ChangeKind::Unchanged => {}
        }
    }

    stats
}
