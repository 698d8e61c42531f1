use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
    Unchanged,
}

impl ChangeKind {
    pub fn is_change(self) -> bool {
        !matches!(self, ChangeKind::Unchanged)
    }
}

/// One token-level difference inside a modified line.
///
/// `Added`, `Removed` and `Unchanged` tokens carry `content`; `Modified`
/// tokens carry both `original_content` and `edited_content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordChange {
    pub kind: ChangeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_content: Option<String>,
}

impl WordChange {
    pub fn single(kind: ChangeKind, content: &str) -> Self {
        Self {
            kind,
            content: Some(content.to_string()),
            original_content: None,
            edited_content: None,
        }
    }

    pub fn modified(original: &str, edited: &str) -> Self {
        Self {
            kind: ChangeKind::Modified,
            content: None,
            original_content: Some(original.to_string()),
            edited_content: Some(edited.to_string()),
        }
    }

    /// Text this token contributes to the original line, if any.
    pub fn original_side(&self) -> Option<&str> {
        match self.kind {
            ChangeKind::Added => None,
            ChangeKind::Modified => self.original_content.as_deref(),
            ChangeKind::Removed | ChangeKind::Unchanged => self.content.as_deref(),
        }
    }

    /// Text this token contributes to the edited line, if any.
    pub fn edited_side(&self) -> Option<&str> {
        match self.kind {
            ChangeKind::Removed => None,
            ChangeKind::Modified => self.edited_content.as_deref(),
            ChangeKind::Added | ChangeKind::Unchanged => self.content.as_deref(),
        }
    }
}

/// One classified line position.
///
/// `line_number` is 1-based and identifies the row in both panes and in
/// outbound intents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    pub kind: ChangeKind,
    pub line_number: usize,
    pub original_line_number: Option<usize>,
    pub edited_line_number: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub word_diff: Vec<WordChange>,
}

impl ChangeRecord {
    pub fn added(line_number: usize, content: &str) -> Self {
        Self {
            kind: ChangeKind::Added,
            line_number,
            original_line_number: None,
            edited_line_number: Some(line_number),
            content: Some(content.to_string()),
            original_content: None,
            edited_content: None,
            word_diff: Vec::new(),
        }
    }

    pub fn removed(line_number: usize, content: &str) -> Self {
        Self {
            kind: ChangeKind::Removed,
            line_number,
            original_line_number: Some(line_number),
            edited_line_number: None,
            content: Some(content.to_string()),
            original_content: None,
            edited_content: None,
            word_diff: Vec::new(),
        }
    }

    pub fn unchanged(line_number: usize, content: &str) -> Self {
        Self {
            kind: ChangeKind::Unchanged,
            line_number,
            original_line_number: Some(line_number),
            edited_line_number: Some(line_number),
            content: Some(content.to_string()),
            original_content: None,
            edited_content: None,
            word_diff: Vec::new(),
        }
    }

    pub fn modified(
        line_number: usize,
        original: &str,
        edited: &str,
        word_diff: Vec<WordChange>,
    ) -> Self {
        Self {
            kind: ChangeKind::Modified,
            line_number,
            original_line_number: Some(line_number),
            edited_line_number: Some(line_number),
            content: None,
            original_content: Some(original.to_string()),
            edited_content: Some(edited.to_string()),
            word_diff,
        }
    }

    pub fn original_text(&self) -> Option<&str> {
        match self.kind {
            ChangeKind::Added => None,
            ChangeKind::Modified => self.original_content.as_deref(),
            ChangeKind::Removed | ChangeKind::Unchanged => self.content.as_deref(),
        }
    }

    pub fn edited_text(&self) -> Option<&str> {
        match self.kind {
            ChangeKind::Removed => None,
            ChangeKind::Modified => self.edited_content.as_deref(),
            ChangeKind::Added | ChangeKind::Unchanged => self.content.as_deref(),
        }
    }

    /// Whether a row identified by `line_number` belongs to this record.
    pub fn matches_line(&self, line_number: usize) -> bool {
        self.line_number == line_number
            || self.original_line_number == Some(line_number)
            || self.edited_line_number == Some(line_number)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    pub changes: Vec<ChangeRecord>,
    pub has_changes: bool,
}

impl DiffResult {
    pub fn new(changes: Vec<ChangeRecord>) -> Self {
        let has_changes = changes.iter().any(|c| c.kind.is_change());
        Self {
            changes,
            has_changes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn find_by_line(&self, line_number: usize) -> Option<&ChangeRecord> {
        self.changes.iter().find(|c| c.matches_line(line_number))
    }

    /// Line numbers of every record that is not `Unchanged`, in order.
    pub fn changed_lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.changes
            .iter()
            .filter(|c| c.kind.is_change())
            .map(|c| c.line_number)
    }
}
