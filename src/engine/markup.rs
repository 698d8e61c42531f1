//! Side-specific row model for the two comparison panes, plus an HTML
//! rendering of it.
//!
//! Rows are built once per diff and consumed either by the egui panes or by
//! [`generate_highlighted_html`] for export.

use super::types::{ChangeKind, ChangeRecord, DiffResult, WordChange};
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    Original,
    Edited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SegmentTag {
    Plain,
    Added,
    Removed,
    Modified,
}

impl SegmentTag {
    fn css_class(self) -> Option<&'static str> {
        match self {
            SegmentTag::Plain => None,
            SegmentTag::Added => Some("word-added"),
            SegmentTag::Removed => Some("word-removed"),
            SegmentTag::Modified => Some("word-modified"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub tag: SegmentTag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkupRow {
    /// Stable row id: the side-specific line number, falling back to the
    /// record's `line_number`.
    pub line_number: usize,
    pub kind: ChangeKind,
    pub segments: Vec<Segment>,
}

impl MarkupRow {
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HighlightedRows {
    pub original: Vec<MarkupRow>,
    pub edited: Vec<MarkupRow>,
}

impl HighlightedRows {
    pub fn side(&self, side: Side) -> &[MarkupRow] {
        match side {
            Side::Original => &self.original,
            Side::Edited => &self.edited,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightedHtml {
    pub original_markup: String,
    pub edited_markup: String,
}

fn plain(text: &str) -> Vec<Segment> {
    vec![Segment {
        text: text.to_string(),
        tag: SegmentTag::Plain,
    }]
}

fn word_segment(word: &WordChange, side: Side) -> Option<Segment> {
    let (text, tag) = match (word.kind, side) {
        (ChangeKind::Added, Side::Original) | (ChangeKind::Removed, Side::Edited) => return None,
        (ChangeKind::Added, Side::Edited) => (word.edited_side()?, SegmentTag::Added),
        (ChangeKind::Removed, Side::Original) => (word.original_side()?, SegmentTag::Removed),
        (ChangeKind::Modified, Side::Original) => (word.original_side()?, SegmentTag::Modified),
        (ChangeKind::Modified, Side::Edited) => (word.edited_side()?, SegmentTag::Modified),
        (ChangeKind::Unchanged, _) => (word.content.as_deref()?, SegmentTag::Plain),
    };
    Some(Segment {
        text: text.to_string(),
        tag,
    })
}

fn row_for(record: &ChangeRecord, side: Side) -> Option<MarkupRow> {
    let line_number = match side {
        Side::Original => record.original_line_number,
        Side::Edited => record.edited_line_number,
    }
    .unwrap_or(record.line_number);

    let segments = match (record.kind, side) {
        (ChangeKind::Added, Side::Original) | (ChangeKind::Removed, Side::Edited) => return None,
        (ChangeKind::Added, Side::Edited) => plain(record.edited_text()?),
        (ChangeKind::Removed, Side::Original) => plain(record.original_text()?),
        (ChangeKind::Unchanged, _) => plain(record.content.as_deref()?),
        (ChangeKind::Modified, _) => record
            .word_diff
            .iter()
            .filter_map(|word| word_segment(word, side))
            .collect(),
    };

    Some(MarkupRow {
        line_number,
        kind: record.kind,
        segments,
    })
}

/// Build the per-pane rows for a diff.
pub fn highlight_rows(diff: &DiffResult) -> HighlightedRows {
    let mut rows = HighlightedRows::default();
    for record in &diff.changes {
        if let Some(row) = row_for(record, Side::Original) {
            rows.original.push(row);
        }
        if let Some(row) = row_for(record, Side::Edited) {
            rows.edited.push(row);
        }
    }
    rows
}

fn row_class(kind: ChangeKind) -> &'static str {
    match kind {
        ChangeKind::Added => "diff-line diff-added",
        ChangeKind::Removed => "diff-line diff-removed",
        ChangeKind::Modified => "diff-line diff-modified",
        ChangeKind::Unchanged => "diff-line",
    }
}

fn render_rows(rows: &[MarkupRow]) -> String {
    let mut html = String::new();
    for row in rows {
        // Writing into a String cannot fail.
        let _ = write!(
            html,
            r#"<div class="{}" data-line="{}"><span class="line-number">{}</span><span class="line-content">"#,
            row_class(row.kind),
            row.line_number,
            row.line_number
        );
        for segment in &row.segments {
            let escaped = htmlescape::encode_minimal(&segment.text);
            match segment.tag.css_class() {
                Some(class) => {
                    let _ = write!(html, r#"<span class="{class}">{escaped}</span>"#);
                }
                None => html.push_str(&escaped),
            }
        }
        html.push_str("</span></div>\n");
    }
    html
}

/// Render both panes as escaped HTML fragments.
pub fn generate_highlighted_html(diff: &DiffResult) -> HighlightedHtml {
    let rows = highlight_rows(diff);
    HighlightedHtml {
        original_markup: render_rows(&rows.original),
        edited_markup: render_rows(&rows.edited),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::diff::compare_texts;

    #[test]
    fn added_and_removed_rows_are_single_sided() {
        let rows = highlight_rows(&compare_texts("a\nb", "a"));
        assert_eq!(rows.original.len(), 2);
        assert_eq!(rows.edited.len(), 1);
        assert_eq!(rows.original[1].kind, ChangeKind::Removed);
        assert_eq!(rows.original[1].line_number, 2);

        let rows = highlight_rows(&compare_texts("a", "a\nb"));
        assert_eq!(rows.original.len(), 1);
        assert_eq!(rows.edited.len(), 2);
        assert_eq!(rows.edited[1].kind, ChangeKind::Added);
    }

    #[test]
    fn modified_rows_render_side_specific_words() {
        let rows = highlight_rows(&compare_texts("the cat sat", "the dog sat down"));
        let original = &rows.original[0];
        let edited = &rows.edited[0];

        assert_eq!(original.text(), "the cat sat");
        assert_eq!(edited.text(), "the dog sat down");

        assert!(original.segments.iter().all(|s| s.tag != SegmentTag::Added));
        assert!(edited.segments.iter().all(|s| s.tag != SegmentTag::Removed));
        assert!(
            original
                .segments
                .iter()
                .any(|s| s.tag == SegmentTag::Modified && s.text == "cat")
        );
        assert!(
            edited
                .segments
                .iter()
                .any(|s| s.tag == SegmentTag::Added && s.text == "down")
        );
    }

    #[test]
    fn removed_words_render_only_on_original() {
        let rows = highlight_rows(&compare_texts("alpha beta gamma", "alpha"));
        let original = &rows.original[0];
        let edited = &rows.edited[0];

        assert_eq!(original.text(), "alpha beta gamma");
        assert_eq!(edited.text(), "alpha");
        assert!(
            original
                .segments
                .iter()
                .any(|s| s.tag == SegmentTag::Removed && s.text == "gamma")
        );
        assert!(edited.segments.iter().all(|s| s.tag == SegmentTag::Plain));
    }

    #[test]
    fn html_escapes_content() {
        let html = generate_highlighted_html(&compare_texts(
            "<b>bold</b> & co",
            "<script>alert(1)</script>",
        ));
        assert!(!html.original_markup.contains("<b>"));
        assert!(!html.edited_markup.contains("<script>"));
        assert!(html.original_markup.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(html.original_markup.contains("&amp;"));
        assert!(html.edited_markup.contains("&lt;script&gt;"));
    }

    #[test]
    fn html_rows_carry_line_numbers() {
        let html = generate_highlighted_html(&compare_texts("a\nb\nc", "a\nX\nc\nd"));
        assert!(html.original_markup.contains(r#"data-line="2""#));
        assert!(html.edited_markup.contains(r#"<div class="diff-line diff-added" data-line="4">"#));
        assert!(!html.original_markup.contains(r#"data-line="4""#));
        assert_eq!(html.original_markup.lines().count(), 3);
        assert_eq!(html.edited_markup.lines().count(), 4);
    }

    #[test]
    fn empty_diff_renders_nothing() {
        let html = generate_highlighted_html(&compare_texts("", ""));
        assert_eq!(html, HighlightedHtml::default());
    }
}
