//! Document comparison engine.
//!
//! Pure, synchronous and deterministic: given the original and edited text
//! of a report it classifies every line position, diffs modified lines word
//! by word, and derives pane rows, HTML and statistics from the result.

mod diff;
mod markup;
mod stats;
mod types;

pub use diff::{compare_texts, split_lines, tokenize, word_diff};
pub use markup::{
    HighlightedHtml, HighlightedRows, MarkupRow, Segment, SegmentTag, Side,
    generate_highlighted_html, highlight_rows,
};
pub use stats::{ChangeStats, CharStats, char_stats, get_change_stats};
pub use types::{ChangeKind, ChangeRecord, DiffResult, WordChange};
