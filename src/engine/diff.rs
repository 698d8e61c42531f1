use super::types::{ChangeKind, ChangeRecord, DiffResult, WordChange};

/// Pairing of two sequences at one index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Aligned<'a> {
    Added(&'a str),
    Removed(&'a str),
    Unchanged(&'a str),
    Modified(&'a str, &'a str),
}

/// Pair items by index. Inserting one item shifts everything after it,
/// so trailing items show up as modified rather than moved.
fn align_positional<'a>(
    original: &'a [&'a str],
    edited: &'a [&'a str],
) -> impl Iterator<Item = Aligned<'a>> + 'a {
    let len = original.len().max(edited.len());
    (0..len).map(move |i| match (original.get(i), edited.get(i)) {
        (None, Some(&b)) => Aligned::Added(b),
        (Some(&a), None) => Aligned::Removed(a),
        (Some(&a), Some(&b)) if a == b => Aligned::Unchanged(a),
        (Some(&a), Some(&b)) => Aligned::Modified(a, b),
        // i < len, so one side always exists
        (None, None) => Aligned::Unchanged(""),
    })
}

/// Split text into lines on `\n` or `\r\n`.
///
/// A trailing newline yields a trailing empty line, so `"a\n"` is two lines.
/// A `\r` not followed by `\n` stays part of its line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    // every piece but the last was terminated by `\n`
    if let Some((_, terminated)) = lines.split_last_mut() {
        for line in terminated {
            let piece: &str = *line;
            *line = piece.strip_suffix('\r').unwrap_or(piece);
        }
    }
    lines
}

/// Split a line into alternating word and whitespace-run tokens.
///
/// The result always starts and ends with a (possibly empty) word token,
/// and concatenating all tokens gives back `line`.
pub fn tokenize(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut word_start = 0usize;
    let mut chars = line.char_indices().peekable();

    while let Some((i, ch)) = chars.next() {
        if !ch.is_whitespace() {
            continue;
        }
        let mut ws_end = i + ch.len_utf8();
        while let Some(&(j, next)) = chars.peek() {
            if !next.is_whitespace() {
                break;
            }
            ws_end = j + next.len_utf8();
            chars.next();
        }
        tokens.push(&line[word_start..i]);
        tokens.push(&line[i..ws_end]);
        word_start = ws_end;
    }
    tokens.push(&line[word_start..]);

    tokens
}

/// Token-level diff of two lines using positional alignment.
pub fn word_diff(original: &str, edited: &str) -> Vec<WordChange> {
    let original_tokens = tokenize(original);
    let edited_tokens = tokenize(edited);

    align_positional(&original_tokens, &edited_tokens)
        .map(|aligned| match aligned {
            Aligned::Added(b) => WordChange::single(ChangeKind::Added, b),
            Aligned::Removed(a) => WordChange::single(ChangeKind::Removed, a),
            Aligned::Unchanged(a) => WordChange::single(ChangeKind::Unchanged, a),
            Aligned::Modified(a, b) => WordChange::modified(a, b),
        })
        .collect()
}

/// Compare two text blocks line by line.
///
/// An empty side is a degenerate case: the other side becomes a single
/// `Added` or `Removed` record holding the whole text, unsplit.
pub fn compare_texts(original: &str, edited: &str) -> DiffResult {
    match (original.is_empty(), edited.is_empty()) {
        (true, true) => return DiffResult::default(),
        (true, false) => return DiffResult::new(vec![ChangeRecord::added(1, edited)]),
        (false, true) => return DiffResult::new(vec![ChangeRecord::removed(1, original)]),
        (false, false) => {}
    }

    let original_lines = split_lines(original);
    let edited_lines = split_lines(edited);

    let changes = align_positional(&original_lines, &edited_lines)
        .enumerate()
        .map(|(i, aligned)| {
            let line_number = i + 1;
            match aligned {
                Aligned::Added(b) => ChangeRecord::added(line_number, b),
                Aligned::Removed(a) => ChangeRecord::removed(line_number, a),
                Aligned::Unchanged(a) => ChangeRecord::unchanged(line_number, a),
                Aligned::Modified(a, b) => {
                    ChangeRecord::modified(line_number, a, b, word_diff(a, b))
                }
            }
        })
        .collect();

    DiffResult::new(changes)
}
