// Copyright 2026 The Formula Engine Authors. All rights reserved.
// Use of this source code is governed by the Apache License,
// Version 2.0, that can be found in the LICENSE file.

//! Live completion of variable names at the caret.
//!
//! Stateless: recomputed from scratch per keystroke off the same
//! schema snapshot the validator uses.

use crate::schema::Schema;

/// Completion lists are capped; the UI shows a short dropdown, not
/// the whole schema.
pub const MAX_SUGGESTIONS: usize = 10;

fn is_word_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '+' | '~' | '*' | ':' | '(' | ')' | '[' | ']')
}

/// Schema names completing the partial identifier that ends at
/// `caret` (a byte offset into `raw`; out-of-range or mid-character
/// offsets snap back to the nearest boundary).
///
/// The partial is scanned backward within the current line only, so
/// multi-line systems never leak identifiers across lines. Matching is
/// case-insensitive substring; results are ranked by earliest match
/// position, then alphabetically. An empty partial yields nothing --
/// the full variable list is never volunteered.
pub fn autocomplete(raw: &str, caret: usize, schema: &Schema) -> Vec<String> {
    let mut caret = caret.min(raw.len());
    while caret > 0 && !raw.is_char_boundary(caret) {
        caret -= 1;
    }

    let before = &raw[..caret];
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line = &before[line_start..];
    let partial = match line.rfind(is_word_delimiter) {
        // delimiters are all single-byte except exotic whitespace
        Some(i) => &line[i + line[i..].chars().next().map_or(1, |c| c.len_utf8())..],
        None => line,
    };

    if partial.is_empty() {
        return vec![];
    }
    let needle = partial.to_lowercase();

    let mut matches: Vec<(usize, &str)> = schema
        .names()
        .filter_map(|name| name.to_lowercase().find(&needle).map(|pos| (pos, name)))
        .collect();
    matches.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    matches.truncate(MAX_SUGGESTIONS);

    matches.into_iter().map(|(_, name)| name.to_string()).collect()
}
