use super::types::SourceLine;

/// Marker that ends program text typed at the keyboard.
pub const END_OF_PROGRAM: &str = "$";

/// Strip a trailing `#` comment, honoring double- and single-quoted strings.
pub fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    for (idx, ch) in line.char_indices() {
        match (quote, ch) {
            (None, '"') | (None, '\'') => quote = Some(ch),
            (Some(q), c) if c == q => quote = None,
            (None, '#') => return &line[..idx],
            _ => {}
        }
    }
    line
}

/// Check if line carries no statement
pub fn is_comment(line: &str) -> bool {
    strip_comment(line).trim().is_empty()
}

/// Keep only statement-bearing lines, numbered by their physical position.
/// Input stops at a line holding only [`END_OF_PROGRAM`].
pub fn preprocess_lines(physical: &[&str]) -> Vec<SourceLine> {
    let mut out = Vec::with_capacity(physical.len());

    for (i, raw) in physical.iter().enumerate() {
        if raw.trim() == END_OF_PROGRAM {
            break;
        }
        if is_comment(raw) {
            continue;
        }
        out.push(SourceLine {
            text: strip_comment(raw).trim().to_string(),
            line: (i + 1) as u32,
        });
    }

    out
}
