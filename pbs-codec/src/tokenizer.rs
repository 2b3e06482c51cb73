//! Quote-aware comma splitting for PBS values.
//!
//! This is deliberately not an RFC 4180 parser. Content files use a
//! backslash-escaped quote convention (`"say \"hi\""`, `\\` for a literal
//! backslash inside quotes) and some still carry the older `\"…\"` wrapper,
//! so splitting is best effort: fragments are glued back together until their
//! quotes balance, and malformed quoting is never rejected.

use std::ops::Range;

/// One field of a split line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Trimmed, unquoted field text.
    pub text: String,
    /// Byte range of the field in the source line, before trimming.
    pub span: Range<usize>,
}

/// Split a value into trimmed, unquoted fields.
pub fn tokenize(line: &str) -> Vec<String> {
    tokenize_spanned(line).into_iter().map(|t| t.text).collect()
}

/// Like [`tokenize`], keeping each field's position in `line`.
pub fn tokenize_spanned(line: &str) -> Vec<Token> {
    let fragments = split_fragments(line);
    let mut tokens = Vec::with_capacity(fragments.len());

    let mut i = 0;
    while i < fragments.len() {
        let start = fragments[i].start;
        let mut end = fragments[i].end;
        let mut raw = &line[start..end];

        if raw.contains('"') {
            while !is_balanced(raw) && i + 1 < fragments.len() {
                i += 1;
                end = fragments[i].end;
                raw = &line[start..end];
            }
        }

        tokens.push(Token {
            text: unquote(raw.trim()),
            span: start..end,
        });
        i += 1;
    }

    tokens
}

fn split_fragments(line: &str) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut start = 0;
    for (pos, _) in line.match_indices(',') {
        out.push(start..pos);
        start = pos + 1;
    }
    out.push(start..line.len());
    out
}

fn is_balanced(raw: &str) -> bool {
    let trimmed = raw.trim_start();
    let count = if trimmed.starts_with("\\\"") {
        trimmed.matches('"').count()
    } else {
        unescaped_quotes(trimmed)
    };
    count % 2 == 0
}

fn unescaped_quotes(s: &str) -> usize {
    let mut count = 0;
    let mut escaped = false;
    for c in s.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => count += 1,
            _ => {}
        }
    }
    count
}

/// Undo `\"` and `\\` escapes; any other backslash is kept as written.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next @ ('"' | '\\')) = chars.peek() {
                out.push(next);
                chars.next();
                continue;
            }
        }
        out.push(c);
    }
    out
}

fn unquote(field: &str) -> String {
    if field.len() >= 4
        && field.starts_with("\\\"")
        && field.ends_with("\\\"")
        && field.matches('"').count() == 2
    {
        return field[2..field.len() - 2].to_string();
    }

    if field.len() >= 2 && field.starts_with('"') && field.ends_with('"') {
        return unescape(&field[1..field.len() - 1]);
    }

    field.to_string()
}

#[cfg(test)]
#[path = "tests/tokenizer_tests.rs"]
mod tests;
