//! Line-level text helpers shared by the reader and writer.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*#.*$").unwrap());

/// Strip a trailing `#` comment and surrounding whitespace.
///
/// A `#` anywhere on the line starts a comment, quoted or not.
pub fn prep_line(line: &str) -> Cow<'_, str> {
    match COMMENT.replace(line, "") {
        Cow::Borrowed(s) => Cow::Borrowed(s.trim()),
        Cow::Owned(s) => Cow::Owned(s.trim().to_string()),
    }
}

/// Quote a string field for writing if it contains a comma or a quote.
///
/// Quoting wraps the text in `"` and escapes inner quotes as `\"` and
/// backslashes as `\\`.
pub fn csv_quote(s: &str) -> Cow<'_, str> {
    if s.contains([',', '"']) {
        Cow::Owned(quote(s))
    } else {
        Cow::Borrowed(s)
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
