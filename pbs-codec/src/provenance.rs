//! Where in a file a line, key, or field came from.

use std::fmt;
use std::sync::Arc;

/// Lines longer than this are cut in error reports.
const MAX_SNIPPET: usize = 200;

/// Immutable snapshot of the reader's position, for diagnostics only.
///
/// Every update returns a new value, so an error can hold on to the
/// provenance it was raised with while reading carries on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    file: Arc<str>,
    line_number: usize,
    section: Option<String>,
    key: Option<String>,
    field: Option<usize>,
    text: String,
}

impl Provenance {
    pub fn new(file: impl AsRef<str>) -> Self {
        Self {
            file: Arc::from(file.as_ref()),
            line_number: 0,
            section: None,
            key: None,
            field: None,
            text: String::new(),
        }
    }

    /// Position on a raw line, outside any key context.
    pub fn with_line(&self, line: &str, line_number: usize) -> Self {
        Self {
            file: Arc::clone(&self.file),
            line_number,
            section: None,
            key: None,
            field: None,
            text: truncate(line),
        }
    }

    /// Position on a key's value inside a section.
    ///
    /// `key` is `None` for the section header itself.
    pub fn at_key(
        &self,
        section: &str,
        key: Option<&str>,
        value: &str,
        line_number: usize,
    ) -> Self {
        Self {
            file: Arc::clone(&self.file),
            line_number,
            section: Some(section.to_string()),
            key: key.map(str::to_string),
            field: None,
            text: truncate(value),
        }
    }

    /// Narrow to one 1-based field of the current value.
    pub fn with_field(&self, position: usize) -> Self {
        Self {
            field: Some(position),
            ..self.clone()
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn field(&self) -> Option<usize> {
        self.field
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Human-readable location block used in error messages.
    pub fn line_report(&self) -> String {
        self.to_string()
    }
}

/// Three lines: file and section, then key, line and field, then the text.
impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "File {}", self.file)?;
        if let Some(section) = &self.section {
            write!(f, ", section {section}")?;
        }
        f.write_str("\n")?;
        if let Some(key) = &self.key {
            write!(f, "key {key}, ")?;
        }
        write!(f, "line {}", self.line_number)?;
        if let Some(field) = self.field {
            write!(f, ", field {field}")?;
        }
        write!(f, "\n{}", self.text)
    }
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_SNIPPET) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
