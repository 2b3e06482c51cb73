//! Streaming reader that groups PBS lines into sections.

use std::collections::HashSet;
use std::io::{BufRead, Lines};
use std::sync::Arc;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicBool, Ordering};

use pbs_core::Schema;
use regex::Regex;

use crate::error::PbsError;
use crate::provenance::Provenance;
use crate::text::prep_line;

static SECTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\[\s*(.+)\s*\]\s*$").unwrap());
static KEY_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\w+)\s*=\s*(.*)$").unwrap());

/// One `key = value` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueLine {
    pub key: String,
    pub value: String,
    pub provenance: Provenance,
}

/// Every line seen for one key of a section.
///
/// Non-repeating keys keep only their last line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEntry {
    pub key: String,
    pub lines: Vec<KeyValueLine>,
    pub repeating: bool,
}

impl SectionEntry {
    /// The line a non-repeating key decodes from.
    pub fn last(&self) -> Option<&KeyValueLine> {
        self.lines.last()
    }
}

/// A `[name]` block and its keys in first-appearance order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub header: Provenance,
    pub entries: Vec<SectionEntry>,
}

impl Section {
    fn new(name: String, header: Provenance) -> Self {
        Self {
            name,
            header,
            entries: Vec::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&SectionEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All lines of the section in file order.
    pub fn lines(&self) -> impl Iterator<Item = &KeyValueLine> {
        let mut lines: Vec<_> = self.entries.iter().flat_map(|e| &e.lines).collect();
        lines.sort_by_key(|l| l.provenance.line_number());
        lines.into_iter()
    }

    fn push(&mut self, line: KeyValueLine, repeating: bool) {
        match self.entries.iter_mut().find(|e| e.key == line.key) {
            Some(entry) if repeating => entry.lines.push(line),
            Some(entry) => {
                log::warn!(
                    "Key {} appears more than once in section {}; using line {}",
                    line.key,
                    self.name,
                    line.provenance.line_number()
                );
                entry.lines = vec![line];
            }
            None => self.entries.push(SectionEntry {
                key: line.key.clone(),
                lines: vec![line],
                repeating,
            }),
        }
    }
}

/// Lazily reads sections from a line source.
///
/// Yields each section once the next header (or end of input) is reached.
/// A format error, an I/O error or cancellation ends the stream; the
/// section being built at that point is not emitted.
pub struct SectionReader<R> {
    lines: Lines<R>,
    origin: Provenance,
    repeating: HashSet<String>,
    cancel: Option<Arc<AtomicBool>>,
    line_number: usize,
    current: Option<Section>,
    done: bool,
}

impl<R: BufRead> SectionReader<R> {
    /// `file` is only used in provenance.
    pub fn new(reader: R, file: impl AsRef<str>) -> Self {
        Self {
            lines: reader.lines(),
            origin: Provenance::new(file),
            repeating: HashSet::new(),
            cancel: None,
            line_number: 0,
            current: None,
            done: false,
        }
    }

    /// Accumulate lines of the schema's `Repeating` keys instead of
    /// replacing them.
    pub fn with_schema(self, schema: &Schema) -> Self {
        self.with_repeating_keys(
            schema
                .entries()
                .iter()
                .filter(|e| e.is_repeating())
                .map(|e| e.key()),
        )
    }

    fn with_repeating_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.repeating.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Stop with [`PbsError::Cancelled`] once `flag` is set.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn fail(&mut self, err: PbsError) -> Option<Result<Section, PbsError>> {
        self.done = true;
        self.current = None;
        Some(Err(err))
    }
}

impl<R: BufRead> Iterator for SectionReader<R> {
    type Item = Result<Section, PbsError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            if self.is_cancelled() {
                return self.fail(PbsError::Cancelled);
            }

            let raw = match self.lines.next() {
                Some(Ok(raw)) => raw,
                Some(Err(e)) => return self.fail(e.into()),
                None => {
                    self.done = true;
                    return self.current.take().map(Ok);
                }
            };
            self.line_number += 1;

            let raw = if self.line_number == 1 {
                raw.trim_start_matches('\u{feff}').to_string()
            } else {
                raw
            };
            let line = prep_line(&raw);
            if line.is_empty() {
                continue;
            }
            log::trace!("{}:{}: {}", self.origin.file(), self.line_number, line);

            if let Some(caps) = SECTION_HEADER.captures(&line) {
                let name = caps[1].trim().to_string();
                let header = self
                    .origin
                    .at_key(&name, None, &line, self.line_number);
                log::debug!("{}: section [{}]", self.origin.file(), name);
                if let Some(done) = self.current.replace(Section::new(name, header)) {
                    return Some(Ok(done));
                }
                continue;
            }

            let Some(section) = self.current.as_mut() else {
                let provenance = self.origin.with_line(&line, self.line_number);
                return self.fail(PbsError::format(
                    "Expected a section at the beginning of the file.\nThis error may also occur if the file was not saved in UTF-8.",
                    provenance,
                ));
            };

            let Some(caps) = KEY_VALUE.captures(&line) else {
                let provenance = self
                    .origin
                    .at_key(&section.name, None, &line, self.line_number);
                return self.fail(PbsError::format(
                    "Bad line syntax (expected syntax like XXX=YYY).",
                    provenance,
                ));
            };

            let key = caps[1].to_string();
            let value = caps[2].trim().to_string();
            let provenance =
                self.origin
                    .at_key(&section.name, Some(&key), &value, self.line_number);
            let repeating = self.repeating.contains(&key);
            section.push(
                KeyValueLine {
                    key,
                    value,
                    provenance,
                },
                repeating,
            );
        }
    }
}

#[cfg(test)]
#[path = "tests/section_tests.rs"]
mod tests;
