//! Turns one tokenized value line into a decoded [`Value`].

use pbs_core::{FieldDescriptor, FieldStructure, Primitive, PrimitiveKind, SchemaEntry, Value};

use crate::cast::Caster;
use crate::error::{CastError, FieldError};
use crate::tokenizer::{Token, tokenize_spanned};

/// Position in the token stream, plus how many fields have been visited
/// so far (for error positions).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Cursor {
    token: usize,
    field: usize,
}

impl Cursor {
    fn advance(self) -> Self {
        Self {
            token: self.token + 1,
            field: self.field + 1,
        }
    }

    /// Whether any non-empty token is left at or after the cursor.
    fn has_content(self, tokens: &[Token]) -> bool {
        tokens
            .get(self.token..)
            .is_some_and(|rest| rest.iter().any(|t| !t.text.is_empty()))
    }
}

/// Decode `line` against `entry`.
///
/// `Single` entries yield a scalar for one field or a tuple for several.
/// `Array` entries yield a list of those, one per repetition packed on the
/// line. `Repeating` entries are decoded one occurrence at a time, so they
/// shape like `Single`; gathering the occurrences is the caller's job.
pub fn assemble(line: &str, entry: &SchemaEntry, caster: &Caster<'_>) -> Result<Value, FieldError> {
    let tokens = tokenize_spanned(line);
    match entry.structure() {
        FieldStructure::Single | FieldStructure::Repeating => {
            let (group, cursor) = fill_group(line, &tokens, Cursor::default(), entry.fields(), caster)?;
            if cursor.has_content(&tokens) {
                log::trace!(
                    "Ignoring {} extra field(s) for key {}",
                    tokens.len() - cursor.token,
                    entry.key()
                );
            }
            Ok(shape(group))
        }
        FieldStructure::Array => {
            let mut items = Vec::new();
            let mut cursor = Cursor::default();
            while cursor.has_content(&tokens) {
                let (group, next) = fill_group(line, &tokens, cursor, entry.fields(), caster)?;
                items.push(shape(group));
                cursor = next;
            }
            Ok(Value::List(items))
        }
    }
}

/// Fill one repetition of `fields` starting at `cursor`.
///
/// Returns the values (always one per field) and the cursor after them.
pub(crate) fn fill_group(
    line: &str,
    tokens: &[Token],
    cursor: Cursor,
    fields: &[FieldDescriptor],
    caster: &Caster<'_>,
) -> Result<(Vec<Value>, Cursor), FieldError> {
    let mut values = Vec::with_capacity(fields.len());
    let mut cursor = cursor;

    for field in fields {
        let position = cursor.field + 1;
        let token = tokens.get(cursor.token);
        cursor = cursor.advance();

        if field.kind == PrimitiveKind::UnformattedText {
            if let Some(token) = token {
                // The rest of the raw line, commas and all.
                let rest = line[token.span.start..].trim();
                values.push(if rest.is_empty() && field.optional {
                    absent(field, caster).map_err(|e| FieldError::new(position, e))?
                } else {
                    Value::from(Primitive::text(rest))
                });
                cursor.token = tokens.len();
                break;
            }
        }

        let value = match token.map(|t| t.text.as_str()) {
            Some(raw) if !raw.is_empty() || !field.optional => caster
                .cast(raw, field)
                .map(Value::from)
                .map_err(|e| FieldError::new(position, e))?,
            Some(_) => absent(field, caster).map_err(|e| FieldError::new(position, e))?,
            None if field.optional => {
                absent(field, caster).map_err(|e| FieldError::new(position, e))?
            }
            None => {
                return Err(FieldError::new(
                    position,
                    CastError::MissingField(field.kind),
                ));
            }
        };
        values.push(value);
    }

    // An UnformattedText field swallows the rest of the group.
    cursor.field += fields.len() - values.len();
    values.resize(fields.len(), Value::Null);
    Ok((values, cursor))
}

/// Value of an optional field with no text: its default, if any.
fn absent(field: &FieldDescriptor, caster: &Caster<'_>) -> Result<Value, CastError> {
    field
        .default_value
        .as_deref()
        .map(|raw| caster.cast(raw, field))
        .transpose()
        .map(Value::from)
}

fn shape(mut group: Vec<Value>) -> Value {
    if group.len() == 1 {
        group.pop().unwrap_or_default()
    } else {
        Value::Tuple(group)
    }
}

#[cfg(test)]
#[path = "tests/record_tests.rs"]
mod tests;
