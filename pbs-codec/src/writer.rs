//! Renders decoded values back into canonical field text.

use std::fmt;

use pbs_core::{FieldDescriptor, FieldStructure, Primitive, PrimitiveKind, SchemaEntry, Value};

use crate::text::csv_quote;

/// Write `value` as comma-separated field text for `entry`.
///
/// Trailing optional fields that are all null are left out entirely;
/// a null followed by a later value still gets its separator.
pub fn write_fields<W: fmt::Write>(value: &Value, entry: &SchemaEntry, out: &mut W) -> fmt::Result {
    let flat = value.flatten();
    let fields = entry.fields();
    let repeat = entry.structure() == FieldStructure::Array;

    let mut index = 0;
    for field in fields.iter().cycle() {
        let Some(&slot) = flat.get(index) else {
            break;
        };
        if field.optional && flat[index..].iter().all(Option::is_none) {
            break;
        }
        if index > 0 {
            out.write_char(',')?;
        }
        index += 1;
        if let Some(primitive) = slot {
            write_primitive(primitive, field, out)?;
        }
        if field.is_last && (!repeat || index >= flat.len()) {
            break;
        }
    }
    Ok(())
}

/// [`write_fields`] into a fresh string.
pub fn format_record(value: &Value, entry: &SchemaEntry) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_fields(value, entry, &mut out);
    out
}

fn write_primitive<W: fmt::Write>(
    primitive: &Primitive,
    field: &FieldDescriptor,
    out: &mut W,
) -> fmt::Result {
    match primitive {
        Primitive::Text(s) if field.kind == PrimitiveKind::UnformattedText => out.write_str(s),
        Primitive::Text(s) => out.write_str(&csv_quote(s)),
        Primitive::Boolean(b) => out.write_str(if *b { "true" } else { "false" }),
        Primitive::Hex(v) => write!(out, "{v:X}"),
        Primitive::Enum { value, .. }
            if field.kind == PrimitiveKind::EnumerableOrInteger && field.enum_ref.is_some() =>
        {
            write!(out, "{value}")
        }
        Primitive::Enum { member, .. } => out.write_str(member),
        Primitive::Key(key) => out.write_str(&csv_quote(&key.to_string())),
        other => write!(out, "{other}"),
    }
}

#[cfg(test)]
#[path = "tests/writer_tests.rs"]
mod tests;
