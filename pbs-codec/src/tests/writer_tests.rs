use std::sync::Arc;

use super::*;
use crate::cast::Caster;
use crate::record::assemble;
use pbs_core::{EntityKey, EntitySet, EnumDefinition, EnumRegistry, KeyStrategy};

fn entry(structure: FieldStructure, fields: Vec<FieldDescriptor>) -> SchemaEntry {
    SchemaEntry::new("Key", structure, fields).unwrap()
}

fn int(v: i64) -> Value {
    Value::from(v)
}

#[test]
fn test_trailing_optional_elision() {
    let e = entry(
        FieldStructure::Single,
        vec![
            PrimitiveKind::Name.into(),
            FieldDescriptor::new(PrimitiveKind::Name).optional(),
            FieldDescriptor::new(PrimitiveKind::Name).optional(),
        ],
    );
    let value = Value::Tuple(vec![
        Value::from(Primitive::name("A")),
        Value::Null,
        Value::Null,
    ]);
    assert_eq!(format_record(&value, &e), "A");
}

#[test]
fn test_middle_null_keeps_separator() {
    let e = entry(
        FieldStructure::Single,
        vec![
            PrimitiveKind::Name.into(),
            FieldDescriptor::new(PrimitiveKind::Integer).optional(),
            FieldDescriptor::new(PrimitiveKind::Integer).optional(),
        ],
    );
    let value = Value::Tuple(vec![Value::from(Primitive::name("A")), Value::Null, int(3)]);
    let text = format_record(&value, &e);
    assert_eq!(text, "A,,3");
    assert_eq!(assemble(&text, &e, &Caster::standalone()), Ok(value));
}

#[test]
fn test_array_round_trip() {
    let e = entry(
        FieldStructure::Array,
        vec![PrimitiveKind::Integer.into(), PrimitiveKind::Integer.into()],
    );
    let caster = Caster::standalone();
    let value = assemble("1,2,3,4", &e, &caster).unwrap();
    assert_eq!(format_record(&value, &e), "1,2,3,4");
}

#[test]
fn test_single_group_stops_at_last_field() {
    let e = entry(
        FieldStructure::Single,
        vec![PrimitiveKind::Integer.into(), PrimitiveKind::Integer.into()],
    );
    let value = Value::Tuple(vec![int(1), int(2), int(3)]);
    assert_eq!(format_record(&value, &e), "1,2");
}

#[test]
fn test_empty_array_writes_nothing() {
    let e = entry(FieldStructure::Array, vec![PrimitiveKind::Integer.into()]);
    assert_eq!(format_record(&Value::List(vec![]), &e), "");
}

#[test]
fn test_primitive_rendering() {
    let e = entry(
        FieldStructure::Single,
        vec![
            PrimitiveKind::Boolean.into(),
            PrimitiveKind::Hexadecimal.into(),
            PrimitiveKind::String.into(),
            PrimitiveKind::Float.into(),
        ],
    );
    let value = Value::Tuple(vec![
        Value::from(false),
        Value::from(Primitive::Hex(255)),
        Value::from("a, \"b\""),
        Value::from(Primitive::Float(0.5)),
    ]);
    assert_eq!(format_record(&value, &e), r#"false,FF,"a, \"b\"",0.5"#);
}

#[test]
fn test_unformatted_text_is_raw() {
    let e = entry(
        FieldStructure::Single,
        vec![PrimitiveKind::Name.into(), PrimitiveKind::UnformattedText.into()],
    );
    let value = Value::Tuple(vec![
        Value::from(Primitive::name("GREET")),
        Value::from(Primitive::text("Hello, world")),
    ]);
    let text = format_record(&value, &e);
    assert_eq!(text, "GREET,Hello, world");
    assert_eq!(assemble(&text, &e, &Caster::standalone()), Ok(value));
}

#[test]
fn test_enum_rendering() {
    let mut registry = EnumRegistry::new();
    registry.register_enum(EnumDefinition::new("Color").member("RED", 4));
    let caster = Caster::new(&registry);

    let symbolic = SchemaEntry::single("C", FieldDescriptor::enumerable("Color")).unwrap();
    let numeric = SchemaEntry::single(
        "C",
        FieldDescriptor::new(PrimitiveKind::EnumerableOrInteger).with_enum("Color"),
    )
    .unwrap();

    let red = assemble("RED", &symbolic, &caster).unwrap();
    assert_eq!(format_record(&red, &symbolic), "RED");
    assert_eq!(format_record(&red, &numeric), "4");
    assert_eq!(assemble("4", &numeric, &caster), Ok(red));
}

#[test]
fn test_text_key_with_comma_is_quoted() {
    let mut items = EntitySet::new("Item", KeyStrategy::Text);
    items.extend([EntityKey::Text("Poke, Ball".into()), EntityKey::Text("Potion".into())]);
    let mut registry = EnumRegistry::new();
    registry.register_entities("Item", Arc::new(items));
    let caster = Caster::new(&registry);

    let e = entry(
        FieldStructure::Single,
        vec![FieldDescriptor::enumerable("Item"), PrimitiveKind::Integer.into()],
    );
    let value = assemble(r#""Poke, Ball",3"#, &e, &caster).unwrap();
    let text = format_record(&value, &e);
    assert_eq!(text, r#""Poke, Ball",3"#);
    assert_eq!(assemble(&text, &e, &caster), Ok(value));
}

#[test]
fn test_trailing_backslash_in_text_round_trips() {
    let e = entry(
        FieldStructure::Single,
        vec![PrimitiveKind::String.into(), PrimitiveKind::String.into()],
    );
    let value = Value::Tuple(vec![Value::from("a,b\\"), Value::from("c")]);
    let text = format_record(&value, &e);
    assert_eq!(text, r#""a,b\\",c"#);
    assert_eq!(assemble(&text, &e, &Caster::standalone()), Ok(value));
}
