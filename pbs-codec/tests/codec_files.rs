use std::fs;

use pbs_codec::{Caster, PbsError, read_file, write_pbs};
use pbs_core::{FieldDescriptor, FieldStructure, PrimitiveKind, SECTION_NAME_KEY, Schema, SchemaEntry, Value};
use tempfile::TempDir;

fn moves_schema(optional: bool) -> Schema {
    Schema::builder("moves")
        .optional(optional)
        .section_name(SchemaEntry::single(SECTION_NAME_KEY, PrimitiveKind::Name).unwrap())
        .entry(SchemaEntry::single("Name", PrimitiveKind::String).unwrap().required())
        .entry(SchemaEntry::single("Power", PrimitiveKind::UnsignedInteger).unwrap())
        .entry(SchemaEntry::single("Flags", PrimitiveKind::Hexadecimal).unwrap())
        .entry(
            SchemaEntry::new(
                "Description",
                FieldStructure::Single,
                vec![FieldDescriptor::new(PrimitiveKind::UnformattedText)],
            )
            .unwrap(),
        )
        .build()
        .unwrap()
}

const MOVES: &str = "\
[TACKLE]
Name = Tackle
Power = 40
Flags = 1f
Description = A physical attack in which the user charges, full body, into the foe.
[GROWL]
Name = Growl
Description = The user growls in a cute way.
";

#[test]
fn test_read_file_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("moves.txt");
    fs::write(&path, MOVES).unwrap();

    let records = read_file(&path, &moves_schema(false), Caster::standalone()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("Power"), Some(&Value::from(pbs_core::Primitive::Unsigned(40))));
    assert_eq!(
        records[0].get("Description"),
        Some(&Value::from(
            "A physical attack in which the user charges, full body, into the foe."
        ))
    );
    assert!(
        records[0]
            .provenance
            .as_ref()
            .unwrap()
            .file()
            .ends_with("moves.txt")
    );
}

#[test]
fn test_file_round_trip_is_stable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("moves.txt");
    fs::write(&path, MOVES).unwrap();
    let schema = moves_schema(false);

    let records = read_file(&path, &schema, Caster::standalone()).unwrap();
    let mut first = Vec::new();
    write_pbs(&records, &schema, &mut first).unwrap();
    fs::write(&path, &first).unwrap();

    let again = read_file(&path, &schema, Caster::standalone()).unwrap();
    let mut second = Vec::new();
    write_pbs(&again, &schema, &mut second).unwrap();

    assert_eq!(String::from_utf8(first).unwrap(), String::from_utf8(second).unwrap());
    assert!(
        fs::read_to_string(&path)
            .unwrap()
            .contains("Flags = 1F\n")
    );
}

#[test]
fn test_missing_optional_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("moves.txt");
    assert!(read_file(&path, &moves_schema(true), Caster::standalone())
        .unwrap()
        .is_empty());
}

#[test]
fn test_missing_required_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("moves.txt");
    assert!(matches!(
        read_file(&path, &moves_schema(false), Caster::standalone()),
        Err(PbsError::Io(_))
    ));
}

#[test]
fn test_first_error_stops_read_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("moves.txt");
    fs::write(&path, "[A]\nName = A\nPower = -1\n[B]\nName = B\n").unwrap();

    let err = read_file(&path, &moves_schema(false), Caster::standalone()).unwrap_err();
    let report = err.to_string();
    assert!(report.contains("is not a positive integer or 0"), "{report}");
    assert!(report.contains("section A\nkey Power, line 3, field 1"), "{report}");
}

#[test]
fn test_read_file_rejects_unknown_enum() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("moves.txt");
    fs::write(&path, MOVES).unwrap();

    let schema = Schema::builder("moves")
        .section_name(SchemaEntry::single(SECTION_NAME_KEY, PrimitiveKind::Name).unwrap())
        .entry(SchemaEntry::single("Type", FieldDescriptor::enumerable("Type")).unwrap())
        .build()
        .unwrap();
    let err = read_file(&path, &schema, Caster::standalone()).unwrap_err();
    assert!(matches!(err, PbsError::Schema(_)), "unexpected error: {err}");
}
