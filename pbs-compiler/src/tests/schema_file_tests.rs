use super::*;
use pbs_core::SchemaError;

const MOVES_TOML: &str = r#"
name = "moves"
order = 10
entity = { name = "Move" }

[section]
types = ["Name"]

[[field]]
key = "Name"
required = true
types = ["String"]

[[field]]
key = "Type"
types = [{ kind = "Enumerable", enum = "Type" }]

[[field]]
key = "Flags"
structure = "Array"
types = ["Name"]

[[field]]
key = "Stats"
fixed_size = 3
fixed_size_is_max = true
types = [{ kind = "UnsignedInteger", default_value = "0" }]
"#;

#[test]
fn test_parse_schema_file() {
    let file = SchemaFile::parse(MOVES_TOML, "moves.toml").unwrap();
    assert_eq!(file.name, "moves");
    assert_eq!(file.order, 10);
    assert!(!file.optional);
    let entity = file.entity.as_ref().unwrap();
    assert_eq!(entity.name, "Move");
    assert_eq!(entity.key, KeyStrategy::Name);

    let schema = file.to_schema("moves.toml").unwrap();
    assert_eq!(schema.section_name().key(), SECTION_NAME_KEY);
    assert_eq!(schema.entries().len(), 4);
    assert!(schema.get("Name").unwrap().is_required());
    assert_eq!(
        schema.get("Type").unwrap().fields()[0].enum_ref.as_ref().map(|r| r.as_str()),
        Some("Type")
    );
    assert_eq!(schema.get("Flags").unwrap().structure(), FieldStructure::Array);

    let stats = schema.get("Stats").unwrap();
    assert_eq!(stats.arity(), 3);
    assert!(stats.fields()[2].optional);
    assert_eq!(stats.fields()[1].default_value.as_deref(), Some("0"));
}

#[test]
fn test_unknown_kind_is_rejected() {
    let text = "name = \"x\"\n[section]\ntypes = [\"Bogus\"]\n";
    assert!(matches!(
        SchemaFile::parse(text, "x.toml"),
        Err(CompileError::Toml { .. })
    ));
}

#[test]
fn test_schema_errors_surface() {
    let text = r#"
name = "x"
[section]
types = ["Name"]
[[field]]
key = "Type"
types = ["Enumerable"]
"#;
    let file = SchemaFile::parse(text, "x.toml").unwrap();
    assert!(matches!(
        file.to_schema("x.toml"),
        Err(CompileError::Schema(SchemaError::MissingEnumReference { .. }))
    ));
}

#[test]
fn test_fixed_size_needs_one_type() {
    let text = r#"
name = "x"
[section]
types = ["Name"]
[[field]]
key = "Pair"
fixed_size = 2
types = ["Integer", "Integer"]
"#;
    let file = SchemaFile::parse(text, "x.toml").unwrap();
    assert!(matches!(
        file.to_schema("x.toml"),
        Err(CompileError::InvalidSchema { .. })
    ));
}

#[test]
fn test_parse_enums() {
    let text = r#"
Stat = ["HP", "ATTACK", "DEFENSE"]

[Color]
RED = 4
BLUE = 7
"#;
    let enums = parse_enums(text, "enums.toml").unwrap();
    assert_eq!(enums.len(), 2);

    let color = enums.iter().find(|e| e.name() == "Color").unwrap();
    assert_eq!(color.by_name("BLUE").map(|m| m.value), Some(7));

    let stat = enums.iter().find(|e| e.name() == "Stat").unwrap();
    assert_eq!(stat.by_name("DEFENSE").map(|m| m.value), Some(2));
}
