use super::*;
use pbs_core::{EntitySet, KeyStrategy};
use std::sync::Arc;

fn registry() -> EnumRegistry {
    let mut moves = EntitySet::new("Move", KeyStrategy::Name);
    moves.extend(["TACKLE", "GROWL"].map(|m| EntityKey::Name(m.into())));

    let mut registry = EnumRegistry::new();
    registry
        .register_enum(
            EnumDefinition::new("Color")
                .member("RED", 4)
                .member("BLUE", 7),
        )
        .register_entities("Move", Arc::new(moves));
    registry
}

fn field(kind: PrimitiveKind) -> FieldDescriptor {
    FieldDescriptor::new(kind)
}

// -- numeric domains --

#[test]
fn test_positive_boundaries() {
    assert!(parse_positive("0").is_err());
    assert_eq!(parse_positive("1"), Ok(1));
    assert!(parse_positive("-3").is_err());
}

#[test]
fn test_unsigned_boundaries() {
    assert_eq!(parse_unsigned("0"), Ok(0));
    assert_eq!(
        parse_unsigned("-1"),
        Err(CastError::NotUnsigned("-1".into()))
    );
}

#[test]
fn test_hex() {
    assert_eq!(parse_hex("ff"), Ok(255));
    assert_eq!(parse_hex("FF"), Ok(255));
    assert!(parse_hex("-1").is_err());
    assert!(parse_hex("+1").is_err());
    assert!(parse_hex("0x10").is_err());
    assert!(parse_hex("").is_err());
}

#[test]
fn test_int_and_float() {
    assert_eq!(parse_int("-12"), Ok(-12));
    assert!(parse_int("1.5").is_err());
    assert_eq!(parse_float("1.5"), Ok(1.5));
    assert!(parse_float("NaN").is_err());
    assert!(parse_float("abc").is_err());
}

// -- booleans and names --

#[test]
fn test_boolean_acceptance() {
    for raw in ["1", "true", "TRUE", "yes", "Y"] {
        assert_eq!(parse_boolean(raw), Ok(true), "{raw}");
    }
    for raw in ["0", "false", "NO", "n"] {
        assert_eq!(parse_boolean(raw), Ok(false), "{raw}");
    }
    assert_eq!(parse_boolean("2"), Err(CastError::NotBoolean("2".into())));
}

#[test]
fn test_names() {
    assert_eq!(parse_name("TACKLE"), Ok("TACKLE"));
    assert_eq!(parse_name("_hidden2"), Ok("_hidden2"));
    assert!(parse_name("2ND").is_err());
    assert!(parse_name("TWO WORDS").is_err());
    assert!(parse_name("").is_err());
}

#[test]
fn test_text_passes_through() {
    let caster = Caster::standalone();
    assert_eq!(
        caster.cast("  anything, really ", &field(PrimitiveKind::String)),
        Ok(Primitive::text("  anything, really "))
    );
    assert_eq!(
        caster.cast("SYM", &field(PrimitiveKind::Symbol)),
        Ok(Primitive::Symbol("SYM".into()))
    );
}

// -- enums and entity keys --

#[test]
fn test_enumerable_member() {
    let registry = registry();
    let caster = Caster::new(&registry);
    assert_eq!(
        caster.cast("red", &FieldDescriptor::enumerable("Color")),
        Ok(Primitive::Enum {
            member: "RED".into(),
            value: 4
        })
    );
    assert_eq!(
        caster.cast("GREEN", &FieldDescriptor::enumerable("Color")),
        Err(CastError::UnknownMember {
            value: "GREEN".into(),
            enumeration: "Color".into()
        })
    );
}

#[test]
fn test_enumerable_entity_key() {
    let registry = registry();
    let caster = Caster::new(&registry);
    let moves = FieldDescriptor::enumerable("Move");

    assert_eq!(
        caster.cast("TACKLE", &moves),
        Ok(Primitive::Key(EntityKey::Name("TACKLE".into())))
    );
    assert!(matches!(
        caster.cast("EMBER", &moves),
        Err(CastError::UnknownKey { .. })
    ));
    assert!(caster.cast("NONE", &moves).is_err());
    assert_eq!(
        caster.cast("NONE", &moves.clone().allow_none()),
        Ok(Primitive::Key(EntityKey::Name("NONE".into())))
    );
}

#[test]
fn test_unregistered_enumeration() {
    let registry = registry();
    let caster = Caster::new(&registry);
    assert_eq!(
        caster.cast("X", &FieldDescriptor::enumerable("Ability")),
        Err(CastError::UnknownEnumeration("Ability".into()))
    );
    assert_eq!(
        Caster::standalone().cast("RED", &FieldDescriptor::enumerable("Color")),
        Err(CastError::UnknownEnumeration("Color".into()))
    );
}

#[test]
fn test_enum_or_integer_fallback() {
    let registry = registry();
    let caster = Caster::new(&registry);
    let color = field(PrimitiveKind::EnumerableOrInteger).with_enum("Color");

    assert_eq!(
        caster.cast("4", &color),
        Ok(Primitive::Enum {
            member: "RED".into(),
            value: 4
        })
    );
    assert_eq!(
        caster.cast("BLUE", &color),
        Ok(Primitive::Enum {
            member: "BLUE".into(),
            value: 7
        })
    );
    assert_eq!(
        caster.cast("5", &color),
        Err(CastError::UndefinedValue {
            value: 5,
            enumeration: "Color".into()
        })
    );
}

#[test]
fn test_enum_or_integer_without_reference() {
    let caster = Caster::standalone();
    let plain = field(PrimitiveKind::EnumerableOrInteger);
    assert_eq!(caster.cast("12", &plain), Ok(Primitive::Integer(12)));
    assert_eq!(
        caster.cast("RED", &plain),
        Err(CastError::EnumerationNotDefined("RED".into()))
    );
}
