use super::*;

#[test]
fn test_display_shapes() {
    let value = Value::List(vec![
        Value::Tuple(vec![Value::from(1), Value::from(2)]),
        Value::Tuple(vec![Value::from("a"), Value::Null]),
    ]);
    assert_eq!(value.to_string(), "[(1, 2), (a, null)]");
}

#[test]
fn test_hex_displays_uppercase() {
    assert_eq!(Primitive::Hex(0xff).to_string(), "FF");
}

#[test]
fn test_flatten_recurses() {
    let value = Value::List(vec![
        Value::Tuple(vec![Value::from(1), Value::from(2)]),
        Value::Tuple(vec![Value::from(3), Value::Null]),
    ]);
    let flat = value.flatten();
    assert_eq!(flat.len(), 4);
    assert_eq!(flat[0], Some(&Primitive::Integer(1)));
    assert_eq!(flat[2], Some(&Primitive::Integer(3)));
    assert_eq!(flat[3], None);
}

#[test]
fn test_flatten_scalar_and_null() {
    assert_eq!(Value::from(true).flatten(), vec![Some(&Primitive::Boolean(true))]);
    assert_eq!(Value::Null.flatten(), vec![None]);
}

#[test]
fn test_accessors() {
    let tuple = Value::Tuple(vec![Value::from(7)]);
    assert!(tuple.as_tuple().is_some());
    assert!(tuple.as_list().is_none());
    assert!(tuple.as_primitive().is_none());
    assert!(Value::default().is_null());
    assert_eq!(Value::from(None), Value::Null);
}

#[test]
fn test_primitive_conversions() {
    let member = Primitive::Enum {
        member: "FIRE".into(),
        value: 10,
    };
    assert_eq!(member.as_str(), Some("FIRE"));
    assert_eq!(member.as_i64(), Some(10));
    assert_eq!(Primitive::Unsigned(u64::MAX).as_i64(), None);
    assert_eq!(Primitive::Key(EntityKey::Integer(3)).as_i64(), Some(3));
    assert_eq!(Primitive::Key(EntityKey::Integer(3)).as_str(), None);
    assert_eq!(Primitive::name("TACKLE").as_str(), Some("TACKLE"));
}
