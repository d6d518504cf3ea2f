use crate::generator::model::{DefaultValue, Literal, quote};

#[test]
fn test_quote_escapes() {
  assert_eq!(quote("plain"), "\"plain\"");
  assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
  assert_eq!(quote("C:\\temp"), "\"C:\\\\temp\"");
  assert_eq!(quote("${name}"), "\"\\${name}\"");
  assert_eq!(quote("a\nb\tc"), "\"a\\nb\\tc\"");
  assert_eq!(quote("\u{1}"), "\"\\u0001\"");
}

#[test]
fn test_literal_rendering() {
  let cases = [
    (Literal::String("x".into()), "\"x\""),
    (Literal::Int(-3), "-3"),
    (Literal::Long(42), "42L"),
    (Literal::Float("1.5".into()), "1.5f"),
    (Literal::Double("2".into()), "2.0"),
    (Literal::Double("1e3".into()), "1e3"),
    (Literal::Decimal("1.5".into()), "java.math.BigDecimal(\"1.5\")"),
    (Literal::Boolean(false), "false"),
    (Literal::Date("2024-01-31".into()), "java.time.LocalDate.parse(\"2024-01-31\")"),
    (
      Literal::EnumMember {
        type_name: "Status".into(),
        constant: "ACTIVE".into(),
      },
      "Status.ACTIVE",
    ),
    (Literal::EmptyList, "emptyList()"),
    (Literal::EmptyMap, "mutableMapOf()"),
  ];

  for (literal, expected) in cases {
    assert_eq!(literal.to_string(), expected, "rendering {literal:?}");
  }
}

#[test]
fn test_default_value_for_property() {
  let literal = || Some(Literal::Int(1));

  assert_eq!(DefaultValue::for_property(literal(), true, false), None);
  assert_eq!(DefaultValue::for_property(literal(), true, true), None);
  assert_eq!(
    DefaultValue::for_property(literal(), false, false),
    Some(DefaultValue::Literal(Literal::Int(1)))
  );
  assert_eq!(DefaultValue::for_property(None, false, false), Some(DefaultValue::Null));
  assert_eq!(
    DefaultValue::for_property(literal(), false, true),
    Some(DefaultValue::Present(Literal::Int(1)))
  );
  assert_eq!(DefaultValue::for_property(None, false, true), Some(DefaultValue::Undefined));
}

#[test]
fn test_default_value_rendering() {
  assert_eq!(DefaultValue::Present(Literal::Long(5)).to_string(), "JsonNullable.of(5L)");
  assert_eq!(DefaultValue::Undefined.to_string(), "JsonNullable.undefined()");
  assert_eq!(DefaultValue::Null.to_string(), "null");
  assert_eq!(DefaultValue::Null.literal(), None);
  assert_eq!(
    DefaultValue::Present(Literal::EmptyList).literal(),
    Some(&Literal::EmptyList)
  );
}

#[test]
fn test_default_value_serializes_as_text() {
  let value = serde_json::to_value(DefaultValue::Literal(Literal::Long(7))).expect("serializes");
  assert_eq!(value, serde_json::json!("7L"));
}
