use crate::generator::validation::{ValidationAnnotation, ValidationDialect};

#[test]
fn test_qualified_names_follow_dialect() {
  assert_eq!(
    ValidationAnnotation::NotNull.qualified_name(ValidationDialect::Javax),
    "javax.validation.constraints.NotNull"
  );
  assert_eq!(
    ValidationAnnotation::NotNull.qualified_name(ValidationDialect::Jakarta),
    "jakarta.validation.constraints.NotNull"
  );
  assert_eq!(
    ValidationAnnotation::Valid.render(ValidationDialect::Jakarta),
    "@jakarta.validation.Valid"
  );
}

#[test]
fn test_pattern_rendering_escapes_templates() {
  let pattern = ValidationAnnotation::Pattern {
    regexp: "^[a-z]+$".into(),
  };
  assert_eq!(
    pattern.render(ValidationDialect::Javax),
    "@javax.validation.constraints.Pattern(regexp = \"^[a-z]+\\$\")"
  );
}

#[test]
fn test_size_rendering_omits_missing_bounds() {
  let both = ValidationAnnotation::Size {
    min: Some(1),
    max: Some(3),
  };
  let max_only = ValidationAnnotation::Size { min: None, max: Some(10) };

  assert_eq!(
    both.render(ValidationDialect::Javax),
    "@javax.validation.constraints.Size(min = 1, max = 3)"
  );
  assert_eq!(
    max_only.render(ValidationDialect::Javax),
    "@javax.validation.constraints.Size(max = 10)"
  );
}

#[test]
fn test_decimal_bounds_rendering() {
  let min = ValidationAnnotation::DecimalMin {
    value: "0".into(),
    inclusive: false,
  };
  let max = ValidationAnnotation::DecimalMax {
    value: "99.5".into(),
    inclusive: true,
  };

  assert_eq!(
    min.render(ValidationDialect::Jakarta),
    "@jakarta.validation.constraints.DecimalMin(value = \"0\", inclusive = false)"
  );
  assert_eq!(
    max.render(ValidationDialect::Jakarta),
    "@jakarta.validation.constraints.DecimalMax(value = \"99.5\", inclusive = true)"
  );
}

#[test]
fn test_dialect_display() {
  assert_eq!(ValidationDialect::Javax.to_string(), "javax");
  assert_eq!(ValidationDialect::Jakarta.package(), "jakarta.validation");
}
