use crate::generator::{
  config::{DiscriminatorPolicy, MandatoryPolicy, ModelConfig, PropertyContext},
  validation::ValidationDialect,
};

fn ctx(is_required: bool, is_nullable: bool, has_default: bool) -> PropertyContext {
  PropertyContext {
    is_required,
    is_nullable,
    has_default,
  }
}

#[test]
fn test_standard_mandatory_policy() {
  let policy = MandatoryPolicy::standard();

  assert!(policy.is_mandatory(ctx(true, false, false)));
  assert!(!policy.is_mandatory(ctx(true, true, false)));
  assert!(policy.is_mandatory(ctx(false, false, true)));
  assert!(!policy.is_mandatory(ctx(false, false, false)));
  assert!(policy.is_mandatory(ctx(false, true, true)));
}

#[test]
fn test_merge_patch_mandatory_policy() {
  let policy = MandatoryPolicy::merge_patch();

  assert!(policy.is_mandatory(ctx(true, false, false)));
  assert!(policy.is_mandatory(ctx(false, false, false)));
  assert!(!policy.is_mandatory(ctx(false, true, true)));
  assert!(!policy.is_mandatory(ctx(true, true, false)));
}

#[test]
fn test_builder_defaults() {
  let config = ModelConfig::builder().build();

  assert_eq!(config, ModelConfig::default());
  assert!(!config.merge_patch);
  assert_eq!(config.validation_dialect, ValidationDialect::Javax);
  assert_eq!(config.discriminator_policy, DiscriminatorPolicy::Lenient);
  assert_eq!(config.mandatory_policy(), MandatoryPolicy::standard());
}

#[test]
fn test_merge_patch_selects_policy() {
  let config = ModelConfig::builder()
    .merge_patch(true)
    .validation_dialect(ValidationDialect::Jakarta)
    .build();

  assert_eq!(config.mandatory_policy(), MandatoryPolicy::merge_patch());
}

#[test]
fn test_config_serializes_lowercase() {
  let config = ModelConfig::builder()
    .discriminator_policy(DiscriminatorPolicy::Strict)
    .build();
  let json = serde_json::to_value(config).expect("config serializes");

  assert_eq!(
    json,
    serde_json::json!({
      "merge_patch": false,
      "validation_dialect": "javax",
      "discriminator_policy": "strict"
    })
  );
  assert_eq!(DiscriminatorPolicy::Lenient.to_string(), "lenient");
}
