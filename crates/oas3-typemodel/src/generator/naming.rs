use std::{collections::BTreeSet, sync::LazyLock};

use any_ascii::any_ascii;
use inflections::Inflect;
use regex::Regex;

static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());
static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Transliterates to ASCII, replaces invalid characters with underscores,
/// collapses runs of underscores and trims them from both ends.
pub(crate) fn sanitize(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }

  let ascii = any_ascii(input);
  let replaced = INVALID_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");

  collapsed.trim_matches('_').to_string()
}

/// PascalCase segment for a property key, used to build inline type names.
///
/// Keys already in mixed case (`billingAddress`) keep their word boundaries;
/// everything else goes through `to_pascal_case`.
pub(crate) fn to_type_segment(key: &str) -> String {
  let cleaned = sanitize(key);
  if cleaned.is_empty() {
    return "Property".to_string();
  }

  let has_upper = cleaned.chars().any(|c| c.is_ascii_uppercase());
  let has_lower = cleaned.chars().any(|c| c.is_ascii_lowercase());
  if has_upper && has_lower && !cleaned.contains('_') {
    let mut chars = cleaned.chars();
    return match chars.next() {
      Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
      None => cleaned,
    };
  }

  cleaned.to_pascal_case()
}

/// Name for the inline schema of property `key` inside `owner`.
pub(crate) fn inline_type_name(owner: &str, key: &str) -> String {
  format!("{owner}{}", to_type_segment(key))
}

/// `UPPER_SNAKE` constant for an enum value.
pub(crate) fn to_enum_constant(value: &str) -> String {
  let cleaned = sanitize(value);
  if cleaned.is_empty() {
    return "EMPTY".to_string();
  }

  let mut constant = if cleaned.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_') {
    cleaned
  } else {
    cleaned.to_constant_case()
  };

  if constant.starts_with(|c: char| c.is_ascii_digit()) {
    constant.insert(0, '_');
  }
  constant
}

pub(crate) fn ensure_unique(base_name: &str, used_names: &BTreeSet<String>) -> String {
  if !used_names.contains(base_name) {
    return base_name.to_string();
  }
  let mut i = 2;
  loop {
    let new_name = format!("{base_name}{i}");
    if !used_names.contains(&new_name) {
      return new_name;
    }
    i += 1;
  }
}
