
use serde_json::Value;

use crate::document::RawSchema;

fn raw(value: Value) -> RawSchema {
  serde_json::from_value(value).expect("failed to parse test schema")
}
