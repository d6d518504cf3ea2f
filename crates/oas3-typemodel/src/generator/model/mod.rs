pub mod descriptors;
pub mod literals;
pub mod registry;
pub mod types;

pub use descriptors::{
  ADDITIONAL_PROPERTIES_KEY, CollectionConstraints, DiscriminatorDescriptor, DiscriminatorKey, EnumDescriptor,
  EnumMember, FieldConstraints, NumericBound, PropertyDescriptor, PropertyKind, PropertyModifier, SchemaDescriptor,
  SchemaKind, Wrapping,
};
pub use literals::{DefaultValue, Literal, quote};
pub use registry::TypeModel;
pub use types::{PrimitiveType, TypeRef};
