pub mod describe;
pub mod generate;
pub mod list;

pub use describe::describe_schema;
pub use generate::{GenerateConfig, generate_model};
pub use list::list_schemas;
