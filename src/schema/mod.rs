//! Schema system - document validation and template generation

pub mod registry;
pub mod template;
pub mod validator;

pub use registry::{SchemaKind, SchemaRegistry};
pub use template::{TemplateContext, TemplateGenerator};
pub use validator::{ValidationError, Validator};
