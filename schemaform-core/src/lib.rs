//! Schemaform Core
//!
//! Directive transformers that decorate the infrastructure generated from
//! an annotated GraphQL schema. The host compiler supplies a parsed
//! [`schema::Document`] and a [`template::Template`] of generated
//! resources; registered transformers validate their directives and patch
//! those resources in place.
//!
//! ```ignore
//! use schemaform_core::{Document, Template, TransformerContext, TransformerRegistry};
//!
//! let document = Document::load("schema.json")?;
//! let mut ctx = TransformerContext::new(Template::load("stack.json")?);
//!
//! TransformerRegistry::with_defaults().transform(&document, &mut ctx)?;
//! ctx.into_template().save("stack.json")?;
//! ```

pub mod context;
pub mod naming;
pub mod registry;
pub mod resource;
pub mod schema;
pub mod template;
pub mod transformer;
pub mod ttl;

pub use context::TransformerContext;
pub use registry::{RegistryError, TransformError, TransformerRegistry};
pub use resource::Resource;
pub use schema::{Document, SchemaError};
pub use template::{Template, TemplateError};
pub use transformer::{DirectiveDefinition, DirectiveError, DirectiveLocation, Transformer};
pub use ttl::TtlTransformer;
