//! Registry - Explicitly registered directive transformers and the schema walk
//!
//! Transformers are registered once at startup, keyed by the directive
//! they declare. [`TransformerRegistry::transform`] walks the schema in
//! declaration order and dispatches every attached directive to its
//! transformer. The first error aborts the pass.

use std::collections::HashMap;

use thiserror::Error;

use crate::context::TransformerContext;
use crate::schema::{Document, TypeKind};
use crate::transformer::{DirectiveDefinition, DirectiveError, DirectiveLocation, Transformer};
use crate::ttl::TtlTransformer;

/// Registration error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Directive @{directive} is already handled by {existing}")]
    DuplicateDirective { directive: String, existing: String },
}

/// Error aborting a transform pass
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("{} ({})", .0, .0.location())]
    Directive(#[from] DirectiveError),
}

#[derive(Default)]
pub struct TransformerRegistry {
    transformers: HashMap<String, Box<dyn Transformer>>,
}

impl TransformerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in transformer
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for transformer in builtin_transformers() {
            registry
                .transformers
                .insert(transformer.directive().name, transformer);
        }
        registry
    }

    pub fn register(&mut self, transformer: Box<dyn Transformer>) -> Result<(), RegistryError> {
        let directive = transformer.directive().name;
        if let Some(existing) = self.transformers.get(&directive) {
            return Err(RegistryError::DuplicateDirective {
                directive,
                existing: existing.name().to_string(),
            });
        }
        log::debug!("Registered {} for @{}", transformer.name(), directive);
        self.transformers.insert(directive, transformer);
        Ok(())
    }

    pub fn get(&self, directive: &str) -> Option<&dyn Transformer> {
        self.transformers.get(directive).map(|t| t.as_ref())
    }

    /// Definitions of all registered directives, sorted by name
    pub fn directive_definitions(&self) -> Vec<DirectiveDefinition> {
        let mut defs: Vec<DirectiveDefinition> =
            self.transformers.values().map(|t| t.directive()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// SDL declaring every registered directive
    pub fn sdl(&self) -> String {
        self.directive_definitions()
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Run every registered transformer over `document`
    pub fn transform(
        &self,
        document: &Document,
        ctx: &mut TransformerContext,
    ) -> Result<(), TransformError> {
        for definition in &document.types {
            let type_location = match definition.kind {
                TypeKind::Object => DirectiveLocation::Object,
                TypeKind::Interface => DirectiveLocation::Interface,
            };

            for directive in &definition.directives {
                let Some(transformer) = self.dispatch(&directive.name) else {
                    continue;
                };
                check_location(transformer, type_location, &definition.name, None)?;
                transformer.object(definition, directive, ctx)?;
            }

            for field in &definition.fields {
                for directive in &field.directives {
                    let Some(transformer) = self.dispatch(&directive.name) else {
                        continue;
                    };
                    check_location(
                        transformer,
                        DirectiveLocation::FieldDefinition,
                        &definition.name,
                        Some(&field.name),
                    )?;
                    transformer.field(definition, field, directive, ctx)?;
                }
            }
        }
        Ok(())
    }

    fn dispatch(&self, directive: &str) -> Option<&dyn Transformer> {
        let transformer = self.get(directive);
        match transformer {
            Some(t) => log::debug!("Dispatching @{} to {}", directive, t.name()),
            None => log::debug!("No transformer registered for @{}, skipping", directive),
        }
        transformer
    }
}

fn check_location(
    transformer: &dyn Transformer,
    location: DirectiveLocation,
    type_name: &str,
    field_name: Option<&str>,
) -> Result<(), DirectiveError> {
    let definition = transformer.directive();
    if definition.allows(location) {
        return Ok(());
    }
    Err(DirectiveError::InvalidLocation {
        directive: definition.name,
        location,
        type_name: type_name.to_string(),
        field_name: field_name.map(str::to_string),
    })
}

/// Transformers shipped with this crate; directive names are distinct
fn builtin_transformers() -> Vec<Box<dyn Transformer>> {
    vec![Box::new(TtlTransformer::new())]
}

impl std::fmt::Debug for TransformerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut directives: Vec<&String> = self.transformers.keys().collect();
        directives.sort();
        f.debug_struct("TransformerRegistry")
            .field("directives", &directives)
            .finish()
    }
}
