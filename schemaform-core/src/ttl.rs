//! TTL - `@ttl` directive enabling time-to-live on a model's table
//!
//! ```graphql
//! type Event @model {
//!   id: ID!
//!   occursAt: AWSTimestamp @ttl
//! }
//! ```
//!
//! The annotated field becomes the `TimeToLiveSpecification` attribute
//! of the `EventTable` resource.

use serde_json::{Map, json};

use crate::context::TransformerContext;
use crate::schema::{Directive, FieldDefinition, TypeDefinition};
use crate::transformer::{DirectiveDefinition, DirectiveError, DirectiveLocation, Transformer};

pub const TTL_DIRECTIVE: &str = "ttl";

/// Base types a TTL attribute may have
pub const TTL_ALLOWED_TYPES: [&str; 2] = ["AWSTimestamp", "Int"];

/// Table property receiving the TTL settings
pub const TIME_TO_LIVE_SPECIFICATION: &str = "TimeToLiveSpecification";

#[derive(Debug, Clone, Copy, Default)]
pub struct TtlTransformer;

impl TtlTransformer {
    pub fn new() -> Self {
        Self
    }

    fn check_field_type(
        parent: &TypeDefinition,
        definition: &FieldDefinition,
    ) -> Result<(), DirectiveError> {
        let base = definition.field_type.base_type();
        if TTL_ALLOWED_TYPES.contains(&base) {
            return Ok(());
        }
        Err(DirectiveError::InvalidPlacement {
            directive: TTL_DIRECTIVE.to_string(),
            type_name: parent.name.clone(),
            field_name: definition.name.clone(),
            message: format!(
                "Directive \"{}\" must be used only on {} type fields.",
                TTL_DIRECTIVE,
                TTL_ALLOWED_TYPES.join(" or ")
            ),
        })
    }

    /// The directive is already attached when we run, so one occurrence is ours
    fn check_cardinality(parent: &TypeDefinition) -> Result<(), DirectiveError> {
        let count = parent.count_field_directives(TTL_DIRECTIVE);
        if count <= 1 {
            return Ok(());
        }
        Err(DirectiveError::InvalidCardinality {
            directive: TTL_DIRECTIVE.to_string(),
            type_name: parent.name.clone(),
            count,
            message: format!(
                "Directive \"{}\" must be used only once in the same type.",
                TTL_DIRECTIVE
            ),
        })
    }
}

impl Transformer for TtlTransformer {
    fn name(&self) -> &'static str {
        "TtlTransformer"
    }

    fn directive(&self) -> DirectiveDefinition {
        DirectiveDefinition::new(TTL_DIRECTIVE, vec![DirectiveLocation::FieldDefinition])
    }

    fn field(
        &self,
        parent: &TypeDefinition,
        definition: &FieldDefinition,
        _directive: &Directive,
        ctx: &mut TransformerContext,
    ) -> Result<(), DirectiveError> {
        Self::check_field_type(parent, definition)?;
        Self::check_cardinality(parent)?;

        let table_id = ctx.table_resource_id(&parent.name);
        let Some(table) = ctx.get_resource_mut(&table_id) else {
            return Err(DirectiveError::ResourceNotFound {
                directive: TTL_DIRECTIVE.to_string(),
                type_name: parent.name.clone(),
                resource_id: table_id,
            });
        };

        let mut spec = Map::new();
        spec.insert(
            TIME_TO_LIVE_SPECIFICATION.to_string(),
            json!({
                "AttributeName": definition.name,
                "Enabled": true,
            }),
        );
        table.merge_properties(spec);

        log::info!(
            "Enabled TTL on {} using attribute '{}'",
            table_id,
            definition.name
        );
        Ok(())
    }
}
