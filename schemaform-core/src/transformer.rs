//! Transformer - Trait implemented by every schema directive handler
//!
//! A transformer declares one directive and is called back by the
//! registry for each place that directive is attached in the schema.
//! Handlers validate the placement and then mutate resources held by the
//! [`TransformerContext`].

use std::fmt;

use thiserror::Error;

use crate::context::TransformerContext;
use crate::schema::{Directive, FieldDefinition, TypeDefinition};

/// Schema locations a directive may be attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveLocation {
    Object,
    Interface,
    FieldDefinition,
}

impl fmt::Display for DirectiveLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DirectiveLocation::Object => "OBJECT",
            DirectiveLocation::Interface => "INTERFACE",
            DirectiveLocation::FieldDefinition => "FIELD_DEFINITION",
        };
        write!(f, "{}", s)
    }
}

/// Declaration of a custom directive (`directive @name on LOCATION`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveDefinition {
    pub name: String,
    pub locations: Vec<DirectiveLocation>,
    pub repeatable: bool,
}

impl DirectiveDefinition {
    pub fn new(name: impl Into<String>, locations: Vec<DirectiveLocation>) -> Self {
        Self {
            name: name.into(),
            locations,
            repeatable: false,
        }
    }

    pub fn allows(&self, location: DirectiveLocation) -> bool {
        self.locations.contains(&location)
    }
}

impl fmt::Display for DirectiveDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let locations: Vec<String> = self.locations.iter().map(|l| l.to_string()).collect();
        write!(f, "directive @{}", self.name)?;
        if self.repeatable {
            write!(f, " repeatable")?;
        }
        write!(f, " on {}", locations.join(" | "))
    }
}

/// Validation failure raised by a directive handler
///
/// Every variant names the directive and the offending type so the host
/// can point the user at the right place in the schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectiveError {
    /// The field's type is not accepted by the directive
    #[error("{message}")]
    InvalidPlacement {
        directive: String,
        type_name: String,
        field_name: String,
        message: String,
    },

    /// The directive appears more often in a type than it allows
    #[error("{message}")]
    InvalidCardinality {
        directive: String,
        type_name: String,
        count: usize,
        message: String,
    },

    /// The resource the directive decorates has not been generated
    #[error("Directive \"{directive}\" on type {type_name}: resource '{resource_id}' not found")]
    ResourceNotFound {
        directive: String,
        type_name: String,
        resource_id: String,
    },

    /// The directive is attached somewhere its definition does not allow
    #[error("Directive \"{directive}\" may not be used on {location}")]
    InvalidLocation {
        directive: String,
        location: DirectiveLocation,
        type_name: String,
        field_name: Option<String>,
    },
}

impl DirectiveError {
    pub fn directive(&self) -> &str {
        match self {
            DirectiveError::InvalidPlacement { directive, .. }
            | DirectiveError::InvalidCardinality { directive, .. }
            | DirectiveError::ResourceNotFound { directive, .. }
            | DirectiveError::InvalidLocation { directive, .. } => directive,
        }
    }

    /// Schema location of the error, `Type` or `Type.field`
    pub fn location(&self) -> String {
        match self {
            DirectiveError::InvalidPlacement {
                type_name,
                field_name,
                ..
            }
            | DirectiveError::InvalidLocation {
                type_name,
                field_name: Some(field_name),
                ..
            } => format!("{}.{}", type_name, field_name),
            DirectiveError::InvalidCardinality { type_name, .. }
            | DirectiveError::ResourceNotFound { type_name, .. }
            | DirectiveError::InvalidLocation { type_name, .. } => type_name.clone(),
        }
    }
}

/// A schema directive handler
///
/// Implementations override the hooks matching the locations declared
/// by [`Transformer::directive`]; the remaining hooks are no-ops.
pub trait Transformer: Send + Sync {
    /// Name of this transformer (e.g., "TtlTransformer")
    fn name(&self) -> &'static str;

    /// Directive this transformer handles
    fn directive(&self) -> DirectiveDefinition;

    /// Called for the directive attached to an object or interface type
    fn object(
        &self,
        _definition: &TypeDefinition,
        _directive: &Directive,
        _ctx: &mut TransformerContext,
    ) -> Result<(), DirectiveError> {
        Ok(())
    }

    /// Called for the directive attached to a field of `parent`
    fn field(
        &self,
        _parent: &TypeDefinition,
        _definition: &FieldDefinition,
        _directive: &Directive,
        _ctx: &mut TransformerContext,
    ) -> Result<(), DirectiveError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_definition_sdl() {
        let def = DirectiveDefinition::new("ttl", vec![DirectiveLocation::FieldDefinition]);
        assert_eq!(def.to_string(), "directive @ttl on FIELD_DEFINITION");

        let mut def = DirectiveDefinition::new(
            "auth",
            vec![DirectiveLocation::Object, DirectiveLocation::FieldDefinition],
        );
        def.repeatable = true;
        assert_eq!(
            def.to_string(),
            "directive @auth repeatable on OBJECT | FIELD_DEFINITION"
        );
    }

    #[test]
    fn directive_definition_allows() {
        let def = DirectiveDefinition::new("ttl", vec![DirectiveLocation::FieldDefinition]);
        assert!(def.allows(DirectiveLocation::FieldDefinition));
        assert!(!def.allows(DirectiveLocation::Object));
    }

    #[test]
    fn error_location() {
        let err = DirectiveError::InvalidPlacement {
            directive: "ttl".to_string(),
            type_name: "Bad".to_string(),
            field_name: "a".to_string(),
            message: "nope".to_string(),
        };
        assert_eq!(err.location(), "Bad.a");
        assert_eq!(err.directive(), "ttl");
        assert_eq!(err.to_string(), "nope");

        let err = DirectiveError::InvalidLocation {
            directive: "ttl".to_string(),
            location: DirectiveLocation::Object,
            type_name: "Todo".to_string(),
            field_name: None,
        };
        assert_eq!(err.location(), "Todo");
        assert_eq!(err.to_string(), "Directive \"ttl\" may not be used on OBJECT");
    }

    #[test]
    fn resource_not_found_message() {
        let err = DirectiveError::ResourceNotFound {
            directive: "ttl".to_string(),
            type_name: "Todo".to_string(),
            resource_id: "TodoTable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Directive \"ttl\" on type Todo: resource 'TodoTable' not found"
        );
    }
}
