//! Schema - In-memory model of an already-parsed GraphQL schema
//!
//! The host compiler hands over object and interface type definitions
//! together with the directives attached to them. Transformers only read
//! this model; it is never mutated during a pass.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Schema loading error
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Failed to read schema {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid schema document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Declared type of a field, possibly wrapped in list / non-null modifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeRef {
    /// Named scalar, enum, or object type (e.g., "Int", "Todo")
    Named(String),
    /// `[T]`
    List(Box<TypeRef>),
    /// `T!`
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn list(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }

    pub fn non_null(inner: TypeRef) -> Self {
        TypeRef::NonNull(Box::new(inner))
    }

    /// Innermost named type after stripping all list and non-null wrappers
    pub fn base_type(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.base_type(),
        }
    }

    pub fn is_list(&self) -> bool {
        match self {
            TypeRef::Named(_) => false,
            TypeRef::List(_) => true,
            TypeRef::NonNull(inner) => inner.is_list(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => write!(f, "{}", name),
            TypeRef::List(inner) => write!(f, "[{}]", inner),
            TypeRef::NonNull(inner) => write!(f, "{}!", inner),
        }
    }
}

/// A directive occurrence (e.g., `@ttl`, `@model`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    pub name: String,
    /// Argument values as written in the schema
    #[serde(default)]
    pub arguments: serde_json::Map<String, serde_json::Value>,
}

impl Directive {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: serde_json::Map::new(),
        }
    }
}

/// Field of an object or interface type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: TypeRef,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, field_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            field_type,
            directives: Vec::new(),
        }
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    /// Number of occurrences of the named directive on this field
    pub fn directive_count(&self, name: &str) -> usize {
        self.directives.iter().filter(|d| d.name == name).count()
    }

    pub fn has_directive(&self, name: &str) -> bool {
        self.directive_count(name) > 0
    }
}

/// Kind of a type definition that can carry fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Object,
    Interface,
}

/// Object or interface type definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDefinition {
    #[serde(default = "default_kind")]
    pub kind: TypeKind,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    #[serde(default)]
    pub directives: Vec<Directive>,
}

fn default_kind() -> TypeKind {
    TypeKind::Object
}

impl TypeDefinition {
    pub fn object(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Object,
            name: name.into(),
            fields: Vec::new(),
            directives: Vec::new(),
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            kind: TypeKind::Interface,
            ..Self::object(name)
        }
    }

    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directives.push(directive);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Total occurrences of the named directive summed over every field
    pub fn count_field_directives(&self, name: &str) -> usize {
        self.fields.iter().map(|f| f.directive_count(name)).sum()
    }
}

/// Schema document handed over by the host compiler
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub types: Vec<TypeDefinition>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, definition: TypeDefinition) -> Self {
        self.types.push(definition);
        self
    }

    pub fn find_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a pre-parsed schema document from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }
}
