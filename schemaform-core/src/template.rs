//! Template - CloudFormation-style document holding every generated resource

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::resource::Resource;

/// Errors reading or writing a template
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Resource accumulator of one compilation pass, keyed by logical ID
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(
        rename = "AWSTemplateFormatVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub format_version: Option<String>,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "Resources", default)]
    pub resources: BTreeMap<String, Resource>,
    #[serde(rename = "Outputs", default, skip_serializing_if = "Map::is_empty")]
    pub outputs: Map<String, Value>,
    /// Sections this crate never touches (`Parameters`, `Conditions`,
    /// `Mappings`, `Metadata`, `Transform`, ...), kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Template {
    /// Format version written into new templates
    pub const FORMAT_VERSION: &'static str = "2010-09-09";

    pub fn new() -> Self {
        Self {
            format_version: Some(Self::FORMAT_VERSION.to_string()),
            ..Self::default()
        }
    }

    pub fn with_resource(mut self, logical_id: impl Into<String>, resource: Resource) -> Self {
        self.resources.insert(logical_id.into(), resource);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, TemplateError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, TemplateError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TemplateError> {
        let path = path.as_ref();
        let json = self.to_json_pretty()?;
        fs::write(path, json).map_err(|source| TemplateError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}
