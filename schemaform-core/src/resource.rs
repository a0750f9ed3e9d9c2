//! Resource - Generated infrastructure resources and their property bags

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// CloudFormation resource type of model-backing tables
pub const DYNAMODB_TABLE: &str = "AWS::DynamoDB::Table";

/// A single resource entry of a CloudFormation-style template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Resource type (e.g., "AWS::DynamoDB::Table")
    #[serde(rename = "Type")]
    pub resource_type: String,
    #[serde(rename = "Properties", default, skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,
    /// Resource attributes outside the property bag (`DependsOn`,
    /// `DeletionPolicy`, `Condition`, `Metadata`, ...), kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Resource {
    pub fn new(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            properties: Map::new(),
            extra: Map::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Set a single property, returning the previous value
    pub fn set_property(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.properties.insert(key.into(), value)
    }

    /// Shallow merge into the property bag
    ///
    /// Incoming keys replace existing ones wholesale; keys not mentioned
    /// in `incoming` are left untouched.
    pub fn merge_properties(&mut self, incoming: Map<String, Value>) {
        for (key, value) in incoming {
            self.properties.insert(key, value);
        }
    }
}
