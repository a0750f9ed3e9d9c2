//! Naming - Deterministic logical IDs for generated resources

/// Maps schema type names to the logical IDs of their generated resources
pub trait NamingConvention: Send + Sync {
    /// Logical ID of the storage table backing `type_name`
    fn table_resource_id(&self, type_name: &str) -> String;
}

/// Default convention used by model tables
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelResourceIds;

impl NamingConvention for ModelResourceIds {
    fn table_resource_id(&self, type_name: &str) -> String {
        model_table_resource_id(type_name)
    }
}

/// `Todo` -> `TodoTable`
pub fn model_table_resource_id(type_name: &str) -> String {
    format!("{}Table", type_name)
}
