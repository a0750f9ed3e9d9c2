//! Context - Mutable accumulator shared by all transformers during one pass

use crate::naming::{ModelResourceIds, NamingConvention};
use crate::resource::Resource;
use crate::template::Template;

/// Owns the template being generated for the duration of a single pass
///
/// Transformers receive it by `&mut`, one invocation at a time.
pub struct TransformerContext {
    template: Template,
    naming: Box<dyn NamingConvention>,
}

impl TransformerContext {
    pub fn new(template: Template) -> Self {
        Self {
            template,
            naming: Box::new(ModelResourceIds),
        }
    }

    /// Replace the default `{Type}Table` naming convention
    pub fn with_naming(mut self, naming: impl NamingConvention + 'static) -> Self {
        self.naming = Box::new(naming);
        self
    }

    pub fn table_resource_id(&self, type_name: &str) -> String {
        self.naming.table_resource_id(type_name)
    }

    pub fn get_resource(&self, logical_id: &str) -> Option<&Resource> {
        self.template.resources.get(logical_id)
    }

    pub fn get_resource_mut(&mut self, logical_id: &str) -> Option<&mut Resource> {
        self.template.resources.get_mut(logical_id)
    }

    pub fn has_resource(&self, logical_id: &str) -> bool {
        self.template.resources.contains_key(logical_id)
    }

    /// Insert or replace a resource, returning the previous one
    pub fn set_resource(
        &mut self,
        logical_id: impl Into<String>,
        resource: Resource,
    ) -> Option<Resource> {
        self.template.resources.insert(logical_id.into(), resource)
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn into_template(self) -> Template {
        self.template
    }
}

impl Default for TransformerContext {
    fn default() -> Self {
        Self::new(Template::new())
    }
}

impl std::fmt::Debug for TransformerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformerContext")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::DYNAMODB_TABLE;
    use serde_json::json;

    struct PrefixedNaming;

    impl NamingConvention for PrefixedNaming {
        fn table_resource_id(&self, type_name: &str) -> String {
            format!("Model{}Table", type_name)
        }
    }

    #[test]
    fn get_and_set_resource() {
        let mut ctx = TransformerContext::default();
        assert!(!ctx.has_resource("TodoTable"));

        let previous = ctx.set_resource("TodoTable", Resource::new(DYNAMODB_TABLE));
        assert!(previous.is_none());
        assert!(ctx.has_resource("TodoTable"));

        ctx.get_resource_mut("TodoTable")
            .unwrap()
            .set_property("TableName", json!("Todo"));

        assert_eq!(
            ctx.get_resource("TodoTable").unwrap().property("TableName"),
            Some(&json!("Todo"))
        );
        assert!(ctx.get_resource("OtherTable").is_none());
    }

    #[test]
    fn default_naming_convention() {
        let ctx = TransformerContext::default();
        assert_eq!(ctx.table_resource_id("Todo"), "TodoTable");
    }

    #[test]
    fn custom_naming_convention() {
        let ctx = TransformerContext::default().with_naming(PrefixedNaming);
        assert_eq!(ctx.table_resource_id("Todo"), "ModelTodoTable");
    }

    #[test]
    fn into_template_returns_accumulated_resources() {
        let mut ctx = TransformerContext::new(Template::new());
        ctx.set_resource("EventTable", Resource::new(DYNAMODB_TABLE));

        let template = ctx.into_template();
        assert!(template.resources.contains_key("EventTable"));
    }
}
