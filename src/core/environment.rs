//! The environment an evaluation runs against
//!
//! Two independent mappings, constants and resources, both keyed by name.
//! A name may exist in both; the VM decides which one a lookup sees.
//! Environments are immutable for the duration of an evaluation and use
//! structurally shared maps, so cloning one per evaluation, or composing a
//! base environment with script-specific overrides, is cheap.

use im::HashMap as ImHashMap;

use crate::core::{Resource, Value};

#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// name -> constant
    pub values: ImHashMap<String, Value>,
    /// name -> typed async capability
    pub resources: ImHashMap<String, Resource>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// adds a constant, replacing any previous one under the same name
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// adds a resource under its own name, replacing any previous one
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.insert(resource.name.clone(), resource);
        self
    }

    /// composes two environments; `overrides` wins on name collisions,
    /// independently for the two mappings
    pub fn merge(&self, overrides: &Environment) -> Environment {
        Environment {
            values: overrides.values.clone().union(self.values.clone()),
            resources: overrides.resources.clone().union(self.resources.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DataType;

    fn stub_resource(name: &str) -> Resource {
        Resource::from_fn(name, DataType::Str, DataType::Empty, |_| async {
            Ok(Value::from("stub"))
        })
    }

    #[test]
    fn merge_shadows_per_key() {
        let base = Environment::new()
            .with_value("greeting", "hello")
            .with_value("kept", "base");
        let overrides = Environment::new().with_value("greeting", "hi");

        let merged = base.merge(&overrides);
        assert_eq!(merged.values["greeting"], Value::from("hi"));
        assert_eq!(merged.values["kept"], Value::from("base"));
    }

    #[test]
    fn value_and_resource_key_spaces_are_independent() {
        let env = Environment::new()
            .with_value("x", "constant")
            .with_resource(stub_resource("x"));
        assert!(env.values.contains_key("x"));
        assert!(env.resources.contains_key("x"));
    }

    #[tokio::test]
    async fn merge_replaces_resources_too() {
        let base = Environment::new().with_resource(stub_resource("now"));
        let overrides = Environment::new().with_resource(Resource::from_fn(
            "now",
            DataType::Str,
            DataType::Empty,
            |_| async { Ok(Value::from("patched")) },
        ));
        let merged = base.merge(&overrides);
        assert_eq!(merged.resources.len(), 1);
        let out = merged.resources["now"].resolver.resolve(vec![]).await.unwrap();
        assert_eq!(out, Value::from("patched"));
    }
}
