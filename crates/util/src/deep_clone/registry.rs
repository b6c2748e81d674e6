use std::collections::HashMap;

use objkit_value::Value;

/// Clones made so far during one deep clone, keyed by the identity of the
/// source container.
///
/// A container is registered before its contents are copied, so a reference
/// back to it (a cycle) or a second reference to it (aliasing) resolves to the
/// same clone.
#[derive(Default)]
pub struct CloneRegistry {
    clones: HashMap<usize, Value>,
}

impl CloneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The clone already made for `source`, if any. Inline values are never
    /// registered.
    pub fn get(&self, source: &Value) -> Option<Value> {
        source.identity().and_then(|id| self.clones.get(&id).cloned())
    }

    pub fn register(&mut self, source: &Value, clone: &Value) {
        if let Some(id) = source.identity() {
            self.clones.insert(id, clone.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.clones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clones.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_keys_by_identity() {
        let mut registry = CloneRegistry::new();
        let source = Value::empty_object();
        let alias = source.clone();
        let copy = Value::empty_object();

        registry.register(&source, &copy);
        assert!(registry.get(&alias).is_some_and(|c| c.ptr_eq(&copy)));
        assert!(registry.get(&Value::empty_object()).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_ignores_inline_values() {
        let mut registry = CloneRegistry::new();
        registry.register(&Value::from(1), &Value::from(1));
        assert!(registry.is_empty());
        assert!(registry.get(&Value::from(1)).is_none());
    }
}
