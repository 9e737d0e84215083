use std::collections::BTreeMap;

use tiny_parser::ast::Identifier;

use crate::value::Value;

/// Variable bindings, keyed by name.
///
/// This is a plain value: cloning it takes an independent snapshot, which is how closures
/// freeze the bindings they were defined with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    store: BTreeMap<Identifier, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            store: BTreeMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.store.get(name)
    }

    /// Bind `name`, replacing any previous binding of the same name.
    pub fn define(&mut self, name: Identifier, value: Value) {
        self.store.insert(name, value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Bindings in name order
    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, &Value)> {
        self.store.iter()
    }
}
