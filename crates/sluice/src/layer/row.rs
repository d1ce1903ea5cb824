use indexmap::IndexMap;
use sluice_core::{Result, Value};

/// One result row: property name to value, in projection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&Value> {
        self.fields.get(property)
    }

    /// The first value in projection order, used by `count()`.
    pub fn first(&self) -> Option<&Value> {
        self.fields.values().next()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (property, value) in iter {
            row.insert(property, value);
        }
        row
    }
}

/// Mapping from a result row back into an entity value. Implemented by the
/// `entity!` macro for scalar fields; embedded and collection fields are left
/// at their defaults.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> Result<Self>;
}
