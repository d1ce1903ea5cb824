use super::{TemporalType, Value};

/// A named parameter registered by one binary predicate. The name is unique
/// within one compiled query; the ordinal records registration order for
/// layers that bind positionally.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterTuple {
    name: String,
    value: Value,
    temporal: Option<TemporalType>,
    ordinal: usize,
}

impl ParameterTuple {
    pub fn new(
        name: impl Into<String>,
        value: Value,
        temporal: Option<TemporalType>,
        ordinal: usize,
    ) -> Self {
        ParameterTuple {
            name: name.into(),
            value,
            temporal,
            ordinal,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn temporal_type(&self) -> Option<TemporalType> {
        self.temporal
    }

    pub fn ordinal(&self) -> usize {
        self.ordinal
    }
}
