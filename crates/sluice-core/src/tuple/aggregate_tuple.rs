use std::hash::{Hash, Hasher};

/// Aggregate functions usable in projections and HAVING clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl AggregateFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Avg => "AVG",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
        }
    }
}

/// One aggregate projection entry.
///
/// Equality and hashing ignore the output alias: the (field, function) pair
/// is the identity, so requesting the same aggregate twice under different
/// aliases collapses to a single entry.
#[derive(Debug, Clone)]
pub struct AggregateTuple {
    field: String,
    function: AggregateFunction,
    output_alias: Option<String>,
}

impl AggregateTuple {
    pub fn new(
        field: impl Into<String>,
        function: AggregateFunction,
        output_alias: Option<String>,
    ) -> Self {
        AggregateTuple {
            field: field.into(),
            function,
            output_alias,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn function(&self) -> AggregateFunction {
        self.function
    }

    pub fn output_alias(&self) -> Option<&str> {
        self.output_alias.as_deref()
    }
}

impl PartialEq for AggregateTuple {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.function == other.function
    }
}

impl Eq for AggregateTuple {}

impl Hash for AggregateTuple {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.field.hash(state);
        self.function.hash(state);
    }
}
