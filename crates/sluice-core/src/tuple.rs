mod aggregate_tuple;
pub use aggregate_tuple::{AggregateFunction, AggregateTuple};

mod counter_tuple;
pub use counter_tuple::CounterTuple;

mod embedded_tuple;
pub use embedded_tuple::EmbeddedTuple;

mod parameter_tuple;
pub use parameter_tuple::ParameterTuple;

mod query_tuple;
pub use query_tuple::QueryTuple;

mod suffix_tuple;
pub use suffix_tuple::SuffixTuple;

mod temporal;
pub use temporal::TemporalType;

mod value;
pub use value::Value;
