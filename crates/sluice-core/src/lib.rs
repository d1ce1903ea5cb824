mod error;
pub use error::Error;

pub mod schema;
pub use schema::{Entity, EntityDescriptor, FieldDescriptor, FieldKind};

pub mod tuple;
pub use tuple::{
    AggregateFunction, AggregateTuple, CounterTuple, EmbeddedTuple, ParameterTuple, QueryTuple,
    SuffixTuple, TemporalType, Value,
};

pub mod resolve;
pub use resolve::{Getter, ResolverCaches, SiteToken};

/// A Result type alias that uses Sluice's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
