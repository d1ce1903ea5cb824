pub mod db;
pub use db::Sluice;

pub mod layer;
pub use layer::{FromRow, QueryLayer, RecordedStatement, RecordingLayer, Row};

mod macros;

pub mod stream;
pub use stream::QueryStream;

pub use sluice_core::{
    AggregateFunction, Entity, EntityDescriptor, Error, FieldDescriptor, FieldKind, Getter,
    ParameterTuple, ResolverCaches, Result, SiteToken, TemporalType, Value,
};
pub use sluice_sql::{Cmp, Flavor, JoinKind};
