mod query_layer;
pub use query_layer::QueryLayer;

mod recording;
pub use recording::{RecordedStatement, RecordingLayer};

mod row;
pub use row::{FromRow, Row};
