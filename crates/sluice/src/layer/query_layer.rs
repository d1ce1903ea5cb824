use super::Row;

use sluice_core::{ParameterTuple, Result};

use std::fmt::Debug;

/// The execution collaborator a compiled stream hands its text and
/// parameters to. Also the naming authority for the SQL flavor: layers may
/// override table/column names without touching entity declarations.
pub trait QueryLayer: Debug + Send + Sync + 'static {
    /// Run an UPDATE or DELETE statement, returning the affected-row count.
    fn execute(&self, sql: &str, params: &[ParameterTuple]) -> Result<u64>;

    /// Run a SELECT statement, returning its rows.
    fn query(&self, sql: &str, params: &[ParameterTuple]) -> Result<Vec<Row>>;

    /// The table name to render for an entity under the SQL flavor.
    fn table_name(&self, _entity: &str, table: &str) -> String {
        table.to_string()
    }

    /// The column name to render for a field under the SQL flavor.
    fn column_name(&self, _entity: &str, column: &str) -> String {
        column.to_string()
    }
}
