use super::{QueryLayer, Row};

use parking_lot::Mutex;
use sluice_core::{ParameterTuple, Result};
use std::sync::Arc;

/// A [`QueryLayer`] double that records every compiled statement and answers
/// with canned rows. Clones share state, so tests can keep a handle after
/// moving one clone into [`Sluice`](crate::Sluice).
#[derive(Debug, Clone, Default)]
pub struct RecordingLayer {
    inner: Arc<RecordingInner>,
}

#[derive(Debug, Default)]
struct RecordingInner {
    statements: Mutex<Vec<RecordedStatement>>,
    rows: Mutex<Vec<Row>>,
    affected: Mutex<u64>,
}

/// One statement handed to the layer at a terminal call.
#[derive(Debug, Clone)]
pub struct RecordedStatement {
    pub sql: String,
    pub params: Vec<ParameterTuple>,
}

impl RecordingLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows every `query` call answers with.
    pub fn with_rows(rows: Vec<Row>) -> Self {
        let layer = Self::new();
        *layer.inner.rows.lock() = rows;
        layer
    }

    /// Affected-row count every `execute` call answers with.
    pub fn set_affected(&self, affected: u64) {
        *self.inner.affected.lock() = affected;
    }

    pub fn statements(&self) -> Vec<RecordedStatement> {
        self.inner.statements.lock().clone()
    }

    pub fn last(&self) -> Option<RecordedStatement> {
        self.inner.statements.lock().last().cloned()
    }

    fn record(&self, sql: &str, params: &[ParameterTuple]) {
        self.inner.statements.lock().push(RecordedStatement {
            sql: sql.to_string(),
            params: params.to_vec(),
        });
    }
}

impl QueryLayer for RecordingLayer {
    fn execute(&self, sql: &str, params: &[ParameterTuple]) -> Result<u64> {
        self.record(sql, params);
        Ok(*self.inner.affected.lock())
    }

    fn query(&self, sql: &str, params: &[ParameterTuple]) -> Result<Vec<Row>> {
        self.record(sql, params);
        Ok(self.inner.rows.lock().clone())
    }
}
