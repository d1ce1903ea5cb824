use super::builder::StreamCore;
use super::kind::ConnectorState;

use sluice_core::{Error, Result};
use sluice_sql::{fragment, JoinKind};

/// A sub-stream's flush state. PREPARED children are still buffering;
/// flushing splices their text into the parent and is one-way. Joins stay
/// prepared until the caller flushes or the parent reaches its terminal
/// call; embedded children flush at the builder-closure's return. Sub-select
/// children never queue here: they compile to a complete `(SELECT ...)`
/// fragment substituted into the parent predicate at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlushState {
    Prepared,
    Flushed,
}

/// What a join child splices into the parent's head.
pub(crate) struct JoinSpec {
    pub(crate) kind: JoinKind,
    pub(crate) parent_alias: String,
    pub(crate) collection_field: String,
}

pub(crate) struct SubStream {
    core: StreamCore,
    join: Option<JoinSpec>,
    state: FlushState,
}

impl SubStream {
    pub(crate) fn prepared(core: StreamCore, join: Option<JoinSpec>) -> Self {
        SubStream {
            core,
            join,
            state: FlushState::Prepared,
        }
    }

    /// Splice this child into its parent. Flushing twice is a no-op.
    pub(crate) fn flush_into(&mut self, parent: &mut StreamCore) -> Result<()> {
        if self.state == FlushState::Flushed {
            return Ok(());
        }
        self.state = FlushState::Flushed;

        self.core.flush_children()?;

        if self.core.depth != 0 {
            return Err(Error::unbalanced_brackets(
                "bracket left open in a sub-stream",
            ));
        }
        if !self.core.body.is_empty() && self.core.state == ConnectorState::Fresh {
            return Err(Error::misplaced_connector(
                "sub-stream ends with a dangling connector",
            ));
        }

        match &self.join {
            Some(spec) => {
                let on = if self.core.body.is_empty() {
                    None
                } else {
                    Some(self.core.body.as_str())
                };
                let mut clause = String::new();
                fragment::join_clause(
                    &mut clause,
                    parent.shared.flavor,
                    spec.kind,
                    &spec.parent_alias,
                    &spec.collection_field,
                    &self.core.alias,
                    on,
                );
                parent.joins.push(clause);
                // Joins nested inside this child surface on the parent too.
                parent.joins.append(&mut self.core.joins);
            }
            None => {
                // Embedded: the child's predicates render under the parent's
                // alias and land directly in the parent's body.
                parent.body.push_str(&self.core.body);
            }
        }

        Ok(())
    }
}
