/// Which statement a stream compiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Update,
    Delete,
}

/// Where a stream sits in the session: the root, or one of the three
/// sub-stream shapes spliced into a parent at flush time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Root,
    Join,
    Embedded,
    SubSelect,
}

/// The connector state machine. Emitting a predicate requires `Fresh` and
/// moves to `AfterPredicate`; `and()` / `or()` require `AfterPredicate` and
/// move back. Silent connector insertion between consecutive predicates is
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConnectorState {
    Fresh,
    AfterPredicate,
}
