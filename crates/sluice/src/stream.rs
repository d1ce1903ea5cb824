mod builder;
use builder::StreamCore;

mod kind;
pub use kind::{StatementKind, StreamKind};

mod shared;
use shared::Shared;

mod sub;
use sub::{JoinSpec, SubStream};

use crate::layer::{FromRow, QueryLayer, Row};

use sluice_core::{
    AggregateFunction, Entity, Error, FieldKind, Getter, QueryTuple, ResolverCaches, Result, Value,
};
use sluice_sql::{Cmp, Flavor, JoinKind, Pattern};

use std::marker::PhantomData;
use std::rc::Rc;
use std::sync::Arc;

/// The chainable object accumulating query text and parameters.
///
/// Predicate methods resolve their accessor arguments through the session's
/// caches and append text incrementally; a terminal call flushes pending
/// sub-streams, concatenates the buffers, and hands the compiled text plus
/// parameter list to the query layer.
pub struct QueryStream<M> {
    core: StreamCore,
    _marker: PhantomData<fn() -> M>,
}

impl<M> std::fmt::Debug for QueryStream<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryStream").finish_non_exhaustive()
    }
}

impl<M: Entity> QueryStream<M> {
    pub(crate) fn root_with(
        layer: Arc<dyn QueryLayer>,
        caches: ResolverCaches,
        flavor: Flavor,
        stmt: StatementKind,
        alias: Option<String>,
    ) -> Self {
        let shared = Shared::new(layer, caches, flavor);
        Self::wrap(StreamCore::new_root(shared, stmt, M::descriptor(), alias))
    }

    fn child(
        shared: Rc<Shared>,
        kind: StreamKind,
        alias: String,
        embedded_prefix: Option<String>,
    ) -> Self {
        Self::wrap(StreamCore::new_child(
            shared,
            kind,
            M::descriptor(),
            alias,
            embedded_prefix,
        ))
    }

    fn wrap(core: StreamCore) -> Self {
        QueryStream {
            core,
            _marker: PhantomData,
        }
    }

    fn resolved<E: Entity, T>(&self, getter: &Getter<E, T>) -> Result<QueryTuple> {
        Ok(getter.resolve(&self.core.shared.caches)?.for_query())
    }

    // --- the WHERE section and connectors ---

    pub fn where_(mut self) -> Result<Self> {
        self.core.where_()?;
        Ok(self)
    }

    pub fn and(mut self) -> Result<Self> {
        self.core.and()?;
        Ok(self)
    }

    pub fn or(mut self) -> Result<Self> {
        self.core.or()?;
        Ok(self)
    }

    pub fn open_bracket(mut self) -> Result<Self> {
        self.core.open_bracket()?;
        Ok(self)
    }

    pub fn close_bracket(mut self) -> Result<Self> {
        self.core.close_bracket()?;
        Ok(self)
    }

    // --- binary and unary predicates ---

    pub fn equal<E: Entity, T>(self, getter: Getter<E, T>, value: impl Into<Value>) -> Result<Self> {
        self.comparison(getter, Cmp::Eq, value)
    }

    pub fn not_equal<E: Entity, T>(
        self,
        getter: Getter<E, T>,
        value: impl Into<Value>,
    ) -> Result<Self> {
        self.comparison(getter, Cmp::Ne, value)
    }

    pub fn less<E: Entity, T>(self, getter: Getter<E, T>, value: impl Into<Value>) -> Result<Self> {
        self.comparison(getter, Cmp::Lt, value)
    }

    pub fn less_or_equal<E: Entity, T>(
        self,
        getter: Getter<E, T>,
        value: impl Into<Value>,
    ) -> Result<Self> {
        self.comparison(getter, Cmp::Le, value)
    }

    pub fn greater<E: Entity, T>(
        self,
        getter: Getter<E, T>,
        value: impl Into<Value>,
    ) -> Result<Self> {
        self.comparison(getter, Cmp::Gt, value)
    }

    pub fn greater_or_equal<E: Entity, T>(
        self,
        getter: Getter<E, T>,
        value: impl Into<Value>,
    ) -> Result<Self> {
        self.comparison(getter, Cmp::Ge, value)
    }

    fn comparison<E: Entity, T>(
        mut self,
        getter: Getter<E, T>,
        cmp: Cmp,
        value: impl Into<Value>,
    ) -> Result<Self> {
        let tuple = self.resolved(&getter)?;
        self.core.push_comparison(&tuple, cmp, value.into())?;
        Ok(self)
    }

    pub fn equal_field<L: Entity, R: Entity, T>(
        self,
        lhs: Getter<L, T>,
        rhs: Getter<R, T>,
    ) -> Result<Self> {
        self.field_comparison(lhs, Cmp::Eq, rhs)
    }

    pub fn not_equal_field<L: Entity, R: Entity, T>(
        self,
        lhs: Getter<L, T>,
        rhs: Getter<R, T>,
    ) -> Result<Self> {
        self.field_comparison(lhs, Cmp::Ne, rhs)
    }

    pub fn less_field<L: Entity, R: Entity, T>(
        self,
        lhs: Getter<L, T>,
        rhs: Getter<R, T>,
    ) -> Result<Self> {
        self.field_comparison(lhs, Cmp::Lt, rhs)
    }

    pub fn less_or_equal_field<L: Entity, R: Entity, T>(
        self,
        lhs: Getter<L, T>,
        rhs: Getter<R, T>,
    ) -> Result<Self> {
        self.field_comparison(lhs, Cmp::Le, rhs)
    }

    pub fn greater_field<L: Entity, R: Entity, T>(
        self,
        lhs: Getter<L, T>,
        rhs: Getter<R, T>,
    ) -> Result<Self> {
        self.field_comparison(lhs, Cmp::Gt, rhs)
    }

    pub fn greater_or_equal_field<L: Entity, R: Entity, T>(
        self,
        lhs: Getter<L, T>,
        rhs: Getter<R, T>,
    ) -> Result<Self> {
        self.field_comparison(lhs, Cmp::Ge, rhs)
    }

    fn field_comparison<L: Entity, R: Entity, T>(
        mut self,
        lhs: Getter<L, T>,
        cmp: Cmp,
        rhs: Getter<R, T>,
    ) -> Result<Self> {
        let lhs = self.resolved(&lhs)?;
        let rhs = self.resolved(&rhs)?;
        self.core.push_field_comparison(&lhs, cmp, &rhs)?;
        Ok(self)
    }

    pub fn like<E: Entity, T>(self, getter: Getter<E, T>, pattern: impl AsRef<str>) -> Result<Self> {
        self.like_impl(getter, Pattern::Exact, pattern)
    }

    pub fn starts_with<E: Entity, T>(
        self,
        getter: Getter<E, T>,
        pattern: impl AsRef<str>,
    ) -> Result<Self> {
        self.like_impl(getter, Pattern::StartsWith, pattern)
    }

    pub fn ends_with<E: Entity, T>(
        self,
        getter: Getter<E, T>,
        pattern: impl AsRef<str>,
    ) -> Result<Self> {
        self.like_impl(getter, Pattern::EndsWith, pattern)
    }

    pub fn contains<E: Entity, T>(
        self,
        getter: Getter<E, T>,
        pattern: impl AsRef<str>,
    ) -> Result<Self> {
        self.like_impl(getter, Pattern::Contains, pattern)
    }

    fn like_impl<E: Entity, T>(
        mut self,
        getter: Getter<E, T>,
        pattern: Pattern,
        value: impl AsRef<str>,
    ) -> Result<Self> {
        let tuple = self.resolved(&getter)?;
        self.core.push_like(&tuple, pattern, value.as_ref())?;
        Ok(self)
    }

    pub fn is_null<E: Entity, T>(mut self, getter: Getter<E, T>) -> Result<Self> {
        let tuple = self.resolved(&getter)?;
        self.core.push_is_null(&tuple, false)?;
        Ok(self)
    }

    pub fn is_not_null<E: Entity, T>(mut self, getter: Getter<E, T>) -> Result<Self> {
        let tuple = self.resolved(&getter)?;
        self.core.push_is_null(&tuple, true)?;
        Ok(self)
    }

    pub fn in_list<E: Entity, T, V: Into<Value>>(
        self,
        getter: Getter<E, T>,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self> {
        self.in_list_impl(getter, values, false)
    }

    pub fn not_in_list<E: Entity, T, V: Into<Value>>(
        self,
        getter: Getter<E, T>,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self> {
        self.in_list_impl(getter, values, true)
    }

    fn in_list_impl<E: Entity, T, V: Into<Value>>(
        mut self,
        getter: Getter<E, T>,
        values: impl IntoIterator<Item = V>,
        negate: bool,
    ) -> Result<Self> {
        let tuple = self.resolved(&getter)?;
        let values = values.into_iter().map(Into::into).collect();
        self.core.push_in_params(&tuple, values, negate)?;
        Ok(self)
    }

    pub fn in_select<C: Entity, E: Entity, T>(
        self,
        getter: Getter<E, T>,
        build: impl FnOnce(QueryStream<C>) -> Result<QueryStream<C>>,
    ) -> Result<Self> {
        self.in_select_impl(getter, build, false)
    }

    pub fn not_in_select<C: Entity, E: Entity, T>(
        self,
        getter: Getter<E, T>,
        build: impl FnOnce(QueryStream<C>) -> Result<QueryStream<C>>,
    ) -> Result<Self> {
        self.in_select_impl(getter, build, true)
    }

    fn in_select_impl<C: Entity, E: Entity, T>(
        mut self,
        getter: Getter<E, T>,
        build: impl FnOnce(QueryStream<C>) -> Result<QueryStream<C>>,
        negate: bool,
    ) -> Result<Self> {
        self.core.guard_predicate()?;

        let alias = self.core.shared.mint_alias();
        let child = QueryStream::<C>::child(
            self.core.shared.clone(),
            StreamKind::SubSelect,
            alias,
            None,
        );
        let mut child = build(child)?;
        let subquery = child.core.render(false)?;

        let tuple = self.resolved(&getter)?;
        self.core.push_in_subquery(&tuple, &subquery, negate)?;
        Ok(self)
    }

    // --- joins and embedded paths ---

    pub fn join<C: Entity>(
        self,
        getter: Getter<M, C>,
        build: impl FnOnce(QueryStream<C>) -> Result<QueryStream<C>>,
    ) -> Result<Self> {
        self.join_impl(JoinKind::Inner, getter, build)
    }

    pub fn left_join<C: Entity>(
        self,
        getter: Getter<M, C>,
        build: impl FnOnce(QueryStream<C>) -> Result<QueryStream<C>>,
    ) -> Result<Self> {
        self.join_impl(JoinKind::Left, getter, build)
    }

    fn join_impl<C: Entity>(
        mut self,
        kind: JoinKind,
        getter: Getter<M, C>,
        build: impl FnOnce(QueryStream<C>) -> Result<QueryStream<C>>,
    ) -> Result<Self> {
        if self.core.kind == StreamKind::Embedded {
            return Err(Error::invalid_statement("join() inside an embedded stream"));
        }
        self.require_field_kind(&getter, FieldKind::Collection, "join() over a non-collection field")?;

        let tuple = self.resolved(&getter)?;
        let spec = JoinSpec {
            kind,
            parent_alias: self.core.alias.clone(),
            collection_field: self.core.field_text(&tuple),
        };

        let alias = self.core.shared.mint_alias();
        let child = QueryStream::<C>::child(self.core.shared.clone(), StreamKind::Join, alias, None);
        let child = build(child)?;

        self.core
            .children
            .push(SubStream::prepared(child.core, Some(spec)));
        Ok(self)
    }

    pub fn embedded<C: Entity>(
        mut self,
        getter: Getter<M, C>,
        build: impl FnOnce(QueryStream<C>) -> Result<QueryStream<C>>,
    ) -> Result<Self> {
        self.core.guard_predicate()?;
        self.require_field_kind(&getter, FieldKind::Embedded, "embedded() over a non-embedded field")?;

        let tuple = self.resolved(&getter)?;
        let prefix = self.core.field_text(&tuple);

        let child = QueryStream::<C>::child(
            self.core.shared.clone(),
            StreamKind::Embedded,
            self.core.alias.clone(),
            Some(prefix),
        );
        let child = build(child)?;

        // Caller-triggered flush: the child's text lands in our body now,
        // keeping body text in call order.
        let mut sub = SubStream::prepared(child.core, None);
        sub.flush_into(&mut self.core)?;
        self.core.note_predicate();
        Ok(self)
    }

    fn require_field_kind<E: Entity, T>(
        &self,
        getter: &Getter<E, T>,
        kind: FieldKind,
        context: &str,
    ) -> Result<()> {
        let matches = E::descriptor()
            .field(getter.accessor())
            .map(|field| field.kind() == kind)
            .unwrap_or(false);
        if matches {
            Ok(())
        } else {
            Err(Error::invalid_statement(context))
        }
    }

    /// Explicitly flush every still-prepared sub-stream, in creation order.
    /// The terminal operations do this implicitly.
    pub fn flush(mut self) -> Result<Self> {
        self.core.flush_children()?;
        Ok(self)
    }

    // --- updates ---

    pub fn set<T>(mut self, getter: Getter<M, T>, value: impl Into<Value>) -> Result<Self> {
        let tuple = self.resolved(&getter)?;
        self.core.push_set(&tuple, value.into())?;
        Ok(self)
    }

    // --- projection, aggregates, ordering ---

    pub fn select<T>(mut self, getter: Getter<M, T>) -> Result<Self> {
        let tuple = self.resolved(&getter)?;
        self.core.set_projection(&tuple)?;
        Ok(self)
    }

    pub fn aggregate<E: Entity, T>(
        mut self,
        getter: Getter<E, T>,
        function: AggregateFunction,
        output_alias: Option<&str>,
    ) -> Result<Self> {
        let tuple = self.resolved(&getter)?;
        self.core
            .push_aggregate(&tuple, function, output_alias.map(str::to_string))?;
        Ok(self)
    }

    pub fn group_by<E: Entity, T>(mut self, getter: Getter<E, T>) -> Result<Self> {
        let tuple = self.resolved(&getter)?;
        self.core.push_group_by(&tuple)?;
        Ok(self)
    }

    pub fn having<E: Entity, T>(
        mut self,
        function: AggregateFunction,
        getter: Getter<E, T>,
        cmp: Cmp,
        value: impl Into<Value>,
    ) -> Result<Self> {
        let tuple = self.resolved(&getter)?;
        self.core.push_having(function, &tuple, cmp, value.into())?;
        Ok(self)
    }

    pub fn order_by<E: Entity, T>(mut self, getter: Getter<E, T>) -> Result<Self> {
        let tuple = self.resolved(&getter)?;
        self.core.push_order_by(&tuple, false)?;
        Ok(self)
    }

    pub fn order_by_desc<E: Entity, T>(mut self, getter: Getter<E, T>) -> Result<Self> {
        let tuple = self.resolved(&getter)?;
        self.core.push_order_by(&tuple, true)?;
        Ok(self)
    }

    // --- terminal operations ---

    fn require_select(&self, op: &str) -> Result<()> {
        if self.core.stmt != StatementKind::Select {
            return Err(Error::invalid_statement(format!(
                "{op} on a non-select stream"
            )));
        }
        Ok(())
    }

    /// Compile and run a SELECT, mapping every row.
    pub fn to_list(mut self) -> Result<Vec<M>>
    where
        M: FromRow,
    {
        self.require_select("to_list()")?;
        let (sql, params) = self.core.finalize(false)?;
        let rows = self.core.shared.layer.query(&sql, &params)?;
        rows.iter().map(M::from_row).collect()
    }

    /// Compile and run a SELECT, mapping the first row if any.
    pub fn get(mut self) -> Result<Option<M>>
    where
        M: FromRow,
    {
        self.require_select("get()")?;
        let (sql, params) = self.core.finalize(false)?;
        let rows = self.core.shared.layer.query(&sql, &params)?;
        rows.first().map(M::from_row).transpose()
    }

    /// Compile and run the query with its projection wrapped in COUNT.
    pub fn count(mut self) -> Result<u64> {
        self.require_select("count()")?;
        let (sql, params) = self.core.finalize(true)?;
        let rows = self.core.shared.layer.query(&sql, &params)?;
        match rows.first().and_then(Row::first) {
            Some(Value::I64(count)) => Ok(u64::try_from(*count).unwrap_or(0)),
            Some(other) => Err(Error::type_conversion(other.type_name(), "u64")),
            None => Ok(0),
        }
    }

    /// Compile and run an UPDATE or DELETE, returning the affected-row
    /// count.
    pub fn execute(mut self) -> Result<u64> {
        if !matches!(
            self.core.stmt,
            StatementKind::Update | StatementKind::Delete
        ) {
            return Err(Error::invalid_statement("execute() on a select stream"));
        }
        let (sql, params) = self.core.finalize(false)?;
        self.core.shared.layer.execute(&sql, &params)
    }

    /// The compiled text as it stands, recomputed on demand. Pending
    /// sub-streams are flushed first.
    pub fn to_sql(mut self) -> Result<String> {
        self.core.render(false)
    }
}
