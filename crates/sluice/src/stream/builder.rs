use super::kind::{ConnectorState, StatementKind, StreamKind};
use super::shared::Shared;
use super::sub::SubStream;

use indexmap::IndexSet;
use sluice_core::{
    AggregateFunction, AggregateTuple, EmbeddedTuple, EntityDescriptor, Error, ParameterTuple,
    QueryTuple, Result, Value,
};
use sluice_sql::{fragment, Cmp, Flavor, Pattern};

use std::mem;
use std::rc::Rc;

/// The untyped compiler core behind [`QueryStream`](super::QueryStream).
///
/// Three ordered text segments: head (statement verb + source + root alias,
/// plus flushed join clauses), body (SET and WHERE text in call order), tail
/// (ORDER BY / GROUP BY / HAVING in call order). The final text is
/// head ++ body ++ tail, recomputed on demand at the terminal call.
pub(crate) struct StreamCore {
    pub(crate) stmt: StatementKind,
    pub(crate) kind: StreamKind,
    entity: &'static EntityDescriptor,
    pub(crate) alias: String,
    embedded_prefix: Option<String>,
    projection: Option<String>,
    aggregates: IndexSet<AggregateTuple>,
    pub(crate) joins: Vec<String>,
    pub(crate) body: String,
    tail: String,
    tail_last: Option<TailKind>,
    set_count: usize,
    where_emitted: bool,
    pub(crate) state: ConnectorState,
    pub(crate) depth: usize,
    pub(crate) children: Vec<SubStream>,
    pub(crate) shared: Rc<Shared>,
}

#[derive(Clone, Copy, PartialEq)]
enum TailKind {
    OrderBy,
    GroupBy,
    Having,
}

impl StreamCore {
    pub(crate) fn new_root(
        shared: Rc<Shared>,
        stmt: StatementKind,
        entity: &'static EntityDescriptor,
        alias: Option<String>,
    ) -> Self {
        let alias = alias.unwrap_or_else(|| shared.mint_alias());
        shared.register_alias(entity.type_id(), alias.clone());
        Self::build(shared, stmt, StreamKind::Root, entity, alias, None)
    }

    /// A join, embedded, or sub-select child. Join and sub-select children
    /// carry a freshly minted alias that is deliberately not registered in
    /// the session alias table, so two children over the same entity type
    /// never share one.
    pub(crate) fn new_child(
        shared: Rc<Shared>,
        kind: StreamKind,
        entity: &'static EntityDescriptor,
        alias: String,
        embedded_prefix: Option<String>,
    ) -> Self {
        Self::build(shared, StatementKind::Select, kind, entity, alias, embedded_prefix)
    }

    fn build(
        shared: Rc<Shared>,
        stmt: StatementKind,
        kind: StreamKind,
        entity: &'static EntityDescriptor,
        alias: String,
        embedded_prefix: Option<String>,
    ) -> Self {
        StreamCore {
            stmt,
            kind,
            entity,
            alias,
            embedded_prefix,
            projection: None,
            aggregates: IndexSet::new(),
            joins: Vec::new(),
            body: String::new(),
            tail: String::new(),
            tail_last: None,
            set_count: 0,
            where_emitted: false,
            state: ConnectorState::Fresh,
            depth: 0,
            children: Vec::new(),
            shared,
        }
    }

    fn flavor(&self) -> Flavor {
        self.shared.flavor
    }

    /// The alias qualifying a touched field: the stream's own alias when the
    /// field's owner is the stream's entity, else the session table's alias
    /// for that type. Inside a child this is what lets a joined row's column
    /// compare against the parent row's column without a spurious alias.
    fn alias_of(&self, tuple: &QueryTuple) -> String {
        if tuple.type_id() == self.entity.type_id() {
            self.alias.clone()
        } else {
            self.shared.alias_for(tuple.type_id())
        }
    }

    /// The flavor-resolved field path, with the embedded prefix applied to
    /// the stream's own fields.
    pub(crate) fn field_text(&self, tuple: &QueryTuple) -> String {
        match &self.embedded_prefix {
            Some(prefix) if tuple.type_id() == self.entity.type_id() => {
                let embedded = EmbeddedTuple::new(prefix.clone(), tuple.for_query());
                match self.flavor() {
                    Flavor::Jpql => embedded.property(),
                    Flavor::Sql => embedded.column(),
                }
            }
            _ => match self.flavor() {
                Flavor::Jpql => tuple.property().to_string(),
                Flavor::Sql => self
                    .shared
                    .layer
                    .column_name(tuple.entity(), tuple.column()),
            },
        }
    }

    fn resolve_parts(&self, tuple: &QueryTuple) -> (String, String) {
        let alias = tuple.alias_or_init(|| self.alias_of(tuple)).to_string();
        (alias, self.field_text(tuple))
    }

    // --- connector / bracket state machine ---

    pub(crate) fn guard_predicate(&self) -> Result<()> {
        if matches!(self.kind, StreamKind::Root | StreamKind::SubSelect) && !self.where_emitted {
            return Err(Error::invalid_statement("predicate emitted before where()"));
        }
        if self.state == ConnectorState::AfterPredicate {
            return Err(Error::misplaced_connector(
                "predicate follows a predicate without and() or or()",
            ));
        }
        Ok(())
    }

    pub(crate) fn note_predicate(&mut self) {
        self.state = ConnectorState::AfterPredicate;
    }

    pub(crate) fn where_(&mut self) -> Result<()> {
        if !matches!(self.kind, StreamKind::Root | StreamKind::SubSelect) {
            return Err(Error::invalid_statement(
                "where() inside a join or embedded stream",
            ));
        }
        if self.where_emitted {
            return Err(Error::invalid_statement("where() called twice"));
        }
        self.body.push_str(" WHERE ");
        self.where_emitted = true;
        Ok(())
    }

    pub(crate) fn and(&mut self) -> Result<()> {
        self.connector(" AND ", "and() with nothing to connect")
    }

    pub(crate) fn or(&mut self) -> Result<()> {
        self.connector(" OR ", "or() with nothing to connect")
    }

    fn connector(&mut self, text: &str, context: &str) -> Result<()> {
        if self.state != ConnectorState::AfterPredicate {
            return Err(Error::misplaced_connector(context));
        }
        self.body.push_str(text);
        self.state = ConnectorState::Fresh;
        Ok(())
    }

    pub(crate) fn open_bracket(&mut self) -> Result<()> {
        self.guard_predicate()?;
        self.body.push('(');
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn close_bracket(&mut self) -> Result<()> {
        if self.depth == 0 {
            return Err(Error::unbalanced_brackets("close without matching open"));
        }
        if self.state != ConnectorState::AfterPredicate {
            return Err(Error::unbalanced_brackets(
                "bracket closed before any predicate",
            ));
        }
        self.body.push(')');
        self.depth -= 1;
        Ok(())
    }

    // --- predicate emission ---

    pub(crate) fn push_comparison(
        &mut self,
        tuple: &QueryTuple,
        cmp: Cmp,
        value: Value,
    ) -> Result<()> {
        self.guard_predicate()?;
        let (alias, field) = self.resolve_parts(tuple);
        let param = self
            .shared
            .register_param(tuple.property(), value, tuple.temporal_type());
        fragment::comparison(&mut self.body, self.shared.flavor, &alias, &field, cmp, &param);
        self.note_predicate();
        Ok(())
    }

    pub(crate) fn push_field_comparison(
        &mut self,
        lhs: &QueryTuple,
        cmp: Cmp,
        rhs: &QueryTuple,
    ) -> Result<()> {
        self.guard_predicate()?;
        let (lhs_alias, lhs_field) = self.resolve_parts(lhs);
        let (rhs_alias, rhs_field) = self.resolve_parts(rhs);
        fragment::field_comparison(
            &mut self.body,
            self.shared.flavor,
            &lhs_alias,
            &lhs_field,
            cmp,
            &rhs_alias,
            &rhs_field,
        );
        self.note_predicate();
        Ok(())
    }

    pub(crate) fn push_like(
        &mut self,
        tuple: &QueryTuple,
        pattern: Pattern,
        value: &str,
    ) -> Result<()> {
        self.guard_predicate()?;
        let (alias, field) = self.resolve_parts(tuple);
        let param = self.shared.register_param(
            tuple.property(),
            Value::String(pattern.apply(value)),
            tuple.temporal_type(),
        );
        fragment::like(&mut self.body, self.shared.flavor, &alias, &field, &param);
        self.note_predicate();
        Ok(())
    }

    pub(crate) fn push_is_null(&mut self, tuple: &QueryTuple, negate: bool) -> Result<()> {
        self.guard_predicate()?;
        let (alias, field) = self.resolve_parts(tuple);
        fragment::is_null(&mut self.body, self.shared.flavor, &alias, &field, negate);
        self.note_predicate();
        Ok(())
    }

    pub(crate) fn push_in_params(
        &mut self,
        tuple: &QueryTuple,
        values: Vec<Value>,
        negate: bool,
    ) -> Result<()> {
        self.guard_predicate()?;
        if values.is_empty() {
            return Err(Error::invalid_statement("in() over an empty sequence"));
        }
        let (alias, field) = self.resolve_parts(tuple);
        let params: Vec<String> = values
            .into_iter()
            .map(|value| {
                self.shared
                    .register_param(tuple.property(), value, tuple.temporal_type())
            })
            .collect();
        fragment::in_params(
            &mut self.body,
            self.shared.flavor,
            &alias,
            &field,
            &params,
            negate,
        );
        self.note_predicate();
        Ok(())
    }

    pub(crate) fn push_in_subquery(
        &mut self,
        tuple: &QueryTuple,
        subquery: &str,
        negate: bool,
    ) -> Result<()> {
        self.guard_predicate()?;
        let (alias, field) = self.resolve_parts(tuple);
        fragment::in_subquery(
            &mut self.body,
            self.shared.flavor,
            &alias,
            &field,
            subquery,
            negate,
        );
        self.note_predicate();
        Ok(())
    }

    pub(crate) fn push_set(&mut self, tuple: &QueryTuple, value: Value) -> Result<()> {
        if self.stmt != StatementKind::Update {
            return Err(Error::invalid_statement("set() on a non-update stream"));
        }
        if self.where_emitted {
            return Err(Error::invalid_statement("set() after where()"));
        }
        let (alias, field) = self.resolve_parts(tuple);
        let param = self
            .shared
            .register_param(tuple.property(), value, tuple.temporal_type());
        fragment::set_clause(
            &mut self.body,
            self.shared.flavor,
            self.set_count == 0,
            &alias,
            &field,
            &param,
        );
        self.set_count += 1;
        Ok(())
    }

    // --- projection / aggregates / tail ---

    pub(crate) fn set_projection(&mut self, tuple: &QueryTuple) -> Result<()> {
        if self.stmt != StatementKind::Select {
            return Err(Error::invalid_statement("select() on a non-select stream"));
        }
        let (alias, field) = self.resolve_parts(tuple);
        let mut text = String::new();
        fragment::qualified(&mut text, self.shared.flavor, &alias, &field);
        self.projection = Some(text);
        Ok(())
    }

    /// Idempotent on (field, function): a duplicate aggregate under a
    /// different output alias is rejected by the set.
    pub(crate) fn push_aggregate(
        &mut self,
        tuple: &QueryTuple,
        function: AggregateFunction,
        output_alias: Option<String>,
    ) -> Result<()> {
        if self.stmt != StatementKind::Select {
            return Err(Error::invalid_statement("aggregate() on a non-select stream"));
        }
        let (_, field) = self.resolve_parts(tuple);
        self.aggregates
            .insert(AggregateTuple::new(field, function, output_alias));
        Ok(())
    }

    pub(crate) fn push_order_by(&mut self, tuple: &QueryTuple, descending: bool) -> Result<()> {
        let (alias, field) = self.resolve_parts(tuple);
        self.tail_lead(TailKind::OrderBy, " ORDER BY ");
        fragment::qualified(&mut self.tail, self.shared.flavor, &alias, &field);
        if descending {
            self.tail.push_str(" DESC");
        }
        Ok(())
    }

    pub(crate) fn push_group_by(&mut self, tuple: &QueryTuple) -> Result<()> {
        let (alias, field) = self.resolve_parts(tuple);
        self.tail_lead(TailKind::GroupBy, " GROUP BY ");
        fragment::qualified(&mut self.tail, self.shared.flavor, &alias, &field);
        Ok(())
    }

    pub(crate) fn push_having(
        &mut self,
        function: AggregateFunction,
        tuple: &QueryTuple,
        cmp: Cmp,
        value: Value,
    ) -> Result<()> {
        let (alias, field) = self.resolve_parts(tuple);
        let param = self
            .shared
            .register_param(tuple.property(), value, tuple.temporal_type());
        match self.tail_last {
            Some(TailKind::Having) => self.tail.push_str(" AND "),
            _ => self.tail.push_str(" HAVING "),
        }
        self.tail_last = Some(TailKind::Having);
        fragment::having(
            &mut self.tail,
            self.shared.flavor,
            &alias,
            &field,
            function,
            cmp,
            &param,
        );
        Ok(())
    }

    fn tail_lead(&mut self, kind: TailKind, keyword: &str) {
        if self.tail_last == Some(kind) {
            self.tail.push_str(", ");
        } else {
            self.tail.push_str(keyword);
        }
        self.tail_last = Some(kind);
    }

    // --- finalize ---

    /// Flush every still-prepared child into this stream, in creation order.
    pub(crate) fn flush_children(&mut self) -> Result<()> {
        let mut children = mem::take(&mut self.children);
        for child in &mut children {
            child.flush_into(self)?;
        }
        Ok(())
    }

    fn render_head(&self, count: bool) -> String {
        let flavor = self.shared.flavor;
        let source = match flavor {
            Flavor::Jpql => self.entity.name().to_string(),
            Flavor::Sql => self
                .shared
                .layer
                .table_name(self.entity.name(), self.entity.table()),
        };

        let mut head = String::new();
        match self.stmt {
            StatementKind::Select => {
                let projection = if count {
                    format!("COUNT({})", self.alias)
                } else if !self.aggregates.is_empty() {
                    let mut text = String::new();
                    for (i, aggregate) in self.aggregates.iter().enumerate() {
                        if i > 0 {
                            text.push_str(", ");
                        }
                        fragment::aggregate(&mut text, flavor, &self.alias, aggregate);
                    }
                    text
                } else if let Some(projection) = &self.projection {
                    projection.clone()
                } else {
                    self.alias.clone()
                };
                fragment::select_head(&mut head, flavor, &projection, &source, &self.alias);
            }
            StatementKind::Update => fragment::update_head(&mut head, flavor, &source, &self.alias),
            StatementKind::Delete => fragment::delete_head(&mut head, flavor, &source, &self.alias),
        }

        for join in &self.joins {
            head.push(' ');
            head.push_str(join);
        }
        head
    }

    /// Recompute the full text: flush children, validate well-formedness,
    /// concatenate head ++ body ++ tail.
    pub(crate) fn render(&mut self, count: bool) -> Result<String> {
        self.flush_children()?;

        if self.depth != 0 {
            return Err(Error::unbalanced_brackets("bracket left open at finalize"));
        }
        if self.where_emitted && self.state == ConnectorState::Fresh {
            return Err(Error::misplaced_connector(
                "where clause ends without a predicate",
            ));
        }

        let mut sql = self.render_head(count);
        sql.push_str(&self.body);
        sql.push_str(&self.tail);
        Ok(sql)
    }

    pub(crate) fn finalize(&mut self, count: bool) -> Result<(String, Vec<ParameterTuple>)> {
        let sql = self.render(count)?;
        let params = self.shared.params_snapshot();
        tracing::debug!(
            target: "sluice::stream",
            sql = %sql,
            params = params.len(),
            "finalized statement"
        );
        Ok((sql, params))
    }
}
