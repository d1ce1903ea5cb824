use super::TemporalType;

use std::any::TypeId;
use std::borrow::Cow;
use std::sync::OnceLock;

/// A resolved accessor: the (entity, field) pair an accessor token denotes,
/// plus the alias the field is qualified with inside one compiled query.
///
/// Cached instances are per-call-site prototypes whose alias cell is never
/// touched; streams work on per-query clones obtained via [`for_query`].
///
/// [`for_query`]: QueryTuple::for_query
#[derive(Debug)]
pub struct QueryTuple {
    entity: &'static str,
    type_id: TypeId,
    accessor: Cow<'static, str>,
    property: String,
    column: String,
    temporal: Option<TemporalType>,
    alias: OnceLock<String>,
}

impl QueryTuple {
    pub fn new(
        entity: &'static str,
        type_id: TypeId,
        accessor: Cow<'static, str>,
        property: String,
        column: String,
        temporal: Option<TemporalType>,
    ) -> Self {
        QueryTuple {
            entity,
            type_id,
            accessor,
            property,
            column,
            temporal,
            alias: OnceLock::new(),
        }
    }

    /// Clone this prototype for use inside one compiled query. The clone has
    /// a fresh, unset alias cell; the prototype's cell stays untouched.
    pub fn for_query(&self) -> QueryTuple {
        QueryTuple {
            entity: self.entity,
            type_id: self.type_id,
            accessor: self.accessor.clone(),
            property: self.property.clone(),
            column: self.column.clone(),
            temporal: self.temporal,
            alias: OnceLock::new(),
        }
    }

    pub fn entity(&self) -> &'static str {
        self.entity
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn accessor(&self) -> &str {
        &self.accessor
    }

    /// The resolved property name (JPQL flavor).
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The resolved column name (SQL flavor).
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn temporal_type(&self) -> Option<TemporalType> {
        self.temporal
    }

    /// The alias assigned to this tuple, if one has been assigned yet.
    pub fn alias(&self) -> Option<&str> {
        self.alias.get().map(String::as_str)
    }

    /// Assign-once alias access: the first caller's value wins and every
    /// later call observes it unchanged.
    pub fn alias_or_init(&self, init: impl FnOnce() -> String) -> &str {
        self.alias.get_or_init(init)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuple() -> QueryTuple {
        QueryTuple::new(
            "Person",
            TypeId::of::<()>(),
            Cow::Borrowed("last_name"),
            "lastName".to_string(),
            "last_name".to_string(),
            None,
        )
    }

    #[test]
    fn alias_assigns_once() {
        let tuple = tuple();
        assert_eq!(tuple.alias(), None);
        assert_eq!(tuple.alias_or_init(|| "c0".to_string()), "c0");
        // Second initializer is discarded.
        assert_eq!(tuple.alias_or_init(|| "c9".to_string()), "c0");
        assert_eq!(tuple.alias(), Some("c0"));
    }

    #[test]
    fn for_query_leaves_prototype_alias_unset() {
        let prototype = tuple();
        let clone = prototype.for_query();
        clone.alias_or_init(|| "c1".to_string());
        assert_eq!(prototype.alias(), None);
        assert_eq!(clone.alias(), Some("c1"));
    }
}
