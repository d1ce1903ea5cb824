use super::QueryTuple;

/// A field reached through an embedded object. Renders as
/// `"<embeddedField>.<innerField>"` and shares the owning entity's alias
/// instead of minting one of its own.
#[derive(Debug)]
pub struct EmbeddedTuple {
    prefix: String,
    inner: QueryTuple,
}

impl EmbeddedTuple {
    pub fn new(prefix: impl Into<String>, inner: QueryTuple) -> Self {
        EmbeddedTuple {
            prefix: prefix.into(),
            inner,
        }
    }

    /// The prefixed property name, e.g. `info.cardNumber`.
    pub fn property(&self) -> String {
        format!("{}.{}", self.prefix, self.inner.property())
    }

    /// The prefixed column name, for the SQL flavor.
    pub fn column(&self) -> String {
        format!("{}.{}", self.prefix, self.inner.column())
    }

    pub fn inner(&self) -> &QueryTuple {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::any::TypeId;
    use std::borrow::Cow;

    #[test]
    fn prefixes_inner_field() {
        let inner = QueryTuple::new(
            "PersonInfo",
            TypeId::of::<()>(),
            Cow::Borrowed("card_number"),
            "cardNumber".to_string(),
            "card_number".to_string(),
            None,
        );
        let embedded = EmbeddedTuple::new("info", inner);
        assert_eq!(embedded.property(), "info.cardNumber");
        assert_eq!(embedded.column(), "info.card_number");
    }
}
