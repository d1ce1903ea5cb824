use crate::tuple::TemporalType;

/// How a field participates in queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A plain column-backed value.
    Scalar,
    /// An embedded object whose columns live on the owning entity's table.
    Embedded,
    /// A joined collection of another entity.
    Collection,
}

/// Per-field query metadata declared by the `entity!` macro.
#[derive(Debug)]
pub struct FieldDescriptor {
    accessor: &'static str,
    property: Option<&'static str>,
    column: Option<&'static str>,
    kind: FieldKind,
    temporal: Option<TemporalType>,
}

impl FieldDescriptor {
    pub fn new(accessor: &'static str) -> Self {
        FieldDescriptor {
            accessor,
            property: None,
            column: None,
            kind: FieldKind::Scalar,
            temporal: None,
        }
    }

    pub fn embedded(mut self) -> Self {
        self.kind = FieldKind::Embedded;
        self
    }

    pub fn collection(mut self) -> Self {
        self.kind = FieldKind::Collection;
        self
    }

    pub fn temporal(mut self, temporal: TemporalType) -> Self {
        self.temporal = Some(temporal);
        self
    }

    pub fn with_property(mut self, property: &'static str) -> Self {
        self.property = Some(property);
        self
    }

    pub fn with_column(mut self, column: &'static str) -> Self {
        self.column = Some(column);
        self
    }

    pub fn accessor(&self) -> &'static str {
        self.accessor
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn temporal_type(&self) -> Option<TemporalType> {
        self.temporal
    }

    pub(crate) fn property_override(&self) -> Option<&'static str> {
        self.property
    }

    pub(crate) fn column_override(&self) -> Option<&'static str> {
        self.column
    }
}
