use super::{property_name, FieldDescriptor};

use std::any::TypeId;

/// A type that can appear as the root or joined source of a query stream.
///
/// Implemented by the `entity!` macro; the descriptor is interned once per
/// entity type and lives for the process lifetime.
pub trait Entity: Sized + 'static {
    fn descriptor() -> &'static EntityDescriptor;
}

/// Query metadata for one entity type: its entity name (used by the JPQL
/// flavor), its table name (used by the SQL flavor), and its field
/// descriptors.
#[derive(Debug)]
pub struct EntityDescriptor {
    name: &'static str,
    table: &'static str,
    type_id: TypeId,
    fields: Vec<FieldDescriptor>,
}

impl EntityDescriptor {
    pub fn new<M: 'static>(
        name: &'static str,
        table: &'static str,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        EntityDescriptor {
            name,
            table,
            type_id: TypeId::of::<M>(),
            fields,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field descriptor by its accessor name.
    pub fn field(&self, accessor: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.accessor() == accessor)
    }

    /// Look up a field descriptor by its resolved property name.
    pub fn field_by_property(&self, property: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|field| self.property_of(field) == property)
    }

    /// The property name a field renders under, honoring overrides.
    pub fn property_of(&self, field: &FieldDescriptor) -> String {
        match field.property_override() {
            Some(property) => property.to_string(),
            None => property_name(field.accessor()),
        }
    }

    /// The column name a field renders under, honoring overrides.
    pub fn column_of(&self, field: &FieldDescriptor) -> String {
        match field.column_override() {
            Some(column) => column.to_string(),
            None => field.accessor().to_string(),
        }
    }
}
