mod entity;
pub use entity::{Entity, EntityDescriptor};

mod field;
pub use field::{FieldDescriptor, FieldKind};

mod name;
pub use name::{property_name, DEFAULT_ALIAS_PREFIX};
