use super::{Error, ErrorKind};

/// Error when an accessor token maps to no field of its entity, by either
/// descriptor lookup or name derivation.
#[derive(Debug)]
pub(super) struct FieldNotResolvableError {
    entity: Box<str>,
    accessor: Box<str>,
}

impl Error {
    pub fn field_not_resolvable(entity: impl Into<String>, accessor: impl Into<String>) -> Error {
        Error::from(ErrorKind::FieldNotResolvable(FieldNotResolvableError {
            entity: entity.into().into_boxed_str(),
            accessor: accessor.into().into_boxed_str(),
        }))
    }
}

impl std::error::Error for FieldNotResolvableError {}

impl core::fmt::Display for FieldNotResolvableError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "field not resolvable: {} has no accessor `{}`",
            self.entity, self.accessor
        )
    }
}
