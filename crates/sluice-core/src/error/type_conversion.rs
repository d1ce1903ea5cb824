use super::{Error, ErrorKind};

/// Error converting a parameter [`Value`](crate::tuple::Value) into a typed
/// Rust value during row mapping.
#[derive(Debug)]
pub(super) struct TypeConversionError {
    from: Box<str>,
    to: Box<str>,
}

impl Error {
    pub fn type_conversion(from: impl Into<String>, to: impl Into<String>) -> Error {
        Error::from(ErrorKind::TypeConversion(TypeConversionError {
            from: from.into().into_boxed_str(),
            to: to.into().into_boxed_str(),
        }))
    }
}

impl std::error::Error for TypeConversionError {}

impl core::fmt::Display for TypeConversionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot convert {} to {}", self.from, self.to)
    }
}
