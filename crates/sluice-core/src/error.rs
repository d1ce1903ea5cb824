mod adhoc;
mod field_not_resolvable;
mod invalid_statement;
mod misplaced_connector;
mod type_conversion;
mod unbalanced_brackets;

use adhoc::AdhocError;
use field_not_resolvable::FieldNotResolvableError;
use invalid_statement::InvalidStatementError;
use misplaced_connector::MisplacedConnectorError;
use std::sync::Arc;
use type_conversion::TypeConversionError;
use unbalanced_brackets::UnbalancedBracketsError;

/// Return early with an ad-hoc [`Error`] built from format arguments.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Create an ad-hoc [`Error`] from format arguments.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur while compiling or resolving a query.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorKind>,
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    FieldNotResolvable(FieldNotResolvableError),
    InvalidStatement(InvalidStatementError),
    MisplacedConnector(MisplacedConnectorError),
    TypeConversion(TypeConversionError),
    UnbalancedBrackets(UnbalancedBracketsError),
}

impl Error {
    pub fn from_args(args: core::fmt::Arguments<'_>) -> Error {
        Error::from(ErrorKind::Adhoc(AdhocError::new(args)))
    }

    /// True if the error is a failed accessor resolution.
    pub fn is_field_not_resolvable(&self) -> bool {
        matches!(&*self.inner, ErrorKind::FieldNotResolvable(_))
    }

    /// True if the error is a bracket well-formedness violation.
    pub fn is_unbalanced_brackets(&self) -> bool {
        matches!(&*self.inner, ErrorKind::UnbalancedBrackets(_))
    }

    /// True if the error is a connector-state violation.
    pub fn is_misplaced_connector(&self) -> bool {
        matches!(&*self.inner, ErrorKind::MisplacedConnector(_))
    }

    /// True if the error is a statement/terminal misuse.
    pub fn is_invalid_statement(&self) -> bool {
        matches!(&*self.inner, ErrorKind::InvalidStatement(_))
    }

    /// True if the error is a row-mapping conversion failure.
    pub fn is_type_conversion(&self) -> bool {
        matches!(&*self.inner, ErrorKind::TypeConversion(_))
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &*self.inner {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match &*self.inner {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            FieldNotResolvable(err) => core::fmt::Display::fmt(err, f),
            InvalidStatement(err) => core::fmt::Display::fmt(err, f),
            MisplacedConnector(err) => core::fmt::Display::fmt(err, f),
            TypeConversion(err) => core::fmt::Display::fmt(err, f),
            UnbalancedBrackets(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if f.alternate() {
            f.debug_struct("Error").field("kind", &self.inner).finish()
        } else {
            core::fmt::Display::fmt(self, f)
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Arc::new(kind),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_size() {
        // Ensure Error stays at one word (size of pointer/Arc)
        let expected_size = core::mem::size_of::<usize>();
        assert_eq!(expected_size, core::mem::size_of::<Error>());
    }

    #[test]
    fn error_from_args() {
        let err = Error::from_args(format_args!("test error: {}", 42));
        assert_eq!(err.to_string(), "test error: 42");
    }

    #[test]
    fn anyhow_bridge() {
        let anyhow_err = anyhow::anyhow!("something failed");
        let our_err: Error = anyhow_err.into();
        assert_eq!(our_err.to_string(), "something failed");
    }

    #[test]
    fn field_not_resolvable_display() {
        let err = Error::field_not_resolvable("Person", "middle_name");
        assert!(err.is_field_not_resolvable());
        assert_eq!(
            err.to_string(),
            "field not resolvable: Person has no accessor `middle_name`"
        );
    }

    #[test]
    fn unbalanced_brackets_display() {
        let err = Error::unbalanced_brackets("close without matching open");
        assert!(err.is_unbalanced_brackets());
        assert_eq!(
            err.to_string(),
            "unbalanced brackets: close without matching open"
        );
    }

    #[test]
    fn misplaced_connector_display() {
        let err = Error::misplaced_connector("and() with nothing to connect");
        assert!(err.is_misplaced_connector());
        assert_eq!(
            err.to_string(),
            "misplaced connector: and() with nothing to connect"
        );
    }

    #[test]
    fn type_conversion_display() {
        let err = Error::type_conversion("I64", "String");
        assert!(err.is_type_conversion());
        assert_eq!(err.to_string(), "cannot convert I64 to String");
    }
}
