use super::{Error, ErrorKind};

/// Error when the connector state machine is violated: a predicate emitted
/// without a pending connector slot, or `and()` / `or()` with nothing to
/// connect. Silent connector insertion is rejected by design.
#[derive(Debug)]
pub(super) struct MisplacedConnectorError {
    context: Box<str>,
}

impl Error {
    pub fn misplaced_connector(context: impl Into<String>) -> Error {
        Error::from(ErrorKind::MisplacedConnector(MisplacedConnectorError {
            context: context.into().into_boxed_str(),
        }))
    }
}

impl std::error::Error for MisplacedConnectorError {}

impl core::fmt::Display for MisplacedConnectorError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "misplaced connector: {}", self.context)
    }
}
