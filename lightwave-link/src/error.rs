//! Error types for the lightwave-link crate.

/// Errors from transaction registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A transaction id was registered while it still had a pending entry
    #[error("Transaction {0} already has a pending entry")]
    DuplicateTransaction(u32),
}

/// Errors that can occur on the link.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// A socket operation failed
    #[error("Socket error: {0}")]
    Io(#[from] std::io::Error),

    /// A registry operation failed
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// The dispatch queue was at capacity and the command was dropped
    #[error("Dispatch queue is full, command dropped")]
    QueueFull,

    /// The link shut down before the command reached a terminal outcome
    #[error("Link shut down before the command completed")]
    Closed,
}

/// Convenience type alias for Results using LinkError.
pub type Result<T> = std::result::Result<T, LinkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = RegistryError::DuplicateTransaction(7);
        assert_eq!(error.to_string(), "Transaction 7 already has a pending entry");

        let error = LinkError::QueueFull;
        assert_eq!(error.to_string(), "Dispatch queue is full, command dropped");

        let error = LinkError::Closed;
        assert!(error.to_string().contains("shut down"));
    }

    #[test]
    fn test_error_conversion_from_registry_error() {
        let error: LinkError = RegistryError::DuplicateTransaction(3).into();
        assert!(matches!(error, LinkError::Registry(_)));
    }
}
