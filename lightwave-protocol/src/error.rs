//! Error types for the lightwave-protocol crate.

/// Errors from building a command string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// Room identifiers must be positive integers
    #[error("Invalid room id: {0} (must be a positive integer)")]
    InvalidRoomId(u32),

    /// Device identifiers must be positive integers
    #[error("Invalid device id: {0} (must be a positive integer)")]
    InvalidDeviceId(u32),

    /// Dim percentages are expressed as 0-100
    #[error("Invalid dim percentage: {0} (must be 0-100)")]
    InvalidDimPercent(u8),
}

/// Errors from decoding an inbound datagram.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The datagram was not valid UTF-8
    #[error("Datagram is not valid UTF-8")]
    NotUtf8,

    /// A legacy response had no comma separating transaction id and content
    #[error("Legacy response has no transaction delimiter: {0:?}")]
    MissingDelimiter(String),

    /// The transaction field did not parse as an integer
    #[error("Invalid transaction id: {0:?}")]
    InvalidTransactionId(String),

    /// A structured response was not a valid JSON document
    #[error("Invalid structured response: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// A structured response had no usable sequence field
    #[error("Structured response is missing the `trans` sequence field")]
    MissingSequenceField,

    /// An energy report did not have the expected four numeric fields
    #[error("Malformed energy report: {0:?}")]
    MalformedEnergyReport(String),
}
