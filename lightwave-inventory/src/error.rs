//! Error types for the lightwave-inventory crate.

/// Errors from resolving a device inventory.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// Reading a local inventory file failed
    #[error("Failed to read inventory file: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML inventory file could not be parsed
    #[error("Failed to parse YAML inventory: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A cloud API request failed
    #[error("Cloud request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The cloud profile contained no estate/location/zone to walk
    #[error("Cloud profile has no usable topology: {0}")]
    EmptyTopology(String),

    /// A room or device identifier did not parse
    #[error("Invalid identifier in inventory: {0:?}")]
    InvalidIdentifier(String),
}

/// Convenience type alias for Results using InventoryError.
pub type Result<T> = std::result::Result<T, InventoryError>;
