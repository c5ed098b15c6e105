//! Error types for lectern-core

use thiserror::Error;

/// Result type alias for lectern-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in lectern-core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A permission string is not part of the closed vocabulary.
    #[error("unknown permission: '{value}'")]
    UnknownPermission {
        /// The rejected string, verbatim.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_permission_display() {
        let err = Error::UnknownPermission {
            value: "__all__".to_string(),
        };
        assert_eq!(err.to_string(), "unknown permission: '__all__'");
    }
}
