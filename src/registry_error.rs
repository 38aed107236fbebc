use thiserror::Error;

/// Errors returned by lookup operations (`get`, `get_cloned`, `contains`).
///
/// Acquisition (`acquire_with` and friends) never produces these: it either
/// reuses the stored instance or constructs one, and constructor failures
/// propagate from the caller's own error type via `try_acquire_with`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The registry lock was poisoned by a panicking thread.
    #[error("failed to acquire registry lock")]
    RegistryLock,

    /// A stored value failed to downcast to the requested type.
    ///
    /// Entries are keyed by `TypeId`, so this cannot happen through the
    /// public API; the variant exists so the downcast result does not need
    /// a panic path.
    #[error("type mismatch in registry for type: {type_name}")]
    TypeMismatch {
        /// The requested type name
        type_name: &'static str,
    },

    /// No instance has been recorded for the requested type.
    #[error("type not found in registry: {type_name}")]
    TypeNotFound {
        /// The requested type name
        type_name: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lock_display() {
        let err = RegistryError::RegistryLock;
        assert_eq!(err.to_string(), "failed to acquire registry lock");
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = RegistryError::TypeMismatch { type_name: "u8" };
        assert_eq!(err.to_string(), "type mismatch in registry for type: u8");
    }

    #[test]
    fn test_type_not_found_display() {
        let err = RegistryError::TypeNotFound {
            type_name: "alloc::string::String",
        };
        assert_eq!(
            err.to_string(),
            "type not found in registry: alloc::string::String"
        );
    }

    #[test]
    fn test_equality() {
        assert_eq!(RegistryError::RegistryLock, RegistryError::RegistryLock);
        assert_ne!(
            RegistryError::RegistryLock,
            RegistryError::TypeNotFound { type_name: "u8" }
        );
    }

    #[test]
    fn test_error_trait() {
        let err: &dyn std::error::Error = &RegistryError::TypeNotFound { type_name: "u8" };
        assert_eq!(err.to_string(), "type not found in registry: u8");
    }
}
