use thiserror::Error;

/// Errors raised while registering, looking up, or instantiating plugins.
///
/// None of these represent transient conditions, so nothing in the crate retries
/// on them. `Configuration`, `DuplicateRegistration`, and `TypeMismatch` signal
/// programmer errors in a plugin library and should abort library loading.
/// `NotFound` and `AmbiguousName` are ordinary lookup outcomes a caller can
/// branch on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A plugin declared malformed metadata (no primary category path, or an
    /// empty hierarchical path).
    #[error("Malformed plugin metadata for '{plugin}': {reason}")]
    Configuration { plugin: String, reason: String },

    /// Two creators derive the same category key.
    #[error("A plugin is already registered under category key '{key}'")]
    DuplicateRegistration { key: String },

    /// An exact lookup found nothing.
    #[error("No plugin is registered under '{key}'")]
    NotFound { key: String },

    /// A creator produced an object that does not satisfy the role it was
    /// registered for, or whose identity disagrees with the creator's metadata.
    #[error("Creator for '{key}' produced an object that is not a valid {expected}: {detail}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        detail: String,
    },

    /// Strict-mode unregistration of a key that is not present.
    #[error("Cannot unregister '{key}': it is not registered")]
    MissingRegistration { key: String },

    /// A plugin library with this name has already been registered.
    #[error("Plugin library '{name}' is already registered")]
    DuplicateLibrary { name: String },

    /// A short name matched more than one registered plugin.
    #[error("Name '{name}' is ambiguous; candidates: {}", candidates.join(", "))]
    AmbiguousName {
        name: String,
        candidates: Vec<String>,
    },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
