use super::identity::{CategorySet, derive_manager_key, namespace_and_name};
use super::plugin::PluginObject;
use crate::error::{RegistryError, Result};

/// A stateless factory for one plugin type.
///
/// Creators report the identity, categories, and keywords of the type they build
/// without building anything, so requests can be evaluated against them cheaply.
/// They are immutable once constructed and shared by the registry through `Arc`.
pub trait PluginCreator: Send + Sync {
    /// Builds a brand-new, default-initialized object. Never cached.
    fn create_plugin_object(&self) -> PluginObject;

    fn plugin_object_categories(&self) -> CategorySet;

    fn plugin_object_keywords(&self) -> Vec<String> {
        Vec::new()
    }

    fn plugin_object_name(&self) -> &str;

    fn plugin_object_namespace(&self) -> &str;

    fn plugin_object_namespace_and_name(&self) -> String {
        namespace_and_name(self.plugin_object_namespace(), self.plugin_object_name())
    }

    /// The registry key: primary category path, `:`, then `namespace::name`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RegistryError::Configuration`] if the primary category is empty.
    fn plugin_object_manager_key(&self) -> Result<String> {
        derive_manager_key(
            &self.plugin_object_categories(),
            self.plugin_object_namespace(),
            self.plugin_object_name(),
        )
    }
}

/// Controls the checks applied when a role-specific creator narrows its output.
///
/// The role itself (engine vs. data representation) is always checked. When
/// `verify_created_objects` is set, the created object's manager key must also
/// match the creator's; this costs two key derivations per creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreationPolicy {
    pub verify_created_objects: bool,
}

impl CreationPolicy {
    pub const CHECKED: Self = Self {
        verify_created_objects: true,
    };
    pub const UNCHECKED: Self = Self {
        verify_created_objects: false,
    };
}

impl Default for CreationPolicy {
    /// Verification on in debug builds, off in release builds.
    fn default() -> Self {
        Self {
            verify_created_objects: cfg!(debug_assertions),
        }
    }
}

/// Checks that a created object reports the same manager key as its creator.
pub(crate) fn verify_identity<C>(
    creator: &C,
    object: &PluginObject,
    expected: &'static str,
) -> Result<()>
where
    C: PluginCreator + ?Sized,
{
    let creator_key = creator.plugin_object_manager_key()?;
    let object_key = object
        .as_plugin()
        .manager_key()
        .map_err(|e| RegistryError::TypeMismatch {
            key: creator_key.clone(),
            expected,
            detail: e.to_string(),
        })?;
    if object_key != creator_key {
        return Err(RegistryError::TypeMismatch {
            key: creator_key,
            expected,
            detail: format!("created object reports key '{object_key}'"),
        });
    }
    Ok(())
}

/// Builds the mismatch error for an object of the wrong role.
pub(crate) fn role_mismatch<C>(creator: &C, object: &PluginObject, expected: &'static str) -> RegistryError
where
    C: PluginCreator + ?Sized,
{
    RegistryError::TypeMismatch {
        key: creator
            .plugin_object_manager_key()
            .unwrap_or_else(|_| creator.plugin_object_namespace_and_name()),
        expected,
        detail: format!(
            "created object '{}' is a {}",
            object.as_plugin().class_namespace_and_name(),
            object.role()
        ),
    }
}
