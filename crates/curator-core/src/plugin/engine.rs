use super::creator::{CreationPolicy, PluginCreator, role_mismatch, verify_identity};
use super::data_representation::DataRepresentationCreator;
use super::plugin::{AsPlugin, Plugin};
use crate::error::Result;

/// A plugin that performs work (a packer, an annealer, a minimizer...).
pub trait Engine: Plugin + AsPlugin {
    /// Returns true if this engine knows it cannot work with `representation`.
    ///
    /// `false` means "no known incompatibility", not "proven compatible".
    fn data_representation_is_incompatible_with_engine(
        &self,
        _representation: &dyn DataRepresentationCreator,
    ) -> bool {
        false
    }
}

/// A creator whose objects are engines.
pub trait EngineCreator: PluginCreator {
    /// Creates an engine under the default [`CreationPolicy`].
    fn create_engine(&self) -> Result<Box<dyn Engine>> {
        self.create_engine_with(CreationPolicy::default())
    }

    /// Creates an object and narrows it to an engine.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RegistryError::TypeMismatch`] if the object is not an
    /// engine, or (when the policy verifies) if its identity differs from the
    /// creator's.
    fn create_engine_with(&self, policy: CreationPolicy) -> Result<Box<dyn Engine>> {
        let object = self.create_plugin_object();
        if policy.verify_created_objects {
            verify_identity(self, &object, "engine")?;
        }
        object
            .into_engine()
            .map_err(|other| role_mismatch(self, &other, "engine"))
    }
}
