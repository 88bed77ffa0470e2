use super::table::Registry;
use crate::config::RegistryConfig;
use crate::context::ManagerCreationKey;
use crate::error::Result;
use crate::plugin::{CreationPolicy, Engine, EngineCreator};
use crate::request::EngineRequest;
use std::sync::Arc;
use tracing::debug;

/// The registry of engine creators.
#[derive(Debug)]
pub struct EngineManager {
    registry: Registry<dyn EngineCreator>,
    policy: CreationPolicy,
}

impl EngineManager {
    pub fn new(key: ManagerCreationKey, config: &RegistryConfig) -> Self {
        Self {
            registry: Registry::new(key, "engines", config),
            policy: config.creation_policy(),
        }
    }

    /// The underlying table, for the generic lookups.
    pub fn registry(&self) -> &Registry<dyn EngineCreator> {
        &self.registry
    }

    pub fn add_engine_creators(&self, creators: &[Arc<dyn EngineCreator>]) -> Result<()> {
        self.registry.add_plugins(creators)
    }

    pub fn remove_engine_creators(&self, creators: &[Arc<dyn EngineCreator>]) -> Result<()> {
        self.registry.remove_plugins(creators)
    }

    pub fn total_engines(&self) -> usize {
        self.registry.total_plugins()
    }

    pub fn reset(&self) {
        self.registry.reset();
    }

    pub fn get_engine_creator(&self, key: &str) -> Result<Arc<dyn EngineCreator>> {
        self.registry.get_plugin(key)
    }

    pub fn get_engines_matching(&self, request: &EngineRequest) -> Vec<Arc<dyn EngineCreator>> {
        self.registry.get_plugins_matching(request)
    }

    /// Creates a fresh engine from the creator registered under `key`.
    pub fn create_engine(&self, key: &str) -> Result<Box<dyn Engine>> {
        self.registry.get_plugin(key)?.create_engine_with(self.policy)
    }

    /// Creates a fresh engine by bare or qualified name.
    ///
    /// # Errors
    ///
    /// See [`Registry::get_plugin_by_name`].
    pub fn create_engine_by_name(&self, name: &str) -> Result<Box<dyn Engine>> {
        let creator = self.registry.get_plugin_by_name(name)?;
        debug!(engine = %creator.plugin_object_namespace_and_name(), "Creating engine.");
        creator.create_engine_with(self.policy)
    }
}
