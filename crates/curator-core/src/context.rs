use crate::config::RegistryConfig;
use crate::error::Result;
use crate::registry::{
    DataRepresentationManager, EngineManager, LibraryManager, LibrarySummary, ModuleManager,
    PluginLibrary,
};
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Capability token required to construct a manager.
///
/// Only [`PluginContext`] mints these, so managers cannot be created outside a
/// context. The token is neither `Clone` nor `Copy`: one token, one manager.
#[derive(Debug)]
pub struct ManagerCreationKey {
    _private: (),
}

impl ManagerCreationKey {
    pub(crate) fn new() -> Self {
        Self { _private: () }
    }
}

/// Owns the full set of managers for one process (or one test).
///
/// Most programs use [`PluginContext::global`]. Tests and embedders that need
/// isolation build their own with [`PluginContext::new`] or
/// [`PluginContext::with_config`] and pass it around explicitly.
#[derive(Debug)]
pub struct PluginContext {
    config: RegistryConfig,
    modules: Arc<ModuleManager>,
    engines: Arc<EngineManager>,
    data_representations: Arc<DataRepresentationManager>,
    libraries: LibraryManager,
}

static GLOBAL: OnceLock<PluginContext> = OnceLock::new();

impl PluginContext {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        let modules = Arc::new(ModuleManager::new(
            ManagerCreationKey::new(),
            "modules",
            &config,
        ));
        let engines = Arc::new(EngineManager::new(ManagerCreationKey::new(), &config));
        let data_representations = Arc::new(DataRepresentationManager::new(
            ManagerCreationKey::new(),
            &config,
        ));
        let libraries = LibraryManager::new(
            ManagerCreationKey::new(),
            Arc::clone(&modules),
            Arc::clone(&engines),
            Arc::clone(&data_representations),
        );
        debug!(?config, "Plugin context created.");
        Self {
            config,
            modules,
            engines,
            data_representations,
            libraries,
        }
    }

    /// The process-wide context, created with the default configuration on
    /// first use.
    pub fn global() -> &'static PluginContext {
        GLOBAL.get_or_init(PluginContext::new)
    }

    /// Installs a configured process-wide context.
    ///
    /// Returns `false` if the global context already exists, in which case
    /// `config` is ignored.
    pub fn init_global(config: RegistryConfig) -> bool {
        let mut installed = false;
        GLOBAL.get_or_init(|| {
            installed = true;
            PluginContext::with_config(config)
        });
        installed
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn module_manager(&self) -> &ModuleManager {
        &self.modules
    }

    pub fn engine_manager(&self) -> &EngineManager {
        &self.engines
    }

    pub fn data_representation_manager(&self) -> &DataRepresentationManager {
        &self.data_representations
    }

    pub fn library_manager(&self) -> &LibraryManager {
        &self.libraries
    }

    pub fn register_library(&self, library: PluginLibrary) -> Result<()> {
        self.libraries.register_library(library)
    }

    pub fn unregister_library(&self, name: &str) -> Result<()> {
        self.libraries.unregister_library(name)
    }

    pub fn libraries(&self) -> Vec<LibrarySummary> {
        self.libraries.library_summaries()
    }
}

impl Default for PluginContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;
    use crate::config::RegistryConfigBuilder;
    use crate::plugin::identity::Category;
    use crate::request::{DataRepresentationRequest, EngineRequest, KeywordMode};
    use crate::RegistryError;

    #[test]
    fn contexts_are_isolated() {
        let first = PluginContext::new();
        let second = PluginContext::new();
        first.register_library(builtin::library()).unwrap();
        assert!(first.module_manager().has_any_plugin());
        assert!(!second.module_manager().has_any_plugin());
    }

    #[test]
    fn global_context_is_a_singleton() {
        let a = PluginContext::global() as *const PluginContext;
        let b = PluginContext::global() as *const PluginContext;
        assert_eq!(a, b);
        assert!(!PluginContext::init_global(RegistryConfig::default()));
    }

    #[test]
    fn registered_library_is_visible_through_every_manager() {
        let context = PluginContext::new();
        context.register_library(builtin::library()).unwrap();

        let mut engines = EngineRequest::new();
        engines.add_keyword_requirement(["packing"], KeywordMode::MustHaveAtLeastOne);
        assert!(!context.engine_manager().get_engines_matching(&engines).is_empty());

        let mut representations = DataRepresentationRequest::new();
        representations.add_category_requirement([Category::new(["DataRepresentation"])], true);
        assert!(
            !context
                .data_representation_manager()
                .get_compatible_data_representation_creators(&representations)
                .is_empty()
        );

        assert_eq!(context.libraries().len(), 1);
        context.unregister_library(builtin::LIBRARY_NAME).unwrap();
        assert!(!context.module_manager().has_any_plugin());
    }

    #[test]
    fn strict_context_propagates_to_managers() {
        let config = RegistryConfigBuilder::new()
            .strict_unregistration(true)
            .build();
        let context = PluginContext::with_config(config);
        assert!(context.config().strict_unregistration);
        assert!(context.module_manager().is_strict());
        assert!(context.engine_manager().registry().is_strict());

        let library = builtin::library();
        let creators = library.plugin_creators().to_vec();
        let result = context.module_manager().remove_plugins(&creators);
        assert!(matches!(
            result,
            Err(RegistryError::MissingRegistration { .. })
        ));
    }
}
