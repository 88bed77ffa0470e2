use super::data_representation_manager::DataRepresentationManager;
use super::engine_manager::EngineManager;
use super::module_manager::ModuleManager;
use crate::context::ManagerCreationKey;
use crate::error::{RegistryError, Result};
use crate::plugin::{DataRepresentationCreator, EngineCreator, PluginCreator};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// A named bundle of creators registered and unregistered as a unit.
///
/// Engine and data representation creators are also part of the generic
/// creator list, so a library lands in the module manager in full.
///
/// ```
/// # use curator::builtin::selectors::ElementSelectorCreator;
/// # use curator::builtin::engines::GreedyPackerCreator;
/// use curator::PluginLibrary;
///
/// let library = PluginLibrary::new("chemistry")
///     .plugin(ElementSelectorCreator)
///     .engine(GreedyPackerCreator);
/// assert_eq!(library.plugin_creators().len(), 2);
/// assert_eq!(library.engine_creators().len(), 1);
/// ```
pub struct PluginLibrary {
    name: String,
    plugins: Vec<Arc<dyn PluginCreator>>,
    engines: Vec<Arc<dyn EngineCreator>>,
    data_representations: Vec<Arc<dyn DataRepresentationCreator>>,
}

impl PluginLibrary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plugins: Vec::new(),
            engines: Vec::new(),
            data_representations: Vec::new(),
        }
    }

    pub fn plugin<C: PluginCreator + 'static>(mut self, creator: C) -> Self {
        self.plugins.push(Arc::new(creator));
        self
    }

    pub fn engine<C: EngineCreator + 'static>(mut self, creator: C) -> Self {
        let creator = Arc::new(creator);
        self.engines.push(creator.clone());
        self.plugins.push(creator);
        self
    }

    pub fn data_representation<C: DataRepresentationCreator + 'static>(mut self, creator: C) -> Self {
        let creator = Arc::new(creator);
        self.data_representations.push(creator.clone());
        self.plugins.push(creator);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every creator in the library, whatever its role.
    pub fn plugin_creators(&self) -> &[Arc<dyn PluginCreator>] {
        &self.plugins
    }

    pub fn engine_creators(&self) -> &[Arc<dyn EngineCreator>] {
        &self.engines
    }

    pub fn data_representation_creators(&self) -> &[Arc<dyn DataRepresentationCreator>] {
        &self.data_representations
    }

    pub fn summary(&self) -> LibrarySummary {
        LibrarySummary {
            name: self.name.clone(),
            plugins: self.plugins.len(),
            engines: self.engines.len(),
            data_representations: self.data_representations.len(),
        }
    }
}

impl fmt::Debug for PluginLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginLibrary")
            .field("name", &self.name)
            .field("plugins", &self.plugins.len())
            .field("engines", &self.engines.len())
            .field("data_representations", &self.data_representations.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibrarySummary {
    pub name: String,
    pub plugins: usize,
    pub engines: usize,
    pub data_representations: usize,
}

/// Tracks registered plugin libraries and keeps the three managers in step.
pub struct LibraryManager {
    modules: Arc<ModuleManager>,
    engines: Arc<EngineManager>,
    data_representations: Arc<DataRepresentationManager>,
    libraries: Mutex<BTreeMap<String, PluginLibrary>>,
}

impl LibraryManager {
    pub fn new(
        _key: ManagerCreationKey,
        modules: Arc<ModuleManager>,
        engines: Arc<EngineManager>,
        data_representations: Arc<DataRepresentationManager>,
    ) -> Self {
        Self {
            modules,
            engines,
            data_representations,
            libraries: Mutex::new(BTreeMap::new()),
        }
    }

    /// Registers every creator in `library` with the managers.
    ///
    /// If a later manager rejects the library, the creators already added to
    /// earlier managers are removed again and the library is not recorded.
    ///
    /// # Errors
    ///
    /// * [`RegistryError::DuplicateLibrary`] if a library with this name is registered.
    /// * Any error raised by [`ModuleManager::add_plugins`].
    #[instrument(skip_all, name = "register_library", fields(library = %library.name()))]
    pub fn register_library(&self, library: PluginLibrary) -> Result<()> {
        let mut libraries = self.libraries.lock();
        if libraries.contains_key(library.name()) {
            return Err(RegistryError::DuplicateLibrary {
                name: library.name().to_string(),
            });
        }

        self.modules.add_plugins(library.plugin_creators())?;
        if let Err(e) = self.engines.add_engine_creators(library.engine_creators()) {
            self.roll_back(self.modules.remove_plugins(library.plugin_creators()));
            return Err(e);
        }
        if let Err(e) = self
            .data_representations
            .add_data_representation_creators(library.data_representation_creators())
        {
            self.roll_back(self.engines.remove_engine_creators(library.engine_creators()));
            self.roll_back(self.modules.remove_plugins(library.plugin_creators()));
            return Err(e);
        }

        info!(
            plugins = library.plugins.len(),
            engines = library.engines.len(),
            data_representations = library.data_representations.len(),
            "Plugin library registered."
        );
        libraries.insert(library.name.clone(), library);
        Ok(())
    }

    fn roll_back(&self, outcome: Result<()>) {
        if let Err(e) = outcome {
            warn!(error = %e, "Failed to roll back a partially registered library.");
        }
    }

    /// Removes exactly the creators recorded for library `name` from every manager.
    ///
    /// An unknown name is logged and ignored. Every manager is checked before
    /// anything is removed, so when a strict manager refuses the removal no
    /// creator is touched and the library stays registered.
    ///
    /// # Errors
    ///
    /// * [`RegistryError::MissingRegistration`] if a strict manager no longer
    ///   holds one of the library's creators.
    #[instrument(skip_all, name = "unregister_library", fields(library = name))]
    pub fn unregister_library(&self, name: &str) -> Result<()> {
        let mut libraries = self.libraries.lock();
        let Some(library) = libraries.get(name) else {
            warn!("Plugin library is not registered; nothing to unregister.");
            return Ok(());
        };

        self.data_representations
            .registry()
            .check_removal(library.data_representation_creators())?;
        self.engines
            .registry()
            .check_removal(library.engine_creators())?;
        self.modules.check_removal(library.plugin_creators())?;

        let outcomes = [
            self.data_representations
                .remove_data_representation_creators(library.data_representation_creators()),
            self.engines.remove_engine_creators(library.engine_creators()),
            self.modules.remove_plugins(library.plugin_creators()),
        ];
        info!(plugins = library.plugins.len(), "Plugin library unregistered.");
        libraries.remove(name);
        outcomes.into_iter().collect()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.libraries.lock().contains_key(name)
    }

    pub fn library_names(&self) -> Vec<String> {
        self.libraries.lock().keys().cloned().collect()
    }

    pub fn library_summaries(&self) -> Vec<LibrarySummary> {
        self.libraries
            .lock()
            .values()
            .map(PluginLibrary::summary)
            .collect()
    }

    pub fn total_plugin_libraries(&self) -> usize {
        self.libraries.lock().len()
    }

    /// Forgets every library and empties every manager.
    pub fn reset(&self) {
        let mut libraries = self.libraries.lock();
        libraries.clear();
        self.data_representations.reset();
        self.engines.reset();
        self.modules.reset();
        info!("All plugin libraries and registrations cleared.");
    }
}

impl fmt::Debug for LibraryManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryManager")
            .field("libraries", &self.library_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;
    use crate::builtin::engines::{GreedyPackerCreator, MonteCarloAnnealerCreator};
    use crate::builtin::representations::SparseEnergyTableCreator;
    use crate::builtin::selectors::ElementSelectorCreator;
    use crate::config::RegistryConfig;
    use crate::request::{EngineRequest, PluginRequest};

    struct Managers {
        modules: Arc<ModuleManager>,
        engines: Arc<EngineManager>,
        data_representations: Arc<DataRepresentationManager>,
        libraries: LibraryManager,
    }

    fn managers(config: &RegistryConfig) -> Managers {
        let modules = Arc::new(ModuleManager::new(ManagerCreationKey::new(), "modules", config));
        let engines = Arc::new(EngineManager::new(ManagerCreationKey::new(), config));
        let data_representations =
            Arc::new(DataRepresentationManager::new(ManagerCreationKey::new(), config));
        let libraries = LibraryManager::new(
            ManagerCreationKey::new(),
            modules.clone(),
            engines.clone(),
            data_representations.clone(),
        );
        Managers {
            modules,
            engines,
            data_representations,
            libraries,
        }
    }

    #[test]
    fn register_then_unregister_round_trip() {
        let m = managers(&RegistryConfig::default());
        let library = builtin::library();
        let summary = library.summary();
        m.libraries.register_library(library).unwrap();

        assert!(m.libraries.is_registered(builtin::LIBRARY_NAME));
        assert_eq!(m.libraries.total_plugin_libraries(), 1);
        assert_eq!(m.modules.total_plugins(), summary.plugins);
        assert_eq!(m.engines.total_engines(), summary.engines);
        assert_eq!(
            m.data_representations.total_data_representations(),
            summary.data_representations
        );
        assert_eq!(m.libraries.library_summaries(), vec![summary]);

        m.libraries.unregister_library(builtin::LIBRARY_NAME).unwrap();
        assert!(!m.libraries.is_registered(builtin::LIBRARY_NAME));
        assert!(m.modules.is_empty());
        assert_eq!(m.engines.total_engines(), 0);
        assert_eq!(m.data_representations.total_data_representations(), 0);
    }

    #[test]
    fn duplicate_library_name_is_rejected() {
        let m = managers(&RegistryConfig::default());
        m.libraries
            .register_library(PluginLibrary::new("first").plugin(ElementSelectorCreator))
            .unwrap();
        let result = m
            .libraries
            .register_library(PluginLibrary::new("first").engine(GreedyPackerCreator));
        assert!(matches!(
            result,
            Err(RegistryError::DuplicateLibrary { ref name }) if name == "first"
        ));
        assert_eq!(m.engines.total_engines(), 0);
        assert_eq!(m.modules.total_plugins(), 1);
    }

    #[test]
    fn failure_in_engine_manager_rolls_back_modules() {
        let m = managers(&RegistryConfig::default());
        let preexisting: Arc<dyn EngineCreator> = Arc::new(GreedyPackerCreator);
        m.engines.add_engine_creators(&[preexisting]).unwrap();

        let library = PluginLibrary::new("clash")
            .plugin(ElementSelectorCreator)
            .engine(MonteCarloAnnealerCreator)
            .engine(GreedyPackerCreator);
        let result = m.libraries.register_library(library);
        assert!(matches!(
            result,
            Err(RegistryError::DuplicateRegistration { .. })
        ));
        assert!(m.modules.is_empty());
        assert_eq!(m.engines.total_engines(), 1);
        assert!(!m.libraries.is_registered("clash"));
    }

    #[test]
    fn failure_in_data_representation_manager_rolls_back_everything() {
        let m = managers(&RegistryConfig::default());
        let preexisting: Arc<dyn DataRepresentationCreator> = Arc::new(SparseEnergyTableCreator);
        m.data_representations
            .add_data_representation_creators(&[preexisting])
            .unwrap();

        let library = PluginLibrary::new("clash")
            .engine(GreedyPackerCreator)
            .data_representation(SparseEnergyTableCreator);
        assert!(m.libraries.register_library(library).is_err());
        assert!(m.modules.is_empty());
        assert_eq!(m.engines.total_engines(), 0);
        assert_eq!(m.data_representations.total_data_representations(), 1);
    }

    #[test]
    fn unknown_library_unregistration_is_a_no_op() {
        let m = managers(&RegistryConfig::default());
        m.libraries.register_library(builtin::library()).unwrap();
        let before = m.modules.total_plugins();
        m.libraries.unregister_library("never-loaded").unwrap();
        assert_eq!(m.modules.total_plugins(), before);
    }

    #[test]
    fn unregistration_leaves_other_libraries_alone() {
        let m = managers(&RegistryConfig::default());
        m.libraries
            .register_library(PluginLibrary::new("selectors").plugin(ElementSelectorCreator))
            .unwrap();
        m.libraries
            .register_library(PluginLibrary::new("engines").engine(GreedyPackerCreator))
            .unwrap();
        assert_eq!(m.libraries.library_names(), vec!["engines", "selectors"]);

        m.libraries.unregister_library("engines").unwrap();
        let remaining = m.modules.get_plugins_matching(&PluginRequest::new());
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].plugin_object_name(), "ElementSelector");
        assert!(m.engines.get_engines_matching(&EngineRequest::new()).is_empty());
    }

    #[test]
    fn strict_refusal_keeps_library_and_creators_intact() {
        let config = crate::config::RegistryConfigBuilder::new()
            .strict_unregistration(true)
            .build();
        let m = managers(&config);
        let library = builtin::library();
        let removed_early = library.data_representation_creators()[0].clone();
        m.libraries.register_library(library).unwrap();
        m.data_representations
            .remove_data_representation_creators(&[removed_early.clone()])
            .unwrap();

        let result = m.libraries.unregister_library(builtin::LIBRARY_NAME);
        assert!(matches!(
            result,
            Err(RegistryError::MissingRegistration { .. })
        ));
        assert!(m.libraries.is_registered(builtin::LIBRARY_NAME));
        assert_eq!(m.modules.total_plugins(), 7);
        assert_eq!(m.engines.total_engines(), 2);
        assert_eq!(m.data_representations.total_data_representations(), 2);

        m.data_representations
            .add_data_representation_creators(&[removed_early])
            .unwrap();
        m.libraries.unregister_library(builtin::LIBRARY_NAME).unwrap();
        assert!(m.modules.is_empty());
        assert_eq!(m.engines.total_engines(), 0);
        assert_eq!(m.data_representations.total_data_representations(), 0);
        m.libraries.register_library(builtin::library()).unwrap();
    }

    #[test]
    fn reset_clears_libraries_and_managers() {
        let m = managers(&RegistryConfig::default());
        m.libraries.register_library(builtin::library()).unwrap();
        m.libraries.reset();
        assert_eq!(m.libraries.total_plugin_libraries(), 0);
        assert!(m.modules.is_empty());
        assert_eq!(m.engines.total_engines(), 0);
        m.libraries.register_library(builtin::library()).unwrap();
        assert!(m.modules.has_any_plugin());
    }
}
