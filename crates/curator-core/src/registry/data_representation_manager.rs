use super::table::Registry;
use crate::config::RegistryConfig;
use crate::context::ManagerCreationKey;
use crate::error::Result;
use crate::plugin::identity::{Category, class_names_match};
use crate::plugin::{CreationPolicy, DataRepresentation, DataRepresentationCreator, Engine};
use crate::request::DataRepresentationRequest;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// How a data representation lookup for an engine was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataRepresentationRequestResult {
    NoResults,
    /// Preferred representations that declare compatibility with the engine.
    PreferredTypesCompatibleWithEngine,
    /// Preferred representations the engine does not reject.
    PreferredTypesNotIncompatibleWithEngine,
    TypesCompatibleWithEngine,
    TypesNotIncompatibleWithEngine,
}

impl DataRepresentationRequestResult {
    fn preferred(self) -> Self {
        match self {
            Self::TypesCompatibleWithEngine => Self::PreferredTypesCompatibleWithEngine,
            Self::TypesNotIncompatibleWithEngine => Self::PreferredTypesNotIncompatibleWithEngine,
            other => other,
        }
    }
}

/// The registry of data representation creators.
#[derive(Debug)]
pub struct DataRepresentationManager {
    registry: Registry<dyn DataRepresentationCreator>,
    policy: CreationPolicy,
}

impl DataRepresentationManager {
    pub fn new(key: ManagerCreationKey, config: &RegistryConfig) -> Self {
        Self {
            registry: Registry::new(key, "data representations", config),
            policy: config.creation_policy(),
        }
    }

    pub fn registry(&self) -> &Registry<dyn DataRepresentationCreator> {
        &self.registry
    }

    pub fn add_data_representation_creators(
        &self,
        creators: &[Arc<dyn DataRepresentationCreator>],
    ) -> Result<()> {
        self.registry.add_plugins(creators)
    }

    pub fn remove_data_representation_creators(
        &self,
        creators: &[Arc<dyn DataRepresentationCreator>],
    ) -> Result<()> {
        self.registry.remove_plugins(creators)
    }

    pub fn total_data_representations(&self) -> usize {
        self.registry.total_plugins()
    }

    pub fn reset(&self) {
        self.registry.reset();
    }

    pub fn get_data_representation_creator(
        &self,
        key: &str,
    ) -> Result<Arc<dyn DataRepresentationCreator>> {
        self.registry.get_plugin(key)
    }

    pub fn get_compatible_data_representation_creators(
        &self,
        request: &DataRepresentationRequest,
    ) -> Vec<Arc<dyn DataRepresentationCreator>> {
        self.registry.get_plugins_matching(request)
    }

    /// Data representations from `categories` suited to `engine`.
    ///
    /// Representations that explicitly declare compatibility with the engine
    /// win. Failing that, every representation in the categories that the
    /// engine does not reject is returned.
    pub fn get_data_representation_creators_for_engine(
        &self,
        categories: &[Category],
        allow_subcategories: bool,
        engine: &dyn Engine,
    ) -> (
        Vec<Arc<dyn DataRepresentationCreator>>,
        DataRepresentationRequestResult,
    ) {
        let engine_name = engine.class_namespace_and_name();

        let mut compatible = DataRepresentationRequest::new();
        compatible
            .add_engine_compatibility_requirement(engine_name.as_str())
            .add_category_requirement(categories.iter().cloned(), allow_subcategories);
        let creators = self.get_compatible_data_representation_creators(&compatible);
        if !creators.is_empty() {
            debug!(engine = %engine_name, found = creators.len(), "Found explicitly compatible data representations.");
            return (
                creators,
                DataRepresentationRequestResult::TypesCompatibleWithEngine,
            );
        }

        let mut in_categories = DataRepresentationRequest::new();
        in_categories.add_category_requirement(categories.iter().cloned(), allow_subcategories);
        let creators: Vec<_> = self
            .get_compatible_data_representation_creators(&in_categories)
            .into_iter()
            .filter(|creator| !engine.data_representation_is_incompatible_with_engine(creator.as_ref()))
            .collect();
        debug!(engine = %engine_name, found = creators.len(), "Found data representations not rejected by engine.");
        let result = if creators.is_empty() {
            DataRepresentationRequestResult::NoResults
        } else {
            DataRepresentationRequestResult::TypesNotIncompatibleWithEngine
        };
        (creators, result)
    }

    /// Like [`Self::get_data_representation_creators_for_engine`], but narrows
    /// the result to `preferred` names when any of them are among the
    /// candidates, ordered by preference. Names may be bare or qualified.
    pub fn get_data_representation_creators_for_engine_with_preferred<S: AsRef<str>>(
        &self,
        categories: &[Category],
        allow_subcategories: bool,
        engine: &dyn Engine,
        preferred: &[S],
    ) -> (
        Vec<Arc<dyn DataRepresentationCreator>>,
        DataRepresentationRequestResult,
    ) {
        let (creators, result) =
            self.get_data_representation_creators_for_engine(categories, allow_subcategories, engine);
        if creators.is_empty() {
            return (creators, DataRepresentationRequestResult::NoResults);
        }

        let names: Vec<String> = creators
            .iter()
            .map(|creator| creator.plugin_object_namespace_and_name())
            .collect();
        let mut taken = BTreeSet::new();
        let mut chosen = Vec::new();
        for wanted in preferred {
            for (index, name) in names.iter().enumerate() {
                if class_names_match(name, wanted.as_ref()) && taken.insert(index) {
                    chosen.push(Arc::clone(&creators[index]));
                }
            }
        }

        if chosen.is_empty() {
            (creators, result)
        } else {
            (chosen, result.preferred())
        }
    }

    pub fn create_data_representation(&self, key: &str) -> Result<Box<dyn DataRepresentation>> {
        self.registry
            .get_plugin(key)?
            .create_data_representation_with(self.policy)
    }

    /// Creates a fresh data representation by bare or qualified name.
    pub fn create_data_representation_by_name(
        &self,
        name: &str,
    ) -> Result<Box<dyn DataRepresentation>> {
        let creator = self.registry.get_plugin_by_name(name)?;
        debug!(representation = %creator.plugin_object_namespace_and_name(), "Creating data representation.");
        creator.create_data_representation_with(self.policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegistryError;
    use crate::plugin::identity::CategorySet;
    use crate::plugin::{Plugin, PluginCreator, PluginObject};
    use crate::request::PropertyMode;
    use std::any::Any;

    #[derive(Debug)]
    struct Table {
        name: &'static str,
        entries: usize,
    }

    impl Plugin for Table {
        fn class_name(&self) -> &str {
            self.name
        }
        fn class_namespace(&self) -> &str {
            "test::data"
        }
        fn categories(&self) -> CategorySet {
            CategorySet::new(Category::new(["DataRepresentation", "EnergyTable"]))
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    impl DataRepresentation for Table {
        fn is_empty(&self) -> bool {
            self.entries == 0
        }
        fn clear(&mut self) {
            self.entries = 0;
        }
    }

    struct TableCreator {
        name: &'static str,
        compatible: &'static [&'static str],
        properties: &'static [&'static str],
    }

    impl PluginCreator for TableCreator {
        fn create_plugin_object(&self) -> PluginObject {
            PluginObject::DataRepresentation(Box::new(Table {
                name: self.name,
                entries: 0,
            }))
        }
        fn plugin_object_categories(&self) -> CategorySet {
            CategorySet::new(Category::new(["DataRepresentation", "EnergyTable"]))
        }
        fn plugin_object_name(&self) -> &str {
            self.name
        }
        fn plugin_object_namespace(&self) -> &str {
            "test::data"
        }
    }

    impl DataRepresentationCreator for TableCreator {
        fn compatible_engines(&self) -> Vec<String> {
            self.compatible.iter().map(|s| s.to_string()).collect()
        }
        fn present_properties(&self) -> Vec<String> {
            self.properties.iter().map(|s| s.to_string()).collect()
        }
    }

    /// An engine that rejects every representation named in `rejects`.
    #[derive(Debug)]
    struct Picky {
        rejects: &'static [&'static str],
    }

    impl Plugin for Picky {
        fn class_name(&self) -> &str {
            "Picky"
        }
        fn class_namespace(&self) -> &str {
            "test::engines"
        }
        fn categories(&self) -> CategorySet {
            CategorySet::new(Category::new(["Engine"]))
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    impl Engine for Picky {
        fn data_representation_is_incompatible_with_engine(
            &self,
            representation: &dyn DataRepresentationCreator,
        ) -> bool {
            self.rejects
                .iter()
                .any(|name| *name == representation.plugin_object_name())
        }
    }

    fn manager(creators: Vec<TableCreator>) -> DataRepresentationManager {
        let manager =
            DataRepresentationManager::new(ManagerCreationKey::new(), &RegistryConfig::default());
        let creators: Vec<Arc<dyn DataRepresentationCreator>> = creators
            .into_iter()
            .map(|creator| Arc::new(creator) as Arc<dyn DataRepresentationCreator>)
            .collect();
        manager.add_data_representation_creators(&creators).unwrap();
        manager
    }

    fn tables() -> Vec<TableCreator> {
        vec![
            TableCreator {
                name: "DenseTable",
                compatible: &[],
                properties: &["dense"],
            },
            TableCreator {
                name: "SparseTable",
                compatible: &["test::engines::Picky"],
                properties: &["sparse"],
            },
            TableCreator {
                name: "TreeTable",
                compatible: &["test::engines::Picky"],
                properties: &["sparse", "hierarchical"],
            },
        ]
    }

    fn energy_tables() -> Vec<Category> {
        vec![Category::new(["DataRepresentation"])]
    }

    fn names(creators: &[Arc<dyn DataRepresentationCreator>]) -> Vec<String> {
        creators
            .iter()
            .map(|creator| creator.plugin_object_name().to_string())
            .collect()
    }

    #[test]
    fn explicit_compatibility_wins() {
        let manager = manager(tables());
        let engine = Picky { rejects: &[] };
        let (creators, result) =
            manager.get_data_representation_creators_for_engine(&energy_tables(), true, &engine);
        assert_eq!(result, DataRepresentationRequestResult::TypesCompatibleWithEngine);
        assert_eq!(names(&creators), vec!["SparseTable", "TreeTable"]);
    }

    #[test]
    fn falls_back_to_not_incompatible() {
        let manager = manager(vec![
            TableCreator {
                name: "DenseTable",
                compatible: &[],
                properties: &[],
            },
            TableCreator {
                name: "FlatTable",
                compatible: &[],
                properties: &[],
            },
        ]);
        let engine = Picky {
            rejects: &["FlatTable"],
        };
        let (creators, result) =
            manager.get_data_representation_creators_for_engine(&energy_tables(), true, &engine);
        assert_eq!(
            result,
            DataRepresentationRequestResult::TypesNotIncompatibleWithEngine
        );
        assert_eq!(names(&creators), vec!["DenseTable"]);
    }

    #[test]
    fn no_results_when_everything_is_rejected() {
        let manager = manager(vec![TableCreator {
            name: "DenseTable",
            compatible: &[],
            properties: &[],
        }]);
        let engine = Picky {
            rejects: &["DenseTable"],
        };
        let (creators, result) =
            manager.get_data_representation_creators_for_engine(&energy_tables(), true, &engine);
        assert!(creators.is_empty());
        assert_eq!(result, DataRepresentationRequestResult::NoResults);

        let (creators, result) = manager.get_data_representation_creators_for_engine_with_preferred(
            &energy_tables(),
            true,
            &engine,
            &["DenseTable"],
        );
        assert!(creators.is_empty());
        assert_eq!(result, DataRepresentationRequestResult::NoResults);
    }

    #[test]
    fn category_outside_request_is_ignored() {
        let manager = manager(tables());
        let engine = Picky { rejects: &[] };
        let (creators, result) = manager.get_data_representation_creators_for_engine(
            &[Category::new(["DataRepresentation"])],
            false,
            &engine,
        );
        assert!(creators.is_empty());
        assert_eq!(result, DataRepresentationRequestResult::NoResults);
    }

    #[test]
    fn preferred_names_narrow_in_preference_order() {
        let manager = manager(tables());
        let engine = Picky { rejects: &[] };
        let (creators, result) = manager.get_data_representation_creators_for_engine_with_preferred(
            &energy_tables(),
            true,
            &engine,
            &["TreeTable", "test::data::SparseTable", "TreeTable"],
        );
        assert_eq!(
            result,
            DataRepresentationRequestResult::PreferredTypesCompatibleWithEngine
        );
        assert_eq!(names(&creators), vec!["TreeTable", "SparseTable"]);
    }

    #[test]
    fn unmatched_preferences_return_full_list() {
        let manager = manager(tables());
        let engine = Picky { rejects: &[] };
        let (creators, result) = manager.get_data_representation_creators_for_engine_with_preferred(
            &energy_tables(),
            true,
            &engine,
            &["DenseTable"],
        );
        assert_eq!(result, DataRepresentationRequestResult::TypesCompatibleWithEngine);
        assert_eq!(names(&creators), vec!["SparseTable", "TreeTable"]);
    }

    #[test]
    fn preferred_among_not_incompatible() {
        let manager = manager(vec![
            TableCreator {
                name: "DenseTable",
                compatible: &[],
                properties: &[],
            },
            TableCreator {
                name: "FlatTable",
                compatible: &[],
                properties: &[],
            },
        ]);
        let engine = Picky { rejects: &[] };
        let (creators, result) = manager.get_data_representation_creators_for_engine_with_preferred(
            &energy_tables(),
            true,
            &engine,
            &["FlatTable"],
        );
        assert_eq!(
            result,
            DataRepresentationRequestResult::PreferredTypesNotIncompatibleWithEngine
        );
        assert_eq!(names(&creators), vec!["FlatTable"]);
    }

    #[test]
    fn property_requests_and_creation() {
        let manager = manager(tables());
        let mut request = DataRepresentationRequest::new();
        request.add_property_requirement(["sparse"], PropertyMode::MustBePresent);
        assert_eq!(
            names(&manager.get_compatible_data_representation_creators(&request)),
            vec!["SparseTable", "TreeTable"]
        );

        let representation = manager.create_data_representation_by_name("TreeTable").unwrap();
        assert!(representation.is_empty());
        let representation = manager
            .create_data_representation("DataRepresentation,EnergyTable:test::data::DenseTable")
            .unwrap();
        assert_eq!(representation.class_name(), "DenseTable");
        assert!(matches!(
            manager.create_data_representation_by_name("Missing"),
            Err(RegistryError::NotFound { .. })
        ));
    }
}
