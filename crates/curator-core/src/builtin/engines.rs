use crate::plugin::identity::{Category, CategorySet};
use crate::plugin::{
    DataRepresentationCreator, Engine, EngineCreator, Plugin, PluginCreator, PluginObject,
};
use crate::registry::PluginLibrary;
use std::any::Any;

pub const NAMESPACE: &str = "curator::builtin::engines";

/// Packs by picking the lowest-energy option at each position in turn.
///
/// Walks pairwise tables entry by entry, so it refuses representations that
/// declare themselves dense.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GreedyPacker;

impl GreedyPacker {
    pub const NAME: &'static str = "GreedyPacker";

    fn declared_categories() -> CategorySet {
        CategorySet::new(Category::new(["Engine", "Packer"]))
    }

    fn declared_keywords() -> Vec<String> {
        vec!["packing".into(), "greedy".into(), "deterministic".into()]
    }
}

impl Plugin for GreedyPacker {
    fn class_name(&self) -> &str {
        Self::NAME
    }
    fn class_namespace(&self) -> &str {
        NAMESPACE
    }
    fn categories(&self) -> CategorySet {
        Self::declared_categories()
    }
    fn keywords(&self) -> Vec<String> {
        Self::declared_keywords()
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Engine for GreedyPacker {
    fn data_representation_is_incompatible_with_engine(
        &self,
        representation: &dyn DataRepresentationCreator,
    ) -> bool {
        representation
            .present_properties()
            .iter()
            .any(|property| property == "dense")
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPackerCreator;

impl PluginCreator for GreedyPackerCreator {
    fn create_plugin_object(&self) -> PluginObject {
        PluginObject::Engine(Box::new(GreedyPacker))
    }
    fn plugin_object_categories(&self) -> CategorySet {
        GreedyPacker::declared_categories()
    }
    fn plugin_object_keywords(&self) -> Vec<String> {
        GreedyPacker::declared_keywords()
    }
    fn plugin_object_name(&self) -> &str {
        GreedyPacker::NAME
    }
    fn plugin_object_namespace(&self) -> &str {
        NAMESPACE
    }
}

impl EngineCreator for GreedyPackerCreator {}

/// Metropolis Monte Carlo packing with simulated annealing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonteCarloAnnealer;

impl MonteCarloAnnealer {
    pub const NAME: &'static str = "MonteCarloAnnealer";

    fn declared_categories() -> CategorySet {
        CategorySet::new(Category::new(["Engine", "Annealer"]))
            .with_secondary(Category::new(["Engine", "Packer"]))
    }

    fn declared_keywords() -> Vec<String> {
        vec!["packing".into(), "stochastic".into()]
    }
}

impl Plugin for MonteCarloAnnealer {
    fn class_name(&self) -> &str {
        Self::NAME
    }
    fn class_namespace(&self) -> &str {
        NAMESPACE
    }
    fn categories(&self) -> CategorySet {
        Self::declared_categories()
    }
    fn keywords(&self) -> Vec<String> {
        Self::declared_keywords()
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Engine for MonteCarloAnnealer {}

#[derive(Debug, Clone, Copy, Default)]
pub struct MonteCarloAnnealerCreator;

impl PluginCreator for MonteCarloAnnealerCreator {
    fn create_plugin_object(&self) -> PluginObject {
        PluginObject::Engine(Box::new(MonteCarloAnnealer))
    }
    fn plugin_object_categories(&self) -> CategorySet {
        MonteCarloAnnealer::declared_categories()
    }
    fn plugin_object_keywords(&self) -> Vec<String> {
        MonteCarloAnnealer::declared_keywords()
    }
    fn plugin_object_name(&self) -> &str {
        MonteCarloAnnealer::NAME
    }
    fn plugin_object_namespace(&self) -> &str {
        NAMESPACE
    }
}

impl EngineCreator for MonteCarloAnnealerCreator {}

pub(super) fn register(library: PluginLibrary) -> PluginLibrary {
    library
        .engine(GreedyPackerCreator)
        .engine(MonteCarloAnnealerCreator)
}
