use super::engines::{GreedyPacker, MonteCarloAnnealer, NAMESPACE as ENGINES};
use crate::plugin::identity::{Category, CategorySet, namespace_and_name};
use crate::plugin::{
    DataRepresentation, DataRepresentationCreator, Plugin, PluginCreator, PluginObject,
};
use crate::registry::PluginLibrary;
use std::any::Any;
use std::collections::BTreeMap;

pub const NAMESPACE: &str = "curator::builtin::representations";

/// Atom positions in Cartesian space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartesianCoordinates {
    positions: Vec<[f64; 3]>,
}

impl CartesianCoordinates {
    pub const NAME: &'static str = "CartesianCoordinates";

    fn declared_categories() -> CategorySet {
        CategorySet::new(Category::new(["DataRepresentation", "Coordinates"]))
    }

    fn declared_keywords() -> Vec<String> {
        vec!["coordinates".into()]
    }

    pub fn push(&mut self, position: [f64; 3]) {
        self.positions.push(position);
    }
}

impl Plugin for CartesianCoordinates {
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

impl DataRepresentation for CartesianCoordinates {
    fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
    fn clear(&mut self) {
        self.positions.clear();
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CartesianCoordinatesCreator;

impl PluginCreator for CartesianCoordinatesCreator {
    fn create_plugin_object(&self) -> PluginObject {
        PluginObject::DataRepresentation(Box::new(CartesianCoordinates::default()))
    }
    fn plugin_object_categories(&self) -> CategorySet {
        CartesianCoordinates::declared_categories()
    }
    fn plugin_object_keywords(&self) -> Vec<String> {
        CartesianCoordinates::declared_keywords()
    }
    fn plugin_object_name(&self) -> &str {
        CartesianCoordinates::NAME
    }
    fn plugin_object_namespace(&self) -> &str {
        NAMESPACE
    }
}

impl DataRepresentationCreator for CartesianCoordinatesCreator {
    fn present_properties(&self) -> Vec<String> {
        vec!["cartesian".into()]
    }
}

/// Pairwise interaction energies, storing only the pairs that were set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseEnergyTable {
    energies: BTreeMap<(usize, usize), f64>,
}

impl SparseEnergyTable {
    pub const NAME: &'static str = "SparseEnergyTable";

    fn declared_categories() -> CategorySet {
        CategorySet::new(Category::new(["DataRepresentation", "EnergyTable"]))
    }

    fn declared_keywords() -> Vec<String> {
        vec!["energy".into(), "sparse".into()]
    }

    /// Pairs are unordered: `(i, j)` and `(j, i)` address the same entry.
    pub fn set(&mut self, i: usize, j: usize, energy: f64) {
        self.energies.insert((i.min(j), i.max(j)), energy);
    }
}

impl Plugin for SparseEnergyTable {
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

impl DataRepresentation for SparseEnergyTable {
    fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }
    fn clear(&mut self) {
        self.energies.clear();
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SparseEnergyTableCreator;

impl PluginCreator for SparseEnergyTableCreator {
    fn create_plugin_object(&self) -> PluginObject {
        PluginObject::DataRepresentation(Box::new(SparseEnergyTable::default()))
    }
    fn plugin_object_categories(&self) -> CategorySet {
        SparseEnergyTable::declared_categories()
    }
    fn plugin_object_keywords(&self) -> Vec<String> {
        SparseEnergyTable::declared_keywords()
    }
    fn plugin_object_name(&self) -> &str {
        SparseEnergyTable::NAME
    }
    fn plugin_object_namespace(&self) -> &str {
        NAMESPACE
    }
}

impl DataRepresentationCreator for SparseEnergyTableCreator {
    fn compatible_engines(&self) -> Vec<String> {
        vec![namespace_and_name(ENGINES, GreedyPacker::NAME)]
    }
    fn present_properties(&self) -> Vec<String> {
        vec!["sparse".into(), "pairwise".into()]
    }
    fn absent_properties(&self) -> Vec<String> {
        vec!["dense".into()]
    }
}

/// Pairwise interaction energies in a square matrix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DenseEnergyTable {
    size: usize,
    energies: Vec<f64>,
}

impl DenseEnergyTable {
    pub const NAME: &'static str = "DenseEnergyTable";

    fn declared_categories() -> CategorySet {
        CategorySet::new(Category::new(["DataRepresentation", "EnergyTable"]))
    }

    fn declared_keywords() -> Vec<String> {
        vec!["energy".into(), "dense".into()]
    }

    /// Resizes to `size` x `size`, zeroing every entry.
    pub fn resize(&mut self, size: usize) {
        self.size = size;
        self.energies = vec![0.0; size * size];
    }
}

impl Plugin for DenseEnergyTable {
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

impl DataRepresentation for DenseEnergyTable {
    fn is_empty(&self) -> bool {
        self.size == 0
    }
    fn clear(&mut self) {
        self.size = 0;
        self.energies.clear();
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DenseEnergyTableCreator;

impl PluginCreator for DenseEnergyTableCreator {
    fn create_plugin_object(&self) -> PluginObject {
        PluginObject::DataRepresentation(Box::new(DenseEnergyTable::default()))
    }
    fn plugin_object_categories(&self) -> CategorySet {
        DenseEnergyTable::declared_categories()
    }
    fn plugin_object_keywords(&self) -> Vec<String> {
        DenseEnergyTable::declared_keywords()
    }
    fn plugin_object_name(&self) -> &str {
        DenseEnergyTable::NAME
    }
    fn plugin_object_namespace(&self) -> &str {
        NAMESPACE
    }
}

impl DataRepresentationCreator for DenseEnergyTableCreator {
    fn compatible_engines(&self) -> Vec<String> {
        vec![namespace_and_name(ENGINES, MonteCarloAnnealer::NAME)]
    }
    fn incompatible_engines(&self) -> Vec<String> {
        vec![namespace_and_name(ENGINES, GreedyPacker::NAME)]
    }
    fn present_properties(&self) -> Vec<String> {
        vec!["dense".into(), "pairwise".into()]
    }
    fn absent_properties(&self) -> Vec<String> {
        vec!["sparse".into()]
    }
}

pub(super) fn register(library: PluginLibrary) -> PluginLibrary {
    library
        .data_representation(CartesianCoordinatesCreator)
        .data_representation(SparseEnergyTableCreator)
        .data_representation(DenseEnergyTableCreator)
}
