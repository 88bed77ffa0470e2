use crate::plugin::identity::{Category, CategorySet};
use crate::plugin::{Plugin, PluginCreator, PluginObject};
use crate::registry::PluginLibrary;
use std::any::Any;

pub const NAMESPACE: &str = "curator::builtin::selectors";

/// Selects atoms by element symbol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementSelector;

impl ElementSelector {
    pub const NAME: &'static str = "ElementSelector";

    fn declared_categories() -> CategorySet {
        CategorySet::new(Category::new(["Selector", "AtomSelector"]))
    }

    fn declared_keywords() -> Vec<String> {
        vec!["selector".into(), "atoms".into()]
    }
}

impl Plugin for ElementSelector {
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

#[derive(Debug, Clone, Copy, Default)]
pub struct ElementSelectorCreator;

impl PluginCreator for ElementSelectorCreator {
    fn create_plugin_object(&self) -> PluginObject {
        PluginObject::Plugin(Box::new(ElementSelector))
    }
    fn plugin_object_categories(&self) -> CategorySet {
        ElementSelector::declared_categories()
    }
    fn plugin_object_keywords(&self) -> Vec<String> {
        ElementSelector::declared_keywords()
    }
    fn plugin_object_name(&self) -> &str {
        ElementSelector::NAME
    }
    fn plugin_object_namespace(&self) -> &str {
        NAMESPACE
    }
}

/// Selects residues by sequence number within an inclusive range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResidueRangeSelector;

impl ResidueRangeSelector {
    pub const NAME: &'static str = "ResidueRangeSelector";

    fn declared_categories() -> CategorySet {
        CategorySet::new(Category::new(["Selector", "ResidueSelector"]))
            .with_secondary(Category::new(["Selector", "RangeSelector"]))
    }

    fn declared_keywords() -> Vec<String> {
        vec!["selector".into(), "residues".into()]
    }
}

impl Plugin for ResidueRangeSelector {
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

#[derive(Debug, Clone, Copy, Default)]
pub struct ResidueRangeSelectorCreator;

impl PluginCreator for ResidueRangeSelectorCreator {
    fn create_plugin_object(&self) -> PluginObject {
        PluginObject::Plugin(Box::new(ResidueRangeSelector))
    }
    fn plugin_object_categories(&self) -> CategorySet {
        ResidueRangeSelector::declared_categories()
    }
    fn plugin_object_keywords(&self) -> Vec<String> {
        ResidueRangeSelector::declared_keywords()
    }
    fn plugin_object_name(&self) -> &str {
        ResidueRangeSelector::NAME
    }
    fn plugin_object_namespace(&self) -> &str {
        NAMESPACE
    }
}

pub(super) fn register(library: PluginLibrary) -> PluginLibrary {
    library
        .plugin(ElementSelectorCreator)
        .plugin(ResidueRangeSelectorCreator)
}
