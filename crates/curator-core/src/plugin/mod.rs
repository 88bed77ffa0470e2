pub mod creator;
pub mod data_representation;
pub mod engine;
pub mod identity;
#[allow(clippy::module_inception)]
pub mod plugin;

pub use creator::{CreationPolicy, PluginCreator};
pub use data_representation::{DataRepresentation, DataRepresentationCreator};
pub use engine::{Engine, EngineCreator};
pub use identity::{Category, CategorySet, class_names_match, namespace_and_name};
pub use plugin::{AsPlugin, Plugin, PluginObject, PluginRole};
