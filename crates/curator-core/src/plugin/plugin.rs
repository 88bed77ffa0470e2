use super::data_representation::DataRepresentation;
use super::engine::Engine;
use super::identity::{CategorySet, derive_manager_key, namespace_and_name};
use crate::error::Result;
use std::any::Any;
use std::fmt;

/// Capability shared by every object that can be produced through the registry.
///
/// Identity (`class_namespace` + `class_name`) must stay constant for the whole
/// process run. The categories and keywords reported here must agree with what
/// the corresponding creator reports without instantiating the object.
pub trait Plugin: Send + Sync + fmt::Debug {
    fn class_name(&self) -> &str;

    fn class_namespace(&self) -> &str;

    /// Hierarchical categories, with an explicit primary category.
    fn categories(&self) -> CategorySet;

    /// Free-text tags. May be empty.
    fn keywords(&self) -> Vec<String> {
        Vec::new()
    }

    /// Access to the concrete type, for consumers that know what they asked for.
    fn as_any(&self) -> &dyn Any;

    fn class_namespace_and_name(&self) -> String {
        namespace_and_name(self.class_namespace(), self.class_name())
    }

    /// The key under which the type of this object is indexed in a registry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RegistryError::Configuration`] if the primary category is empty.
    fn manager_key(&self) -> Result<String> {
        derive_manager_key(
            &self.categories(),
            self.class_namespace(),
            self.class_name(),
        )
    }
}

/// Upcast from a role trait object (`dyn Engine`, `dyn DataRepresentation`) to `dyn Plugin`.
///
/// Implemented automatically for every sized plugin type.
pub trait AsPlugin {
    fn as_plugin(&self) -> &dyn Plugin;
}

impl<T: Plugin> AsPlugin for T {
    fn as_plugin(&self) -> &dyn Plugin {
        self
    }
}

/// The role a created object fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginRole {
    Plugin,
    Engine,
    DataRepresentation,
}

impl PluginRole {
    pub fn as_str(self) -> &'static str {
        match self {
            PluginRole::Plugin => "plugin",
            PluginRole::Engine => "engine",
            PluginRole::DataRepresentation => "data representation",
        }
    }
}

impl fmt::Display for PluginRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An owning handle to a freshly created plugin object, tagged with its role.
///
/// The registry never keeps these; ownership passes entirely to the caller.
#[derive(Debug)]
pub enum PluginObject {
    Plugin(Box<dyn Plugin>),
    Engine(Box<dyn Engine>),
    DataRepresentation(Box<dyn DataRepresentation>),
}

impl PluginObject {
    pub fn role(&self) -> PluginRole {
        match self {
            PluginObject::Plugin(_) => PluginRole::Plugin,
            PluginObject::Engine(_) => PluginRole::Engine,
            PluginObject::DataRepresentation(_) => PluginRole::DataRepresentation,
        }
    }

    pub fn as_plugin(&self) -> &dyn Plugin {
        match self {
            PluginObject::Plugin(plugin) => plugin.as_ref(),
            PluginObject::Engine(engine) => engine.as_plugin(),
            PluginObject::DataRepresentation(representation) => representation.as_plugin(),
        }
    }

    /// Narrows to an engine, handing the object back unchanged on a role mismatch.
    pub fn into_engine(self) -> std::result::Result<Box<dyn Engine>, PluginObject> {
        match self {
            PluginObject::Engine(engine) => Ok(engine),
            other => Err(other),
        }
    }

    pub fn into_data_representation(
        self,
    ) -> std::result::Result<Box<dyn DataRepresentation>, PluginObject> {
        match self {
            PluginObject::DataRepresentation(representation) => Ok(representation),
            other => Err(other),
        }
    }
}
