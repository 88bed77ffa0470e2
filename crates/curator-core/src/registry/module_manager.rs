use super::table::Registry;
use crate::plugin::PluginCreator;

/// The registry of every creator, whatever its role.
///
/// Engine and data representation creators are registered here as well as in
/// their role-specific managers.
pub type ModuleManager = Registry<dyn PluginCreator>;
