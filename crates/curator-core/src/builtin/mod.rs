//! A small reference plugin library.
//!
//! Selectors, packing engines, and the coordinate and energy-table
//! representations they work on. Useful as a baseline for inspection tools
//! and as a template for third-party libraries.

pub mod engines;
pub mod representations;
pub mod selectors;

use crate::context::PluginContext;
use crate::error::Result;
use crate::registry::PluginLibrary;

pub const LIBRARY_NAME: &str = "curator-builtin";

/// Builds the built-in library. Creators are added in a fixed order.
pub fn library() -> PluginLibrary {
    let library = PluginLibrary::new(LIBRARY_NAME);
    let library = selectors::register(library);
    let library = engines::register(library);
    representations::register(library)
}

/// Registers the built-in library with `context`.
pub fn register_all(context: &PluginContext) -> Result<()> {
    context.register_library(library())
}
