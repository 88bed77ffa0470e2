//! # Curator
//!
//! A plugin registry with typed request resolution. Independently built plugin
//! libraries register stateless factories ("creators") for abstract roles, and
//! calling code later asks which registered creators satisfy a request before
//! instantiating the one it wants.
//!
//! ## Architecture
//!
//! - **[`plugin`]: The Protocol.** The `Plugin` capability trait, the
//!   `PluginCreator` factory trait and its role-specific refinements
//!   (`EngineCreator`, `DataRepresentationCreator`), plus category paths and
//!   the naming rules that derive a creator's registry key.
//!
//! - **[`request`]: Selection.** Composable criteria (name, category, keyword,
//!   engine compatibility, properties, and AND / OR / NOT) combined into a
//!   `Request` that is evaluated against creator metadata only.
//!
//! - **[`registry`]: Storage and Lookup.** The generic, lock-guarded
//!   `Registry` table with its keyword and category indices, the engine and
//!   data representation managers built on it, and the `LibraryManager` that
//!   registers whole plugin libraries atomically.
//!
//! - **[`context`]: Ownership.** `PluginContext` owns one set of managers and
//!   is the only place a `ManagerCreationKey` can come from. A process-wide
//!   instance is available through `PluginContext::global`.
//!
//! ```
//! use curator::{builtin, EngineRequest, KeywordMode, PluginContext};
//!
//! let context = PluginContext::new();
//! builtin::register_all(&context)?;
//!
//! let mut request = EngineRequest::new();
//! request.add_keyword_requirement(["packing", "greedy"], KeywordMode::MustHaveAll);
//! let engines = context.engine_manager().get_engines_matching(&request);
//! assert_eq!(engines.len(), 1);
//!
//! let engine = engines[0].create_engine()?;
//! assert_eq!(engine.class_name(), "GreedyPacker");
//! # Ok::<(), curator::RegistryError>(())
//! ```

pub mod builtin;
pub mod config;
pub mod context;
pub mod error;
pub mod plugin;
pub mod registry;
pub mod request;

pub use config::{ConfigLoadError, RegistryConfig, RegistryConfigBuilder};
pub use context::{ManagerCreationKey, PluginContext};
pub use error::{RegistryError, Result};
pub use plugin::{
    AsPlugin, Category, CategorySet, CreationPolicy, DataRepresentation,
    DataRepresentationCreator, Engine, EngineCreator, Plugin, PluginCreator, PluginObject,
    PluginRole, class_names_match,
};
pub use registry::{
    DataRepresentationManager, DataRepresentationRequestResult, EngineManager, LibraryManager,
    LibrarySummary, ModuleManager, PluginLibrary, Registry,
};
pub use request::{
    Criterion, CriterionRef, DataRepresentationRequest, EngineRequest, KeywordMode,
    PluginRequest, Request,
};
