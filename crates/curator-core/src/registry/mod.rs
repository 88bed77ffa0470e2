pub mod data_representation_manager;
pub mod engine_manager;
pub mod library_manager;
pub mod module_manager;
pub mod table;

pub use data_representation_manager::{DataRepresentationManager, DataRepresentationRequestResult};
pub use engine_manager::EngineManager;
pub use library_manager::{LibraryManager, LibrarySummary, PluginLibrary};
pub use module_manager::ModuleManager;
pub use table::Registry;
