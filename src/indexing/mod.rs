pub mod pipeline;
pub mod progress;
pub mod symbol_table;
pub mod walker;

pub use pipeline::DocPipeline;
pub use progress::{PackageSummary, RunStats};
pub use symbol_table::{IndexedEntity, SymbolTable};
pub use walker::{
    AutoDiscovery, GoListDiscovery, PackageDiscovery, WalkDiscovery, discovery_for, package_files,
};
