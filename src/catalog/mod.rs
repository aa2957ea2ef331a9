//! Translation catalogs: the tree, where it comes from, and the cache

mod directory;
mod loader;
mod memory;
mod source;
mod tree;

pub use directory::DirectorySource;
pub use loader::{
    CatalogLoader,
    LoadResult,
};
pub use memory::MemorySource;
pub use source::{
    CatalogSource,
    SourceError,
};
pub use tree::{
    CatalogError,
    CatalogNode,
    Lookup,
    TranslationCatalog,
};
