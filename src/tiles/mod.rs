pub mod cache;
pub mod source;

// Re-exports for convenience
pub use cache::TileCache;
pub use source::{TileSource, UrlTemplateSource};
