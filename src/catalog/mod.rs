pub mod json;
pub mod loader;

pub use json::{CatalogError, load_catalog, parse_catalog};
pub use loader::CatalogLoader;
