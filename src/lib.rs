pub mod catalog;
pub mod csg;
pub mod document;
pub mod error;
pub mod graph;
pub mod math;
pub mod operations;
pub mod properties;

pub use catalog::{Catalog, Unit};
pub use error::{BuildWarning, ConfigurationError, McGeomError, Result};
pub use operations::{BuildCatalog, CatalogBuild};
