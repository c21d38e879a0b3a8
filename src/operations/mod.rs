mod axial;
mod build;
mod duct;
mod lattice;
mod naming;
mod params;
pub mod translate;

pub use axial::StackAxial;
pub use build::{BuildCatalog, CatalogBuild};
pub use duct::NestDucts;
pub use lattice::{ComposeLattice, LatticeElement};
pub use params::{Dimensionality, ReactorParams};

use crate::catalog::Catalog;
use crate::error::BuildWarning;

/// Mutable state owned by a single build: the catalog under construction and
/// the warnings raised so far.
#[derive(Debug, Default)]
pub struct BuildState {
    pub catalog: Catalog,
    pub warnings: Vec<BuildWarning>,
}

impl BuildState {
    /// Creates an empty build state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a non-fatal warning and reports it on the log.
    pub fn warn(&mut self, warning: BuildWarning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }
}
