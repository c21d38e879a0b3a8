use crate::catalog::Catalog;
use crate::error::{BuildWarning, ConfigurationError, Result};
use crate::graph::{GeometryGraph, NodeKind};
use crate::properties::PropertyStore;

use super::translate::{TranslateAssembly, TranslateCore, TranslatePin};
use super::{BuildState, ReactorParams};

/// Result of a successful build.
#[derive(Debug)]
pub struct CatalogBuild {
    pub catalog: Catalog,
    pub warnings: Vec<BuildWarning>,
}

/// Compiles a geometry graph into a catalog of CSG units.
///
/// Without a root every node is translated; with a root only the root and
/// the nodes feeding geometry into it are. Nodes are visited inputs first,
/// each dispatched on its declared kind. Nodes of other kinds are skipped.
#[derive(Debug, Default)]
pub struct BuildCatalog {
    root: Option<String>,
}

impl BuildCatalog {
    /// Creates a build over the whole graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a build limited to `root` and its ancestors.
    #[must_use]
    pub fn for_root(root: &str) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Executes the build.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownUnit`] or
    /// [`ConfigurationError::UnsupportedRootKind`] for a bad root, and any
    /// error raised while translating a unit. A failed build returns no
    /// catalog.
    pub fn execute<G, S>(&self, graph: &G, store: &S) -> Result<CatalogBuild>
    where
        G: GeometryGraph,
        S: PropertyStore,
    {
        if let Some(root) = &self.root {
            let kind = graph
                .kind_of(root)
                .ok_or_else(|| ConfigurationError::UnknownUnit(root.clone()))?;
            if !kind.is_geometry() {
                return Err(ConfigurationError::UnsupportedRootKind {
                    unit: root.clone(),
                    kind: kind.to_string(),
                }
                .into());
            }
        }

        let scope = self.scope(graph)?;
        let mut state = BuildState::new();
        if !scope
            .iter()
            .any(|name| graph.kind_of(name).is_some_and(NodeKind::is_geometry))
        {
            tracing::info!("no geometry units in scope");
            return Ok(CatalogBuild {
                catalog: state.catalog,
                warnings: state.warnings,
            });
        }

        let params = ReactorParams::resolve(store, &self.candidates(&scope))?;

        for name in &scope {
            match graph.kind_of(name) {
                Some(NodeKind::Pin) => TranslatePin::new(name).execute(store, &params, &mut state)?,
                Some(NodeKind::Assembly) => {
                    TranslateAssembly::new(name).execute(store, &params, &mut state)?;
                }
                Some(NodeKind::Core) => TranslateCore::new(name).execute(store, &params, &mut state)?,
                Some(NodeKind::Other(_)) | None => continue,
            }
        }

        state.catalog.validate_references()?;
        tracing::info!(
            units = state.catalog.len(),
            warnings = state.warnings.len(),
            "built unit catalog"
        );
        Ok(CatalogBuild {
            catalog: state.catalog,
            warnings: state.warnings,
        })
    }

    /// Names in scope, inputs before consumers.
    fn scope(&self, graph: &impl GeometryGraph) -> Result<Vec<String>> {
        let order = graph.topological_order()?;
        Ok(match &self.root {
            None => order,
            Some(root) => {
                let ancestors = graph.ancestors_of(root);
                order
                    .into_iter()
                    .filter(|name| name == root || ancestors.contains(name))
                    .collect()
            }
        })
    }

    /// Units searched for build-wide attributes, the root first.
    fn candidates(&self, scope: &[String]) -> Vec<String> {
        let mut candidates: Vec<String> = self.root.iter().cloned().collect();
        candidates.extend(
            scope
                .iter()
                .filter(|name| self.root.as_ref() != Some(*name))
                .cloned(),
        );
        candidates
    }
}
