//! JSON description of a reactor mesh graph and its unit properties.

use std::collections::HashMap;
use std::io::Read;

use serde::Deserialize;

use crate::error::{DocumentError, Result};
use crate::graph::{MeshGraph, NodeKind};
use crate::operations::{BuildCatalog, CatalogBuild};
use crate::properties::{MeshProperties, PropertyValue};

fn default_true() -> bool {
    true
}

/// One node of the mesh graph as written in a document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitSpec {
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

/// A geometry document: the mesh graph, its properties, and build options.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeometryDocument {
    /// When `false`, no catalog should be generated.
    #[serde(default = "default_true")]
    pub generate_mc_geometry: bool,
    /// Unit to build; the whole graph when absent.
    #[serde(default)]
    pub root: Option<String>,
    pub units: Vec<UnitSpec>,
}

impl GeometryDocument {
    /// Parses a document from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Parse`] for malformed JSON.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text).map_err(DocumentError::from)?)
    }

    /// Parses a document from a reader.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Parse`] for malformed JSON or a failed read.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader).map_err(DocumentError::from)?)
    }

    /// Splits the document into a mesh graph and a property store.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::UnknownInput`] when a unit lists an input
    /// that is not declared, and a graph error for duplicate names or cycles.
    pub fn to_parts(&self) -> Result<(MeshGraph, MeshProperties)> {
        let mut graph = MeshGraph::new();
        let mut store = MeshProperties::new();
        for unit in &self.units {
            graph.add_node(&unit.name, NodeKind::from_label(&unit.kind))?;
            for (key, value) in &unit.properties {
                store.set(&unit.name, key, value.clone());
            }
        }
        for unit in &self.units {
            for input in &unit.inputs {
                if graph.id(input).is_err() {
                    return Err(DocumentError::UnknownInput {
                        unit: unit.name.clone(),
                        input: input.clone(),
                    }
                    .into());
                }
                graph.connect(input, &unit.name)?;
            }
        }
        tracing::debug!(units = graph.len(), "loaded geometry document");
        Ok((graph, store))
    }

    /// Builds the catalog described by this document.
    ///
    /// An explicit `root` overrides the document's own.
    ///
    /// # Errors
    ///
    /// Returns any loading or build error.
    pub fn build(&self, root: Option<&str>) -> Result<CatalogBuild> {
        let (graph, store) = self.to_parts()?;
        let op = match root.or(self.root.as_deref()) {
            Some(root) => BuildCatalog::for_root(root),
            None => BuildCatalog::new(),
        };
        op.execute(&graph, &store)
    }
}
