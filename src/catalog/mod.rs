mod unit;
mod wire;

pub use unit::{AxialEntry, AxialStack, LatticeKind, LatticeUnit, PinUnit, PolygonDuct, Ring, Unit};

use std::collections::HashMap;
use std::io::Write;

use crate::error::{ConfigurationError, McGeomError, Result};

/// Name-indexed collection of CSG units produced by one build.
///
/// Keeps insertion order so that serialized output is deterministic.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Catalog {
    units: Vec<(String, Unit)>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Creates a new, empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a unit under a fresh name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DuplicateUnit`] if the name is taken.
    pub fn insert(&mut self, name: impl Into<String>, unit: Unit) -> Result<()> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(ConfigurationError::DuplicateUnit(name).into());
        }
        self.index.insert(name.clone(), self.units.len());
        self.units.push((name, unit));
        Ok(())
    }

    /// Returns the unit with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Unit> {
        self.index.get(name).map(|&i| &self.units[i].1)
    }

    /// Returns `true` if a unit with the given name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the number of units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` if the catalog has no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Iterates over `(name, unit)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Unit)> {
        self.units.iter().map(|(name, unit)| (name.as_str(), unit))
    }

    /// Iterates over unit names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|(name, _)| name.as_str())
    }

    /// Checks that every referenced unit name resolves.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DanglingReference`] for the first
    /// reference that does not name a unit in this catalog.
    pub fn validate_references(&self) -> Result<()> {
        for (name, unit) in &self.units {
            if let Some(missing) = unit.references().into_iter().find(|r| !self.contains(r)) {
                return Err(ConfigurationError::DanglingReference {
                    unit: name.clone(),
                    reference: missing.into(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Serializes the catalog to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`McGeomError::Serialize`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(McGeomError::Serialize)
    }

    /// Writes the catalog as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self).map_err(McGeomError::Serialize)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
