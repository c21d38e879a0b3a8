use crate::catalog::{LatticeKind, PolygonDuct, Unit};
use crate::error::{ConfigurationError, Result};
use crate::math::is_strictly_ascending;
use crate::properties::keys;

use super::naming::{axial_name, material_name};
use super::BuildState;

/// Wraps a unit in concentric polygonal duct shells.
///
/// Half-pitches are walked innermost to outermost: the first duct inserts
/// the wrapped unit, every later duct inserts the one before it. In a 2-D
/// build the outermost duct takes the assembly's own name.
pub struct NestDucts {
    assembly: String,
    kind: LatticeKind,
    halfpitches: Vec<f64>,
    materials: Vec<i64>,
    axial: Option<usize>,
    insert: String,
}

impl NestDucts {
    /// Creates a new `NestDucts` operation.
    ///
    /// `materials[k]` is the region id of duct `k`; `insert` is the unit the
    /// innermost duct wraps.
    #[must_use]
    pub fn new(
        assembly: &str,
        kind: LatticeKind,
        halfpitches: Vec<f64>,
        materials: Vec<i64>,
        axial: Option<usize>,
        insert: String,
    ) -> Self {
        Self {
            assembly: assembly.into(),
            kind,
            halfpitches,
            materials,
            axial,
            insert,
        }
    }

    /// Name of duct `k`.
    fn duct_name(&self, k: usize) -> String {
        if self.axial.is_none() && k + 1 == self.halfpitches.len() {
            self.assembly.clone()
        } else {
            axial_name(&format!("{}_duct_{k}", self.assembly), self.axial)
        }
    }

    /// Executes the operation and returns the name of the outermost duct.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidProperty`] if there are no
    /// half-pitches, they are not positive and strictly ascending, or the
    /// material count differs from the duct count.
    pub fn execute(&self, state: &mut BuildState) -> Result<String> {
        if self.halfpitches.is_empty() || !is_strictly_ascending(&self.halfpitches) {
            return Err(ConfigurationError::invalid(
                keys::DUCT_HALFPITCHES,
                &self.assembly,
                "duct half-pitches must be positive and strictly ascending",
            )
            .into());
        }
        if self.materials.len() != self.halfpitches.len() {
            return Err(ConfigurationError::invalid(
                keys::DUCT_REGION_IDS,
                &self.assembly,
                format!(
                    "expected {} duct region ids, found {}",
                    self.halfpitches.len(),
                    self.materials.len()
                ),
            )
            .into());
        }

        let mut inner = self.insert.clone();
        for (k, (&apothem, &material)) in self.halfpitches.iter().zip(&self.materials).enumerate() {
            let name = self.duct_name(k);
            state.catalog.insert(
                name.clone(),
                Unit::PolygonDuct(PolygonDuct {
                    sides: self.kind.sides(),
                    material: material_name(material),
                    apothem,
                    insert: Some(inner),
                }),
            )?;
            inner = name;
        }
        Ok(inner)
    }
}
