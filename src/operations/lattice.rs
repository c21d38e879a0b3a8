use crate::catalog::{LatticeKind, LatticeUnit, PolygonDuct, Unit};
use crate::error::{BuildWarning, ConfigurationError, McGeomError, Result};
use crate::math::distinct_values;
use crate::properties::{keys, require, PropertyStore};

use super::naming::{axial_name, null_name};
use super::BuildState;

/// Grid index marking an empty lattice slot.
pub const EMPTY_SLOT: i64 = -1;

/// One entry of a lattice's element list.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeElement {
    /// Catalog name of the element, before any axial suffix.
    pub unit: String,
    /// Unit whose `pitch` property applies to this element.
    pub source: String,
}

impl LatticeElement {
    /// An element whose catalog name and property owner coincide.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            unit: name.into(),
            source: name.into(),
        }
    }
}

/// Composes one square or hex lattice unit from an index grid.
///
/// Grid entries index into the element list; [`EMPTY_SLOT`] entries become a
/// `<name>_null` placeholder, emitted alongside the lattice as a polygon of
/// fill material one pitch across.
pub struct ComposeLattice {
    kind: LatticeKind,
    name: String,
    grid: Vec<Vec<i64>>,
    elements: Vec<LatticeElement>,
    fill: String,
    axial: Option<usize>,
    owner: String,
    grid_key: &'static str,
}

impl ComposeLattice {
    /// Creates a new `ComposeLattice` operation.
    ///
    /// `name` is the full name of the lattice unit; `axial`, when given,
    /// suffixes every element name so the lattice references the matching
    /// slice of each element.
    #[must_use]
    pub fn new(
        kind: LatticeKind,
        name: String,
        grid: Vec<Vec<i64>>,
        elements: Vec<LatticeElement>,
        fill: String,
        axial: Option<usize>,
    ) -> Self {
        Self {
            kind,
            owner: name.clone(),
            name,
            grid,
            elements,
            fill,
            axial,
            grid_key: "lattice",
        }
    }

    /// Attributes grid validation errors to `key` on `owner`.
    #[must_use]
    pub fn declared_by(mut self, owner: &str, key: &'static str) -> Self {
        self.owner = owner.into();
        self.grid_key = key;
        self
    }

    /// Executes the operation, writing the lattice (and its null placeholder
    /// when needed) into the build state. Returns the lattice name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidProperty`] if the grid is empty,
    /// references an unknown element, has no filled slot, or is ragged while
    /// declared square; [`ConfigurationError::MissingProperty`] if an
    /// element has no `pitch`.
    pub fn execute(&self, store: &impl PropertyStore, state: &mut BuildState) -> Result<String> {
        self.validate_grid()?;

        let placeholder = null_name(&self.name);
        let mut has_null = false;
        let mut referenced: Vec<usize> = Vec::new();
        let mut rows = Vec::with_capacity(self.grid.len());
        for row in &self.grid {
            let mut names = Vec::with_capacity(row.len());
            for &index in row {
                if index == EMPTY_SLOT {
                    has_null = true;
                    names.push(placeholder.clone());
                    continue;
                }
                let slot = self.slot(index)?;
                if !referenced.contains(&slot) {
                    referenced.push(slot);
                }
                names.push(axial_name(&self.elements[slot].unit, self.axial));
            }
            rows.push(names);
        }

        let pitch = self.resolve_pitch(store, &referenced, state)?;

        if has_null {
            state.catalog.insert(
                placeholder,
                Unit::PolygonDuct(PolygonDuct {
                    sides: self.kind.sides(),
                    material: self.fill.clone(),
                    apothem: pitch / 2.0,
                    insert: None,
                }),
            )?;
        }
        state.catalog.insert(
            self.name.clone(),
            Unit::Lattice(LatticeUnit {
                kind: self.kind,
                dimension: self.kind.dimension(&self.grid),
                pitch,
                fill: self.fill.clone(),
                elements: rows,
            }),
        )?;
        Ok(self.name.clone())
    }

    fn validate_grid(&self) -> Result<()> {
        if self.grid.is_empty() || self.grid.iter().any(Vec::is_empty) {
            return Err(self.invalid("lattice grid has an empty row"));
        }
        if self.kind == LatticeKind::Square
            && LatticeKind::classify(&self.grid) != LatticeKind::Square
        {
            return Err(self.invalid("square lattice rows must all have the same length"));
        }
        if self.grid.iter().flatten().all(|&i| i == EMPTY_SLOT) {
            return Err(self.invalid("lattice has no filled slots"));
        }
        Ok(())
    }

    fn slot(&self, index: i64) -> Result<usize> {
        usize::try_from(index)
            .ok()
            .filter(|&i| i < self.elements.len())
            .ok_or_else(|| {
                self.invalid(format!(
                    "index {index} is outside the {} declared elements",
                    self.elements.len()
                ))
            })
    }

    /// Takes the largest element pitch, warning when they disagree.
    fn resolve_pitch(
        &self,
        store: &impl PropertyStore,
        referenced: &[usize],
        state: &mut BuildState,
    ) -> Result<f64> {
        let mut pitches = Vec::with_capacity(referenced.len());
        for &slot in referenced {
            pitches.push(require::<f64>(store, keys::PITCH, &self.elements[slot].source)?);
        }
        let distinct = distinct_values(&pitches);
        if distinct.len() > 1 {
            state.warn(BuildWarning::PitchConflict {
                unit: self.name.clone(),
                distinct: distinct.len(),
            });
        }
        Ok(distinct.into_iter().fold(f64::NEG_INFINITY, f64::max))
    }

    fn invalid(&self, reason: impl Into<String>) -> McGeomError {
        ConfigurationError::invalid(self.grid_key, &self.owner, reason).into()
    }
}
