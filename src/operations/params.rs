use crate::catalog::LatticeKind;
use crate::error::{ConfigurationError, Result};
use crate::math::approx_eq;
use crate::properties::{keys, optional, FromProperty, PropertyStore};

/// Number of spatial dimensions of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimensionality {
    Two,
    Three,
}

/// Build-wide attributes, declared once and shared by every translated unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactorParams {
    pub dimensions: Dimensionality,
    /// Declared lattice geometry; required only once a lattice is composed.
    pub geometry: Option<LatticeKind>,
    /// Axial region heights, bottom to top. Empty for 2-D models.
    pub axial_heights: Vec<f64>,
}

impl ReactorParams {
    /// Creates 2-D parameters.
    #[must_use]
    pub fn planar(geometry: LatticeKind) -> Self {
        Self {
            dimensions: Dimensionality::Two,
            geometry: Some(geometry),
            axial_heights: Vec::new(),
        }
    }

    /// Creates 3-D parameters with the given axial heights.
    #[must_use]
    pub fn extruded(geometry: LatticeKind, axial_heights: Vec<f64>) -> Self {
        Self {
            dimensions: Dimensionality::Three,
            geometry: Some(geometry),
            axial_heights,
        }
    }

    /// Resolves the parameters from the units of one build.
    ///
    /// `candidates` are searched in order (requested root first); the first
    /// declaration of each attribute wins and every later declaration must
    /// agree with it.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if `mesh_dimensions` is never
    /// declared, a value is malformed, or two units disagree.
    pub fn resolve(store: &impl PropertyStore, candidates: &[String]) -> Result<Self> {
        let first = candidates.first().map_or("", String::as_str);

        let (dims, dims_unit) =
            first_declared::<i64>(store, keys::MESH_DIMENSIONS, candidates, |a, b| a == b)?
                .ok_or_else(|| ConfigurationError::MissingProperty {
                    key: keys::MESH_DIMENSIONS.into(),
                    unit: first.into(),
                })?;
        let dimensions = match dims {
            2 => Dimensionality::Two,
            3 => Dimensionality::Three,
            other => {
                return Err(ConfigurationError::invalid(
                    keys::MESH_DIMENSIONS,
                    &dims_unit,
                    format!("expected 2 or 3, found {other}"),
                )
                .into())
            }
        };

        let geometry = match first_declared::<String>(store, keys::MESH_GEOMETRY, candidates, |a, b| {
            a == b
        })? {
            Some((label, unit)) => Some(LatticeKind::from_declared(&label).ok_or_else(|| {
                ConfigurationError::invalid(
                    keys::MESH_GEOMETRY,
                    &unit,
                    format!("expected 'square' or 'hex', found '{label}'"),
                )
            })?),
            None => None,
        };

        let axial_heights = match dimensions {
            Dimensionality::Two => Vec::new(),
            Dimensionality::Three => {
                let (heights, unit) = first_declared::<Vec<f64>>(
                    store,
                    keys::AXIAL_MESH_SIZES,
                    candidates,
                    |a, b| a.len() == b.len() && a.iter().zip(b).all(|(x, y)| approx_eq(*x, *y)),
                )?
                .ok_or_else(|| ConfigurationError::MissingProperty {
                    key: keys::AXIAL_MESH_SIZES.into(),
                    unit: first.into(),
                })?;
                if heights.is_empty() || heights.iter().any(|&h| h <= 0.0) {
                    return Err(ConfigurationError::invalid(
                        keys::AXIAL_MESH_SIZES,
                        &unit,
                        "axial heights must be a non-empty list of positive values",
                    )
                    .into());
                }
                heights
            }
        };

        Ok(Self {
            dimensions,
            geometry,
            axial_heights,
        })
    }

    /// Returns the declared lattice geometry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingProperty`] naming `unit` if no
    /// unit in the build declares `mesh_geometry`.
    pub fn lattice_kind(&self, unit: &str) -> Result<LatticeKind> {
        self.geometry.ok_or_else(|| {
            ConfigurationError::MissingProperty {
                key: keys::MESH_GEOMETRY.into(),
                unit: unit.into(),
            }
            .into()
        })
    }

    /// Returns `true` for 3-D models.
    #[must_use]
    pub fn is_extruded(&self) -> bool {
        self.dimensions == Dimensionality::Three
    }

    /// Number of axial regions; 2-D models have exactly one.
    #[must_use]
    pub fn axial_count(&self) -> usize {
        match self.dimensions {
            Dimensionality::Two => 1,
            Dimensionality::Three => self.axial_heights.len(),
        }
    }

    /// Axial levels to translate, bottom to top; `None` is the single 2-D level.
    #[must_use]
    pub fn axial_levels(&self) -> Vec<Option<usize>> {
        match self.dimensions {
            Dimensionality::Two => vec![None],
            Dimensionality::Three => (0..self.axial_heights.len()).map(Some).collect(),
        }
    }

    /// Checks that a per-axial table has one row per axial region.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidProperty`] on a length mismatch.
    pub fn check_axial_rows<T>(&self, rows: &[T], key: &str, unit: &str) -> Result<()> {
        if rows.len() == self.axial_count() {
            Ok(())
        } else {
            Err(ConfigurationError::invalid(
                key,
                unit,
                format!(
                    "expected {} axial rows, found {}",
                    self.axial_count(),
                    rows.len()
                ),
            )
            .into())
        }
    }
}

/// Finds the first declaration of `key` among `candidates` and checks that
/// all later declarations agree with it.
fn first_declared<T: FromProperty>(
    store: &impl PropertyStore,
    key: &str,
    candidates: &[String],
    agree: impl Fn(&T, &T) -> bool,
) -> Result<Option<(T, String)>> {
    let mut found: Option<(T, String)> = None;
    for unit in candidates {
        let Some(value) = optional::<T>(store, key, unit)? else {
            continue;
        };
        match &found {
            None => found = Some((value, unit.clone())),
            Some((first, _)) if agree(first, &value) => {}
            Some(_) => {
                return Err(ConfigurationError::InconsistentDeclaration {
                    key: key.into(),
                    unit: unit.clone(),
                }
                .into())
            }
        }
    }
    Ok(found)
}
