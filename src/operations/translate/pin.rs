use crate::catalog::{PinUnit, Ring, Unit};
use crate::error::{ConfigurationError, Result};
use crate::math::is_strictly_ascending;
use crate::operations::naming::{axial_name, material_name};
use crate::operations::{BuildState, ReactorParams, StackAxial};
use crate::properties::{keys, optional, require, PropertyStore};

use super::TranslateAssembly;

/// Translates a pin unit into ring slices, stacked axially in 3-D.
///
/// A pin flagged `is_single_pin` stands in for a whole assembly and is
/// translated by [`TranslateAssembly`] instead.
pub struct TranslatePin {
    name: String,
}

impl TranslatePin {
    /// Creates a new `TranslatePin` operation.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self { name: name.into() }
    }

    /// Executes the translation.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if ring properties are missing or
    /// malformed, or a produced name collides with an existing unit.
    pub fn execute(
        &self,
        store: &impl PropertyStore,
        params: &ReactorParams,
        state: &mut BuildState,
    ) -> Result<()> {
        if optional::<bool>(store, keys::IS_SINGLE_PIN, &self.name)?.unwrap_or(false) {
            return TranslateAssembly::new(&self.name).execute(store, params, state);
        }

        emit_pin_slices(store, params, state, &self.name, &self.name)?;

        if params.is_extruded() {
            let mut stack = StackAxial::new(&self.name, &params.axial_heights);
            for axial in params.axial_levels().into_iter().flatten() {
                stack.push(axial, axial_name(&self.name, Some(axial)));
            }
            stack.execute(state)?;
        }
        Ok(())
    }
}

/// Emits one pin unit per axial level, named `<base>` in 2-D and
/// `<base>_axial_<i>` in 3-D, from the ring properties declared on `owner`.
pub(crate) fn emit_pin_slices(
    store: &impl PropertyStore,
    params: &ReactorParams,
    state: &mut BuildState,
    owner: &str,
    base: &str,
) -> Result<()> {
    let radii: Vec<f64> = require(store, keys::RING_RADII, owner)?;
    if radii.is_empty() || !is_strictly_ascending(&radii) {
        return Err(ConfigurationError::invalid(
            keys::RING_RADII,
            owner,
            "ring radii must be positive and strictly ascending",
        )
        .into());
    }

    let region_ids: Vec<Vec<i64>> = require(store, keys::RING_REGION_IDS, owner)?;
    params.check_axial_rows(&region_ids, keys::RING_REGION_IDS, owner)?;

    for (axial, ids) in params.axial_levels().into_iter().zip(&region_ids) {
        if ids.len() != radii.len() {
            return Err(ConfigurationError::invalid(
                keys::RING_REGION_IDS,
                owner,
                format!("expected {} ring region ids, found {}", radii.len(), ids.len()),
            )
            .into());
        }
        let rings = ids
            .iter()
            .zip(&radii)
            .map(|(&id, &outer_radius)| Ring {
                material: material_name(id),
                outer_radius,
            })
            .collect();
        state
            .catalog
            .insert(axial_name(base, axial), Unit::Pin(PinUnit { rings }))?;
    }
    Ok(())
}
