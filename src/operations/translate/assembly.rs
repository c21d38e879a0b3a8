use crate::error::{ConfigurationError, Result};
use crate::operations::naming::{axial_name, material_name};
use crate::operations::{
    BuildState, ComposeLattice, LatticeElement, NestDucts, ReactorParams, StackAxial,
};
use crate::properties::{keys, optional, require, PropertyStore};

use super::pin::emit_pin_slices;

/// Translates an assembly: a pin lattice per axial level, optionally wrapped
/// in ducts, stacked axially in 3-D.
///
/// The assembly's own name always resolves to a concrete unit: the stack in
/// 3-D, the outermost duct in 2-D, or a copy of the lattice when there are
/// no ducts.
pub struct TranslateAssembly {
    name: String,
}

impl TranslateAssembly {
    /// Creates a new `TranslateAssembly` operation.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self { name: name.into() }
    }

    /// Executes the translation.
    ///
    /// Units flagged `is_single_pin` become a one-element lattice of their
    /// own ring slices, emitted as `<name>_pin`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if a required property is missing or
    /// malformed, or a produced name collides with an existing unit.
    pub fn execute(
        &self,
        store: &impl PropertyStore,
        params: &ReactorParams,
        state: &mut BuildState,
    ) -> Result<()> {
        let name = self.name.as_str();
        let kind = params.lattice_kind(name)?;

        let single_pin = optional::<bool>(store, keys::IS_SINGLE_PIN, name)?.unwrap_or(false);
        let (grid, elements) = if single_pin {
            let pin = format!("{name}_pin");
            emit_pin_slices(store, params, state, name, &pin)?;
            let element = LatticeElement {
                unit: pin,
                source: name.into(),
            };
            (vec![vec![0]], vec![element])
        } else {
            let grid: Vec<Vec<i64>> = require(store, keys::PIN_LATTICE, name)?;
            let names: Vec<String> = require(store, keys::PIN_NAMES, name)?;
            let elements = names.iter().map(|n| LatticeElement::named(n)).collect();
            (grid, elements)
        };

        let background: Vec<i64> = require(store, keys::BACKGROUND_REGION_ID, name)?;
        params.check_axial_rows(&background, keys::BACKGROUND_REGION_ID, name)?;

        let halfpitches =
            optional::<Vec<f64>>(store, keys::DUCT_HALFPITCHES, name)?.filter(|h| !h.is_empty());
        let ducts = match halfpitches {
            Some(halfpitches) => {
                let ids: Vec<Vec<i64>> = require(store, keys::DUCT_REGION_IDS, name)?;
                params.check_axial_rows(&ids, keys::DUCT_REGION_IDS, name)?;
                Some((halfpitches, ids))
            }
            None => None,
        };

        let mut stack = params
            .is_extruded()
            .then(|| StackAxial::new(name, &params.axial_heights));
        let mut planar_top = None;

        for (i, axial) in params.axial_levels().into_iter().enumerate() {
            let lattice = ComposeLattice::new(
                kind,
                axial_name(&format!("{name}_lattice"), axial),
                grid.clone(),
                elements.clone(),
                material_name(background[i]),
                axial,
            )
            .declared_by(name, keys::PIN_LATTICE)
            .execute(store, state)?;

            let top = match &ducts {
                Some((halfpitches, ids)) => NestDucts::new(
                    name,
                    kind,
                    halfpitches.clone(),
                    ids[i].clone(),
                    axial,
                    lattice,
                )
                .execute(state)?,
                None => lattice,
            };

            match (stack.as_mut(), axial) {
                (Some(stack), Some(level)) => stack.push(level, top),
                _ => planar_top = Some(top),
            }
        }

        if let Some(stack) = stack {
            stack.execute(state)?;
        } else if ducts.is_none() {
            let lattice = planar_top.unwrap_or_default();
            let unit = state.catalog.get(&lattice).cloned().ok_or_else(|| {
                ConfigurationError::DanglingReference {
                    unit: name.into(),
                    reference: lattice.clone(),
                }
            })?;
            state.catalog.insert(name, unit)?;
        }

        tracing::debug!(assembly = name, "translated assembly");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::catalog::{LatticeKind, Unit};
    use crate::operations::translate::TranslatePin;
    use crate::properties::MeshProperties;

    fn planar_store() -> MeshProperties {
        MeshProperties::new()
            .with("p", keys::PITCH, 1.26)
            .with("assy", keys::PIN_LATTICE, vec![vec![0_i64, 0], vec![0, -1]])
            .with("assy", keys::PIN_NAMES, vec!["p"])
            .with("assy", keys::BACKGROUND_REGION_ID, vec![7_i64])
    }

    fn ducted(store: MeshProperties, rows: usize) -> MeshProperties {
        store
            .with("assy", keys::DUCT_HALFPITCHES, vec![0.5, 0.8, 1.0])
            .with("assy", keys::DUCT_REGION_IDS, vec![vec![4_i64, 5, 6]; rows])
    }

    // ── 2-D ────────────────────────────────────────────────────

    #[test]
    fn planar_without_ducts_exposes_lattice_under_assembly_name() {
        let mut state = BuildState::new();
        TranslateAssembly::new("assy")
            .execute(&planar_store(), &ReactorParams::planar(LatticeKind::Square), &mut state)
            .unwrap();

        assert_eq!(state.catalog.get("assy"), state.catalog.get("assy_lattice"));
        let Some(Unit::Lattice(lattice)) = state.catalog.get("assy") else {
            panic!("assembly name does not resolve to a lattice");
        };
        assert_eq!(lattice.fill, "material_7");
        assert_eq!(lattice.elements[1], vec!["p", "assy_lattice_null"]);
        assert!(state.catalog.contains("assy_lattice_null"));
    }

    #[test]
    fn planar_ducts_nest_ascending_and_outermost_is_assembly() {
        let mut state = BuildState::new();
        TranslateAssembly::new("assy")
            .execute(
                &ducted(planar_store(), 1),
                &ReactorParams::planar(LatticeKind::Square),
                &mut state,
            )
            .unwrap();

        let duct = |n: &str| match state.catalog.get(n) {
            Some(Unit::PolygonDuct(d)) => d.clone(),
            other => panic!("expected duct {n}, found {other:?}"),
        };
        assert_eq!(duct("assy_duct_0").insert.as_deref(), Some("assy_lattice"));
        assert_relative_eq!(duct("assy_duct_0").apothem, 0.5);
        assert_eq!(duct("assy_duct_1").insert.as_deref(), Some("assy_duct_0"));
        assert_relative_eq!(duct("assy").apothem, 1.0);
        assert_eq!(duct("assy").insert.as_deref(), Some("assy_duct_1"));
    }

    // ── 3-D ────────────────────────────────────────────────────

    #[test]
    fn extruded_assembly_stacks_outermost_ducts() {
        let store = ducted(
            MeshProperties::new()
                .with("p", keys::PITCH, 1.26)
                .with("assy", keys::PIN_LATTICE, vec![vec![0_i64]])
                .with("assy", keys::PIN_NAMES, vec!["p"])
                .with("assy", keys::BACKGROUND_REGION_ID, vec![7_i64, 8]),
            2,
        );
        let params = ReactorParams::extruded(LatticeKind::Hex, vec![5.0, 6.0]);
        let mut state = BuildState::new();
        TranslateAssembly::new("assy").execute(&store, &params, &mut state).unwrap();

        let Some(Unit::AxialStack(stack)) = state.catalog.get("assy") else {
            panic!("missing stack");
        };
        let units: Vec<&str> = stack.entries.iter().map(|e| e.unit.as_str()).collect();
        assert_eq!(units, vec!["assy_duct_2_axial_0", "assy_duct_2_axial_1"]);

        let Some(Unit::Lattice(top)) = state.catalog.get("assy_lattice_axial_1") else {
            panic!("missing lattice slice");
        };
        assert_eq!(top.elements, vec![vec!["p_axial_1"]]);
        assert_eq!(top.fill, "material_8");
        assert_eq!(top.kind, LatticeKind::Hex);
    }

    #[test]
    fn extruded_without_ducts_stacks_lattices() {
        let store = MeshProperties::new()
            .with("p", keys::PITCH, 1.0)
            .with("assy", keys::PIN_LATTICE, vec![vec![0_i64]])
            .with("assy", keys::PIN_NAMES, vec!["p"])
            .with("assy", keys::BACKGROUND_REGION_ID, vec![1_i64, 1, 1]);
        let params = ReactorParams::extruded(LatticeKind::Square, vec![1.0, 1.0, 1.0]);
        let mut state = BuildState::new();
        TranslateAssembly::new("assy").execute(&store, &params, &mut state).unwrap();

        let Some(Unit::AxialStack(stack)) = state.catalog.get("assy") else {
            panic!("missing stack");
        };
        assert_eq!(stack.entries.len(), 3);
        assert_eq!(stack.entries[2].unit, "assy_lattice_axial_2");
    }

    // ── Single pin ─────────────────────────────────────────────

    #[test]
    fn extruded_single_pin_pin_matches_single_pin_assembly() {
        let params = ReactorParams::extruded(LatticeKind::Square, vec![5.0, 7.5]);
        let store = |name: &str| {
            MeshProperties::new()
                .with(name, keys::IS_SINGLE_PIN, true)
                .with(name, keys::PITCH, 1.5)
                .with(name, keys::RING_RADII, vec![0.3, 0.6])
                .with(name, keys::RING_REGION_IDS, vec![vec![1_i64, 2], vec![5, 6]])
                .with(name, keys::BACKGROUND_REGION_ID, vec![3_i64, 7])
        };

        let mut as_pin = BuildState::new();
        TranslatePin::new("u").execute(&store("u"), &params, &mut as_pin).unwrap();
        let mut as_assembly = BuildState::new();
        TranslateAssembly::new("u")
            .execute(&store("u"), &params, &mut as_assembly)
            .unwrap();
        assert_eq!(as_pin.catalog, as_assembly.catalog);

        let catalog = &as_pin.catalog;
        assert_eq!(
            catalog.names().collect::<Vec<_>>(),
            vec![
                "u_pin_axial_0",
                "u_pin_axial_1",
                "u_lattice_axial_0",
                "u_lattice_axial_1",
                "u"
            ]
        );
        let Some(Unit::Lattice(top)) = catalog.get("u_lattice_axial_1") else {
            panic!("missing upper lattice");
        };
        assert_eq!(top.elements, vec![vec!["u_pin_axial_1"]]);
        assert_eq!(top.fill, "material_7");
        assert_relative_eq!(top.pitch, 1.5);
        let Some(Unit::AxialStack(stack)) = catalog.get("u") else {
            panic!("missing stack");
        };
        let levels: Vec<&str> = stack.entries.iter().map(|e| e.unit.as_str()).collect();
        assert_eq!(levels, vec!["u_lattice_axial_0", "u_lattice_axial_1"]);
        catalog.validate_references().unwrap();
    }

    fn single_pin_store(name: &str) -> MeshProperties {
        MeshProperties::new()
            .with(name, keys::IS_SINGLE_PIN, true)
            .with(name, keys::PITCH, 1.5)
            .with(name, keys::RING_RADII, vec![0.3, 0.6])
            .with(name, keys::RING_REGION_IDS, vec![vec![1_i64, 2]])
            .with(name, keys::BACKGROUND_REGION_ID, vec![3_i64])
    }

    #[test]
    fn single_pin_becomes_one_element_lattice() {
        let mut state = BuildState::new();
        TranslateAssembly::new("sp")
            .execute(
                &single_pin_store("sp"),
                &ReactorParams::planar(LatticeKind::Square),
                &mut state,
            )
            .unwrap();

        assert!(matches!(state.catalog.get("sp_pin"), Some(Unit::Pin(_))));
        let Some(Unit::Lattice(lattice)) = state.catalog.get("sp") else {
            panic!("missing public lattice");
        };
        assert_eq!(lattice.elements, vec![vec!["sp_pin"]]);
        assert_relative_eq!(lattice.pitch, 1.5);
        state.catalog.validate_references().unwrap();
    }

    #[test]
    fn single_pin_pin_matches_single_pin_assembly() {
        let params = ReactorParams::planar(LatticeKind::Square);
        let store = single_pin_store("sp");

        let mut as_pin = BuildState::new();
        TranslatePin::new("sp").execute(&store, &params, &mut as_pin).unwrap();
        let mut as_assembly = BuildState::new();
        TranslateAssembly::new("sp")
            .execute(&store, &params, &mut as_assembly)
            .unwrap();

        assert_eq!(as_pin.catalog, as_assembly.catalog);
    }

    // ── Error cases ────────────────────────────────────────────

    #[test]
    fn background_rows_must_match_axial_count() {
        let params = ReactorParams::extruded(LatticeKind::Square, vec![1.0, 2.0]);
        let result =
            TranslateAssembly::new("assy").execute(&planar_store(), &params, &mut BuildState::new());
        assert!(result.is_err());
    }
}
