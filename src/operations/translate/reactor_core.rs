use crate::error::Result;
use crate::operations::naming::material_name;
use crate::operations::{BuildState, ComposeLattice, LatticeElement, ReactorParams};
use crate::properties::{keys, optional, require, PropertyStore};

/// Fill of core lattice slots not covered by an assembly.
const VOID: &str = "void";

/// Translates a core into a single lattice of assemblies.
///
/// Axial structure lives entirely inside the assemblies, so the core is
/// never sliced, ducted or stacked.
pub struct TranslateCore {
    name: String,
}

impl TranslateCore {
    /// Creates a new `TranslateCore` operation.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self { name: name.into() }
    }

    /// Executes the translation.
    ///
    /// The fill is the core's first `background_region_id` when declared,
    /// `void` otherwise.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`](crate::error::ConfigurationError) if
    /// the assembly grid or names are missing or malformed.
    pub fn execute(
        &self,
        store: &impl PropertyStore,
        params: &ReactorParams,
        state: &mut BuildState,
    ) -> Result<()> {
        let name = self.name.as_str();
        let kind = params.lattice_kind(name)?;
        let grid: Vec<Vec<i64>> = require(store, keys::ASSEMBLY_LATTICE, name)?;
        let names: Vec<String> = require(store, keys::ASSEMBLY_NAMES, name)?;
        let fill = optional::<Vec<i64>>(store, keys::BACKGROUND_REGION_ID, name)?
            .and_then(|ids| ids.first().copied())
            .map_or_else(|| VOID.to_owned(), material_name);

        ComposeLattice::new(
            kind,
            name.into(),
            grid,
            names.iter().map(|n| LatticeElement::named(n)).collect(),
            fill,
            None,
        )
        .declared_by(name, keys::ASSEMBLY_LATTICE)
        .execute(store, state)?;

        tracing::debug!(core = name, "translated core");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{LatticeKind, Unit};
    use crate::properties::MeshProperties;

    fn store() -> MeshProperties {
        MeshProperties::new()
            .with("a1", keys::PITCH, 20.0)
            .with("a2", keys::PITCH, 20.0)
            .with(
                "core",
                keys::ASSEMBLY_LATTICE,
                vec![vec![0_i64, 1], vec![1, 0, -1], vec![0, 1]],
            )
            .with("core", keys::ASSEMBLY_NAMES, vec!["a1", "a2"])
    }

    #[test]
    fn core_is_one_unsuffixed_lattice() {
        let params = ReactorParams::extruded(LatticeKind::Hex, vec![1.0, 2.0]);
        let mut state = BuildState::new();
        TranslateCore::new("core").execute(&store(), &params, &mut state).unwrap();

        let Some(Unit::Lattice(lattice)) = state.catalog.get("core") else {
            panic!("missing core lattice");
        };
        assert_eq!(lattice.kind, LatticeKind::Hex);
        assert_eq!(lattice.dimension, 3);
        assert_eq!(lattice.fill, "void");
        assert_eq!(lattice.elements[1], vec!["a2", "a1", "core_null"]);
        assert!(matches!(state.catalog.get("core_null"), Some(Unit::PolygonDuct(_))));
        assert_eq!(state.catalog.len(), 2);
    }

    #[test]
    fn declared_background_fills_core() {
        let store = store().with("core", keys::BACKGROUND_REGION_ID, vec![12_i64]);
        let mut state = BuildState::new();
        TranslateCore::new("core")
            .execute(&store, &ReactorParams::planar(LatticeKind::Hex), &mut state)
            .unwrap();
        let Some(Unit::Lattice(lattice)) = state.catalog.get("core") else {
            panic!("missing core lattice");
        };
        assert_eq!(lattice.fill, "material_12");
    }
}
