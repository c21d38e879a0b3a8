mod value;

pub use value::{FromProperty, PropertyValue};

use std::collections::HashMap;

use crate::error::{ConfigurationError, PropertyError};

/// Property keys read by the catalog builder.
pub mod keys {
    pub const IS_SINGLE_PIN: &str = "is_single_pin";
    pub const PIN_LATTICE: &str = "pin_lattice";
    pub const ASSEMBLY_LATTICE: &str = "assembly_lattice";
    pub const PIN_NAMES: &str = "pin_names";
    pub const ASSEMBLY_NAMES: &str = "assembly_names";
    pub const RING_RADII: &str = "ring_radii";
    pub const RING_REGION_IDS: &str = "ring_region_ids";
    pub const BACKGROUND_REGION_ID: &str = "background_region_id";
    pub const DUCT_REGION_IDS: &str = "duct_region_ids";
    pub const DUCT_HALFPITCHES: &str = "duct_halfpitches";
    pub const PITCH: &str = "pitch";
    pub const MESH_DIMENSIONS: &str = "mesh_dimensions";
    pub const MESH_GEOMETRY: &str = "mesh_geometry";
    pub const AXIAL_MESH_SIZES: &str = "axial_mesh_sizes";
}

/// Read-only key/value lookup of geometric attributes per named unit.
pub trait PropertyStore {
    /// Returns the raw value stored under `key` for `unit`.
    fn value(&self, key: &str, unit: &str) -> Option<&PropertyValue>;

    /// Returns `true` if `unit` declares `key`.
    fn has(&self, key: &str, unit: &str) -> bool {
        self.value(key, unit).is_some()
    }

    /// Returns the typed value stored under `key` for `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::NotFound`] if the key is absent, or
    /// [`PropertyError::WrongType`] if the value cannot be read as `T`.
    fn get<T: FromProperty>(&self, key: &str, unit: &str) -> Result<T, PropertyError> {
        let value = self.value(key, unit).ok_or_else(|| PropertyError::NotFound {
            key: key.into(),
            unit: unit.into(),
        })?;
        T::from_property(value).ok_or_else(|| PropertyError::WrongType {
            key: key.into(),
            unit: unit.into(),
            expected: T::EXPECTED,
        })
    }
}

/// Reads a required property, reporting absence as a configuration error.
pub(crate) fn require<T: FromProperty>(
    store: &impl PropertyStore,
    key: &str,
    unit: &str,
) -> Result<T, ConfigurationError> {
    Ok(store.get(key, unit)?)
}

/// Reads an optional property; present-but-mistyped values are still errors.
pub(crate) fn optional<T: FromProperty>(
    store: &impl PropertyStore,
    key: &str,
    unit: &str,
) -> Result<Option<T>, ConfigurationError> {
    if store.has(key, unit) {
        require(store, key, unit).map(Some)
    } else {
        Ok(None)
    }
}

/// In-memory property store keyed by unit name, then property key.
#[derive(Debug, Default, Clone)]
pub struct MeshProperties {
    units: HashMap<String, HashMap<String, PropertyValue>>,
}

impl MeshProperties {
    /// Creates a new, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` on `unit`, replacing any previous value.
    pub fn set(&mut self, unit: &str, key: &str, value: impl Into<PropertyValue>) {
        self.units
            .entry(unit.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Builder-style variant of [`MeshProperties::set`].
    #[must_use]
    pub fn with(mut self, unit: &str, key: &str, value: impl Into<PropertyValue>) -> Self {
        self.set(unit, key, value);
        self
    }
}

impl PropertyStore for MeshProperties {
    fn value(&self, key: &str, unit: &str) -> Option<&PropertyValue> {
        self.units.get(unit).and_then(|props| props.get(key))
    }
}
