//! JSON wire format consumed by the transport solver.
//!
//! Each unit serializes as `[TAG, payload]`; field names and tag strings are
//! fixed by the downstream reader.

use serde::ser::{SerializeMap, SerializeTuple};
use serde::{Serialize, Serializer};

use super::{AxialStack, Catalog, LatticeKind, LatticeUnit, PinUnit, PolygonDuct, Ring, Unit};

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (name, unit) in self.iter() {
            map.serialize_entry(name, unit)?;
        }
        map.end()
    }
}

impl Serialize for Unit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(self.tag())?;
        match self {
            Self::Pin(pin) => tuple.serialize_element(pin)?,
            Self::Lattice(lattice) => tuple.serialize_element(lattice)?,
            Self::PolygonDuct(duct) => tuple.serialize_element(duct)?,
            Self::AxialStack(stack) => tuple.serialize_element(stack)?,
        }
        tuple.end()
    }
}

impl Serialize for Ring {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.material, self.outer_radius).serialize(serializer)
    }
}

impl Serialize for PinUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("rings", &self.rings)?;
        map.end()
    }
}

impl Serialize for LatticeUnit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let dimension_key = match self.kind {
            LatticeKind::Square => "dim",
            LatticeKind::Hex => "num_rings",
        };
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry(dimension_key, &self.dimension)?;
        map.serialize_entry("pitch", &self.pitch)?;
        map.serialize_entry("fill", &self.fill)?;
        map.serialize_entry("elements", &self.elements)?;
        map.end()
    }
}

impl Serialize for PolygonDuct {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("sides", &self.sides)?;
        map.serialize_entry("material", &self.material)?;
        map.serialize_entry("apothem", &self.apothem)?;
        let inserts: Vec<&str> = self.insert.iter().map(String::as_str).collect();
        map.serialize_entry("inserts", &inserts)?;
        map.end()
    }
}

impl Serialize for AxialStack {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries: Vec<(&str, f64)> = self
            .entries
            .iter()
            .map(|e| (e.unit.as_str(), e.height))
            .collect();
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("stack", &entries)?;
        map.end()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::catalog::AxialEntry;

    #[test]
    fn hex_lattice_uses_num_rings_key() {
        let unit = Unit::Lattice(LatticeUnit {
            kind: LatticeKind::Hex,
            dimension: 3,
            pitch: 2.0,
            fill: "material_0".into(),
            elements: vec![vec!["p".into(); 2], vec!["p".into(); 3], vec!["p".into(); 2]],
        });
        let value = serde_json::to_value(&unit).unwrap();
        assert_eq!(value[0], json!("HEX_MAP"));
        assert_eq!(value[1]["num_rings"], json!(3));
        assert!(value[1].get("dim").is_none());
    }

    #[test]
    fn duct_without_insert_has_empty_inserts() {
        let unit = Unit::PolygonDuct(PolygonDuct {
            sides: 4,
            material: "material_3".into(),
            apothem: 0.63,
            insert: None,
        });
        assert_eq!(
            serde_json::to_value(&unit).unwrap(),
            json!(["POLYGON_DOMAIN", {"sides": 4, "material": "material_3", "apothem": 0.63, "inserts": []}])
        );
    }

    #[test]
    fn catalog_serializes_in_insertion_order() {
        let mut catalog = Catalog::new();
        catalog
            .insert(
                "pin_axial_0",
                Unit::Pin(PinUnit {
                    rings: vec![Ring { material: "material_1".into(), outer_radius: 0.4 }],
                }),
            )
            .unwrap();
        catalog
            .insert(
                "pin",
                Unit::AxialStack(AxialStack {
                    entries: vec![AxialEntry { unit: "pin_axial_0".into(), height: 1.5 }],
                }),
            )
            .unwrap();
        let text = catalog.to_json_string().unwrap();
        let first = text.find("\"pin_axial_0\"").unwrap();
        let second = text.find("\"pin\":").unwrap();
        assert!(first < second);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["pin_axial_0"], json!(["PIN", {"rings": [["material_1", 0.4]]}]));
        assert_eq!(value["pin"], json!(["AXIAL_STACK", {"stack": [["pin_axial_0", 1.5]]}]));
    }
}
