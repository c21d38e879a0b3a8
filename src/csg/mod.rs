//! Analytic CSG primitives: surfaces, half-space regions, and cells.

mod cell;
mod surface;

pub use cell::{CellFill, CsgCell, Region, Sense};
pub use surface::CsgSurface;

use slotmap::SlotMap;

use crate::catalog::PinUnit;
use crate::error::{GeometryError, Result};
use crate::math::Point3;

slotmap::new_key_type! {
    /// Unique identifier for a surface in a [`CsgModel`].
    pub struct SurfaceId;
}

slotmap::new_key_type! {
    /// Unique identifier for a cell in a [`CsgModel`].
    pub struct CellId;
}

/// Arena owning the surfaces and cells of a CSG description.
#[derive(Debug, Default)]
pub struct CsgModel {
    surfaces: SlotMap<SurfaceId, CsgSurface>,
    cells: SlotMap<CellId, CsgCell>,
}

impl CsgModel {
    /// Creates a new, empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a surface and returns its ID.
    pub fn add_surface(&mut self, surface: CsgSurface) -> SurfaceId {
        self.surfaces.insert(surface)
    }

    /// Returns a reference to the surface, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SurfaceNotFound`] if the ID is stale.
    pub fn surface(&self, id: SurfaceId) -> Result<&CsgSurface> {
        self.surfaces
            .get(id)
            .ok_or_else(|| GeometryError::SurfaceNotFound(format!("{id:?}")).into())
    }

    /// Inserts a cell and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::SurfaceNotFound`] if the region references a
    /// surface not in this model.
    pub fn add_cell(&mut self, cell: CsgCell) -> Result<CellId> {
        for id in cell.region.surfaces() {
            self.surface(id)?;
        }
        Ok(self.cells.insert(cell))
    }

    /// Iterates over cells in insertion order.
    pub fn cells(&self) -> impl Iterator<Item = &CsgCell> {
        self.cells.values()
    }

    /// Returns the number of surfaces.
    #[must_use]
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// Returns `true` if `point` lies in `region`.
    ///
    /// # Errors
    ///
    /// Returns an error if the region references an unknown surface.
    pub fn contains(&self, region: &Region, point: &Point3) -> Result<bool> {
        Ok(match region {
            Region::Halfspace(id, sense) => {
                let value = self.surface(*id)?.evaluate(point);
                match sense {
                    Sense::Negative => value < 0.0,
                    Sense::Positive => value >= 0.0,
                }
            }
            Region::Intersection(parts) => {
                for part in parts {
                    if !self.contains(part, point)? {
                        return Ok(false);
                    }
                }
                true
            }
            Region::Union(parts) => {
                for part in parts {
                    if self.contains(part, point)? {
                        return Ok(true);
                    }
                }
                false
            }
            Region::Complement(inner) => !self.contains(inner, point)?,
        })
    }

    /// Returns the first cell containing `point`.
    ///
    /// # Errors
    ///
    /// Returns an error if a cell references an unknown surface.
    pub fn cell_at(&self, point: &Point3) -> Result<Option<&CsgCell>> {
        for cell in self.cells.values() {
            if self.contains(&cell.region, point)? {
                return Ok(Some(cell));
            }
        }
        Ok(None)
    }

    /// Builds the cells of a pin: one z-cylinder per ring, and one annular
    /// cell per ring named `<name>_ring_<k>`, plus an unbounded `void`
    /// cell outside the last ring.
    ///
    /// # Errors
    ///
    /// Returns an error if a ring radius is non-positive.
    pub fn from_pin(name: &str, pin: &PinUnit) -> Result<Self> {
        let mut model = Self::new();
        let mut inner: Option<SurfaceId> = None;
        for (k, ring) in pin.rings.iter().enumerate() {
            let outer = model.add_surface(CsgSurface::z_cylinder(0.0, 0.0, ring.outer_radius)?);
            let inside = Region::Halfspace(outer, Sense::Negative);
            let region = match inner {
                Some(prev) => Region::Intersection(vec![
                    inside,
                    Region::Halfspace(prev, Sense::Positive),
                ]),
                None => inside,
            };
            model.add_cell(CsgCell {
                name: format!("{name}_ring_{k}"),
                region,
                fill: CellFill::Material(ring.material.clone()),
            })?;
            inner = Some(outer);
        }
        if let Some(last) = inner {
            model.add_cell(CsgCell {
                name: format!("{name}_outside"),
                region: Region::Halfspace(last, Sense::Positive),
                fill: CellFill::Void,
            })?;
        }
        Ok(model)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Ring;

    fn pin() -> PinUnit {
        PinUnit {
            rings: vec![
                Ring { material: "material_1".into(), outer_radius: 0.4 },
                Ring { material: "material_2".into(), outer_radius: 0.5 },
            ],
        }
    }

    #[test]
    fn pin_cells_are_annular() {
        let model = CsgModel::from_pin("fuel", &pin()).unwrap();
        assert_eq!(model.surface_count(), 2);
        assert_eq!(model.cells().count(), 3);

        let at = |x: f64| {
            model
                .cell_at(&Point3::new(x, 0.0, 12.0))
                .unwrap()
                .map(|c| c.name.clone())
        };
        assert_eq!(at(0.1).as_deref(), Some("fuel_ring_0"));
        assert_eq!(at(0.45).as_deref(), Some("fuel_ring_1"));
        assert_eq!(at(0.9).as_deref(), Some("fuel_outside"));
    }

    #[test]
    fn complement_and_union() {
        let mut model = CsgModel::new();
        let lo = model.add_surface(CsgSurface::ZPlane { z0: 0.0 });
        let hi = model.add_surface(CsgSurface::ZPlane { z0: 1.0 });
        let slab = Region::Intersection(vec![
            Region::Halfspace(lo, Sense::Positive),
            Region::Halfspace(hi, Sense::Negative),
        ]);
        let outside = Region::Complement(Box::new(slab.clone()));
        let p = Point3::new(0.0, 0.0, 0.5);
        assert!(model.contains(&slab, &p).unwrap());
        assert!(!model.contains(&outside, &p).unwrap());
        let either = Region::Union(vec![slab, outside]);
        assert!(model.contains(&either, &Point3::new(0.0, 0.0, 5.0)).unwrap());
        assert_eq!(either.surfaces(), vec![lo, hi]);
    }

    #[test]
    fn cells_must_reference_known_surfaces() {
        let mut other = CsgModel::new();
        let foreign = other.add_surface(CsgSurface::XPlane { x0: 0.0 });
        let mut model = CsgModel::new();
        let result = model.add_cell(CsgCell {
            name: "bad".into(),
            region: Region::Halfspace(foreign, Sense::Negative),
            fill: CellFill::Unit("elsewhere".into()),
        });
        assert!(result.is_err());
        assert_eq!(model.cells().count(), 0);
    }
}
