use super::SurfaceId;

/// Side of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// Where the surface function is negative (inside a cylinder or sphere).
    Negative,
    /// Where the surface function is zero or positive.
    Positive,
}

/// A region of space built from surface half-spaces.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    Halfspace(SurfaceId, Sense),
    Intersection(Vec<Region>),
    Union(Vec<Region>),
    Complement(Box<Region>),
}

impl Region {
    /// Returns every surface this region depends on.
    #[must_use]
    pub fn surfaces(&self) -> Vec<SurfaceId> {
        let mut out = Vec::new();
        self.collect_surfaces(&mut out);
        out
    }

    fn collect_surfaces(&self, out: &mut Vec<SurfaceId>) {
        match self {
            Self::Halfspace(id, _) => {
                if !out.contains(id) {
                    out.push(*id);
                }
            }
            Self::Intersection(parts) | Self::Union(parts) => {
                for part in parts {
                    part.collect_surfaces(out);
                }
            }
            Self::Complement(inner) => inner.collect_surfaces(out),
        }
    }
}

/// What a cell is filled with.
#[derive(Debug, Clone, PartialEq)]
pub enum CellFill {
    Material(String),
    /// Another catalog unit placed inside the cell.
    Unit(String),
    Void,
}

/// A named region of uniform fill.
#[derive(Debug, Clone, PartialEq)]
pub struct CsgCell {
    pub name: String,
    pub region: Region,
    pub fill: CellFill,
}
