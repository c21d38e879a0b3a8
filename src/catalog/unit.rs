/// Tiling pattern of a lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatticeKind {
    Square,
    Hex,
}

impl LatticeKind {
    /// Parses the declared `mesh_geometry` attribute.
    #[must_use]
    pub fn from_declared(label: &str) -> Option<Self> {
        match label {
            "square" | "Square" | "SQUARE" => Some(Self::Square),
            "hex" | "Hex" | "HEX" | "hexagon" => Some(Self::Hex),
            _ => None,
        }
    }

    /// Classifies a grid by its shape: uniform row lengths read as square,
    /// ragged rows as hex.
    ///
    /// A hex pattern whose rows happen to be uniform classifies as square,
    /// so this only validates a declared kind and never selects one.
    #[must_use]
    pub fn classify<T>(grid: &[Vec<T>]) -> Self {
        match grid.first() {
            Some(first) if grid.iter().any(|row| row.len() != first.len()) => Self::Hex,
            _ => Self::Square,
        }
    }

    /// Returns the lattice dimension: the row length for square grids, the
    /// ring count `ceil(rows / 2) + 1` for hex grids.
    #[must_use]
    pub fn dimension<T>(self, grid: &[Vec<T>]) -> usize {
        match self {
            Self::Square => grid.first().map_or(0, Vec::len),
            Self::Hex => grid.len().div_ceil(2) + 1,
        }
    }

    /// Number of sides of a polygon tiling this lattice.
    #[must_use]
    pub fn sides(self) -> u32 {
        match self {
            Self::Square => 4,
            Self::Hex => 6,
        }
    }
}

/// One concentric ring of a pin, innermost first.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    pub material: String,
    pub outer_radius: f64,
}

/// A pin cell: concentric material rings.
#[derive(Debug, Clone, PartialEq)]
pub struct PinUnit {
    pub rings: Vec<Ring>,
}

/// A square or hex tiling of named units.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeUnit {
    pub kind: LatticeKind,
    /// Grid side length (square) or ring count (hex).
    pub dimension: usize,
    pub pitch: f64,
    pub fill: String,
    /// Element unit names, rows in declaration order.
    pub elements: Vec<Vec<String>>,
}

/// A polygonal shell of one material, optionally wrapping another unit.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonDuct {
    pub sides: u32,
    pub material: String,
    /// Half-pitch of the polygon.
    pub apothem: f64,
    pub insert: Option<String>,
}

/// One level of an axial stack.
#[derive(Debug, Clone, PartialEq)]
pub struct AxialEntry {
    pub unit: String,
    pub height: f64,
}

/// Units stacked bottom-to-top along the extrusion axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxialStack {
    pub entries: Vec<AxialEntry>,
}

/// A named CSG entry in a [`Catalog`](super::Catalog).
#[derive(Debug, Clone, PartialEq)]
pub enum Unit {
    Pin(PinUnit),
    Lattice(LatticeUnit),
    PolygonDuct(PolygonDuct),
    AxialStack(AxialStack),
}

impl Unit {
    /// Returns the wire-format kind tag.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Pin(_) => "PIN",
            Self::Lattice(lattice) => match lattice.kind {
                LatticeKind::Square => "SQUARE_MAP",
                LatticeKind::Hex => "HEX_MAP",
            },
            Self::PolygonDuct(_) => "POLYGON_DOMAIN",
            Self::AxialStack(_) => "AXIAL_STACK",
        }
    }

    /// Returns every unit name this unit refers to.
    #[must_use]
    pub fn references(&self) -> Vec<&str> {
        match self {
            Self::Pin(_) => Vec::new(),
            Self::Lattice(lattice) => lattice
                .elements
                .iter()
                .flatten()
                .map(String::as_str)
                .collect(),
            Self::PolygonDuct(duct) => duct.insert.iter().map(String::as_str).collect(),
            Self::AxialStack(stack) => stack.entries.iter().map(|e| e.unit.as_str()).collect(),
        }
    }
}
