/// Name of the slice of `base` at an axial level; 2-D builds use `base` as is.
pub(crate) fn axial_name(base: &str, axial: Option<usize>) -> String {
    match axial {
        Some(i) => format!("{base}_axial_{i}"),
        None => base.to_owned(),
    }
}

/// Name of the material with the given region id.
pub(crate) fn material_name(id: i64) -> String {
    format!("material_{id}")
}

/// Placeholder element filling empty lattice slots.
pub(crate) fn null_name(lattice: &str) -> String {
    format!("{lattice}_null")
}
