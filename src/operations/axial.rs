use crate::catalog::{AxialEntry, AxialStack, Unit};
use crate::error::{ConfigurationError, Result};
use crate::properties::keys;

use super::BuildState;

/// Accumulates one unit per axial level and emits them as a stack.
pub struct StackAxial {
    name: String,
    heights: Vec<f64>,
    levels: Vec<(usize, String)>,
}

impl StackAxial {
    /// Creates a new `StackAxial` operation for a stack with the given level heights.
    #[must_use]
    pub fn new(name: &str, heights: &[f64]) -> Self {
        Self {
            name: name.into(),
            heights: heights.to_vec(),
            levels: Vec::with_capacity(heights.len()),
        }
    }

    /// Records `unit` as the content of axial level `axial`.
    pub fn push(&mut self, axial: usize, unit: String) {
        self.levels.push((axial, unit));
    }

    /// Executes the operation, writing the stack ordered bottom to top.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidProperty`] unless exactly one
    /// unit was pushed for every axial level.
    pub fn execute(mut self, state: &mut BuildState) -> Result<String> {
        self.levels.sort_by_key(|(axial, _)| *axial);
        let complete = self.levels.len() == self.heights.len()
            && self.levels.iter().enumerate().all(|(i, (axial, _))| i == *axial);
        if !complete {
            return Err(ConfigurationError::invalid(
                keys::AXIAL_MESH_SIZES,
                &self.name,
                format!(
                    "stack has {} levels for {} axial regions",
                    self.levels.len(),
                    self.heights.len()
                ),
            )
            .into());
        }

        let entries = self
            .levels
            .into_iter()
            .zip(&self.heights)
            .map(|((_, unit), &height)| AxialEntry { unit, height })
            .collect();
        state
            .catalog
            .insert(self.name.clone(), Unit::AxialStack(AxialStack { entries }))?;
        Ok(self.name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_bottom_to_top() {
        let mut state = BuildState::new();
        let mut stack = StackAxial::new("pin", &[1.0, 2.0, 3.0]);
        stack.push(2, "pin_axial_2".into());
        stack.push(0, "pin_axial_0".into());
        stack.push(1, "pin_axial_1".into());
        stack.execute(&mut state).unwrap();

        let Some(Unit::AxialStack(s)) = state.catalog.get("pin") else {
            panic!("missing stack");
        };
        let units: Vec<&str> = s.entries.iter().map(|e| e.unit.as_str()).collect();
        assert_eq!(units, vec!["pin_axial_0", "pin_axial_1", "pin_axial_2"]);
        let heights: Vec<f64> = s.entries.iter().map(|e| e.height).collect();
        assert_eq!(heights, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn missing_level_is_rejected() {
        let mut stack = StackAxial::new("pin", &[1.0, 2.0]);
        stack.push(0, "pin_axial_0".into());
        assert!(stack.execute(&mut BuildState::new()).is_err());
    }

    #[test]
    fn repeated_level_is_rejected() {
        let mut stack = StackAxial::new("pin", &[1.0, 2.0]);
        stack.push(0, "a".into());
        stack.push(0, "b".into());
        assert!(stack.execute(&mut BuildState::new()).is_err());
    }
}
