//! Observation vector.

/// Fixed-length observation vector of an environment.
///
/// The length is set at construction and never changes: [`Observation::overwrite`]
/// copies values in place. Learning agents use the positions of the vector as
/// feature indices, so each environment documents its order.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    data: Vec<f64>,
}

impl Observation {
    /// Creates an observation of `dim` zeros.
    pub fn zeros(dim: usize) -> Self {
        Self {
            data: vec![0.0; dim],
        }
    }

    /// Overwrites the values of the observation.
    ///
    /// # Panics
    ///
    /// Panics if `values.len()` differs from the dimension of the observation.
    pub fn overwrite(&mut self, values: &[f64]) {
        self.data.copy_from_slice(values);
    }

    /// Returns the values.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns the dimension of the observation.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` for a zero-dimensional observation.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the value at index `ix`.
    pub fn get(&self, ix: usize) -> Option<f64> {
        self.data.get(ix).copied()
    }
}

impl AsRef<[f64]> for Observation {
    fn as_ref(&self) -> &[f64] {
        &self.data
    }
}
