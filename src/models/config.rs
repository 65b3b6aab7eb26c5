//! Grid model configuration
//!
//! Serializable description of a localization scenario, expanded into the
//! full model family with [`GridConfig::build`].

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::filter::errors::HmmError;
use crate::models::{ObservationModel, StateModel, TransitionModel};

/// Configuration for a grid localization scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Grid rows
    pub rows: usize,
    /// Grid columns
    pub cols: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { rows: 4, cols: 4 }
    }
}

impl GridConfig {
    /// Build the complete model family for this grid
    ///
    /// # Errors
    /// Returns [`HmmError::InvalidInput`] for grids with fewer than two cells.
    pub fn build(&self) -> Result<(StateModel, TransitionModel, ObservationModel), HmmError> {
        let sm = StateModel::new(self.rows, self.cols)?;
        let tm = TransitionModel::grid_walk(&sm)?;
        let om = ObservationModel::location_sensor(&sm);
        Ok((sm, tm, om))
    }

    /// Uniform prior belief over all states of this grid
    pub fn uniform_prior(&self) -> DVector<f64> {
        let n = self.rows * self.cols * crate::models::state::NUM_HEADINGS;
        DVector::from_element(n, 1.0 / n as f64)
    }
}
