//! Observation/sensor model
//!
//! Per-state likelihoods for each sensor reading, stored as a
//! (states x readings) table. Column `r` is the diagonal of the likelihood
//! matrix for reading `r`. The sensor may also report nothing; that outcome
//! has probability mass in the model (it drives simulation) but is never
//! looked up as a likelihood column, since the inference update is skipped
//! for a missing reading.

use nalgebra::{DMatrix, DVectorView};

use crate::filter::errors::{HmmError, InvalidInputError};
use crate::models::state::StateModel;

/// Sensor report probability for the true cell
const TRUE_CELL_PROBABILITY: f64 = 0.1;
/// Sensor report probability for each cell one ring out
const FIRST_RING_PROBABILITY: f64 = 0.05;
/// Sensor report probability for each cell two rings out
const SECOND_RING_PROBABILITY: f64 = 0.025;

/// Sensor likelihoods for every (state, reading) pair
#[derive(Debug, Clone)]
pub struct ObservationModel {
    /// Entry `(s, r)` is `P(reading = r | state = s)`
    likelihoods: DMatrix<f64>,
}

impl ObservationModel {
    /// Wrap a (states x readings) likelihood table
    pub fn new(likelihoods: DMatrix<f64>) -> Self {
        Self { likelihoods }
    }

    /// Build the two-ring location sensor for a grid state space
    ///
    /// Given true position L the sensor reports L with probability 0.1, each
    /// of the up-to-8 cells directly surrounding L with probability 0.05,
    /// each of the up-to-16 cells in the next ring with probability 0.025,
    /// and nothing with the remaining mass. Likelihoods are independent of
    /// heading.
    pub fn location_sensor(sm: &StateModel) -> Self {
        let mut likelihoods = DMatrix::zeros(sm.num_states(), sm.num_readings());

        for state in 0..sm.num_states() {
            let (row, col) = sm.state_position(state);
            for reading in 0..sm.num_readings() {
                let (rr, rc) = sm.reading_position(reading);
                let dr = (row as isize - rr as isize).abs();
                let dc = (col as isize - rc as isize).abs();
                likelihoods[(state, reading)] = match dr.max(dc) {
                    0 => TRUE_CELL_PROBABILITY,
                    1 => FIRST_RING_PROBABILITY,
                    2 => SECOND_RING_PROBABILITY,
                    _ => 0.0,
                };
            }
        }

        log::debug!(
            "built location_sensor observation model: {} states, {} readings",
            sm.num_states(),
            sm.num_readings()
        );

        Self { likelihoods }
    }

    /// Per-state likelihood vector for a reading
    ///
    /// # Errors
    /// Returns [`InvalidInputError::UnknownReading`] for readings outside the
    /// model's domain.
    pub fn likelihood(&self, reading: usize) -> Result<DVectorView<'_, f64>, HmmError> {
        if reading >= self.num_readings() {
            return Err(InvalidInputError::UnknownReading {
                reading,
                num_readings: self.num_readings(),
            }
            .into());
        }
        Ok(self.likelihoods.column(reading))
    }

    /// `P(reading = r | state = s)` table lookup
    pub fn reading_probability(&self, state: usize, reading: usize) -> f64 {
        self.likelihoods[(state, reading)]
    }

    /// `P(no reading | state = s)`, the mass not assigned to any reading
    pub fn nothing_probability(&self, state: usize) -> f64 {
        1.0 - self.likelihoods.row(state).sum()
    }

    /// Number of states
    pub fn num_states(&self) -> usize {
        self.likelihoods.nrows()
    }

    /// Number of readings in the model's domain
    pub fn num_readings(&self) -> usize {
        self.likelihoods.ncols()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::state::Heading;

    #[test]
    fn test_unknown_reading_rejected() {
        let om = ObservationModel::new(DMatrix::from_element(4, 2, 0.5));
        assert!(om.likelihood(1).is_ok());
        let err = om.likelihood(2).unwrap_err();
        assert!(matches!(
            err,
            HmmError::InvalidInput(InvalidInputError::UnknownReading { reading: 2, .. })
        ));
    }

    #[test]
    fn test_location_sensor_ring_values() {
        let sm = StateModel::new(5, 5).unwrap();
        let om = ObservationModel::location_sensor(&sm);

        let state = sm.state_index(2, 2, Heading::North);
        assert!((om.reading_probability(state, sm.reading_index(2, 2)) - 0.1).abs() < 1e-12);
        assert!((om.reading_probability(state, sm.reading_index(1, 1)) - 0.05).abs() < 1e-12);
        assert!((om.reading_probability(state, sm.reading_index(0, 2)) - 0.025).abs() < 1e-12);
        assert_eq!(om.reading_probability(state, sm.reading_index(2, 2)), 0.1);
    }

    #[test]
    fn test_location_sensor_report_distribution_sums_to_one() {
        let sm = StateModel::new(4, 6).unwrap();
        let om = ObservationModel::location_sensor(&sm);

        for state in 0..sm.num_states() {
            let total: f64 = (0..om.num_readings())
                .map(|r| om.reading_probability(state, r))
                .sum::<f64>()
                + om.nothing_probability(state);
            assert!((total - 1.0).abs() < 1e-12, "state {}: {}", state, total);
        }
    }

    #[test]
    fn test_location_sensor_center_nothing_probability() {
        // Center of a 5x5 grid sees the full 8 + 16 rings:
        // 1 - 0.1 - 8*0.05 - 16*0.025 = 0.1
        let sm = StateModel::new(5, 5).unwrap();
        let om = ObservationModel::location_sensor(&sm);
        let center = sm.state_index(2, 2, Heading::North);
        assert!((om.nothing_probability(center) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_location_sensor_heading_independent() {
        let sm = StateModel::new(3, 3).unwrap();
        let om = ObservationModel::location_sensor(&sm);
        let reading = sm.reading_index(1, 2);
        let base = om.reading_probability(sm.state_index(0, 1, Heading::North), reading);
        for h in Heading::ALL {
            assert_eq!(
                om.reading_probability(sm.state_index(0, 1, h), reading),
                base
            );
        }
    }
}
