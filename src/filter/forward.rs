//! Forward filter
//!
//! Maintains a running belief distribution over hidden states and advances it
//! one time step per call: predict through the transition model, update with
//! the sensor likelihood when a reading is available, renormalize.

use nalgebra::DVector;

use crate::common::linalg::{is_normalized, normalize};
use crate::filter::errors::{HmmError, InvalidInputError};
use crate::models::{ObservationModel, StateModel, TransitionModel};

/// Stateful HMM forward filter
///
/// Holds the current belief `P(state | readings so far)` and immutable
/// references to its model collaborators. Not internally synchronized;
/// concurrent `advance` calls on one instance must be serialized by the
/// caller.
#[derive(Debug, Clone)]
pub struct HmmFilter<'m> {
    transition: &'m TransitionModel,
    observation: &'m ObservationModel,
    belief: DVector<f64>,
}

impl<'m> HmmFilter<'m> {
    /// Create a filter from an initial belief and its model collaborators
    ///
    /// # Errors
    /// Returns [`HmmError::InvalidInput`] when the initial belief's length or
    /// either model's state count disagrees with the state model, or when the
    /// initial belief does not sum to 1 within tolerance.
    pub fn new(
        initial: DVector<f64>,
        transition: &'m TransitionModel,
        observation: &'m ObservationModel,
        state_model: &StateModel,
    ) -> Result<Self, HmmError> {
        let n = state_model.num_states();
        check_states(initial.len(), n, "initial belief length")?;
        check_states(transition.num_states(), n, "transition model states")?;
        check_states(observation.num_states(), n, "observation model states")?;
        if !is_normalized(&initial) {
            return Err(InvalidInputError::NotNormalized { sum: initial.sum() }.into());
        }
        Ok(Self {
            transition,
            observation,
            belief: initial,
        })
    }

    /// Advance the belief one time step
    ///
    /// Predicts through the transition model, scales by the sensor likelihood
    /// when `reading` is `Some`, and renormalizes. With no reading the result
    /// is pure prediction; the update step is skipped outright, not replaced
    /// by an identity multiply.
    ///
    /// Returns an independent copy of the new belief. On failure the internal
    /// belief is left exactly as it was before the call.
    ///
    /// # Errors
    /// [`HmmError::InvalidInput`] for a reading outside the observation
    /// model's domain; [`HmmError::NumericalDegeneracy`] when the reading has
    /// zero likelihood under every state with nonzero predicted probability.
    pub fn advance(&mut self, reading: Option<usize>) -> Result<DVector<f64>, HmmError> {
        // Predict: marginalize over the previous state
        let mut candidate = self.transition.matrix() * &self.belief;

        // Update: Bayes' rule numerator, skipped for a missing reading
        if let Some(r) = reading {
            let likelihood = self.observation.likelihood(r)?;
            candidate.component_mul_assign(&likelihood);
        }

        // Normalize: Bayes' rule denominator. Commit only on success.
        normalize(&mut candidate, "forward update")?;
        self.belief = candidate;
        Ok(self.belief.clone())
    }

    /// The current belief
    pub fn belief(&self) -> &DVector<f64> {
        &self.belief
    }

    /// Number of states
    pub fn num_states(&self) -> usize {
        self.belief.len()
    }
}

fn check_states(actual: usize, expected: usize, context: &str) -> Result<(), HmmError> {
    if actual != expected {
        return Err(InvalidInputError::DimensionMismatch {
            expected,
            actual,
            context: context.to_string(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    fn two_state_models() -> (TransitionModel, ObservationModel) {
        let tm = TransitionModel::new(DMatrix::from_row_slice(2, 2, &[0.7, 0.3, 0.3, 0.7]))
            .unwrap();
        // Reading 0 = "A", reading 1 assigns zero likelihood everywhere
        let om = ObservationModel::new(DMatrix::from_row_slice(
            2,
            2,
            &[0.9, 0.0, 0.2, 0.0],
        ));
        (tm, om)
    }

    fn uniform(n: usize) -> DVector<f64> {
        DVector::from_element(n, 1.0 / n as f64)
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        let (tm, om) = two_state_models();
        let sm = StateModel::flat(2).unwrap();
        let err = HmmFilter::new(uniform(8), &tm, &om, &sm).unwrap_err();
        assert!(matches!(
            err,
            HmmError::InvalidInput(InvalidInputError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_new_rejects_unnormalized_belief() {
        let sm = StateModel::new(2, 2).unwrap();
        let tm = TransitionModel::grid_walk(&sm).unwrap();
        let om = ObservationModel::location_sensor(&sm);
        let bad = DVector::from_element(sm.num_states(), 0.9 / sm.num_states() as f64);
        let err = HmmFilter::new(bad, &tm, &om, &sm).unwrap_err();
        assert!(matches!(
            err,
            HmmError::InvalidInput(InvalidInputError::NotNormalized { .. })
        ));
    }

    #[test]
    fn test_advance_matches_hand_computation() {
        let (tm, om) = two_state_models();
        let sm = StateModel::flat(2).unwrap();
        let mut filter =
            HmmFilter::new(DVector::from_vec(vec![0.5, 0.5]), &tm, &om, &sm).unwrap();

        // predict: T * [0.5, 0.5] = [0.5, 0.5]; update with diag(0.9, 0.2):
        // [0.45, 0.10]; normalize by 0.55
        let belief = filter.advance(Some(0)).unwrap();
        assert!((belief[0] - 0.45 / 0.55).abs() < 1e-9);
        assert!((belief[1] - 0.10 / 0.55).abs() < 1e-9);
        assert!((belief.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_advance_none_is_pure_prediction() {
        let sm = StateModel::new(2, 2).unwrap();
        let tm = TransitionModel::grid_walk(&sm).unwrap();
        let om = ObservationModel::location_sensor(&sm);

        let mut filter =
            HmmFilter::new(uniform(sm.num_states()), &tm, &om, &sm).unwrap();
        let advanced = filter.advance(None).unwrap();

        let mut expected = tm.matrix() * uniform(sm.num_states());
        normalize(&mut expected, "test").unwrap();
        for i in 0..sm.num_states() {
            assert!((advanced[i] - expected[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_advance_is_deterministic_and_normalized() {
        let sm = StateModel::new(3, 3).unwrap();
        let tm = TransitionModel::grid_walk(&sm).unwrap();
        let om = ObservationModel::location_sensor(&sm);
        let prior = uniform(sm.num_states());

        let mut a = HmmFilter::new(prior.clone(), &tm, &om, &sm).unwrap();
        let mut b = HmmFilter::new(prior, &tm, &om, &sm).unwrap();

        let reading = Some(sm.reading_index(1, 1));
        let ba = a.advance(reading).unwrap();
        let bb = b.advance(reading).unwrap();
        assert_eq!(ba, bb);
        assert!((ba.sum() - 1.0).abs() < 1e-9);
        assert!(ba.iter().all(|&p| p >= 0.0));
    }

    #[test]
    fn test_returned_belief_is_independent_copy() {
        let sm = StateModel::new(2, 2).unwrap();
        let tm = TransitionModel::grid_walk(&sm).unwrap();
        let om = ObservationModel::location_sensor(&sm);

        let mut filter =
            HmmFilter::new(uniform(sm.num_states()), &tm, &om, &sm).unwrap();
        let mut returned = filter.advance(None).unwrap();
        returned[0] = 42.0;
        assert!(filter.belief()[0] != 42.0);
    }

    #[test]
    fn test_degenerate_reading_leaves_belief_intact() {
        // Observation model with an all-zero likelihood column
        let sm = StateModel::new(1, 2).unwrap();
        let n = sm.num_states();
        let tm = TransitionModel::grid_walk(&sm).unwrap();
        let mut table = DMatrix::from_element(n, 2, 0.5);
        table.column_mut(1).fill(0.0);
        let om = ObservationModel::new(table);

        let mut filter = HmmFilter::new(uniform(n), &tm, &om, &sm).unwrap();
        let before = filter.belief().clone();

        let err = filter.advance(Some(1)).unwrap_err();
        assert!(matches!(err, HmmError::NumericalDegeneracy { .. }));
        assert_eq!(filter.belief(), &before);

        // A subsequent valid advance still works
        assert!(filter.advance(Some(0)).is_ok());
    }
}
