//! Forward-backward smoother
//!
//! Refines a complete sequence of filtered beliefs once all readings are
//! known, by running a backward message pass and combining it with the
//! forward beliefs at each step.

use nalgebra::DVector;

use crate::common::linalg::normalize;
use crate::filter::errors::{HmmError, InvalidInputError};
use crate::models::{ObservationModel, StateModel, TransitionModel};

/// Stateless HMM forward-backward smoother
///
/// Holds only immutable references to its model collaborators, so it is
/// freely reentrant. It consumes the forward filter's *output sequence*,
/// never the filter itself.
#[derive(Debug, Clone)]
pub struct HmmSmoother<'m> {
    transition: &'m TransitionModel,
    observation: &'m ObservationModel,
}

impl<'m> HmmSmoother<'m> {
    /// Create a smoother from its model collaborators
    ///
    /// # Errors
    /// Returns [`HmmError::InvalidInput`] when the models disagree with the
    /// state model on the state count.
    pub fn new(
        transition: &'m TransitionModel,
        observation: &'m ObservationModel,
        state_model: &StateModel,
    ) -> Result<Self, HmmError> {
        let n = state_model.num_states();
        if transition.num_states() != n {
            return Err(InvalidInputError::DimensionMismatch {
                expected: n,
                actual: transition.num_states(),
                context: "transition model states".to_string(),
            }
            .into());
        }
        if observation.num_states() != n {
            return Err(InvalidInputError::DimensionMismatch {
                expected: n,
                actual: observation.num_states(),
                context: "observation model states".to_string(),
            }
            .into());
        }
        Ok(Self {
            transition,
            observation,
        })
    }

    /// Compute smoothed beliefs `P(state at t | all readings)` for every t
    ///
    /// `readings` and `forward` must be time-aligned and of equal positive
    /// length; `forward` is the belief sequence collected from
    /// [`HmmFilter::advance`](crate::filter::HmmFilter::advance) over the
    /// same readings. The final entry of the result equals the final forward
    /// belief exactly, since no backward information exists there.
    ///
    /// The backward message is scaled by the observation likelihood at t+1
    /// *before* being propagated through the transposed transition matrix,
    /// and only then combined with the forward belief at t; any other order
    /// is off by one step. A missing reading at t+1 contributes a uniform
    /// likelihood of 1, mirroring the filter's skipped update.
    ///
    /// # Errors
    /// [`HmmError::InvalidInput`] for empty or mismatched sequences, a
    /// forward belief of the wrong length, or an unknown reading;
    /// [`HmmError::NumericalDegeneracy`] when a combined belief sums to zero.
    pub fn smooth(
        &self,
        readings: &[Option<usize>],
        forward: &[DVector<f64>],
    ) -> Result<Vec<DVector<f64>>, HmmError> {
        if readings.is_empty() {
            return Err(InvalidInputError::EmptySequence.into());
        }
        if readings.len() != forward.len() {
            return Err(InvalidInputError::SequenceLengthMismatch {
                readings: readings.len(),
                beliefs: forward.len(),
            }
            .into());
        }
        let n = self.transition.num_states();
        for belief in forward {
            if belief.len() != n {
                return Err(InvalidInputError::DimensionMismatch {
                    expected: n,
                    actual: belief.len(),
                    context: "forward belief length".to_string(),
                }
                .into());
            }
        }

        let mut smoothed = forward.to_vec();

        // No future information yet: uniform likelihood of 1 for every state
        let mut backward = DVector::from_element(n, 1.0);

        for t in (0..readings.len() - 1).rev() {
            // Fold in the observation at t+1, then propagate back to t
            if let Some(r) = readings[t + 1] {
                let likelihood = self.observation.likelihood(r)?;
                backward.component_mul_assign(&likelihood);
            }
            backward = self.transition.transposed() * backward;

            // Combine with the forward belief and renormalize
            smoothed[t].component_mul_assign(&backward);
            normalize(&mut smoothed[t], &format!("smoothing at step {}", t))?;
        }

        Ok(smoothed)
    }
}
