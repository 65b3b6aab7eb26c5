//! Ground-truth simulation
//!
//! Generates a true state trajectory by sampling the transition model and a
//! noisy reading per step by sampling the sensor's report distribution.
//! Used by tests and benchmarks to produce realistic localization runs.

use nalgebra::DMatrix;
use rand::Rng;

use crate::models::{ObservationModel, StateModel, TransitionModel};

/// A simulated localization run
#[derive(Debug, Clone)]
pub struct SimulatedRun {
    /// True state per time step
    pub states: Vec<usize>,
    /// Sensor reading per time step, `None` when the sensor reported nothing
    pub readings: Vec<Option<usize>>,
}

/// Simulate `steps` time steps of a robot walking the state space
///
/// The initial state is drawn uniformly; each subsequent state is drawn from
/// the transition column of its predecessor, and each reading from the
/// sensor's report distribution for the true state (including the "nothing"
/// outcome).
pub fn simulate<R: Rng>(
    rng: &mut R,
    sm: &StateModel,
    tm: &TransitionModel,
    om: &ObservationModel,
    steps: usize,
) -> SimulatedRun {
    let mut states = Vec::with_capacity(steps);
    let mut readings = Vec::with_capacity(steps);

    let mut state = rng.gen_range(0..sm.num_states());
    for _ in 0..steps {
        state = sample_column(rng, tm.matrix(), state);
        states.push(state);
        readings.push(sample_reading(rng, om, state));
    }

    log::trace!(
        "simulated {} steps, {} readings present",
        steps,
        readings.iter().filter(|r| r.is_some()).count()
    );

    SimulatedRun { states, readings }
}

/// Draw a next state from transition column `current`
fn sample_column<R: Rng>(rng: &mut R, matrix: &DMatrix<f64>, current: usize) -> usize {
    let u: f64 = rng.gen();
    let mut cumulative = 0.0;
    for next in 0..matrix.nrows() {
        cumulative += matrix[(next, current)];
        if u < cumulative {
            return next;
        }
    }
    // Rounding left u above the cumulative sum; take the last state
    matrix.nrows() - 1
}

/// Draw a sensor report for the true state; `None` is the leftover mass
fn sample_reading<R: Rng>(rng: &mut R, om: &ObservationModel, state: usize) -> Option<usize> {
    let u: f64 = rng.gen();
    let mut cumulative = 0.0;
    for reading in 0..om.num_readings() {
        cumulative += om.reading_probability(state, reading);
        if u < cumulative {
            return Some(reading);
        }
    }
    None
}
