//! Evaluation metrics for localization estimates
//!
//! Helpers to turn beliefs into point estimates and score them against a
//! known ground-truth trajectory.

use nalgebra::DVector;

use crate::common::linalg::argmax;
use crate::models::StateModel;

/// Maximum a posteriori state estimate: the most probable state index
pub fn map_estimate(belief: &DVector<f64>) -> usize {
    argmax(belief)
}

/// Manhattan distance between the cell positions of two states
///
/// Headings are ignored; only the grid positions enter the distance.
pub fn manhattan_error(sm: &StateModel, estimated: usize, truth: usize) -> usize {
    let (er, ec) = sm.state_position(estimated);
    let (tr, tc) = sm.state_position(truth);
    er.abs_diff(tr) + ec.abs_diff(tc)
}

/// Mean Manhattan error of MAP estimates over a run
pub fn mean_manhattan_error(sm: &StateModel, estimates: &[usize], truth: &[usize]) -> f64 {
    if estimates.is_empty() {
        return 0.0;
    }
    let total: usize = estimates
        .iter()
        .zip(truth)
        .map(|(&e, &t)| manhattan_error(sm, e, t))
        .sum();
    total as f64 / estimates.len() as f64
}

/// Fraction of steps whose estimated cell matches the true cell
///
/// Positions only; a wrong heading in the right cell still counts as a hit.
pub fn hit_rate(sm: &StateModel, estimates: &[usize], truth: &[usize]) -> f64 {
    if estimates.is_empty() {
        return 0.0;
    }
    let hits = estimates
        .iter()
        .zip(truth)
        .filter(|(&e, &t)| sm.state_position(e) == sm.state_position(t))
        .count();
    hits as f64 / estimates.len() as f64
}
