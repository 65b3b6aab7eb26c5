//! Transition model
//!
//! Column-stochastic state transition matrix with a cached transpose. The
//! forward filter multiplies beliefs by the matrix; the smoother propagates
//! backward messages through the transpose.

use nalgebra::DMatrix;

use crate::filter::errors::{HmmError, InvalidInputError};
use crate::models::state::{Heading, StateModel, NUM_HEADINGS};

/// Probability of keeping the current heading when the move ahead is open
const KEEP_HEADING_PROBABILITY: f64 = 0.7;

/// State transition probabilities
///
/// Entry `(i, j)` is `P(next state = i | current state = j)`; each column
/// sums to 1. The matrix is immutable for the lifetime of an inference run.
/// Per-column stochasticity is the model builder's responsibility and is not
/// validated here.
#[derive(Debug, Clone)]
pub struct TransitionModel {
    matrix: DMatrix<f64>,
    transposed: DMatrix<f64>,
}

impl TransitionModel {
    /// Wrap a transition matrix, caching its transpose
    ///
    /// # Errors
    /// Returns [`InvalidInputError::DimensionMismatch`] for non-square input.
    pub fn new(matrix: DMatrix<f64>) -> Result<Self, HmmError> {
        if matrix.nrows() != matrix.ncols() {
            return Err(InvalidInputError::DimensionMismatch {
                expected: matrix.nrows(),
                actual: matrix.ncols(),
                context: "transition matrix columns".to_string(),
            }
            .into());
        }
        Ok(Self {
            transposed: matrix.transpose(),
            matrix,
        })
    }

    /// Build the grid random-walk transition model
    ///
    /// The robot always moves one cell per step. When the cell ahead is on
    /// the grid it keeps its heading with probability 0.7 and otherwise picks
    /// uniformly among the other open headings; facing a wall it always picks
    /// a new open heading uniformly.
    ///
    /// # Errors
    /// Returns [`HmmError::InvalidInput`] for flat state spaces; the walk is
    /// defined only for four-heading grid spaces.
    pub fn grid_walk(sm: &StateModel) -> Result<Self, HmmError> {
        if sm.headings() != NUM_HEADINGS {
            return Err(InvalidInputError::DimensionMismatch {
                expected: NUM_HEADINGS,
                actual: sm.headings(),
                context: "grid walk headings".to_string(),
            }
            .into());
        }
        let n = sm.num_states();
        let mut matrix = DMatrix::zeros(n, n);

        for row in 0..sm.rows() {
            for col in 0..sm.cols() {
                // Headings whose move ahead stays on the grid, with the cell
                // each move lands in. Every cell has at least one.
                let open: Vec<(Heading, (usize, usize))> = Heading::ALL
                    .iter()
                    .filter_map(|&h| sm.step(row, col, h).map(|cell| (h, cell)))
                    .collect();

                for heading in Heading::ALL {
                    let current = sm.state_index(row, col, heading);
                    let ahead = sm.step(row, col, heading);
                    let turns: Vec<&(Heading, (usize, usize))> =
                        open.iter().filter(|(h, _)| *h != heading).collect();

                    if let Some((nr, nc)) = ahead {
                        let keep = if turns.is_empty() {
                            1.0
                        } else {
                            KEEP_HEADING_PROBABILITY
                        };
                        matrix[(sm.state_index(nr, nc, heading), current)] += keep;

                        let turn = (1.0 - keep) / turns.len().max(1) as f64;
                        for (h, (tr, tc)) in turns {
                            matrix[(sm.state_index(*tr, *tc, *h), current)] += turn;
                        }
                    } else {
                        // Facing a wall: always turn
                        let turn = 1.0 / turns.len() as f64;
                        for (h, (tr, tc)) in turns {
                            matrix[(sm.state_index(*tr, *tc, *h), current)] += turn;
                        }
                    }
                }
            }
        }

        log::debug!(
            "built grid_walk transition model: {}x{} grid, {} states",
            sm.rows(),
            sm.cols(),
            n
        );

        Ok(Self {
            transposed: matrix.transpose(),
            matrix,
        })
    }

    /// The transition matrix T
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// The cached transpose of T
    pub fn transposed(&self) -> &DMatrix<f64> {
        &self.transposed
    }

    /// Number of states
    pub fn num_states(&self) -> usize {
        self.matrix.nrows()
    }
}
