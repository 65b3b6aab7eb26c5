//! State-space description
//!
//! The inference algorithms only consult the state count. The grid geometry
//! here exists so the transition and sensor models of the localization domain
//! can be constructed and so estimates can be decoded back into positions.
//! For non-grid HMMs a flat space with one reading per state is available via
//! [`StateModel::flat`].

use crate::filter::errors::{HmmError, InvalidInputError};

/// Number of headings the robot can face on a grid
pub const NUM_HEADINGS: usize = 4;

/// Robot heading on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    /// Decreasing row
    North,
    /// Increasing column
    East,
    /// Increasing row
    South,
    /// Decreasing column
    West,
}

impl Heading {
    /// All headings in index order
    pub const ALL: [Heading; NUM_HEADINGS] =
        [Heading::North, Heading::East, Heading::South, Heading::West];

    /// Row/column step for one move in this heading
    pub fn delta(self) -> (isize, isize) {
        match self {
            Heading::North => (-1, 0),
            Heading::East => (0, 1),
            Heading::South => (1, 0),
            Heading::West => (0, -1),
        }
    }

    /// Index of this heading within [`Heading::ALL`]
    pub fn index(self) -> usize {
        match self {
            Heading::North => 0,
            Heading::East => 1,
            Heading::South => 2,
            Heading::West => 3,
        }
    }

    /// Heading for an index in `0..NUM_HEADINGS`
    pub fn from_index(index: usize) -> Heading {
        Heading::ALL[index % NUM_HEADINGS]
    }
}

/// Finite state space
///
/// Grid spaces have `rows x cols` cells with four headings per cell; state
/// indices are laid out as `(row * cols + col) * 4 + heading`, reading
/// indices (sensor-reported positions) as `row * cols + col`. Flat spaces
/// have one heading and one reading per state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateModel {
    rows: usize,
    cols: usize,
    headings: usize,
}

impl StateModel {
    /// Create a grid state space with four headings per cell
    ///
    /// # Errors
    /// Returns [`InvalidInputError::EmptyGrid`] for grids with fewer than two
    /// cells, on which no move is possible.
    pub fn new(rows: usize, cols: usize) -> Result<Self, HmmError> {
        if rows * cols < 2 {
            return Err(InvalidInputError::EmptyGrid { rows, cols }.into());
        }
        Ok(Self {
            rows,
            cols,
            headings: NUM_HEADINGS,
        })
    }

    /// Create a flat state space with no topology
    ///
    /// One reading per state, a single heading. Useful for HMMs whose states
    /// are not grid cells.
    pub fn flat(num_states: usize) -> Result<Self, HmmError> {
        if num_states == 0 {
            return Err(InvalidInputError::EmptyGrid { rows: 1, cols: 0 }.into());
        }
        Ok(Self {
            rows: 1,
            cols: num_states,
            headings: 1,
        })
    }

    /// Number of grid rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of grid columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Headings per cell (4 for grid spaces, 1 for flat spaces)
    pub fn headings(&self) -> usize {
        self.headings
    }

    /// Number of hidden states
    pub fn num_states(&self) -> usize {
        self.rows * self.cols * self.headings
    }

    /// Number of distinct sensor readings
    pub fn num_readings(&self) -> usize {
        self.rows * self.cols
    }

    /// State index for a cell and heading
    ///
    /// For flat spaces only `Heading::North` (index 0) is meaningful.
    pub fn state_index(&self, row: usize, col: usize, heading: Heading) -> usize {
        (row * self.cols + col) * self.headings + heading.index()
    }

    /// Cell position of a state
    pub fn state_position(&self, state: usize) -> (usize, usize) {
        let cell = state / self.headings;
        (cell / self.cols, cell % self.cols)
    }

    /// Heading of a state
    pub fn state_heading(&self, state: usize) -> Heading {
        Heading::from_index(state % self.headings)
    }

    /// Reading index for a cell position
    pub fn reading_index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Cell position of a reading
    pub fn reading_position(&self, reading: usize) -> (usize, usize) {
        (reading / self.cols, reading % self.cols)
    }

    /// Whether a signed cell position lies on the grid
    pub fn contains(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Cell reached by one move from `(row, col)` in `heading`, if on the grid
    pub fn step(&self, row: usize, col: usize, heading: Heading) -> Option<(usize, usize)> {
        let (dr, dc) = heading.delta();
        let (nr, nc) = (row as isize + dr, col as isize + dc);
        if self.contains(nr, nc) {
            Some((nr as usize, nc as usize))
        } else {
            None
        }
    }
}
