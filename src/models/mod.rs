//! Model collaborators for the inference algorithms
//!
//! Transition, observation, and state-space models, plus the grid
//! localization family, scenario configuration, and ground-truth simulation.

pub mod config;
pub mod observation;
pub mod simulation;
pub mod state;
pub mod transition;

pub use config::GridConfig;
pub use observation::ObservationModel;
pub use simulation::{simulate, SimulatedRun};
pub use state::{Heading, StateModel, NUM_HEADINGS};
pub use transition::TransitionModel;
