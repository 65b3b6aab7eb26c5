//! Forward filtering and forward-backward smoothing
//!
//! The two inference algorithms of the crate. [`HmmFilter`] is stateful and
//! advances one time step per call; [`HmmSmoother`] is stateless and refines
//! a full collected belief sequence after the fact.

pub mod errors;
pub mod forward;
pub mod smoother;

pub use errors::{HmmError, InvalidInputError};
pub use forward::HmmFilter;
pub use smoother::HmmSmoother;
