/*!
# hmm-filters-rs - Discrete-state HMM filtering and smoothing

Sequential Bayesian inference over a finite state space: a forward filter
that maintains a running belief distribution as noisy observations arrive,
and a forward-backward smoother that refines the whole belief history once
all observations are known. The motivating domain is grid-based robot
localization, and the crate ships the corresponding model family.

## Features

- Stateful forward filter with missing-reading support
- Stateless forward-backward smoother over collected filter output
- Grid random-walk transition model and two-ring location sensor
- Seeded ground-truth simulation and MAP evaluation metrics

## Modules

- [`filter`] - The two inference algorithms and their error types
- [`models`] - Transition/observation/state models, configuration, simulation
- [`common`] - Normalization helpers and evaluation metrics

## Example

```rust
use hmm_filters_rs::models::{simulate, GridConfig};
use hmm_filters_rs::{HmmFilter, HmmSmoother};
use rand::rngs::StdRng;
use rand::SeedableRng;

let config = GridConfig { rows: 4, cols: 4 };
let (sm, tm, om) = config.build().unwrap();

// Simulate a short run
let mut rng = StdRng::seed_from_u64(42);
let run = simulate(&mut rng, &sm, &tm, &om, 25);

// Forward pass: collect one belief per time step
let mut filter = HmmFilter::new(config.uniform_prior(), &tm, &om, &sm).unwrap();
let forward: Vec<_> = run
    .readings
    .iter()
    .map(|r| filter.advance(*r).unwrap())
    .collect();

// Backward pass over the collected sequence
let smoother = HmmSmoother::new(&tm, &om, &sm).unwrap();
let smoothed = smoother.smooth(&run.readings, &forward).unwrap();
assert_eq!(smoothed.len(), forward.len());
```
*/

// ============================================================================
// Core modules
// ============================================================================

/// Forward filter and forward-backward smoother
pub mod filter;

/// Model collaborators: transition, observation, state space, simulation
pub mod models;

/// Low-level utilities (normalization, evaluation metrics)
pub mod common;

// ============================================================================
// Re-exports for convenience
// ============================================================================

// Inference
pub use filter::{HmmFilter, HmmSmoother};

// Errors
pub use filter::{HmmError, InvalidInputError};

// Models
pub use models::{
    GridConfig, Heading, ObservationModel, SimulatedRun, StateModel, TransitionModel,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
