//! # possmooth — Positive-part difference-penalized smoothing for Rust
//!
//! Shape-restricted smoothing of a series ordered by a key, with bootstrap
//! confidence bands.
//!
//! ## What is positive-part penalized smoothing?
//!
//! Given observations `y_1..y_m` at increasing keys, the smoother solves
//!
//! ```text
//! minimize  0.5·Σ(y_i − β_i)² + λ·Σ_j pos(−Δᵈβ_j)
//! ```
//!
//! where `Δᵈ` is the forward difference of order `d ∈ {1, 2}` and
//! `pos(x) = max(0, x)`. Only violations of the shape are penalized: with
//! order 1 the fit is pulled towards a non-decreasing sequence, with order 2
//! towards a convex one. `λ = 0` returns the data, a large `λ` returns the
//! isotonic (order 1) or convex (order 2) regression. [`Shape::Decreasing`]
//! penalizes increases instead.
//!
//! Sampling uncertainty is estimated by a nonparametric bootstrap: the
//! series is resampled with replacement, refit, and the per-index standard
//! deviation of the replicate fits gives a normal-approximation band around
//! the point estimate.
//!
//! [`Shape::Decreasing`]: prelude::Shape::Decreasing
//!
//! ## Quick Start
//!
//! ### Typical Use
//!
//! ```rust
//! use possmooth::prelude::*;
//!
//! let keys = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let values = vec![0.0, 2.0, 1.0, 3.0, 2.0, 4.0];
//!
//! // Build the model
//! let model = PosSmooth::new()
//!     .lambda(1000.0)     // Strong penalty: isotonic limit
//!     .order(First)       // Penalize decreases
//!     .build()?;
//!
//! // Fit the model to the data
//! let result = model.fit(&keys, &values)?;
//!
//! println!("{}", result);
//! # Result::<(), PossmoothError>::Ok(())
//! ```
//!
//! ```text
//! Summary:
//!   Data points: 6
//!   Lambda:      1000
//!   Order:       1
//!   Shape:       Increasing
//!
//! Smoothed Data:
//!        Key     Observed     Estimate
//! ------------------------------------
//!       1.00     0.000000     0.000000
//!       2.00     2.000000     1.500000
//!       3.00     1.000000     1.500000
//!       4.00     3.000000     2.500000
//!       5.00     2.000000     2.500000
//!       6.00     4.000000     4.000000
//! ```
//!
//! ### Bootstrap Confidence Bands
//!
//! ```rust
//! use possmooth::prelude::*;
//!
//! let values = vec![0.0, 2.0, 1.0, 3.0, 2.0, 4.0];
//!
//! let model = PosSmooth::new()
//!     .lambda(0.44)
//!     .order(First)
//!     .bootstrap(10)                // 10 resample-and-refit replicates
//!     .confidence_level(0.95)       // 95% normal-approximation band
//!     .seed(123)                    // Reproducible replicates
//!     .failure_policy(Abort)        // Fail on the first failing replicate
//!     .build()?;
//!
//! let result = model.fit_values(&values)?;
//!
//! if let Some(table) = result.aggregated() {
//!     for row in &table.rows {
//!         assert!(row.lower <= row.estimate && row.estimate <= row.upper);
//!     }
//! }
//! # Result::<(), PossmoothError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! `fit` returns a `Result<SmoothResult<T>, PossmoothError>`. A failed point
//! fit is reported as [`PossmoothError::Solver`](prelude::PossmoothError::Solver)
//! with the fit context; a failed replicate is reported as
//! [`PossmoothError::BootstrapFailed`](prelude::PossmoothError::BootstrapFailed)
//! with its index. A failed fit never falls back to the unsmoothed input.
//!
//! ```rust
//! use possmooth::prelude::*;
//!
//! let model = PosSmooth::new().order(Second).build()?;
//!
//! match model.fit_values(&[1.0, 2.0]) {
//!     Ok(result) => println!("Smoothed: {:?}", result.estimate),
//!     Err(e) => {
//!         assert!(e.is_invalid_input());
//!         eprintln!("Fitting failed: {}", e);
//!     }
//! }
//! # Result::<(), PossmoothError>::Ok(())
//! ```
//!
//! ### Custom Solvers
//!
//! Every fit is delegated to a [`ConvexSolver`](prelude::ConvexSolver). The
//! crate bundles [`DualActiveSet`](prelude::DualActiveSet), the default,
//! and [`DualCoordinateDescent`](prelude::DualCoordinateDescent); any other
//! implementation can be injected with `.solver(Arc::new(..))`.
//!
//! ## License
//!
//! See the repository for license information and contribution guidelines.

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - pure mathematical functions.
mod math;

// Layer 3: Algorithms - objective formulation and solvers.
mod algorithms;

// Layer 4: Evaluation - resampling and confidence bands.
mod evaluation;

// Layer 5: Engine - orchestration and execution control.
mod engine;

// High-level fluent API for penalized smoothing.
mod api;

// Free-function entry points.
pub use crate::algorithms::formulate::formulate_and_solve;
pub use crate::engine::executor::bootstrap_ci;
pub use crate::evaluation::resample::resample;
pub use crate::math::difference::difference;

// Standard possmooth prelude.
pub mod prelude {
    pub use crate::api::{
        AggregatedResult, AggregatedRow, BootstrapSummary, CancelToken, ConvexSolver,
        DualActiveSet, DualCoordinateDescent, FitContext, FitStage, Objective, PenaltyOrder,
        PenaltyOrder::{First, Second},
        PenaltySpec, PenaltyTerm, PosSmoothBuilder as PosSmooth, PosSmoothModel, PossmoothError,
        ReplicateFailurePolicy,
        ReplicateFailurePolicy::{Abort, Skip},
        Series, Shape, SmoothResult, SolverError,
    };
    pub use crate::{bootstrap_ci, difference, formulate_and_solve, resample};
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
