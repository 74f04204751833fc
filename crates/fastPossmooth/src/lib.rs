//! # Fast possmooth (Positive-part difference-penalized smoothing)
//!
//! Parallel bootstrap confidence bands for the `possmooth` smoother.
//!
//! ## What does it add?
//!
//! A bootstrap band needs one penalized fit per replicate, and replicates
//! are independent. This crate runs them on all available CPU cores with
//! `rayon` and accepts `ndarray` inputs. For a fixed seed the band is
//! identical to the one computed sequentially by `possmooth`.
//!
//! ## Quick Start
//!
//! ### Typical Use
//!
//! ```rust
//! use fastPossmooth::prelude::*;
//! use ndarray::Array1;
//!
//! let keys = Array1::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
//! let values = Array1::from_vec(vec![0.0, 2.0, 1.0, 3.0, 2.0, 4.0]);
//!
//! // Build the model with parallel replicates (default)
//! let model = PosSmooth::new()
//!     .lambda(0.44)       // Penalty weight
//!     .order(First)       // Penalize decreases
//!     .bootstrap(200)     // 200 replicates, run in parallel
//!     .seed(123)          // Reproducible band
//!     .build()?;
//!
//! // Fit the model to the data
//! let result = model.fit(&keys, &values)?;
//!
//! println!("{}", result);
//! # Result::<(), PossmoothError>::Ok(())
//! ```
//!
//! ### Sequential Execution
//!
//! ```rust
//! use fastPossmooth::prelude::*;
//!
//! let values = vec![0.0, 2.0, 1.0, 3.0, 2.0, 4.0];
//!
//! let model = PosSmooth::new()
//!     .bootstrap(20)
//!     .seed(7)
//!     .parallel(false)    // Same band, one thread
//!     .build()?;
//!
//! let result = model.fit_values(&values)?;
//! assert!(result.has_confidence_band());
//! # Result::<(), PossmoothError>::Ok(())
//! ```
//!
//! ## License
//!
//! See the repository for license information and contribution guidelines.

#![allow(non_snake_case)]

// Layer 4: Evaluation - parallel bootstrap replicates.
mod evaluation;

// High-level fluent API for penalized smoothing.
mod api;

// Input data handling.
mod input;

// Standard fastPossmooth prelude.
pub mod prelude {
    pub use crate::api::{
        AggregatedResult, AggregatedRow, BootstrapSummary, CancelToken, ConvexSolver,
        DualActiveSet, DualCoordinateDescent, FitContext, FitStage, Objective, ParallelPosSmooth,
        ParallelPosSmoothBuilder as PosSmooth, PenaltyOrder,
        PenaltyOrder::{First, Second},
        PenaltySpec, PenaltyTerm, PossmoothError,
        ReplicateFailurePolicy,
        ReplicateFailurePolicy::{Abort, Skip},
        Series, Shape, SmoothResult, SolverError,
    };
    pub use crate::input::SmoothInput;
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
    pub mod input {
        pub use crate::input::*;
    }
}
