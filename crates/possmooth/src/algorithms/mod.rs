//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer formulates the penalized smoothing objective and solves it:
//! - The solver contract and objective representation
//! - The bundled solvers: dual active set (default) and dual coordinate descent
//! - Series-to-objective formulation
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Active-set Newton solver on the banded dual.
pub mod active_set;

/// Dual coordinate descent solver.
pub mod dual_cd;

/// Objective formulation.
pub mod formulate;

/// Solver contract.
pub mod solver;
