//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions: finite differences,
//! banded Cholesky solves, normal critical values and running moments.
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
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Banded symmetric positive-definite systems.
pub mod banded;

/// Forward finite differences and penalty orders.
pub mod difference;

/// Column-wise Welford moments.
pub mod moments;

/// Normal critical values.
pub mod normal;
