//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates a smoothing run by coordinating the point fit,
//! the bootstrap replicates and the confidence band. It also validates
//! configuration and shapes the output.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Point fit and bootstrap execution.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Output types and aggregation.
pub mod output;
