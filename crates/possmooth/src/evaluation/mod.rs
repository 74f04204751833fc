//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer quantifies the sampling uncertainty of a fit:
//! - Bootstrap resampling in key order
//! - Normal-approximation confidence bands
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Confidence band computation.
pub mod intervals;

/// Bootstrap resampling.
pub mod resample;
