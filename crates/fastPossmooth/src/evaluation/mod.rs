//! Layer 4: Evaluation
//!
//! This layer provides the parallel bootstrap pass that plugs into the
//! `possmooth` execution engine.

// Parallel bootstrap replicates
pub mod bootstrap;
