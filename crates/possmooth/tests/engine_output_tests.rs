#![cfg(feature = "dev")]
//! Tests for output types and aggregation.
//!
//! ## Test Organization
//!
//! 1. **Aggregation** - Row zipping and order
//! 2. **Result Helpers** - Residuals, band detection
//! 3. **Display** - Table rendering

use possmooth::internals::algorithms::formulate::PenaltySpec;
use possmooth::internals::engine::output::{aggregate, BootstrapSummary, SmoothResult};
use possmooth::internals::math::difference::PenaltyOrder;

// ============================================================================
// Helper Functions
// ============================================================================

fn point_result(n: usize) -> SmoothResult<f64> {
    let keys: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let observed: Vec<f64> = keys.iter().map(|k| k * 2.0).collect();
    let estimate: Vec<f64> = observed.iter().map(|y| y - 0.5).collect();
    SmoothResult {
        keys,
        observed,
        estimate,
        std_errors: None,
        lower: None,
        upper: None,
        penalty: PenaltySpec::new(1.0, PenaltyOrder::First),
        bootstrap: None,
    }
}

fn banded_result(n: usize) -> SmoothResult<f64> {
    let mut result = point_result(n);
    result.std_errors = Some(vec![0.1; n]);
    result.lower = Some(result.estimate.iter().map(|e| e - 0.2).collect());
    result.upper = Some(result.estimate.iter().map(|e| e + 0.2).collect());
    result.bootstrap = Some(BootstrapSummary {
        replicates_requested: 10,
        replicates_used: 9,
        failed_replicates: vec![4],
        seed: 42,
        confidence_level: 0.95,
        z: 1.96,
    });
    result
}

// ============================================================================
// Aggregation Tests
// ============================================================================

/// Rows zip columns in input order.
#[test]
fn test_aggregate_rows() {
    let rows = aggregate(
        &[1.0, 2.0],
        &[3.0, 4.0],
        &[3.5, 3.5],
        &[3.0, 3.0],
        &[4.0, 4.0],
    );

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].key, 1.0);
    assert_eq!(rows[1].observed, 4.0);
    assert_eq!(rows[1].estimate, 3.5);
    assert_eq!(rows[0].lower, 3.0);
    assert_eq!(rows[0].upper, 4.0);
}

/// Aggregated view carries the run metadata.
#[test]
fn test_aggregated_view() {
    assert!(point_result(3).aggregated().is_none());

    let table = banded_result(3).aggregated().unwrap();
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.summary.failed_replicates, vec![4]);
    assert_eq!(table.penalty.order, PenaltyOrder::First);
}

// ============================================================================
// Result Helper Tests
// ============================================================================

/// Residuals are observed minus estimate.
#[test]
fn test_residuals() {
    let result = point_result(4);
    assert!(result.residuals().iter().all(|&r| (r - 0.5).abs() < 1e-12));
}

/// Band detection needs bounds and metadata.
#[test]
fn test_has_confidence_band() {
    assert!(!point_result(2).has_confidence_band());
    assert!(banded_result(2).has_confidence_band());

    let mut partial = banded_result(2);
    partial.bootstrap = None;
    assert!(!partial.has_confidence_band());
}

// ============================================================================
// Display Tests
// ============================================================================

/// Short results print every row.
#[test]
fn test_display_short() {
    let text = banded_result(3).to_string();

    assert!(text.contains("Summary:"));
    assert!(text.contains("Bootstrap:   9 of 10 replicates, seed 42"));
    assert!(text.contains("Std_Err"));
    assert!(!text.contains("..."));
}

/// Long results elide the middle rows.
#[test]
fn test_display_long() {
    let text = point_result(50).to_string();

    assert!(text.contains("..."));
    assert!(text.contains("49.00"));
    assert!(!text.contains("25.00"));
}
