#![cfg(all(feature = "dev", feature = "cpu"))]
use possmooth::internals::algorithms::active_set::DualActiveSet;
use possmooth::internals::algorithms::formulate::PenaltySpec;
use possmooth::internals::engine::executor::{
    bootstrap_pass_sequential, ReplicateFailurePolicy, ReplicateJob,
};
use possmooth::internals::math::difference::PenaltyOrder;
use possmooth::internals::primitives::series::Series;

use fastPossmooth::internals::evaluation::bootstrap::bootstrap_pass_parallel;

#[test]
fn test_parallel_pass_matches_sequential_pass() {
    let values: Vec<f64> = (0..30).map(|i| (i as f64 * 0.3).cos() + 0.05 * i as f64).collect();
    let series = Series::from_values(values).unwrap();
    let penalty = PenaltySpec::new(1.5, PenaltyOrder::Second);
    let solver = DualActiveSet::default();

    let job = ReplicateJob {
        series: &series,
        penalty: &penalty,
        solver: &solver,
        seed: 2024,
        replicates: 25,
        failure_policy: ReplicateFailurePolicy::Skip,
        cancel: None,
    };

    let par = bootstrap_pass_parallel(&job);
    let seq = bootstrap_pass_sequential(&job);

    assert_eq!(par.len(), 25);
    assert_eq!(par, seq);
}
