//! Standard normal critical values.
//!
//! ## Purpose
//!
//! This module converts a two-sided confidence level into the normal
//! critical value `z = Phi^-1((1 + level) / 2)` used by the
//! normal-approximation bootstrap interval.
//!
//! ## Design notes
//!
//! * **Approximation**: Acklam's rational approximation of the inverse CDF,
//!   relative error below 1.2e-9 over the whole domain.
//!
//! ## Invariants
//!
//! * The level must satisfy `0 < level < 1`; the result is then positive.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::PossmoothError;

/// Two-sided critical value for `level` (e.g. 0.95 gives about 1.96).
pub fn z_critical<T: Float>(level: T) -> Result<T, PossmoothError> {
    let cl = level.to_f64().unwrap_or(f64::NAN);
    if !cl.is_finite() || cl <= 0.0 || cl >= 1.0 {
        return Err(PossmoothError::InvalidConfidenceLevel(cl));
    }

    let z = inverse_normal_cdf((1.0 + cl) / 2.0);
    T::from(z).ok_or_else(|| PossmoothError::InvalidConfidenceLevel(cl))
}

/// Rational approximation of the inverse standard normal CDF.
pub fn inverse_normal_cdf(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    // Central region
    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239e0,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];

    // Tails
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838e0,
        -2.549_732_539_343_734e0,
        4.374_664_141_464_968e0,
        2.938_163_982_698_783e0,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996e0,
        3.754_408_661_907_416e0,
    ];

    const P_LOW: f64 = 0.02425;
    const P_HIGH: f64 = 1.0 - P_LOW;

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        let num = ((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5];
        let den = (((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0;
        num / den
    } else if p > P_HIGH {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        let num = ((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5];
        let den = (((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0;
        -(num / den)
    } else {
        let q = p - 0.5;
        let r = q * q;
        let num = (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q;
        let den = ((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0;
        num / den
    }
}
