//! Variance model: bounded pseudo-random perturbation of a scalar.
//!
//! A variance draw picks `delta` uniformly from `[-spread, +spread]` (in
//! percent of the input) and returns `value * (1 + delta / 100)`. The
//! random source is passed in, so callers decide between entropy-seeded and
//! reproducible sequences.
//!
//! ## Spreads in use
//!
//! | Dataset | Spread |
//! |---|---|
//! | overview aggregates | 1 - 2 % |
//! | categorical breakdowns | 3 - 5 % |
//! | issuance random walk | 10 % |
//! | portfolio yield | 0.3 % |

use rand::Rng;

/// Applies one variance draw to `value`.
///
/// Negative spreads are treated as their absolute value; a zero spread
/// returns `value` unchanged. Consumes exactly one uniform draw otherwise.
///
/// # Examples
///
/// ```
/// use lending_core::math::variance::apply_variance;
/// use lending_core::rng::FeedRng;
///
/// let mut rng = FeedRng::from_seed(42);
/// for _ in 0..100 {
///     let v = apply_variance(1_000.0, 5.0, &mut rng);
///     assert!(v >= 950.0 && v <= 1_050.0);
/// }
/// ```
pub fn apply_variance<R: Rng + ?Sized>(value: f64, spread_pct: f64, rng: &mut R) -> f64 {
    let spread = spread_pct.abs();
    if spread == 0.0 || !spread.is_finite() {
        return value;
    }
    let delta: f64 = rng.gen_range(-spread..=spread);
    value * (1.0 + delta / 100.0)
}

/// Floors a non-negative magnitude to an integer count.
///
/// Negative or non-finite inputs floor to zero.
#[inline]
pub fn floor_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.floor() as u64
    } else {
        0
    }
}

/// Rounds a rate or percentage to two decimal places.
///
/// ```
/// use lending_core::math::variance::round2;
///
/// assert_eq!(round2(4.256), 4.26);
/// assert_eq!(round2(4.254), 4.25);
/// ```
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Applies a variance draw to a count and floors the result.
pub fn vary_count<R: Rng + ?Sized>(value: u64, spread_pct: f64, rng: &mut R) -> u64 {
    floor_count(apply_variance(value as f64, spread_pct, rng))
}

/// Applies a variance draw to a rate and rounds the result to two decimals.
pub fn vary_rate<R: Rng + ?Sized>(value: f64, spread_pct: f64, rng: &mut R) -> f64 {
    round2(apply_variance(value, spread_pct, rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_spread_is_identity() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(apply_variance(123.45, 0.0, &mut rng), 123.45);
    }

    #[test]
    fn test_negative_spread_uses_magnitude() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1_000 {
            let v = apply_variance(100.0, -3.0, &mut rng);
            assert!((97.0..=103.0).contains(&v));
        }
    }

    #[test]
    fn test_successive_draws_differ() {
        let mut rng = StdRng::seed_from_u64(99);
        let a = apply_variance(1_000.0, 2.0, &mut rng);
        let b = apply_variance(1_000.0, 2.0, &mut rng);
        assert_ne!(a, b);
    }

    #[test]
    fn test_fixed_sequence_lower_edge() {
        // A zero-valued mock source lands on the lower end of the interval.
        let mut rng = StepRng::new(0, 0);
        let v = apply_variance(200.0, 10.0, &mut rng);
        assert_relative_eq!(v, 180.0, epsilon = 1e-9);
    }

    #[test]
    fn test_floor_count_edges() {
        assert_eq!(floor_count(12.99), 12);
        assert_eq!(floor_count(-4.0), 0);
        assert_eq!(floor_count(f64::NAN), 0);
    }

    #[test]
    fn test_vary_rate_two_decimals() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let r = vary_rate(5.55, 1.0, &mut rng);
            assert_relative_eq!(r, round2(r), epsilon = 1e-12);
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn test_variance_stays_within_spread(
                value in 0.0f64..1e9,
                spread in 0.0f64..20.0,
                seed in any::<u64>()
            ) {
                let mut rng = StdRng::seed_from_u64(seed);
                let v = apply_variance(value, spread, &mut rng);
                let lo = value * (1.0 - spread / 100.0);
                let hi = value * (1.0 + spread / 100.0);
                let tol = 1e-9 * value.max(1.0);
                prop_assert!(v >= lo - tol && v <= hi + tol, "{} outside [{}, {}]", v, lo, hi);
            }

            #[test]
            fn test_vary_count_never_exceeds_upper_bound(
                value in 0u64..10_000_000,
                spread in 0.0f64..10.0,
                seed in any::<u64>()
            ) {
                let mut rng = StdRng::seed_from_u64(seed);
                let v = vary_count(value, spread, &mut rng);
                prop_assert!(v as f64 <= value as f64 * (1.0 + spread / 100.0) + 1e-6);
            }
        }
    }
}
