//! Tolerance-based numeric comparison
//!
//! The three checks every submission funnels through. All functions are pure;
//! callers are responsible for rejecting non-finite input first.

use glam::Vec3;

use crate::consts::*;

/// Absolute-tolerance scalar equality (used for eigenvalue lookup)
#[inline]
pub fn scalar_close(a: f32, b: f32) -> bool {
    (a - b).abs() < EIGENVALUE_TOLERANCE
}

/// Multiset equality of two scalar sequences under tolerance.
///
/// Both sides are sorted ascending and compared index-wise, which enforces
/// set equality *and* algebraic multiplicity without a multiset structure:
/// submitting `[2, 4]` against `[2, 2, 4]` fails on length, `[2, 4, 4]`
/// fails at the middle index.
pub fn scalar_sets_match(submitted: &[f32], canonical: &[f32]) -> bool {
    if submitted.len() != canonical.len() {
        return false;
    }
    let mut s = submitted.to_vec();
    let mut c = canonical.to_vec();
    s.sort_by(f32::total_cmp);
    c.sort_by(f32::total_cmp);
    s.iter().zip(&c).all(|(a, b)| (a - b).abs() < EIGENVALUE_TOLERANCE)
}

/// True when every component is below the degeneracy threshold.
///
/// The zero vector is trivially mapped to zero by every matrix and must be
/// excluded before any parallelism test.
#[inline]
pub fn is_zero_vector(v: Vec3) -> bool {
    v.abs().max_element() < ZERO_VECTOR_EPSILON
}

/// True when `v` and `c` point along the same line, either direction.
///
/// Both vectors are normalized and the absolute dot product compared against
/// 1. The tolerance is loose (manually entered decimals accumulate error) but
/// still far from accepting merely-similar directions: orthogonal vectors
/// give a dot product near 0.
pub fn vectors_parallel(v: Vec3, c: Vec3) -> bool {
    let (Some(vn), Some(cn)) = (v.try_normalize(), c.try_normalize()) else {
        return false;
    };
    (vn.dot(cn).abs() - 1.0).abs() < PARALLEL_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_scalar_sets_match_any_order() {
        let canonical = [2.0, 4.0];
        assert!(scalar_sets_match(&[2.0, 4.0], &canonical));
        assert!(scalar_sets_match(&[4.0, 2.0], &canonical));
        assert!(scalar_sets_match(&[4.05, 1.95], &canonical));
        assert!(!scalar_sets_match(&[2.0, 5.0], &canonical));
    }

    #[test]
    fn test_scalar_sets_match_enforces_multiplicity() {
        let canonical = [2.0, 2.0, 4.0];
        assert!(scalar_sets_match(&[4.0, 2.0, 2.0], &canonical));
        // Right distinct values, wrong multiplicity
        assert!(!scalar_sets_match(&[2.0, 4.0, 4.0], &canonical));
        // Missing the repeated root entirely
        assert!(!scalar_sets_match(&[2.0, 4.0], &canonical));
    }

    #[test]
    fn test_scalar_sets_match_tolerance_boundary() {
        assert!(scalar_sets_match(&[2.09], &[2.0]));
        assert!(!scalar_sets_match(&[2.11], &[2.0]));
    }

    #[test]
    fn test_zero_vector() {
        assert!(is_zero_vector(Vec3::ZERO));
        assert!(is_zero_vector(Vec3::new(0.00001, -0.00001, 0.0)));
        assert!(!is_zero_vector(Vec3::new(0.001, 0.0, 0.0)));
    }

    #[test]
    fn test_parallel_scale_and_sign_invariant() {
        let canonical = Vec3::new(-0.7071, 0.7071, 0.0);
        // Same direction, different scale
        assert!(vectors_parallel(Vec3::new(-1.0, 1.0, 0.0), canonical));
        // Opposite direction
        assert!(vectors_parallel(Vec3::new(1.0, -1.0, 0.0), canonical));
        // Orthogonal
        assert!(!vectors_parallel(Vec3::new(1.0, 1.0, 0.0), canonical));
    }

    #[test]
    fn test_parallel_rejects_near_but_not_colinear() {
        let canonical = Vec3::new(1.0, 0.0, 0.0);
        // ~45 degrees off: dot = 0.707, well outside tolerance
        assert!(!vectors_parallel(Vec3::new(1.0, 1.0, 0.0), canonical));
        // Small angular error passes
        assert!(vectors_parallel(Vec3::new(1.0, 0.05, 0.0), canonical));
    }

    #[test]
    fn test_parallel_guards_degenerate_input() {
        assert!(!vectors_parallel(Vec3::ZERO, Vec3::X));
        assert!(!vectors_parallel(Vec3::X, Vec3::ZERO));
    }

    proptest! {
        /// Set equality is permutation-independent
        #[test]
        fn prop_sets_match_permuted(mut values in proptest::collection::vec(-100.0f32..100.0, 2..=3)) {
            let canonical = values.clone();
            values.reverse();
            prop_assert!(scalar_sets_match(&values, &canonical));
        }

        /// Parallelism survives arbitrary nonzero scaling of either side
        #[test]
        fn prop_parallel_scale_invariant(
            x in -10.0f32..10.0,
            y in -10.0f32..10.0,
            z in -10.0f32..10.0,
            scale in prop_oneof![-50.0f32..-0.5, 0.5f32..50.0],
        ) {
            let v = Vec3::new(x, y, z);
            prop_assume!(!is_zero_vector(v));
            prop_assert!(vectors_parallel(v * scale, v));
        }
    }
}
