//! Elementwise arithmetic over per-hand vectors.
//!
//! Every vector here has one entry per private hand. In-place operations
//! mutate their left operand, so callers copy first when the original value
//! is still needed afterwards.

/// `lhs += rhs`, elementwise.
#[inline]
pub fn add_assign(lhs: &mut [f64], rhs: &[f64]) {
    debug_assert_eq!(lhs.len(), rhs.len());
    lhs.iter_mut().zip(rhs).for_each(|(l, r)| *l += *r);
}

/// `lhs -= rhs`, elementwise.
#[inline]
pub fn sub_assign(lhs: &mut [f64], rhs: &[f64]) {
    debug_assert_eq!(lhs.len(), rhs.len());
    lhs.iter_mut().zip(rhs).for_each(|(l, r)| *l -= *r);
}

/// Returns a freshly allocated `lhs * rhs`, elementwise.
#[inline]
pub fn mul(lhs: &[f64], rhs: &[f64]) -> Vec<f64> {
    debug_assert_eq!(lhs.len(), rhs.len());
    lhs.iter().zip(rhs).map(|(l, r)| l * r).collect()
}

/// `lhs *= rhs`, elementwise.
#[inline]
pub fn mul_assign(lhs: &mut [f64], rhs: &[f64]) {
    debug_assert_eq!(lhs.len(), rhs.len());
    lhs.iter_mut().zip(rhs).for_each(|(l, r)| *l *= *r);
}

/// `vec *= scalar`.
#[inline]
pub fn mul_assign_scalar(vec: &mut [f64], scalar: f64) {
    vec.iter_mut().for_each(|el| *el *= scalar);
}

/// Scales each element by `nonneg` if it is currently `>= 0`, otherwise by `neg`.
#[inline]
pub fn mul_assign_by_sign(vec: &mut [f64], nonneg: f64, neg: f64) {
    vec.iter_mut()
        .for_each(|el| *el *= if *el >= 0.0 { nonneg } else { neg });
}

/// Clamps every element to be non-negative.
#[inline]
pub fn nonneg_assign(vec: &mut [f64]) {
    vec.iter_mut().for_each(|el| *el = el.max(0.0));
}

/// `lhs /= rhs`, elementwise, replacing NaN and infinite results with `default`.
///
/// This covers both `0 / 0` and `x / 0`.
#[inline]
pub fn div_assign(lhs: &mut [f64], rhs: &[f64], default: f64) {
    debug_assert_eq!(lhs.len(), rhs.len());
    lhs.iter_mut().zip(rhs).for_each(|(l, r)| {
        let quotient = *l / *r;
        *l = if quotient.is_finite() { quotient } else { default };
    });
}

/// Sums the rows of an (actions × hands) matrix, giving one total per hand.
#[inline]
pub fn sum_rows(matrix: &[Vec<f64>], num_hands: usize) -> Vec<f64> {
    let mut total = vec![0.0; num_hands];
    for row in matrix {
        add_assign(&mut total, row);
    }
    total
}

/// Dot product of two equal-length vectors.
#[inline]
pub fn dot(lhs: &[f64], rhs: &[f64]) -> f64 {
    debug_assert_eq!(lhs.len(), rhs.len());
    lhs.iter().zip(rhs).map(|(l, r)| l * r).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_place_arithmetic() {
        let mut v = vec![1.0, 2.0, 3.0];
        add_assign(&mut v, &[1.0, 1.0, 1.0]);
        assert_eq!(v, vec![2.0, 3.0, 4.0]);

        sub_assign(&mut v, &[2.0, 0.5, 4.0]);
        assert_eq!(v, vec![0.0, 2.5, 0.0]);

        mul_assign(&mut v, &[3.0, 2.0, 7.0]);
        assert_eq!(v, vec![0.0, 5.0, 0.0]);

        mul_assign_scalar(&mut v, -2.0);
        assert_eq!(v, vec![0.0, -10.0, 0.0]);
    }

    #[test]
    fn test_mul_allocates_fresh_vector() {
        let parent = vec![0.5, 1.0];
        let mut child = mul(&parent, &[0.5, 0.25]);
        child[0] = 99.0;
        assert_eq!(parent, vec![0.5, 1.0]);
        assert_eq!(child, vec![99.0, 0.25]);
    }

    #[test]
    fn test_mul_assign_by_sign_uses_current_sign() {
        let mut v = vec![4.0, 0.0, -4.0];
        mul_assign_by_sign(&mut v, 0.5, 0.25);
        assert_eq!(v, vec![2.0, 0.0, -1.0]);
    }

    #[test]
    fn test_nonneg_assign() {
        let mut v = vec![-1.0, 0.0, 2.0];
        nonneg_assign(&mut v);
        assert_eq!(v, vec![0.0, 0.0, 2.0]);
    }

    #[test]
    fn test_div_assign_replaces_non_finite() {
        let mut v = vec![1.0, 0.0, 3.0, -2.0];
        div_assign(&mut v, &[2.0, 0.0, 0.0, 0.0], 0.25);
        assert_eq!(v, vec![0.5, 0.25, 0.25, 0.25]);
    }

    #[test]
    fn test_sum_rows_and_dot() {
        let m = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![0.5, 0.0]];
        assert_eq!(sum_rows(&m, 2), vec![4.5, 6.0]);
        assert_eq!(dot(&[1.0, 2.0], &[3.0, 4.0]), 11.0);
    }
}
