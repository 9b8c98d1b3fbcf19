//! Coefficient-recurrence kernels on coefficient slices.
//!
//! Convention: `c[k]` is the k-th scaled Taylor coefficient, `f^(k)(t₀)/k!`.
//! Every operator comes in two forms:
//!
//! * an **order-k form** (`*_coeff`) that writes coefficient `k` of the
//!   output assuming coefficients `0..k` of all operands and `0..k-1` of the
//!   output are already valid (the hot path of the jet driver);
//! * a **full-sweep form** that fills `c[0..=n]` by running the order-k form
//!   for every order, the body of the allocating operators on
//!   [`TaylorPoly`](crate::poly::TaylorPoly).
//!
//! Operand slices may be shorter than the output: missing coefficients are
//! zero. This is what makes order-0 constants exact ring elements.
//!
//! All recurrences express the next unknown coefficient purely in terms of
//! already-known ones (Griewank's logarithmic-derivative technique for the
//! transcendentals), so sweeping orders 0..N lifts a 0-th-order state to a
//! full order-N jet in O(N²) per operator.

use crate::scalar::{Coeff, Elementary};

/// Coefficient `k` of `a`, with zero-extension past the end of the slice.
#[inline]
pub fn at<T: Coeff>(a: &[T], k: usize) -> T {
    if k < a.len() {
        a[k].clone()
    } else {
        T::zero()
    }
}

// ══════════════════════════════════════════════
//  Arithmetic
// ══════════════════════════════════════════════

/// `c[k] = a[k] + b[k]`
#[inline]
pub fn add_coeff<T: Coeff>(a: &[T], b: &[T], c: &mut [T], k: usize) {
    c[k] = at(a, k) + at(b, k);
}

/// `c[k] = a[k] - b[k]`
#[inline]
pub fn sub_coeff<T: Coeff>(a: &[T], b: &[T], c: &mut [T], k: usize) {
    c[k] = at(a, k) - at(b, k);
}

/// `c[k] = -a[k]`
#[inline]
pub fn neg_coeff<T: Coeff>(a: &[T], c: &mut [T], k: usize) {
    c[k] = -at(a, k);
}

/// `c[k] = s · a[k]`
#[inline]
pub fn scale_coeff<T: Coeff>(a: &[T], s: &T, c: &mut [T], k: usize) {
    c[k] = s.clone() * at(a, k);
}

/// Cauchy product: `c[k] = Σ_{j=0..k} a[j] · b[k-j]`
#[inline]
pub fn mul_coeff<T: Coeff>(a: &[T], b: &[T], c: &mut [T], k: usize) {
    let mut sum = T::zero();
    for j in 0..=k {
        sum = sum + at(a, j) * at(b, k - j);
    }
    c[k] = sum;
}

/// Recursive division: `c[k] = (a[k] - Σ_{j=0..k-1} c[j] · b[k-j]) / b[0]`.
///
/// Reads `c[0..k]`; requires `b[0] ≠ 0` (a zero constant term poisons the
/// result through `T`'s own division).
#[inline]
pub fn div_coeff<T: Coeff>(a: &[T], b: &[T], c: &mut [T], k: usize) {
    let mut sum = at(a, k);
    for j in 0..k {
        sum = sum - c[j].clone() * at(b, k - j);
    }
    c[k] = sum / at(b, 0);
}

// ══════════════════════════════════════════════
//  Transcendentals
// ══════════════════════════════════════════════

/// `c = exp(a)` at order k:
/// `c[0] = exp(a[0])`, `c[k] = (1/k) · Σ_{j=1..k} j · a[j] · c[k-j]`.
#[inline]
pub fn exp_coeff<T: Elementary>(a: &[T], c: &mut [T], k: usize) {
    if k == 0 {
        c[0] = at(a, 0).exp();
        return;
    }
    let mut sum = T::zero();
    for j in 1..=k {
        sum = sum + T::from_index(j) * at(a, j) * c[k - j].clone();
    }
    c[k] = sum / T::from_index(k);
}

/// `c = ln(a)` at order k:
/// `c[0] = ln(a[0])`, `c[k] = (a[k] - (1/k) · Σ_{j=1..k-1} j · c[j] · a[k-j]) / a[0]`.
///
/// Requires `a[0] ≠ 0`.
#[inline]
pub fn ln_coeff<T: Elementary>(a: &[T], c: &mut [T], k: usize) {
    if k == 0 {
        c[0] = at(a, 0).ln();
        return;
    }
    let mut sum = T::zero();
    for j in 1..k {
        sum = sum + T::from_index(j) * c[j].clone() * at(a, k - j);
    }
    c[k] = (at(a, k) - sum / T::from_index(k)) / at(a, 0);
}

/// `c = sqrt(a)` at order k:
/// `c[0] = sqrt(a[0])`, `c[k] = (a[k] - Σ_{j=1..k-1} c[j] · c[k-j]) / (2 · c[0])`.
///
/// Requires `a[0] ≠ 0`.
#[inline]
pub fn sqrt_coeff<T: Elementary>(a: &[T], c: &mut [T], k: usize) {
    if k == 0 {
        c[0] = at(a, 0).sqrt();
        return;
    }
    let mut sum = T::zero();
    for j in 1..k {
        sum = sum + c[j].clone() * c[k - j].clone();
    }
    let two_c0 = (T::one() + T::one()) * c[0].clone();
    c[k] = (at(a, k) - sum) / two_c0;
}

/// `c = a^p` for real `p` at order k:
/// `c[0] = a[0]^p`,
/// `c[k] = (1/(k · a[0])) · Σ_{j=0..k-1} (p·(k-j) - j) · c[j] · a[k-j]`.
///
/// Requires `a[0] ≠ 0` for non-integer `p`.
#[inline]
pub fn powf_coeff<T: Elementary>(a: &[T], p: T::Real, c: &mut [T], k: usize) {
    if k == 0 {
        c[0] = at(a, 0).powf(p);
        return;
    }
    let mut sum = T::zero();
    for j in 0..k {
        let kj = <T::Real as num_traits::FromPrimitive>::from_usize(k - j).unwrap();
        let jf = <T::Real as num_traits::FromPrimitive>::from_usize(j).unwrap();
        let factor = T::from_real(p * kj - jf);
        sum = sum + factor * c[j].clone() * at(a, k - j);
    }
    c[k] = sum / (T::from_index(k) * at(a, 0));
}

/// Coupled sin/cos at order k:
/// `s[k] = (1/k) · Σ_{j=1..k} j · a[j] · co[k-j]`,
/// `co[k] = -(1/k) · Σ_{j=1..k} j · a[j] · s[k-j]`.
#[inline]
pub fn sin_cos_coeff<T: Elementary>(a: &[T], s: &mut [T], co: &mut [T], k: usize) {
    if k == 0 {
        let (s0, c0) = at(a, 0).sin_cos();
        s[0] = s0;
        co[0] = c0;
        return;
    }
    let mut sum_s = T::zero();
    let mut sum_c = T::zero();
    for j in 1..=k {
        let jf = T::from_index(j);
        sum_s = sum_s + jf.clone() * at(a, j) * co[k - j].clone();
        sum_c = sum_c + jf * at(a, j) * s[k - j].clone();
    }
    let kf = T::from_index(k);
    s[k] = sum_s / kf.clone();
    co[k] = -(sum_c / kf);
}

/// Coupled sinh/cosh at order k (the sin/cos recurrence with positive signs).
#[inline]
pub fn sinh_cosh_coeff<T: Elementary>(a: &[T], sh: &mut [T], ch: &mut [T], k: usize) {
    if k == 0 {
        let (sh0, ch0) = at(a, 0).sinh_cosh();
        sh[0] = sh0;
        ch[0] = ch0;
        return;
    }
    let mut sum_sh = T::zero();
    let mut sum_ch = T::zero();
    for j in 1..=k {
        let jf = T::from_index(j);
        sum_sh = sum_sh + jf.clone() * at(a, j) * ch[k - j].clone();
        sum_ch = sum_ch + jf * at(a, j) * sh[k - j].clone();
    }
    let kf = T::from_index(k);
    sh[k] = sum_sh / kf.clone();
    ch[k] = sum_ch / kf;
}

// ══════════════════════════════════════════════
//  Full sweeps
// ══════════════════════════════════════════════

/// `c = a + b`
#[inline]
pub fn add<T: Coeff>(a: &[T], b: &[T], c: &mut [T]) {
    for k in 0..c.len() {
        add_coeff(a, b, c, k);
    }
}

/// `c = a - b`
#[inline]
pub fn sub<T: Coeff>(a: &[T], b: &[T], c: &mut [T]) {
    for k in 0..c.len() {
        sub_coeff(a, b, c, k);
    }
}

/// `c = -a`
#[inline]
pub fn neg<T: Coeff>(a: &[T], c: &mut [T]) {
    for k in 0..c.len() {
        neg_coeff(a, c, k);
    }
}

/// `c = s · a`
#[inline]
pub fn scale<T: Coeff>(a: &[T], s: &T, c: &mut [T]) {
    for k in 0..c.len() {
        scale_coeff(a, s, c, k);
    }
}

/// `c = a · b`
#[inline]
pub fn mul<T: Coeff>(a: &[T], b: &[T], c: &mut [T]) {
    for k in 0..c.len() {
        mul_coeff(a, b, c, k);
    }
}

/// `c = a / b`
#[inline]
pub fn div<T: Coeff>(a: &[T], b: &[T], c: &mut [T]) {
    for k in 0..c.len() {
        div_coeff(a, b, c, k);
    }
}

/// `c = exp(a)`
#[inline]
pub fn exp<T: Elementary>(a: &[T], c: &mut [T]) {
    for k in 0..c.len() {
        exp_coeff(a, c, k);
    }
}

/// `c = ln(a)`
#[inline]
pub fn ln<T: Elementary>(a: &[T], c: &mut [T]) {
    for k in 0..c.len() {
        ln_coeff(a, c, k);
    }
}

/// `c = sqrt(a)`
#[inline]
pub fn sqrt<T: Elementary>(a: &[T], c: &mut [T]) {
    for k in 0..c.len() {
        sqrt_coeff(a, c, k);
    }
}

/// `c = a^p`
#[inline]
pub fn powf<T: Elementary>(a: &[T], p: T::Real, c: &mut [T]) {
    for k in 0..c.len() {
        powf_coeff(a, p, c, k);
    }
}

/// `(s, co) = (sin(a), cos(a))`
#[inline]
pub fn sin_cos<T: Elementary>(a: &[T], s: &mut [T], co: &mut [T]) {
    for k in 0..s.len() {
        sin_cos_coeff(a, s, co, k);
    }
}

/// `(sh, ch) = (sinh(a), cosh(a))`
#[inline]
pub fn sinh_cosh<T: Elementary>(a: &[T], sh: &mut [T], ch: &mut [T]) {
    for k in 0..sh.len() {
        sinh_cosh_coeff(a, sh, ch, k);
    }
}

/// `c = tan(a)`, with `scratch` holding the running `1 + tan²(a)`.
///
/// `c[k] = (1/k) · Σ_{j=1..k} j · a[j] · scratch[k-j]` uses only
/// `scratch[0..k-1]`, after which `scratch[k] = Σ_{j=0..k} c[j] · c[k-j]`
/// closes the coupled recurrence.
#[inline]
pub fn tan<T: Elementary>(a: &[T], c: &mut [T], scratch: &mut [T]) {
    let n = c.len();
    c[0] = at(a, 0).tan();
    scratch[0] = T::one() + c[0].clone() * c[0].clone();
    for k in 1..n {
        let mut sum = T::zero();
        for j in 1..=k {
            sum = sum + T::from_index(j) * at(a, j) * scratch[k - j].clone();
        }
        c[k] = sum / T::from_index(k);
        let mut s_k = T::zero();
        for j in 0..=k {
            s_k = s_k + c[j].clone() * c[k - j].clone();
        }
        scratch[k] = s_k;
    }
}
