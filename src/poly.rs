//! The univariate truncated polynomial `TaylorPoly<T>`.
//!
//! Coefficient storage is a heap buffer of length `order + 1`; `coeffs[0]` is
//! the current value, `coeffs[k]` the k-th scaled Taylor coefficient
//! `f^(k)(t₀)/k!`. The degree bound is fixed per value and set at run time
//! (the relative-tolerance driver picks the expansion order dynamically).
//!
//! Binary operators accept operands of different orders and extend to the
//! larger one, so `Zero::zero()`/`One::one()` and other exact constants are
//! order-0 values that behave correctly on contact with full-order state
//! polynomials. State vectors handed to the integrator are still required to
//! share one order.
//!
//! `TaylorPoly<T>` itself implements [`Coeff`] and [`Elementary`], which is
//! what the variational driver's two-level nesting relies on.

use std::fmt::{self, Display};

use num_traits::{One, Zero};

use crate::error::Error;
use crate::ops;
use crate::scalar::{Coeff, Elementary};

/// Univariate truncated polynomial over a coefficient type `T`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TaylorPoly<T> {
    coeffs: Vec<T>,
}

impl<T: Coeff> TaylorPoly<T> {
    /// Create from raw coefficients. The buffer length fixes the degree
    /// bound; it must be non-empty.
    pub fn new(coeffs: Vec<T>) -> Self {
        assert!(!coeffs.is_empty(), "a polynomial needs at least one coefficient");
        TaylorPoly { coeffs }
    }

    /// Constant `c` at the given order: buffer `[c, 0, …, 0]`.
    pub fn constant(value: T, order: usize) -> Self {
        let mut coeffs = vec![T::zero(); order + 1];
        coeffs[0] = value;
        TaylorPoly { coeffs }
    }

    /// Independent variable at the given order: buffer `[c, 1, 0, …, 0]`.
    pub fn variable(value: T, order: usize) -> Self {
        let mut coeffs = vec![T::zero(); order + 1];
        coeffs[0] = value;
        if order > 0 {
            coeffs[1] = T::one();
        }
        TaylorPoly { coeffs }
    }

    /// All-zero polynomial at the given order.
    pub fn zeros(order: usize) -> Self {
        TaylorPoly {
            coeffs: vec![T::zero(); order + 1],
        }
    }

    /// Degree bound.
    #[inline]
    pub fn order(&self) -> usize {
        self.coeffs.len() - 1
    }

    #[inline]
    pub fn coeffs(&self) -> &[T] {
        &self.coeffs
    }

    #[inline]
    pub fn coeffs_mut(&mut self) -> &mut [T] {
        &mut self.coeffs
    }

    #[inline]
    pub fn into_coeffs(self) -> Vec<T> {
        self.coeffs
    }

    /// The k-th coefficient; zero past the degree bound.
    #[inline]
    pub fn coeff(&self, k: usize) -> T {
        ops::at(&self.coeffs, k)
    }

    #[inline]
    pub fn set_coeff(&mut self, k: usize, value: T) {
        self.coeffs[k] = value;
    }

    /// Current value (coefficient 0).
    #[inline]
    pub fn value(&self) -> T {
        self.coeffs[0].clone()
    }

    /// The k-th derivative at the expansion point: `k! · coeffs[k]`.
    pub fn derivative(&self, k: usize) -> T {
        let mut factorial = T::one();
        for i in 2..=k {
            factorial = factorial * T::from_index(i);
        }
        self.coeff(k) * factorial
    }

    /// Copy of this polynomial truncated or zero-extended to `order`.
    pub fn resized(&self, order: usize) -> Self {
        let mut coeffs = vec![T::zero(); order + 1];
        let n = self.coeffs.len().min(order + 1);
        coeffs[..n].clone_from_slice(&self.coeffs[..n]);
        TaylorPoly { coeffs }
    }

    /// Horner evaluation at a real displacement `dt`: `Σ coeffs[k] · dt^k`.
    pub fn eval(&self, dt: T::Real) -> T {
        let h = T::from_real(dt);
        let mut acc = self.coeffs[self.order()].clone();
        for k in (0..self.order()).rev() {
            acc = acc * h.clone() + self.coeffs[k].clone();
        }
        acc
    }

    /// Whether every coefficient is finite.
    pub fn is_finite(&self) -> bool {
        self.coeffs.iter().all(Coeff::is_finite)
    }

    // ── Checked kernel entry points ──
    //
    // The std::ops overloads are the unchecked forms; these surface the
    // kernel's domain conditions as explicit error values.

    /// Division, failing with [`Error::DivByZero`] when the divisor's
    /// constant term is zero.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self, Error> {
        if rhs.coeffs[0].is_zero() {
            return Err(Error::DivByZero);
        }
        Ok(self.binary_with(rhs, |a, b, c| ops::div(a, b, c)))
    }

    /// Reciprocal, failing with [`Error::DivByZero`] when the constant term
    /// is zero.
    pub fn checked_recip(&self) -> Result<Self, Error> {
        if self.coeffs[0].is_zero() {
            return Err(Error::DivByZero);
        }
        let one = TaylorPoly::constant(T::one(), 0);
        Ok(one.binary_with(self, |a, b, c| ops::div(a, b, c)))
    }
}

impl<T: Elementary> TaylorPoly<T> {
    /// Logarithm, failing with [`Error::DomainError`] when the constant term
    /// is zero.
    pub fn checked_ln(&self) -> Result<Self, Error> {
        if self.coeffs[0].is_zero() {
            return Err(Error::DomainError(
                "log of a polynomial with zero constant term",
            ));
        }
        Ok(self.unary_with(|a, c| ops::ln(a, c)))
    }

    /// Square root, failing with [`Error::DomainError`] when the constant
    /// term is zero.
    pub fn checked_sqrt(&self) -> Result<Self, Error> {
        if self.coeffs[0].is_zero() {
            return Err(Error::DomainError(
                "sqrt of a polynomial with zero constant term",
            ));
        }
        Ok(self.unary_with(|a, c| ops::sqrt(a, c)))
    }

    /// Real power, failing with [`Error::DomainError`] when the constant term
    /// is zero (the recurrence divides by it). Use [`Elementary::powi`] for
    /// integer exponents of such polynomials.
    pub fn checked_powf(&self, p: T::Real) -> Result<Self, Error> {
        if self.coeffs[0].is_zero() {
            return Err(Error::DomainError(
                "non-integer power of a polynomial with zero constant term",
            ));
        }
        Ok(self.unary_with(|a, c| ops::powf(a, p, c)))
    }
}

// ── Operation plumbing shared with the operator overloads ──

impl<T: Coeff> TaylorPoly<T> {
    /// Run a full-sweep kernel against `rhs`, allocating the output at the
    /// larger of the two orders.
    pub(crate) fn binary_with(&self, rhs: &Self, f: impl FnOnce(&[T], &[T], &mut [T])) -> Self {
        let order = self.order().max(rhs.order());
        let mut out = vec![T::zero(); order + 1];
        f(&self.coeffs, &rhs.coeffs, &mut out);
        TaylorPoly { coeffs: out }
    }

    /// Run a unary full-sweep kernel, allocating the output at this order.
    pub(crate) fn unary_with(&self, f: impl FnOnce(&[T], &mut [T])) -> Self {
        let mut out = vec![T::zero(); self.coeffs.len()];
        f(&self.coeffs, &mut out);
        TaylorPoly { coeffs: out }
    }
}

/// Evaluate every polynomial of a state vector at the same displacement.
pub fn eval_state<T: Coeff>(x: &[TaylorPoly<T>], dt: T::Real) -> Vec<T> {
    x.iter().map(|p| p.eval(dt)).collect()
}

impl<T: Coeff> Display for TaylorPoly<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coeffs[0])?;
        for (i, c) in self.coeffs.iter().enumerate().skip(1) {
            write!(f, " + {}·t^{}", c, i)?;
        }
        Ok(())
    }
}

impl<T: Coeff> Default for TaylorPoly<T> {
    fn default() -> Self {
        TaylorPoly::zeros(0)
    }
}

/// Mathematical equality: coefficients compared with zero-extension, so the
/// order-0 constant `1` equals `[1, 0, 0]`.
impl<T: Coeff> PartialEq for TaylorPoly<T> {
    fn eq(&self, other: &Self) -> bool {
        let n = self.coeffs.len().max(other.coeffs.len());
        (0..n).all(|k| ops::at(&self.coeffs, k) == ops::at(&other.coeffs, k))
    }
}

impl<T: Coeff> Zero for TaylorPoly<T> {
    fn zero() -> Self {
        TaylorPoly::constant(T::zero(), 0)
    }

    fn is_zero(&self) -> bool {
        self.coeffs.iter().all(Zero::is_zero)
    }
}

impl<T: Coeff> One for TaylorPoly<T> {
    fn one() -> Self {
        TaylorPoly::constant(T::one(), 0)
    }
}

// ══════════════════════════════════════════════
//  Nesting: a polynomial is itself a coefficient
// ══════════════════════════════════════════════

impl<T: Elementary> Coeff for TaylorPoly<T> {
    type Real = T::Real;

    fn from_real(r: Self::Real) -> Self {
        TaylorPoly::constant(T::from_real(r), 0)
    }

    fn norm(&self) -> Self::Real {
        let mut acc = <Self::Real as Zero>::zero();
        for c in &self.coeffs {
            let n = c.norm();
            if n > acc {
                acc = n;
            }
        }
        acc
    }

    fn is_finite(&self) -> bool {
        TaylorPoly::is_finite(self)
    }
}

impl<T: Elementary> Elementary for TaylorPoly<T> {
    fn exp(&self) -> Self {
        self.unary_with(|a, c| ops::exp(a, c))
    }

    fn ln(&self) -> Self {
        self.unary_with(|a, c| ops::ln(a, c))
    }

    fn sqrt(&self) -> Self {
        self.unary_with(|a, c| ops::sqrt(a, c))
    }

    fn sin_cos(&self) -> (Self, Self) {
        let mut s = vec![T::zero(); self.coeffs.len()];
        let mut co = vec![T::zero(); self.coeffs.len()];
        ops::sin_cos(&self.coeffs, &mut s, &mut co);
        (TaylorPoly { coeffs: s }, TaylorPoly { coeffs: co })
    }

    fn tan(&self) -> Self {
        let mut scratch = vec![T::zero(); self.coeffs.len()];
        let mut c = vec![T::zero(); self.coeffs.len()];
        ops::tan(&self.coeffs, &mut c, &mut scratch);
        TaylorPoly { coeffs: c }
    }

    fn sinh_cosh(&self) -> (Self, Self) {
        let mut sh = vec![T::zero(); self.coeffs.len()];
        let mut ch = vec![T::zero(); self.coeffs.len()];
        ops::sinh_cosh(&self.coeffs, &mut sh, &mut ch);
        (TaylorPoly { coeffs: sh }, TaylorPoly { coeffs: ch })
    }

    fn powf(&self, p: Self::Real) -> Self {
        self.unary_with(|a, c| ops::powf(a, p, c))
    }
}
