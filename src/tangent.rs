//! First-order multivariate expansion `Tangent<T>`: a value paired with a
//! runtime-width gradient.
//!
//! `Tangent { val, grad }` represents `val + Σ grad[i]·ε_i` with `ε_i ε_j = 0`.
//! The variational driver integrates polynomials whose coefficients are
//! `Tangent` values: one pass of the jet driver over
//! `TaylorPoly<Tangent<R>>` yields both the physical expansion (the values)
//! and the Jacobian expansion `∂f_i/∂x_j` along the trajectory (the
//! gradients).
//!
//! The gradient width travels with the value. Constants carry an empty
//! gradient and extend on contact, so `Zero`/`One` need no ambient
//! configuration.

use std::fmt::{self, Display};

use num_traits::{FromPrimitive, One, Zero};

use crate::ops;
use crate::scalar::{Coeff, Elementary};

/// Value plus gradient with respect to a set of seed directions.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tangent<T> {
    /// Primal value.
    pub val: T,
    /// Partial derivatives; missing entries are zero.
    pub grad: Vec<T>,
}

impl<T: Coeff> Tangent<T> {
    /// Create from an explicit value and gradient.
    #[inline]
    pub fn new(val: T, grad: Vec<T>) -> Self {
        Tangent { val, grad }
    }

    /// Constant: empty (all-zero) gradient.
    #[inline]
    pub fn constant(val: T) -> Self {
        Tangent {
            val,
            grad: Vec::new(),
        }
    }

    /// Seed direction `dir` out of `dims`: gradient `e_dir`.
    pub fn variable(val: T, dir: usize, dims: usize) -> Self {
        let mut grad = vec![T::zero(); dims];
        grad[dir] = T::one();
        Tangent { val, grad }
    }

    /// Partial derivative along direction `i`; zero past the stored width.
    #[inline]
    pub fn grad_coeff(&self, i: usize) -> T {
        ops::at(&self.grad, i)
    }

    /// Chain rule: given `f(val)` and `f'(val)`, produce the lifted result.
    #[inline]
    pub(crate) fn chain(&self, f_val: T, f_deriv: T) -> Self {
        Tangent {
            val: f_val,
            grad: self
                .grad
                .iter()
                .map(|g| f_deriv.clone() * g.clone())
                .collect(),
        }
    }

    /// Combine two gradients entry-wise at the larger width.
    pub(crate) fn zip_grads(a: &Self, b: &Self, f: impl Fn(T, T) -> T) -> Vec<T> {
        let n = a.grad.len().max(b.grad.len());
        (0..n)
            .map(|i| f(a.grad_coeff(i), b.grad_coeff(i)))
            .collect()
    }
}

impl<T: Coeff> Display for Tangent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.val)?;
        for (i, g) in self.grad.iter().enumerate() {
            write!(f, " + {}·ε{}", g, i)?;
        }
        Ok(())
    }
}

impl<T: Coeff> Default for Tangent<T> {
    fn default() -> Self {
        Tangent::constant(T::zero())
    }
}

impl<T: Coeff> PartialEq for Tangent<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.val != other.val {
            return false;
        }
        let n = self.grad.len().max(other.grad.len());
        (0..n).all(|i| self.grad_coeff(i) == other.grad_coeff(i))
    }
}

impl<T: Coeff> Zero for Tangent<T> {
    fn zero() -> Self {
        Tangent::constant(T::zero())
    }

    fn is_zero(&self) -> bool {
        self.val.is_zero() && self.grad.iter().all(Zero::is_zero)
    }
}

impl<T: Coeff> One for Tangent<T> {
    fn one() -> Self {
        Tangent::constant(T::one())
    }
}

impl<T: Coeff> Coeff for Tangent<T> {
    type Real = T::Real;

    fn from_real(r: Self::Real) -> Self {
        Tangent::constant(T::from_real(r))
    }

    fn norm(&self) -> Self::Real {
        let mut acc = self.val.norm();
        for g in &self.grad {
            let n = g.norm();
            if n > acc {
                acc = n;
            }
        }
        acc
    }

    fn is_finite(&self) -> bool {
        self.val.is_finite() && self.grad.iter().all(Coeff::is_finite)
    }
}

impl<T: Elementary> Elementary for Tangent<T> {
    fn exp(&self) -> Self {
        let e = self.val.exp();
        self.chain(e.clone(), e)
    }

    fn ln(&self) -> Self {
        self.chain(self.val.ln(), T::one() / self.val.clone())
    }

    fn sqrt(&self) -> Self {
        let s = self.val.sqrt();
        let two = T::one() + T::one();
        self.chain(s.clone(), T::one() / (two * s))
    }

    fn sin_cos(&self) -> (Self, Self) {
        let (s, c) = self.val.sin_cos();
        (
            self.chain(s.clone(), c.clone()),
            self.chain(c, -s),
        )
    }

    fn tan(&self) -> Self {
        let t = self.val.tan();
        let deriv = T::one() + t.clone() * t.clone();
        self.chain(t, deriv)
    }

    fn sinh_cosh(&self) -> (Self, Self) {
        let (sh, ch) = self.val.sinh_cosh();
        (self.chain(sh.clone(), ch.clone()), self.chain(ch, sh))
    }

    fn powf(&self, p: Self::Real) -> Self {
        let val = self.val.powf(p);
        let deriv = T::from_real(p) * self.val.powf(p - <Self::Real as One>::one());
        self.chain(val, deriv)
    }

    fn powi(&self, n: i32) -> Self {
        if n == 0 {
            return Tangent::one();
        }
        let val = self.val.powi(n);
        let nf = T::from_real(<Self::Real as FromPrimitive>::from_i32(n).unwrap());
        let deriv = nf * self.val.powi(n - 1);
        self.chain(val, deriv)
    }
}
