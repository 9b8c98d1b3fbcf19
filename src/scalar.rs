//! The [`Coeff`] and [`Elementary`] capability traits for Taylor coefficients.
//!
//! A polynomial [`TaylorPoly<T>`](crate::poly::TaylorPoly) is parametric over
//! its coefficient type `T: Coeff`. The bundle is deliberately a capability
//! set rather than a float hierarchy: `f64`, `Complex<f64>`, a nested
//! polynomial and a [`Tangent`](crate::tangent::Tangent) all satisfy it, which
//! is what lets the variational driver run the same kernel with two-level
//! nesting.

use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_complex::Complex;
use num_traits::{FromPrimitive, One, Zero};

use crate::float::Real;

/// Ring/field capabilities required of a Taylor coefficient.
///
/// `Clone` rather than `Copy`: heap-backed coefficient types (nested
/// polynomials, gradient vectors) must qualify.
pub trait Coeff:
    Clone
    + Debug
    + Display
    + Default
    + PartialEq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Zero
    + One
{
    /// The real line associated with this coefficient type; carries times,
    /// tolerances and step sizes.
    type Real: Real;

    /// Lift a real scalar to a (constant) coefficient.
    fn from_real(r: Self::Real) -> Self;

    /// Lift a small integer (an expansion order, a loop index).
    #[inline]
    fn from_index(k: usize) -> Self {
        Self::from_real(<Self::Real as FromPrimitive>::from_usize(k).unwrap())
    }

    /// Magnitude on the real line, as consumed by the step controller.
    /// For composite types this is the ∞-norm over all components.
    fn norm(&self) -> Self::Real;

    /// Whether every component is finite. Non-finite coefficients are how
    /// kernel domain failures inside a user RHS surface to the integrator.
    fn is_finite(&self) -> bool;
}

/// Elementary transcendentals on a coefficient, used by the kernel
/// recurrences for their order-0 base values and by the chain rule of
/// [`Tangent`](crate::tangent::Tangent).
pub trait Elementary: Coeff {
    fn exp(&self) -> Self;
    fn ln(&self) -> Self;
    fn sqrt(&self) -> Self;
    fn sin_cos(&self) -> (Self, Self);
    fn tan(&self) -> Self;
    fn sinh_cosh(&self) -> (Self, Self);

    /// Real power. Implementations may assume the base is away from the
    /// branch point; the polynomial kernel guards that separately.
    fn powf(&self, p: Self::Real) -> Self;

    #[inline]
    fn sin(&self) -> Self {
        self.sin_cos().0
    }

    #[inline]
    fn cos(&self) -> Self {
        self.sin_cos().1
    }

    #[inline]
    fn sinh(&self) -> Self {
        self.sinh_cosh().0
    }

    #[inline]
    fn cosh(&self) -> Self {
        self.sinh_cosh().1
    }

    /// Integer power by binary exponentiation. Valid for any base, including
    /// ones with vanishing constant term.
    fn powi(&self, n: i32) -> Self {
        if n == 0 {
            return Self::one();
        }
        let mut base = self.clone();
        let mut e = n.unsigned_abs();
        let mut acc = Self::one();
        while e > 0 {
            if e & 1 == 1 {
                acc = acc * base.clone();
            }
            e >>= 1;
            if e > 0 {
                base = base.clone() * base;
            }
        }
        if n < 0 {
            Self::one() / acc
        } else {
            acc
        }
    }
}

// ══════════════════════════════════════════════
//  Primitive floats
// ══════════════════════════════════════════════

macro_rules! impl_real_coeff {
    ($f:ty) => {
        impl Coeff for $f {
            type Real = $f;

            #[inline]
            fn from_real(r: $f) -> $f {
                r
            }

            #[inline]
            fn norm(&self) -> $f {
                self.abs()
            }

            #[inline]
            fn is_finite(&self) -> bool {
                <$f>::is_finite(*self)
            }
        }

        impl Elementary for $f {
            #[inline]
            fn exp(&self) -> $f {
                <$f>::exp(*self)
            }

            #[inline]
            fn ln(&self) -> $f {
                <$f>::ln(*self)
            }

            #[inline]
            fn sqrt(&self) -> $f {
                <$f>::sqrt(*self)
            }

            #[inline]
            fn sin_cos(&self) -> ($f, $f) {
                <$f>::sin_cos(*self)
            }

            #[inline]
            fn tan(&self) -> $f {
                <$f>::tan(*self)
            }

            #[inline]
            fn sinh_cosh(&self) -> ($f, $f) {
                (<$f>::sinh(*self), <$f>::cosh(*self))
            }

            #[inline]
            fn powf(&self, p: $f) -> $f {
                <$f>::powf(*self, p)
            }

            #[inline]
            fn powi(&self, n: i32) -> $f {
                <$f>::powi(*self, n)
            }
        }
    };
}

impl_real_coeff!(f32);
impl_real_coeff!(f64);

// ══════════════════════════════════════════════
//  Complex coefficients
// ══════════════════════════════════════════════

macro_rules! impl_complex_coeff {
    ($f:ty) => {
        impl Coeff for Complex<$f> {
            type Real = $f;

            #[inline]
            fn from_real(r: $f) -> Self {
                Complex::new(r, 0.0)
            }

            #[inline]
            fn norm(&self) -> $f {
                (*self).norm()
            }

            #[inline]
            fn is_finite(&self) -> bool {
                self.re.is_finite() && self.im.is_finite()
            }
        }

        impl Elementary for Complex<$f> {
            #[inline]
            fn exp(&self) -> Self {
                (*self).exp()
            }

            #[inline]
            fn ln(&self) -> Self {
                (*self).ln()
            }

            #[inline]
            fn sqrt(&self) -> Self {
                (*self).sqrt()
            }

            #[inline]
            fn sin_cos(&self) -> (Self, Self) {
                ((*self).sin(), (*self).cos())
            }

            #[inline]
            fn tan(&self) -> Self {
                (*self).tan()
            }

            #[inline]
            fn sinh_cosh(&self) -> (Self, Self) {
                ((*self).sinh(), (*self).cosh())
            }

            #[inline]
            fn powf(&self, p: $f) -> Self {
                (*self).powf(p)
            }

            #[inline]
            fn powi(&self, n: i32) -> Self {
                (*self).powi(n)
            }
        }
    };
}

impl_complex_coeff!(f32);
impl_complex_coeff!(f64);
