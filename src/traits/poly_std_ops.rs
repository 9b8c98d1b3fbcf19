//! `std::ops` implementations for `TaylorPoly<T>`.
//!
//! Binary operators are provided for every owned/borrowed operand
//! combination (the type is heap-backed, so borrowed forms avoid clones in
//! user right-hand sides), plus mixed operations with a bare coefficient and,
//! for the primitive floats, the reversed scalar-first forms.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::ops;
use crate::poly::TaylorPoly;
use crate::scalar::Coeff;

macro_rules! impl_poly_binop {
    ($Op:ident, $method:ident, $kernel:path) => {
        #[allow(clippy::suspicious_arithmetic_impl)]
        impl<T: Coeff> $Op for TaylorPoly<T> {
            type Output = TaylorPoly<T>;
            #[inline]
            fn $method(self, rhs: Self) -> TaylorPoly<T> {
                self.binary_with(&rhs, |a, b, c| $kernel(a, b, c))
            }
        }

        #[allow(clippy::suspicious_arithmetic_impl)]
        impl<T: Coeff> $Op<&TaylorPoly<T>> for TaylorPoly<T> {
            type Output = TaylorPoly<T>;
            #[inline]
            fn $method(self, rhs: &TaylorPoly<T>) -> TaylorPoly<T> {
                self.binary_with(rhs, |a, b, c| $kernel(a, b, c))
            }
        }

        #[allow(clippy::suspicious_arithmetic_impl)]
        impl<T: Coeff> $Op<TaylorPoly<T>> for &TaylorPoly<T> {
            type Output = TaylorPoly<T>;
            #[inline]
            fn $method(self, rhs: TaylorPoly<T>) -> TaylorPoly<T> {
                self.binary_with(&rhs, |a, b, c| $kernel(a, b, c))
            }
        }

        #[allow(clippy::suspicious_arithmetic_impl)]
        impl<T: Coeff> $Op<&TaylorPoly<T>> for &TaylorPoly<T> {
            type Output = TaylorPoly<T>;
            #[inline]
            fn $method(self, rhs: &TaylorPoly<T>) -> TaylorPoly<T> {
                self.binary_with(rhs, |a, b, c| $kernel(a, b, c))
            }
        }
    };
}

impl_poly_binop!(Add, add, ops::add);
impl_poly_binop!(Sub, sub, ops::sub);
impl_poly_binop!(Mul, mul, ops::mul);
impl_poly_binop!(Div, div, ops::div);

impl<T: Coeff> Neg for TaylorPoly<T> {
    type Output = TaylorPoly<T>;
    #[inline]
    fn neg(self) -> TaylorPoly<T> {
        self.unary_with(|a, c| ops::neg(a, c))
    }
}

impl<T: Coeff> Neg for &TaylorPoly<T> {
    type Output = TaylorPoly<T>;
    #[inline]
    fn neg(self) -> TaylorPoly<T> {
        self.unary_with(|a, c| ops::neg(a, c))
    }
}

macro_rules! impl_poly_assign {
    ($Op:ident, $method:ident, $Base:ident, $base:ident) => {
        impl<T: Coeff> $Op for TaylorPoly<T> {
            #[inline]
            fn $method(&mut self, rhs: Self) {
                *self = (&*self).$base(&rhs);
            }
        }

        impl<T: Coeff> $Op<&TaylorPoly<T>> for TaylorPoly<T> {
            #[inline]
            fn $method(&mut self, rhs: &TaylorPoly<T>) {
                *self = (&*self).$base(rhs);
            }
        }
    };
}

impl_poly_assign!(AddAssign, add_assign, Add, add);
impl_poly_assign!(SubAssign, sub_assign, Sub, sub);
impl_poly_assign!(MulAssign, mul_assign, Mul, mul);
impl_poly_assign!(DivAssign, div_assign, Div, div);

// ── Mixed ops with a bare coefficient ──

impl<T: Coeff> Add<T> for TaylorPoly<T> {
    type Output = TaylorPoly<T>;
    #[inline]
    fn add(mut self, rhs: T) -> TaylorPoly<T> {
        let c0 = self.coeff(0) + rhs;
        self.set_coeff(0, c0);
        self
    }
}

impl<T: Coeff> Add<T> for &TaylorPoly<T> {
    type Output = TaylorPoly<T>;
    #[inline]
    fn add(self, rhs: T) -> TaylorPoly<T> {
        self.clone() + rhs
    }
}

impl<T: Coeff> Sub<T> for TaylorPoly<T> {
    type Output = TaylorPoly<T>;
    #[inline]
    fn sub(mut self, rhs: T) -> TaylorPoly<T> {
        let c0 = self.coeff(0) - rhs;
        self.set_coeff(0, c0);
        self
    }
}

impl<T: Coeff> Sub<T> for &TaylorPoly<T> {
    type Output = TaylorPoly<T>;
    #[inline]
    fn sub(self, rhs: T) -> TaylorPoly<T> {
        self.clone() - rhs
    }
}

impl<T: Coeff> Mul<T> for TaylorPoly<T> {
    type Output = TaylorPoly<T>;
    #[inline]
    fn mul(self, rhs: T) -> TaylorPoly<T> {
        self.unary_with(|a, c| ops::scale(a, &rhs, c))
    }
}

impl<T: Coeff> Mul<T> for &TaylorPoly<T> {
    type Output = TaylorPoly<T>;
    #[inline]
    fn mul(self, rhs: T) -> TaylorPoly<T> {
        self.unary_with(|a, c| ops::scale(a, &rhs, c))
    }
}

// Scalar division multiplies by the reciprocal.
#[allow(clippy::suspicious_arithmetic_impl)]
impl<T: Coeff> Div<T> for TaylorPoly<T> {
    type Output = TaylorPoly<T>;
    #[inline]
    fn div(self, rhs: T) -> TaylorPoly<T> {
        let inv = T::one() / rhs;
        self.unary_with(|a, c| ops::scale(a, &inv, c))
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl<T: Coeff> Div<T> for &TaylorPoly<T> {
    type Output = TaylorPoly<T>;
    #[inline]
    fn div(self, rhs: T) -> TaylorPoly<T> {
        let inv = T::one() / rhs;
        self.unary_with(|a, c| ops::scale(a, &inv, c))
    }
}

// Scalar-first forms for the primitive floats.
macro_rules! impl_poly_float_ops {
    ($f:ty) => {
        impl Add<TaylorPoly<$f>> for $f {
            type Output = TaylorPoly<$f>;
            #[inline]
            fn add(self, rhs: TaylorPoly<$f>) -> TaylorPoly<$f> {
                rhs + self
            }
        }

        impl Add<&TaylorPoly<$f>> for $f {
            type Output = TaylorPoly<$f>;
            #[inline]
            fn add(self, rhs: &TaylorPoly<$f>) -> TaylorPoly<$f> {
                rhs + self
            }
        }

        impl Sub<TaylorPoly<$f>> for $f {
            type Output = TaylorPoly<$f>;
            #[inline]
            fn sub(self, rhs: TaylorPoly<$f>) -> TaylorPoly<$f> {
                -rhs + self
            }
        }

        impl Sub<&TaylorPoly<$f>> for $f {
            type Output = TaylorPoly<$f>;
            #[inline]
            fn sub(self, rhs: &TaylorPoly<$f>) -> TaylorPoly<$f> {
                -rhs + self
            }
        }

        impl Mul<TaylorPoly<$f>> for $f {
            type Output = TaylorPoly<$f>;
            #[inline]
            fn mul(self, rhs: TaylorPoly<$f>) -> TaylorPoly<$f> {
                rhs * self
            }
        }

        impl Mul<&TaylorPoly<$f>> for $f {
            type Output = TaylorPoly<$f>;
            #[inline]
            fn mul(self, rhs: &TaylorPoly<$f>) -> TaylorPoly<$f> {
                rhs * self
            }
        }

        impl Div<TaylorPoly<$f>> for $f {
            type Output = TaylorPoly<$f>;
            #[inline]
            fn div(self, rhs: TaylorPoly<$f>) -> TaylorPoly<$f> {
                TaylorPoly::constant(self, 0) / rhs
            }
        }

        impl Div<&TaylorPoly<$f>> for $f {
            type Output = TaylorPoly<$f>;
            #[inline]
            fn div(self, rhs: &TaylorPoly<$f>) -> TaylorPoly<$f> {
                TaylorPoly::constant(self, 0) / rhs
            }
        }
    };
}

impl_poly_float_ops!(f32);
impl_poly_float_ops!(f64);
