//! `std::ops` implementations for `Tangent<T>`.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::scalar::Coeff;
use crate::tangent::Tangent;

fn add_tangents<T: Coeff>(a: &Tangent<T>, b: &Tangent<T>) -> Tangent<T> {
    Tangent::new(
        a.val.clone() + b.val.clone(),
        Tangent::zip_grads(a, b, |ga, gb| ga + gb),
    )
}

fn sub_tangents<T: Coeff>(a: &Tangent<T>, b: &Tangent<T>) -> Tangent<T> {
    Tangent::new(
        a.val.clone() - b.val.clone(),
        Tangent::zip_grads(a, b, |ga, gb| ga - gb),
    )
}

fn mul_tangents<T: Coeff>(a: &Tangent<T>, b: &Tangent<T>) -> Tangent<T> {
    Tangent::new(
        a.val.clone() * b.val.clone(),
        Tangent::zip_grads(a, b, |ga, gb| {
            ga * b.val.clone() + a.val.clone() * gb
        }),
    )
}

fn div_tangents<T: Coeff>(a: &Tangent<T>, b: &Tangent<T>) -> Tangent<T> {
    let val = a.val.clone() / b.val.clone();
    let grad = {
        let val = val.clone();
        Tangent::zip_grads(a, b, move |ga, gb| {
            (ga - val.clone() * gb) / b.val.clone()
        })
    };
    Tangent::new(val, grad)
}

macro_rules! impl_tangent_binop {
    ($Op:ident, $method:ident, $kernel:ident) => {
        #[allow(clippy::suspicious_arithmetic_impl)]
        impl<T: Coeff> $Op for Tangent<T> {
            type Output = Tangent<T>;
            #[inline]
            fn $method(self, rhs: Self) -> Tangent<T> {
                $kernel(&self, &rhs)
            }
        }

        #[allow(clippy::suspicious_arithmetic_impl)]
        impl<T: Coeff> $Op<&Tangent<T>> for Tangent<T> {
            type Output = Tangent<T>;
            #[inline]
            fn $method(self, rhs: &Tangent<T>) -> Tangent<T> {
                $kernel(&self, rhs)
            }
        }

        #[allow(clippy::suspicious_arithmetic_impl)]
        impl<T: Coeff> $Op<Tangent<T>> for &Tangent<T> {
            type Output = Tangent<T>;
            #[inline]
            fn $method(self, rhs: Tangent<T>) -> Tangent<T> {
                $kernel(self, &rhs)
            }
        }

        #[allow(clippy::suspicious_arithmetic_impl)]
        impl<T: Coeff> $Op<&Tangent<T>> for &Tangent<T> {
            type Output = Tangent<T>;
            #[inline]
            fn $method(self, rhs: &Tangent<T>) -> Tangent<T> {
                $kernel(self, rhs)
            }
        }
    };
}

impl_tangent_binop!(Add, add, add_tangents);
impl_tangent_binop!(Sub, sub, sub_tangents);
impl_tangent_binop!(Mul, mul, mul_tangents);
impl_tangent_binop!(Div, div, div_tangents);

impl<T: Coeff> Neg for Tangent<T> {
    type Output = Tangent<T>;
    #[inline]
    fn neg(self) -> Tangent<T> {
        Tangent::new(
            -self.val,
            self.grad.into_iter().map(|g| -g).collect(),
        )
    }
}

impl<T: Coeff> Neg for &Tangent<T> {
    type Output = Tangent<T>;
    #[inline]
    fn neg(self) -> Tangent<T> {
        -self.clone()
    }
}

macro_rules! impl_tangent_assign {
    ($Op:ident, $method:ident, $base:ident) => {
        impl<T: Coeff> $Op for Tangent<T> {
            #[inline]
            fn $method(&mut self, rhs: Self) {
                *self = (&*self).$base(&rhs);
            }
        }

        impl<T: Coeff> $Op<&Tangent<T>> for Tangent<T> {
            #[inline]
            fn $method(&mut self, rhs: &Tangent<T>) {
                *self = (&*self).$base(rhs);
            }
        }
    };
}

impl_tangent_assign!(AddAssign, add_assign, add);
impl_tangent_assign!(SubAssign, sub_assign, sub);
impl_tangent_assign!(MulAssign, mul_assign, mul);
impl_tangent_assign!(DivAssign, div_assign, div);
