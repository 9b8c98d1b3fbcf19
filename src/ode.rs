//! Right-hand-side forms accepted by the integrators.
//!
//! The native shape is the in-place form: any
//! `FnMut(t, x: &[TaylorPoly<T>], xdot: &mut [TaylorPoly<T>])` is a
//! [`TaylorRhs`] as-is. The allocating vector form and the scalar form are
//! wrapped by [`VecRhs`] and [`ScalarRhs`]. The jet driver calls the RHS once
//! per expansion order on a prefix of the state expansion, so the same
//! closure serves both the first function evaluation and every higher-order
//! recurrence sweep.
//!
//! The time argument is the scalar expansion point. A non-autonomous system
//! that needs the time as a series builds it to the state's order:
//! `TaylorPoly::variable(T::from_real(t), x[0].order())`.

use crate::poly::TaylorPoly;
use crate::scalar::Coeff;

/// A system `dx/dt = f(t, x)` evaluated on truncated polynomials.
pub trait TaylorRhs<T: Coeff> {
    /// Write `f(t, x)` into `xdot`. Implementations may assume
    /// `x.len() == xdot.len()`.
    fn eval(&mut self, t: T::Real, x: &[TaylorPoly<T>], xdot: &mut [TaylorPoly<T>]);
}

impl<T, F> TaylorRhs<T> for F
where
    T: Coeff,
    F: FnMut(T::Real, &[TaylorPoly<T>], &mut [TaylorPoly<T>]),
{
    #[inline]
    fn eval(&mut self, t: T::Real, x: &[TaylorPoly<T>], xdot: &mut [TaylorPoly<T>]) {
        self(t, x, xdot)
    }
}

/// Adapter for the allocating vector form `(t, x) → Vec<TaylorPoly<T>>`.
pub struct VecRhs<F>(pub F);

impl<T, F> TaylorRhs<T> for VecRhs<F>
where
    T: Coeff,
    F: FnMut(T::Real, &[TaylorPoly<T>]) -> Vec<TaylorPoly<T>>,
{
    fn eval(&mut self, t: T::Real, x: &[TaylorPoly<T>], xdot: &mut [TaylorPoly<T>]) {
        let out = (self.0)(t, x);
        assert_eq!(
            out.len(),
            xdot.len(),
            "right-hand side returned {} coordinates for a {}-dimensional state",
            out.len(),
            xdot.len()
        );
        for (slot, poly) in xdot.iter_mut().zip(out) {
            *slot = poly;
        }
    }
}

/// Adapter for a scalar ODE `(t, x) → TaylorPoly<T>` (the d = 1 case).
pub struct ScalarRhs<F>(pub F);

impl<T, F> TaylorRhs<T> for ScalarRhs<F>
where
    T: Coeff,
    F: FnMut(T::Real, &TaylorPoly<T>) -> TaylorPoly<T>,
{
    #[inline]
    fn eval(&mut self, t: T::Real, x: &[TaylorPoly<T>], xdot: &mut [TaylorPoly<T>]) {
        xdot[0] = (self.0)(t, &x[0]);
    }
}
