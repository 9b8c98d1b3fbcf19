//! The jet-coefficients driver: lift a 0-th-order state to a full order-N
//! Taylor expansion of the local solution.
//!
//! For each order `k = 1..=N` the driver evaluates the right-hand side on the
//! prefix of the expansion known so far and reads off the next coefficient
//! from the Taylor-series identity `x[k] = ẋ[k-1] / k`. Orders are strictly
//! sequential; the result is deterministic for a given `(f, x₀, t₀, N)`.

use crate::error::Error;
use crate::ode::TaylorRhs;
use crate::poly::TaylorPoly;
use crate::scalar::Coeff;

/// Scratch buffers for the jet recurrence, allocated once per integration
/// call and reused across steps.
pub struct JetWorkspace<T: Coeff> {
    prefix: Vec<TaylorPoly<T>>,
    xdot: Vec<TaylorPoly<T>>,
}

impl<T: Coeff> JetWorkspace<T> {
    pub fn new(dim: usize, order: usize) -> Self {
        JetWorkspace {
            prefix: (0..dim).map(|_| TaylorPoly::zeros(order)).collect(),
            xdot: (0..dim).map(|_| TaylorPoly::zeros(order)).collect(),
        }
    }

    /// Re-shape for a different dimension or order (the dynamic-order driver
    /// resizes before its first step).
    pub fn resize(&mut self, dim: usize, order: usize) {
        if self.prefix.len() != dim || self.prefix[0].order() != order {
            *self = JetWorkspace::new(dim, order);
        }
    }
}

/// Populate coefficients `1..=N` of every state polynomial in place.
///
/// On entry the 0-th coefficients hold the current state; higher coefficients
/// are ignored and overwritten. Fails with [`Error::NonFiniteCoefficient`]
/// when a freshly computed coefficient is NaN or infinite, which is how kernel
/// domain failures inside `rhs` reach the integrator loop.
pub fn jet_coeffs<T, S>(
    rhs: &mut S,
    t0: T::Real,
    x: &mut [TaylorPoly<T>],
    ws: &mut JetWorkspace<T>,
) -> Result<(), Error>
where
    T: Coeff,
    S: TaylorRhs<T>,
{
    let order = x[0].order();
    for xi in x.iter() {
        if xi.order() != order {
            return Err(Error::OrderMismatch {
                expected: order,
                found: xi.order(),
            });
        }
    }
    for ord in 1..=order {
        // Prefix view: coefficients 0..ord-1 are valid, the tail is zeroed so
        // the allocating operators legitimately produce coefficient ord-1 of
        // the derivative.
        for (p, xi) in ws.prefix.iter_mut().zip(x.iter()) {
            let buf = p.coeffs_mut();
            for (k, slot) in buf.iter_mut().enumerate() {
                *slot = if k < ord { xi.coeff(k) } else { T::zero() };
            }
        }
        rhs.eval(t0, &ws.prefix, &mut ws.xdot);
        for (xi, xdi) in x.iter_mut().zip(ws.xdot.iter()) {
            let c = xdi.coeff(ord - 1) / T::from_index(ord);
            if !c.is_finite() {
                return Err(Error::NonFiniteCoefficient { order: ord });
            }
            xi.set_coeff(ord, c);
        }
    }
    Ok(())
}
