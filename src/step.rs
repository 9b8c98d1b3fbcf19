//! Step-size control from the tail of a finished jet.
//!
//! The local truncation error of an order-N expansion evaluated at δt is
//! dominated by the last retained terms, so the controller picks δt from the
//! two tail coefficients: `δt = min over k ∈ {N-1, N} of (ε/‖a_k‖)^(1/k)`,
//! taking the minimum over all coordinates. Coordinates whose tail
//! coefficients vanish contribute nothing; if none contribute the step is
//! `+∞` and the caller clamps it to the remaining span, which is what lets
//! trivially integrable segments finish in one step.

use num_traits::{Float, FromPrimitive, One, ToPrimitive, Zero};

use crate::float::Real;
use crate::poly::TaylorPoly;
use crate::scalar::Coeff;

/// Absolute-tolerance step size for a finished jet. Returns `+∞` when every
/// inspected tail coefficient is zero.
pub fn step_size<T: Coeff>(x: &[TaylorPoly<T>], abs_tol: T::Real) -> T::Real {
    tail_step(x, abs_tol)
}

/// Relative/absolute two-regime step size, safety factors included.
///
/// With ρ the ∞-norm of the current state: when `rel_tol·ρ ≤ abs_tol` the
/// absolute regime applies (tolerance `abs_tol`, safety `e⁻¹/e²`), otherwise
/// the relative regime (tolerance `rel_tol·ρ`, safety
/// `exp(−7/(10(N−1)))/e²`).
pub fn step_size_tol<T: Coeff>(
    x: &[TaylorPoly<T>],
    rel_tol: T::Real,
    abs_tol: T::Real,
) -> T::Real {
    let one = <T::Real as num_traits::One>::one();
    let two = one + one;
    let order = x[0].order();

    let mut rho = <T::Real as Zero>::zero();
    for xi in x {
        let n = xi.coeff(0).norm();
        if n > rho {
            rho = n;
        }
    }

    if rel_tol * rho <= abs_tol {
        let fac = (-one).exp() / two.exp();
        tail_step(x, abs_tol) * fac
    } else {
        let seven_tenths = <T::Real as FromPrimitive>::from_f64(0.7).unwrap();
        let n1 = <T::Real as FromPrimitive>::from_usize(order - 1).unwrap();
        let fac = (-(seven_tenths / n1)).exp() / two.exp();
        tail_step(x, rel_tol * rho) * fac
    }
}

/// Expansion order for the dynamic-order driver:
/// `N = ⌈1 − ln(min(ε_abs, ε_rel·‖x₀‖∞))/2⌉`, floored at 2 so the two tail
/// orders exist.
pub fn dynamic_order<R: Real>(rel_tol: R, abs_tol: R, x0_norm: R) -> usize {
    let tol = if x0_norm > R::zero() {
        abs_tol.min(rel_tol * x0_norm)
    } else {
        abs_tol
    };
    let two = R::one() + R::one();
    let raw = (R::one() - tol.ln() / two).ceil();
    match raw.to_f64() {
        Some(n) if n > 2.0 => n as usize,
        _ => 2,
    }
}

fn tail_step<T: Coeff>(x: &[TaylorPoly<T>], tol: T::Real) -> T::Real {
    let order = x[0].order();
    let mut h = <T::Real as num_traits::Float>::infinity();
    for k in [order - 1, order] {
        let kinv = <T::Real as num_traits::One>::one()
            / <T::Real as FromPrimitive>::from_usize(k).unwrap();
        for xi in x {
            let nrm = xi.coeff(k).norm();
            if nrm.is_zero() {
                continue;
            }
            let cand = (tol / nrm).powf(kinv);
            if cand < h {
                h = cand;
            }
        }
    }
    h
}
