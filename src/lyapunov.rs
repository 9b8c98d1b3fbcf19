//! Variational extension: integrate the flow Jacobian alongside the state
//! and estimate the Lyapunov spectrum from periodic QR reorthonormalization.
//!
//! The state is augmented from d to d + d·p coordinates: the physical state
//! followed by the flow Jacobian block Φ (row-major, one column per
//! variational direction). The augmented right-hand side computes the
//! physical derivative and `Φ̇ = J·Φ` in one pass by evaluating the user RHS
//! on polynomials whose coefficients are [`Tangent`] values, a two-level
//! nesting (univariate in t, first-order multivariate in the state
//! perturbation). After every accepted step Φ is reorthonormalized with
//! modified Gram–Schmidt and the logs of the R diagonal accumulate into the
//! running exponent estimates `λ_c = Σ ln|R_cc| / (t − t₀)`.
//!
//! The number of variational directions is independent of the state
//! dimension: [`lyapunov_directed`] takes the seed indices explicitly, and
//! [`lyapunov`] is the full-basis special case.

use num_traits::{Float, One, ToPrimitive, Zero};

use crate::error::{Error, Status};
use crate::float::Real;
use crate::gram_schmidt::modified_gram_schmidt;
use crate::integrate::DEFAULT_MAX_STEPS;
use crate::jet::{jet_coeffs, JetWorkspace};
use crate::ode::TaylorRhs;
use crate::poly::{eval_state, TaylorPoly};
use crate::scalar::Elementary;
use crate::step::step_size;
use crate::tangent::Tangent;

/// Trajectory plus running Lyapunov-exponent estimates.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LyapunovSolution<R> {
    /// Sample times.
    pub t: Vec<R>,
    /// Physical states; `x[i]` is the solution at `t[i]`.
    pub x: Vec<Vec<R>>,
    /// Running exponent estimates per sample (zeros at the initial sample,
    /// where no time has elapsed).
    pub lyap: Vec<Vec<R>>,
    /// Accepted steps.
    pub steps: usize,
    pub status: Status,
}

/// Augmented right-hand side: physical part from the values of a
/// tangent-lifted evaluation, variational part `Φ̇ = J·Φ` from its gradients.
struct VariationalRhs<R: Real, S> {
    rhs: S,
    dim: usize,
    ndirs: usize,
    lifted_x: Vec<TaylorPoly<Tangent<R>>>,
    lifted_dx: Vec<TaylorPoly<Tangent<R>>>,
}

impl<R, S> VariationalRhs<R, S>
where
    R: Real + Elementary<Real = R>,
    S: TaylorRhs<Tangent<R>>,
{
    fn new(rhs: S, dim: usize, ndirs: usize, order: usize) -> Self {
        VariationalRhs {
            rhs,
            dim,
            ndirs,
            lifted_x: (0..dim).map(|_| TaylorPoly::zeros(order)).collect(),
            lifted_dx: (0..dim).map(|_| TaylorPoly::zeros(order)).collect(),
        }
    }
}

impl<R, S> TaylorRhs<R> for VariationalRhs<R, S>
where
    R: Real + Elementary<Real = R>,
    S: TaylorRhs<Tangent<R>>,
{
    fn eval(&mut self, t: R, xaug: &[TaylorPoly<R>], dxaug: &mut [TaylorPoly<R>]) {
        let d = self.dim;
        let p = self.ndirs;
        let order = xaug[0].order();

        // Lift the physical prefix: the order-0 coefficients carry the seed
        // gradients e_i, so the gradient components of f come out as the
        // Jacobian ∂f_i/∂x_m expanded along the trajectory.
        for i in 0..d {
            let buf = self.lifted_x[i].coeffs_mut();
            for (k, slot) in buf.iter_mut().enumerate() {
                *slot = if k == 0 {
                    Tangent::variable(xaug[i].coeff(0), i, d)
                } else {
                    Tangent::constant(xaug[i].coeff(k))
                };
            }
        }
        self.rhs.eval(t, &self.lifted_x, &mut self.lifted_dx);

        for i in 0..d {
            let buf = dxaug[i].coeffs_mut();
            for (k, slot) in buf.iter_mut().enumerate() {
                *slot = self.lifted_dx[i].coeffs()[k].val;
            }
        }

        // Φ̇[i][c] = Σ_m J[i][m] · Φ[m][c], one Cauchy product per (m, c).
        for i in 0..d {
            let jac_row = self.lifted_dx[i].coeffs();
            for c in 0..p {
                let mut out = vec![R::zero(); order + 1];
                for (m, phi) in (0..d).map(|m| (m, &xaug[d + m * p + c])) {
                    for (k, slot) in out.iter_mut().enumerate() {
                        let mut sum = R::zero();
                        for j in 0..=k {
                            sum = sum + jac_row[j].grad_coeff(m) * phi.coeff(k - j);
                        }
                        *slot = *slot + sum;
                    }
                }
                dxaug[d + i * p + c].coeffs_mut().copy_from_slice(&out);
            }
        }
    }
}

/// Full-spectrum Lyapunov run: one variational direction per state
/// coordinate.
pub fn lyapunov<R, S>(
    rhs: S,
    x0: &[R],
    t0: R,
    tmax: R,
    order: usize,
    abs_tol: R,
    max_steps: usize,
) -> Result<LyapunovSolution<R>, Error>
where
    R: Real + Elementary<Real = R>,
    S: TaylorRhs<Tangent<R>>,
{
    let directions: Vec<usize> = (0..x0.len()).collect();
    lyapunov_directed(rhs, x0, t0, tmax, order, abs_tol, max_steps, &directions)
}

/// Lyapunov run with caller-supplied variational directions: the Φ block has
/// one column per listed state index, and the returned spectrum has that
/// many exponents.
#[allow(clippy::too_many_arguments)]
pub fn lyapunov_directed<R, S>(
    rhs: S,
    x0: &[R],
    t0: R,
    tmax: R,
    order: usize,
    abs_tol: R,
    max_steps: usize,
    directions: &[usize],
) -> Result<LyapunovSolution<R>, Error>
where
    R: Real + Elementary<Real = R>,
    S: TaylorRhs<Tangent<R>>,
{
    let d = x0.len();
    if d == 0 {
        return Err(Error::EmptyState);
    }
    if order < 2 {
        return Err(Error::InvalidOrder(order));
    }
    if !(abs_tol > R::zero()) || !abs_tol.is_finite() {
        return Err(Error::InvalidTolerance(abs_tol.to_f64().unwrap_or(f64::NAN)));
    }
    let p = directions.len();
    if p == 0 || p > d {
        return Err(Error::DimensionMismatch {
            expected: d,
            found: p,
        });
    }
    for &dir in directions {
        if dir >= d {
            return Err(Error::DimensionMismatch {
                expected: d,
                found: dir,
            });
        }
    }

    let aug = d + d * p;
    let mut cur = vec![R::zero(); aug];
    cur[..d].copy_from_slice(x0);
    for (c, &dir) in directions.iter().enumerate() {
        cur[d + dir * p + c] = R::one();
    }

    let mut vrhs = VariationalRhs::new(rhs, d, p, order);
    let mut polys: Vec<TaylorPoly<R>> = cur
        .iter()
        .map(|&v| TaylorPoly::constant(v, order))
        .collect();
    let mut ws = JetWorkspace::new(aug, order);

    let mut t = t0;
    let mut times = vec![t0];
    let mut states = vec![x0.to_vec()];
    let mut lyaps = vec![vec![R::zero(); p]];
    let mut accum = vec![R::zero(); p];
    let mut logs = vec![R::zero(); p];
    let mut steps = 0usize;
    let mut status = Status::Complete;

    while t < tmax {
        if steps >= max_steps {
            eprintln!(
                "WARNING: step budget of {} exhausted at t = {}; returning the partial trajectory.",
                max_steps, t
            );
            status = Status::MaxStepsReached;
            break;
        }
        for (poly, v) in polys.iter_mut().zip(cur.iter()) {
            let buf = poly.coeffs_mut();
            buf[0] = *v;
            for slot in &mut buf[1..] {
                *slot = R::zero();
            }
        }
        if let Err(e) = jet_coeffs(&mut vrhs, t, &mut polys, &mut ws) {
            status = Status::Failed(e);
            break;
        }
        // Step size from the physical coordinates; Φ rides along.
        let dt = step_size(&polys[..d], abs_tol);
        let remaining = tmax - t;
        if dt >= remaining {
            cur = eval_state(&polys, remaining);
            t = tmax;
        } else {
            cur = eval_state(&polys, dt);
            t = t + dt;
        }
        steps += 1;

        if let Err(e) = modified_gram_schmidt(&mut cur[d..], d, p, &mut logs) {
            status = Status::Failed(e);
            break;
        }
        let elapsed = t - t0;
        for (acc, &lg) in accum.iter_mut().zip(logs.iter()) {
            *acc = *acc + lg;
        }
        times.push(t);
        states.push(cur[..d].to_vec());
        lyaps.push(accum.iter().map(|&a| a / elapsed).collect());
    }

    Ok(LyapunovSolution {
        t: times,
        x: states,
        lyap: lyaps,
        steps,
        status,
    })
}

/// Default-budget convenience wrapper around [`lyapunov`].
pub fn lyapunov_default<R, S>(
    rhs: S,
    x0: &[R],
    t0: R,
    tmax: R,
    order: usize,
    abs_tol: R,
) -> Result<LyapunovSolution<R>, Error>
where
    R: Real + Elementary<Real = R>,
    S: TaylorRhs<Tangent<R>>,
{
    lyapunov(rhs, x0, t0, tmax, order, abs_tol, DEFAULT_MAX_STEPS)
}
