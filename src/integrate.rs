//! The outer integration drivers.
//!
//! Each accepted step builds the jet at the current point, asks the
//! controller for δt, evaluates every state polynomial at δt and appends the
//! new sample. The final step is clamped so the last recorded time equals
//! the requested endpoint exactly. Hitting the step cap is not fatal: the
//! partial trajectory is returned with [`Status::MaxStepsReached`] and one
//! diagnostic line on stderr. Numeric failures inside a step likewise return
//! the partial trajectory, carrying the error in [`Status::Failed`].

use num_traits::{Float, ToPrimitive, Zero};

use crate::error::{Error, Status};
use crate::jet::{jet_coeffs, JetWorkspace};
use crate::ode::{ScalarRhs, TaylorRhs};
use crate::poly::{eval_state, TaylorPoly};
use crate::scalar::Coeff;
use crate::step::{dynamic_order, step_size, step_size_tol};

/// Step cap used when callers have no tighter budget.
pub const DEFAULT_MAX_STEPS: usize = 500_000;

/// Trajectory from [`integrate`] / [`integrate_tol`]: one sample per
/// accepted step, the initial point included.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(serialize = "T: serde::Serialize, T::Real: serde::Serialize"))
)]
pub struct Solution<T: Coeff> {
    /// Sample times, strictly monotonic in the integration direction.
    pub t: Vec<T::Real>,
    /// Sample states; `x[i]` is the solution at `t[i]`.
    pub x: Vec<Vec<T>>,
    /// Accepted steps.
    pub steps: usize,
    pub status: Status,
}

impl<T: Coeff> Solution<T> {
    #[inline]
    pub fn last_time(&self) -> T::Real {
        *self.t.last().unwrap()
    }

    #[inline]
    pub fn last_state(&self) -> &[T] {
        self.x.last().unwrap()
    }
}

/// States sampled on a prescribed grid by [`integrate_grid`];
/// `x[i]` is the solution at `grid[i]`, with `x[0]` the initial state.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GridSolution<T: Coeff> {
    pub x: Vec<Vec<T>>,
    /// Accepted steps, counting the intermediate ones between grid points.
    pub steps: usize,
    pub status: Status,
}

fn validate<T: Coeff>(x0: &[T], order: usize, tols: &[T::Real]) -> Result<(), Error> {
    if x0.is_empty() {
        return Err(Error::EmptyState);
    }
    if order < 2 {
        return Err(Error::InvalidOrder(order));
    }
    for &tol in tols {
        if !(tol > <T::Real as Zero>::zero()) || !tol.is_finite() {
            return Err(Error::InvalidTolerance(tol.to_f64().unwrap_or(f64::NAN)));
        }
    }
    Ok(())
}

/// Re-seed the state polynomials from the current numeric state.
fn seed<T: Coeff>(polys: &mut [TaylorPoly<T>], cur: &[T]) {
    for (p, c) in polys.iter_mut().zip(cur.iter()) {
        let buf = p.coeffs_mut();
        buf[0] = c.clone();
        for slot in &mut buf[1..] {
            *slot = T::zero();
        }
    }
}

fn warn_step_cap<R: std::fmt::Display>(max_steps: usize, t: R) {
    eprintln!(
        "WARNING: step budget of {} exhausted at t = {}; returning the partial trajectory.",
        max_steps, t
    );
}

/// Shared stepping loop; `controller` maps a finished jet to a (positive)
/// step size.
fn drive<T, S>(
    mut rhs: S,
    x0: &[T],
    t0: T::Real,
    tmax: T::Real,
    order: usize,
    max_steps: usize,
    controller: impl Fn(&[TaylorPoly<T>]) -> T::Real,
) -> Solution<T>
where
    T: Coeff,
    S: TaylorRhs<T>,
{
    let dim = x0.len();
    let mut polys: Vec<TaylorPoly<T>> = x0
        .iter()
        .map(|c| TaylorPoly::constant(c.clone(), order))
        .collect();
    let mut ws = JetWorkspace::new(dim, order);

    let mut cur: Vec<T> = x0.to_vec();
    let mut t = t0;
    let mut times = vec![t0];
    let mut states = vec![cur.clone()];
    let mut steps = 0usize;
    let mut status = Status::Complete;
    let forward = tmax >= t0;

    while if forward { t < tmax } else { t > tmax } {
        if steps >= max_steps {
            warn_step_cap(max_steps, t);
            status = Status::MaxStepsReached;
            break;
        }
        seed(&mut polys, &cur);
        if let Err(e) = jet_coeffs(&mut rhs, t, &mut polys, &mut ws) {
            status = Status::Failed(e);
            break;
        }
        let dt = controller(&polys);
        let remaining = if forward { tmax - t } else { t - tmax };
        if dt >= remaining {
            // Land exactly on the endpoint.
            cur = eval_state(&polys, if forward { remaining } else { -remaining });
            t = tmax;
        } else {
            let signed = if forward { dt } else { -dt };
            cur = eval_state(&polys, signed);
            t = t + signed;
        }
        times.push(t);
        states.push(cur.clone());
        steps += 1;
    }

    Solution {
        t: times,
        x: states,
        steps,
        status,
    }
}

/// Integrate `dx/dt = f(t, x)` from `t0` to `tmax` with a fixed expansion
/// order and absolute tolerance, recording every accepted step.
///
/// Invalid input is rejected up front; numeric trouble mid-flight and the
/// step cap are reported through [`Solution::status`].
pub fn integrate<T, S>(
    rhs: S,
    x0: &[T],
    t0: T::Real,
    tmax: T::Real,
    order: usize,
    abs_tol: T::Real,
    max_steps: usize,
) -> Result<Solution<T>, Error>
where
    T: Coeff,
    S: TaylorRhs<T>,
{
    validate(x0, order, &[abs_tol])?;
    Ok(drive(rhs, x0, t0, tmax, order, max_steps, |p| {
        step_size(p, abs_tol)
    }))
}

/// Relative/absolute-tolerance variant of [`integrate`]. The expansion order
/// is chosen from the tolerances and the initial state before the first step.
pub fn integrate_tol<T, S>(
    rhs: S,
    x0: &[T],
    t0: T::Real,
    tmax: T::Real,
    rel_tol: T::Real,
    abs_tol: T::Real,
    max_steps: usize,
) -> Result<Solution<T>, Error>
where
    T: Coeff,
    S: TaylorRhs<T>,
{
    let mut x0_norm = <T::Real as Zero>::zero();
    for c in x0 {
        let n = c.norm();
        if n > x0_norm {
            x0_norm = n;
        }
    }
    let order = dynamic_order(rel_tol, abs_tol, x0_norm);
    validate(x0, order, &[rel_tol, abs_tol])?;
    Ok(drive(rhs, x0, t0, tmax, order, max_steps, |p| {
        step_size_tol(p, rel_tol, abs_tol)
    }))
}

/// Integrate onto a prescribed ascending grid, recording only the states at
/// the grid times. Position 0 of the result is `x0`.
pub fn integrate_grid<T, S>(
    mut rhs: S,
    x0: &[T],
    grid: &[T::Real],
    order: usize,
    abs_tol: T::Real,
    max_steps: usize,
) -> Result<GridSolution<T>, Error>
where
    T: Coeff,
    S: TaylorRhs<T>,
{
    validate(x0, order, &[abs_tol])?;
    for i in 1..grid.len() {
        if grid[i] <= grid[i - 1] {
            return Err(Error::NonMonotonicGrid { index: i });
        }
    }
    if grid.is_empty() {
        return Ok(GridSolution {
            x: Vec::new(),
            steps: 0,
            status: Status::Complete,
        });
    }

    let dim = x0.len();
    let mut polys: Vec<TaylorPoly<T>> = x0
        .iter()
        .map(|c| TaylorPoly::constant(c.clone(), order))
        .collect();
    let mut ws = JetWorkspace::new(dim, order);

    let mut cur: Vec<T> = x0.to_vec();
    let mut t = grid[0];
    let mut states = vec![cur.clone()];
    let mut steps = 0usize;
    let mut status = Status::Complete;

    'outer: for &target in &grid[1..] {
        loop {
            if steps >= max_steps {
                warn_step_cap(max_steps, t);
                status = Status::MaxStepsReached;
                break 'outer;
            }
            seed(&mut polys, &cur);
            if let Err(e) = jet_coeffs(&mut rhs, t, &mut polys, &mut ws) {
                status = Status::Failed(e);
                break 'outer;
            }
            let dt = step_size(&polys, abs_tol);
            steps += 1;
            if t + dt >= target {
                // Clamp so the solution lands exactly on the grid point.
                cur = eval_state(&polys, target - t);
                t = target;
                states.push(cur.clone());
                break;
            }
            cur = eval_state(&polys, dt);
            t = t + dt;
        }
    }

    Ok(GridSolution {
        x: states,
        steps,
        status,
    })
}

/// Scalar (d = 1) convenience wrapper around [`integrate`].
pub fn integrate_scalar<T, F>(
    f: F,
    x0: T,
    t0: T::Real,
    tmax: T::Real,
    order: usize,
    abs_tol: T::Real,
    max_steps: usize,
) -> Result<Solution<T>, Error>
where
    T: Coeff,
    F: FnMut(T::Real, &TaylorPoly<T>) -> TaylorPoly<T>,
{
    integrate(ScalarRhs(f), &[x0], t0, tmax, order, abs_tol, max_steps)
}

/// Scalar (d = 1) convenience wrapper around [`integrate_tol`].
pub fn integrate_scalar_tol<T, F>(
    f: F,
    x0: T,
    t0: T::Real,
    tmax: T::Real,
    rel_tol: T::Real,
    abs_tol: T::Real,
    max_steps: usize,
) -> Result<Solution<T>, Error>
where
    T: Coeff,
    F: FnMut(T::Real, &TaylorPoly<T>) -> TaylorPoly<T>,
{
    integrate_tol(
        ScalarRhs(f),
        &[x0],
        t0,
        tmax,
        rel_tol,
        abs_tol,
        max_steps,
    )
}
