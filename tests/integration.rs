use std::f64::consts::PI;

use approx::assert_relative_eq;
use num_complex::Complex;
use jetstep::{
    integrate, integrate_grid, integrate_scalar, integrate_scalar_tol, Elementary, Error,
    Solution, Status, TaylorPoly, VecRhs, DEFAULT_MAX_STEPS,
};

fn assert_strictly_increasing(times: &[f64]) {
    for w in times.windows(2) {
        assert!(w[1] > w[0], "times not strictly increasing: {} -> {}", w[0], w[1]);
    }
}

// ══════════════════════════════════════════════
//  1. Quadratic scalar: ẋ = 3 - x²  →  √3
// ══════════════════════════════════════════════

#[test]
fn quadratic_scalar_settles_on_sqrt3() {
    let sol = integrate_scalar(
        |_t, x: &TaylorPoly<f64>| 3.0 - x * x,
        1.0,
        0.0,
        1000.0,
        20,
        1e-20,
        DEFAULT_MAX_STEPS,
    )
    .unwrap();
    assert!(sol.status.is_complete());
    assert_eq!(sol.last_time(), 1000.0);
    assert_strictly_increasing(&sol.t);
    assert!((sol.last_state()[0] - 3.0_f64.sqrt()).abs() < 1e-12);
}

// ══════════════════════════════════════════════
//  2. Constant drift: ẋ = -9.81, exact linear solution
// ══════════════════════════════════════════════

#[test]
fn constant_drift_is_exact() {
    let sol = integrate_scalar(
        |_t, _x: &TaylorPoly<f64>| TaylorPoly::constant(-9.81, 0),
        10.0,
        1.0,
        1000.0,
        20,
        1e-20,
        DEFAULT_MAX_STEPS,
    )
    .unwrap();
    assert!(sol.status.is_complete());
    assert_eq!(sol.last_time(), 1000.0);
    for (t, x) in sol.t.iter().zip(sol.x.iter()) {
        let exact = 10.0 - 9.81 * (t - 1.0);
        assert!((x[0] - exact).abs() <= 1e-12, "t = {}: {} vs {}", t, x[0], exact);
    }
}

// ══════════════════════════════════════════════
//  3. Simple pendulum: energy conservation
// ══════════════════════════════════════════════

fn pendulum(_t: f64, x: &[TaylorPoly<f64>], dx: &mut [TaylorPoly<f64>]) {
    dx[0] = x[1].clone();
    dx[1] = -x[0].sin();
}

fn pendulum_energy(x: &[f64]) -> f64 {
    0.5 * x[1] * x[1] - x[0].cos()
}

#[test]
fn pendulum_energy_drift_stays_small() {
    let x0 = [PI - 1e-3, 0.0];
    let sol = integrate(pendulum, &x0, 0.0, 100.0, 20, 1e-20, DEFAULT_MAX_STEPS).unwrap();
    assert!(sol.status.is_complete());
    assert_eq!(sol.last_time(), 100.0);
    assert_strictly_increasing(&sol.t);
    let e0 = pendulum_energy(&x0);
    for state in &sol.x {
        assert!((pendulum_energy(state) - e0).abs() <= 1e-12);
    }
}

// ══════════════════════════════════════════════
//  4. Complex oscillator: ẋ = i·x  →  exp(it)
// ══════════════════════════════════════════════

#[test]
fn complex_oscillator_tracks_unit_circle() {
    let rhs = VecRhs(|_t: f64, x: &[TaylorPoly<Complex<f64>>]| vec![&x[0] * Complex::i()]);
    let sol = integrate(
        rhs,
        &[Complex::new(1.0, 0.0)],
        0.0,
        1000.0,
        20,
        1e-20,
        DEFAULT_MAX_STEPS,
    )
    .unwrap();
    assert!(sol.status.is_complete());
    assert_eq!(sol.last_time(), 1000.0);
    for (t, x) in sol.t.iter().zip(sol.x.iter()) {
        let exact = Complex::new(0.0, *t).exp();
        assert!((x[0] - exact).norm() <= 1e-12, "t = {}", t);
    }
}

// ══════════════════════════════════════════════
//  5. Kepler 2D: energy and angular momentum
// ══════════════════════════════════════════════

fn kepler(_t: f64, x: &[TaylorPoly<f64>], dx: &mut [TaylorPoly<f64>]) {
    let r2 = &x[0] * &x[0] + &x[1] * &x[1];
    let r3 = r2.powf(1.5);
    dx[0] = x[2].clone();
    dx[1] = x[3].clone();
    dx[2] = -(&x[0] / &r3);
    dx[3] = -(&x[1] / &r3);
}

#[test]
fn kepler_conserves_energy_and_angular_momentum() {
    let x0 = [0.2, 0.0, 0.0, 3.0];
    let e0 = 0.5 * (x0[2] * x0[2] + x0[3] * x0[3]) - 1.0 / (x0[0] * x0[0] + x0[1] * x0[1]).sqrt();
    let l0 = x0[0] * x0[3] - x0[1] * x0[2];
    let sol = integrate(kepler, &x0, 0.0, 2000.0 * PI, 28, 1e-20, DEFAULT_MAX_STEPS).unwrap();
    assert!(sol.status.is_complete());
    assert_eq!(sol.last_time(), 2000.0 * PI);
    for state in &sol.x {
        let r = (state[0] * state[0] + state[1] * state[1]).sqrt();
        let e = 0.5 * (state[2] * state[2] + state[3] * state[3]) - 1.0 / r;
        let l = state[0] * state[3] - state[1] * state[2];
        assert!((e - e0).abs() <= 1e-10, "energy drift {}", (e - e0).abs());
        assert!((l - l0).abs() <= 1e-10, "momentum drift {}", (l - l0).abs());
    }
}

// ══════════════════════════════════════════════
//  6. Equivalence of the RHS forms
// ══════════════════════════════════════════════

#[test]
fn functional_and_in_place_forms_are_bit_identical() {
    let x0 = [PI - 1e-3, 0.0];
    let in_place = integrate(pendulum, &x0, 0.0, 20.0, 20, 1e-20, DEFAULT_MAX_STEPS).unwrap();
    let functional = integrate(
        VecRhs(|_t: f64, x: &[TaylorPoly<f64>]| vec![x[1].clone(), -x[0].sin()]),
        &x0,
        0.0,
        20.0,
        20,
        1e-20,
        DEFAULT_MAX_STEPS,
    )
    .unwrap();
    assert_eq!(in_place.t, functional.t);
    assert_eq!(in_place.x, functional.x);
}

// ══════════════════════════════════════════════
//  7. Grid form
// ══════════════════════════════════════════════

#[test]
fn grid_states_match_direct_integration() {
    let x0 = [PI - 1e-3, 0.0];
    let grid = [0.0, 2.5, 5.0, 10.0];
    let g = integrate_grid(pendulum, &x0, &grid, 20, 1e-20, DEFAULT_MAX_STEPS).unwrap();
    assert!(g.status.is_complete());
    assert_eq!(g.x.len(), grid.len());
    assert_eq!(g.x[0], x0.to_vec());

    // Landing on a grid point is the same clamped step the tmax form takes.
    let direct = integrate(pendulum, &x0, 0.0, 2.5, 20, 1e-20, DEFAULT_MAX_STEPS).unwrap();
    assert_eq!(g.x[1], direct.last_state());

    let e0 = pendulum_energy(&x0);
    for state in &g.x {
        assert!((pendulum_energy(state) - e0).abs() <= 1e-12);
    }
}

#[test]
fn grid_times_must_increase() {
    let err = integrate_grid(
        pendulum,
        &[1.0, 0.0],
        &[0.0, 0.0, 1.0],
        20,
        1e-10,
        DEFAULT_MAX_STEPS,
    )
    .unwrap_err();
    assert_eq!(err, Error::NonMonotonicGrid { index: 1 });
}

// ══════════════════════════════════════════════
//  8. Relative-tolerance variant (dynamic order)
// ══════════════════════════════════════════════

#[test]
fn relative_tolerance_variant_converges() {
    let sol = integrate_scalar_tol(
        |_t, x: &TaylorPoly<f64>| 3.0 - x * x,
        1.0,
        0.0,
        100.0,
        1e-9,
        1e-9,
        DEFAULT_MAX_STEPS,
    )
    .unwrap();
    assert!(sol.status.is_complete());
    assert_eq!(sol.last_time(), 100.0);
    assert_strictly_increasing(&sol.t);
    assert!((sol.last_state()[0] - 3.0_f64.sqrt()).abs() < 1e-6);
}

#[test]
fn relative_tolerance_drift_stays_exact() {
    let sol = integrate_scalar_tol(
        |_t, _x: &TaylorPoly<f64>| TaylorPoly::constant(-9.81, 0),
        10.0,
        1.0,
        50.0,
        1e-10,
        1e-10,
        DEFAULT_MAX_STEPS,
    )
    .unwrap();
    assert!(sol.status.is_complete());
    let t = sol.last_time();
    assert_relative_eq!(sol.last_state()[0], 10.0 - 9.81 * (t - 1.0), epsilon = 1e-10);
}

// ══════════════════════════════════════════════
//  9. Budget and failure discipline
// ══════════════════════════════════════════════

#[test]
fn step_cap_returns_partial_trajectory() {
    let sol = integrate(pendulum, &[1.0, 0.0], 0.0, 1000.0, 20, 1e-20, 5).unwrap();
    assert_eq!(sol.status, Status::MaxStepsReached);
    assert_eq!(sol.steps, 5);
    assert_eq!(sol.t.len(), 6);
    assert!(sol.last_time() < 1000.0);
}

#[test]
fn kernel_failure_surfaces_with_partial_trajectory() {
    // 1/x with x(0) = 0 divides by a zero constant term on the first jet.
    let sol = integrate_scalar(
        |_t, x: &TaylorPoly<f64>| 1.0 / x,
        0.0,
        0.0,
        1.0,
        8,
        1e-10,
        100,
    )
    .unwrap();
    assert!(matches!(
        sol.status,
        Status::Failed(Error::NonFiniteCoefficient { .. })
    ));
    assert_eq!(sol.t.len(), 1);
}

#[test]
fn invalid_inputs_are_rejected_up_front() {
    let empty: Result<Solution<f64>, Error> = integrate(
        VecRhs(|_t: f64, _x: &[TaylorPoly<f64>]| Vec::new()),
        &[],
        0.0,
        1.0,
        20,
        1e-10,
        100,
    );
    assert_eq!(empty.unwrap_err(), Error::EmptyState);

    let order = integrate(pendulum, &[1.0, 0.0], 0.0, 1.0, 1, 1e-10, 100);
    assert_eq!(order.unwrap_err(), Error::InvalidOrder(1));

    let tol = integrate(pendulum, &[1.0, 0.0], 0.0, 1.0, 20, -1e-10, 100);
    assert!(matches!(tol.unwrap_err(), Error::InvalidTolerance(_)));
}

// ══════════════════════════════════════════════
//  10. Backward integration
// ══════════════════════════════════════════════

#[test]
fn backward_integration_retraces_the_flow() {
    let forward = integrate(pendulum, &[1.0, 0.0], 0.0, 10.0, 20, 1e-20, DEFAULT_MAX_STEPS).unwrap();
    let back = integrate(
        pendulum,
        forward.last_state(),
        10.0,
        0.0,
        20,
        1e-20,
        DEFAULT_MAX_STEPS,
    )
    .unwrap();
    assert!(back.status.is_complete());
    assert_eq!(back.last_time(), 0.0);
    for w in back.t.windows(2) {
        assert!(w[1] < w[0]);
    }
    assert_relative_eq!(back.last_state()[0], 1.0, epsilon = 1e-11);
    assert_relative_eq!(back.last_state()[1], 0.0, epsilon = 1e-11);
}
