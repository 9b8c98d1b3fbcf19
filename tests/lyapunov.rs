use approx::assert_relative_eq;
use jetstep::{
    classical_gram_schmidt, integrate, lyapunov, lyapunov_directed, modified_gram_schmidt,
    Elementary, Error, TaylorPoly, Tangent, DEFAULT_MAX_STEPS,
};

// ══════════════════════════════════════════════
//  1. Tangent chain rule
// ══════════════════════════════════════════════

#[test]
fn tangent_exp_chain_rule() {
    let x = Tangent::variable(0.5_f64, 0, 2);
    let y = x.exp();
    assert_relative_eq!(y.val, 0.5_f64.exp(), epsilon = 1e-12);
    assert_relative_eq!(y.grad_coeff(0), 0.5_f64.exp(), epsilon = 1e-12);
    assert_relative_eq!(y.grad_coeff(1), 0.0, epsilon = 1e-12);
}

#[test]
fn tangent_product_and_quotient_rules() {
    let a = Tangent::variable(2.0_f64, 0, 2);
    let b = Tangent::variable(3.0_f64, 1, 2);
    let prod = &a * &b;
    assert_relative_eq!(prod.val, 6.0, epsilon = 1e-12);
    assert_relative_eq!(prod.grad_coeff(0), 3.0, epsilon = 1e-12);
    assert_relative_eq!(prod.grad_coeff(1), 2.0, epsilon = 1e-12);

    let quot = &a / &b;
    assert_relative_eq!(quot.val, 2.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(quot.grad_coeff(0), 1.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(quot.grad_coeff(1), -2.0 / 9.0, epsilon = 1e-12);
}

#[test]
fn tangent_trig_chain_rule() {
    let x = Tangent::variable(0.7_f64, 0, 1);
    let (s, c) = x.sin_cos();
    assert_relative_eq!(s.val, 0.7_f64.sin(), epsilon = 1e-12);
    assert_relative_eq!(s.grad_coeff(0), 0.7_f64.cos(), epsilon = 1e-12);
    assert_relative_eq!(c.grad_coeff(0), -0.7_f64.sin(), epsilon = 1e-12);
}

// ══════════════════════════════════════════════
//  2. Two-level nesting: polynomials over tangents
// ══════════════════════════════════════════════

#[test]
fn nested_tangent_polynomial_exp() {
    // x(t) = (1 + ε) + t; exp(x) carries e both in the t-direction and the
    // ε-direction.
    let seed = Tangent::variable(1.0_f64, 0, 1);
    let x = TaylorPoly::variable(seed, 3);
    let y = x.exp();
    let e = 1.0_f64.exp();
    assert_relative_eq!(y.coeff(0).val, e, epsilon = 1e-12);
    assert_relative_eq!(y.coeff(0).grad_coeff(0), e, epsilon = 1e-12);
    assert_relative_eq!(y.coeff(1).val, e, epsilon = 1e-12);
    assert_relative_eq!(y.coeff(1).grad_coeff(0), e, epsilon = 1e-12);
}

// ══════════════════════════════════════════════
//  3. Gram–Schmidt against a reference QR
// ══════════════════════════════════════════════

const GS_TEST_MATRIX: [f64; 9] = [2.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.5, 0.2, 1.5];

fn column_dot(a: &[f64], rows: usize, cols: usize, i: usize, j: usize) -> f64 {
    (0..rows).map(|r| a[r * cols + i] * a[r * cols + j]).sum()
}

#[test]
fn modified_gram_schmidt_matches_nalgebra_qr() {
    let mut a = GS_TEST_MATRIX;
    let mut logs = [0.0; 3];
    modified_gram_schmidt(&mut a, 3, 3, &mut logs).unwrap();

    // Columns are orthonormal.
    for i in 0..3 {
        for j in 0..3 {
            let expect = if i == j { 1.0 } else { 0.0 };
            assert_relative_eq!(column_dot(&a, 3, 3, i, j), expect, epsilon = 1e-12);
        }
    }

    // R diagonal agrees with nalgebra's QR up to sign.
    let m = nalgebra::Matrix3::from_row_slice(&GS_TEST_MATRIX);
    let (q, r) = nalgebra::linalg::QR::new(m).unpack();
    for j in 0..3 {
        assert_relative_eq!(logs[j], r[(j, j)].abs().ln(), epsilon = 1e-10);
        for i in 0..3 {
            assert_relative_eq!(a[i * 3 + j].abs(), q[(i, j)].abs(), epsilon = 1e-10);
        }
    }
}

#[test]
fn classical_and_modified_agree_when_well_conditioned() {
    let mut mgs = GS_TEST_MATRIX;
    let mut cgs = GS_TEST_MATRIX;
    let mut logs_m = [0.0; 3];
    let mut logs_c = [0.0; 3];
    modified_gram_schmidt(&mut mgs, 3, 3, &mut logs_m).unwrap();
    classical_gram_schmidt(&mut cgs, 3, 3, &mut logs_c).unwrap();
    for j in 0..3 {
        assert_relative_eq!(logs_m[j], logs_c[j], epsilon = 1e-10);
    }
    for (x, y) in mgs.iter().zip(cgs.iter()) {
        assert_relative_eq!(x, y, epsilon = 1e-10);
    }
}

#[test]
fn gram_schmidt_rejects_singular_blocks() {
    // Second column vanishes.
    let mut a = [1.0, 0.0, 0.0, 2.0, 0.0, 0.0, 3.0, 0.0, 1.0];
    let mut logs = [0.0; 3];
    let err = modified_gram_schmidt(&mut a, 3, 3, &mut logs).unwrap_err();
    assert_eq!(err, Error::SingularPhi { column: 1 });
}

// ══════════════════════════════════════════════
//  4. Lyapunov runs
// ══════════════════════════════════════════════

fn oscillator<T: Elementary>(_t: T::Real, x: &[TaylorPoly<T>], dx: &mut [TaylorPoly<T>]) {
    dx[0] = x[1].clone();
    dx[1] = -&x[0];
}

fn pendulum<T: Elementary>(_t: T::Real, x: &[TaylorPoly<T>], dx: &mut [TaylorPoly<T>]) {
    dx[0] = x[1].clone();
    dx[1] = -x[0].sin();
}

#[test]
fn harmonic_oscillator_has_zero_spectrum() {
    let sol = lyapunov(
        oscillator::<Tangent<f64>>,
        &[1.0, 0.0],
        0.0,
        50.0,
        18,
        1e-15,
        DEFAULT_MAX_STEPS,
    )
    .unwrap();
    assert!(sol.status.is_complete());
    assert_eq!(sol.t.len(), sol.lyap.len());
    let last = sol.lyap.last().unwrap();
    assert_eq!(last.len(), 2);
    for lam in last {
        assert!(lam.abs() < 1e-8, "λ = {}", lam);
    }
    // The flow Jacobian of the oscillator is a rotation; the physical
    // trajectory is cos t.
    for (t, x) in sol.t.iter().zip(sol.x.iter()) {
        assert!((x[0] - t.cos()).abs() < 1e-10);
    }
}

#[test]
fn hamiltonian_spectrum_sums_to_zero() {
    // Volume preservation: Σλ_i approaches the (zero) divergence of f, with
    // the accumulated log-determinant staying bounded, a 1/t residual.
    let sol = lyapunov(
        pendulum::<Tangent<f64>>,
        &[2.0, 0.0],
        0.0,
        100.0,
        20,
        1e-15,
        DEFAULT_MAX_STEPS,
    )
    .unwrap();
    assert!(sol.status.is_complete());
    for (i, (t, lam)) in sol.t.iter().zip(sol.lyap.iter()).enumerate().skip(1) {
        let sum: f64 = lam.iter().sum();
        assert!(
            (sum * (t - sol.t[0])).abs() < 1e-8,
            "sample {}: Σλ·t = {}",
            i,
            sum * t
        );
    }
}

#[test]
fn lyapunov_trajectory_matches_plain_integration() {
    let var = lyapunov(
        pendulum::<Tangent<f64>>,
        &[2.0, 0.0],
        0.0,
        10.0,
        20,
        1e-15,
        DEFAULT_MAX_STEPS,
    )
    .unwrap();
    let plain = integrate(
        pendulum::<f64>,
        &[2.0, 0.0],
        0.0,
        10.0,
        20,
        1e-15,
        DEFAULT_MAX_STEPS,
    )
    .unwrap();
    assert_relative_eq!(
        var.x.last().unwrap()[0],
        plain.last_state()[0],
        epsilon = 1e-10
    );
    assert_relative_eq!(
        var.x.last().unwrap()[1],
        plain.last_state()[1],
        epsilon = 1e-10
    );
}

#[test]
fn directed_run_carries_one_exponent_per_direction() {
    let sol = lyapunov_directed(
        oscillator::<Tangent<f64>>,
        &[1.0, 0.0],
        0.0,
        10.0,
        18,
        1e-12,
        DEFAULT_MAX_STEPS,
        &[0],
    )
    .unwrap();
    assert!(sol.status.is_complete());
    assert_eq!(sol.lyap.last().unwrap().len(), 1);
    assert!(sol.lyap.last().unwrap()[0].abs() < 1e-6);
}

#[test]
fn directed_run_validates_indices() {
    let err = lyapunov_directed(
        oscillator::<Tangent<f64>>,
        &[1.0, 0.0],
        0.0,
        1.0,
        18,
        1e-12,
        DEFAULT_MAX_STEPS,
        &[5],
    )
    .unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { .. }));
}
