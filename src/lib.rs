//! Adaptive Taylor-series ODE integration.
//!
//! At each step the truncated Taylor expansion of the solution around the
//! current time is built by forward-mode automatic differentiation on
//! univariate polynomials ([`TaylorPoly`]): the right-hand side is evaluated
//! on the partial expansion once per order, and each evaluation yields the
//! next coefficient through `x[k] = ẋ[k-1]/k`. The step size is then chosen
//! from the two tail coefficients so the local truncation error stays below
//! the requested tolerance, and the polynomial itself is the dense local
//! solution.
//!
//! The coefficient type is generic: `f64`, `Complex<f64>`, nested
//! polynomials and [`Tangent`] values (for the variational equations) all
//! flow through the same kernel; see [`Coeff`] and [`Elementary`].
//!
//! ```
//! use jetstep::{integrate_scalar, TaylorPoly, DEFAULT_MAX_STEPS};
//!
//! // dx/dt = -x, x(0) = 1: the solution is exp(-t).
//! let sol = integrate_scalar(
//!     |_t, x: &TaylorPoly<f64>| -x,
//!     1.0,
//!     0.0,
//!     1.0,
//!     20,
//!     1e-16,
//!     DEFAULT_MAX_STEPS,
//! )
//! .unwrap();
//! assert!(sol.status.is_complete());
//! assert_eq!(sol.last_time(), 1.0);
//! assert!((sol.last_state()[0] - (-1.0_f64).exp()).abs() < 1e-12);
//! ```

pub mod error;
pub mod float;
pub mod gram_schmidt;
pub mod integrate;
pub mod jet;
pub mod lyapunov;
pub mod ode;
pub mod ops;
pub mod poly;
pub mod scalar;
pub mod step;
pub mod tangent;
mod traits;

pub use error::{Error, Status};
pub use float::Real;
pub use gram_schmidt::{classical_gram_schmidt, modified_gram_schmidt};
pub use integrate::{
    integrate, integrate_grid, integrate_scalar, integrate_scalar_tol, integrate_tol,
    GridSolution, Solution, DEFAULT_MAX_STEPS,
};
pub use jet::{jet_coeffs, JetWorkspace};
pub use lyapunov::{lyapunov, lyapunov_default, lyapunov_directed, LyapunovSolution};
pub use ode::{ScalarRhs, TaylorRhs, VecRhs};
pub use poly::{eval_state, TaylorPoly};
pub use scalar::{Coeff, Elementary};
pub use step::{dynamic_order, step_size, step_size_tol};
pub use tangent::Tangent;

/// Type alias for polynomials over `f64`.
pub type Poly64 = TaylorPoly<f64>;
/// Type alias for polynomials over `f32`.
pub type Poly32 = TaylorPoly<f32>;
/// Type alias for polynomials over `Complex<f64>`.
pub type PolyC64 = TaylorPoly<num_complex::Complex<f64>>;
/// Type alias for polynomials over `Complex<f32>`.
pub type PolyC32 = TaylorPoly<num_complex::Complex<f32>>;
