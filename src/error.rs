//! Errors and completion statuses for the integration drivers.

use std::fmt;

/// Errors from the polynomial kernel and the integration drivers.
///
/// Invalid-input variants are returned immediately by the drivers; numeric
/// variants surface from a step and are attached to the partial trajectory
/// through [`Status::Failed`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Error {
    /// The initial state has no coordinates.
    EmptyState,
    /// The expansion order is below 2 (the step controller inspects the two
    /// tail orders).
    InvalidOrder(usize),
    /// A tolerance is zero, negative or non-finite.
    InvalidTolerance(f64),
    /// Grid times must be strictly increasing; `index` is the first offender.
    NonMonotonicGrid { index: usize },
    /// State polynomials must share one degree bound.
    OrderMismatch { expected: usize, found: usize },
    /// The right-hand side produced a state of the wrong dimension.
    DimensionMismatch { expected: usize, found: usize },
    /// Division by a polynomial with zero constant term.
    DivByZero,
    /// An elementary recurrence was evaluated outside its domain.
    DomainError(&'static str),
    /// A jet coefficient came out non-finite (NaN or infinite) at the given
    /// expansion order, the usual symptom of a kernel domain failure inside
    /// the right-hand side.
    NonFiniteCoefficient { order: usize },
    /// Gram–Schmidt hit a near-singular column of the variational block.
    SingularPhi { column: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyState => write!(f, "initial state must have at least one coordinate"),
            Error::InvalidOrder(n) => {
                write!(f, "expansion order must be at least 2 (got {})", n)
            }
            Error::InvalidTolerance(v) => {
                write!(f, "tolerance must be positive and finite (got {})", v)
            }
            Error::NonMonotonicGrid { index } => {
                write!(f, "grid times must be strictly increasing (at index {})", index)
            }
            Error::OrderMismatch { expected, found } => write!(
                f,
                "state polynomials must share one order (expected {}, found {})",
                expected, found
            ),
            Error::DimensionMismatch { expected, found } => write!(
                f,
                "right-hand side dimension mismatch (expected {}, found {})",
                expected, found
            ),
            Error::DivByZero => {
                write!(f, "division by a polynomial with zero constant term")
            }
            Error::DomainError(what) => write!(f, "domain error: {}", what),
            Error::NonFiniteCoefficient { order } => {
                write!(f, "non-finite Taylor coefficient at order {}", order)
            }
            Error::SingularPhi { column } => write!(
                f,
                "near-singular variational block during reorthonormalization (column {})",
                column
            ),
        }
    }
}

impl std::error::Error for Error {}

/// How an integration call ended.
///
/// Hitting the step cap and mid-flight numeric failures are not fatal: the
/// drivers return the trajectory computed so far with the status recording
/// what happened.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Status {
    /// Reached the requested final time (or the last grid point).
    Complete,
    /// The step cap was exhausted first; the trajectory is partial.
    MaxStepsReached,
    /// A step failed numerically; the trajectory stops before the failure.
    Failed(Error),
}

impl Status {
    /// Whether the run covered the full requested span.
    #[inline]
    pub fn is_complete(&self) -> bool {
        matches!(self, Status::Complete)
    }
}
