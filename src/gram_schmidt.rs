//! Gram–Schmidt orthonormalization of the variational block.
//!
//! Both variants factor a row-major `rows × cols` matrix (`cols ≤ rows`) as
//! Q·R in place: on return the buffer holds the orthonormal Q and
//! `log_diag[j] = ln|R_jj|`, which is exactly what the Lyapunov driver
//! accumulates. The modified variant orthogonalizes against the updated
//! column and is the numerically stable one the driver uses; the classical
//! variant projects against the original column.

use num_traits::{Float, Zero};

use crate::error::Error;
use crate::float::Real;

/// Modified Gram–Schmidt: Q replaces the matrix, `log_diag` receives
/// `ln|R_jj|`. Fails with [`Error::SingularPhi`] on a near-singular column.
pub fn modified_gram_schmidt<R: Real>(
    a: &mut [R],
    rows: usize,
    cols: usize,
    log_diag: &mut [R],
) -> Result<(), Error> {
    debug_assert_eq!(a.len(), rows * cols);
    debug_assert_eq!(log_diag.len(), cols);
    for j in 0..cols {
        for i in 0..j {
            let mut dot = R::zero();
            for r in 0..rows {
                dot = dot + a[r * cols + i] * a[r * cols + j];
            }
            for r in 0..rows {
                let qi = a[r * cols + i];
                a[r * cols + j] = a[r * cols + j] - dot * qi;
            }
        }
        normalize_column(a, rows, cols, j, log_diag)?;
    }
    Ok(())
}

/// Classical Gram–Schmidt: all projections are taken against the original
/// j-th column. Same output contract as [`modified_gram_schmidt`].
pub fn classical_gram_schmidt<R: Real>(
    a: &mut [R],
    rows: usize,
    cols: usize,
    log_diag: &mut [R],
) -> Result<(), Error> {
    debug_assert_eq!(a.len(), rows * cols);
    debug_assert_eq!(log_diag.len(), cols);
    let mut dots = vec![R::zero(); cols];
    for j in 0..cols {
        for (i, dot) in dots.iter_mut().enumerate().take(j) {
            *dot = R::zero();
            for r in 0..rows {
                *dot = *dot + a[r * cols + i] * a[r * cols + j];
            }
        }
        for i in 0..j {
            for r in 0..rows {
                let qi = a[r * cols + i];
                a[r * cols + j] = a[r * cols + j] - dots[i] * qi;
            }
        }
        normalize_column(a, rows, cols, j, log_diag)?;
    }
    Ok(())
}

fn normalize_column<R: Real>(
    a: &mut [R],
    rows: usize,
    cols: usize,
    j: usize,
    log_diag: &mut [R],
) -> Result<(), Error> {
    let mut nrm2 = R::zero();
    for r in 0..rows {
        let v = a[r * cols + j];
        nrm2 = nrm2 + v * v;
    }
    let nrm = nrm2.sqrt();
    if nrm <= R::epsilon() {
        return Err(Error::SingularPhi { column: j });
    }
    log_diag[j] = nrm.ln();
    for r in 0..rows {
        a[r * cols + j] = a[r * cols + j] / nrm;
    }
    Ok(())
}
