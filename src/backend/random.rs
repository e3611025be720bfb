//! Gaussian sampling for parameter initialization.

use super::Matrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal, NormalError, StandardNormal};

/// Fills a `(rows, cols)` matrix with independent draws from `N(mean, std²)`.
///
/// The caller owns the generator, so seeding it makes the draw reproducible.
///
/// # Errors
/// Returns [`NormalError`] if `std` is negative or not finite.
pub fn random_normal<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    mean: f64,
    std: f64,
    rng: &mut R,
) -> Result<Matrix, NormalError> {
    let dist = Normal::new(mean, std)?;
    let mut out = Matrix::zeros(rows, cols);
    for i in 0..rows {
        for j in 0..cols {
            out.set(i, j, dist.sample(rng));
        }
    }
    Ok(out)
}

/// Same as [`random_normal`] with a fresh [`StdRng`] seeded from `seed`.
pub fn random_normal_seeded(
    rows: usize,
    cols: usize,
    mean: f64,
    std: f64,
    seed: u64,
) -> Result<Matrix, NormalError> {
    let mut rng = StdRng::seed_from_u64(seed);
    random_normal(rows, cols, mean, std, &mut rng)
}

/// Same as [`random_normal`] with a [`StdRng`] seeded from OS entropy.
pub fn random_normal_from_entropy(
    rows: usize,
    cols: usize,
    mean: f64,
    std: f64,
) -> Result<Matrix, NormalError> {
    let mut rng = StdRng::from_entropy();
    random_normal(rows, cols, mean, std, &mut rng)
}

/// Draws from `N(0, 1)`. Infallible counterpart of `random_normal(.., 0.0, 1.0, rng)`.
pub fn standard_normal<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
    let mut out = Matrix::zeros(rows, cols);
    for i in 0..rows {
        for j in 0..cols {
            out.set(i, j, StandardNormal.sample(rng));
        }
    }
    out
}
