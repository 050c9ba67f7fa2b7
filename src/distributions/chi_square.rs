//! # Chi-Squared
//!
//! $$
//! X\sim\chi^2_k,\quad f_X(x)=\frac{x^{k/2-1}e^{-x/2}}{2^{k/2}\Gamma(k/2)},\qquad \chi^2_k=\Gamma\!\left(\tfrac{k}{2},\ \beta=\tfrac{1}{2}\right)
//! $$
//!
use anyhow::Result;
use ndarray::Array1;
use ndarray::Array2;
use rand::Rng;
use rand_distr::Distribution;
use tracing::debug;

use super::gamma::Gamma;
use crate::traits::DistributionExt;
use crate::traits::FloatExt;
use crate::traits::IntoParam;

/// Chi-squared distribution with `df` degrees of freedom.
///
/// A reparameterization of [`Gamma`]: `Chi2(df) = Gamma(df / 2, rate = 1/2)`.
/// The derived parameters are computed once at construction; every
/// distribution operation is forwarded to the owned Gamma, so no numerical
/// logic lives here.
pub struct Chi2<T: FloatExt> {
  df: Array1<T>,
  gamma: Gamma<T>,
}

impl<T: FloatExt> Chi2<T> {
  /// Strict-mode constructor with the default "Chi2" label.
  pub fn new(df: impl IntoParam<T>) -> Result<Self> {
    Self::with_options(df, true, "Chi2")
  }

  /// Constructs the distribution from `df` degrees of freedom.
  ///
  /// `df` is converted once and stored unmodified. The owned Gamma is
  /// parameterized with `shape = df / 2` (elementwise, keeping `df`'s batch
  /// shape) and the scalar rate `1/2` in `df`'s element type, which the
  /// parent broadcasts. Validating `df > 0` (when `strict` is set) is the
  /// parent's job, performed on the derived shape; nothing is checked here.
  pub fn with_options(
    df: impl IntoParam<T>,
    strict: bool,
    name: impl Into<String>,
  ) -> Result<Self> {
    let df = df.into_param();
    let name = name.into();
    debug!(name = %name, batch = df.len(), "deriving gamma parameters");

    let shape = &df / T::from_f64_fast(2.0);
    let rate = T::from_f64_fast(0.5);
    let gamma = Gamma::with_options(shape, rate, strict, name)?;

    Ok(Self { df, gamma })
  }

  /// Degrees of freedom, as converted at construction.
  pub fn df(&self) -> &Array1<T> {
    &self.df
  }

  /// The owned parent distribution carrying the derived parameters.
  pub fn gamma(&self) -> &Gamma<T> {
    &self.gamma
  }

  pub fn strict(&self) -> bool {
    self.gamma.strict()
  }

  pub fn name(&self) -> &str {
    self.gamma.name()
  }
}

impl<T: FloatExt> DistributionExt<T> for Chi2<T> {
  fn batch_len(&self) -> usize {
    self.gamma.batch_len()
  }

  fn pdf(&self, x: impl IntoParam<T>) -> Result<Array1<T>> {
    self.gamma.pdf(x)
  }

  fn ln_pdf(&self, x: impl IntoParam<T>) -> Result<Array1<T>> {
    self.gamma.ln_pdf(x)
  }

  fn cdf(&self, x: impl IntoParam<T>) -> Result<Array1<T>> {
    self.gamma.cdf(x)
  }

  fn sample_n<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array2<T> {
    self.gamma.sample_n(n, rng)
  }

  fn mean(&self) -> Array1<T> {
    self.gamma.mean()
  }

  fn variance(&self) -> Array1<T> {
    self.gamma.variance()
  }

  fn entropy(&self) -> Array1<T> {
    self.gamma.entropy()
  }

  fn mode(&self) -> Array1<T> {
    self.gamma.mode()
  }
}

impl<T: FloatExt> Distribution<Array1<T>> for Chi2<T> {
  /// One draw per batch element.
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Array1<T> {
    self.gamma.sample(rng)
  }
}
