//! # Gamma
//!
//! $$
//! X\sim\Gamma(\alpha,\beta),\quad f_X(x)=\frac{\beta^\alpha}{\Gamma(\alpha)}x^{\alpha-1}e^{-\beta x},\quad x>0
//! $$
//!
use anyhow::ensure;
use anyhow::Result;
use ndarray::Array1;
use ndarray::Array2;
use rand::Rng;
use rand_distr::Distribution;
use tracing::debug;

use crate::distributions::broadcast_len;
use crate::traits::DistributionExt;
use crate::traits::FloatExt;
use crate::traits::IntoParam;

/// Gamma distribution parameterized by `shape` and `rate` (inverse scale).
///
/// Parameters are batched: `shape` and `rate` must have equal lengths, or
/// either may hold a single element which is broadcast against the other at
/// evaluation time. Parameters are stored as given and never rescaled.
pub struct Gamma<T: FloatExt> {
  shape: Array1<T>,
  rate: Array1<T>,
  strict: bool,
  name: String,
}

/// Elementwise access with length-1 broadcast.
fn at<T: FloatExt>(arr: &Array1<T>, i: usize) -> T {
  if arr.len() == 1 {
    arr[0]
  } else {
    arr[i]
  }
}

/// One Marsaglia-Tsang draw from Gamma(alpha, rate).
///
/// The `alpha < 1` case boosts through Gamma(alpha + 1) and scales back by
/// `u^(1/alpha)`. Invalid parameters yield NaN instead of looping.
fn sample_one<T: FloatExt, R: Rng + ?Sized>(alpha: T, rate: T, rng: &mut R) -> T {
  if !(alpha > T::zero() && alpha.is_finite()) || !(rate > T::zero() && rate.is_finite()) {
    return T::nan();
  }
  if alpha < T::one() {
    let g = sample_one(alpha + T::one(), rate, rng);
    let u = T::sample_uniform(rng);
    return g * u.powf(T::one() / alpha);
  }
  let d = alpha - T::from_f64_fast(1.0 / 3.0);
  let c = T::one() / (T::from_f64_fast(9.0) * d).sqrt();
  loop {
    let z = T::sample_std_normal(rng);
    let v = (T::one() + c * z).powi(3);
    if v <= T::zero() {
      continue;
    }
    let u = T::sample_uniform(rng);
    let z2 = z * z;
    if u < T::one() - T::from_f64_fast(0.0331) * z2 * z2 {
      break d * v / rate;
    }
    if u.ln() < T::from_f64_fast(0.5) * z2 + d * (T::one() - v + v.ln()) {
      break d * v / rate;
    }
  }
}

impl<T: FloatExt> Gamma<T> {
  /// Strict-mode constructor with the default "Gamma" label.
  pub fn new(shape: impl IntoParam<T>, rate: impl IntoParam<T>) -> Result<Self> {
    Self::with_options(shape, rate, true, "Gamma")
  }

  /// Constructs the distribution with an explicit validation mode and
  /// diagnostic label.
  ///
  /// With `strict` set, every element of `shape` and `rate` must be finite
  /// and strictly positive, and density-style methods reject sample points
  /// `x <= 0`. Without it no value checks run and invalid inputs produce
  /// undefined results (NaN) instead of errors. Batch-length compatibility
  /// is enforced in both modes.
  pub fn with_options(
    shape: impl IntoParam<T>,
    rate: impl IntoParam<T>,
    strict: bool,
    name: impl Into<String>,
  ) -> Result<Self> {
    let shape = shape.into_param();
    let rate = rate.into_param();
    let name = name.into();

    ensure!(!shape.is_empty(), "shape must not be empty");
    ensure!(!rate.is_empty(), "rate must not be empty");
    let batch = broadcast_len(shape.len(), rate.len())?;

    if strict {
      for (i, &a) in shape.iter().enumerate() {
        ensure!(
          a.is_finite() && a > T::zero(),
          "shape must contain only positive finite values, got {a} at index {i}"
        );
      }
      for (i, &b) in rate.iter().enumerate() {
        ensure!(
          b.is_finite() && b > T::zero(),
          "rate must contain only positive finite values, got {b} at index {i}"
        );
      }
    }

    debug!(name = %name, batch, strict, "constructed gamma distribution");

    Ok(Self {
      shape,
      rate,
      strict,
      name,
    })
  }

  pub fn shape(&self) -> &Array1<T> {
    &self.shape
  }

  pub fn rate(&self) -> &Array1<T> {
    &self.rate
  }

  pub fn strict(&self) -> bool {
    self.strict
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  fn check_support(&self, x: &Array1<T>) -> Result<()> {
    if !self.strict {
      return Ok(());
    }
    for (i, &v) in x.iter().enumerate() {
      ensure!(
        v > T::zero(),
        "x must contain only positive values, got {v} at index {i}"
      );
    }
    Ok(())
  }

  fn eval<F: Fn(T, T, T) -> T>(&self, x: &Array1<T>, f: F) -> Result<Array1<T>> {
    let out_len = broadcast_len(self.batch_len(), x.len())?;
    Ok(Array1::from_shape_fn(out_len, |i| {
      f(at(&self.shape, i), at(&self.rate, i), at(x, i))
    }))
  }

  fn per_batch<F: Fn(T, T) -> T>(&self, f: F) -> Array1<T> {
    Array1::from_shape_fn(self.batch_len(), |i| {
      f(at(&self.shape, i), at(&self.rate, i))
    })
  }

  fn draw_batch<R: Rng + ?Sized>(&self, rng: &mut R) -> Array1<T> {
    Array1::from_shape_fn(self.batch_len(), |i| {
      sample_one(at(&self.shape, i), at(&self.rate, i), rng)
    })
  }
}

impl<T: FloatExt> DistributionExt<T> for Gamma<T> {
  fn batch_len(&self) -> usize {
    self.shape.len().max(self.rate.len())
  }

  fn pdf(&self, x: impl IntoParam<T>) -> Result<Array1<T>> {
    Ok(self.ln_pdf(x)?.mapv(T::exp))
  }

  fn ln_pdf(&self, x: impl IntoParam<T>) -> Result<Array1<T>> {
    let x = x.into_param();
    self.check_support(&x)?;
    self.eval(&x, |a, b, xi| {
      a * b.ln() - a.ln_gamma() + (a - T::one()) * xi.ln() - b * xi
    })
  }

  fn cdf(&self, x: impl IntoParam<T>) -> Result<Array1<T>> {
    let x = x.into_param();
    self.check_support(&x)?;
    self.eval(&x, |a, b, xi| T::gamma_p(a, b * xi))
  }

  fn sample_n<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array2<T> {
    let batch = self.batch_len();
    let mut out = Array2::zeros((n, batch));
    for mut row in out.rows_mut() {
      for i in 0..batch {
        row[i] = sample_one(at(&self.shape, i), at(&self.rate, i), rng);
      }
    }
    out
  }

  fn mean(&self) -> Array1<T> {
    self.per_batch(|a, b| a / b)
  }

  fn variance(&self) -> Array1<T> {
    self.per_batch(|a, b| a / (b * b))
  }

  fn entropy(&self) -> Array1<T> {
    self.per_batch(|a, b| a - b.ln() + a.ln_gamma() + (T::one() - a) * a.digamma())
  }

  fn mode(&self) -> Array1<T> {
    self.per_batch(|a, b| {
      if a >= T::one() {
        (a - T::one()) / b
      } else {
        T::nan()
      }
    })
  }
}

impl<T: FloatExt> Distribution<Array1<T>> for Gamma<T> {
  /// One draw per batch element.
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Array1<T> {
    self.draw_batch(rng)
  }
}
