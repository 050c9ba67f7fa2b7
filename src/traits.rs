//! # Traits
//!
//! $$
//! \text{Trait contracts: }\mathcal{D}:\text{parameters}\to\text{densities/samples/moments}
//! $$
//!
use std::fmt::Debug;
use std::fmt::Display;

use anyhow::Result;
use ndarray::Array1;
use ndarray::Array2;
use ndarray::ScalarOperand;
use rand::Rng;
use rand_distr::StandardNormal;
use statrs::function::gamma::digamma;
use statrs::function::gamma::gamma_lr;
use statrs::function::gamma::ln_gamma;

/// Float element type of a distribution: `f32` or `f64`.
///
/// Bundles the numeric bounds the distributions need with the special
/// functions and RNG draws that are only available on `f64`, so that
/// batched distributions stay generic over the element type.
pub trait FloatExt:
  num_traits::Float
  + num_traits::FromPrimitive
  + num_traits::FloatConst
  + ScalarOperand
  + IntoParam<Self>
  + Default
  + Debug
  + Display
  + Send
  + Sync
  + 'static
{
  /// Lossy conversion from `f64`, for algorithm constants.
  fn from_f64_fast(v: f64) -> Self;

  /// Natural logarithm of the gamma function.
  fn ln_gamma(self) -> Self;

  /// Digamma function.
  fn digamma(self) -> Self;

  /// Regularized lower incomplete gamma function `P(a, x)`.
  ///
  /// Returns NaN for non-positive or non-finite `a` and for negative `x`,
  /// 0 at `x == 0` and 1 at `x == +inf`.
  fn gamma_p(a: Self, x: Self) -> Self;

  /// One standard normal draw.
  fn sample_std_normal<R: Rng + ?Sized>(rng: &mut R) -> Self;

  /// One uniform draw in `[0, 1)`.
  fn sample_uniform<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

fn gamma_p_checked(a: f64, x: f64) -> f64 {
  if !a.is_finite() || a <= 0.0 || x.is_nan() || x < 0.0 {
    return f64::NAN;
  }
  if x == 0.0 {
    return 0.0;
  }
  if x.is_infinite() {
    return 1.0;
  }
  gamma_lr(a, x)
}

impl FloatExt for f32 {
  fn from_f64_fast(v: f64) -> Self {
    v as f32
  }

  fn ln_gamma(self) -> Self {
    ln_gamma(self as f64) as f32
  }

  fn digamma(self) -> Self {
    digamma(self as f64) as f32
  }

  fn gamma_p(a: Self, x: Self) -> Self {
    gamma_p_checked(a as f64, x as f64) as f32
  }

  fn sample_std_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
    rng.sample::<f32, _>(StandardNormal)
  }

  fn sample_uniform<R: Rng + ?Sized>(rng: &mut R) -> Self {
    rng.gen_range(0.0f32..1.0)
  }
}

impl FloatExt for f64 {
  fn from_f64_fast(v: f64) -> Self {
    v
  }

  fn ln_gamma(self) -> Self {
    ln_gamma(self)
  }

  fn digamma(self) -> Self {
    digamma(self)
  }

  fn gamma_p(a: Self, x: Self) -> Self {
    gamma_p_checked(a, x)
  }

  fn sample_std_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
    rng.sample::<f64, _>(StandardNormal)
  }

  fn sample_uniform<R: Rng + ?Sized>(rng: &mut R) -> Self {
    rng.gen_range(0.0f64..1.0)
  }
}

/// Conversion of constructor and evaluation inputs into the batched
/// parameter representation. Scalars become a length-1 batch.
pub trait IntoParam<T> {
  fn into_param(self) -> Array1<T>;
}

impl IntoParam<f32> for f32 {
  fn into_param(self) -> Array1<f32> {
    Array1::from_elem(1, self)
  }
}

impl IntoParam<f64> for f64 {
  fn into_param(self) -> Array1<f64> {
    Array1::from_elem(1, self)
  }
}

impl<T: FloatExt> IntoParam<T> for Array1<T> {
  fn into_param(self) -> Array1<T> {
    self
  }
}

impl<'a, T: FloatExt> IntoParam<T> for &'a Array1<T> {
  fn into_param(self) -> Array1<T> {
    self.clone()
  }
}

impl<T: FloatExt> IntoParam<T> for Vec<T> {
  fn into_param(self) -> Array1<T> {
    Array1::from_vec(self)
  }
}

impl<'a, T: FloatExt> IntoParam<T> for &'a [T] {
  fn into_param(self) -> Array1<T> {
    Array1::from_vec(self.to_vec())
  }
}

/// Common capability set of a continuous distribution with batched
/// parameters.
///
/// Density-style methods take sample points through [`IntoParam`] and
/// evaluate elementwise against the parameter batch (equal lengths, or
/// either side length 1). In strict mode they reject out-of-support points
/// with an error; in non-strict mode they evaluate the raw formulas and
/// yield undefined (NaN) values instead.
pub trait DistributionExt<T: FloatExt> {
  /// Number of parameterizations held by this instance.
  fn batch_len(&self) -> usize;

  /// Probability density at `x`, elementwise.
  fn pdf(&self, x: impl IntoParam<T>) -> Result<Array1<T>>;

  /// Log-density at `x`, elementwise.
  fn ln_pdf(&self, x: impl IntoParam<T>) -> Result<Array1<T>>;

  /// Cumulative distribution function at `x`, elementwise.
  fn cdf(&self, x: impl IntoParam<T>) -> Result<Array1<T>>;

  /// Log of the cumulative distribution function at `x`, elementwise.
  fn ln_cdf(&self, x: impl IntoParam<T>) -> Result<Array1<T>> {
    Ok(self.cdf(x)?.mapv(T::ln))
  }

  /// `n` draws per batch element, as an `n x batch` matrix.
  fn sample_n<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Array2<T>;

  fn mean(&self) -> Array1<T>;

  fn variance(&self) -> Array1<T>;

  fn std_dev(&self) -> Array1<T> {
    self.variance().mapv(T::sqrt)
  }

  fn entropy(&self) -> Array1<T>;

  /// Elementwise mode; NaN where the mode is undefined.
  fn mode(&self) -> Array1<T>;
}

#[cfg(test)]
mod tests {
  use ndarray::arr1;

  use super::FloatExt;
  use super::IntoParam;

  #[test]
  fn scalar_becomes_length_one_batch() {
    let p = 4.0f64.into_param();
    assert_eq!(p, arr1(&[4.0]));
    let p = 4.0f32.into_param();
    assert_eq!(p.len(), 1);
  }

  #[test]
  fn vec_and_slice_keep_order() {
    let p = vec![1.0f64, 2.0, 3.0].into_param();
    assert_eq!(p, arr1(&[1.0, 2.0, 3.0]));
    let p = [1.0f64, 2.0, 3.0].as_slice().into_param();
    assert_eq!(p, arr1(&[1.0, 2.0, 3.0]));
  }

  #[test]
  fn gamma_p_guards_the_domain() {
    assert!(f64::gamma_p(-1.0, 2.0).is_nan());
    assert!(f64::gamma_p(2.0, -1.0).is_nan());
    assert_eq!(f64::gamma_p(2.0, 0.0), 0.0);
    assert_eq!(f64::gamma_p(2.0, f64::INFINITY), 1.0);
    // P(1, x) = 1 - exp(-x)
    let p = f64::gamma_p(1.0, 1.5);
    assert!((p - (1.0 - (-1.5f64).exp())).abs() < 1e-12);
  }

  #[test]
  fn special_functions_route_through_f64() {
    // ln Γ(4) = ln 6
    assert!((FloatExt::ln_gamma(4.0f64) - 6.0f64.ln()).abs() < 1e-12);
    assert!((FloatExt::ln_gamma(4.0f32) - 6.0f32.ln()).abs() < 1e-5);
    // ψ(1) = -γ
    assert!((FloatExt::digamma(1.0f64) + 0.5772156649015329).abs() < 1e-10);
  }
}
