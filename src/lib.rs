//! # distr-rs
//!
//! $$
//! \chi^2_k \sim \Gamma\!\left(\tfrac{k}{2},\ \beta=\tfrac{1}{2}\right)
//! $$
//!
//! Probability distributions with batched parameters. Distributions carry a
//! strict/non-strict validation mode: strict mode rejects invalid parameters
//! and sample points with errors, non-strict mode skips every value check and
//! lets invalid inputs propagate as undefined (NaN) results.

pub mod distributions;
pub mod traits;

pub use distributions::chi_square::Chi2;
pub use distributions::gamma::Gamma;
pub use traits::DistributionExt;
pub use traits::FloatExt;
pub use traits::IntoParam;
