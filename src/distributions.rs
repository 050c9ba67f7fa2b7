//! # Distributions
//!
//! $$
//! X\sim\Gamma(\alpha,\beta),\qquad \chi^2_k=\Gamma\!\left(\tfrac{k}{2},\ \beta=\tfrac{1}{2}\right)
//! $$
//!
use anyhow::bail;
use anyhow::Result;

pub mod chi_square;
pub mod gamma;

/// Resolves the output length of an elementwise operation over two batched
/// operands. Lengths must be equal, or either side must be 1.
pub(crate) fn broadcast_len(lhs: usize, rhs: usize) -> Result<usize> {
  if lhs == rhs {
    return Ok(lhs);
  }
  if lhs == 1 {
    return Ok(rhs);
  }
  if rhs == 1 {
    return Ok(lhs);
  }
  bail!("incompatible batch lengths: {lhs} and {rhs}")
}
