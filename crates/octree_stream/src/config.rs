//! CodecConfig - coordinate width, build strategy and leaf encoding.

use crate::constants::{DEFAULT_COORD_BITS, MAX_COORD_BITS};
use crate::error::{CodecError, CodecResult};

/// Stream construction algorithm.
///
/// Both strategies emit byte-for-byte identical streams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BuildStrategy {
  /// Global sort + dedup, then linear partitioning per range.
  Comparison,

  /// Per-level bucketing into ping-pong buffers. O(n * W), no global sort.
  #[default]
  Radix,
}

/// Configuration for a single encoding run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodecConfig {
  /// Bits per coordinate (W). Every point must fit; 1..=21.
  pub coord_bits: u32,

  /// Algorithm used by [`encode`](crate::encode).
  pub strategy: BuildStrategy,

  /// Append the unexamined low coordinate bits of each leaf to a companion
  /// bit stream, making the encoding lossless.
  pub leaf_residuals: bool,
}

impl CodecConfig {
  /// 16-bit coordinates, radix builder, occupancy bytes only.
  pub const DEFAULT: Self = Self {
    coord_bits: DEFAULT_COORD_BITS,
    strategy: BuildStrategy::Radix,
    leaf_residuals: false,
  };

  /// 16-bit coordinates with leaf residuals (lossless).
  pub const LOSSLESS: Self = Self {
    coord_bits: DEFAULT_COORD_BITS,
    strategy: BuildStrategy::Radix,
    leaf_residuals: true,
  };

  /// Same configuration with a different coordinate width.
  #[inline]
  pub const fn with_coord_bits(self, coord_bits: u32) -> Self {
    Self { coord_bits, ..self }
  }

  /// Same configuration with a different build strategy.
  #[inline]
  pub const fn with_strategy(self, strategy: BuildStrategy) -> Self {
    Self { strategy, ..self }
  }

  /// Same configuration with leaf residuals toggled.
  #[inline]
  pub const fn with_leaf_residuals(self, leaf_residuals: bool) -> Self {
    Self {
      leaf_residuals,
      ..self
    }
  }

  /// Octree depth: one level per coordinate bit.
  #[inline]
  pub const fn levels(&self) -> u32 {
    self.coord_bits
  }

  /// Check the coordinate width is usable.
  pub fn validate(&self) -> CodecResult<()> {
    if self.coord_bits == 0 || self.coord_bits > MAX_COORD_BITS {
      return Err(CodecError::InvalidCoordBits(self.coord_bits));
    }
    Ok(())
  }
}

impl Default for CodecConfig {
  fn default() -> Self {
    Self::DEFAULT
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
