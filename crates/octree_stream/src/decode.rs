//! Stream decoding.
//!
//! [`decode_leaves`] replays the byte stream and recovers each leaf's cell:
//! the key bits fixed by the path from the root, plus how many low bits per
//! axis the path never reached. That alone is lossy. [`decode_points`] fills
//! the missing bits from the residual stream and recovers every distinct input
//! point exactly, in leaf (breadth-first) order.

use std::collections::VecDeque;

use crate::config::CodecConfig;
use crate::constants::{low_key_mask, LEAF_SENTINEL, MAX_COORD_BITS, OCTANT_BITS, OCTANT_COUNT};
use crate::error::{StreamError, StreamResult};
use crate::interleave::{interleave, key_point, point_key};
use crate::residual::{unpack_residual, BitReader};
use crate::types::{MortonKey, Point};

/// A leaf recovered from the byte stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedLeaf {
  /// Key bits fixed by the path; the low `3 * level` bits are zero.
  pub prefix: MortonKey,
  /// Low bits per axis not covered by the path.
  pub level: u32,
}

impl DecodedLeaf {
  /// Minimum corner of the leaf's cell.
  #[inline]
  pub fn min_corner(&self) -> Point {
    key_point(self.prefix)
  }

  /// Cell edge length on every axis.
  #[inline]
  pub fn cell_size(&self) -> u32 {
    1 << self.level
  }

  /// Inclusive key range covered by the cell.
  #[inline]
  pub fn key_range(&self) -> (MortonKey, MortonKey) {
    (self.prefix, self.prefix | low_key_mask(self.level))
  }

  /// Check whether `point` falls inside this leaf's cell.
  pub fn contains(&self, point: &Point) -> bool {
    point.fits(MAX_COORD_BITS) && (point_key(point) & !low_key_mask(self.level)) == self.prefix
  }
}

/// Recover every leaf cell, in stream order.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "decode::decode_leaves"))]
pub fn decode_leaves(bytes: &[u8], config: &CodecConfig) -> StreamResult<Vec<DecodedLeaf>> {
  config.validate()?;

  let mut leaves = Vec::new();
  let mut queue: VecDeque<(MortonKey, u32)> = VecDeque::new();
  queue.push_back((0, config.levels()));
  let mut consumed = 0usize;

  while let Some((prefix, level)) = queue.pop_front() {
    let Some(&mask) = bytes.get(consumed) else {
      return Err(StreamError::TooShort { consumed });
    };

    if mask == LEAF_SENTINEL {
      leaves.push(DecodedLeaf { prefix, level });
    } else if level == 0 {
      return Err(StreamError::BelowFinestLevel {
        offset: consumed,
        mask,
      });
    } else {
      let shift = OCTANT_BITS * (level - 1);
      for octant in 0..OCTANT_COUNT {
        if (mask >> octant) & 1 == 1 {
          queue.push_back((prefix | (octant as MortonKey) << shift, level - 1));
        }
      }
    }
    consumed += 1;
  }

  if consumed != bytes.len() {
    return Err(StreamError::TrailingBytes {
      consumed,
      remaining: bytes.len() - consumed,
    });
  }
  Ok(leaves)
}

/// Recover the distinct input points from a byte stream and its residuals.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "decode::decode_points"))]
pub fn decode_points(bytes: &[u8], residuals: &[u8], config: &CodecConfig) -> StreamResult<Vec<Point>> {
  let leaves = decode_leaves(bytes, config)?;
  let mut reader = BitReader::new(residuals);

  let points = leaves
    .iter()
    .enumerate()
    .map(|(leaf, cell)| -> StreamResult<Point> {
      let value = reader
        .read(OCTANT_BITS * cell.level)
        .ok_or(StreamError::ResidualsExhausted { leaf })?;
      let (x, y, z) = unpack_residual(value, cell.level);
      Ok(key_point(cell.prefix | interleave(x, y, z)))
    })
    .collect::<StreamResult<Vec<_>>>()?;

  // Anything past the final partial byte is not padding.
  if reader.remaining_bits() >= 8 {
    return Err(StreamError::TrailingResidualBits {
      remaining: reader.remaining_bits(),
    });
  }
  Ok(points)
}

#[cfg(test)]
#[path = "decode_test.rs"]
mod decode_test;
