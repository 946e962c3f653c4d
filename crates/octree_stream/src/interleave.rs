//! Morton (Z-order) bit interleaving.
//!
//! Interleaving goes through a 256-entry spread table: entry `b` holds the
//! bits of byte `b` moved to every third bit position. A coordinate is spread
//! one byte at a time, so a 21-bit coordinate costs three lookups.
//!
//! ```text
//! byte:    b7 b6 b5 b4 b3 b2 b1 b0
//! spread:  b7 0 0 b6 0 0 b5 0 0 b4 0 0 b3 0 0 b2 0 0 b1 0 0 b0
//! ```
//!
//! The table is built by a `const fn` loop, so it exists before any caller can
//! observe it and is never written afterwards.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::CodecConfig;
use crate::error::{CodecError, CodecResult};
use crate::types::{MortonKey, Point};

/// Bits of interleaved key produced by one spread byte triple (8 bits x 3 axes).
const CHUNK_BITS: u32 = 24;

/// Inputs at least this large are mapped on rayon's pool.
#[cfg(feature = "parallel")]
const PARALLEL_MIN_POINTS: usize = 1 << 16;

/// Spread table: `SPREAD_TABLE[b]` is `b` with bit `i` moved to bit `3i`.
pub static SPREAD_TABLE: [u64; 256] = build_spread_table();

const fn build_spread_table() -> [u64; 256] {
  let mut table = [0u64; 256];
  let mut byte = 0;
  while byte < 256 {
    let mut spread = 0u64;
    let mut bit = 0;
    while bit < 8 {
      spread |= (((byte >> bit) & 1) as u64) << (3 * bit);
      bit += 1;
    }
    table[byte] = spread;
    byte += 1;
  }
  table
}

#[inline(always)]
fn spread_byte(v: u32, byte: u32) -> u64 {
  SPREAD_TABLE[((v >> (8 * byte)) & 0xFF) as usize]
}

/// Interleave three coordinates (each at most 21 bits) into one key.
///
/// Bits above bit 20 are not representable and are dropped.
#[inline]
pub fn interleave(x: u32, y: u32, z: u32) -> MortonKey {
  let mut key = 0u64;
  for byte in (0..3).rev() {
    key = (key << CHUNK_BITS)
      | spread_byte(z, byte) << 2
      | spread_byte(y, byte) << 1
      | spread_byte(x, byte);
  }
  key
}

/// Gather every third bit of `key` (starting at bit 0) into a 21-bit value.
#[inline]
fn compact_bits(key: u64) -> u32 {
  let mut v = key & 0x1249249249249249;
  v = (v | (v >> 2)) & 0x10c30c30c30c30c3;
  v = (v | (v >> 4)) & 0x100f00f00f00f00f;
  v = (v | (v >> 8)) & 0x1f0000ff0000ff;
  v = (v | (v >> 16)) & 0x1f00000000ffff;
  v = (v | (v >> 32)) & 0x1fffff;
  v as u32
}

/// Split a key back into (x, y, z). Exact inverse of [`interleave`].
#[inline]
pub fn deinterleave(key: MortonKey) -> (u32, u32, u32) {
  (compact_bits(key), compact_bits(key >> 1), compact_bits(key >> 2))
}

/// Interleave a point.
#[inline]
pub fn point_key(point: &Point) -> MortonKey {
  interleave(point.x, point.y, point.z)
}

/// Inverse of [`point_key`].
#[inline]
pub fn key_point(key: MortonKey) -> Point {
  let (x, y, z) = deinterleave(key);
  Point::new(x, y, z)
}

/// Map every point to its key, checking coordinate widths first.
///
/// Returns the first point (lowest index) that does not fit
/// `config.coord_bits`.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "interleave::interleave_points"))]
pub fn interleave_points(points: &[Point], config: &CodecConfig) -> CodecResult<Vec<MortonKey>> {
  config.validate()?;
  let coord_bits = config.coord_bits;

  if let Some(index) = first_out_of_range(points, coord_bits) {
    return Err(CodecError::CoordinateOutOfRange {
      index,
      point: points[index],
      coord_bits,
    });
  }

  #[cfg(feature = "parallel")]
  if points.len() >= PARALLEL_MIN_POINTS {
    return Ok(points.par_iter().map(point_key).collect());
  }

  Ok(points.iter().map(point_key).collect())
}

fn first_out_of_range(points: &[Point], coord_bits: u32) -> Option<usize> {
  #[cfg(feature = "parallel")]
  if points.len() >= PARALLEL_MIN_POINTS {
    return points.par_iter().position_first(|p| !p.fits(coord_bits));
  }

  points.iter().position(|p| !p.fits(coord_bits))
}

#[cfg(test)]
#[path = "interleave_test.rs"]
mod interleave_test;
