//! Stream layout constants.
//!
//! # Key Layout
//!
//! ```text
//! bit:   ... 8  7  6 | 5  4  3 | 2  1  0
//! axis:  ... z  y  x | z  y  x | z  y  x
//!            level 3 | level 2 | level 1
//! ```
//!
//! Each level contributes one 3-bit octant digit (binary: ZYX), most
//! significant digit first:
//!
//! ```text
//!   0 = (0,0,0)    4 = (0,0,1)
//!   1 = (1,0,0)    5 = (1,0,1)
//!   2 = (0,1,0)    6 = (0,1,1)
//!   3 = (1,1,0)    7 = (1,1,1)
//! ```

/// Coordinate width used when no width is configured (bits per axis).
pub const DEFAULT_COORD_BITS: u32 = 16;

/// Widest coordinate the 64-bit key can hold (3 * 21 = 63 bits).
pub const MAX_COORD_BITS: u32 = 21;

/// Key bits consumed per octree level (one per axis).
pub const OCTANT_BITS: u32 = 3;

/// Mask for extracting one octant digit (0b111).
pub const OCTANT_MASK: u64 = 0b111;

/// Number of children per internal node.
pub const OCTANT_COUNT: usize = 8;

/// Byte emitted for a leaf (no children follow).
pub const LEAF_SENTINEL: u8 = 0x00;

/// Output pre-size hint, in stream bytes per input point.
pub const STREAM_BYTES_PER_POINT: usize = 3;

/// Octant digit of `key` at `level` (1 = finest digit).
#[inline(always)]
pub const fn octant_at(key: u64, level: u32) -> usize {
  ((key >> (OCTANT_BITS * (level - 1))) & OCTANT_MASK) as usize
}

/// Mask covering the key bits not yet examined at `level`.
#[inline(always)]
pub const fn low_key_mask(level: u32) -> u64 {
  if level == 0 {
    0
  } else {
    u64::MAX >> (64 - OCTANT_BITS * level)
  }
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
