//! Core data types for octree stream encoding.

use glam::UVec3;

/// Interleaved (Morton / Z-order) key.
///
/// Bit `3i` holds bit `i` of x, bit `3i + 1` of y, bit `3i + 2` of z.
pub type MortonKey = u64;

/// Input point with unsigned integer coordinates.
///
/// Every coordinate must fit the configured width
/// ([`CodecConfig::coord_bits`](crate::CodecConfig::coord_bits)).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct Point {
  pub x: u32,
  pub y: u32,
  pub z: u32,
}

impl Point {
  /// Create a new point.
  #[inline]
  pub const fn new(x: u32, y: u32, z: u32) -> Self {
    Self { x, y, z }
  }

  /// Largest coordinate on any axis.
  #[inline]
  pub fn max_coord(&self) -> u32 {
    self.x.max(self.y).max(self.z)
  }

  /// Check that every coordinate fits in `coord_bits` bits.
  #[inline]
  pub fn fits(&self, coord_bits: u32) -> bool {
    coord_bits >= u32::BITS || self.max_coord() >> coord_bits == 0
  }

  /// Coordinates as an array [x, y, z].
  #[inline]
  pub const fn to_array(self) -> [u32; 3] {
    [self.x, self.y, self.z]
  }
}

impl From<[u32; 3]> for Point {
  fn from([x, y, z]: [u32; 3]) -> Self {
    Self { x, y, z }
  }
}

impl From<(u32, u32, u32)> for Point {
  fn from((x, y, z): (u32, u32, u32)) -> Self {
    Self { x, y, z }
  }
}

impl From<UVec3> for Point {
  fn from(v: UVec3) -> Self {
    Self::new(v.x, v.y, v.z)
  }
}

impl From<Point> for UVec3 {
  fn from(p: Point) -> Self {
    UVec3::new(p.x, p.y, p.z)
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
