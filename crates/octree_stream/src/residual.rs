//! Leaf residuals - the coordinate bits a leaf never examined.
//!
//! A leaf closed at `level` has `level` unexamined low bits per axis. They are
//! packed as one `3 * level` bit group, x first, most significant bit first,
//! with no byte alignment between leaves:
//!
//! ```text
//! level = 2, x = ..01, y = ..11, z = ..10
//!
//! group:   0 1 | 1 1 | 1 0
//!          x   | y   | z
//! ```
//!
//! [`BitWriter`] carries up to 7 bits between groups. The last partial byte is
//! only written by [`BitWriter::flush`] / [`BitWriter::finish`].

use crate::interleave::deinterleave;
use crate::types::MortonKey;

/// MSB-first bit packer with an explicit flush.
#[derive(Debug, Default, Clone)]
pub struct BitWriter {
  bytes: Vec<u8>,
  /// Pending bits, right-aligned. Never holds 8 or more.
  carry: u32,
  carry_bits: u32,
  total_bits: u64,
}

impl BitWriter {
  /// Create an empty writer.
  pub fn new() -> Self {
    Self::default()
  }

  /// Create a writer with room for `bytes` flushed bytes.
  pub fn with_capacity(bytes: usize) -> Self {
    Self {
      bytes: Vec::with_capacity(bytes),
      ..Self::default()
    }
  }

  /// Append the low `bit_count` bits of `value`, most significant first.
  pub fn push(&mut self, value: u64, bit_count: u32) {
    debug_assert!(bit_count <= u64::BITS);
    let mut remaining = bit_count;
    while remaining > 0 {
      let take = remaining.min(8 - self.carry_bits);
      let chunk = (value >> (remaining - take)) & ((1u64 << take) - 1);
      self.carry = (self.carry << take) | chunk as u32;
      self.carry_bits += take;
      remaining -= take;

      if self.carry_bits == 8 {
        self.bytes.push(self.carry as u8);
        self.carry = 0;
        self.carry_bits = 0;
      }
    }
    self.total_bits += bit_count as u64;
  }

  /// Bits waiting in the carry (0-7).
  #[inline]
  pub fn pending_bits(&self) -> u32 {
    self.carry_bits
  }

  /// Total bits pushed so far.
  #[inline]
  pub fn bit_len(&self) -> u64 {
    self.total_bits
  }

  /// Whole bytes written so far (excludes the carry).
  #[inline]
  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes
  }

  /// Write the carry as a final byte, padded with zero bits.
  pub fn flush(&mut self) {
    if self.carry_bits > 0 {
      self.bytes.push((self.carry << (8 - self.carry_bits)) as u8);
      self.carry = 0;
      self.carry_bits = 0;
    }
  }

  /// Flush and return the packed bytes.
  pub fn finish(mut self) -> Vec<u8> {
    self.flush();
    self.bytes
  }
}

/// MSB-first bit reader over a packed residual stream.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
  bytes: &'a [u8],
  bit_pos: u64,
}

impl<'a> BitReader<'a> {
  pub fn new(bytes: &'a [u8]) -> Self {
    Self { bytes, bit_pos: 0 }
  }

  /// Bits left, counting any trailing padding.
  #[inline]
  pub fn remaining_bits(&self) -> u64 {
    self.bytes.len() as u64 * 8 - self.bit_pos
  }

  /// Read `bit_count` bits (at most 64), or `None` if the stream is shorter.
  pub fn read(&mut self, bit_count: u32) -> Option<u64> {
    if (bit_count as u64) > self.remaining_bits() {
      return None;
    }
    let mut value = 0u64;
    let mut remaining = bit_count;
    while remaining > 0 {
      let byte = self.bytes[(self.bit_pos / 8) as usize];
      let offset = (self.bit_pos % 8) as u32;
      let take = remaining.min(8 - offset);
      let chunk = (byte >> (8 - offset - take)) as u64 & ((1u64 << take) - 1);
      value = (value << take) | chunk;
      self.bit_pos += take as u64;
      remaining -= take;
    }
    Some(value)
  }
}

/// Pack the low `level` bits of each axis of `key` into one `3 * level` bit
/// group: `x | y | z`, x most significant.
#[inline]
pub fn pack_residual(key: MortonKey, level: u32) -> (u64, u32) {
  let mask = (1u64 << level) - 1;
  let (x, y, z) = deinterleave(key);
  let value = ((x as u64 & mask) << (2 * level)) | ((y as u64 & mask) << level) | (z as u64 & mask);
  (value, 3 * level)
}

/// Split a residual group back into per-axis low bits.
#[inline]
pub fn unpack_residual(value: u64, level: u32) -> (u32, u32, u32) {
  let mask = (1u64 << level) - 1;
  (
    ((value >> (2 * level)) & mask) as u32,
    ((value >> level) & mask) as u32,
    (value & mask) as u32,
  )
}

#[cfg(test)]
#[path = "residual_test.rs"]
mod residual_test;
