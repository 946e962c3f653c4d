//! Stream builders.
//!
//! Both builders walk the same implicit octree breadth-first and emit one
//! byte per node:
//!
//! - `0x00` for a leaf (one distinct key left in the range)
//! - the occupancy mask otherwise, bit `k` set when octant `k` is occupied
//!
//! Children are always visited in ascending octant order, so the two builders
//! produce identical byte (and residual) streams for the same point set.
//!
//! # Module Structure
//!
//! - [`sort`]: global sort + dedup, linear partition per range
//! - [`radix`]: per-level bucket scatter between ping-pong buffers

pub mod radix;
pub mod sort;

pub use radix::{radix_stream, BufferRole};
pub use sort::sort_stream;

use web_time::Instant;

use crate::config::{BuildStrategy, CodecConfig};
use crate::constants::{LEAF_SENTINEL, STREAM_BYTES_PER_POINT};
use crate::error::CodecResult;
use crate::residual::{pack_residual, BitWriter};
use crate::types::{MortonKey, Point};

/// Statistics from one encoding run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeStats {
  /// Points supplied, duplicates included.
  pub point_count: usize,
  /// Leaf bytes emitted (= distinct keys).
  pub leaf_count: usize,
  /// Occupancy bytes emitted.
  pub internal_count: usize,
  /// Valid bits in the residual stream (0 when residuals are off).
  pub residual_bits: u64,
  /// Wall time of the whole run in microseconds.
  pub encode_time_us: u64,
}

impl EncodeStats {
  /// Total stream bytes (leaves + internal nodes).
  #[inline]
  pub fn node_count(&self) -> usize {
    self.leaf_count + self.internal_count
  }

  /// Stream bytes per input point.
  pub fn bytes_per_point(&self) -> f64 {
    if self.point_count == 0 {
      0.0
    } else {
      self.node_count() as f64 / self.point_count as f64
    }
  }
}

/// Output of a builder.
#[derive(Clone, Debug)]
pub struct EncodedStream {
  /// Breadth-first occupancy / leaf bytes.
  pub bytes: Vec<u8>,
  /// Flushed leaf residual bits, when enabled.
  pub residuals: Option<Vec<u8>>,
  /// Run statistics.
  pub stats: EncodeStats,
}

impl EncodedStream {
  /// Byte stream length.
  #[inline]
  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }

  /// True when both byte and residual streams match (timing ignored).
  pub fn same_encoding(&self, other: &EncodedStream) -> bool {
    self.bytes == other.bytes && self.residuals == other.residuals
  }
}

/// Encode with the builder selected by `config.strategy`.
pub fn encode(points: &[Point], config: &CodecConfig) -> CodecResult<EncodedStream> {
  match config.strategy {
    BuildStrategy::Comparison => sort_stream(points, config),
    BuildStrategy::Radix => radix_stream(points, config),
  }
}

/// Append-only output shared by both builders.
pub(crate) struct StreamSink {
  bytes: Vec<u8>,
  residuals: Option<BitWriter>,
  leaf_count: usize,
  internal_count: usize,
  started: Instant,
}

impl StreamSink {
  pub(crate) fn new(point_count: usize, config: &CodecConfig, started: Instant) -> Self {
    Self {
      bytes: Vec::with_capacity(STREAM_BYTES_PER_POINT * point_count),
      residuals: config
        .leaf_residuals
        .then(|| BitWriter::with_capacity(point_count)),
      leaf_count: 0,
      internal_count: 0,
      started,
    }
  }

  /// Close a range as a leaf; `key` is its representative.
  #[inline]
  pub(crate) fn leaf(&mut self, key: MortonKey, level: u32) {
    self.bytes.push(LEAF_SENTINEL);
    self.leaf_count += 1;
    if let Some(writer) = self.residuals.as_mut() {
      let (value, bits) = pack_residual(key, level);
      writer.push(value, bits);
    }
  }

  /// Emit an occupancy byte for an internal node.
  #[inline]
  pub(crate) fn node(&mut self, mask: u8) {
    debug_assert_ne!(mask, LEAF_SENTINEL);
    self.bytes.push(mask);
    self.internal_count += 1;
  }

  pub(crate) fn finish(self, point_count: usize) -> EncodedStream {
    let residual_bits = self.residuals.as_ref().map_or(0, BitWriter::bit_len);
    let stats = EncodeStats {
      point_count,
      leaf_count: self.leaf_count,
      internal_count: self.internal_count,
      residual_bits,
      encode_time_us: self.started.elapsed().as_micros() as u64,
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
      bytes = self.bytes.len(),
      leaves = stats.leaf_count,
      residual_bits,
      time_us = stats.encode_time_us,
      "octree stream built"
    );

    EncodedStream {
      bytes: self.bytes,
      residuals: self.residuals.map(BitWriter::finish),
      stats,
    }
  }
}
