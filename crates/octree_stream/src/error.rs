//! Error types for stream construction and validation.

use thiserror::Error;

use crate::types::Point;

/// Errors raised while building a stream.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
  /// No points were supplied; there is no root to encode.
  #[error("Point set is empty")]
  EmptyPointSet,

  /// A coordinate does not fit the configured width.
  #[error("Point {index} ({}, {}, {}) exceeds {coord_bits}-bit coordinates", .point.x, .point.y, .point.z)]
  CoordinateOutOfRange {
    index: usize,
    point: Point,
    coord_bits: u32,
  },

  /// Coordinate width outside 1..=21.
  #[error("Invalid coordinate width: {0} bits (must be between 1 and 21)")]
  InvalidCoordBits(u32),
}

/// Errors raised while validating or decoding a stream.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StreamError {
  /// A pending node had no byte left to read.
  #[error("Stream too short: ran out after {consumed} bytes")]
  TooShort { consumed: usize },

  /// The tree was complete but bytes remain.
  #[error("Stream not fully consumed: {remaining} bytes left after {consumed}")]
  TrailingBytes { consumed: usize, remaining: usize },

  /// An occupancy byte appeared where only leaves are possible.
  #[error("Occupancy byte {mask:#04x} at offset {offset} is below the finest level")]
  BelowFinestLevel { offset: usize, mask: u8 },

  /// The residual stream ended before every leaf was read.
  #[error("Residual stream exhausted at leaf {leaf}")]
  ResidualsExhausted { leaf: usize },

  /// Whole bytes remain in the residual stream after the last leaf.
  #[error("Residual stream has {remaining} bits left after the last leaf")]
  TrailingResidualBits { remaining: u64 },

  /// Codec configuration rejected before decoding.
  #[error(transparent)]
  Config(#[from] CodecError),
}

/// Result type for stream construction.
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Result type for stream validation and decoding.
pub type StreamResult<T> = std::result::Result<T, StreamError>;
