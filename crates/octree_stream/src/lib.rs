//! octree_stream - implicit octree bitstreams for 3-D integer point sets
//!
//! Points are mapped to Morton keys and partitioned octant by octant into an
//! implicit octree, which is serialized breadth-first: one occupancy byte per
//! internal node, `0x00` per leaf. Coordinate bits below a leaf can be kept in
//! an optional bit-packed residual stream for lossless reconstruction.
//!
//! # Features
//!
//! - **Comparison builder**: global sort + dedup, linear partitioning
//! - **Radix builder**: per-level bucket scatter between ping-pong buffers,
//!   byte-identical output to the comparison builder
//! - **Leaf residuals**: MSB-first packed low bits, explicit flush
//! - **Validator / decoder**: well-formedness check and leaf recovery
//!
//! # Example
//!
//! ```ignore
//! use octree_stream::{encode, validate, CodecConfig, Point};
//!
//! let points = vec![Point::new(0, 0, 0), Point::new(1, 0, 0)];
//! let encoded = encode(&points, &CodecConfig::DEFAULT)?;
//!
//! assert!(validate::is_well_formed(&encoded.bytes));
//! println!("{} points -> {} bytes", points.len(), encoded.len());
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod interleave;
pub mod residual;
pub mod types;

// Re-export commonly used items
pub use config::{BuildStrategy, CodecConfig};
pub use constants::{DEFAULT_COORD_BITS, LEAF_SENTINEL, MAX_COORD_BITS};
pub use error::{CodecError, CodecResult, StreamError, StreamResult};
pub use interleave::{deinterleave, interleave};
pub use types::{MortonKey, Point};

// Stream construction (comparison + radix)
pub mod builder;
pub use builder::{encode, radix_stream, sort_stream, EncodeStats, EncodedStream};

// Stream verification and leaf recovery
pub mod decode;
pub mod validate;
pub use decode::{decode_leaves, decode_points, DecodedLeaf};
pub use validate::{is_well_formed, StreamSummary};

pub mod metrics;

#[cfg(test)]
mod test_utils;
