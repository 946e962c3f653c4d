//! Radix builder.
//!
//! No global sort. Each pending range is counted by octant digit, then
//! scattered into the other buffer at its bucket offsets; every non-empty
//! bucket becomes a child range in that buffer.
//!
//! ```text
//! Primary  [ 5 0 3 0 3 3 ]   level 2 digits
//!              │ count: [2,0,0,3,0,1,0,0] → offsets: [0,2,2,2,5,5,6,6]
//!              ▼
//! Scratch  [ 0 0 3 3 3 5 ]   children read from Scratch, write to Primary
//! ```
//!
//! A range whose keys are all equal closes as a leaf immediately, whatever
//! its length, so duplicates never need a separate pass.

use std::collections::VecDeque;

use web_time::Instant;

use super::{EncodedStream, StreamSink};
use crate::config::CodecConfig;
use crate::constants::{octant_at, OCTANT_COUNT};
use crate::error::{CodecError, CodecResult};
use crate::interleave::interleave_points;
use crate::types::{MortonKey, Point};

/// Which ping-pong buffer holds a range's keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferRole {
  /// Buffer the keys were interleaved into.
  Primary,
  /// Equal-length scratch buffer.
  Scratch,
}

impl BufferRole {
  /// The buffer a scatter from this role writes into.
  #[inline]
  pub const fn other(self) -> Self {
    match self {
      BufferRole::Primary => BufferRole::Scratch,
      BufferRole::Scratch => BufferRole::Primary,
    }
  }
}

/// Two equal-length key buffers, swapped by role rather than reallocated.
struct PingPong {
  primary: Vec<MortonKey>,
  scratch: Vec<MortonKey>,
}

impl PingPong {
  fn new(primary: Vec<MortonKey>) -> Self {
    let scratch = vec![0; primary.len()];
    Self { primary, scratch }
  }

  /// Borrow (source, destination) for a range held in `source`.
  #[inline]
  fn split(&mut self, source: BufferRole) -> (&[MortonKey], &mut [MortonKey]) {
    match source {
      BufferRole::Primary => (&self.primary, &mut self.scratch),
      BufferRole::Scratch => (&self.scratch, &mut self.primary),
    }
  }
}

/// Pending range `[lower, upper)` of buffer `source`. All keys agree above
/// `level`.
#[derive(Clone, Copy, Debug)]
struct Bucket {
  source: BufferRole,
  lower: usize,
  upper: usize,
  level: u32,
}

/// Build the stream by per-level bucket scatter.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "builder::radix_stream"))]
pub fn radix_stream(points: &[Point], config: &CodecConfig) -> CodecResult<EncodedStream> {
  let started = Instant::now();
  if points.is_empty() {
    return Err(CodecError::EmptyPointSet);
  }

  let mut buffers = PingPong::new(interleave_points(points, config)?);

  #[cfg(feature = "tracing")]
  let _span = tracing::info_span!("emit").entered();

  let mut sink = StreamSink::new(points.len(), config, started);
  let mut queue = VecDeque::new();
  queue.push_back(Bucket {
    source: BufferRole::Primary,
    lower: 0,
    upper: points.len(),
    level: config.levels(),
  });

  while let Some(Bucket {
    source,
    lower,
    upper,
    level,
  }) = queue.pop_front()
  {
    let (src, dst) = buffers.split(source);
    let range = &src[lower..upper];
    let representative = range[0];

    // At level 0 every bit is fixed, so the range is one key repeated.
    if range.len() == 1 || level == 0 {
      sink.leaf(representative, level);
      continue;
    }

    let mut counts = [0usize; OCTANT_COUNT];
    let mut all_same = true;
    for &key in range {
      all_same &= key == representative;
      counts[octant_at(key, level)] += 1;
    }

    if all_same {
      sink.leaf(representative, level);
      continue;
    }

    let mut mask = 0u8;
    let mut offsets = [0usize; OCTANT_COUNT];
    let mut next = lower;
    for (octant, &count) in counts.iter().enumerate() {
      offsets[octant] = next;
      next += count;
      if count > 0 {
        mask |= 1 << octant;
      }
    }
    sink.node(mask);

    let bucket_starts = offsets;
    for &key in range {
      let octant = octant_at(key, level);
      dst[offsets[octant]] = key;
      offsets[octant] += 1;
    }

    for (octant, &count) in counts.iter().enumerate() {
      if count > 0 {
        queue.push_back(Bucket {
          source: source.other(),
          lower: bucket_starts[octant],
          upper: offsets[octant],
          level: level - 1,
        });
      }
    }
  }

  Ok(sink.finish(points.len()))
}

#[cfg(test)]
#[path = "radix_test.rs"]
mod radix_test;
