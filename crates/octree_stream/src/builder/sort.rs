//! Comparison-sort builder.
//!
//! Keys are sorted and deduplicated once up front. Inside a sorted range the
//! octant digit at any level is non-decreasing, so a single linear pass finds
//! both the occupancy mask and the child sub-ranges.
//!
//! ```text
//! level 2 digits:  0 0 3 3 3 5      mask = 0b0010_1001
//!                  └─┘ └───┘ └      children: [0,2) [2,5) [5,6)
//! ```

use std::collections::VecDeque;

use web_time::Instant;

use super::{EncodedStream, StreamSink};
use crate::config::CodecConfig;
use crate::constants::octant_at;
use crate::error::{CodecError, CodecResult};
use crate::interleave::interleave_points;
use crate::types::Point;

/// Pending range `[lower, upper)` of the sorted key array. All keys agree
/// above `level`.
#[derive(Clone, Copy, Debug)]
struct SortRange {
  lower: usize,
  upper: usize,
  level: u32,
}

/// Build the stream by global sort + dedup.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "builder::sort_stream"))]
pub fn sort_stream(points: &[Point], config: &CodecConfig) -> CodecResult<EncodedStream> {
  let started = Instant::now();
  if points.is_empty() {
    return Err(CodecError::EmptyPointSet);
  }

  let mut keys = interleave_points(points, config)?;
  {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("sort_dedup").entered();
    keys.sort_unstable();
    keys.dedup();
  }

  #[cfg(feature = "tracing")]
  let _span = tracing::info_span!("emit").entered();

  let mut sink = StreamSink::new(points.len(), config, started);
  let mut queue = VecDeque::new();
  queue.push_back(SortRange {
    lower: 0,
    upper: keys.len(),
    level: config.levels(),
  });

  while let Some(SortRange { lower, upper, level }) = queue.pop_front() {
    // Distinct keys always split before level 0.
    if upper - lower == 1 || level == 0 {
      sink.leaf(keys[lower], level);
      continue;
    }

    let mut mask = 0u8;
    let mut run_start = lower;
    let mut run_octant = octant_at(keys[lower], level);
    for (offset, &key) in keys[lower..upper].iter().enumerate() {
      let octant = octant_at(key, level);
      if octant != run_octant {
        queue.push_back(SortRange {
          lower: run_start,
          upper: lower + offset,
          level: level - 1,
        });
        run_start = lower + offset;
        run_octant = octant;
      }
      mask |= 1 << octant;
    }
    queue.push_back(SortRange {
      lower: run_start,
      upper,
      level: level - 1,
    });

    sink.node(mask);
  }

  Ok(sink.finish(points.len()))
}

#[cfg(test)]
#[path = "sort_test.rs"]
mod sort_test;
