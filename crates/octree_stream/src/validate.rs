//! Stream validator.
//!
//! Replays a byte stream breadth-first, rebuilding the octree it describes in
//! a flat arena. A stream is well-formed iff every expanded node finds its
//! byte and no byte is left once the queue drains. Never used while encoding.

use std::collections::VecDeque;

use smallvec::SmallVec;

use crate::constants::{LEAF_SENTINEL, OCTANT_COUNT};
use crate::error::{StreamError, StreamResult};

/// Arena index of a rebuilt node.
type NodeIndex = u32;

/// Node rebuilt during validation. Dropped with the arena.
#[derive(Clone, Debug, Default)]
struct ArenaNode {
  occupancy: u8,
  children: SmallVec<[NodeIndex; OCTANT_COUNT]>,
}

/// Shape of a well-formed stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamSummary {
  /// Nodes in the tree (= stream bytes).
  pub node_count: usize,
  /// Nodes with the leaf sentinel.
  pub leaf_count: usize,
  /// Levels below the root (0 for a lone leaf).
  pub depth: u32,
}

impl StreamSummary {
  /// Nodes with an occupancy mask.
  #[inline]
  pub fn internal_count(&self) -> usize {
    self.node_count - self.leaf_count
  }
}

/// Check that `bytes` describes exactly one complete tree.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "validate::validate"))]
pub fn validate(bytes: &[u8]) -> StreamResult<StreamSummary> {
  let mut arena = vec![ArenaNode::default()];
  let mut queue: VecDeque<(NodeIndex, u32)> = VecDeque::new();
  queue.push_back((0, 0));

  let mut consumed = 0usize;
  let mut summary = StreamSummary::default();

  while let Some((index, depth)) = queue.pop_front() {
    let Some(&occupancy) = bytes.get(consumed) else {
      #[cfg(feature = "tracing")]
      tracing::debug!(consumed, pending = queue.len() + 1, "stream too short");
      return Err(StreamError::TooShort { consumed });
    };
    consumed += 1;

    summary.node_count += 1;
    summary.depth = summary.depth.max(depth);
    if occupancy == LEAF_SENTINEL {
      summary.leaf_count += 1;
    }

    let mut children = SmallVec::new();
    for octant in 0..OCTANT_COUNT {
      if (occupancy >> octant) & 1 == 1 {
        let child = arena.len() as NodeIndex;
        arena.push(ArenaNode::default());
        children.push(child);
        queue.push_back((child, depth + 1));
      }
    }
    let node = &mut arena[index as usize];
    node.occupancy = occupancy;
    node.children = children;
  }

  if consumed != bytes.len() {
    #[cfg(feature = "tracing")]
    tracing::debug!(consumed, remaining = bytes.len() - consumed, "stream not fully consumed");
    return Err(StreamError::TrailingBytes {
      consumed,
      remaining: bytes.len() - consumed,
    });
  }

  debug_assert_eq!(arena.len(), summary.node_count);
  debug_assert_eq!(
    arena.iter().map(|n| n.children.len()).sum::<usize>() + 1,
    arena.len()
  );
  debug_assert!(arena
    .iter()
    .all(|n| n.children.len() == n.occupancy.count_ones() as usize));

  Ok(summary)
}

/// Pass/fail form of [`validate`].
#[inline]
pub fn is_well_formed(bytes: &[u8]) -> bool {
  validate(bytes).is_ok()
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;
