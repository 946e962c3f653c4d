//! Engine-agnostic metrics collection for stream encoding.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use octree_stream::metrics::{CodecMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! let encoded = octree_stream::encode(&points, &config)?;
//! metrics.record(&encoded.stats);
//! ```

use std::collections::VecDeque;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;

use crate::builder::EncodeStats;

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
    #[cfg(feature = "metrics")]
    {
        COLLECT_METRICS.load(Ordering::Relaxed)
    }
    #[cfg(not(feature = "metrics"))]
    {
        false
    }
}

/// Rolling window for storing recent values (e.g., timing history).
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    buffer: VecDeque<T>,
    capacity: usize,
}

impl<T> RollingWindow<T> {
    /// Create a new rolling window with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a new value, evicting the oldest if at capacity.
    pub fn push(&mut self, value: T) {
        if self.buffer.len() >= self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(value);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Iterate over values (oldest to newest).
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.buffer.iter()
    }

    /// Get the most recent value.
    pub fn last(&self) -> Option<&T> {
        self.buffer.back()
    }
}

impl RollingWindow<u64> {
    /// Compute the average of all values.
    pub fn average(&self) -> f64 {
        if self.buffer.is_empty() {
            0.0
        } else {
            self.buffer.iter().sum::<u64>() as f64 / self.buffer.len() as f64
        }
    }

    /// Get min and max values.
    pub fn min_max(&self) -> Option<(u64, u64)> {
        let min = *self.buffer.iter().min()?;
        let max = *self.buffer.iter().max()?;
        Some((min, max))
    }
}

impl Default for RollingWindow<u64> {
    fn default() -> Self {
        Self::new(128)
    }
}

/// Encoder statistics accumulated over many runs.
#[derive(Debug, Clone, Default)]
pub struct CodecMetrics {
    /// Streams recorded.
    pub streams_encoded: u64,
    /// Input points across all streams, duplicates included.
    pub total_points: u64,
    /// Stream bytes across all streams.
    pub total_bytes: u64,
    /// Leaf bytes across all streams.
    pub total_leaves: u64,
    /// Residual bits across all streams.
    pub total_residual_bits: u64,

    /// Rolling window of encode times in microseconds.
    pub encode_timings: RollingWindow<u64>,
    /// Rolling window of encode throughput in points per millisecond.
    pub throughput: RollingWindow<u64>,
}

impl CodecMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all metrics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record one encoding run.
    pub fn record(&mut self, stats: &EncodeStats) {
        if !is_enabled() {
            return;
        }

        self.streams_encoded += 1;
        self.total_points += stats.point_count as u64;
        self.total_bytes += stats.node_count() as u64;
        self.total_leaves += stats.leaf_count as u64;
        self.total_residual_bits += stats.residual_bits;

        self.encode_timings.push(stats.encode_time_us);
        let per_ms = (stats.point_count as u64 * 1000) / stats.encode_time_us.max(1);
        self.throughput.push(per_ms);
    }

    /// Average stream bytes per input point.
    pub fn bytes_per_point(&self) -> f64 {
        if self.total_points == 0 {
            0.0
        } else {
            self.total_bytes as f64 / self.total_points as f64
        }
    }

    /// Fraction of input points that were duplicates.
    pub fn duplicate_ratio(&self) -> f64 {
        if self.total_points == 0 {
            0.0
        } else {
            1.0 - self.total_leaves as f64 / self.total_points as f64
        }
    }

    /// Get average encode timing in microseconds.
    pub fn avg_encode_timing_us(&self) -> f64 {
        self.encode_timings.average()
    }
}
