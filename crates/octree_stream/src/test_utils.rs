//! Test utilities for builder, validator and decoder tests.
//!
//! Provides seeded point cloud generators so every test run sees the same
//! inputs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::Point;

// =============================================================================
// Point Cloud Fixtures
// =============================================================================

/// Uniform random points with `coord_bits`-bit coordinates.
pub fn random_points(seed: u64, count: usize, coord_bits: u32) -> Vec<Point> {
  let mut rng = StdRng::seed_from_u64(seed);
  let bound = 1u32 << coord_bits;
  (0..count)
    .map(|_| {
      Point::new(
        rng.random_range(0..bound),
        rng.random_range(0..bound),
        rng.random_range(0..bound),
      )
    })
    .collect()
}

/// Points packed into a few tight clusters, so ranges stay deep and narrow.
pub fn clustered_points(seed: u64, count: usize, coord_bits: u32) -> Vec<Point> {
  let mut rng = StdRng::seed_from_u64(seed);
  let bound = 1u32 << coord_bits;
  let spread = (bound / 64).max(2);
  let centers: Vec<Point> = (0..4)
    .map(|_| {
      Point::new(
        rng.random_range(0..bound),
        rng.random_range(0..bound),
        rng.random_range(0..bound),
      )
    })
    .collect();

  (0..count)
    .map(|i| {
      let c = centers[i % centers.len()];
      let jitter = |v: u32, rng: &mut StdRng| (v + rng.random_range(0..spread)).min(bound - 1);
      Point::new(jitter(c.x, &mut rng), jitter(c.y, &mut rng), jitter(c.z, &mut rng))
    })
    .collect()
}

/// Random points where roughly every other point repeats an earlier one.
pub fn points_with_duplicates(seed: u64, count: usize, coord_bits: u32) -> Vec<Point> {
  let mut rng = StdRng::seed_from_u64(seed ^ 0xD0D0);
  let mut points = random_points(seed, count / 2 + 1, coord_bits);
  while points.len() < count {
    let pick = points[rng.random_range(0..points.len())];
    points.push(pick);
  }
  points
}

/// Sorted, deduplicated copy of `points`.
pub fn distinct(points: &[Point]) -> Vec<Point> {
  let mut out = points.to_vec();
  out.sort_unstable();
  out.dedup();
  out
}
