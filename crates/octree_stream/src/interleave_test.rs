use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Bit-by-bit reference for the table-driven interleave.
fn interleave_naive(x: u32, y: u32, z: u32) -> u64 {
  let mut key = 0u64;
  for i in 0..21 {
    key |= (((x >> i) & 1) as u64) << (3 * i);
    key |= (((y >> i) & 1) as u64) << (3 * i + 1);
    key |= (((z >> i) & 1) as u64) << (3 * i + 2);
  }
  key
}

#[test]
fn test_spread_table_entries() {
  assert_eq!(SPREAD_TABLE[0], 0);
  assert_eq!(SPREAD_TABLE[1], 1);
  assert_eq!(SPREAD_TABLE[2], 0b1000);
  assert_eq!(SPREAD_TABLE[3], 0b1001);
  assert_eq!(SPREAD_TABLE[0xFF], 0o11111111);
  for (byte, &spread) in SPREAD_TABLE.iter().enumerate() {
    assert_eq!(spread.count_ones(), (byte as u32).count_ones());
    assert_eq!(spread & !0o11111111, 0, "entry {} leaks off-stride bits", byte);
  }
}

#[test]
fn test_axis_bit_positions() {
  assert_eq!(interleave(0, 0, 0), 0);
  assert_eq!(interleave(1, 0, 0), 1);
  assert_eq!(interleave(0, 1, 0), 2);
  assert_eq!(interleave(0, 0, 1), 4);
  assert_eq!(interleave(1, 1, 1), 7);
  assert_eq!(interleave(2, 0, 0), 8);
  assert_eq!(interleave(0, 0, 1 << 20), 1 << 62);
}

#[test]
fn test_interleave_matches_naive() {
  let mut rng = StdRng::seed_from_u64(0x5eed);
  for _ in 0..10_000 {
    let (x, y, z) = (
      rng.random_range(0..1u32 << 21),
      rng.random_range(0..1u32 << 21),
      rng.random_range(0..1u32 << 21),
    );
    assert_eq!(interleave(x, y, z), interleave_naive(x, y, z));
  }
}

#[test]
fn test_deinterleave_roundtrip() {
  let mut rng = StdRng::seed_from_u64(42);
  let edges = [0u32, 1, 0xFF, 0x100, 0xFFFF, 0x1_0000, (1 << 21) - 1];
  for &x in &edges {
    for &y in &edges {
      for &z in &edges {
        assert_eq!(deinterleave(interleave(x, y, z)), (x, y, z));
      }
    }
  }
  for _ in 0..10_000 {
    let p = Point::new(
      rng.random_range(0..1u32 << 16),
      rng.random_range(0..1u32 << 16),
      rng.random_range(0..1u32 << 16),
    );
    assert_eq!(key_point(point_key(&p)), p);
  }
}

#[test]
fn test_interleave_preserves_octant_order() {
  // Sorting keys groups points by their top octant first.
  let low = interleave(0x7FFF, 0x7FFF, 0x7FFF);
  let high = interleave(0x8000, 0, 0);
  assert!(low < high);
}

#[test]
fn test_interleave_points_checks_width() {
  let config = CodecConfig::DEFAULT.with_coord_bits(4);
  let points = [Point::new(1, 2, 3), Point::new(15, 15, 15), Point::new(16, 0, 0)];

  let err = interleave_points(&points, &config).unwrap_err();
  assert_eq!(
    err,
    CodecError::CoordinateOutOfRange {
      index: 2,
      point: Point::new(16, 0, 0),
      coord_bits: 4,
    }
  );

  let keys = interleave_points(&points[..2], &config).unwrap();
  assert_eq!(keys, vec![interleave(1, 2, 3), interleave(15, 15, 15)]);
}

#[test]
fn test_interleave_points_rejects_bad_config() {
  let config = CodecConfig::DEFAULT.with_coord_bits(0);
  assert_eq!(
    interleave_points(&[Point::new(0, 0, 0)], &config),
    Err(CodecError::InvalidCoordBits(0))
  );
}
