use super::*;
use crate::constants::LEAF_SENTINEL;

fn build(points: &[Point], coord_bits: u32) -> Vec<u8> {
  let config = CodecConfig::DEFAULT.with_coord_bits(coord_bits);
  radix_stream(points, &config).expect("non-empty input").bytes
}

#[test]
fn test_buffer_role_alternates() {
  assert_eq!(BufferRole::Primary.other(), BufferRole::Scratch);
  assert_eq!(BufferRole::Scratch.other(), BufferRole::Primary);
  assert_eq!(BufferRole::Primary.other().other(), BufferRole::Primary);
}

#[test]
fn test_ping_pong_split_directions() {
  let mut buffers = PingPong::new(vec![1, 2, 3]);
  {
    let (src, dst) = buffers.split(BufferRole::Primary);
    assert_eq!(src, &[1, 2, 3]);
    dst.copy_from_slice(&[7, 8, 9]);
  }
  let (src, dst) = buffers.split(BufferRole::Scratch);
  assert_eq!(src, &[7, 8, 9]);
  assert_eq!(dst, &[1, 2, 3]);
}

#[test]
fn test_single_point_is_leaf() {
  assert_eq!(build(&[Point::new(5, 5, 5)], 16), vec![LEAF_SENTINEL]);
}

#[test]
fn test_empty_input_rejected() {
  let result = radix_stream(&[], &CodecConfig::DEFAULT);
  assert_eq!(result.unwrap_err(), CodecError::EmptyPointSet);
}

/// A range of identical keys closes immediately, however long it is.
#[test]
fn test_identical_range_is_single_leaf() {
  let p = Point::new(123, 456, 789);
  let points = vec![p; 1000];
  let encoded = radix_stream(&points, &CodecConfig::DEFAULT).unwrap();
  assert_eq!(encoded.bytes, vec![LEAF_SENTINEL]);
  assert_eq!(encoded.stats.leaf_count, 1);
  assert_eq!(encoded.stats.point_count, 1000);
}

/// Duplicates below an internal node also close as one leaf each.
#[test]
fn test_duplicates_under_split() {
  let a = Point::new(0, 0, 0);
  let b = Point::new(0x8000, 0, 0);
  let stream = build(&[a, b, a, a, b], 16);
  assert_eq!(stream, vec![0b0000_0011, LEAF_SENTINEL, LEAF_SENTINEL]);
}

#[test]
fn test_lowest_bit_difference_chains_to_bottom() {
  let stream = build(&[Point::new(1, 0, 0), Point::new(0, 0, 0)], 16);

  let mut expected = vec![0x01; 15];
  expected.push(0b0000_0011);
  expected.extend([LEAF_SENTINEL, LEAF_SENTINEL]);
  assert_eq!(stream, expected);
}

/// Same hand-traced 2-bit example as the comparison builder.
#[test]
fn test_breadth_first_order() {
  let points = [Point::new(0, 0, 0), Point::new(3, 3, 3), Point::new(1, 0, 0)];
  assert_eq!(build(&points, 2), vec![0x81, 0x03, 0x00, 0x00, 0x00]);
}

/// Every octant of the root occupied, each by exactly one corner point.
#[test]
fn test_full_root() {
  let points: Vec<Point> = (0u32..8)
    .map(|octant| Point::new(octant & 1, (octant >> 1) & 1, (octant >> 2) & 1))
    .collect();
  let stream = build(&points, 1);
  assert_eq!(stream, vec![0xFF, 0, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn test_residuals_hand_traced() {
  let points = [Point::new(3, 3, 3), Point::new(0, 0, 0), Point::new(1, 0, 0)];
  let config = CodecConfig::LOSSLESS.with_coord_bits(2);
  let encoded = radix_stream(&points, &config).unwrap();
  assert_eq!(encoded.residuals, Some(vec![0b1110_0000]));
}
