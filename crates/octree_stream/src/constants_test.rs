use super::*;

#[test]
fn test_max_width_fits_key() {
  assert!(OCTANT_BITS * MAX_COORD_BITS <= u64::BITS);
  assert!(DEFAULT_COORD_BITS <= MAX_COORD_BITS);
}

#[test]
fn test_octant_at_reads_digits_msb_first() {
  // Octal literal: one digit per level.
  let key = 0o7_3_0_5u64;
  assert_eq!(octant_at(key, 4), 7);
  assert_eq!(octant_at(key, 3), 3);
  assert_eq!(octant_at(key, 2), 0);
  assert_eq!(octant_at(key, 1), 5);
}

#[test]
fn test_low_key_mask() {
  assert_eq!(low_key_mask(0), 0);
  assert_eq!(low_key_mask(1), 0b111);
  assert_eq!(low_key_mask(2), 0o77);
  assert_eq!(low_key_mask(MAX_COORD_BITS), u64::MAX >> 1);
}
