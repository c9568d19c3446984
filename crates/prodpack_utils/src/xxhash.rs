use base_encode::to_string;
use xxhash_rust::xxh3::xxh3_128;

const CHARACTERS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ-_";

/// Hashes `input` with xxh3 and encodes the digest in `base` (2..=64).
///
/// Bases up to 36 only produce lowercase alphanumerics, which keeps hashes
/// safe to embed in file names on case-insensitive file systems.
pub fn xxhash_with_base(input: &[u8], base: u8) -> String {
  let hash = xxh3_128(input).to_le_bytes();
  to_string(&hash, base, CHARACTERS).unwrap_or_default()
}

/// The hex digest used for `[contenthash]` style placeholders.
pub fn content_hash(input: &[u8]) -> String {
  xxhash_with_base(input, 16)
}

#[test]
fn test_xxhash_with_base() {
  let hex = xxhash_with_base(b"hello", 16);
  assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
  assert_eq!(hex, content_hash(b"hello"));
  assert_ne!(content_hash(b"hello"), content_hash(b"hello!"));

  let base36 = xxhash_with_base(b"hello", 36);
  assert!(base36.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
}
