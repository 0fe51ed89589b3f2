//! Random code generation for server-minted identifiers.
//!
//! Codes are not checked for uniqueness here; the storage layer guards them
//! with unique constraints and the service retries on collision.

use rand::Rng;

/// Alphabet for `carId` and `rentId`.
pub const DIGITS: &str = "1234567890";

/// Alphabet for car slugs.
pub const SLUG_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of `carId` and `rentId`.
pub const CODE_LENGTH: usize = 8;

pub const SLUG_LENGTH: usize = 10;

/// Generates `length` characters drawn uniformly from `alphabet`.
///
/// Returns an empty string for an empty alphabet.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(DIGITS, 8);
/// assert_eq!(code.len(), 8);
/// ```
pub fn generate_code(alphabet: &str, length: usize) -> String {
    let chars: Vec<char> = alphabet.chars().collect();
    if chars.is_empty() {
        return String::new();
    }

    let mut rng = rand::rng();
    (0..length)
        .map(|_| chars[rng.random_range(0..chars.len())])
        .collect()
}

/// Generates an 8-digit identifier such as `"40718265"`.
pub fn generate_numeric_id() -> String {
    generate_code(DIGITS, CODE_LENGTH)
}

/// Generates a 10-character lowercase alphanumeric slug.
pub fn generate_slug() -> String {
    generate_code(SLUG_ALPHABET, SLUG_LENGTH)
}
