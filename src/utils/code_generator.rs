//! Short ID generation and validation.
//!
//! Short IDs are fixed-length strings over a 62-symbol alphanumeric alphabet.
//! Generation draws every position independently from the thread-local RNG,
//! which is seeded from the OS once per thread rather than on every call.

use rand::Rng;

/// Length of every generated short ID.
pub const SHORT_ID_LENGTH: usize = 8;

/// Alphabet short IDs are drawn from.
const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a random identifier of `length` characters.
///
/// Not unique by construction; callers must handle collisions.
///
/// # Examples
///
/// ```ignore
/// let id = generate_short_id(SHORT_ID_LENGTH);
/// assert_eq!(id.len(), 8);
/// assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_short_id(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Returns true if `candidate` has the exact short ID length and only
/// alphabet characters.
pub fn is_valid_short_id(candidate: &str) -> bool {
    candidate.len() == SHORT_ID_LENGTH && candidate.bytes().all(|b| CHARSET.contains(&b))
}
