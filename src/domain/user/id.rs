// SPDX-License-Identifier: MPL-2.0
//! URL-safe random user ids.

use rand::Rng;

/// Length of generated ids.
pub const ID_LEN: usize = 10;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Generates a [`ID_LEN`]-character id from the thread-local RNG.
#[must_use]
pub fn generate_id() -> String {
    generate_id_with(&mut rand::thread_rng(), ID_LEN)
}

/// Generates an id of `len` characters from `rng`.
pub fn generate_id_with<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect()
}
