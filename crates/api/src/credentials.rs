// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Temporary password generation.
//!
//! Generated passwords are handed to students for their first login, so
//! visually ambiguous characters (I, O, l, 0, 1) are excluded from every
//! pool.

use rand::Rng;
use rand::RngExt;
use rand::seq::SliceRandom;

use enrolink::CredentialIssuer;

const UPPER: &str = "ABCDEFGHJKLMNPQRSTUVWXYZ";
const LOWER: &str = "abcdefghijkmnopqrstuvwxyz";
const DIGITS: &str = "23456789";
const SYMBOLS: &str = "@#$%!?";
const PASSWORD_LENGTH: usize = 10;

/// Generates temporary first-login passwords.
///
/// Every generated password has length 10 and contains at least one
/// character from each of the four pools; the remaining positions are
/// drawn from the union pool and the result is shuffled so the
/// guaranteed characters are not positionally predictable. Randomness
/// comes from the thread-local CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct TempPasswordGenerator;

impl TempPasswordGenerator {
    /// Creates a new generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Produces a fresh temporary password.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut rng = rand::rng();
        let pool: String = [UPPER, LOWER, DIGITS, SYMBOLS].concat();

        let mut chars: Vec<char> = vec![
            random_char(&mut rng, UPPER),
            random_char(&mut rng, LOWER),
            random_char(&mut rng, DIGITS),
            random_char(&mut rng, SYMBOLS),
        ];
        while chars.len() < PASSWORD_LENGTH {
            chars.push(random_char(&mut rng, &pool));
        }
        chars.shuffle(&mut rng);
        chars.into_iter().collect()
    }
}

impl CredentialIssuer for TempPasswordGenerator {
    fn issue(&self) -> String {
        self.generate()
    }
}

/// Picks one character from a non-empty ASCII pool.
fn random_char<R: Rng>(rng: &mut R, source: &str) -> char {
    let bytes: &[u8] = source.as_bytes();
    bytes[rng.random_range(0..bytes.len())] as char
}
