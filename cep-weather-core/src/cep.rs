//! Brazilian postal code (CEP) validation and normalization.

use std::fmt;

use thiserror::Error;

/// Characters accepted as separators inside a CEP and dropped on normalization.
const SEPARATORS: [char; 2] = ['-', ' '];

/// Number of digits in a CEP.
pub const CEP_LEN: usize = 8;

/// The input did not reduce to exactly eight ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid CEP '{0}': expected 8 digits, optionally separated by '-' or ' '")]
pub struct InvalidCep(pub String);

/// Returns `true` when `code`, once separators are removed, is exactly 8 ASCII digits.
pub fn is_valid(code: &str) -> bool {
    let digits = normalize(code);
    digits.len() == CEP_LEN && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Removes every hyphen and space from `code`.
///
/// Does not validate; call [`is_valid`] first when the 8-digit invariant matters.
pub fn normalize(code: &str) -> String {
    code.chars().filter(|c| !SEPARATORS.contains(c)).collect()
}

/// A validated, normalized CEP (eight ASCII digits).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cep(String);

impl Cep {
    pub fn parse(raw: &str) -> Result<Self, InvalidCep> {
        if !is_valid(raw) {
            return Err(InvalidCep(raw.to_string()));
        }
        Ok(Self(normalize(raw)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Conventional `NNNNN-NNN` rendering.
    pub fn formatted(&self) -> String {
        format!("{}-{}", &self.0[..5], &self.0[5..])
    }
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Cep {
    type Error = InvalidCep;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Cep::parse(value)
    }
}
