//! # Quiz Seed Handling
//!
//! A [`Seed`] is the hex-encoded random value that deterministically
//! orders quiz questions for one attempt. Fresh seeds are 32 bytes of
//! OS randomness rendered as `0x` + 64 hex digits; anything matching
//! `0x` + 1-64 hex digits is accepted on input.

use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A `0x`-prefixed hex seed driving deterministic question ordering.
///
/// The same seed always yields the same ordering; the PRNG integer is
/// derived from the first four bytes of the hex payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Seed(String);

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl Seed {
    /// Accept a seed supplied by a client, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSeed`] unless the string is
    /// `0x` followed by 1-64 hex digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let payload = s
            .strip_prefix("0x")
            .ok_or_else(|| ValidationError::InvalidSeed(s.clone()))?;
        if payload.is_empty()
            || payload.len() > 64
            || !payload.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(ValidationError::InvalidSeed(s));
        }
        Ok(Self(s))
    }

    /// Generate a fresh seed from 32 bytes of cryptographically strong
    /// OS randomness.
    pub fn generate() -> Self {
        use std::fmt::Write;

        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        let mut out = String::with_capacity(2 + 64);
        out.push_str("0x");
        for b in bytes {
            write!(out, "{b:02x}").expect("writing to String cannot fail");
        }
        Self(out)
    }

    /// Derive the 32-bit PRNG seed from the first four bytes of the hex
    /// payload. A zero or absent value falls back to 1 so the generator
    /// is never seeded with its own fixed point.
    pub fn prng_seed(&self) -> u32 {
        let payload = &self.0[2..];
        let head = &payload[..payload.len().min(8)];
        match u32::from_str_radix(head, 16) {
            Ok(0) | Err(_) => 1,
            Ok(v) => v,
        }
    }

    /// Access the seed string value (including the `0x` prefix).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Seed {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
