// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Algorand account addresses.
//!
//! An address is the 32-byte ed25519 public key of the account. Its text
//! form is the unpadded base32 encoding of the key followed by a 4-byte
//! checksum (the last four bytes of the key's SHA-512/256 digest).

use std::fmt;
use std::str::FromStr;

use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha512_256};

/// Length of the raw public key.
pub const PUBLIC_KEY_LEN: usize = 32;

const CHECKSUM_LEN: usize = 4;

/// Length of the base32 text form.
pub const ADDRESS_TEXT_LEN: usize = 58;

/// Algorand account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; PUBLIC_KEY_LEN]);

impl Address {
    /// Wrap a raw ed25519 public key.
    pub const fn from_public_key(public_key: [u8; PUBLIC_KEY_LEN]) -> Self {
        Self(public_key)
    }

    /// Build an address from a public key slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressError> {
        let key: [u8; PUBLIC_KEY_LEN] = bytes
            .try_into()
            .map_err(|_| AddressError::InvalidLength(bytes.len()))?;
        Ok(Self(key))
    }

    /// The raw public key.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.0
    }

    /// Abbreviated form for display, e.g. `ABCD...WXYZ`.
    pub fn short(&self) -> String {
        let full = self.to_string();
        format!("{}...{}", &full[..4], &full[full.len() - 4..])
    }

    fn checksum(public_key: &[u8]) -> [u8; CHECKSUM_LEN] {
        let digest = Sha512_256::digest(public_key);
        let mut out = [0u8; CHECKSUM_LEN];
        out.copy_from_slice(&digest[digest.len() - CHECKSUM_LEN..]);
        out
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bytes = Vec::with_capacity(PUBLIC_KEY_LEN + CHECKSUM_LEN);
        bytes.extend_from_slice(&self.0);
        bytes.extend_from_slice(&Self::checksum(&self.0));
        f.write_str(&BASE32_NOPAD.encode(&bytes))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != ADDRESS_TEXT_LEN {
            return Err(AddressError::InvalidLength(s.len()));
        }

        let decoded = BASE32_NOPAD
            .decode(s.as_bytes())
            .map_err(|e| AddressError::InvalidEncoding(e.to_string()))?;

        let (key, checksum) = decoded.split_at(PUBLIC_KEY_LEN);
        if checksum != Self::checksum(key) {
            return Err(AddressError::ChecksumMismatch);
        }

        Self::from_slice(key)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors produced while parsing addresses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("Invalid address length: {0}")]
    InvalidLength(usize),

    #[error("Invalid address encoding: {0}")]
    InvalidEncoding(String),

    #[error("Address checksum mismatch")]
    ChecksumMismatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_address_has_known_text_form() {
        let zero = Address::from_public_key([0u8; 32]);
        assert_eq!(
            zero.to_string(),
            "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAY5HFKQ"
        );
    }

    #[test]
    fn parses_its_own_text_form() {
        let addr = Address::from_public_key([7u8; 32]);
        let text = addr.to_string();
        assert_eq!(text.len(), ADDRESS_TEXT_LEN);
        assert_eq!(text.parse::<Address>().unwrap(), addr);
    }

    #[test]
    fn rejects_bad_checksum() {
        let mut text = Address::from_public_key([7u8; 32]).to_string();
        // Flip the last character to break the checksum.
        let last = text.pop().unwrap();
        text.push(if last == 'A' { 'B' } else { 'A' });
        assert!(matches!(
            text.parse::<Address>(),
            Err(AddressError::ChecksumMismatch) | Err(AddressError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            "ABC".parse::<Address>(),
            Err(AddressError::InvalidLength(3))
        );
    }

    #[test]
    fn short_form_keeps_edges() {
        let addr = Address::from_public_key([0u8; 32]);
        assert_eq!(addr.short(), "AAAA...HFKQ");
    }

    #[test]
    fn serde_uses_text_form() {
        let addr = Address::from_public_key([9u8; 32]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{addr}\""));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
