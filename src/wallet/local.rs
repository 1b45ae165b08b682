// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Local ed25519 key provider.
//!
//! Signs with a 32-byte seed supplied through configuration. Intended for
//! development and automated environments where no interactive wallet is
//! available.

use std::sync::Arc;

use async_trait::async_trait;
use base64ct::{Base64, Encoding};
use data_encoding::HEXLOWER_PERMISSIVE;
use ring::signature::{Ed25519KeyPair, KeyPair};

use super::{TransactionSigner, WalletConnection, WalletError, WalletProvider};
use crate::algorand::{Address, PaymentTransaction, SignedTransaction};

/// Provider id of the local key provider.
pub const LOCAL_PROVIDER_ID: &str = "local-key";

const SEED_LEN: usize = 32;

/// Signer backed by an in-process ed25519 key.
pub struct LocalKeySigner {
    key_pair: Ed25519KeyPair,
    address: Address,
}

impl LocalKeySigner {
    /// Create a signer from a raw 32-byte seed.
    pub fn from_seed(seed: &[u8]) -> Result<Self, WalletError> {
        if seed.len() != SEED_LEN {
            return Err(WalletError::InvalidKey(format!(
                "seed must be {SEED_LEN} bytes, got {}",
                seed.len()
            )));
        }

        let key_pair = Ed25519KeyPair::from_seed_unchecked(seed)
            .map_err(|e| WalletError::InvalidKey(e.to_string()))?;
        let address = Address::from_slice(key_pair.public_key().as_ref())
            .map_err(|e| WalletError::InvalidKey(e.to_string()))?;

        Ok(Self { key_pair, address })
    }

    /// Parse a seed given as 64 hex characters or as base64.
    pub fn from_seed_str(raw: &str) -> Result<Self, WalletError> {
        let raw = raw.trim();
        let seed = if raw.len() == SEED_LEN * 2 {
            HEXLOWER_PERMISSIVE
                .decode(raw.as_bytes())
                .map_err(|e| WalletError::InvalidKey(format!("invalid hex seed: {e}")))?
        } else {
            Base64::decode_vec(raw)
                .map_err(|e| WalletError::InvalidKey(format!("invalid base64 seed: {e}")))?
        };
        Self::from_seed(&seed)
    }

    pub fn address(&self) -> Address {
        self.address
    }

    fn sign_one(&self, unsigned: &[u8]) -> Result<Vec<u8>, WalletError> {
        let txn = PaymentTransaction::decode(unsigned)
            .map_err(|e| WalletError::SigningFailed(e.to_string()))?;

        if txn.sender != self.address {
            return Err(WalletError::WrongSender {
                expected: self.address,
                actual: txn.sender,
            });
        }

        let message = txn
            .bytes_to_sign()
            .map_err(|e| WalletError::SigningFailed(e.to_string()))?;
        let signature = self.key_pair.sign(&message);

        SignedTransaction::new(txn, signature.as_ref())
            .and_then(|signed| signed.encode())
            .map_err(|e| WalletError::SigningFailed(e.to_string()))
    }
}

#[async_trait]
impl TransactionSigner for LocalKeySigner {
    async fn sign_transactions(&self, unsigned: &[Vec<u8>]) -> Result<Vec<Vec<u8>>, WalletError> {
        unsigned.iter().map(|txn| self.sign_one(txn)).collect()
    }
}

/// Wallet provider that always connects to the configured local key.
pub struct LocalKeyProvider {
    signer: Arc<LocalKeySigner>,
}

impl LocalKeyProvider {
    pub fn new(signer: LocalKeySigner) -> Self {
        Self {
            signer: Arc::new(signer),
        }
    }
}

#[async_trait]
impl WalletProvider for LocalKeyProvider {
    fn id(&self) -> &str {
        LOCAL_PROVIDER_ID
    }

    fn name(&self) -> &str {
        "Local Key"
    }

    async fn connect(&self) -> Result<WalletConnection, WalletError> {
        Ok(WalletConnection {
            address: self.signer.address(),
            signer: self.signer.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use ring::signature::{UnparsedPublicKey, ED25519};

    use super::*;
    use crate::algorand::SuggestedParams;

    const SEED_HEX: &str = "0101010101010101010101010101010101010101010101010101010101010101";

    fn params() -> SuggestedParams {
        SuggestedParams {
            fee: 0,
            min_fee: 1000,
            flat_fee: false,
            first_valid: 1,
            last_valid: 1001,
            genesis_id: "testnet-v1.0".to_string(),
            genesis_hash: [0u8; 32],
        }
    }

    #[test]
    fn seed_parsing_accepts_hex_and_base64() {
        let from_hex = LocalKeySigner::from_seed_str(SEED_HEX).unwrap();
        let from_b64 =
            LocalKeySigner::from_seed_str("AQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQE=").unwrap();
        assert_eq!(from_hex.address(), from_b64.address());
    }

    #[test]
    fn rejects_short_seed() {
        assert!(matches!(
            LocalKeySigner::from_seed(&[1u8; 16]),
            Err(WalletError::InvalidKey(_))
        ));
    }

    #[tokio::test]
    async fn signature_verifies_against_sender() {
        let signer = LocalKeySigner::from_seed_str(SEED_HEX).unwrap();
        let txn = PaymentTransaction::note_only(signer.address(), b"n".to_vec(), &params())
            .unwrap();

        let signed = signer
            .sign_transactions(&[txn.encode().unwrap()])
            .await
            .unwrap();
        assert_eq!(signed.len(), 1);

        let decoded = SignedTransaction::decode(&signed[0]).unwrap();
        assert_eq!(decoded.transaction, txn);

        let public_key = UnparsedPublicKey::new(&ED25519, signer.address().as_bytes().to_vec());
        public_key
            .verify(&txn.bytes_to_sign().unwrap(), &decoded.signature)
            .expect("signature verifies");
    }

    #[tokio::test]
    async fn refuses_foreign_sender() {
        let signer = LocalKeySigner::from_seed_str(SEED_HEX).unwrap();
        let other = Address::from_public_key([9u8; 32]);
        let txn = PaymentTransaction::note_only(other, Vec::new(), &params()).unwrap();

        let result = signer.sign_transactions(&[txn.encode().unwrap()]).await;
        assert!(matches!(result, Err(WalletError::WrongSender { .. })));
    }

    #[tokio::test]
    async fn provider_connects_to_local_account() {
        let signer = LocalKeySigner::from_seed_str(SEED_HEX).unwrap();
        let address = signer.address();
        let provider = LocalKeyProvider::new(signer);

        assert_eq!(provider.id(), LOCAL_PROVIDER_ID);
        let connection = provider.connect().await.unwrap();
        assert_eq!(connection.address, address);
    }
}
