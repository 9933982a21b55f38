//! Single-key signing identity

use solana_sdk::{
    message::VersionedMessage,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::VersionedTransaction,
};
use std::fmt;

use crate::shared::errors::{AppError, SwapError};

/// Owns the trading keypair. Only the address and signing are exposed.
pub struct Wallet {
    keypair: Keypair,
}

impl Wallet {
    /// Derive the wallet from a base58 encoded 64-byte secret key
    pub fn from_base58(secret: &str) -> Result<Self, AppError> {
        let bytes = bs58::decode(secret.trim())
            .into_vec()
            .map_err(|e| AppError::WalletError(format!("Invalid private key format: {}", e)))?;

        let keypair = Keypair::from_bytes(&bytes)
            .map_err(|e| AppError::WalletError(format!("Failed to create keypair: {}", e)))?;

        Ok(Self { keypair })
    }

    pub fn from_keypair(keypair: Keypair) -> Self {
        Self { keypair }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    /// Sign a message, replacing whatever placeholder signatures it carried
    pub fn sign_transaction(&self, message: VersionedMessage) -> Result<VersionedTransaction, SwapError> {
        VersionedTransaction::try_new(message, &[&self.keypair])
            .map_err(|e| SwapError::SigningFailed(e.to_string()))
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet").field("pubkey", &self.pubkey()).finish()
    }
}
