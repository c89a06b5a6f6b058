//! Cryptographic operations for Bitcoin key and address generation.
//!
//! This module provides:
//! - Base58Check encoding
//! - secp256k1 key derivation
//! - P2PKH address and WIF derivation

pub mod base58;

mod address;
mod keypair;

pub use address::Address;
pub use keypair::{KeyDeriver, Keypair, PublicKeyPoint};

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::ResourceError;

/// Draws 32 bytes from the operating system's secure random source.
pub fn random_seed() -> Result<[u8; 32], ResourceError> {
    let mut seed = [0u8; 32];
    OsRng.try_fill_bytes(&mut seed)?;
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_seed_is_not_constant() {
        let a = random_seed().unwrap();
        let b = random_seed().unwrap();
        assert_ne!(a, b);
    }
}
