//! P2PKH address derivation and representation.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::crypto::base58;
use crate::crypto::keypair::PublicKeyPoint;
use crate::error::EncodingError;
use crate::network::NetworkParameters;

/// A Base58Check-encoded pay-to-pubkey-hash address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    /// Derives the address for a public key.
    ///
    /// `RIPEMD160(SHA256(uncompressed pubkey))`, prefixed with the network's
    /// address version byte and Base58Check-encoded.
    pub fn derive(
        public_key: &PublicKeyPoint,
        network: &NetworkParameters,
    ) -> Result<Self, EncodingError> {
        let sha = Sha256::digest(public_key.uncompressed());
        let h160 = Ripemd160::digest(sha);

        let mut payload = [0u8; 21];
        payload[0] = network.address_version;
        payload[1..].copy_from_slice(&h160);

        base58::encode_check(&payload).map(Self)
    }

    /// Returns the full address text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the address body: everything after the leading network prefix
    /// character. Vanity patterns match against this, since the first
    /// character is fixed by the version byte.
    pub fn body(&self) -> &str {
        &self.0[1..]
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
