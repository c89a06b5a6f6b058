//! Key derivation on secp256k1.

use secp256k1::{PublicKey, Secp256k1, SecretKey, SignOnly};

use crate::crypto::base58;
use crate::error::{CurveError, EncodingError};
use crate::network::NetworkParameters;

/// A secp256k1 point in affine coordinates, each axis exactly 32 bytes
/// big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKeyPoint {
    x: [u8; 32],
    y: [u8; 32],
}

impl PublicKeyPoint {
    /// Builds a point from big-endian coordinate slices.
    ///
    /// Coordinates whose natural serialization is shorter than 32 bytes are
    /// left-padded with zeros; longer ones are rejected. Rejecting short
    /// coordinates instead would discard valid keys (roughly one in 128 has
    /// a leading zero byte on some axis).
    pub fn from_coordinates(x: &[u8], y: &[u8]) -> Result<Self, CurveError> {
        Ok(Self {
            x: Self::pad(x, 'x')?,
            y: Self::pad(y, 'y')?,
        })
    }

    fn pad(bytes: &[u8], axis: char) -> Result<[u8; 32], CurveError> {
        if bytes.len() > 32 {
            return Err(CurveError::CoordinateTooLong {
                axis,
                len: bytes.len(),
            });
        }
        let mut out = [0u8; 32];
        out[32 - bytes.len()..].copy_from_slice(bytes);
        Ok(out)
    }

    pub fn x(&self) -> &[u8; 32] {
        &self.x
    }

    pub fn y(&self) -> &[u8; 32] {
        &self.y
    }

    /// Standard uncompressed point encoding: `0x04 || x || y`.
    pub fn uncompressed(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&self.x);
        out[33..65].copy_from_slice(&self.y);
        out
    }
}

/// Owns the curve context. One per worker; the context is read-only after
/// construction.
pub struct KeyDeriver {
    secp: Secp256k1<SignOnly>,
}

impl KeyDeriver {
    pub fn new() -> Self {
        Self {
            secp: Secp256k1::signing_only(),
        }
    }

    /// Derives the keypair for a 32-byte secret scalar.
    ///
    /// Scalars outside `[1, n)` are rejected rather than reduced: a reduced
    /// scalar would print a private key that standard wallets map to a
    /// different address.
    pub fn derive(&self, secret: [u8; 32]) -> Result<Keypair, CurveError> {
        let secret_key = SecretKey::from_slice(&secret).map_err(CurveError::InvalidScalar)?;
        let public_key = PublicKey::from_secret_key(&self.secp, &secret_key);
        let serialized = public_key.serialize_uncompressed();
        let public = PublicKeyPoint::from_coordinates(&serialized[1..33], &serialized[33..65])?;
        Ok(Keypair { secret, public })
    }
}

impl Default for KeyDeriver {
    fn default() -> Self {
        Self::new()
    }
}

/// A private key and its derived public point.
#[derive(Debug, Clone)]
pub struct Keypair {
    secret: [u8; 32],
    public: PublicKeyPoint,
}

impl Keypair {
    /// Returns the private key as a hex string.
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.secret)
    }

    /// Returns the private key bytes.
    pub fn private_key_bytes(&self) -> &[u8; 32] {
        &self.secret
    }

    /// Returns the derived public point.
    pub fn public_key(&self) -> &PublicKeyPoint {
        &self.public
    }

    /// Encodes the private key in Wallet Import Format:
    /// `Base58Check(wif_version || secret)`.
    pub fn to_wif(&self, network: &NetworkParameters) -> Result<String, EncodingError> {
        let mut payload = [0u8; 33];
        payload[0] = network.wif_version;
        payload[1..].copy_from_slice(&self.secret);
        base58::encode_check(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Network;

    fn secret_one() -> [u8; 32] {
        let mut s = [0u8; 32];
        s[31] = 1;
        s
    }

    #[test]
    fn test_generator_point_for_secret_one() {
        let deriver = KeyDeriver::new();
        let keypair = deriver.derive(secret_one()).unwrap();
        assert_eq!(
            hex::encode(keypair.public_key().x()),
            "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert_eq!(
            hex::encode(keypair.public_key().y()),
            "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
        );
    }

    #[test]
    fn test_wif_for_secret_one() {
        let deriver = KeyDeriver::new();
        let keypair = deriver.derive(secret_one()).unwrap();
        let params = Network::Bitcoin.parameters();
        assert_eq!(
            keypair.to_wif(&params).unwrap(),
            "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf"
        );
    }

    #[test]
    fn test_zero_scalar_rejected() {
        let deriver = KeyDeriver::new();
        assert!(matches!(
            deriver.derive([0u8; 32]),
            Err(CurveError::InvalidScalar(_))
        ));
    }

    #[test]
    fn test_above_order_scalar_rejected() {
        let deriver = KeyDeriver::new();
        assert!(deriver.derive([0xff; 32]).is_err());
    }

    #[test]
    fn test_coordinate_padding() {
        let point = PublicKeyPoint::from_coordinates(&[0xab; 31], &[0xcd; 30]).unwrap();
        assert_eq!(point.x()[0], 0);
        assert_eq!(point.x()[1], 0xab);
        assert_eq!(point.y()[0], 0);
        assert_eq!(point.y()[1], 0);
        assert_eq!(point.y()[2], 0xcd);

        let encoded = point.uncompressed();
        assert_eq!(encoded.len(), 65);
        assert_eq!(encoded[0], 0x04);
        assert_eq!(encoded[1], 0);
        assert_eq!(encoded[2], 0xab);
    }

    #[test]
    fn test_overlong_coordinate_rejected() {
        assert!(PublicKeyPoint::from_coordinates(&[1; 33], &[1; 32]).is_err());
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let deriver = KeyDeriver::new();
        let a = deriver.derive(secret_one()).unwrap();
        let b = KeyDeriver::new().derive(secret_one()).unwrap();
        assert_eq!(a.public_key(), b.public_key());
        assert_eq!(a.private_key_hex(), b.private_key_hex());
    }
}
