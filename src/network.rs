//! Network version-byte configuration.

use std::str::FromStr;

/// The version-byte pair selecting the target network.
///
/// Chosen once at startup and passed explicitly into the pipeline and the
/// search coordinator; never process-global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkParameters {
    /// Version byte prefixed to the RIPEMD-160 payload of an address.
    pub address_version: u8,
    /// Version byte prefixed to a private key in WIF.
    pub wif_version: u8,
}

/// Supported networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    #[default]
    Bitcoin,
    Litecoin,
}

impl Network {
    /// Returns the version-byte pair for this network.
    pub const fn parameters(self) -> NetworkParameters {
        match self {
            Network::Bitcoin => NetworkParameters {
                address_version: 0,
                wif_version: 128,
            },
            Network::Litecoin => NetworkParameters {
                address_version: 48,
                wif_version: 176,
            },
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bitcoin" | "btc" | "main" => Ok(Network::Bitcoin),
            "litecoin" | "ltc" => Ok(Network::Litecoin),
            _ => Err(format!("Unknown network: {}", s)),
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Bitcoin => write!(f, "bitcoin"),
            Network::Litecoin => write!(f, "litecoin"),
        }
    }
}
