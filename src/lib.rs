//! # btc_vanity
//!
//! High-performance Bitcoin vanity address generator.
//!
//! ## Architecture
//!
//! - `crypto`: Base58Check encoding, key derivation, address/WIF pipeline
//! - `matcher`: Pattern matching against address bodies
//! - `worker`: Parallel search and worker pool management
//! - `network`: Version-byte configuration per network
//! - `config`: Runtime configuration
//! - `error`: Error taxonomy

pub mod config;
pub mod crypto;
pub mod error;
pub mod matcher;
pub mod network;
pub mod worker;

pub use config::Config;
pub use crypto::{Address, KeyDeriver, Keypair, PublicKeyPoint};
pub use error::Error;
pub use matcher::{MatchMode, MatchResult, Pattern};
pub use network::{Network, NetworkParameters};
pub use worker::{PoolWait, VanityResult, WorkerPool};
