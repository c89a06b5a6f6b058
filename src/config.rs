//! Runtime configuration for the vanity address generator.

use clap::Parser;

use crate::crypto::base58;
use crate::error::ConfigError;
use crate::matcher::MatchMode;
use crate::network::Network;

/// Longest pattern worth accepting: the address body never exceeds this.
const MAX_PATTERN_LEN: usize = 34;

/// Bitcoin Vanity Address Generator
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Pattern to search for (base58 characters; no 0, O, I or l).
    /// Omit to derive a single random key/address pair and exit.
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Match the pattern anywhere in the address body instead of anchoring
    /// it at the first character after the network prefix
    #[arg(short, long, default_value = "false")]
    pub anywhere: bool,

    /// Case sensitive matching
    #[arg(short, long, default_value = "false")]
    pub case_sensitive: bool,

    /// Number of worker threads (default: number of CPU cores)
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// Target network: bitcoin or litecoin
    #[arg(short = 'n', long, default_value = "bitcoin")]
    pub network: Network,

    /// Progress report interval in seconds
    #[arg(short = 'r', long, default_value = "5")]
    pub report_interval: u64,

    /// Print periodic progress lines while searching
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

impl Config {
    /// Returns the number of workers, defaulting to CPU count
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get).max(1)
    }

    /// Returns the match mode selected by `--anywhere`
    pub fn match_mode(&self) -> MatchMode {
        if self.anywhere {
            MatchMode::Anywhere
        } else {
            MatchMode::Anchored
        }
    }

    /// Validates the configuration. Runs before any worker starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(ref pattern) = self.pattern else {
            return Ok(());
        };

        if pattern.is_empty() {
            return Err(ConfigError::EmptyPattern);
        }

        if pattern.chars().count() > MAX_PATTERN_LEN {
            return Err(ConfigError::PatternTooLong {
                max: MAX_PATTERN_LEN,
            });
        }

        // Report every offending character, once each, in input order.
        // Case-insensitive matching accepts a character if either of its
        // case variants is a base58 symbol.
        let mut invalid = String::new();
        for c in pattern.chars() {
            let valid = if self.case_sensitive {
                base58::is_alphabet_char(c)
            } else {
                base58::is_alphabet_char(c.to_ascii_lowercase())
                    || base58::is_alphabet_char(c.to_ascii_uppercase())
            };
            if !valid && !invalid.contains(c) {
                invalid.push(c);
            }
        }
        if !invalid.is_empty() {
            return Err(ConfigError::InvalidPatternChars(invalid));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_config(pattern: Option<&str>) -> Config {
        Config {
            pattern: pattern.map(Into::into),
            anywhere: false,
            case_sensitive: false,
            workers: None,
            network: Network::Bitcoin,
            report_interval: 5,
            verbose: false,
        }
    }

    #[test]
    fn test_valid_pattern() {
        let config = make_test_config(Some("Bit"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_no_pattern_is_valid() {
        assert!(make_test_config(None).validate().is_ok());
    }

    #[test]
    fn test_invalid_chars_are_listed() {
        let mut config = make_test_config(Some("B0O!t0"));
        config.case_sensitive = true;
        match config.validate() {
            Err(ConfigError::InvalidPatternChars(chars)) => assert_eq!(chars, "0O!"),
            other => panic!("expected InvalidPatternChars, got {:?}", other),
        }
    }

    #[test]
    fn test_case_insensitive_accepts_either_case() {
        // 'l' is not base58, but 'L' is; case-insensitive matching can
        // still satisfy it.
        let mut config = make_test_config(Some("lol"));
        assert!(config.validate().is_ok());

        config.case_sensitive = true;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert_eq!(
            make_test_config(Some("")).validate(),
            Err(ConfigError::EmptyPattern)
        );
    }

    #[test]
    fn test_overlong_pattern_rejected() {
        let long = "a".repeat(MAX_PATTERN_LEN + 1);
        assert!(make_test_config(Some(&long)).validate().is_err());
    }
}
