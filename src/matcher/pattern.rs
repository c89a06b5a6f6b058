//! Pattern matching implementation.

use std::str::FromStr;

use crate::crypto::base58::ALPHABET;
use crate::crypto::Address;

/// Where in the address body the pattern may match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Match must begin at the first character of the address body.
    #[default]
    Anchored,
    /// Match may occur anywhere in the address body.
    Anywhere,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anchored" | "prefix" | "start" => Ok(MatchMode::Anchored),
            "anywhere" | "contains" | "any" => Ok(MatchMode::Anywhere),
            _ => Err(format!("Unknown match mode: {}", s)),
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::Anchored => write!(f, "anchored"),
            MatchMode::Anywhere => write!(f, "anywhere"),
        }
    }
}

/// Result of a pattern match operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Match,
    NoMatch,
}

impl MatchResult {
    #[inline]
    pub fn is_match(self) -> bool {
        matches!(self, MatchResult::Match)
    }
}

/// A compiled pattern for efficient matching.
#[derive(Debug, Clone)]
pub struct Pattern {
    /// The pattern string, lowercased when matching case-insensitively.
    pattern: String,
    mode: MatchMode,
    case_sensitive: bool,
}

impl Pattern {
    /// Creates a new pattern.
    pub fn new(pattern: impl Into<String>, mode: MatchMode, case_sensitive: bool) -> Self {
        let pattern = pattern.into();
        let pattern = if case_sensitive {
            pattern
        } else {
            pattern.to_lowercase()
        };

        Self {
            pattern,
            mode,
            case_sensitive,
        }
    }

    /// Returns the pattern string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the match mode.
    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Matches an address body against this pattern.
    #[inline]
    pub fn matches(&self, address: &Address) -> MatchResult {
        let matched = if self.case_sensitive {
            self.matches_body(address.body())
        } else {
            self.matches_body(&address.body().to_lowercase())
        };

        if matched {
            MatchResult::Match
        } else {
            MatchResult::NoMatch
        }
    }

    #[inline]
    fn matches_body(&self, body: &str) -> bool {
        match self.mode {
            MatchMode::Anchored => body.starts_with(&self.pattern),
            MatchMode::Anywhere => body.contains(&self.pattern),
        }
    }

    /// Returns the estimated number of attempts to find an anchored match.
    ///
    /// Each base58 position has 58 possible symbols; case-insensitive
    /// matching accepts every symbol that folds to the same lowercase
    /// letter, which roughly halves the work per letter.
    pub fn estimated_difficulty(&self) -> u64 {
        let mut difficulty = 1f64;
        for c in self.pattern.chars() {
            let accepted = if self.case_sensitive {
                1
            } else {
                ALPHABET
                    .iter()
                    .filter(|&&s| (s as char).to_ascii_lowercase() == c.to_ascii_lowercase())
                    .count()
                    .max(1)
            };
            difficulty *= 58.0 / accepted as f64;
        }
        difficulty as u64
    }

    /// Returns a human-readable difficulty estimate.
    pub fn difficulty_description(&self) -> String {
        let diff = self.estimated_difficulty();
        match diff {
            0..=1_000 => "Very Easy (< 1 second)".into(),
            1_001..=100_000 => "Easy (seconds)".into(),
            100_001..=10_000_000 => "Medium (minutes)".into(),
            10_000_001..=1_000_000_000 => "Hard (hours)".into(),
            _ => "Very Hard (days or more)".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{Address, KeyDeriver};
    use crate::network::Network;

    // A real mainnet address so the body accessor is exercised: secret key 1
    // derives 1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm (body EHNa6Q4...).
    fn fixture_address() -> Address {
        let mut secret = [0u8; 32];
        secret[31] = 1;
        let keypair = KeyDeriver::new().derive(secret).unwrap();
        Address::derive(keypair.public_key(), &Network::Bitcoin.parameters()).unwrap()
    }

    #[test]
    fn test_anchored_match_at_body_start() {
        let pattern = Pattern::new("EHNa", MatchMode::Anchored, true);
        assert!(pattern.matches(&fixture_address()).is_match());
    }

    #[test]
    fn test_anchored_rejects_interior_match() {
        // "HNa6" occurs in the body but not at its first character.
        let pattern = Pattern::new("HNa6", MatchMode::Anchored, true);
        assert!(!pattern.matches(&fixture_address()).is_match());
    }

    #[test]
    fn test_anywhere_accepts_interior_match() {
        let pattern = Pattern::new("HNa6", MatchMode::Anywhere, true);
        assert!(pattern.matches(&fixture_address()).is_match());
    }

    #[test]
    fn test_prefix_character_is_excluded_from_matching() {
        // The fixed '1' network prefix is not part of the match target.
        let pattern = Pattern::new("1EHNa", MatchMode::Anchored, true);
        assert!(!pattern.matches(&fixture_address()).is_match());
    }

    #[test]
    fn test_case_insensitive_match() {
        let pattern = Pattern::new("ehna", MatchMode::Anchored, false);
        assert!(pattern.matches(&fixture_address()).is_match());

        let sensitive = Pattern::new("ehna", MatchMode::Anchored, true);
        assert!(!sensitive.matches(&fixture_address()).is_match());
    }

    #[test]
    fn test_difficulty_case_sensitive() {
        let pattern = Pattern::new("Qq", MatchMode::Anchored, true);
        assert_eq!(pattern.estimated_difficulty(), 58 * 58);
    }

    #[test]
    fn test_difficulty_case_folding_halves_letters() {
        // Both 'q' and 'Q' are base58 symbols, so each folded position
        // accepts two of the 58.
        let pattern = Pattern::new("qq", MatchMode::Anchored, false);
        assert_eq!(pattern.estimated_difficulty(), 29 * 29);
    }
}
