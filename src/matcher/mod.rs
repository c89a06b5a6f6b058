//! Pattern matching for address bodies.
//!
//! Matching is performed against the address body (the text after the fixed
//! network prefix character), either anchored at the start of the body or
//! anywhere within it.

mod pattern;

pub use pattern::{MatchMode, MatchResult, Pattern};
