//! Text canonicizers

use super::{Canonicizer, Plugin};

/// Lowercases the whole text
pub struct UnifyCase;

impl Plugin for UnifyCase {
    fn display_name(&self) -> &str {
        "Unify Case"
    }

    fn tooltip(&self) -> &str {
        "Converts all text to lower case"
    }
}

impl Canonicizer for UnifyCase {
    fn process(&self, text: &str) -> String {
        text.to_lowercase()
    }
}

/// Collapses whitespace runs into single spaces and trims the ends
pub struct NormalizeWhitespace;

impl Plugin for NormalizeWhitespace {
    fn display_name(&self) -> &str {
        "Normalize Whitespace"
    }

    fn tooltip(&self) -> &str {
        "Collapses runs of whitespace into a single space"
    }
}

impl Canonicizer for NormalizeWhitespace {
    fn process(&self, text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Removes punctuation characters
pub struct StripPunctuation;

impl Plugin for StripPunctuation {
    fn display_name(&self) -> &str {
        "Strip Punctuation"
    }

    fn tooltip(&self) -> &str {
        "Removes all punctuation"
    }
}

impl Canonicizer for StripPunctuation {
    fn process(&self, text: &str) -> String {
        text.chars().filter(|c| !c.is_ascii_punctuation()).collect()
    }
}
