//! Natural-language metadata

use super::{Language, Plugin};

pub struct English;

impl Plugin for English {
    fn display_name(&self) -> &str {
        "English"
    }
}

impl Language for English {
    fn language(&self) -> &str {
        "en"
    }

    fn preferred_canonicizers(&self) -> &[&'static str] {
        &["unify_case", "normalize_whitespace"]
    }

    fn preferred_event_drivers(&self) -> &[&'static str] {
        &["words"]
    }
}

/// Any language; character-level processing only
pub struct Generic;

impl Plugin for Generic {
    fn display_name(&self) -> &str {
        "Generic"
    }

    fn tooltip(&self) -> &str {
        "Language-independent processing"
    }
}

impl Language for Generic {
    fn language(&self) -> &str {
        "und"
    }

    fn preferred_event_drivers(&self) -> &[&'static str] {
        &["character_ngrams"]
    }
}
