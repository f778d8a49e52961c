//! Event drivers: text → event sets

use super::{EventDriver, Plugin, PluginParameters};
use crate::error::{EventGenerationError, PluginError};
use crate::models::{Document, Event, EventSet};

fn labeled(document: &Document, events: Vec<Event>) -> EventSet {
    let set = EventSet::new(document.id.clone(), events);
    match &document.author {
        Some(author) => set.with_author(author.clone()),
        None => set,
    }
}

/// One event per whitespace-separated word
pub struct WordEventDriver;

impl Plugin for WordEventDriver {
    fn display_name(&self) -> &str {
        "Words"
    }

    fn tooltip(&self) -> &str {
        "Words (whitespace separated)"
    }
}

impl EventDriver for WordEventDriver {
    fn create_event_set(&self, document: &Document) -> Result<EventSet, EventGenerationError> {
        let events = document.text.split_whitespace().map(Event::from).collect();
        Ok(labeled(document, events))
    }
}

/// One event per character
pub struct CharacterEventDriver;

impl Plugin for CharacterEventDriver {
    fn display_name(&self) -> &str {
        "Characters"
    }
}

impl EventDriver for CharacterEventDriver {
    fn create_event_set(&self, document: &Document) -> Result<EventSet, EventGenerationError> {
        let events = document
            .text
            .chars()
            .map(|c| Event::new(c.encode_utf8(&mut [0; 4])))
            .collect();
        Ok(labeled(document, events))
    }
}

/// Overlapping character n-grams
pub struct CharacterNGramEventDriver {
    n: usize,
    name: String,
}

impl CharacterNGramEventDriver {
    pub const DEFAULT_N: usize = 2;

    pub fn new(n: usize) -> Result<Self, PluginError> {
        if n == 0 {
            return Err(PluginError::InvalidParameter {
                name: "n".to_string(),
                reason: "n-gram length must be at least 1".to_string(),
            });
        }
        Ok(Self {
            n,
            name: format!("Character {}-grams", n),
        })
    }

    /// Reads `n` (default 2)
    pub fn from_parameters(params: &PluginParameters) -> Result<Self, PluginError> {
        Self::new(params.positive_usize("n", Self::DEFAULT_N)?)
    }
}

impl Plugin for CharacterNGramEventDriver {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn tooltip(&self) -> &str {
        "Groups of N successive characters (sliding window)"
    }
}

impl EventDriver for CharacterNGramEventDriver {
    fn create_event_set(&self, document: &Document) -> Result<EventSet, EventGenerationError> {
        let chars: Vec<char> = document.text.chars().collect();
        if chars.len() < self.n {
            return Err(EventGenerationError {
                driver: self.name.clone(),
                document: document.id.clone(),
                reason: format!("text shorter than {} characters", self.n),
            });
        }
        let events = chars
            .windows(self.n)
            .map(|w| Event::from(w.iter().collect::<String>()))
            .collect();
        Ok(labeled(document, events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::ParameterValue;

    fn texts(set: &EventSet) -> Vec<&str> {
        set.iter().map(Event::as_str).collect()
    }

    #[test]
    fn test_words_carry_labels() {
        let doc = Document::new("d1", "the cat  sat").with_author("austen");
        let set = WordEventDriver.create_event_set(&doc).unwrap();

        assert_eq!(texts(&set), vec!["the", "cat", "sat"]);
        assert_eq!(set.document(), "d1");
        assert_eq!(set.author(), Some("austen"));
    }

    #[test]
    fn test_characters() {
        let set = CharacterEventDriver
            .create_event_set(&Document::new("d", "aé b"))
            .unwrap();
        assert_eq!(texts(&set), vec!["a", "é", " ", "b"]);
    }

    #[test]
    fn test_character_ngrams() {
        let driver = CharacterNGramEventDriver::new(2).unwrap();
        let set = driver.create_event_set(&Document::new("d", "abcd")).unwrap();
        assert_eq!(texts(&set), vec!["ab", "bc", "cd"]);
        assert_eq!(driver.display_name(), "Character 2-grams");
    }

    #[test]
    fn test_character_ngrams_short_text() {
        let driver = CharacterNGramEventDriver::new(5).unwrap();
        assert!(driver.create_event_set(&Document::new("d", "abc")).is_err());
    }

    #[test]
    fn test_character_ngrams_parameters() {
        let default = CharacterNGramEventDriver::from_parameters(&PluginParameters::new()).unwrap();
        assert_eq!(default.n, 2);

        let three = PluginParameters::new().with("n", ParameterValue::Integer(3));
        assert_eq!(CharacterNGramEventDriver::from_parameters(&three).unwrap().n, 3);

        let zero = PluginParameters::new().with("n", ParameterValue::Integer(0));
        assert!(CharacterNGramEventDriver::from_parameters(&zero).is_err());
    }
}
