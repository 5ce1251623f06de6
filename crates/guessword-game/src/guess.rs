//! Local guess validation.

use std::fmt;

use guessword_protocol::WORD_LEN;

use crate::GameError;

/// A guess that passed the local shape check.
///
/// Holds the normalized (uppercase) text. The only way to build one is
/// [`Guess::parse`], so any `Guess` is exactly [`WORD_LEN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Guess(String);

impl Guess {
    /// Uppercases `text` and checks it is exactly five characters.
    ///
    /// Characters are counted, not bytes, and counted after uppercasing
    /// (so `"straß"` becomes `"STRASS"` and is rejected). Nothing is
    /// trimmed.
    ///
    /// # Errors
    /// Returns [`GameError::InvalidGuessShape`] with the normalized length.
    pub fn parse(text: &str) -> Result<Self, GameError> {
        let normalized = text.to_uppercase();
        let length = normalized.chars().count();
        if length != WORD_LEN {
            return Err(GameError::InvalidGuessShape { length });
        }
        Ok(Self(normalized))
    }

    /// Returns the normalized text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterates over the letters in order.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars()
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uppercases() {
        let guess = Guess::parse("crane").unwrap();
        assert_eq!(guess.as_str(), "CRANE");
    }

    #[test]
    fn test_parse_too_short_returns_shape_error() {
        assert_eq!(
            Guess::parse("cran"),
            Err(GameError::InvalidGuessShape { length: 4 })
        );
    }

    #[test]
    fn test_parse_too_long_returns_shape_error() {
        assert_eq!(
            Guess::parse("cranes"),
            Err(GameError::InvalidGuessShape { length: 6 })
        );
    }

    #[test]
    fn test_parse_empty_returns_shape_error() {
        assert_eq!(
            Guess::parse(""),
            Err(GameError::InvalidGuessShape { length: 0 })
        );
    }

    #[test]
    fn test_parse_does_not_trim() {
        assert!(Guess::parse(" CRAN").is_ok());
        assert!(Guess::parse(" CRANE").is_err());
    }

    #[test]
    fn test_parse_counts_chars_not_bytes() {
        // Five characters, more than five bytes.
        assert!(Guess::parse("ÉCLAT").is_ok());
    }

    #[test]
    fn test_parse_counts_after_uppercasing() {
        // 'ß' uppercases to "SS".
        assert_eq!(
            Guess::parse("straß"),
            Err(GameError::InvalidGuessShape { length: 6 })
        );
    }

    #[test]
    fn test_parse_does_not_judge_dictionary() {
        // Shape only; the engine decides whether "ZZZZZ" is a word.
        assert!(Guess::parse("zzzzz").is_ok());
    }
}
