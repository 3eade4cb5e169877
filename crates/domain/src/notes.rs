use derive_more::{AsRef, Display};

#[derive(AsRef, Debug, Default, Display, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Notes(String);

impl Notes {
    pub const MAX_LEN: usize = 1000;

    pub fn new(notes: &str) -> Result<Self, NotesError> {
        let trimmed_notes = notes.trim();
        let len = trimmed_notes.chars().count();

        if len > Self::MAX_LEN {
            return Err(NotesError::TooLong(len));
        }

        Ok(Notes(trimmed_notes.to_string()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NotesError {
    #[error("Notes must be 1000 characters or fewer ({0} > 1000)")]
    TooLong(usize),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", Ok(Notes(String::new())))]
    #[case("  Leg day, felt strong  ", Ok(Notes("Leg day, felt strong".to_string())))]
    #[case(&"x".repeat(1000), Ok(Notes("x".repeat(1000))))]
    #[case(&"x".repeat(1001), Err(NotesError::TooLong(1001)))]
    fn test_notes_new(#[case] notes: &str, #[case] expected: Result<Notes, NotesError>) {
        assert_eq!(Notes::new(notes), expected);
    }

    #[test]
    fn test_notes_len() {
        assert!(Notes::new("").unwrap().is_empty());
        assert_eq!(Notes::new("abc").unwrap().len(), 3);
    }
}
