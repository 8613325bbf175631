/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A string that is known to carry something other than whitespace.
///
/// Used for values that act as keys, such as the patient identifier. The text is kept exactly as
/// given: keys are compared byte for byte, so `" 1234"` and `"1234"` are different patients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Returns `Err(TextError::Empty)` if `input` is empty or only whitespace.
    pub fn new(input: impl Into<String>) -> Result<Self, TextError> {
        let input = input.into();
        if input.trim().is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(input))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_input_verbatim() {
        let text = NonEmptyText::new(" 14-2233-4455-6677").unwrap();
        assert_eq!(text.as_str(), " 14-2233-4455-6677");
        assert_eq!(text.into_string(), " 14-2233-4455-6677");
    }

    #[test]
    fn test_new_rejects_blank_input() {
        assert!(matches!(NonEmptyText::new(""), Err(TextError::Empty)));
        assert!(matches!(NonEmptyText::new("   \t"), Err(TextError::Empty)));
    }
}
