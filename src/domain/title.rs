use thiserror::Error;

pub const MAX_TITLE_LENGTH: usize = 100;

/// A validated question title.
#[derive(Debug, Clone)]
pub struct Title(String);

#[derive(Error, Debug)]
pub enum TitleParseError {
    #[error("empty")]
    Empty,
    #[error("too long")]
    TooLong,
}

impl Title {
    pub fn parse(input: &str) -> Result<Self, TitleParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(TitleParseError::Empty);
        }
        if trimmed.chars().count() > MAX_TITLE_LENGTH {
            return Err(TitleParseError::TooLong);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Title {
    type Error = TitleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Title::parse(&value)
    }
}
