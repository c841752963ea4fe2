use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    MissingField(&'static str),
    NegativeValue(&'static str),
    EmptyRecipients,
    InvalidId(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(name) => write!(f, "{name} is required and must not be empty"),
            Self::NegativeValue(name) => write!(f, "{name} must be >= 0"),
            Self::EmptyRecipients => f.write_str("recipients must contain at least one entry"),
            Self::InvalidId(raw) => write!(f, "invalid record id: {raw}"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Required-text check shared by the `New*`/`*Patch` validators. Mongoose-style
/// `required` semantics: absent and empty-string both fail.
pub(crate) fn require_text(name: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(name));
    }
    Ok(())
}

pub(crate) fn require_text_opt(
    name: &'static str,
    value: Option<&str>,
) -> Result<(), ValidationError> {
    match value {
        Some(v) => require_text(name, v),
        None => Ok(()),
    }
}

pub(crate) fn require_non_negative(name: &'static str, value: i64) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::NegativeValue(name));
    }
    Ok(())
}
