use thiserror::Error;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    #[error("Invalid value for shorthand '{property}': '{value}' ({reason})")]
    InvalidShorthand {
        property: String,
        value: String,
        reason: String,
    },

    #[error("'{property}' is not supported. Use its longhand properties instead")]
    BannedProperty { property: String },

    #[error("Invalid media query syntax in '{query}': {reason}")]
    InvalidMediaQuery { query: String, reason: String },

    #[error("Invalid pseudo-class '{pseudo}': {reason}")]
    InvalidPseudo { pseudo: String, reason: String },

    #[error("Invalid style value for '{key}': {message}")]
    InvalidStyleValue { key: String, message: String },

    #[error("Unclosed function in value '{value}' of '{property}'")]
    UnclosedFunction { property: String, value: String },
}

impl CompileError {
    pub fn invalid_shorthand(
        property: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidShorthand {
            property: property.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn banned_property(property: impl Into<String>) -> Self {
        Self::BannedProperty {
            property: property.into(),
        }
    }

    pub fn invalid_media_query(query: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidMediaQuery {
            query: query.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_pseudo(pseudo: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPseudo {
            pseudo: pseudo.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_style_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidStyleValue {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn unclosed_function(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnclosedFunction {
            property: property.into(),
            value: value.into(),
        }
    }

    /// Errors that the validation mode may downgrade to a warning.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidShorthand { .. } | Self::UnclosedFunction { .. }
        )
    }
}
