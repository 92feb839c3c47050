use thiserror::Error;

pub type SheetResult<T> = Result<T, SheetError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SheetError {
    #[error("Cannot insert at index {index}: the sheet has {len} rules")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Rule rejected by the stylesheet: '{rule}' ({reason})")]
    Rejected { rule: String, reason: String },

    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl SheetError {
    pub fn index_out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { index, len }
    }

    pub fn rejected(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            rule: rule.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}
