//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

/// Shown when a generation request fails for any reason.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Có lỗi xảy ra khi kết nối với AI. Vui lòng kiểm tra lại kết nối và thử lại.";

/// Shown when the deck cannot be assembled or written.
pub const EXPORT_FAILED_MESSAGE: &str = "Không thể xuất file PowerPoint. Vui lòng thử lại sau.";

#[derive(Error, Debug)]
pub enum DomainError {
    /// Network/service error or a response that does not match the lesson schema.
    #[error("Lesson generation failed: {0}")]
    Generation(String),

    /// Deck assembly or file write failed.
    #[error("Deck export failed: {0}")]
    Export(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Interactive prompt was cancelled or could not be rendered.
    #[error("Input error: {0}")]
    Input(String),
}

impl DomainError {
    /// Short localized message shown to the user. Details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            DomainError::Generation(_) => GENERATION_FAILED_MESSAGE.to_string(),
            DomainError::Export(_) => EXPORT_FAILED_MESSAGE.to_string(),
            DomainError::Config(msg) | DomainError::Input(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_details() {
        let err = DomainError::Generation("HTTP 503: upstream overloaded".into());
        assert_eq!(err.user_message(), GENERATION_FAILED_MESSAGE);
        assert!(err.to_string().contains("HTTP 503"));

        let err = DomainError::Export("disk full".into());
        assert_eq!(err.user_message(), EXPORT_FAILED_MESSAGE);
    }
}
