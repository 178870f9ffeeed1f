/// The single error type surfaced to views. `Display` is always the
/// human-readable message; callers must not rely on anything else.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("network error: {0}")]
    Network(String),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("{0}")]
    Payment(String),

    #[error("Razorpay SDK failed to load")]
    CheckoutUnavailable,

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("{0}")]
    Validation(String),

    #[error("request cancelled")]
    Cancelled,
}

impl AppError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Api { status: 401, .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            AppError::InvalidResponse(e.to_string())
        } else {
            AppError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_message_only() {
        let err = AppError::Api {
            status: 400,
            message: "Tool unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Tool unavailable");
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_checkout_unavailable_message() {
        assert_eq!(
            AppError::CheckoutUnavailable.to_string(),
            "Razorpay SDK failed to load"
        );
    }

    #[test]
    fn test_unauthorized_detection() {
        let err = AppError::Api {
            status: 401,
            message: "Given token not valid for any token type".to_string(),
        };
        assert!(err.is_unauthorized());
        assert!(!AppError::NotAuthenticated.is_unauthorized());
    }
}
