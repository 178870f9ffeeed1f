//! Screen controllers. Each view holds its own form state, talks to the
//! backend through [`AppState`], and reports what the shell should show
//! next as an [`Outcome`].
//!
//! [`AppState`]: crate::state::AppState

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod dashboard;
pub mod navbar;
pub mod shops;
pub mod tool_form;
pub mod tools;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

/// What happened after a user action: an optional transient message and
/// an optional route to move to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub toast: Option<Toast>,
    pub navigate: Option<String>,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn toast(toast: Toast) -> Self {
        Self {
            toast: Some(toast),
            navigate: None,
        }
    }

    pub fn navigate(path: impl Into<String>) -> Self {
        Self {
            toast: None,
            navigate: Some(path.into()),
        }
    }

    pub fn then(mut self, path: impl Into<String>) -> Self {
        self.navigate = Some(path.into());
        self
    }

    pub fn error_message(&self) -> Option<&str> {
        self.toast
            .as_ref()
            .filter(|t| t.kind == ToastKind::Error)
            .map(|t| t.message.as_str())
    }
}

/// Submit bookkeeping shared by every form.
#[derive(Debug, Clone, Default)]
pub struct FormStatus {
    pub submitting: bool,
    pub error: Option<String>,
}

impl FormStatus {
    /// Rejects a second submit while the first is still in flight.
    pub fn begin(&mut self) -> Result<(), AppError> {
        if self.submitting {
            return Err(AppError::Validation(
                "A request is already in progress".to_string(),
            ));
        }
        self.submitting = true;
        self.error = None;
        Ok(())
    }

    pub fn finish(&mut self) {
        self.submitting = false;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.error = Some(message.into());
    }
}

/// `None` when the view unmounted before the call settled; the caller
/// must not touch its state in that case.
pub(crate) fn settled<T>(result: Result<T, AppError>) -> Option<Result<T, AppError>> {
    match result {
        Err(AppError::Cancelled) => {
            tracing::debug!("view unmounted, dropping late response");
            None
        }
        other => Some(other),
    }
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` (UTC) or a bare date
/// (midnight UTC).
pub fn parse_datetime(input: &str) -> Result<DateTime<Utc>, AppError> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::Validation(format!("Invalid date: {input}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime_formats() {
        let midnight = parse_datetime("2024-01-01").unwrap();
        assert_eq!(midnight.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert_eq!(parse_datetime("2024-01-01T00:00").unwrap(), midnight);
        assert_eq!(parse_datetime("2024-01-01T05:30:00+05:30").unwrap(), midnight);
        assert!(parse_datetime("tomorrow").is_err());
    }

    #[test]
    fn test_form_status_blocks_double_submit() {
        let mut status = FormStatus::default();
        status.begin().unwrap();
        assert!(status.begin().is_err());
        status.fail("nope");
        assert!(!status.submitting);
        assert_eq!(status.error.as_deref(), Some("nope"));
        status.begin().unwrap();
        assert!(status.error.is_none());
    }
}
