use std::sync::Arc;

use super::{settled, Outcome, Toast};
use crate::errors::AppError;
use crate::models::Booking;
use crate::services::policy;
use crate::services::scope::ViewScope;
use crate::state::AppState;

/// Actions the signed-in user may take on a booking row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowActions {
    pub confirm: bool,
    pub cancel: bool,
    pub pay: bool,
}

pub struct BookingsView {
    state: Arc<AppState>,
    scope: ViewScope,
    pub bookings: Vec<Booking>,
    pub loading: bool,
    pub error: Option<String>,
}

impl BookingsView {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            scope: ViewScope::new(),
            bookings: Vec::new(),
            loading: true,
            error: None,
        }
    }

    pub async fn load(&mut self) {
        if !self.state.session.snapshot().is_authenticated() {
            self.loading = false;
            return;
        }
        let api = &self.state.api;
        let res = self
            .scope
            .run(
                self.state
                    .session
                    .authorized(|token| async move { api.get_bookings(&token).await }),
            )
            .await;
        let Some(res) = settled(res) else { return };
        match res {
            Ok(bookings) => {
                self.bookings = bookings;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load bookings");
                self.error = Some("Failed to load bookings".to_string());
            }
        }
        self.loading = false;
    }

    pub fn find(&self, id: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    pub fn actions(&self, booking: &Booking) -> RowActions {
        let session = self.state.session.snapshot();
        let user = session.user();
        RowActions {
            confirm: policy::can_confirm(user, booking),
            cancel: policy::can_cancel(user, booking),
            pay: policy::can_pay(user, booking),
        }
    }

    pub fn cancel_label(&self) -> &'static str {
        policy::cancel_label(self.state.session.snapshot().user())
    }

    /// Shop owner accepts a pending request.
    pub async fn confirm(&mut self, id: &str) -> Outcome {
        let api = &self.state.api;
        let res = self
            .scope
            .run(
                self.state
                    .session
                    .authorized(|token| async move { api.confirm_booking(&token, id).await }),
            )
            .await;
        let Some(res) = settled(res) else {
            return Outcome::none();
        };
        match res {
            Ok(booking) => {
                tracing::info!(booking_id = id, status = booking.status.as_str(), "booking confirmed");
                self.load().await;
                Outcome::toast(Toast::success("Booking confirmed"))
            }
            Err(e) => Outcome::toast(Toast::error(format!("Failed to authorize: {e}"))),
        }
    }

    pub async fn cancel(&mut self, id: &str) -> Outcome {
        let api = &self.state.api;
        let res = self
            .scope
            .run(
                self.state
                    .session
                    .authorized(|token| async move { api.cancel_booking(&token, id).await }),
            )
            .await;
        let Some(res) = settled(res) else {
            return Outcome::none();
        };
        match res {
            Ok(_) => {
                tracing::info!(booking_id = id, "booking cancelled");
                self.load().await;
                Outcome::toast(Toast::success("Booking cancelled"))
            }
            Err(e) => Outcome::toast(Toast::error(format!("Failed to cancel booking: {e}"))),
        }
    }

    /// Runs the checkout for a confirmed, unpaid booking and reloads on
    /// success.
    pub async fn pay(&mut self, id: &str) -> Outcome {
        let Some(booking) = self.find(id).cloned() else {
            return Outcome::toast(Toast::error("Booking not found"));
        };
        if !self.actions(&booking).pay {
            return Outcome::toast(Toast::error("This booking cannot be paid online"));
        }

        let res = self
            .scope
            .run(self.state.payments.pay_booking(&self.state.session, &booking))
            .await;
        let Some(res) = settled(res) else {
            return Outcome::none();
        };
        match res {
            Ok(()) => {
                self.load().await;
                Outcome::toast(Toast::success("Payment successful! Booking activated."))
            }
            Err(e) => Outcome::toast(Toast::error(payment_failure_message(&e))),
        }
    }
}

pub(crate) fn payment_failure_message(e: &AppError) -> String {
    let message = e.to_string();
    if message.trim().is_empty() {
        "Failed to initiate payment".to_string()
    } else {
        message
    }
}
