use std::sync::Arc;

use super::bookings::payment_failure_message;
use super::{settled, Outcome, Toast};
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus, PaymentStatus};
use crate::services::policy;
use crate::services::scope::ViewScope;
use crate::state::AppState;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DashboardStats {
    pub total_revenue: f64,
    pub active_rentals: usize,
    pub pending_requests: usize,
    pub total_inventory: usize,
}

impl DashboardStats {
    pub fn from_bookings(bookings: &[Booking], inventory: usize) -> Self {
        Self {
            total_revenue: bookings
                .iter()
                .filter(|b| b.payment_status == PaymentStatus::Paid)
                .map(|b| b.total_amount)
                .sum(),
            active_rentals: bookings
                .iter()
                .filter(|b| matches!(b.status, BookingStatus::Active | BookingStatus::Confirmed))
                .count(),
            pending_requests: bookings
                .iter()
                .filter(|b| b.status == BookingStatus::Pending)
                .count(),
            total_inventory: inventory,
        }
    }
}

/// Provider overview: earnings, rental activity and stock.
pub struct DashboardView {
    state: Arc<AppState>,
    scope: ViewScope,
    pub stats: DashboardStats,
    pub loading: bool,
    pub error: Option<String>,
}

impl DashboardView {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            scope: ViewScope::new(),
            stats: DashboardStats::default(),
            loading: true,
            error: None,
        }
    }

    pub fn show_subscription_banner(&self) -> bool {
        policy::needs_subscription(self.state.session.snapshot().user())
    }

    pub async fn load(&mut self) {
        let session = &self.state.session;
        let api = &self.state.api;
        let fetch = async {
            let bookings = session
                .authorized(|token| async move { api.get_bookings(&token).await })
                .await?;
            let tools = session
                .authorized(|token| async move { api.get_my_tools(&token).await })
                .await?;
            Ok::<_, AppError>((bookings, tools))
        };

        let res = self.scope.run(fetch).await;
        let Some(res) = settled(res) else { return };
        match res {
            Ok((bookings, tools)) => {
                self.stats = DashboardStats::from_bookings(&bookings, tools.len());
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load dashboard data");
                self.error = Some("Failed to load dashboard data".to_string());
            }
        }
        self.loading = false;
    }
}

/// Call to action for providers without an active subscription.
pub struct SubscriptionBanner {
    state: Arc<AppState>,
    scope: ViewScope,
    pub processing: bool,
}

impl SubscriptionBanner {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            scope: ViewScope::new(),
            processing: false,
        }
    }

    pub fn visible(&self) -> bool {
        policy::needs_subscription(self.state.session.snapshot().user())
    }

    pub async fn subscribe(&mut self) -> Outcome {
        if self.processing {
            return Outcome::none();
        }
        self.processing = true;
        let res = self
            .scope
            .run(self.state.payments.subscribe(&self.state.session))
            .await;
        let Some(res) = settled(res) else {
            return Outcome::none();
        };
        self.processing = false;
        match res {
            Ok(()) => Outcome::toast(Toast::success("Subscription activated successfully!")),
            Err(e) => Outcome::toast(Toast::error(payment_failure_message(&e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(status: &str, payment_status: &str, total: &str) -> Booking {
        serde_json::from_value(serde_json::json!({
            "id": "b",
            "quantity": 1,
            "start_datetime": "2024-01-01T00:00:00Z",
            "end_datetime": "2024-01-02T00:00:00Z",
            "total_amount": total,
            "status": status,
            "payment_status": payment_status,
            "payment_method": "razorpay",
        }))
        .unwrap()
    }

    #[test]
    fn test_stats_from_bookings() {
        let bookings = vec![
            booking("active", "paid", "1500.00"),
            booking("returned", "paid", "250.50"),
            booking("confirmed", "pending", "900.00"),
            booking("pending", "pending", "300.00"),
            booking("cancelled", "refunded", "700.00"),
        ];
        let stats = DashboardStats::from_bookings(&bookings, 4);
        assert_eq!(stats.total_revenue, 1750.5);
        assert_eq!(stats.active_rentals, 2);
        assert_eq!(stats.pending_requests, 1);
        assert_eq!(stats.total_inventory, 4);
    }
}
