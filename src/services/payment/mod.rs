//! Checkout bridge: turns a backend payment order into a checkout session
//! and reports success only once the backend has verified the signature.

pub mod razorpay;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::OnceCell;

use crate::api::ApiClient;
use crate::errors::AppError;
use crate::models::{Booking, PaymentOrder, PaymentResponse, User};
use crate::services::session::SessionStore;

pub const VERIFICATION_FAILED: &str = "Payment verification failed";
pub const CANCELLED_BY_USER: &str = "Payment cancelled by user";

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Prefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

impl Prefill {
    pub fn for_user(user: Option<&User>) -> Self {
        match user {
            Some(u) => Self {
                name: u.display_name(),
                email: u.email.clone(),
                contact: u.phone.clone().unwrap_or_default(),
            },
            None => Self::default(),
        }
    }
}

/// What the checkout overlay is opened with. `amount` is in paise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckoutOptions {
    pub key: String,
    pub amount: u64,
    pub currency: String,
    pub order_id: String,
    pub name: String,
    pub description: String,
    pub prefill: Prefill,
}

impl CheckoutOptions {
    /// Booking orders already carry the amount in paise.
    pub fn for_booking(order: &PaymentOrder, booking: &Booking, user: Option<&User>) -> Self {
        Self {
            key: order.key.clone(),
            amount: order.amount.round().max(0.0) as u64,
            currency: order.currency.clone().unwrap_or_else(|| "INR".to_string()),
            order_id: order.order_id.clone(),
            name: "Toolsy Rental".to_string(),
            description: format!("Payment for {}", booking.tool_name()),
            prefill: Prefill::for_user(user),
        }
    }

    /// Subscription orders report rupees.
    pub fn for_subscription(order: &PaymentOrder, user: Option<&User>) -> Self {
        Self {
            key: order.key.clone(),
            amount: (order.amount * 100.0).round().max(0.0) as u64,
            currency: "INR".to_string(),
            order_id: order.order_id.clone(),
            name: "Toolsy Provider Subscription".to_string(),
            description: "30 Days Access to List Tools".to_string(),
            prefill: Prefill::for_user(user),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    Completed(PaymentResponse),
    Dismissed,
    Failed(String),
}

/// A loaded checkout overlay.
#[async_trait]
pub trait Checkout: Send + Sync {
    async fn open(&self, options: &CheckoutOptions) -> CheckoutOutcome;
}

/// Fetches the checkout script and hands back the overlay it provides.
#[async_trait]
pub trait CheckoutLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn Checkout>, AppError>;
}

pub struct PaymentBridge {
    api: ApiClient,
    loader: Arc<dyn CheckoutLoader>,
    checkout: OnceCell<Option<Arc<dyn Checkout>>>,
}

impl PaymentBridge {
    pub fn new(api: ApiClient, loader: Arc<dyn CheckoutLoader>) -> Self {
        Self {
            api,
            loader,
            checkout: OnceCell::new(),
        }
    }

    /// Loads the checkout script once; concurrent callers share the load
    /// and its outcome.
    pub async fn ensure_loaded(&self) -> Result<Arc<dyn Checkout>, AppError> {
        let loaded = self
            .checkout
            .get_or_init(|| async {
                match self.loader.load().await {
                    Ok(checkout) => Some(checkout),
                    Err(e) => {
                        tracing::error!(error = %e, "checkout script failed to load");
                        None
                    }
                }
            })
            .await;
        loaded.clone().ok_or(AppError::CheckoutUnavailable)
    }

    pub async fn pay_booking(&self, session: &SessionStore, booking: &Booking) -> Result<(), AppError> {
        let checkout = self.ensure_loaded().await?;
        let api = &self.api;
        let booking_id = booking.id.as_str();

        let order = session
            .authorized(|token| async move { api.create_payment(&token, booking_id).await })
            .await?;
        tracing::info!(booking_id, order_id = %order.order_id, "payment order created");

        let options = CheckoutOptions::for_booking(&order, booking, session.user().as_ref());
        let payment = completed(checkout.open(&options).await)?;
        let payment = &payment;

        session
            .authorized(|token| async move { api.verify_payment(&token, booking_id, payment).await })
            .await
            .map_err(|e| {
                tracing::warn!(booking_id, error = %e, "payment verification rejected");
                AppError::Payment(VERIFICATION_FAILED.to_string())
            })?;

        tracing::info!(booking_id, "booking payment verified");
        Ok(())
    }

    /// Pays for a provider subscription and refreshes the user so the new
    /// status is visible.
    pub async fn subscribe(&self, session: &SessionStore) -> Result<(), AppError> {
        let checkout = self.ensure_loaded().await?;
        let api = &self.api;

        let order = session
            .authorized(|token| async move { api.create_subscription_order(&token).await })
            .await?;

        let options = CheckoutOptions::for_subscription(&order, session.user().as_ref());
        let mut payment = completed(checkout.open(&options).await)?;
        if payment.razorpay_order_id.is_none() {
            payment.razorpay_order_id = Some(order.order_id.clone());
        }
        let payment = &payment;

        session
            .authorized(|token| async move { api.verify_subscription_payment(&token, payment).await })
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "subscription verification rejected");
                AppError::Payment(VERIFICATION_FAILED.to_string())
            })?;

        tracing::info!(order_id = %order.order_id, "subscription activated");
        if let Err(e) = session.refresh_user().await {
            tracing::warn!(error = %e, "failed to refresh user after subscription");
        }
        Ok(())
    }
}

/// Dismissal and gateway failure end the attempt the same way a failed
/// verification does.
fn completed(outcome: CheckoutOutcome) -> Result<PaymentResponse, AppError> {
    match outcome {
        CheckoutOutcome::Completed(payment) => Ok(payment),
        CheckoutOutcome::Dismissed => Err(AppError::Payment(CANCELLED_BY_USER.to_string())),
        CheckoutOutcome::Failed(reason) if reason.trim().is_empty() => {
            Err(AppError::Payment("Payment failed".to_string()))
        }
        CheckoutOutcome::Failed(reason) => Err(AppError::Payment(reason)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct NeverCheckout;

    #[async_trait]
    impl Checkout for NeverCheckout {
        async fn open(&self, _options: &CheckoutOptions) -> CheckoutOutcome {
            CheckoutOutcome::Dismissed
        }
    }

    struct CountingLoader {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl CheckoutLoader for CountingLoader {
        async fn load(&self) -> Result<Arc<dyn Checkout>, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if self.fail {
                Err(AppError::Network("connection refused".to_string()))
            } else {
                Ok(Arc::new(NeverCheckout))
            }
        }
    }

    fn bridge(fail: bool) -> (PaymentBridge, Arc<CountingLoader>) {
        let loader = Arc::new(CountingLoader {
            calls: AtomicUsize::new(0),
            fail,
        });
        let bridge = PaymentBridge::new(ApiClient::new("http://127.0.0.1:9"), loader.clone());
        (bridge, loader)
    }

    fn order(amount: f64, currency: Option<&str>) -> PaymentOrder {
        PaymentOrder {
            order_id: "order_1".to_string(),
            amount,
            currency: currency.map(str::to_string),
            key: "rzp_test_key".to_string(),
            subscription_id: None,
        }
    }

    #[tokio::test]
    async fn test_concurrent_loads_share_one_script_fetch() {
        let (bridge, loader) = bridge(false);
        let (a, b, c) = tokio::join!(bridge.ensure_loaded(), bridge.ensure_loaded(), bridge.ensure_loaded());
        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_load_failure_is_distinct_and_cached() {
        let (bridge, loader) = bridge(true);
        assert!(matches!(bridge.ensure_loaded().await, Err(AppError::CheckoutUnavailable)));
        assert!(matches!(bridge.ensure_loaded().await, Err(AppError::CheckoutUnavailable)));
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_load_failure_precedes_order_creation() {
        // The API origin is unreachable; a load failure must surface before
        // any request is attempted.
        let (bridge, _) = bridge(true);
        let storage = Arc::new(crate::db::MemoryStorage::new());
        let session = SessionStore::new(ApiClient::new("http://127.0.0.1:9"), storage);
        let err = bridge.subscribe(&session).await.unwrap_err();
        assert!(matches!(err, AppError::CheckoutUnavailable));
    }

    #[test]
    fn test_subscription_options_convert_rupees() {
        let options = CheckoutOptions::for_subscription(&order(200.0, None), None);
        assert_eq!(options.amount, 20_000);
        assert_eq!(options.currency, "INR");
        assert_eq!(options.name, "Toolsy Provider Subscription");
        assert_eq!(options.prefill, Prefill::default());
    }

    #[test]
    fn test_booking_options_keep_order_amount() {
        let booking: Booking = serde_json::from_value(serde_json::json!({
            "id": "b1",
            "tool": {"id": "t1", "name": "Hammer Drill", "price_per_day": "500.00"},
            "quantity": 1,
            "start_datetime": "2024-01-01T00:00:00Z",
            "end_datetime": "2024-01-03T00:00:00Z",
            "total_amount": "1500.00",
            "status": "confirmed",
            "payment_status": "pending",
            "payment_method": "razorpay",
        }))
        .unwrap();
        let options = CheckoutOptions::for_booking(&order(150_000.0, Some("INR")), &booking, None);
        assert_eq!(options.amount, 150_000);
        assert_eq!(options.description, "Payment for Hammer Drill");
        assert_eq!(options.order_id, "order_1");
    }

    #[test]
    fn test_dismissal_and_failure_are_payment_errors() {
        assert_eq!(
            completed(CheckoutOutcome::Dismissed).unwrap_err().to_string(),
            CANCELLED_BY_USER
        );
        assert_eq!(
            completed(CheckoutOutcome::Failed("Card declined".to_string()))
                .unwrap_err()
                .to_string(),
            "Card declined"
        );
    }
}
