use reqwest::Method;

use super::{ApiClient, Body};
use crate::errors::AppError;
use crate::models::{PaymentOrder, PaymentResponse, StatusMessage};

impl ApiClient {
    pub async fn create_subscription_order(&self, token: &str) -> Result<PaymentOrder, AppError> {
        self.send(
            Method::POST,
            "subscriptions/create_order/",
            Some(token),
            Body::Empty,
        )
        .await
    }

    pub async fn verify_subscription_payment(
        &self,
        token: &str,
        payment: &PaymentResponse,
    ) -> Result<StatusMessage, AppError> {
        self.send(
            Method::POST,
            "subscriptions/verify_payment/",
            Some(token),
            Body::json(payment)?,
        )
        .await
    }
}
