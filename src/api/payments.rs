use reqwest::Method;
use serde_json::json;

use super::{ApiClient, Body};
use crate::errors::AppError;
use crate::models::{PaymentOrder, PaymentResponse, StatusMessage};

impl ApiClient {
    pub async fn create_payment(&self, token: &str, booking_id: &str) -> Result<PaymentOrder, AppError> {
        self.send(
            Method::POST,
            &format!("bookings/{booking_id}/create_payment/"),
            Some(token),
            Body::Empty,
        )
        .await
    }

    pub async fn verify_payment(
        &self,
        token: &str,
        booking_id: &str,
        payment: &PaymentResponse,
    ) -> Result<StatusMessage, AppError> {
        let body = Body::Json(json!({
            "razorpay_payment_id": payment.razorpay_payment_id,
            "razorpay_signature": payment.razorpay_signature,
        }));
        self.send(
            Method::POST,
            &format!("bookings/{booking_id}/verify_payment/"),
            Some(token),
            body,
        )
        .await
    }
}
