use serde::{Deserialize, Serialize};

use super::de;

/// Order created server-side, handed to the checkout overlay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentOrder {
    pub order_id: String,
    #[serde(deserialize_with = "de::decimal")]
    pub amount: f64,
    #[serde(default)]
    pub currency: Option<String>,
    pub key: String,
    #[serde(default, deserialize_with = "de::opt_id")]
    pub subscription_id: Option<String>,
}

/// What the checkout hands back on success.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentResponse {
    pub razorpay_payment_id: String,
    #[serde(default)]
    pub razorpay_order_id: Option<String>,
    pub razorpay_signature: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMessage {
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_order_without_currency() {
        let json = r#"{"order_id":"order_9","amount":200.0,"key":"rzp_test","subscription_id":"5f1e"}"#;
        let order: PaymentOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.currency, None);
        assert_eq!(order.amount, 200.0);
        assert_eq!(order.subscription_id.as_deref(), Some("5f1e"));
    }
}
