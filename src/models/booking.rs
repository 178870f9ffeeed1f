use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;
use super::shop::Shop;
use super::tool::Tool;
use super::user::User;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Active,
    Returned,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Active => "active",
            BookingStatus::Returned => "returned",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, BookingStatus::Returned | BookingStatus::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Razorpay,
    CashOnReturn,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Razorpay => "razorpay",
            PaymentMethod::CashOnReturn => "cash_on_return",
        }
    }

    /// Hint shown under the payment method picker.
    pub fn hint(&self) -> &'static str {
        match self {
            PaymentMethod::Razorpay => {
                "You will be asked to pay after the shop confirms your booking."
            }
            PaymentMethod::CashOnReturn => "Pay directly when you return the item.",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    #[serde(default)]
    pub renter: Option<User>,
    #[serde(default)]
    pub tool: Option<Tool>,
    #[serde(default)]
    pub shop: Option<Shop>,
    pub quantity: u32,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    #[serde(default, deserialize_with = "de::opt_decimal")]
    pub rental_price: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_decimal")]
    pub deposit_amount: Option<f64>,
    #[serde(deserialize_with = "de::decimal")]
    pub total_amount: f64,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub razorpay_order_id: Option<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub notes: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Booking {
    pub fn tool_name(&self) -> &str {
        self.tool.as_ref().map(|t| t.name.as_str()).unwrap_or("Unknown tool")
    }

    pub fn shop_name(&self) -> &str {
        self.shop
            .as_ref()
            .or_else(|| self.tool.as_ref().and_then(|t| t.shop.as_ref()))
            .map(|s| s.name.as_str())
            .unwrap_or("Unknown shop")
    }

    /// Owner id of the shop the booking belongs to, when the payload carries it.
    pub fn shop_owner_id(&self) -> Option<&str> {
        self.shop
            .as_ref()
            .or_else(|| self.tool.as_ref().and_then(|t| t.shop.as_ref()))
            .and_then(|s| s.owner.as_ref())
            .map(|o| o.id.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewBooking {
    pub tool_id: String,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub quantity: u32,
    pub payment_method: PaymentMethod,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_booking() {
        let json = r#"{
            "id": "b0000000-0000-4000-8000-000000000001",
            "tool": {"id": "t1", "name": "Ladder", "price_per_day": "100.00"},
            "shop": {"id": "s1", "name": "Heights Ltd", "owner": {"id": "u9", "username": "prov", "user_type": "provider"}},
            "quantity": 2,
            "start_datetime": "2024-01-01T00:00:00Z",
            "end_datetime": "2024-01-03T00:00:00Z",
            "total_amount": "3000.00",
            "status": "confirmed",
            "payment_status": "pending",
            "payment_method": "cash_on_return",
            "notes": null
        }"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.total_amount, 3000.0);
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.payment_method, PaymentMethod::CashOnReturn);
        assert_eq!(booking.tool_name(), "Ladder");
        assert_eq!(booking.shop_name(), "Heights Ltd");
        assert_eq!(booking.shop_owner_id(), Some("u9"));
    }

    #[test]
    fn test_new_booking_serializes_iso_timestamps() {
        let new = NewBooking {
            tool_id: "t1".to_string(),
            start_datetime: "2024-01-01T00:00:00Z".parse().unwrap(),
            end_datetime: "2024-01-03T00:00:00Z".parse().unwrap(),
            quantity: 1,
            payment_method: PaymentMethod::CashOnReturn,
            notes: String::new(),
        };
        let value = serde_json::to_value(&new).unwrap();
        assert_eq!(value["payment_method"], "cash_on_return");
        assert_eq!(value["start_datetime"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn test_closed_statuses() {
        assert!(BookingStatus::Returned.is_closed());
        assert!(BookingStatus::Cancelled.is_closed());
        assert!(!BookingStatus::Pending.is_closed());
    }
}
