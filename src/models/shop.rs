use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::de;
use super::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    #[serde(default)]
    pub owner: Option<User>,
    pub name: String,
    #[serde(default, deserialize_with = "de::null_default")]
    pub description: String,
    #[serde(default, deserialize_with = "de::null_default")]
    pub address: String,
    #[serde(default)]
    pub location_lat: Option<f64>,
    #[serde(default)]
    pub location_lng: Option<f64>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "de::opt_decimal")]
    pub rating_average: Option<f64>,
    #[serde(default)]
    pub total_ratings: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub tools_count: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// Writable shop fields, sent for both create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ShopInput {
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub location_lat: f64,
    pub location_lng: f64,
}

impl ShopInput {
    /// Prefills contact fields from the owner when the shop left them empty.
    pub fn from_shop(shop: &Shop, owner: Option<&User>) -> Self {
        let phone = shop
            .phone
            .clone()
            .filter(|p| !p.is_empty())
            .or_else(|| owner.and_then(|u| u.phone.clone()))
            .unwrap_or_default();
        let email = shop
            .email
            .clone()
            .filter(|e| !e.is_empty())
            .or_else(|| owner.map(|u| u.email.clone()))
            .unwrap_or_default();

        Self {
            name: shop.name.clone(),
            description: shop.description.clone(),
            address: shop.address.clone(),
            phone,
            email,
            location_lat: shop.location_lat.unwrap_or_default(),
            location_lng: shop.location_lng.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_shop_with_decimal_rating() {
        let json = r#"{
            "id": "c0ffee00-0000-4000-8000-000000000001",
            "name": "Anvil & Co",
            "description": "Hand tools",
            "address": "12 MG Road",
            "location_lat": 12.97,
            "location_lng": 77.59,
            "phone": "",
            "email": null,
            "rating_average": "4.50",
            "total_ratings": 8,
            "distance": 1.2
        }"#;
        let shop: Shop = serde_json::from_str(json).unwrap();
        assert_eq!(shop.rating_average, Some(4.5));
        assert_eq!(shop.distance, Some(1.2));

        let input = ShopInput::from_shop(&shop, None);
        assert_eq!(input.phone, "");
        assert_eq!(input.location_lat, 12.97);
    }
}
