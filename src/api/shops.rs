use reqwest::Method;

use super::{ApiClient, Body};
use crate::errors::AppError;
use crate::models::{Listing, Shop, ShopInput};

impl ApiClient {
    pub async fn get_shops(
        &self,
        token: Option<&str>,
        params: &[(&str, String)],
    ) -> Result<Vec<Shop>, AppError> {
        let listing: Listing<Shop> = self.get("shops/", token, params).await?;
        Ok(listing.into_vec())
    }

    pub async fn get_nearby_shops(
        &self,
        lat: f64,
        lng: f64,
        radius_km: f64,
    ) -> Result<Vec<Shop>, AppError> {
        let query = [
            ("lat", lat.to_string()),
            ("lng", lng.to_string()),
            ("radius", radius_km.to_string()),
        ];
        let listing: Listing<Shop> = self.get("shops/nearby/", None, &query).await?;
        Ok(listing.into_vec())
    }

    pub async fn get_shop(&self, token: Option<&str>, id: &str) -> Result<Shop, AppError> {
        self.get(&format!("shops/{id}/"), token, &[]).await
    }

    /// The create endpoint echoes the write serializer (no `id`), so the
    /// reply is kept untyped.
    pub async fn create_shop(
        &self,
        token: &str,
        data: &ShopInput,
    ) -> Result<serde_json::Value, AppError> {
        self.send(Method::POST, "shops/", Some(token), Body::json(data)?)
            .await
    }

    pub async fn update_shop(
        &self,
        token: &str,
        id: &str,
        data: &ShopInput,
    ) -> Result<Shop, AppError> {
        self.send(
            Method::PATCH,
            &format!("shops/{id}/"),
            Some(token),
            Body::json(data)?,
        )
        .await
    }

    pub async fn get_my_shops(&self, token: &str) -> Result<Vec<Shop>, AppError> {
        let listing: Listing<Shop> = self.get("shops/my_shops/", Some(token), &[]).await?;
        Ok(listing.into_vec())
    }
}
