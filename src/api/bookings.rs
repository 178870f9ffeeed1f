use reqwest::Method;

use super::{ApiClient, Body};
use crate::errors::AppError;
use crate::models::{Booking, Listing, NewBooking};

impl ApiClient {
    pub async fn get_bookings(&self, token: &str) -> Result<Vec<Booking>, AppError> {
        let listing: Listing<Booking> = self.get("bookings/", Some(token), &[]).await?;
        Ok(listing.into_vec())
    }

    /// The create endpoint echoes the write serializer, so the reply is kept untyped.
    pub async fn create_booking(
        &self,
        token: &str,
        data: &NewBooking,
    ) -> Result<serde_json::Value, AppError> {
        self.send(Method::POST, "bookings/", Some(token), Body::json(data)?)
            .await
    }

    pub async fn confirm_booking(&self, token: &str, id: &str) -> Result<Booking, AppError> {
        self.send(
            Method::POST,
            &format!("bookings/{id}/confirm/"),
            Some(token),
            Body::Empty,
        )
        .await
    }

    pub async fn cancel_booking(&self, token: &str, id: &str) -> Result<Booking, AppError> {
        self.send(
            Method::POST,
            &format!("bookings/{id}/cancel/"),
            Some(token),
            Body::Empty,
        )
        .await
    }
}
