use reqwest::Method;

use super::{ApiClient, Body};
use crate::errors::AppError;
use crate::models::{
    ActiveToggled, AdminStats, Booking, Listing, Subscription, SubscriptionUpdate, Tool,
    User, VerifyToggled,
};

fn search_query(search: &str) -> Vec<(&'static str, String)> {
    if search.trim().is_empty() {
        Vec::new()
    } else {
        vec![("search", search.trim().to_string())]
    }
}

impl ApiClient {
    pub async fn get_admin_stats(&self, token: &str) -> Result<AdminStats, AppError> {
        self.get("admin/stats/", Some(token), &[]).await
    }

    pub async fn get_admin_users(&self, token: &str, search: &str) -> Result<Vec<User>, AppError> {
        let listing: Listing<User> = self
            .get("admin/users/", Some(token), &search_query(search))
            .await?;
        Ok(listing.into_vec())
    }

    pub async fn get_admin_user(&self, token: &str, id: &str) -> Result<User, AppError> {
        self.get(&format!("admin/users/{id}/"), Some(token), &[])
            .await
    }

    pub async fn admin_toggle_verify_user(
        &self,
        token: &str,
        id: &str,
    ) -> Result<VerifyToggled, AppError> {
        self.send(
            Method::POST,
            &format!("admin/users/{id}/toggle_verify/"),
            Some(token),
            Body::Empty,
        )
        .await
    }

    pub async fn admin_toggle_active_user(
        &self,
        token: &str,
        id: &str,
    ) -> Result<ActiveToggled, AppError> {
        self.send(
            Method::POST,
            &format!("admin/users/{id}/toggle_active/"),
            Some(token),
            Body::Empty,
        )
        .await
    }

    pub async fn admin_delete_user(&self, token: &str, id: &str) -> Result<(), AppError> {
        self.send(
            Method::DELETE,
            &format!("admin/users/{id}/"),
            Some(token),
            Body::Empty,
        )
        .await
    }

    pub async fn get_admin_user_tools(&self, token: &str, id: &str) -> Result<Vec<Tool>, AppError> {
        let listing: Listing<Tool> = self
            .get(&format!("admin/users/{id}/tools/"), Some(token), &[])
            .await?;
        Ok(listing.into_vec())
    }

    /// `None` when the user has never subscribed (the endpoint answers `null`).
    pub async fn get_admin_user_subscription(
        &self,
        token: &str,
        id: &str,
    ) -> Result<Option<Subscription>, AppError> {
        self.get(&format!("admin/users/{id}/subscription/"), Some(token), &[])
            .await
    }

    pub async fn admin_update_user_subscription(
        &self,
        token: &str,
        id: &str,
        data: &SubscriptionUpdate,
    ) -> Result<Subscription, AppError> {
        self.send(
            Method::PATCH,
            &format!("admin/users/{id}/subscription/edit/"),
            Some(token),
            Body::json(data)?,
        )
        .await
    }

    pub async fn get_admin_bookings(&self, token: &str, search: &str) -> Result<Vec<Booking>, AppError> {
        let listing: Listing<Booking> = self
            .get("admin/bookings/", Some(token), &search_query(search))
            .await?;
        Ok(listing.into_vec())
    }
}
