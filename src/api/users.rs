use reqwest::Method;

use super::{ApiClient, Body};
use crate::errors::AppError;
use crate::models::{ProfileUpdate, User};

impl ApiClient {
    pub async fn update_profile(&self, token: &str, data: &ProfileUpdate) -> Result<User, AppError> {
        self.send(
            Method::PATCH,
            "users/update_profile/",
            Some(token),
            Body::json(data)?,
        )
        .await
    }
}
