use reqwest::Method;
use serde_json::json;

use super::{ApiClient, Body};
use crate::errors::AppError;
use crate::models::{AccessToken, Registration, TokenPair, User};

impl ApiClient {
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AppError> {
        let body = Body::Json(json!({ "username": username, "password": password }));
        self.send(Method::POST, "auth/token/", None, body).await
    }

    pub async fn refresh_token(&self, refresh: &str) -> Result<AccessToken, AppError> {
        let body = Body::Json(json!({ "refresh": refresh }));
        self.send(Method::POST, "auth/token/refresh/", None, body)
            .await
    }

    pub async fn register(&self, data: &Registration) -> Result<serde_json::Value, AppError> {
        self.send(Method::POST, "users/", None, Body::json(data)?)
            .await
    }

    pub async fn current_user(&self, token: &str) -> Result<User, AppError> {
        self.get("users/me/", Some(token), &[]).await
    }
}
