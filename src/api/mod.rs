pub mod admin;
pub mod auth;
pub mod bookings;
pub mod payments;
pub mod shops;
pub mod subscriptions;
pub mod tools;
pub mod users;

use reqwest::multipart::Form;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;

/// Request payload. Multipart bodies leave the content type to reqwest so
/// the boundary is set correctly.
pub enum Body {
    Empty,
    Json(Value),
    Multipart(Form),
}

impl Body {
    pub fn json<T: Serialize>(value: &T) -> Result<Self, AppError> {
        serde_json::to_value(value)
            .map(Body::Json)
            .map_err(|e| AppError::Validation(format!("failed to encode request: {e}")))
    }
}

/// The only path from the client to the backend.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        self.request(Method::GET, path, token, query, Body::Empty)
            .await
    }

    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Body,
    ) -> Result<T, AppError> {
        self.request(method, path, token, &[], body).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        query: &[(&str, String)],
        body: Body,
    ) -> Result<T, AppError> {
        let mut req = self.client.request(method.clone(), self.url(path));
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        req = match body {
            Body::Empty => req,
            Body::Json(value) => req.json(&value),
            Body::Multipart(form) => req.multipart(form),
        };

        let resp = req.send().await.map_err(|e| {
            tracing::warn!(method = %method, path, error = %e, "request failed");
            AppError::Network(e.to_string())
        })?;

        let status = resp.status();
        tracing::debug!(method = %method, path, status = status.as_u16(), "api response");

        let text = resp
            .text()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(AppError::Api {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        decode_body(&text)
    }
}

/// `detail` when the server sent one, otherwise the whole JSON body,
/// otherwise a generic message.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => match value.get("detail") {
            Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
            Some(detail) if !detail.is_null() && !detail.is_string() => detail.to_string(),
            _ => value.to_string(),
        },
        Err(_) => "Request failed".to_string(),
    }
}

fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T, AppError> {
    let parsed = if text.trim().is_empty() {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_str(text)
    };
    parsed.map_err(|e| AppError::InvalidResponse(e.to_string()))
}
