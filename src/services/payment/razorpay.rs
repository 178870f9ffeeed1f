use std::sync::Arc;

use async_trait::async_trait;

use super::{Checkout, CheckoutLoader};
use crate::errors::AppError;

/// Fetches the Razorpay checkout script over HTTP. A reachable script means
/// the gateway is up; the overlay itself is supplied by the caller.
pub struct HttpScriptLoader {
    script_url: String,
    checkout: Arc<dyn Checkout>,
    client: reqwest::Client,
}

impl HttpScriptLoader {
    pub fn new(script_url: String, checkout: Arc<dyn Checkout>) -> Self {
        Self {
            script_url,
            checkout,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CheckoutLoader for HttpScriptLoader {
    async fn load(&self) -> Result<Arc<dyn Checkout>, AppError> {
        tracing::debug!(url = %self.script_url, "loading checkout script");
        let resp = self.client.get(&self.script_url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::Network(format!(
                "checkout script returned {status}"
            )));
        }
        let script = resp.bytes().await?;
        if script.is_empty() {
            return Err(AppError::InvalidResponse("checkout script is empty".to_string()));
        }

        tracing::info!(bytes = script.len(), "checkout script loaded");
        Ok(self.checkout.clone())
    }
}
