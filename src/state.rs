use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::db::LocalStorage;
use crate::services::payment::{CheckoutLoader, PaymentBridge};
use crate::services::session::SessionStore;

/// Everything a view needs, shared behind an `Arc`.
pub struct AppState {
    pub config: AppConfig,
    pub api: ApiClient,
    pub session: SessionStore,
    pub payments: PaymentBridge,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        storage: Arc<dyn LocalStorage>,
        loader: Arc<dyn CheckoutLoader>,
    ) -> Arc<Self> {
        let api = ApiClient::new(&config.api_url);
        Arc::new(Self {
            session: SessionStore::new(api.clone(), storage),
            payments: PaymentBridge::new(api.clone(), loader),
            api,
            config,
        })
    }
}
