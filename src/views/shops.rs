use std::sync::Arc;

use super::{settled, FormStatus, Outcome, Toast};
use crate::errors::AppError;
use crate::models::{Shop, ShopInput};
use crate::services::policy::{DASHBOARD, SHOP_NEW};
use crate::services::scope::ViewScope;
use crate::state::AppState;

fn validate(input: &ShopInput) -> Result<(), AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::Validation("Shop name is required".to_string()));
    }
    if input.address.trim().is_empty() {
        return Err(AppError::Validation("Address is required".to_string()));
    }
    if !(-90.0..=90.0).contains(&input.location_lat) || !(-180.0..=180.0).contains(&input.location_lng) {
        return Err(AppError::Validation("Location is out of range".to_string()));
    }
    Ok(())
}

pub struct NewShopView {
    state: Arc<AppState>,
    scope: ViewScope,
    pub form: ShopInput,
    pub status: FormStatus,
}

impl NewShopView {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            scope: ViewScope::new(),
            form: ShopInput::default(),
            status: FormStatus::default(),
        }
    }

    /// Creates the shop, then re-reads the user so `has_shop` flips before
    /// the dashboard guard runs.
    pub async fn submit(&mut self) -> Outcome {
        if let Err(e) = validate(&self.form) {
            self.status.error = Some(e.to_string());
            return Outcome::none();
        }
        if let Err(e) = self.status.begin() {
            return Outcome::toast(Toast::error(e.to_string()));
        }

        let session = &self.state.session;
        let api = &self.state.api;
        let form = &self.form;
        let create = async {
            let shop = session
                .authorized(|token| async move { api.create_shop(&token, form).await })
                .await?;
            if let Err(e) = session.refresh_user().await {
                tracing::warn!(error = %e, "failed to refresh user after shop creation");
            }
            Ok::<_, AppError>(shop)
        };

        let res = self.scope.run(create).await;
        let Some(res) = settled(res) else {
            return Outcome::none();
        };
        match res {
            Ok(shop) => {
                tracing::info!(shop = %shop["name"], "shop created");
                self.status.finish();
                Outcome::toast(Toast::success("Shop Protocol Initialized")).then(DASHBOARD)
            }
            Err(e) => {
                self.status.fail(e.to_string());
                Outcome::none()
            }
        }
    }
}

/// Edits the provider's shop. Providers are assumed to own one shop; when
/// the backend returns several, the first one is edited.
pub struct ManageShopView {
    state: Arc<AppState>,
    scope: ViewScope,
    pub shop_id: Option<String>,
    pub form: ShopInput,
    pub loading: bool,
    pub status: FormStatus,
}

impl ManageShopView {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            scope: ViewScope::new(),
            shop_id: None,
            form: ShopInput::default(),
            loading: true,
            status: FormStatus::default(),
        }
    }

    pub async fn load(&mut self) -> Outcome {
        let api = &self.state.api;
        let res = self
            .scope
            .run(
                self.state
                    .session
                    .authorized(|token| async move { api.get_my_shops(&token).await }),
            )
            .await;
        let Some(res) = settled(res) else {
            return Outcome::none();
        };
        self.loading = false;

        match res {
            Ok(shops) => {
                let Some(shop) = shops.into_iter().next() else {
                    return Outcome::navigate(SHOP_NEW);
                };
                let user = self.state.session.user();
                self.form = ShopInput::from_shop(&shop, user.as_ref());
                self.shop_id = Some(shop.id);
                Outcome::none()
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load shop");
                Outcome::toast(Toast::error("Failed to load shop data"))
            }
        }
    }

    pub async fn save(&mut self) -> Outcome {
        let Some(shop_id) = self.shop_id.clone() else {
            return Outcome::none();
        };
        if let Err(e) = validate(&self.form) {
            return Outcome::toast(Toast::error(e.to_string()));
        }
        if let Err(e) = self.status.begin() {
            return Outcome::toast(Toast::error(e.to_string()));
        }

        let api = &self.state.api;
        let form = &self.form;
        let shop_id = shop_id.as_str();
        let res = self
            .scope
            .run(
                self.state
                    .session
                    .authorized(|token| async move { api.update_shop(&token, shop_id, form).await }),
            )
            .await;
        let Some(res) = settled(res) else {
            return Outcome::none();
        };
        match res {
            Ok(shop) => {
                self.status.finish();
                self.form = ShopInput::from_shop(&shop, self.state.session.user().as_ref());
                Outcome::toast(Toast::success("Shop Protocol Updated"))
            }
            Err(e) => {
                self.status.fail(e.to_string());
                Outcome::toast(Toast::error(e.to_string()))
            }
        }
    }
}

/// Public shop directory: search, nearby lookup and single-shop details.
pub struct ShopsView {
    state: Arc<AppState>,
    scope: ViewScope,
    pub search: String,
    pub shops: Vec<Shop>,
    pub selected: Option<Shop>,
    pub error: Option<String>,
}

impl ShopsView {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            scope: ViewScope::new(),
            search: String::new(),
            shops: Vec::new(),
            selected: None,
            error: None,
        }
    }

    pub async fn load(&mut self) {
        let token = self.state.session.access_token();
        let search = self.search.trim();
        let params: Vec<(&str, String)> = if search.is_empty() {
            Vec::new()
        } else {
            vec![("search", search.to_string())]
        };
        let res = self
            .scope
            .run(self.state.api.get_shops(token.as_deref(), &params))
            .await;
        let Some(res) = settled(res) else { return };
        self.apply(res);
    }

    pub async fn load_nearby(&mut self, lat: f64, lng: f64, radius_km: Option<f64>) {
        let radius = radius_km.unwrap_or(self.state.config.nearby_radius_km);
        let res = self
            .scope
            .run(self.state.api.get_nearby_shops(lat, lng, radius))
            .await;
        let Some(res) = settled(res) else { return };
        self.apply(res);
    }

    pub async fn load_one(&mut self, id: &str) {
        let token = self.state.session.access_token();
        let res = self
            .scope
            .run(self.state.api.get_shop(token.as_deref(), id))
            .await;
        match settled(res) {
            Some(Ok(shop)) => {
                self.selected = Some(shop);
                self.error = None;
            }
            Some(Err(e)) => {
                tracing::warn!(shop_id = id, error = %e, "failed to load shop");
                self.error = Some("Failed to load shop".to_string());
            }
            None => {}
        }
    }

    fn apply(&mut self, res: Result<Vec<Shop>, AppError>) {
        match res {
            Ok(shops) => {
                self.shops = shops;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load shops");
                self.error = Some("Failed to load shops".to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_shop_input() {
        let mut input = ShopInput {
            name: "Heights Ltd".to_string(),
            address: "12 MG Road".to_string(),
            location_lat: 12.97,
            location_lng: 77.59,
            ..ShopInput::default()
        };
        assert!(validate(&input).is_ok());

        input.location_lat = 120.0;
        assert!(validate(&input).is_err());

        input.location_lat = 0.0;
        input.name = "  ".to_string();
        assert_eq!(validate(&input).unwrap_err().to_string(), "Shop name is required");
    }
}
