use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{settled, FormStatus, Outcome, Toast};
use crate::errors::AppError;
use crate::models::{Category, NewBooking, PaymentMethod, Tool};
use crate::services::policy::{self, BOOKINGS, LOGIN};
use crate::services::pricing::{self, Quote};
use crate::services::scope::ViewScope;
use crate::state::AppState;

/// Tool catalogue with a client-side text filter.
pub struct ToolsView {
    state: Arc<AppState>,
    scope: ViewScope,
    pub tools: Vec<Tool>,
    pub categories: Vec<Category>,
    pub search: String,
    pub category: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ToolsView {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            scope: ViewScope::new(),
            tools: Vec::new(),
            categories: Vec::new(),
            search: String::new(),
            category: None,
            loading: true,
            error: None,
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        let token = self.state.session.access_token();
        let params: Vec<(&str, String)> = self
            .category
            .iter()
            .map(|c| ("category", c.clone()))
            .collect();

        let res = self
            .scope
            .run(self.state.api.get_tools(token.as_deref(), &params))
            .await;
        let Some(res) = settled(res) else { return };
        self.apply(res);
    }

    /// Tools from shops within `radius_km` (configured default when `None`).
    pub async fn load_nearby(&mut self, lat: f64, lng: f64, radius_km: Option<f64>) {
        self.loading = true;
        let radius = radius_km.unwrap_or(self.state.config.nearby_radius_km);
        let res = self
            .scope
            .run(self.state.api.get_nearby_tools(lat, lng, radius))
            .await;
        let Some(res) = settled(res) else { return };
        self.apply(res);
    }

    fn apply(&mut self, res: Result<Vec<Tool>, AppError>) {
        match res {
            Ok(tools) => {
                self.tools = tools;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load tools");
                self.error = Some("Failed to load tools".to_string());
            }
        }
        self.loading = false;
    }

    pub async fn load_categories(&mut self) {
        let res = self.scope.run(self.state.api.get_categories()).await;
        match settled(res) {
            Some(Ok(categories)) => self.categories = categories,
            Some(Err(e)) => tracing::warn!(error = %e, "failed to load categories"),
            None => {}
        }
    }

    /// Tools whose name or description contains the search text.
    pub fn visible(&self) -> Vec<&Tool> {
        let needle = self.search.trim();
        self.tools
            .iter()
            .filter(|t| needle.is_empty() || t.matches(needle))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct BookingForm {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub quantity: u32,
    pub payment_method: PaymentMethod,
    pub notes: String,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            start: None,
            end: None,
            quantity: 1,
            payment_method: PaymentMethod::Razorpay,
            notes: String::new(),
        }
    }
}

pub struct ToolDetailView {
    state: Arc<AppState>,
    scope: ViewScope,
    pub tool: Option<Tool>,
    pub error: Option<String>,
    pub booking: BookingForm,
    pub status: FormStatus,
}

impl ToolDetailView {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            scope: ViewScope::new(),
            tool: None,
            error: None,
            booking: BookingForm::default(),
            status: FormStatus::default(),
        }
    }

    pub async fn load(&mut self, id: &str) {
        let token = self.state.session.access_token();
        let res = self
            .scope
            .run(self.state.api.get_tool(token.as_deref(), id))
            .await;
        let Some(res) = settled(res) else { return };
        match res {
            Ok(tool) => {
                self.tool = Some(tool);
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(tool_id = id, error = %e, "failed to load tool");
                self.error = Some("Failed to load tool details".to_string());
            }
        }
    }

    pub fn stock_label(&self) -> String {
        match &self.tool {
            Some(t) if t.is_available && t.in_stock() => format!("{} available", t.quantity_available),
            Some(_) => "Out of stock".to_string(),
            None => String::new(),
        }
    }

    pub fn max_quantity(&self) -> u32 {
        self.tool.as_ref().map_or(0, |t| t.quantity_available)
    }

    /// Clamps into `1..=available`.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.booking.quantity = quantity.clamp(1, self.max_quantity().max(1));
    }

    /// Live price for the current form values.
    pub fn quote(&self) -> Option<Quote> {
        let tool = self.tool.as_ref()?;
        pricing::quote(
            self.booking.start,
            self.booking.end,
            self.booking.quantity,
            tool.price_per_day,
            tool.deposit(),
        )
    }

    fn validate(&self) -> Result<NewBooking, AppError> {
        let tool = self
            .tool
            .as_ref()
            .ok_or_else(|| AppError::Validation("Tool not loaded".to_string()))?;
        if !policy::can_book(tool) {
            return Err(AppError::Validation("This tool is currently unavailable".to_string()));
        }
        let (Some(start), Some(end)) = (self.booking.start, self.booking.end) else {
            return Err(AppError::Validation("Please select start and end dates".to_string()));
        };
        if end <= start {
            return Err(AppError::Validation("End date must be after start date".to_string()));
        }
        if self.booking.quantity == 0 || self.booking.quantity > tool.quantity_available {
            return Err(AppError::Validation(format!(
                "Quantity must be between 1 and {}",
                tool.quantity_available
            )));
        }
        Ok(NewBooking {
            tool_id: tool.id.clone(),
            start_datetime: start,
            end_datetime: end,
            quantity: self.booking.quantity,
            payment_method: self.booking.payment_method,
            notes: self.booking.notes.trim().to_string(),
        })
    }

    pub async fn submit(&mut self) -> Outcome {
        if !self.state.session.snapshot().is_authenticated() {
            return Outcome::toast(Toast::error("Please login to book tools")).then(LOGIN);
        }
        let booking = match self.validate() {
            Ok(b) => b,
            Err(e) => return Outcome::toast(Toast::error(e.to_string())),
        };
        if let Err(e) = self.status.begin() {
            return Outcome::toast(Toast::error(e.to_string()));
        }

        let api = &self.state.api;
        let booking = &booking;
        let res = self
            .scope
            .run(
                self.state
                    .session
                    .authorized(|token| async move { api.create_booking(&token, booking).await }),
            )
            .await;
        let Some(res) = settled(res) else {
            return Outcome::none();
        };

        match res {
            Ok(_) => {
                self.status.finish();
                tracing::info!(tool_id = %booking.tool_id, quantity = booking.quantity, "booking requested");
                Outcome::toast(Toast::success("Booking request sent successfully!")).then(BOOKINGS)
            }
            Err(e) => {
                self.status.fail(e.to_string());
                Outcome::toast(Toast::error(e.to_string()))
            }
        }
    }
}
