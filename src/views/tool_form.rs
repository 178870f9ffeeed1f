use std::sync::Arc;

use super::{settled, FormStatus, Outcome, Toast};
use crate::errors::AppError;
use crate::models::{Category, ImageUpload, Tool, ToolForm};
use crate::services::policy::{DASHBOARD, TOOLS};
use crate::services::scope::ViewScope;
use crate::state::AppState;

/// Raw form input, validated into a [`ToolForm`] on submit.
#[derive(Debug, Clone)]
pub struct ToolDraft {
    pub name: String,
    pub description: String,
    pub price_per_day: String,
    pub deposit_amount: String,
    pub quantity_available: String,
    pub category_id: String,
    pub image: Option<ImageUpload>,
}

impl Default for ToolDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price_per_day: String::new(),
            deposit_amount: String::new(),
            quantity_available: "1".to_string(),
            category_id: String::new(),
            image: None,
        }
    }
}

impl ToolDraft {
    pub fn from_tool(tool: &Tool) -> Self {
        Self {
            name: tool.name.clone(),
            description: tool.description.clone(),
            price_per_day: format!("{:.2}", tool.price_per_day),
            deposit_amount: format!("{:.2}", tool.deposit()),
            quantity_available: tool.quantity_available.to_string(),
            category_id: tool
                .category
                .as_ref()
                .map(|c| c.id.clone())
                .unwrap_or_default(),
            image: None,
        }
    }

    pub fn validate(&self) -> Result<ToolForm, AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Tool name is required".to_string()));
        }
        let price_per_day = self
            .price_per_day
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p > 0.0)
            .ok_or_else(|| AppError::Validation("Price per day must be a positive number".to_string()))?;
        let deposit = self.deposit_amount.trim();
        let deposit_amount = if deposit.is_empty() {
            0.0
        } else {
            deposit
                .parse::<f64>()
                .ok()
                .filter(|d| d.is_finite() && *d >= 0.0)
                .ok_or_else(|| AppError::Validation("Deposit must be zero or more".to_string()))?
        };
        let quantity_available = self
            .quantity_available
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|q| *q >= 1)
            .ok_or_else(|| AppError::Validation("Quantity must be a whole number of at least 1".to_string()))?;
        let category = self.category_id.trim();

        Ok(ToolForm {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            price_per_day,
            deposit_amount,
            quantity_available,
            category_id: (!category.is_empty()).then(|| category.to_string()),
            is_available: None,
            image: self.image.clone(),
        })
    }
}

/// Create or edit a tool listing. `tool_id` is set in edit mode.
pub struct ToolEditorView {
    state: Arc<AppState>,
    scope: ViewScope,
    pub tool_id: Option<String>,
    pub draft: ToolDraft,
    pub categories: Vec<Category>,
    pub preview: Option<String>,
    pub status: FormStatus,
}

impl ToolEditorView {
    pub fn create(state: Arc<AppState>) -> Self {
        Self {
            state,
            scope: ViewScope::new(),
            tool_id: None,
            draft: ToolDraft::default(),
            categories: Vec::new(),
            preview: None,
            status: FormStatus::default(),
        }
    }

    pub fn edit(state: Arc<AppState>, tool_id: &str) -> Self {
        Self {
            tool_id: Some(tool_id.to_string()),
            ..Self::create(state)
        }
    }

    pub async fn load_categories(&mut self) {
        let res = self.scope.run(self.state.api.get_categories()).await;
        match settled(res) {
            Some(Ok(categories)) => self.categories = categories,
            Some(Err(e)) => tracing::warn!(error = %e, "failed to load categories"),
            None => {}
        }
    }

    /// Prefills the draft from the stored tool (edit mode only).
    pub async fn load(&mut self) -> Outcome {
        let Some(id) = self.tool_id.clone() else {
            return Outcome::none();
        };
        let token = self.state.session.access_token();
        let res = self
            .scope
            .run(self.state.api.get_tool(token.as_deref(), &id))
            .await;
        let Some(res) = settled(res) else {
            return Outcome::none();
        };
        match res {
            Ok(tool) => {
                self.draft = ToolDraft::from_tool(&tool);
                self.preview = tool
                    .primary_image()
                    .map(|p| crate::services::media::media_url(&self.state.config, Some(p)));
                Outcome::none()
            }
            Err(e) => {
                tracing::warn!(tool_id = %id, error = %e, "failed to load tool for editing");
                Outcome::toast(Toast::error("Failed to load tool details")).then(TOOLS)
            }
        }
    }

    pub async fn submit(&mut self) -> Outcome {
        let mut form = match self.draft.validate() {
            Ok(form) => form,
            Err(e) => return Outcome::toast(Toast::error(e.to_string())),
        };
        if self.tool_id.is_none() {
            form.is_available = Some(true);
        }
        if let Err(e) = self.status.begin() {
            return Outcome::toast(Toast::error(e.to_string()));
        }

        let api = &self.state.api;
        let form = &form;
        let res = match self.tool_id.as_deref() {
            None => {
                self.scope
                    .run(self.state.session.authorized(|token| {
                        let form = form.clone();
                        async move { api.create_tool(&token, form).await.map(|_| ()) }
                    }))
                    .await
            }
            Some(id) => {
                self.scope
                    .run(self.state.session.authorized(|token| {
                        let form = form.clone();
                        async move { api.update_tool(&token, id, form).await.map(|_| ()) }
                    }))
                    .await
            }
        };
        let Some(res) = settled(res) else {
            return Outcome::none();
        };

        match res {
            Ok(()) => {
                self.status.finish();
                match self.tool_id.clone() {
                    None => {
                        tracing::info!(name = %form.name, "tool created");
                        Outcome::toast(Toast::success("Tool deployed successfully!")).then(TOOLS)
                    }
                    Some(id) => {
                        tracing::info!(tool_id = %id, "tool updated");
                        Outcome::toast(Toast::success("Tool updated successfully!"))
                            .then(format!("{TOOLS}/{id}"))
                    }
                }
            }
            Err(e) => {
                self.status.fail(e.to_string());
                Outcome::toast(Toast::error(e.to_string()))
            }
        }
    }

    pub async fn delete(&mut self) -> Outcome {
        let Some(id) = self.tool_id.clone() else {
            return Outcome::none();
        };
        let api = &self.state.api;
        let tool_id = id.as_str();
        let res = self
            .scope
            .run(
                self.state
                    .session
                    .authorized(|token| async move { api.delete_tool(&token, tool_id).await }),
            )
            .await;
        match settled(res) {
            Some(Ok(())) => {
                tracing::info!(tool_id = %id, "tool deleted");
                Outcome::toast(Toast::success("Tool deleted")).then(DASHBOARD)
            }
            Some(Err(e)) => Outcome::toast(Toast::error(e.to_string())),
            None => Outcome::none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(price: &str, deposit: &str, quantity: &str) -> ToolDraft {
        ToolDraft {
            name: "Angle Grinder".to_string(),
            price_per_day: price.to_string(),
            deposit_amount: deposit.to_string(),
            quantity_available: quantity.to_string(),
            ..ToolDraft::default()
        }
    }

    #[test]
    fn test_valid_draft() {
        let form = draft("250", "", "3").validate().unwrap();
        assert_eq!(form.price_per_day, 250.0);
        assert_eq!(form.deposit_amount, 0.0);
        assert_eq!(form.quantity_available, 3);
        assert_eq!(form.category_id, None);
    }

    #[test]
    fn test_rejects_bad_numbers() {
        assert!(draft("0", "0", "1").validate().is_err());
        assert!(draft("abc", "0", "1").validate().is_err());
        assert!(draft("100", "-5", "1").validate().is_err());
        assert!(draft("100", "0", "0").validate().is_err());
        assert!(draft("100", "0", "1.5").validate().is_err());
    }

    #[test]
    fn test_from_tool_prefills_category() {
        let tool: Tool = serde_json::from_value(serde_json::json!({
            "id": "t1",
            "name": "Ladder",
            "category": {"id": 3, "name": "Access", "slug": "access"},
            "quantity_available": 2,
            "price_per_day": "100.00",
            "deposit_amount": "50.00",
        }))
        .unwrap();
        let draft = ToolDraft::from_tool(&tool);
        assert_eq!(draft.category_id, "3");
        assert_eq!(draft.price_per_day, "100.00");
        assert_eq!(draft.quantity_available, "2");
    }
}
