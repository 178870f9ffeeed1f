use chrono::{DateTime, Utc};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use super::de;
use super::shop::Shop;
use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolCondition {
    Excellent,
    #[default]
    Good,
    Fair,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    #[serde(default)]
    pub shop: Option<Shop>,
    #[serde(default)]
    pub category: Option<Category>,
    pub name: String,
    #[serde(default, deserialize_with = "de::null_default")]
    pub description: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub condition: ToolCondition,
    #[serde(default, deserialize_with = "de::null_default")]
    pub images: Vec<String>,
    /// Single-upload field some deployments return instead of `images`.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub quantity_available: u32,
    #[serde(default)]
    pub quantity_total: Option<u32>,
    #[serde(default, deserialize_with = "de::opt_decimal")]
    pub price_per_hour: Option<f64>,
    #[serde(deserialize_with = "de::decimal")]
    pub price_per_day: f64,
    #[serde(default, deserialize_with = "de::opt_decimal")]
    pub price_per_week: Option<f64>,
    #[serde(default, deserialize_with = "de::opt_decimal")]
    pub deposit_amount: Option<f64>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl Tool {
    pub fn in_stock(&self) -> bool {
        self.quantity_available > 0
    }

    pub fn deposit(&self) -> f64 {
        self.deposit_amount.unwrap_or(0.0)
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .first()
            .map(String::as_str)
            .or(self.image.as_deref())
    }

    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn from_path(path: &std::path::Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());
        let mime = match path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .as_deref()
        {
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            Some("gif") => "image/gif",
            _ => "image/jpeg",
        };
        Ok(Self {
            file_name,
            mime: mime.to_string(),
            bytes,
        })
    }
}

/// Validated tool listing, sent as multipart so an image can ride along.
#[derive(Debug, Clone)]
pub struct ToolForm {
    pub name: String,
    pub description: String,
    pub price_per_day: f64,
    pub deposit_amount: f64,
    pub quantity_available: u32,
    pub category_id: Option<String>,
    pub is_available: Option<bool>,
    pub image: Option<ImageUpload>,
}

impl ToolForm {
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("name", self.name.clone()),
            ("description", self.description.clone()),
            ("price_per_day", format!("{:.2}", self.price_per_day)),
            ("deposit_amount", format!("{:.2}", self.deposit_amount)),
            ("quantity_available", self.quantity_available.to_string()),
        ];
        if let Some(available) = self.is_available {
            fields.push(("is_available", available.to_string()));
        }
        if let Some(category) = &self.category_id {
            fields.push(("category", category.clone()));
        }
        fields
    }

    pub fn into_multipart(self) -> Result<Form, AppError> {
        let mut form = Form::new();
        for (name, value) in self.text_fields() {
            form = form.text(name, value);
        }
        if let Some(image) = self.image {
            let part = Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.mime)
                .map_err(|e| AppError::Validation(format!("invalid image type: {e}")))?;
            form = form.part("image", part);
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool_json() -> &'static str {
        r#"{
            "id": "7d0e0000-0000-4000-8000-000000000001",
            "name": "Hammer Drill",
            "description": "800W SDS drill",
            "category": {"id": 4, "name": "Power Tools", "slug": "power-tools"},
            "condition": "excellent",
            "images": null,
            "image": "/media/tools/drill.jpg",
            "quantity_available": 0,
            "price_per_day": "500.00",
            "price_per_hour": null,
            "deposit_amount": "1000.00"
        }"#
    }

    #[test]
    fn test_decode_tool() {
        let tool: Tool = serde_json::from_str(tool_json()).unwrap();
        assert_eq!(tool.price_per_day, 500.0);
        assert_eq!(tool.deposit(), 1000.0);
        assert_eq!(tool.category.as_ref().unwrap().id, "4");
        assert_eq!(tool.condition, ToolCondition::Excellent);
        assert!(tool.images.is_empty());
        assert_eq!(tool.primary_image(), Some("/media/tools/drill.jpg"));
        assert!(!tool.in_stock());
    }

    #[test]
    fn test_matches_name_or_description() {
        let tool: Tool = serde_json::from_str(tool_json()).unwrap();
        assert!(tool.matches("drill"));
        assert!(tool.matches("SDS"));
        assert!(!tool.matches("saw"));
    }

    #[test]
    fn test_text_fields_include_category_only_when_set() {
        let form = ToolForm {
            name: "Ladder".to_string(),
            description: "6ft".to_string(),
            price_per_day: 120.0,
            deposit_amount: 0.0,
            quantity_available: 2,
            category_id: None,
            is_available: Some(true),
            image: None,
        };
        let fields = form.text_fields();
        assert!(fields.contains(&("price_per_day", "120.00".to_string())));
        assert!(fields.contains(&("is_available", "true".to_string())));
        assert!(!fields.iter().any(|(k, _)| *k == "category"));
    }
}
