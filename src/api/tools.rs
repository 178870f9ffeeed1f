use reqwest::Method;

use super::{ApiClient, Body};
use crate::errors::AppError;
use crate::models::{Category, Listing, Tool, ToolForm};

impl ApiClient {
    pub async fn get_categories(&self) -> Result<Vec<Category>, AppError> {
        let listing: Listing<Category> = self.get("categories/", None, &[]).await?;
        Ok(listing.into_vec())
    }

    pub async fn get_tools(
        &self,
        token: Option<&str>,
        params: &[(&str, String)],
    ) -> Result<Vec<Tool>, AppError> {
        let listing: Listing<Tool> = self.get("tools/", token, params).await?;
        Ok(listing.into_vec())
    }

    pub async fn get_nearby_tools(
        &self,
        lat: f64,
        lng: f64,
        radius_km: f64,
    ) -> Result<Vec<Tool>, AppError> {
        let query = [
            ("lat", lat.to_string()),
            ("lng", lng.to_string()),
            ("radius", radius_km.to_string()),
        ];
        let listing: Listing<Tool> = self.get("tools/nearby/", None, &query).await?;
        Ok(listing.into_vec())
    }

    pub async fn get_tool(&self, token: Option<&str>, id: &str) -> Result<Tool, AppError> {
        self.get(&format!("tools/{id}/"), token, &[]).await
    }

    /// Replies with the write serializer: no `id` and a bare category key.
    pub async fn create_tool(
        &self,
        token: &str,
        form: ToolForm,
    ) -> Result<serde_json::Value, AppError> {
        let body = Body::Multipart(form.into_multipart()?);
        self.send(Method::POST, "tools/", Some(token), body).await
    }

    pub async fn update_tool(&self, token: &str, id: &str, form: ToolForm) -> Result<Tool, AppError> {
        let body = Body::Multipart(form.into_multipart()?);
        self.send(Method::PATCH, &format!("tools/{id}/"), Some(token), body)
            .await
    }

    pub async fn delete_tool(&self, token: &str, id: &str) -> Result<(), AppError> {
        self.send(Method::DELETE, &format!("tools/{id}/"), Some(token), Body::Empty)
            .await
    }

    pub async fn get_my_tools(&self, token: &str) -> Result<Vec<Tool>, AppError> {
        let listing: Listing<Tool> = self.get("tools/my_tools/", Some(token), &[]).await?;
        Ok(listing.into_vec())
    }
}
