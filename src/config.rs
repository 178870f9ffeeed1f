use std::env;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_CHECKOUT_SCRIPT: &str = "https://checkout.razorpay.com/v1/checkout.js";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_url: String,
    pub storage_path: String,
    pub checkout_script_url: String,
    pub nearby_radius_km: f64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_url = env::var("TOOLSY_API_URL")
            .or_else(|_| env::var("NEXT_PUBLIC_API_URL"))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            storage_path: env::var("TOOLSY_STORAGE_PATH")
                .unwrap_or_else(|_| "toolsy.db".to_string()),
            checkout_script_url: env::var("TOOLSY_CHECKOUT_SCRIPT")
                .unwrap_or_else(|_| DEFAULT_CHECKOUT_SCRIPT.to_string()),
            nearby_radius_km: env::var("TOOLSY_NEARBY_RADIUS_KM")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10.0),
        }
    }

    /// Config pointing at `api_url` with in-memory storage.
    pub fn for_origin(api_url: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            storage_path: ":memory:".to_string(),
            checkout_script_url: DEFAULT_CHECKOUT_SCRIPT.to_string(),
            nearby_radius_km: 10.0,
        }
    }

    /// Origin that serves uploaded media: the API origin without a trailing `/api`.
    pub fn media_origin(&self) -> &str {
        let base = self.api_url.trim_end_matches('/');
        base.strip_suffix("/api").unwrap_or(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_origin_trims_trailing_slash() {
        let config = AppConfig::for_origin("http://example.com/");
        assert_eq!(config.api_url, "http://example.com");
        assert_eq!(config.storage_path, ":memory:");
    }

    #[test]
    fn test_media_origin_strips_api_suffix() {
        assert_eq!(
            AppConfig::for_origin("https://host.dev/api").media_origin(),
            "https://host.dev"
        );
        assert_eq!(
            AppConfig::for_origin("https://host.dev/api/").media_origin(),
            "https://host.dev"
        );
        assert_eq!(
            AppConfig::for_origin("http://localhost:8000").media_origin(),
            "http://localhost:8000"
        );
    }
}
