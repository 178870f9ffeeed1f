use crate::config::AppConfig;

/// Absolute URL for an uploaded file. Absolute and `blob:` URLs pass through.
pub fn media_url(config: &AppConfig, path: Option<&str>) -> String {
    let Some(path) = path.filter(|p| !p.is_empty()) else {
        return String::new();
    };
    if path.starts_with("http") || path.starts_with("blob:") {
        return path.to_string();
    }
    if path.starts_with('/') {
        format!("{}{}", config.media_origin(), path)
    } else {
        format!("{}/{}", config.media_origin(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_url() {
        let config = AppConfig::for_origin("https://api.toolsy.in/api");
        assert_eq!(media_url(&config, None), "");
        assert_eq!(media_url(&config, Some("")), "");
        assert_eq!(
            media_url(&config, Some("/media/tools/drill.jpg")),
            "https://api.toolsy.in/media/tools/drill.jpg"
        );
        assert_eq!(
            media_url(&config, Some("media/tools/drill.jpg")),
            "https://api.toolsy.in/media/tools/drill.jpg"
        );
        assert_eq!(
            media_url(&config, Some("https://cdn.example.com/a.png")),
            "https://cdn.example.com/a.png"
        );
        assert_eq!(media_url(&config, Some("blob:abc")), "blob:abc");
    }
}
