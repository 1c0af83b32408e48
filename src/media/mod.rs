//! Image URL resolution
//!
//! Product and page images live on a CDN keyed by an image identifier. When
//! no CDN is configured the identifier maps to a locally served asset.

use crate::config::MediaConfig;
use crate::constants::api::IMAGE_CDN_URL;

/// Builds renderable image URLs from image identifiers
#[derive(Debug, Clone)]
pub struct ImageResolver {
    cloud_name: Option<String>,
    transformation: String,
    static_prefix: String,
}

impl ImageResolver {
    pub fn from_config(config: &MediaConfig) -> Self {
        let cloud_name = config.cloud_name.trim();
        Self {
            cloud_name: (!cloud_name.is_empty()).then(|| cloud_name.to_string()),
            transformation: config.transformation.trim_matches('/').to_string(),
            static_prefix: config.static_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Whether images are served from the CDN
    pub fn is_cdn(&self) -> bool {
        self.cloud_name.is_some()
    }

    /// URL for an image identifier such as `products/boda-125`
    pub fn url(&self, image_id: &str) -> String {
        let id = image_id.trim_start_matches('/');
        match &self.cloud_name {
            Some(cloud) if self.transformation.is_empty() => {
                format!("{}/{}/image/upload/{}", IMAGE_CDN_URL, cloud, id)
            }
            Some(cloud) => format!(
                "{}/{}/image/upload/{}/{}",
                IMAGE_CDN_URL, cloud, self.transformation, id
            ),
            None => format!("{}/{}.jpg", self.static_prefix, id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_to_static_asset() {
        let resolver = ImageResolver::from_config(&MediaConfig::default());
        assert!(!resolver.is_cdn());
        assert_eq!(
            resolver.url("products/boda-125"),
            "/static/images/products/boda-125.jpg"
        );
    }

    #[test]
    fn test_cdn_url() {
        let config = MediaConfig {
            cloud_name: "moto-demo".to_string(),
            ..MediaConfig::default()
        };
        let resolver = ImageResolver::from_config(&config);
        assert!(resolver.is_cdn());
        assert_eq!(
            resolver.url("/products/volt-e1"),
            "https://res.cloudinary.com/moto-demo/image/upload/f_auto,q_auto/products/volt-e1"
        );
    }

    #[test]
    fn test_cdn_url_without_transformation() {
        let config = MediaConfig {
            cloud_name: "moto-demo".to_string(),
            transformation: String::new(),
            ..MediaConfig::default()
        };
        let resolver = ImageResolver::from_config(&config);
        assert_eq!(
            resolver.url("hero"),
            "https://res.cloudinary.com/moto-demo/image/upload/hero"
        );
    }

    #[test]
    fn test_blank_cloud_name_is_unconfigured() {
        let config = MediaConfig {
            cloud_name: "   ".to_string(),
            ..MediaConfig::default()
        };
        assert!(!ImageResolver::from_config(&config).is_cdn());
    }
}
