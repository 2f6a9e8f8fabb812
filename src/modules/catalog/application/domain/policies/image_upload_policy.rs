use std::str::FromStr;

use crate::config::{read_parsed, read_string, ConfigError, Lookup};

/// What to do when an upload is byte-identical to a stored image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageDedup {
    /// Point the product at the existing file.
    Reuse,
    /// Refuse the upload with a conflict naming the existing file.
    Reject,
    /// Always write a new file.
    Off,
}

impl FromStr for ImageDedup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reuse" => Ok(ImageDedup::Reuse),
            "reject" => Ok(ImageDedup::Reject),
            "off" | "none" => Ok(ImageDedup::Off),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageRejection {
    #[error("Only image uploads are allowed")]
    NotAnImage,

    #[error("Image exceeds the {max_bytes} byte limit")]
    TooLarge { max_bytes: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUploadPolicy {
    pub max_bytes: usize,
    pub dedup: ImageDedup,
}

impl Default for ImageUploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: Self::DEFAULT_MAX_BYTES,
            dedup: ImageDedup::Reuse,
        }
    }
}

impl ImageUploadPolicy {
    pub const DEFAULT_MAX_BYTES: usize = 5 * 1024 * 1024; // 5MB
    pub const DEFAULT_EXTENSION: &'static str = ".jpg";
    const MAX_EXTENSION_LEN: usize = 10;

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&crate::config::env_lookup)
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let max_bytes = read_parsed(lookup, "PRODUCT_IMAGE_MAX_BYTES", Self::DEFAULT_MAX_BYTES)?;
        if max_bytes == 0 {
            return Err(ConfigError::Invalid {
                key: "PRODUCT_IMAGE_MAX_BYTES",
                value: "0".to_string(),
            });
        }

        let dedup = match read_string(lookup, "PRODUCT_IMAGE_DEDUP") {
            None => ImageDedup::Reuse,
            Some(raw) => raw.parse().map_err(|value| ConfigError::Invalid {
                key: "PRODUCT_IMAGE_DEDUP",
                value,
            })?,
        };

        Ok(Self { max_bytes, dedup })
    }

    /// Only `image/*` media types are accepted.
    pub fn check_content_type(&self, content_type: Option<&str>) -> Result<(), ImageRejection> {
        match content_type {
            Some(ct) if ct.trim().to_ascii_lowercase().starts_with("image/") => Ok(()),
            _ => Err(ImageRejection::NotAnImage),
        }
    }

    pub fn check_size(&self, len: usize) -> Result<(), ImageRejection> {
        if len > self.max_bytes {
            return Err(ImageRejection::TooLarge {
                max_bytes: self.max_bytes,
            });
        }
        Ok(())
    }

    /// Lower-cased extension of the client file name, `.jpg` when it has
    /// none or it looks unsafe.
    pub fn extension_for(&self, filename: Option<&str>) -> String {
        filename
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| {
                (1..=Self::MAX_EXTENSION_LEN).contains(&ext.len())
                    && ext.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .map(|ext| format!(".{ext}"))
            .unwrap_or_else(|| Self::DEFAULT_EXTENSION.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;
    use std::collections::HashMap;

    fn load(vars: HashMap<&'static str, &'static str>) -> Result<ImageUploadPolicy, ConfigError> {
        let lookup = move |key: &str| vars.get(key).map(|v| v.to_string());
        ImageUploadPolicy::from_lookup(&lookup)
    }

    #[test]
    fn defaults() {
        let policy = load(HashMap::new()).unwrap();
        assert_eq!(policy, ImageUploadPolicy::default());
        assert_eq!(policy.max_bytes, 5 * 1024 * 1024);
        assert_eq!(policy.dedup, ImageDedup::Reuse);
    }

    #[test]
    fn reads_overrides() {
        let policy = load(hashmap! {
            "PRODUCT_IMAGE_MAX_BYTES" => "1024",
            "PRODUCT_IMAGE_DEDUP" => "Reject",
        })
        .unwrap();
        assert_eq!(policy.max_bytes, 1024);
        assert_eq!(policy.dedup, ImageDedup::Reject);
    }

    #[test]
    fn rejects_unknown_dedup_mode() {
        let err = load(hashmap! { "PRODUCT_IMAGE_DEDUP" => "maybe" }).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PRODUCT_IMAGE_DEDUP", .. }));
    }

    #[test]
    fn content_type_must_be_image() {
        let policy = ImageUploadPolicy::default();
        assert!(policy.check_content_type(Some("image/png")).is_ok());
        assert!(policy.check_content_type(Some("IMAGE/webp")).is_ok());
        assert_eq!(
            policy.check_content_type(Some("application/pdf")),
            Err(ImageRejection::NotAnImage)
        );
        assert_eq!(policy.check_content_type(None), Err(ImageRejection::NotAnImage));
    }

    #[test]
    fn size_limit_is_inclusive() {
        let policy = ImageUploadPolicy {
            max_bytes: 10,
            dedup: ImageDedup::Off,
        };
        assert!(policy.check_size(10).is_ok());
        assert_eq!(
            policy.check_size(11),
            Err(ImageRejection::TooLarge { max_bytes: 10 })
        );
    }

    #[test]
    fn extension_is_sanitized() {
        let policy = ImageUploadPolicy::default();
        assert_eq!(policy.extension_for(Some("photo.PNG")), ".png");
        assert_eq!(policy.extension_for(Some("archive.tar.gz")), ".gz");
        assert_eq!(policy.extension_for(Some("noext")), ".jpg");
        assert_eq!(policy.extension_for(Some("evil.p/hp")), ".jpg");
        assert_eq!(policy.extension_for(None), ".jpg");
    }
}
