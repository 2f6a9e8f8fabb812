use async_trait::async_trait;

/// A validated upload ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    /// Lower-cased, with the leading dot (`.png`).
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredImage {
    /// A new file was written.
    Written(String),
    /// An identical file already existed and is shared.
    Reused(String),
}

impl StoredImage {
    pub fn filename(&self) -> &str {
        match self {
            StoredImage::Written(name) | StoredImage::Reused(name) => name,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, StoredImage::Written(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageStorageError {
    #[error("Identical image already stored as {existing}")]
    Duplicate { existing: String },

    #[error("Image storage I/O error: {0}")]
    Io(String),
}

#[async_trait]
pub trait ImageStorage: Send + Sync {
    async fn store(&self, upload: &ImageUpload) -> Result<StoredImage, ImageStorageError>;

    /// Deleting a file that is already gone is not an error.
    async fn remove(&self, filename: &str) -> Result<(), ImageStorageError>;
}
