use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::catalog::application::domain::policies::ImageDedup;
use crate::catalog::application::ports::outgoing::{
    ImageStorage, ImageStorageError, ImageUpload, StoredImage,
};

/// Product images on local disk, with a content-hash index for dedup.
///
/// The index maps a hex SHA-256 digest to the file holding those bytes.
/// It is built once in [`FsImageStorage::open`] and kept in step with
/// every store and remove. The mutex is held across the lookup and the
/// write so two identical uploads cannot both miss the index.
pub struct FsImageStorage {
    dir: PathBuf,
    dedup: ImageDedup,
    index: Mutex<HashMap<String, String>>,
}

impl FsImageStorage {
    pub async fn open(dir: impl Into<PathBuf>, dedup: ImageDedup) -> Result<Self, ImageStorageError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await.map_err(io_err)?;

        let index = if dedup == ImageDedup::Off {
            HashMap::new()
        } else {
            build_index(&dir).await?
        };

        info!(dir = %dir.display(), indexed = index.len(), "Image store ready");

        Ok(Self {
            dir,
            dedup,
            index: Mutex::new(index),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn write_atomically(&self, filename: &str, bytes: &[u8]) -> Result<(), ImageStorageError> {
        let tmp = self.dir.join(format!(".{filename}.tmp"));
        let target = self.dir.join(filename);

        let written = async {
            let mut file = tokio::fs::File::create(&tmp).await?;
            file.write_all(bytes).await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&tmp, &target).await
        }
        .await;

        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(io_err(e));
        }
        Ok(())
    }
}

#[async_trait]
impl ImageStorage for FsImageStorage {
    async fn store(&self, upload: &ImageUpload) -> Result<StoredImage, ImageStorageError> {
        let mut index = self.index.lock().await;

        let digest = match self.dedup {
            ImageDedup::Off => None,
            ImageDedup::Reuse | ImageDedup::Reject => Some(digest_hex(&upload.bytes)),
        };

        if let Some(digest) = &digest {
            if let Some(existing) = index.get(digest).cloned() {
                let still_there = tokio::fs::try_exists(self.dir.join(&existing))
                    .await
                    .unwrap_or(false);
                if still_there {
                    return match self.dedup {
                        ImageDedup::Reject => Err(ImageStorageError::Duplicate { existing }),
                        _ => {
                            debug!(file = %existing, "Reusing identical image");
                            Ok(StoredImage::Reused(existing))
                        }
                    };
                }
                index.remove(digest);
            }
        }

        let filename = format!("{}{}", Uuid::new_v4(), upload.extension);
        self.write_atomically(&filename, &upload.bytes).await?;

        if let Some(digest) = digest {
            index.insert(digest, filename.clone());
        }

        debug!(file = %filename, bytes = upload.bytes.len(), "Image stored");
        Ok(StoredImage::Written(filename))
    }

    async fn remove(&self, filename: &str) -> Result<(), ImageStorageError> {
        if !is_plain_file_name(filename) {
            return Err(ImageStorageError::Io(format!("invalid file name: {filename}")));
        }

        let mut index = self.index.lock().await;

        match tokio::fs::remove_file(self.dir.join(filename)).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(file = %filename, "Image already missing on disk");
            }
            Err(e) => return Err(io_err(e)),
        }

        index.retain(|_, stored| stored != filename);
        Ok(())
    }
}

async fn build_index(dir: &Path) -> Result<HashMap<String, String>, ImageStorageError> {
    let mut index = HashMap::new();
    let mut entries = tokio::fs::read_dir(dir).await.map_err(io_err)?;

    while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        // Leftover temp files start with a dot.
        if name.starts_with('.') || !entry.file_type().await.map_err(io_err)?.is_file() {
            continue;
        }

        match tokio::fs::read(entry.path()).await {
            Ok(bytes) => {
                index.entry(digest_hex(&bytes)).or_insert(name);
            }
            Err(e) => warn!(file = %name, error = %e, "Skipping unreadable image"),
        }
    }

    Ok(index)
}

fn digest_hex(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && Path::new(name).file_name().and_then(|n| n.to_str()) == Some(name)
}

fn io_err(e: std::io::Error) -> ImageStorageError {
    ImageStorageError::Io(e.to_string())
}
