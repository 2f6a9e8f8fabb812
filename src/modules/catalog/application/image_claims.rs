use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Orders image file removal against uploads that may share the file.
///
/// An upload holds a shared claim from `ImageStorage::store` until its
/// product row is written, because the store can hand back an existing
/// file (`StoredImage::Reused`). Removal holds the claim exclusively while
/// it checks references and unlinks, so that check sees every row that
/// could point at the file.
#[derive(Default)]
pub struct ImageClaims {
    lock: RwLock<()>,
}

pub struct UploadClaim<'a> {
    _guard: RwLockReadGuard<'a, ()>,
}

pub struct RemovalClaim<'a> {
    _guard: RwLockWriteGuard<'a, ()>,
}

impl ImageClaims {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn upload(&self) -> UploadClaim<'_> {
        UploadClaim {
            _guard: self.lock.read().await,
        }
    }

    pub async fn removal(&self) -> RemovalClaim<'_> {
        RemovalClaim {
            _guard: self.lock.write().await,
        }
    }
}
