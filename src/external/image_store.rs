//! Storage seam for uploaded images.

use std::path::Path;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::AppResult;

/// Image accepted by the storage provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredImage {
    /// Public HTTPS URL of the asset
    pub url: String,
    /// Provider identifier used to delete the asset later
    pub public_id: String,
}

/// Remote image storage.
///
/// Implementations must be Send + Sync; the handler layer holds them as
/// `Arc<dyn ImageStore>`.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Uploads the file at `local_path` into `folder`.
    async fn upload_image(&self, local_path: &Path, folder: &str) -> AppResult<StoredImage>;

    /// Deletes a previously uploaded asset. Deleting an asset that no longer
    /// exists succeeds.
    async fn delete_image(&self, public_id: &str) -> AppResult<()>;

    fn name(&self) -> &'static str;
}
