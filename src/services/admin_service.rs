//! Admin-facing business operations: profile, inquiries and events.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Bytes;

use crate::api::dto::CreateEventRequest;
use crate::config::UploadConfig;
use crate::error::{AppError, AppResult};
use crate::external::{ImageStore, StoredImage};
use crate::models::{Admin, Event, NewEvent, UserInquiry};
use crate::repositories::{AdminRepository, EventRepository, UserInquiryRepository};

/// An image file received with an event submission.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Client-supplied file name, without directories
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

#[derive(Clone)]
pub struct AdminService {
    admins: Arc<dyn AdminRepository>,
    inquiries: Arc<dyn UserInquiryRepository>,
    events: Arc<dyn EventRepository>,
    images: Arc<dyn ImageStore>,
    upload: UploadConfig,
}

impl AdminService {
    pub fn new(
        admins: Arc<dyn AdminRepository>,
        inquiries: Arc<dyn UserInquiryRepository>,
        events: Arc<dyn EventRepository>,
        images: Arc<dyn ImageStore>,
        upload: UploadConfig,
    ) -> Self {
        Self {
            admins,
            inquiries,
            events,
            images,
            upload,
        }
    }

    /// Gets the admin behind an authenticated request.
    pub async fn get_me(&self, admin_id: i32) -> AppResult<Admin> {
        self.admins
            .find_by_id(admin_id)
            .await?
            .ok_or(AppError::NotFound {
                entity: "admin".to_string(),
                field: "id".to_string(),
                value: admin_id.to_string(),
            })
    }

    /// Lists every contact inquiry, newest first.
    pub async fn get_all_user_inquiries(&self) -> AppResult<Vec<UserInquiry>> {
        self.inquiries.list_all().await
    }

    /// Persists a new event. `image` is the already-uploaded asset, if any.
    pub async fn create_event(
        &self,
        request: CreateEventRequest,
        admin_id: i32,
        image: Option<StoredImage>,
    ) -> AppResult<Event> {
        let (image_url, image_public_id) = match image {
            Some(stored) => (Some(stored.url), Some(stored.public_id)),
            None => (None, None),
        };

        let new_event = NewEvent {
            title: request.title,
            description: request.description,
            location: request.location,
            starts_at: request.starts_at.map(|ts| {
                jiff_diesel::DateTime::from(ts.to_zoned(jiff::tz::TimeZone::UTC).datetime())
            }),
            image_url,
            image_public_id,
            created_by: admin_id,
        };

        let event = self.events.create(new_event).await?;
        tracing::info!(event_id = event.id, admin_id = admin_id, "Event created");
        Ok(event)
    }

    /// Uploads the optional image, then persists the event.
    ///
    /// The image is staged on local disk, uploaded once and the staged copy
    /// removed. If persisting fails after a successful upload the asset is
    /// deleted again; a failed delete is logged and the persistence error is
    /// returned unchanged.
    pub async fn publish_event(
        &self,
        request: CreateEventRequest,
        admin_id: i32,
        image: Option<ImageUpload>,
    ) -> AppResult<Event> {
        let stored = match image {
            Some(upload) => Some(self.upload_staged(upload).await?),
            None => None,
        };

        let public_id = stored.as_ref().map(|s| s.public_id.clone());

        match self.create_event(request, admin_id, stored).await {
            Ok(event) => Ok(event),
            Err(err) => {
                if let Some(public_id) = public_id {
                    self.discard_image(&public_id).await;
                }
                Err(err)
            }
        }
    }

    async fn upload_staged(&self, upload: ImageUpload) -> AppResult<StoredImage> {
        let staged = self.stage(&upload).await?;
        let result = self
            .images
            .upload_image(&staged, &self.upload.event_folder)
            .await;

        if let Err(e) = tokio::fs::remove_file(&staged).await {
            tracing::warn!(path = %staged.display(), error = %e, "Failed to remove staged image");
        }

        result
    }

    /// Writes the upload to `{staging_dir}/{uuid}.{file_name}`.
    async fn stage(&self, upload: &ImageUpload) -> AppResult<PathBuf> {
        let dir = self.upload.staging_path();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::anyhow!("Failed to create staging directory: {}", e),
            })?;

        let path = dir.join(staged_file_name(&upload.file_name));
        tokio::fs::write(&path, &upload.bytes)
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::anyhow!("Failed to stage image: {}", e),
            })?;

        tracing::debug!(
            path = %path.display(),
            content_type = %upload.content_type,
            bytes = upload.bytes.len(),
            "Image staged"
        );
        Ok(path)
    }

    async fn discard_image(&self, public_id: &str) {
        match self.images.delete_image(public_id).await {
            Ok(()) => {
                tracing::info!(public_id = public_id, "Removed orphaned event image");
            }
            Err(e) => {
                tracing::error!(
                    public_id = public_id,
                    error = %e,
                    "Failed to remove orphaned event image"
                );
            }
        }
    }
}

fn staged_file_name(original: &str) -> String {
    let base = Path::new(original)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "image".to_string());
    format!("{}.{}", uuid::Uuid::new_v4(), base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::{
        InMemoryAdminRepository, InMemoryEventRepository, InMemoryUserInquiryRepository,
    };
    use crate::services::testing::RecordingImageStore;
    use crate::models::NewAdmin;

    struct Fixture {
        service: AdminService,
        admins: Arc<InMemoryAdminRepository>,
        inquiries: Arc<InMemoryUserInquiryRepository>,
        events: Arc<InMemoryEventRepository>,
        images: Arc<RecordingImageStore>,
        staging: tempfile::TempDir,
    }

    fn fixture() -> Fixture {
        let staging = tempfile::TempDir::new().unwrap();
        let admins = Arc::new(InMemoryAdminRepository::default());
        let inquiries = Arc::new(InMemoryUserInquiryRepository::default());
        let events = Arc::new(InMemoryEventRepository::default());
        let images = Arc::new(RecordingImageStore::default());
        let upload = UploadConfig {
            staging_dir: staging.path().to_string_lossy().into_owned(),
            ..UploadConfig::default()
        };
        let service = AdminService::new(
            admins.clone(),
            inquiries.clone(),
            events.clone(),
            images.clone(),
            upload,
        );
        Fixture {
            service,
            admins,
            inquiries,
            events,
            images,
            staging,
        }
    }

    fn request(title: &str) -> CreateEventRequest {
        CreateEventRequest {
            title: title.to_string(),
            description: Some("Annual meetup".to_string()),
            location: None,
            starts_at: Some("2026-11-01T18:00:00Z".parse().unwrap()),
        }
    }

    fn poster() -> ImageUpload {
        ImageUpload {
            file_name: "poster.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: Bytes::from_static(b"png"),
        }
    }

    #[tokio::test]
    async fn test_get_me_not_found() {
        let f = fixture();
        assert!(matches!(
            f.service.get_me(42).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_me_returns_admin() {
        let f = fixture();
        let admin = f
            .admins
            .create(NewAdmin {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "hash".to_string(),
            })
            .await
            .unwrap();

        let me = f.service.get_me(admin.id).await.unwrap();
        assert_eq!(me.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_get_all_user_inquiries() {
        let f = fixture();
        for subject in ["Tickets", "Venue"] {
            f.inquiries.seed(subject, "Hello");
        }

        let inquiries = f.service.get_all_user_inquiries().await.unwrap();
        assert_eq!(inquiries.len(), 2);
        assert_eq!(inquiries[0].subject.as_deref(), Some("Venue"));
    }

    #[tokio::test]
    async fn test_publish_without_image_skips_upload() {
        let f = fixture();

        let event = f.service.publish_event(request("Meetup"), 1, None).await.unwrap();

        assert!(f.images.calls().is_empty());
        assert_eq!(event.image_url, None);
        assert_eq!(event.created_by, 1);
        assert_eq!(
            event.starts_at.map(|dt| dt.to_jiff().to_string()),
            Some("2026-11-01T18:00:00".to_string())
        );
    }

    #[tokio::test]
    async fn test_publish_with_image_uploads_once_and_cleans_staging() {
        let f = fixture();

        let event = f
            .service
            .publish_event(request("Meetup"), 1, Some(poster()))
            .await
            .unwrap();

        let calls = f.images.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with("upload:event:"));
        assert!(calls[0].ends_with(".poster.png"));
        assert_eq!(event.image_public_id.as_deref(), Some("event/1"));
        assert_eq!(event.image_url.as_deref(), Some("https://img.test/event/1"));

        let staged: Vec<_> = std::fs::read_dir(f.staging.path()).unwrap().collect();
        assert!(staged.is_empty());
    }

    #[tokio::test]
    async fn test_publish_failure_after_upload_deletes_image() {
        let f = fixture();
        f.events.fail_with("events table is read-only");

        let err = f
            .service
            .publish_event(request("Meetup"), 1, Some(poster()))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "events table is read-only");
        let calls = f.images.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1], "delete:event/1");
    }

    #[tokio::test]
    async fn test_failed_compensation_keeps_original_error() {
        let f = fixture();
        f.events.fail_with("insert failed");
        f.images.fail_deletes();

        let err = f
            .service
            .publish_event(request("Meetup"), 1, Some(poster()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unexpected { .. }));
        assert_eq!(err.to_string(), "insert failed");
    }

    #[tokio::test]
    async fn test_upload_failure_skips_persistence() {
        let f = fixture();
        f.images.fail_uploads();

        let err = f
            .service
            .publish_event(request("Meetup"), 1, Some(poster()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Upload { .. }));
        assert!(f.events.all().is_empty());
    }

    #[test]
    fn test_staged_file_name_strips_directories() {
        let name = staged_file_name("../../etc/passwd");
        assert!(name.ends_with(".passwd"));
        assert!(!name.contains('/'));

        let name = staged_file_name("");
        assert!(name.ends_with(".image"));
    }
}
