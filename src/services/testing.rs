//! Test doubles shared by service and router tests.

use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::external::{ImageStore, StoredImage};

/// Image store that records every call as `upload:{folder}:{path}` or
/// `delete:{public_id}`.
#[derive(Default)]
pub struct RecordingImageStore {
    calls: Mutex<Vec<String>>,
    fail_uploads: AtomicBool,
    fail_deletes: AtomicBool,
}

impl RecordingImageStore {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail_uploads(&self) {
        self.fail_uploads.store(true, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    fn record(&self, call: String) -> usize {
        let mut calls = self.calls.lock().unwrap();
        calls.push(call);
        calls.iter().filter(|c| c.starts_with("upload:")).count()
    }
}

#[async_trait]
impl ImageStore for RecordingImageStore {
    async fn upload_image(&self, local_path: &Path, folder: &str) -> AppResult<StoredImage> {
        assert!(local_path.exists(), "image must be staged before upload");
        let n = self.record(format!("upload:{}:{}", folder, local_path.display()));

        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(AppError::Upload {
                operation: "upload image".to_string(),
                source: anyhow::anyhow!("provider unavailable"),
            });
        }

        Ok(StoredImage {
            url: format!("https://img.test/{}/{}", folder, n),
            public_id: format!("{}/{}", folder, n),
        })
    }

    async fn delete_image(&self, public_id: &str) -> AppResult<()> {
        self.record(format!("delete:{}", public_id));

        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AppError::Upload {
                operation: "delete image".to_string(),
                source: anyhow::anyhow!("provider unavailable"),
            });
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
