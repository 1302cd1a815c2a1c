//! Cloudinary image storage using signed upload and destroy calls.

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::config::CloudinaryConfig;
use crate::error::{AppError, AppResult};
use crate::external::image_store::{ImageStore, StoredImage};

pub struct CloudinaryClient {
    http: reqwest::Client,
    config: CloudinaryConfig,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl CloudinaryClient {
    pub fn new(http: reqwest::Client, config: CloudinaryConfig) -> Self {
        Self { http, config }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/v1_1/{}/image/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.cloud_name,
            action
        )
    }

    /// Request signature: the signed parameters sorted by name, joined as a
    /// query string, with the API secret appended, hashed with SHA-256.
    pub fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
        let mut sorted = params.to_vec();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let to_sign = sorted
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    async fn send(&self, operation: &str, url: String, form: Form) -> AppResult<reqwest::Response> {
        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| upload_error(operation, anyhow::Error::from(e)))?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error.message,
            Err(_) => format!("provider responded with {}", status),
        };
        Err(upload_error(operation, anyhow::anyhow!(message)))
    }
}

fn upload_error(operation: &str, source: anyhow::Error) -> AppError {
    AppError::Upload {
        operation: operation.to_string(),
        source,
    }
}

#[async_trait]
impl ImageStore for CloudinaryClient {
    async fn upload_image(&self, local_path: &Path, folder: &str) -> AppResult<StoredImage> {
        let bytes = tokio::fs::read(local_path)
            .await
            .map_err(|e| upload_error("read staged image", anyhow::Error::from(e)))?;
        let file_name = local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let timestamp = jiff::Timestamp::now().as_second().to_string();
        let signature = Self::sign(
            &[("folder", folder), ("timestamp", timestamp.as_str())],
            &self.config.api_secret,
        );

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name))
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self
            .send("upload image", self.endpoint("upload"), form)
            .await?;
        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| upload_error("upload image", anyhow::Error::from(e)))?;

        tracing::info!(
            provider = self.name(),
            public_id = %body.public_id,
            folder = folder,
            "Image uploaded"
        );

        Ok(StoredImage {
            url: body.secure_url,
            public_id: body.public_id,
        })
    }

    async fn delete_image(&self, public_id: &str) -> AppResult<()> {
        let timestamp = jiff::Timestamp::now().as_second().to_string();
        let signature = Self::sign(
            &[("public_id", public_id), ("timestamp", timestamp.as_str())],
            &self.config.api_secret,
        );

        let form = Form::new()
            .text("public_id", public_id.to_string())
            .text("api_key", self.config.api_key.clone())
            .text("timestamp", timestamp)
            .text("signature", signature)
            .text("signature_algorithm", "sha256");

        let response = self
            .send("delete image", self.endpoint("destroy"), form)
            .await?;
        let body: DestroyResponse = response
            .json()
            .await
            .map_err(|e| upload_error("delete image", anyhow::Error::from(e)))?;

        match body.result.as_str() {
            "ok" | "not found" => {
                tracing::info!(provider = self.name(), public_id = public_id, result = %body.result, "Image deleted");
                Ok(())
            }
            other => Err(upload_error(
                "delete image",
                anyhow::anyhow!("unexpected destroy result '{}'", other),
            )),
        }
    }

    fn name(&self) -> &'static str {
        "cloudinary"
    }
}
