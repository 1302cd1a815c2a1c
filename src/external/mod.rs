//! Outbound integrations.

pub mod client;
pub mod cloudinary;
pub mod image_store;

pub use cloudinary::CloudinaryClient;
pub use image_store::{ImageStore, StoredImage};
