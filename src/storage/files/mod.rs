//! Attachment object storage
//!
//! Supports local storage for development and S3 compatible stores in
//! deployment, behind the [`AttachmentStore`] trait.

mod keys;
mod local;
mod s3;
mod storage;
mod types;


pub use keys::ObjectKey;
pub use local::LocalStorage;
pub use s3::S3Storage;
pub use types::{AttachmentStore, FileStorage, ObjectMetadata};
