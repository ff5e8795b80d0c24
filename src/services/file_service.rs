//! Binary storage for design images and payment slips.
//!
//! Files live in the `stored_files` table, grouped into the `images` and `uploads`
//! buckets. Every upload goes through [`validate_upload`] before it is written.

use sea_orm::{ActiveModelTrait, ActiveValue::Set, ConnectionTrait, EntityTrait};
use uuid::Uuid;

use crate::{
    entity::{StoredFiles, stored_files},
    error::{AppError, AppResult},
};

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_EXTENSIONS: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];
const ALLOWED_CONTENT_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Design pictures and custom-order references.
    Images,
    /// Bank slips.
    Uploads,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Images => "images",
            Bucket::Uploads => "uploads",
        }
    }
}

/// A file part taken from a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct SavedFile {
    pub id: Uuid,
    pub url: String,
}

pub fn validate_upload(file: &UploadedFile) -> AppResult<()> {
    if file.bytes.is_empty() {
        return Err(AppError::bad_request("Uploaded file is empty"));
    }
    if file.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::bad_request("File too large, maximum size is 5MB"));
    }
    let extension = file
        .filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    let content_type = file.content_type.to_ascii_lowercase();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str())
        || !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str())
    {
        return Err(AppError::bad_request(
            "Only image files are allowed (jpeg, jpg, png, gif, webp)",
        ));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct FileStore {
    base_url: String,
}

impl FileStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, id: Uuid) -> String {
        format!("{}/api/files/{id}", self.base_url)
    }

    /// Validates and stores `file`, returning its id and public URL.
    pub async fn save<C>(
        &self,
        db: &C,
        bucket: Bucket,
        file: UploadedFile,
        uploaded_by: Option<Uuid>,
    ) -> AppResult<SavedFile>
    where
        C: ConnectionTrait,
    {
        validate_upload(&file)?;
        let size = file.bytes.len() as i64;
        let stored = stored_files::ActiveModel {
            bucket: Set(bucket.as_str().to_string()),
            filename: Set(file.filename),
            content_type: Set(file.content_type.to_ascii_lowercase()),
            size_bytes: Set(size),
            data: Set(file.bytes),
            uploaded_by: Set(uploaded_by),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::debug!(file_id = %stored.id, bucket = bucket.as_str(), size, "file stored");
        Ok(SavedFile {
            id: stored.id,
            url: self.url_for(stored.id),
        })
    }

    pub async fn load<C>(&self, db: &C, id: Uuid) -> AppResult<stored_files::Model>
    where
        C: ConnectionTrait,
    {
        StoredFiles::find_by_id(id)
            .one(db)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content_type: &str, len: usize) -> UploadedFile {
        UploadedFile {
            filename: name.into(),
            content_type: content_type.into(),
            bytes: vec![1; len],
        }
    }

    #[test]
    fn accepts_common_image_types() {
        assert!(validate_upload(&file("slip.PNG", "image/png", 10)).is_ok());
        assert!(validate_upload(&file("a.jpeg", "image/jpeg", 10)).is_ok());
        assert!(validate_upload(&file("a.webp", "image/webp", MAX_UPLOAD_BYTES)).is_ok());
    }

    #[test]
    fn rejects_oversized_and_foreign_files() {
        assert!(validate_upload(&file("a.png", "image/png", MAX_UPLOAD_BYTES + 1)).is_err());
        assert!(validate_upload(&file("a.pdf", "application/pdf", 10)).is_err());
        assert!(validate_upload(&file("a.png", "text/html", 10)).is_err());
        assert!(validate_upload(&file("noextension", "image/png", 10)).is_err());
        assert!(validate_upload(&file("a.png", "image/png", 0)).is_err());
    }

    #[test]
    fn urls_point_at_the_file_route() {
        let store = FileStore::new("http://localhost:3000/");
        let id = Uuid::nil();
        assert_eq!(
            store.url_for(id),
            "http://localhost:3000/api/files/00000000-0000-0000-0000-000000000000"
        );
    }
}
