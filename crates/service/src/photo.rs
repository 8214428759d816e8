//! Local filesystem storage for employee profile photos.
//!
//! Uploads are validated against a content-type allow-list and a size
//! ceiling before anything touches disk. The prior file is removed before
//! the new one is written; there is no transactional coordination between
//! file storage and the database column.

use std::path::PathBuf;

use tokio::fs;
use uuid::Uuid;

use crate::errors::ServiceError;

pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

const ALLOWED_CONTENT_TYPES: [(&str, &str); 3] = [
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
];

/// Check content type and size; returns the file extension to store under.
pub fn validate_photo(content_type: &str, size: usize) -> Result<&'static str, ServiceError> {
    let ext = ALLOWED_CONTENT_TYPES
        .iter()
        .find(|(ct, _)| *ct == content_type)
        .map(|(_, ext)| *ext)
        .ok_or_else(|| {
            ServiceError::field("photo", "unsupported content type; use JPEG, PNG or GIF")
        })?;
    if size > MAX_PHOTO_BYTES {
        return Err(ServiceError::field("photo", "file exceeds the 5MB limit"));
    }
    Ok(ext)
}

/// Media directory rooted at `media.root` from config; photos live under
/// `employee_photos/`.
#[derive(Clone, Debug)]
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Persist photo bytes, returning the storage-relative path.
    pub async fn save(
        &self,
        employee_id: Uuid,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, ServiceError> {
        let ext = validate_photo(content_type, bytes.len())?;
        let rel = format!("employee_photos/{}.{}", employee_id, ext);
        let abs = self.root.join(&rel);
        if let Some(parent) = abs.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::Storage(e.to_string()))?;
        }
        fs::write(&abs, bytes)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(rel)
    }

    /// Remove a stored file. Missing files are not an error; the column
    /// reference may outlive the file after a partial failure.
    pub async fn remove(&self, rel: &str) -> Result<(), ServiceError> {
        let abs = self.root.join(rel);
        match fs::remove_file(&abs).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ServiceError::Storage(e.to_string())),
        }
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.root.join(rel).exists()
    }

    /// Public URL for a stored path, served under `/media/`.
    pub fn url(rel: &str) -> String {
        format!("/media/{}", rel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> PhotoStore {
        let dir = std::env::temp_dir().join(format!("photo-store-{}", Uuid::new_v4()));
        PhotoStore::new(dir)
    }

    #[test]
    fn rejects_unsupported_content_type() {
        let err = validate_photo("application/pdf", 10).unwrap_err();
        assert!(matches!(err, ServiceError::FieldValidation { ref field, .. } if field == "photo"));
    }

    #[test]
    fn rejects_oversized_file() {
        assert!(validate_photo("image/png", MAX_PHOTO_BYTES + 1).is_err());
        assert!(validate_photo("image/png", MAX_PHOTO_BYTES).is_ok());
    }

    #[test]
    fn maps_content_type_to_extension() {
        assert_eq!(validate_photo("image/jpeg", 1).unwrap(), "jpg");
        assert_eq!(validate_photo("image/gif", 1).unwrap(), "gif");
    }

    #[tokio::test]
    async fn save_then_remove_round_trip() {
        let store = temp_store();
        let id = Uuid::new_v4();
        let rel = store.save(id, "image/png", b"png-bytes").await.unwrap();
        assert!(store.exists(&rel));
        assert_eq!(rel, format!("employee_photos/{}.png", id));

        store.remove(&rel).await.unwrap();
        assert!(!store.exists(&rel));
        // removing again is a no-op
        store.remove(&rel).await.unwrap();
    }

    #[tokio::test]
    async fn save_overwrites_same_extension() {
        let store = temp_store();
        let id = Uuid::new_v4();
        let first = store.save(id, "image/jpeg", b"one").await.unwrap();
        let second = store.save(id, "image/jpeg", b"two").await.unwrap();
        assert_eq!(first, second);
    }
}
