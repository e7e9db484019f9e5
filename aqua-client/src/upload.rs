//! Photo attachments
//!
//! Complaint submissions and inspection reports carry photos as multipart
//! parts. Only JPEG, PNG, GIF and WebP are accepted, each at most
//! [`MAX_PHOTO_BYTES`], at most [`MAX_PHOTOS`] per submission. Everything is
//! checked before a request is built.

use reqwest::multipart::{Form, Part};
use std::path::Path;

use crate::error::{ClientError, ClientResult};

pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_PHOTOS: usize = 5;
pub const ALLOWED_PHOTO_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Validated photo ready to upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    file_name: String,
    mime_type: &'static str,
    bytes: Vec<u8>,
}

impl Attachment {
    /// Validate an in-memory photo; the type is guessed from the file name
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> ClientResult<Self> {
        let file_name = file_name.into();
        let guessed = mime_guess::from_path(&file_name).first();
        let mime_type = guessed
            .as_ref()
            .and_then(|m| {
                ALLOWED_PHOTO_TYPES
                    .iter()
                    .copied()
                    .find(|allowed| *allowed == m.essence_str())
            })
            .ok_or_else(|| {
                ClientError::Upload(format!(
                    "{file_name}: only JPEG, PNG, GIF and WebP images are accepted"
                ))
            })?;

        if bytes.len() > MAX_PHOTO_BYTES {
            return Err(ClientError::Upload(format!(
                "{file_name}: {} bytes exceeds the {} MiB limit",
                bytes.len(),
                MAX_PHOTO_BYTES / (1024 * 1024)
            )));
        }

        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    /// Read and validate a photo from disk
    pub async fn from_path(path: &Path) -> ClientResult<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ClientError::Upload(format!("{}: not a file", path.display())))?
            .to_string();

        let metadata = tokio::fs::metadata(path).await?;
        if metadata.len() > MAX_PHOTO_BYTES as u64 {
            return Err(ClientError::Upload(format!(
                "{file_name}: {} bytes exceeds the {} MiB limit",
                metadata.len(),
                MAX_PHOTO_BYTES / (1024 * 1024)
            )));
        }

        let bytes = tokio::fs::read(path).await?;
        Self::new(file_name, bytes)
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn into_part(self) -> ClientResult<Part> {
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(self.mime_type)
            .map_err(|e| ClientError::Upload(e.to_string()))
    }
}

/// Check the per-submission count
pub fn check_count(photos: &[Attachment]) -> ClientResult<()> {
    if photos.len() > MAX_PHOTOS {
        return Err(ClientError::Upload(format!(
            "at most {MAX_PHOTOS} photos per submission, got {}",
            photos.len()
        )));
    }
    Ok(())
}

/// Append every photo to `form` under the `field` name
pub fn attach(form: Form, field: &'static str, photos: Vec<Attachment>) -> ClientResult<Form> {
    check_count(&photos)?;
    photos
        .into_iter()
        .try_fold(form, |form, photo| Ok(form.part(field, photo.into_part()?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_image_types() {
        for name in ["a.jpg", "b.JPEG", "c.png", "d.gif", "e.webp"] {
            let att = Attachment::new(name, vec![0u8; 16]).unwrap();
            assert!(ALLOWED_PHOTO_TYPES.contains(&att.mime_type()), "{name}");
        }
    }

    #[test]
    fn test_rejects_other_types() {
        assert!(matches!(
            Attachment::new("scan.pdf", vec![1, 2, 3]),
            Err(ClientError::Upload(_))
        ));
        assert!(Attachment::new("noext", vec![1]).is_err());
        assert!(Attachment::new("image.svg", vec![1]).is_err());
    }

    #[test]
    fn test_size_cap() {
        assert!(Attachment::new("ok.png", vec![0; MAX_PHOTO_BYTES]).is_ok());
        assert!(Attachment::new("big.png", vec![0; MAX_PHOTO_BYTES + 1]).is_err());
    }

    #[test]
    fn test_count_cap() {
        let photos: Vec<_> = (0..=MAX_PHOTOS)
            .map(|i| Attachment::new(format!("{i}.jpg"), vec![0; 4]).unwrap())
            .collect();
        assert!(check_count(&photos[..MAX_PHOTOS]).is_ok());
        assert!(attach(Form::new(), "photos", photos).is_err());
    }

    #[tokio::test]
    async fn test_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tap.webp");
        std::fs::write(&path, b"RIFF....WEBP").unwrap();
        let att = Attachment::from_path(&path).await.unwrap();
        assert_eq!(att.file_name(), "tap.webp");
        assert_eq!(att.mime_type(), "image/webp");
        assert_eq!(att.len(), 12);
    }
}
