//! Image input: reads a user-selected file into an [`ImagePayload`].

use crate::ai::mime::{detect_image_mime, mime_from_extension};
use crate::models::ImagePayload;
use crate::{Error, Result};
use std::path::Path;

/// Advertised upload limit. Larger files are accepted with a warning.
pub const SOFT_LIMIT_BYTES: usize = 4 * 1024 * 1024;

pub async fn load_image(path: &Path) -> Result<ImagePayload> {
    let bytes = tokio::fs::read(path).await?;

    let mime_type = mime_from_extension(path)
        .or_else(|| detect_image_mime(&bytes))
        .ok_or_else(|| {
            Error::InvalidImage(format!(
                "{} is not a PNG, JPEG or WEBP image",
                path.display()
            ))
        })?;

    if bytes.len() > SOFT_LIMIT_BYTES {
        tracing::warn!(
            "{} is {} bytes, above the {} byte upload limit",
            path.display(),
            bytes.len(),
            SOFT_LIMIT_BYTES
        );
    }

    tracing::debug!(
        "Loaded image {} ({} bytes, {})",
        path.display(),
        bytes.len(),
        mime_type
    );
    Ok(ImagePayload::from_bytes(&bytes, mime_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_image_uses_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shoe.jpg");
        tokio::fs::write(&path, b"not really a jpeg").await.unwrap();

        let image = load_image(&path).await.unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image, ImagePayload::from_bytes(b"not really a jpeg", "image/jpeg"));
    }

    #[tokio::test]
    async fn test_load_image_sniffs_when_extension_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("upload");
        tokio::fs::write(&path, [0x89u8, 0x50, 0x4E, 0x47, 0x0D, 0x0A])
            .await
            .unwrap();

        let image = load_image(&path).await.unwrap();
        assert_eq!(image.mime_type, "image/png");
    }

    #[tokio::test]
    async fn test_load_image_rejects_other_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        tokio::fs::write(&path, b"hello").await.unwrap();

        let err = load_image(&path).await.unwrap_err();
        assert!(matches!(err, Error::InvalidImage(_)));
    }

    #[tokio::test]
    async fn test_load_image_over_soft_limit_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.png");
        tokio::fs::write(&path, vec![0u8; SOFT_LIMIT_BYTES + 1])
            .await
            .unwrap();

        assert!(load_image(&path).await.is_ok());
    }

    #[tokio::test]
    async fn test_load_image_missing_file_is_io_error() {
        let err = load_image(Path::new("/definitely/not/here.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
