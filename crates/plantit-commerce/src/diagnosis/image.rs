//! Photos submitted for a plant scan.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

/// A photo accepted for analysis.
///
/// Only the metadata is kept; the analysis never looks at pixel data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantImage {
    file_name: String,
    mime_type: String,
    size_bytes: u64,
}

impl PlantImage {
    /// Accept a file whose MIME type is any `image/*`.
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        size_bytes: u64,
    ) -> Result<Self, CommerceError> {
        let mime_type = mime_type.into().trim().to_ascii_lowercase();
        if !mime_type.starts_with("image/") {
            return Err(CommerceError::UnsupportedMedia(mime_type));
        }

        Ok(Self {
            file_name: file_name.into(),
            mime_type,
            size_bytes,
        })
    }

    /// Build from a file on disk, guessing the MIME type from its extension
    /// unless one is given.
    pub fn from_path(path: &Path, mime_type: Option<&str>) -> Result<Self, CommerceError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            CommerceError::UnsupportedMedia(format!("{}: {}", path.display(), e))
        })?;

        let mime_type = match mime_type {
            Some(mime) => mime.to_string(),
            None => guess_mime_type(path).to_string(),
        };
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self::new(file_name, mime_type, metadata.len())
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}

/// MIME type implied by a file extension.
///
/// Unknown extensions map to `application/octet-stream`, which
/// [`PlantImage::new`] rejects.
pub fn guess_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_any_image_type() {
        let image = PlantImage::new("fern.png", "image/png", 2048).unwrap();
        assert_eq!(image.file_name(), "fern.png");
        assert_eq!(image.size_bytes(), 2048);

        assert!(PlantImage::new("leaf.heic", "IMAGE/HEIC", 1).is_ok());
    }

    #[test]
    fn test_rejects_non_images() {
        let pdf = PlantImage::new("notes.pdf", "application/pdf", 10);
        match pdf.unwrap_err() {
            CommerceError::UnsupportedMedia(mime) => assert_eq!(mime, "application/pdf"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(PlantImage::new("clip.mp4", "video/mp4", 10).is_err());
    }

    #[test]
    fn test_guess_mime_type() {
        assert_eq!(guess_mime_type(Path::new("a/leaf.JPG")), "image/jpeg");
        assert_eq!(guess_mime_type(Path::new("leaf.webp")), "image/webp");
        let unknown = guess_mime_type(Path::new("leaf"));
        assert_eq!(unknown, "application/octet-stream");
    }
}
