//! Cover image files on disk.
//!
//! Uploads are validated before anything is written, written under a temporary
//! name and renamed into place, so a recorded path always names a complete file.
//! Removal is best-effort: a file that is already gone is not an error.

use std::io;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Maximum accepted upload size in bytes (5 MiB).
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Formats we accept for cover images.
pub const ALLOWED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

const ALLOWED_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// URL prefix under which stored images are served.
pub const PUBLIC_PREFIX: &str = "/images";

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum UploadError {
    #[error("Images only!")]
    NotAnImage,

    #[error("File too large. Max size is 5MB.")]
    TooLarge,
}

/// An uploaded file that passed validation and is ready to be written.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    data: Vec<u8>,
    format: ImageFormat,
}

impl ImageUpload {
    /// Both the declared content type and the sniffed bytes must be an allowed image format.
    pub fn new(content_type: Option<&str>, data: Vec<u8>) -> Result<Self, UploadError> {
        if data.len() > MAX_FILE_SIZE {
            return Err(UploadError::TooLarge);
        }

        let declared = content_type
            .map(|ct| ct.trim().to_ascii_lowercase())
            .ok_or(UploadError::NotAnImage)?;
        if !ALLOWED_CONTENT_TYPES.contains(&declared.as_str()) {
            return Err(UploadError::NotAnImage);
        }

        let format = image::guess_format(&data).map_err(|_| UploadError::NotAnImage)?;
        if !ALLOWED_FORMATS.contains(&format) {
            return Err(UploadError::NotAnImage);
        }

        Ok(Self { data, format })
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn extension(&self) -> &'static str {
        self.format
            .extensions_str()
            .first()
            .copied()
            .unwrap_or("img")
    }
}

#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn ensure_root(&self) -> io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    /// Write `upload` durably and return the public path to record on the recipe.
    pub async fn save(&self, upload: &ImageUpload) -> io::Result<String> {
        let file_name = format!("coverImage-{}.{}", Uuid::new_v4(), upload.extension());
        let final_path = self.root.join(&file_name);
        let temp_path = self.root.join(format!(".{file_name}.part"));

        if let Err(e) = write_synced(&temp_path, &upload.data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }
        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        tracing::debug!(path = %final_path.display(), bytes = upload.len(), "stored cover image");
        Ok(format!("{PUBLIC_PREFIX}/{file_name}"))
    }

    /// Remove the file behind a recorded cover image path, if there is one.
    pub async fn remove(&self, cover_image: &str) {
        if cover_image.is_empty() {
            return;
        }
        let Some(path) = self.disk_path(cover_image) else {
            tracing::warn!(cover_image, "not removing cover image outside the image root");
            return;
        };

        match fs::remove_file(&path).await {
            Ok(()) => tracing::debug!(path = %path.display(), "removed cover image"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to remove cover image")
            }
        }
    }

    /// Map `/images/<file>` to its location on disk. Anything that is not a
    /// single plain file name under the public prefix maps to nothing.
    pub fn disk_path(&self, cover_image: &str) -> Option<PathBuf> {
        let file_name = cover_image
            .strip_prefix(PUBLIC_PREFIX)?
            .strip_prefix('/')?;

        let is_plain = !file_name.is_empty()
            && !file_name.starts_with('.')
            && !file_name.contains(['/', '\\']);
        is_plain.then(|| self.root.join(file_name))
    }
}

async fn write_synced(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(data).await?;
    file.sync_all().await
}
