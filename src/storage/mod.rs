use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

use crate::config;

/// Content types accepted for post cover images.
const ALLOWED_IMAGE_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
];

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Unsupported content type: {0}")]
    UnsupportedType(String),

    #[error("File too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Local-disk store for post images. Files are written under
/// `<upload_dir>/posts/` and exposed as `<public_base>/uploads/posts/...`
/// through the static file route.
pub struct ImageStore {
    root: PathBuf,
    public_base: String,
    max_bytes: usize,
}

impl ImageStore {
    pub fn from_config() -> Self {
        let storage = &config::config().storage;
        Self {
            root: PathBuf::from(&storage.upload_dir),
            public_base: storage.public_base_url.trim_end_matches('/').to_string(),
            max_bytes: storage.max_upload_bytes,
        }
    }

    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into().trim_end_matches('/').to_string(),
            max_bytes,
        }
    }

    /// Validate and persist an uploaded image, returning its public URL.
    pub async fn save(&self, content_type: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let ext = Self::extension_for(content_type)
            .ok_or_else(|| StorageError::UnsupportedType(content_type.to_string()))?;

        if bytes.len() > self.max_bytes {
            return Err(StorageError::TooLarge { size: bytes.len(), max: self.max_bytes });
        }

        let file_name = format!("{}.{}", Uuid::new_v4(), ext);
        let dir = self.root.join("posts");
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&file_name), bytes).await?;

        Ok(format!("{}/uploads/posts/{}", self.public_base, file_name))
    }

    /// Best-effort delete by public URL. URLs that do not point into this
    /// store are ignored; a missing file is logged, not an error.
    pub async fn delete(&self, image_url: &str) {
        let Some(relative) = self.relative_path(image_url) else {
            warn!("Ignoring delete for foreign image URL: {}", image_url);
            return;
        };

        let path = self.root.join(relative);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            warn!("Failed to delete image {}: {}", path.display(), e);
        }
    }

    /// Map a public URL back to a path relative to the upload root.
    /// Rejects anything outside `/uploads/` or containing traversal parts.
    fn relative_path(&self, image_url: &str) -> Option<PathBuf> {
        let parsed = url::Url::parse(image_url).ok()?;
        let rest = parsed.path().strip_prefix("/uploads/")?;

        let path = Path::new(rest);
        if path
            .components()
            .any(|c| !matches!(c, std::path::Component::Normal(_)))
        {
            return None;
        }

        Some(path.to_path_buf())
    }

    fn extension_for(content_type: &str) -> Option<&'static str> {
        ALLOWED_IMAGE_TYPES
            .iter()
            .find(|(ct, _)| *ct == content_type)
            .map(|(_, ext)| *ext)
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub fn is_allowed_type(content_type: &str) -> bool {
        Self::extension_for(content_type).is_some()
    }
}
