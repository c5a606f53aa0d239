//! Size-checked reading of user uploads into data URIs.

use anigen_config::UploadsConfig;
use anigen_core::encode_data_uri;
use anigen_error::{AnigenResult, UploadError, UploadErrorKind};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Kind of file being uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadKind {
    /// Character or background image
    Image,
    /// Background music
    Bgm,
}

impl UploadKind {
    fn family(&self) -> &'static str {
        match self {
            UploadKind::Image => "image",
            UploadKind::Bgm => "audio",
        }
    }

    fn mime_type(&self, extension: &str) -> Option<&'static str> {
        let mime = match (self, extension) {
            (UploadKind::Image, "png") => "image/png",
            (UploadKind::Image, "jpg" | "jpeg") => "image/jpeg",
            (UploadKind::Image, "gif") => "image/gif",
            (UploadKind::Image, "webp") => "image/webp",
            (UploadKind::Image, "bmp") => "image/bmp",
            (UploadKind::Image, "svg") => "image/svg+xml",
            (UploadKind::Bgm, "mp3") => "audio/mp3",
            (UploadKind::Bgm, "wav") => "audio/wav",
            (UploadKind::Bgm, "ogg") => "audio/ogg",
            (UploadKind::Bgm, "m4a") => "audio/mp4",
            (UploadKind::Bgm, "aac") => "audio/aac",
            (UploadKind::Bgm, "flac") => "audio/flac",
            _ => return None,
        };
        Some(mime)
    }
}

/// Size limits per upload kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    /// Largest accepted image in bytes
    pub max_image_bytes: u64,
    /// Largest accepted BGM track in bytes
    pub max_bgm_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_image_bytes: 5 * 1024 * 1024,
            max_bgm_bytes: 10 * 1024 * 1024,
        }
    }
}

impl From<&UploadsConfig> for UploadPolicy {
    fn from(config: &UploadsConfig) -> Self {
        Self {
            max_image_bytes: *config.max_image_bytes(),
            max_bgm_bytes: *config.max_bgm_bytes(),
        }
    }
}

impl UploadPolicy {
    /// Limit for `kind`.
    pub fn limit(&self, kind: UploadKind) -> u64 {
        match kind {
            UploadKind::Image => self.max_image_bytes,
            UploadKind::Bgm => self.max_bgm_bytes,
        }
    }
}

/// An accepted upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// File name without directories
    pub file_name: String,
    /// Contents as a data URI
    pub data_uri: String,
    /// Size in bytes
    pub size: u64,
}

/// Read `path` as an upload of `kind`.
///
/// The size is taken from file metadata and checked before any bytes are
/// read, so an oversized file is never loaded. The read itself stops one byte
/// past the limit, which catches files whose metadata understates them.
///
/// # Errors
///
/// Returns [`UploadErrorKind::TooLarge`] over the limit,
/// [`UploadErrorKind::UnsupportedType`] for an unknown extension and
/// [`UploadErrorKind::Read`] when the file cannot be read.
#[tracing::instrument(skip(path, policy), fields(path = %path.display()))]
pub async fn read_upload(
    path: &Path,
    kind: UploadKind,
    policy: &UploadPolicy,
) -> AnigenResult<Upload> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        UploadError::new(UploadErrorKind::Read(format!("{}: {}", path.display(), e)))
    })?;
    let size = metadata.len();
    let limit = policy.limit(kind);
    if size > limit {
        tracing::warn!(size, limit, "Upload rejected: too large");
        return Err(UploadError::new(UploadErrorKind::TooLarge {
            file_name,
            size,
            limit,
        })
        .into());
    }

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let Some(mime_type) = kind.mime_type(&extension) else {
        return Err(UploadError::new(UploadErrorKind::UnsupportedType {
            file_name,
            expected: kind.family().to_string(),
        })
        .into());
    };

    let read_error = |e: std::io::Error| {
        UploadError::new(UploadErrorKind::Read(format!("{}: {}", path.display(), e)))
    };
    let file = tokio::fs::File::open(path).await.map_err(read_error)?;
    let mut bytes = Vec::with_capacity(size as usize);
    file.take(limit.saturating_add(1))
        .read_to_end(&mut bytes)
        .await
        .map_err(read_error)?;

    let size = bytes.len() as u64;
    if size > limit {
        tracing::warn!(size, limit, "Upload rejected: grew past the limit while reading");
        return Err(UploadError::new(UploadErrorKind::TooLarge {
            file_name,
            size,
            limit,
        })
        .into());
    }

    tracing::debug!(size, mime_type, "Accepted upload");
    Ok(Upload {
        file_name,
        data_uri: encode_data_uri(mime_type, &bytes),
        size,
    })
}
