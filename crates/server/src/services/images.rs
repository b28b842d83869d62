//! Image lifecycle management.
//!
//! Owns the files under the managed upload directory: it is the only writer
//! of newly uploaded images and the only deleter of files no longer
//! referenced. Image paths outside the managed directory (bundled seed
//! assets under `/assets/...`) are never touched.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

/// Maximum accepted upload size.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Accepted raster file extensions (lower-case).
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];

/// Accepted declared content types.
const ALLOWED_CONTENT_TYPES: &[&str] = &["image/png", "image/jpeg", "image/gif", "image/webp"];

/// Errors raised while accepting an upload.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The uploaded file carried no filename.
    #[error("uploaded file has no filename")]
    MissingFileName,

    /// The filename extension is not an accepted raster format.
    #[error("unsupported image extension `{0}`")]
    UnsupportedExtension(String),

    /// The declared content type is not an accepted raster format.
    #[error("unsupported content type `{0}`")]
    UnsupportedContentType(String),

    /// The upload exceeds [`MAX_IMAGE_BYTES`].
    #[error("image exceeds the {MAX_IMAGE_BYTES} byte limit")]
    TooLarge,

    /// Writing the file failed.
    #[error("failed to store image: {0}")]
    Io(#[from] io::Error),
}

/// Stores uploaded images and releases them when their product goes away.
///
/// Uploads land under the managed storage directory at a generated,
/// collision-free name and are referenced by their public path
/// `/uploads/<file>`.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Public URL prefix the managed directory is served under.
    pub const PUBLIC_PREFIX: &'static str = "/uploads";

    /// Create an image store rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the uploaded files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Accept an upload and return its public path.
    ///
    /// The image type is checked by both file extension and declared content
    /// type, and the size against [`MAX_IMAGE_BYTES`], before anything is
    /// written. The stored name is a fresh UUID keeping the original
    /// extension.
    ///
    /// # Errors
    ///
    /// Returns an `UploadError` describing the rejected constraint, or an
    /// I/O failure from the write.
    pub fn store(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, UploadError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| UploadError::UnsupportedExtension(file_name.to_owned()))?;

        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(UploadError::UnsupportedExtension(extension));
        }
        if !ALLOWED_CONTENT_TYPES.contains(&content_type) {
            return Err(UploadError::UnsupportedContentType(content_type.to_owned()));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(UploadError::TooLarge);
        }

        fs::create_dir_all(&self.root)?;
        let stored_name = format!("{}.{extension}", Uuid::new_v4().simple());
        fs::write(self.root.join(&stored_name), bytes)?;

        tracing::info!(file = %stored_name, size = bytes.len(), "image stored");
        Ok(format!("{}/{stored_name}", Self::PUBLIC_PREFIX))
    }

    /// Returns `true` if a public path points into the managed directory.
    #[must_use]
    pub fn is_managed(path: &str) -> bool {
        path.strip_prefix(Self::PUBLIC_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Release the file behind a public path, if this store owns it.
    ///
    /// External asset paths are left alone and a missing file is a no-op;
    /// both return `Ok(false)`. Returns `Ok(true)` when a file was removed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error other than not-found from the removal.
    pub fn remove(&self, public_path: &str) -> Result<bool, io::Error> {
        if !Self::is_managed(public_path) {
            return Ok(false);
        }

        // The stored name is the final component; anything else in the path
        // (including any traversal attempt) is discarded.
        let Some(file_name) = Path::new(public_path).file_name() else {
            return Ok(false);
        };

        match fs::remove_file(self.root.join(file_name)) {
            Ok(()) => {
                tracing::info!(path = public_path, "image released");
                Ok(true)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }
}
