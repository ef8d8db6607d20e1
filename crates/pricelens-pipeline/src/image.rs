//! Validated product photo uploads.

use crate::error::ImageError;

/// File extensions accepted for upload, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// An uploaded photo held in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct ProductImage {
    filename: String,
    bytes: Vec<u8>,
}

impl ProductImage {
    /// Validates an upload.
    ///
    /// # Errors
    ///
    /// - [`ImageError::MissingFilename`] for an empty file name.
    /// - [`ImageError::UnsupportedType`] when the extension is not one of
    ///   [`ALLOWED_EXTENSIONS`].
    /// - [`ImageError::Empty`] for a zero-byte upload.
    /// - [`ImageError::TooLarge`] when `bytes` exceeds `max_bytes`.
    pub fn new(
        filename: impl Into<String>,
        bytes: Vec<u8>,
        max_bytes: usize,
    ) -> Result<Self, ImageError> {
        let filename = filename.into();
        check_filename(&filename)?;
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }
        if bytes.len() > max_bytes {
            return Err(ImageError::TooLarge {
                size: bytes.len(),
                limit: max_bytes,
            });
        }
        Ok(Self { filename, bytes })
    }

    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for ProductImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductImage")
            .field("filename", &self.filename)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Checks an upload's file name before its body is read.
///
/// # Errors
///
/// [`ImageError::MissingFilename`] or [`ImageError::UnsupportedType`].
pub fn check_filename(filename: &str) -> Result<(), ImageError> {
    if filename.is_empty() {
        return Err(ImageError::MissingFilename);
    }
    let allowed = filename.rsplit_once('.').is_some_and(|(_, ext)| {
        ALLOWED_EXTENSIONS
            .iter()
            .any(|allowed| ext.eq_ignore_ascii_case(allowed))
    });
    if allowed {
        Ok(())
    } else {
        Err(ImageError::UnsupportedType {
            filename: filename.to_string(),
        })
    }
}
