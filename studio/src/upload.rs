//! Upload checks: only image files up to [`MAX_UPLOAD_BYTES`] become designs.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use crate::consts::MAX_UPLOAD_BYTES;
use crate::design::DesignDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("not an image file: {mime_type}")]
    NotAnImage { mime_type: String },
    #[error("file is {bytes} bytes, limit is {max}")]
    TooLarge { bytes: u64, max: u64 },
}

/// Check an uploaded file's MIME type and size.
///
/// # Errors
///
/// Returns `NotAnImage` unless the type is `image/*` and `TooLarge` above
/// [`MAX_UPLOAD_BYTES`]. Exactly the limit is accepted.
pub fn validate_upload(mime_type: &str, bytes: u64) -> Result<(), UploadError> {
    let is_image = mime_type
        .trim()
        .split_once('/')
        .is_some_and(|(kind, subtype)| kind.eq_ignore_ascii_case("image") && !subtype.is_empty());
    if !is_image {
        return Err(UploadError::NotAnImage { mime_type: mime_type.to_owned() });
    }
    if bytes > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge { bytes, max: MAX_UPLOAD_BYTES });
    }
    Ok(())
}

impl DesignDescriptor {
    /// Upload descriptor for a file that passed [`validate_upload`].
    ///
    /// # Errors
    ///
    /// Returns the [`UploadError`] from validation.
    pub fn from_upload(image_ref: impl Into<String>, mime_type: &str, bytes: u64) -> Result<Self, UploadError> {
        validate_upload(mime_type, bytes)?;
        Ok(Self::upload(image_ref))
    }
}
