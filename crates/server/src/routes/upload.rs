//! Image upload route handler (back office).
//!
//! Batches are all-or-nothing: every file is validated before anything is
//! sent to the blob store, so a bad file never leaves earlier files behind
//! as orphaned blobs.

use axum::{
    Json,
    extract::{Multipart, State},
};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Maximum number of files per batch.
const MAX_FILES: usize = 10;

/// Maximum size of a single file: 2 MiB.
const MAX_FILE_BYTES: usize = 2 * 1024 * 1024;

/// Extensions accepted for product imagery.
const ALLOWED_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// Length of the random portion of stored filenames.
const RANDOM_NAME_LEN: usize = 16;

/// Upload response body.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub urls: Vec<String>,
}

struct PendingFile {
    stored_name: String,
    bytes: Vec<u8>,
}

/// Upload up to ten jpg images to the blob store.
///
/// POST /api/admin/uploads
#[instrument(skip(state, multipart))]
pub async fn upload(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut pending: Vec<PendingFile> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        // Non-file fields are ignored
        let Some(filename) = field.file_name().map(ToString::to_string) else {
            continue;
        };

        if pending.len() == MAX_FILES {
            return Err(AppError::BadRequest(format!(
                "at most {MAX_FILES} files per upload"
            )));
        }

        let extension = validate_extension(&filename).map_err(AppError::BadRequest)?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("failed to read {filename}: {e}")))?;

        if bytes.len() > MAX_FILE_BYTES {
            return Err(AppError::BadRequest(format!(
                "{filename} exceeds the 2MB limit"
            )));
        }

        pending.push(PendingFile {
            stored_name: randomized_filename(extension),
            bytes: bytes.to_vec(),
        });
    }

    if pending.is_empty() {
        return Err(AppError::BadRequest("no files in request".to_string()));
    }

    // Every file validated; now ship the batch
    let mut urls = Vec::with_capacity(pending.len());
    for file in pending {
        let url = state
            .blob()
            .put(&file.stored_name, "image/jpeg", file.bytes)
            .await?;
        urls.push(url);
    }

    tracing::info!(count = urls.len(), "Upload batch stored");
    Ok(Json(UploadResponse {
        success: true,
        urls,
    }))
}

/// Check the filename extension against the allowed list.
///
/// Returns the canonical lowercase extension.
fn validate_extension(filename: &str) -> std::result::Result<&'static str, String> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .ok_or_else(|| format!("{filename} has no extension; only jpg/jpeg is accepted"))?;

    ALLOWED_EXTENSIONS
        .into_iter()
        .find(|allowed| *allowed == extension)
        .ok_or_else(|| format!("{filename}: only jpg/jpeg is accepted"))
}

/// A randomized stored filename keeping the canonical extension,
/// e.g. `products/k3J9xQ2mP7aL5wT8.jpg`.
fn randomized_filename(extension: &str) -> String {
    let name: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_NAME_LEN)
        .map(char::from)
        .collect();

    format!("products/{name}.{extension}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_extension_accepts_jpg_jpeg() {
        assert_eq!(validate_extension("look-01.jpg").unwrap(), "jpg");
        assert_eq!(validate_extension("look-02.JPEG").unwrap(), "jpeg");
        assert_eq!(validate_extension("look.03.Jpg").unwrap(), "jpg");
    }

    #[test]
    fn test_validate_extension_rejects_others() {
        assert!(validate_extension("look.png").is_err());
        assert!(validate_extension("look.jpg.exe").is_err());
        assert!(validate_extension("noextension").is_err());
    }

    #[test]
    fn test_randomized_filename_shape() {
        let name = randomized_filename("jpg");
        assert!(name.starts_with("products/"));
        assert!(name.ends_with(".jpg"));
        // "products/" + 16 random chars + ".jpg"
        assert_eq!(name.len(), 9 + RANDOM_NAME_LEN + 4);
    }

    #[test]
    fn test_randomized_filenames_differ() {
        assert_ne!(randomized_filename("jpg"), randomized_filename("jpg"));
    }
}
