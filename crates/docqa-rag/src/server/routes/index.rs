//! Document upload and indexing endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::path::Path;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::IndexOutcome;

/// Multipart field carrying the document
const FILE_FIELD: &str = "file";

/// POST /index - upload one PDF or text file and index it
pub async fn index_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<IndexOutcome>> {
    let start = Instant::now();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::validation(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .and_then(|name| Path::new(name).file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty())
            .ok_or_else(|| Error::validation("Uploaded file has no filename"))?;

        check_file_type(&filename)?;

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::validation(format!("Failed to read file: {}", e)))?;

        tracing::info!("Received '{}' ({} bytes)", filename, data.len());

        let staged = state.staging_path(&filename);
        let result = stage_and_index(&state, &staged, &data, &filename).await;
        remove_staged(&staged).await;

        let outcome = result?;
        tracing::info!(
            "Indexed '{}' in {:.1}s",
            filename,
            start.elapsed().as_secs_f64()
        );
        return Ok(Json(outcome));
    }

    Err(Error::validation(format!(
        "Missing multipart field '{}'",
        FILE_FIELD
    )))
}

/// Write the upload to `staged` and index it from there
async fn stage_and_index(
    state: &AppState,
    staged: &Path,
    data: &[u8],
    filename: &str,
) -> Result<IndexOutcome> {
    tokio::fs::write(staged, data).await?;
    state.orchestrator().index_document(staged, filename).await
}

/// Delete a staged upload, including one left half-written
async fn remove_staged(staged: &Path) {
    match tokio::fs::remove_file(staged).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!("Failed to remove staged upload {}: {}", staged.display(), e),
    }
}

/// Only PDF and plain text uploads are accepted
fn check_file_type(filename: &str) -> Result<()> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("pdf") | Some("txt") => Ok(()),
        _ => Err(Error::UnsupportedFileType(format!(
            "'{}': only .pdf and .txt files are accepted",
            filename
        ))),
    }
}
