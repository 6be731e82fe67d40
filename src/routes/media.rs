use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;

use crate::dto::auth_dto::UploadResponse;
use crate::error::{Error, Result};
use crate::utils::media::{save_upload, MediaBase};
use crate::AppState;

const DEFAULT_FOLDER: &str = "uploads";

/// Multipart upload: `file` is required, `folder` picks the subdirectory.
#[axum::debug_handler]
pub async fn upload_media(
    State(state): State<AppState>,
    media: MediaBase,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    let mut folder = DEFAULT_FOLDER.to_string();
    let mut file: Option<(String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "folder" => {
                let value = field.text().await?;
                if !value.trim().is_empty() {
                    folder = value.trim().to_string();
                }
            }
            "file" => {
                let filename = field.file_name().unwrap_or("upload.bin").to_string();
                let data = field.bytes().await?;
                file = Some((filename, data));
            }
            _ => {}
        }
    }

    let (filename, data) =
        file.ok_or_else(|| Error::BadRequest("Multipart field 'file' is required".to_string()))?;
    let path = save_upload(&state.config.media_root, &folder, &filename, &data).await?;
    tracing::info!(%path, size = data.len(), "media uploaded");

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            url: media.url(&path),
            path,
        }),
    ))
}
