//! Bulk import endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    services::import::ImportReport,
};

use super::AuthenticatedUser;

/// Import equipment from a spreadsheet upload.
/// Any authenticated user may import; there is no role restriction on this
/// endpoint.
#[utoipa::path(
    post,
    path = "/import",
    tag = "import",
    security(("bearer_auth" = [])),
    request_body(content = Vec<u8>, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Import succeeded", body = ImportReport),
        (status = 400, description = "Invalid file or malformed rows"),
        (status = 500, description = "Import failed, nothing was committed")
    )
)]
pub async fn import_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    mut multipart: Multipart,
) -> AppResult<Json<ImportReport>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if !filename.ends_with(".xlsx") && !filename.ends_with(".xls") {
            return Err(AppError::Validation(
                "File must be an Excel spreadsheet (.xlsx or .xls)".to_string(),
            ));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;

        let report = state.services.import.import_equipment(&bytes).await?;
        return Ok(Json(report));
    }

    Err(AppError::Validation("Missing 'file' field".to_string()))
}
