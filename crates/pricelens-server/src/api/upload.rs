use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Extension, Json,
};
use pricelens_core::PipelineResult;
use pricelens_pipeline::{check_filename, ImageError, PipelineError, ProductImage};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// Multipart field carrying the photo.
const FILE_FIELD: &str = "file";

pub(super) async fn upload_image(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<PipelineResult>>, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| map_multipart_error(&req_id.0, &e))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        check_filename(&filename).map_err(|e| map_image_error(&req_id.0, &e))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| map_multipart_error(&req_id.0, &e))?;
        upload = Some((filename, bytes));
        break;
    }

    let Some((filename, bytes)) = upload else {
        return Err(ApiError::new(req_id.0, "bad_request", "No file part"));
    };

    let image = ProductImage::new(filename, bytes.to_vec(), state.max_upload_bytes)
        .map_err(|e| map_image_error(&req_id.0, &e))?;

    let result = state
        .pipeline
        .run(&image)
        .await
        .map_err(|e| map_pipeline_error(&req_id.0, &e))?;

    Ok(Json(ApiResponse {
        data: result,
        meta: ResponseMeta::new(req_id.0),
    }))
}

fn map_multipart_error(request_id: &str, error: &MultipartError) -> ApiError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::new(request_id, "payload_too_large", "upload exceeds size limit");
    }
    tracing::debug!(error = %error, "malformed multipart upload");
    ApiError::new(request_id, "bad_request", error.body_text())
}

fn map_image_error(request_id: &str, error: &ImageError) -> ApiError {
    let code = match error {
        ImageError::TooLarge { .. } => "payload_too_large",
        ImageError::MissingFilename | ImageError::UnsupportedType { .. } | ImageError::Empty => {
            "bad_request"
        }
    };
    ApiError::new(request_id, code, error.to_string())
}

fn map_pipeline_error(request_id: &str, error: &PipelineError) -> ApiError {
    tracing::error!(error = %error, "pipeline failed");
    ApiError::new(request_id, "pipeline_failed", error.to_string())
}
