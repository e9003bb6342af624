use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, warn};

use crate::error::MockupError;
use crate::frames::Orientation;
use crate::output::ModelsResponse;
use crate::service::MockupRequest;

use super::HttpState;

/// Error wrapper that renders as `{"error": true, "message", "suggestion"}`.
#[derive(Debug)]
pub struct ApiError(pub MockupError);

impl From<MockupError> for ApiError {
    fn from(err: MockupError) -> Self {
        Self(err)
    }
}

/// HTTP status for an error.
pub const fn status_for(err: &MockupError) -> StatusCode {
    match err {
        MockupError::FrameAssetMissing { .. } => StatusCode::NOT_FOUND,
        MockupError::InvalidGeometry { .. }
        | MockupError::DetectionFailed { .. }
        | MockupError::UnknownModel { .. }
        | MockupError::UnknownColor { .. }
        | MockupError::MissingField { .. }
        | MockupError::InvalidRequest(_)
        | MockupError::DecodeFailure(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            warn!(error = %self.0, "Request failed");
        } else {
            debug!(error = %self.0, status = status.as_u16(), "Request rejected");
        }

        let body = json!({
            "error": true,
            "message": self.0.to_string(),
            "suggestion": self.0.suggestion(),
        });
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = std::result::Result<T, ApiError>;

/// Fields of an upload form.
#[derive(Debug, Default)]
struct UploadForm {
    file: Option<Vec<u8>>,
    file_name: Option<String>,
    color: Option<String>,
    model: Option<String>,
    orientation: Option<String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> ApiResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| MockupError::InvalidRequest(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    form.file_name = field.file_name().map(ToString::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| MockupError::InvalidRequest(e.body_text()))?;
                    form.file = Some(bytes.to_vec());
                }
                "color" | "model" | "orientation" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| MockupError::InvalidRequest(e.body_text()))?;
                    let slot = match name.as_str() {
                        "color" => &mut form.color,
                        "model" => &mut form.model,
                        _ => &mut form.orientation,
                    };
                    *slot = Some(text).filter(|t| !t.trim().is_empty());
                }
                other => debug!(field = other, "Ignoring unknown form field"),
            }
        }

        Ok(form)
    }

    fn take_file(&mut self) -> ApiResult<Vec<u8>> {
        Ok(self
            .file
            .take()
            .ok_or(MockupError::MissingField { field: "file" })?)
    }
}

async fn run_blocking<T, F>(task: F) -> ApiResult<T>
where
    F: FnOnce() -> crate::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| MockupError::Other(format!("worker task failed: {e}")))?
        .map_err(ApiError)
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "message": "Device Mockup API" }))
}

pub async fn list_models(State(st): State<HttpState>) -> impl IntoResponse {
    Json(ModelsResponse::new(st.service.catalog()))
}

pub async fn detect(State(st): State<HttpState>, multipart: Multipart) -> ApiResult<impl IntoResponse> {
    let mut form = UploadForm::read(multipart).await?;
    let bytes = form.take_file()?;
    let file_name = form.file_name;

    let service = st.service.clone();
    let detection = run_blocking(move || service.detect_bytes(&bytes, file_name.as_deref())).await?;
    Ok(Json(detection))
}

pub async fn generate(State(st): State<HttpState>, multipart: Multipart) -> ApiResult<Response> {
    let mut form = UploadForm::read(multipart).await?;
    let bytes = form.take_file()?;
    let color = form.color.ok_or(MockupError::MissingField { field: "color" })?;
    let orientation = match form.orientation.as_deref() {
        None => Orientation::Portrait,
        Some(value) => Orientation::parse(value).ok_or_else(|| {
            MockupError::InvalidRequest(format!(
                "orientation must be Portrait or Landscape, got '{value}'"
            ))
        })?,
    };

    let request = MockupRequest {
        model: form.model,
        color,
        orientation,
    };
    let file_name = form.file_name;

    let service = st.service.clone();
    let mockup =
        run_blocking(move || service.generate_bytes(&bytes, file_name.as_deref(), &request)).await?;

    let disposition = format!("attachment; filename=\"{}\"", mockup.file_name());
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        mockup.png,
    )
        .into_response())
}
