use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use base64::{prelude::BASE64_STANDARD, Engine};
use image::ImageFormat;
use serde_json::json;
use tracing::warn;

use crate::adapters::http::{render::render_page, state::HttpState};
use crate::application::dto::{HealthResponse, UploadedImage};
use crate::domain::{
    analysis::{AnalysisOutcome, ErrorKind},
    errors::AnalysisError,
};

/// Lee el campo `file` del formulario. Los demás campos se ignoran.
async fn read_upload(mut multipart: Multipart) -> Result<Option<UploadedImage>, MultipartError> {
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await?.to_vec();
            upload = Some(UploadedImage { file_name, bytes });
        }
    }
    Ok(upload)
}

/// Data URL para volver a mostrar la foto; solo JPEG y PNG.
fn preview_url(bytes: &[u8]) -> Option<String> {
    let mime = match image::guess_format(bytes).ok()? {
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Png => "image/png",
        _ => return None,
    };
    Some(format!("data:{};base64,{}", mime, BASE64_STANDARD.encode(bytes)))
}

pub fn status_for(outcome: &AnalysisOutcome) -> StatusCode {
    match outcome {
        AnalysisOutcome::NoImage => StatusCode::BAD_REQUEST,
        AnalysisOutcome::Result(_) | AnalysisOutcome::NoFaceDetected { .. } => StatusCode::OK,
        AnalysisOutcome::Error { kind: ErrorKind::DecodeFailure, .. } => StatusCode::UNPROCESSABLE_ENTITY,
        AnalysisOutcome::Error { kind: ErrorKind::TransportFailure, .. } => StatusCode::BAD_GATEWAY,
    }
}

pub async fn index() -> impl IntoResponse {
    Html(render_page(&AnalysisOutcome::NoImage, None))
}

pub async fn analyze_page(State(st): State<HttpState>, multipart: Multipart) -> impl IntoResponse {
    match read_upload(multipart).await {
        Ok(upload) => {
            let preview = upload.as_ref().and_then(|u| preview_url(&u.bytes));
            let outcome = st.vibe.outcome(upload).await;
            Html(render_page(&outcome, preview.as_deref()))
        }
        Err(e) => {
            warn!("Formulario multipart inválido: {}", e);
            let outcome = AnalysisOutcome::from_result(Err(AnalysisError::DecodeFailure(e.body_text())));
            Html(render_page(&outcome, None))
        }
    }
}

pub async fn analyze_api(State(st): State<HttpState>, multipart: Multipart) -> impl IntoResponse {
    match read_upload(multipart).await {
        Ok(upload) => {
            let outcome = st.vibe.outcome(upload).await;
            (status_for(&outcome), Json(outcome)).into_response()
        }
        Err(e) => {
            warn!("Formulario multipart inválido: {}", e);
            (e.status(), Json(json!({ "error": e.body_text() }))).into_response()
        }
    }
}

pub async fn health(State(st): State<HttpState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        workflow: st.vibe.workflow_id().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
