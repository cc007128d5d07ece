use serde::Serialize;
use serde_json::Value;

use super::color::{Rgb, ToneLabel};
use super::errors::{AnalysisError, AnalysisResult};

pub const NO_FACE_MESSAGE: &str = "No face detected. Try a closer crop or stronger lighting.";
pub const ERROR_PREFIX: &str = "Something went wrong while analyzing the image: ";

/// Resultado de un análisis correcto, listo para pintar.
#[derive(Debug, Clone, Serialize)]
pub struct ResultView {
    pub emotion: String,
    /// Siempre dentro de [0, 1].
    pub confidence: f64,
    pub confidence_label: String,
    pub tone: ToneLabel,
    pub rgb: Rgb,
    pub face_count: usize,
    pub recommendation: String,
    pub workflow_id: String,
    pub raw: Value,
}

impl ResultView {
    pub fn swatch_css(&self) -> String {
        format!("rgb({},{},{})", self.rgb.r, self.rgb.g, self.rgb.b)
    }
}

/// Estados terminales de la página.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    NoImage,
    Result(ResultView),
    NoFaceDetected { message: String },
    Error { kind: ErrorKind, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    DecodeFailure,
    TransportFailure,
}

impl AnalysisOutcome {
    pub fn from_result(result: AnalysisResult<ResultView>) -> Self {
        match result {
            Ok(view) => AnalysisOutcome::Result(view),
            Err(AnalysisError::EmptyResult) => AnalysisOutcome::NoFaceDetected {
                message: NO_FACE_MESSAGE.to_string(),
            },
            Err(e @ AnalysisError::DecodeFailure(_)) => AnalysisOutcome::Error {
                kind: ErrorKind::DecodeFailure,
                message: format!("{ERROR_PREFIX}{e}"),
            },
            Err(e @ AnalysisError::TransportFailure(_)) => AnalysisOutcome::Error {
                kind: ErrorKind::TransportFailure,
                message: format!("{ERROR_PREFIX}{e}"),
            },
        }
    }

    pub fn state_name(&self) -> &'static str {
        match self {
            AnalysisOutcome::NoImage => "no_image",
            AnalysisOutcome::Result(_) => "result",
            AnalysisOutcome::NoFaceDetected { .. } => "no_face_detected",
            AnalysisOutcome::Error { .. } => "error",
        }
    }
}

/// Primera letra en mayúscula y el resto en minúscula ("HAPPY" -> "Happy").
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

pub fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        return 0.0;
    }
    confidence.clamp(0.0, 1.0)
}

/// Porcentaje con un decimal: 0.87 -> "87.0%".
pub fn confidence_label(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}
