use std::io::Cursor;
use std::sync::Arc;

use image::{ImageFormat, RgbImage};
use tracing::{debug, info, warn};

use crate::{
    application::{dto::UploadedImage, ports::InferencePort},
    domain::{
        analysis::{capitalize, clamp_confidence, confidence_label, AnalysisOutcome, ResultView},
        color::{dominant_rgb, tone_label, Rgb},
        errors::{AnalysisError, AnalysisResult},
        prediction::{extract_predictions, top_prediction},
        vibe::summarize_vibe,
    },
};

/// Imagen ya decodificada: JPEG para el workflow y color medio para el análisis local.
struct PreparedImage {
    jpeg: Vec<u8>,
    rgb: Rgb,
}

/// Orquestador del análisis: subida -> inferencia remota + color local -> resultado.
#[derive(Clone)]
pub struct VibeCheckService {
    inference: Arc<dyn InferencePort>,
}

impl VibeCheckService {
    pub fn new(inference: Arc<dyn InferencePort>) -> Self {
        Self { inference }
    }

    pub fn workflow_id(&self) -> &str {
        self.inference.workflow_id()
    }

    /// Lleva una subida (o su ausencia) hasta un estado terminal.
    pub async fn outcome(&self, upload: Option<UploadedImage>) -> AnalysisOutcome {
        let Some(upload) = upload.filter(|u| !u.bytes.is_empty()) else {
            debug!("Sin imagen: se muestra el estado inicial");
            return AnalysisOutcome::NoImage;
        };

        debug!(
            file = upload.file_name.as_deref().unwrap_or("<sin nombre>"),
            bytes = upload.bytes.len(),
            "Imagen recibida, analizando"
        );
        let outcome = AnalysisOutcome::from_result(self.analyze(upload.bytes).await);
        info!(state = outcome.state_name(), "Análisis terminado");
        outcome
    }

    pub async fn analyze(&self, bytes: Vec<u8>) -> AnalysisResult<ResultView> {
        let prepared = tokio::task::spawn_blocking(move || prepare_image(&bytes))
            .await
            .map_err(|e| AnalysisError::DecodeFailure(e.to_string()))??;

        let raw = self.inference.run_workflow(&prepared.jpeg).await.map_err(|e| {
            warn!("Fallo llamando al workflow: {}", e);
            e
        })?;

        let predictions = extract_predictions(&raw);
        let Some(top) = top_prediction(&predictions) else {
            return Err(AnalysisError::EmptyResult);
        };

        let confidence = clamp_confidence(top.confidence);
        let tone = tone_label(prepared.rgb);

        Ok(ResultView {
            emotion: capitalize(&top.class),
            confidence,
            confidence_label: confidence_label(confidence),
            tone,
            rgb: prepared.rgb,
            face_count: predictions.len(),
            recommendation: summarize_vibe(&top.class, tone.as_str()),
            workflow_id: self.inference.workflow_id().to_string(),
            raw,
        })
    }
}

/// Solo se aceptan JPEG y PNG; cualquier otro contenido es un fallo de decodificación.
fn prepare_image(bytes: &[u8]) -> AnalysisResult<PreparedImage> {
    let format = image::guess_format(bytes)
        .map_err(|e| AnalysisError::DecodeFailure(e.to_string()))?;
    if !matches!(format, ImageFormat::Jpeg | ImageFormat::Png) {
        return Err(AnalysisError::DecodeFailure(format!(
            "unsupported format {:?}, expected JPEG or PNG",
            format
        )));
    }

    let rgb: RgbImage = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| AnalysisError::DecodeFailure(e.to_string()))?
        .to_rgb8();

    let mut jpeg = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
        .map_err(|e| AnalysisError::DecodeFailure(e.to_string()))?;

    Ok(PreparedImage {
        jpeg,
        rgb: dominant_rgb(&rgb),
    })
}
