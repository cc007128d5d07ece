use async_trait::async_trait;
use serde_json::Value;

use crate::domain::errors::AnalysisResult;

/// Puerto hacia el servicio remoto de detección y clasificación de emociones.
#[async_trait]
pub trait InferencePort: Send + Sync {
    /// Ejecuta el workflow sobre una imagen JPEG y devuelve la respuesta tal cual.
    async fn run_workflow(&self, jpeg: &[u8]) -> AnalysisResult<Value>;

    /// Identificador del workflow, para mostrarlo en el resultado.
    fn workflow_id(&self) -> &str;
}
