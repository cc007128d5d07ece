use std::sync::Arc;
use crate::application::services::VibeCheckService;

/// Estado compartido para los manejadores HTTP de Axum.
#[derive(Clone)]
pub struct HttpState {
    /// Caso de uso: análisis de una foto subida.
    pub vibe: Arc<VibeCheckService>,
    /// Límite del cuerpo de las subidas, en bytes.
    pub max_upload_bytes: usize,
}
