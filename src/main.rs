use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use vibe_check::application::services::VibeCheckService;
use vibe_check::adapters::{
    roboflow::client::RoboflowWorkflowClient,
    http::{state::HttpState, router},
};
use vibe_check::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Cargar .env antes de los logs para que RUST_LOG pueda venir de ahí
    dotenvy::dotenv().ok();

    // 2. Inicializar logs (RUST_LOG=info por defecto)
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    // 3. Configuración desde el entorno
    let config = AppConfig::from_env()?;
    tracing::info!("🔧 Configuración cargada: {:?}", config.workflow);

    // 4. Adaptador de inferencia: un único cliente compartido durante todo el proceso
    let inference = Arc::new(RoboflowWorkflowClient::new(
        config.workflow.clone(),
        config.request_timeout,
    ));

    // 5. Caso de uso y estado de la API
    let state = HttpState {
        vibe: Arc::new(VibeCheckService::new(inference)),
        max_upload_bytes: config.max_upload_bytes,
    };

    // 6. Router de Axum y archivos estáticos (hoja de estilos)
    let app = router(state)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(TraceLayer::new_for_http());

    // 7. Lanzar el servidor
    let addr = format!("0.0.0.0:{}", config.port);

    tracing::info!("🚀 AI Vibe Check en http://{}", addr);
    tracing::info!("📂 Archivos estáticos servidos desde '{}'", config.static_dir.display());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
