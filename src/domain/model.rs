pub const DEFAULT_API_URL: &str = "https://serverless.roboflow.com";
pub const DEFAULT_WORKSPACE: &str = "jordans-vibe-check";
pub const DEFAULT_WORKFLOW_ID: &str = "detect-and-classify";

/// Identifica el workflow remoto (detección de caras + clasificación de emoción).
#[derive(Clone)]
pub struct WorkflowConfig {
    pub api_url: String,        // base URL, sin barra final
    pub api_key: String,
    pub workspace: String,      // e.g. "jordans-vibe-check"
    pub workflow_id: String,    // e.g. "detect-and-classify"
}

impl WorkflowConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            workspace: DEFAULT_WORKSPACE.to_string(),
            workflow_id: DEFAULT_WORKFLOW_ID.to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}/workflows/{}",
            self.api_url.trim_end_matches('/'),
            self.workspace,
            self.workflow_id
        )
    }
}

// La API key nunca aparece en los logs.
impl std::fmt::Debug for WorkflowConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"***")
            .field("workspace", &self.workspace)
            .field("workflow_id", &self.workflow_id)
            .finish()
    }
}
