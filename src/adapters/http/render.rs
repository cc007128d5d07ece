use crate::domain::analysis::{AnalysisOutcome, ResultView};

pub const UPLOAD_HINT: &str = "Drop a photo to begin. Aim for a clear, front-facing face in good light.";
pub const EMPTY_RESULT_HINT: &str =
    "No image yet. Your emotion, color tone, confidence, and recommendations will appear here.";

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Página completa para un estado terminal. `preview` es un data URL de la imagen subida.
pub fn render_page(outcome: &AnalysisOutcome, preview: Option<&str>) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    html.push_str("<title>AI Vibe Check</title>");
    html.push_str("<link rel=\"stylesheet\" href=\"/vibe.css\">");
    html.push_str("</head><body data-state=\"");
    html.push_str(outcome.state_name());
    html.push_str("\"><main class=\"block-container\">");
    html.push_str("<div class=\"app-title\">💘 AI Vibe Check</div>");
    html.push_str("<div class=\"app-sub\">Professional-grade photo vibe analysis: emotion + color psychology.</div>");
    html.push_str("<div class=\"columns\">");

    render_upload(&mut html, preview);

    html.push_str("<section class=\"right\"><h4>Result</h4><div class=\"card\">");
    match outcome {
        AnalysisOutcome::NoImage => {
            html.push_str("<div class=\"muted\">");
            html.push_str(EMPTY_RESULT_HINT);
            html.push_str("</div>");
        }
        AnalysisOutcome::Result(view) => render_result(&mut html, view),
        AnalysisOutcome::NoFaceDetected { message } => {
            html.push_str("<div class=\"alert warning\">");
            html.push_str(&html_escape(message));
            html.push_str("</div>");
        }
        AnalysisOutcome::Error { message, .. } => {
            html.push_str("<div class=\"alert error\">");
            html.push_str(&html_escape(message));
            html.push_str("</div>");
        }
    }
    html.push_str("</div></section></div>");

    html.push_str("<footer class=\"muted\">Powered by <span class=\"brand\">Roboflow</span></footer>");
    html.push_str("</main></body></html>");
    html
}

fn render_upload(html: &mut String, preview: Option<&str>) {
    html.push_str("<section class=\"left\"><h4>Upload</h4><div class=\"card\">");
    html.push_str("<form method=\"post\" action=\"/analyze\" enctype=\"multipart/form-data\">");
    html.push_str("<label for=\"file\">Upload a selfie or profile photo</label>");
    html.push_str("<input id=\"file\" type=\"file\" name=\"file\" accept=\".jpg,.jpeg,.png,image/jpeg,image/png\">");
    html.push_str("<button type=\"submit\">Analyze</button></form>");
    match preview {
        Some(src) => {
            html.push_str("<div class=\"hero-img\"><img alt=\"Uploaded photo\" src=\"");
            html.push_str(&html_escape(src));
            html.push_str("\"></div>");
        }
        None => {
            html.push_str("<div class=\"alert info\">");
            html.push_str(UPLOAD_HINT);
            html.push_str("</div>");
        }
    }
    html.push_str("</div></section>");
}

fn render_result(html: &mut String, view: &ResultView) {
    html.push_str("<div class=\"pill\">Workflow: <span class=\"brand\">");
    html.push_str(&html_escape(&view.workflow_id));
    html.push_str("</span></div>");
    html.push_str("<h3 class=\"emotion\">");
    html.push_str(&html_escape(&view.emotion));
    html.push_str("</h3><div class=\"muted\">Detected primary emotion</div>");

    html.push_str("<div class=\"progress\"><div class=\"fill\" style=\"width:");
    html.push_str(&view.confidence_label);
    html.push_str("\"></div></div><div class=\"progress-text\">Confidence: ");
    html.push_str(&view.confidence_label);
    html.push_str("</div><hr>");

    html.push_str("<div class=\"metrics\">");
    metric(html, "Tone", &html_escape(view.tone.as_str()));
    metric(html, "RGB", &view.rgb.to_string());
    metric(html, "Faces", &view.face_count.to_string());
    metric(
        html,
        "Palette",
        &format!("<div class=\"swatch\" style=\"background: {};\"></div>", view.swatch_css()),
    );
    html.push_str("</div><hr>");

    html.push_str("<h4>Recommendation</h4><div class=\"alert success\">");
    html.push_str(&html_escape(&view.recommendation));
    html.push_str("</div>");

    let raw = serde_json::to_string_pretty(&view.raw).unwrap_or_else(|_| view.raw.to_string());
    html.push_str("<details><summary>Technical output (JSON)</summary><pre>");
    html.push_str(&html_escape(&raw));
    html.push_str("</pre></details>");
}

/// `value` ya debe venir escapado.
fn metric(html: &mut String, key: &str, value: &str) {
    html.push_str("<div class=\"metric\"><div class=\"k\">");
    html.push_str(key);
    html.push_str("</div><div class=\"v\">");
    html.push_str(value);
    html.push_str("</div></div>");
}
