/// Frase de recomendación para una emoción y un tono. Las emociones desconocidas
/// caen en una plantilla genérica.
pub fn summarize_vibe(emotion: &str, tone: &str) -> String {
    let t = tone.to_lowercase();
    match emotion.to_lowercase().as_str() {
        "happy" => format!("Reads {t} and approachable. This is a strong first-impression photo."),
        "sad" => format!(
            "Leans {t} and introspective. Consider brighter light or eye contact for dating apps."
        ),
        "angry" => format!("High energy with a {t} feel. A smile shot could broaden appeal."),
        "surprised" => format!("Curious and {t}. Natural, candid energy works here."),
        "neutral" => format!("Clean, composed, and {t}. Subtle smile could lift warmth."),
        "fear" => format!("{t} with reserved energy. Softer lighting may help."),
        "disgust" => format!("{t} but distant. Try a clean background and smile."),
        _ => format!("Unique vibe with a {t} undertone."),
    }
}
