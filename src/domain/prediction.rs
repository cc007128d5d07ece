use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub class: String,
    pub confidence: f64,
}

impl Prediction {
    /// Lectura tolerante: `class` ausente es "Unknown", `confidence` ausente es 0.0.
    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            class: obj
                .get("class")
                .and_then(Value::as_str)
                .unwrap_or("Unknown")
                .to_string(),
            confidence: obj.get("confidence").and_then(Value::as_f64).unwrap_or(0.0),
        })
    }
}

/// Formas conocidas de la respuesta del workflow.
#[derive(Debug, Clone, Copy)]
pub enum WorkflowResponse<'a> {
    /// Un objeto con `detection_predictions` o `results`.
    Mapping(&'a Map<String, Value>),
    /// Lista cuyo primer elemento es el nodo con las salidas.
    List(&'a Map<String, Value>),
    Unrecognized,
}

impl<'a> WorkflowResponse<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Object(node) => WorkflowResponse::Mapping(node),
            Value::Array(items) => match items.first() {
                Some(Value::Object(node)) => WorkflowResponse::List(node),
                _ => WorkflowResponse::Unrecognized,
            },
            _ => WorkflowResponse::Unrecognized,
        }
    }

    pub fn predictions(&self) -> Vec<Prediction> {
        match self {
            WorkflowResponse::Mapping(node) | WorkflowResponse::List(node) => {
                node_predictions(node)
            }
            WorkflowResponse::Unrecognized => Vec::new(),
        }
    }
}

fn predictions_of(block: Option<&Value>) -> Vec<Prediction> {
    block
        .and_then(|b| b.get("predictions"))
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Prediction::from_value).collect())
        .unwrap_or_default()
}

fn node_predictions(node: &Map<String, Value>) -> Vec<Prediction> {
    let direct = predictions_of(node.get("detection_predictions"));
    // una lista vacía en `detection_predictions` también cae a `results[0]`, en ambas formas
    if !direct.is_empty() {
        return direct;
    }
    let first_result = node
        .get("results")
        .and_then(Value::as_array)
        .and_then(|r| r.first());
    predictions_of(first_result)
}

pub fn extract_predictions(response: &Value) -> Vec<Prediction> {
    WorkflowResponse::classify(response).predictions()
}

/// Predicción de mayor confianza; en empate gana la primera.
pub fn top_prediction(predictions: &[Prediction]) -> Option<&Prediction> {
    predictions.iter().fold(None, |best: Option<&Prediction>, p| match best {
        Some(b) if b.confidence >= p.confidence => Some(b),
        _ => Some(p),
    })
}
